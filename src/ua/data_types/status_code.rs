use std::fmt;

crate::data_type!(StatusCode);

/// OPC UA status code.
///
/// The top two bits carry the severity: `00` good, `01` uncertain, `10` bad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(u32);

const SEVERITY_MASK: u32 = 0xC000_0000;
const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;
const SEVERITY_BAD: u32 = 0x8000_0000;

macro_rules! status_codes {
    ($( ($name:ident, $value:literal) ),* $(,)?) => {
        impl StatusCode {
            $(
                pub const $name: Self = Self($value);
            )*

            /// Returns the symbolic name for well-known codes.
            #[must_use]
            pub const fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

status_codes!(
    (GOOD, 0x0000_0000),
    (UNCERTAIN_REFERENCE_OUT_OF_SERVER, 0x406C_0000),
    (BAD_UNEXPECTED_ERROR, 0x8001_0000),
    (BAD_INTERNAL_ERROR, 0x8002_0000),
    (BAD_OUT_OF_MEMORY, 0x8003_0000),
    (BAD_ENCODING_ERROR, 0x8006_0000),
    (BAD_DECODING_ERROR, 0x8007_0000),
    (BAD_TIMEOUT, 0x800A_0000),
    (BAD_SERVICE_UNSUPPORTED, 0x800B_0000),
    (BAD_NOTHING_TO_DO, 0x800F_0000),
    (BAD_TOO_MANY_OPERATIONS, 0x8010_0000),
    (BAD_SECURITY_CHECKS_FAILED, 0x8013_0000),
    (BAD_IDENTITY_TOKEN_INVALID, 0x8020_0000),
    (BAD_IDENTITY_TOKEN_REJECTED, 0x8021_0000),
    (BAD_SECURE_CHANNEL_ID_INVALID, 0x8022_0000),
    (BAD_NONCE_INVALID, 0x8024_0000),
    (BAD_SESSION_ID_INVALID, 0x8025_0000),
    (BAD_SESSION_CLOSED, 0x8026_0000),
    (BAD_SESSION_NOT_ACTIVATED, 0x8027_0000),
    (BAD_NODE_ID_INVALID, 0x8033_0000),
    (BAD_NODE_ID_UNKNOWN, 0x8034_0000),
    (BAD_ATTRIBUTE_ID_INVALID, 0x8035_0000),
    (BAD_INDEX_RANGE_INVALID, 0x8036_0000),
    (BAD_INDEX_RANGE_NO_DATA, 0x8037_0000),
    (BAD_CONTINUATION_POINT_INVALID, 0x804A_0000),
    (BAD_NO_CONTINUATION_POINTS, 0x804B_0000),
    (BAD_REFERENCE_TYPE_ID_INVALID, 0x804C_0000),
    (BAD_BROWSE_DIRECTION_INVALID, 0x804D_0000),
    (BAD_TOO_MANY_SESSIONS, 0x8056_0000),
    (BAD_BROWSE_NAME_INVALID, 0x8060_0000),
    (BAD_VIEW_ID_UNKNOWN, 0x806B_0000),
    (BAD_QUERY_TOO_COMPLEX, 0x806E_0000),
    (BAD_NO_MATCH, 0x806F_0000),
    (BAD_SECURE_CHANNEL_CLOSED, 0x8086_0000),
    (BAD_INVALID_ARGUMENT, 0x80AB_0000),
    (BAD_CONNECTION_CLOSED, 0x80AE_0000),
    (BAD_INVALID_STATE, 0x80AF_0000),
);

impl StatusCode {
    /// Creates wrapper from the numeric wire form.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Gives up ownership and returns inner value.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Checks if status code is good.
    ///
    /// Good status codes indicate that the operation was successful and the associated results may
    /// be used. Note that this only checks the severity; compare against [`GOOD`](Self::GOOD) to
    /// test for that single code.
    #[must_use]
    pub const fn is_good(self) -> bool {
        self.0 & SEVERITY_MASK == 0
    }

    /// Checks if status code is uncertain.
    ///
    /// Uncertain status codes indicate that the operation was partially successful and that
    /// associated results might not be suitable for some purposes.
    #[must_use]
    pub const fn is_uncertain(self) -> bool {
        self.0 & SEVERITY_MASK == SEVERITY_UNCERTAIN
    }

    /// Checks if status code is bad.
    ///
    /// Bad status codes indicate that the operation failed and any associated results cannot be
    /// used.
    #[must_use]
    pub const fn is_bad(self) -> bool {
        self.0 & SEVERITY_MASK == SEVERITY_BAD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StatusCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    #[test]
    fn severity() {
        assert!(ua::StatusCode::GOOD.is_good());
        assert!(ua::StatusCode::UNCERTAIN_REFERENCE_OUT_OF_SERVER.is_uncertain());
        assert!(ua::StatusCode::BAD_OUT_OF_MEMORY.is_bad());
        assert!(!ua::StatusCode::BAD_OUT_OF_MEMORY.is_good());
    }

    #[test]
    fn display_names() {
        assert_eq!(ua::StatusCode::BAD_NO_MATCH.to_string(), "BAD_NO_MATCH");
        assert_eq!(ua::StatusCode::new(0x8123_0000).to_string(), "0x81230000");
    }
}
