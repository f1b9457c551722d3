use crate::ua;

/// Opaque continuation-point handle returned by Browse.
///
/// On the wire this is a byte string; the server encodes its internal continuation-point
/// identifier into it and decodes it back on BrowseNext.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContinuationPoint(ua::ByteString);

impl ContinuationPoint {
    /// Wraps a continuation point received on the wire.
    ///
    /// Unset continuation points indicate that the result contains all references and no
    /// continuation is actually necessary.
    #[must_use]
    pub fn new(continuation_point: &ua::ByteString) -> Option<Self> {
        if continuation_point.is_null() {
            return None;
        }

        // The continuation point should not be an empty string.
        debug_assert!(!continuation_point.is_empty());

        Some(Self(continuation_point.clone()))
    }

    /// Encodes a server-side continuation-point identifier.
    #[must_use]
    pub fn from_identifier(id: u64) -> Self {
        Self(ua::ByteString::new(&id.to_be_bytes()))
    }

    /// Decodes the server-side continuation-point identifier, if this handle carries one.
    #[must_use]
    pub fn to_identifier(&self) -> Option<u64> {
        let bytes = self.0.as_bytes()?;
        let bytes: [u8; 8] = bytes.try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    #[must_use]
    pub fn to_byte_string(&self) -> ua::ByteString {
        self.0.clone()
    }
}
