use std::{fmt, str::FromStr};

crate::data_type!(String);

/// OPC UA string.
///
/// Distinguishes the absent (null) string from the empty string, as the binary encoding does with
/// its `-1` length prefix. The null string orders before the empty string, which orders before all
/// non-empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct String(Option<std::string::String>);

impl String {
    /// The absent string.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn new(str: &str) -> Self {
        Self(Some(str.to_owned()))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Checks for the empty string. The null string is not empty, it is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.0.as_deref(), Some(""))
    }

    /// Returns string contents, unless the string is null.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the length-prefix value of the binary encoding: `-1` when absent, the byte length
    /// otherwise.
    #[must_use]
    pub fn encoded_length(&self) -> i32 {
        self.0
            .as_deref()
            .map_or(-1, |str| i32::try_from(str.len()).unwrap_or(i32::MAX))
    }
}

impl From<&str> for String {
    fn from(str: &str) -> Self {
        Self::new(str)
    }
}

impl From<std::string::String> for String {
    fn from(str: std::string::String) -> Self {
        Self(Some(str))
    }
}

impl FromStr for String {
    type Err = std::convert::Infallible;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(str))
    }
}

impl fmt::Display for String {
    /// The null string displays as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for String {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.as_str() {
            Some(str) => serializer.serialize_str(str),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    #[test]
    fn empty_string() {
        // The empty string is distinct from the null string and must not collapse into it.
        let str: ua::String = "".parse().expect("should parse empty string");
        assert!(!str.is_null());
        assert!(str.is_empty());
        assert_eq!(str.as_str().expect("should display empty string"), "");
        assert_eq!(str.to_string(), "");
        assert_eq!(str.encoded_length(), 0);
    }

    #[test]
    fn valid_string() {
        let str: ua::String = "lorem ipsum".parse().expect("should parse string");
        assert_eq!(str.as_str().expect("should display string"), "lorem ipsum");
        assert_eq!(str.to_string(), "lorem ipsum");
        assert_eq!(str.encoded_length(), 11);
    }

    #[test]
    fn null_orders_before_empty_before_present() {
        let null = ua::String::null();
        let empty = ua::String::new("");
        let present = ua::String::new("a");
        assert!(null < empty);
        assert!(empty < present);
        assert_eq!(null.encoded_length(), -1);
    }

    #[test]
    fn clear_resets_to_null() {
        use crate::DataType as _;

        let mut str = ua::String::new("lorem");
        str.clear();
        assert!(str.is_null());
        // Clearing twice is the same as clearing once.
        str.clear();
        assert_eq!(str, ua::String::init());
    }
}
