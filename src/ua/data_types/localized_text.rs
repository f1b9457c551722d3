use std::fmt;

use crate::ua;

crate::data_type!(LocalizedText);

/// Human-readable text with an optional locale tag.
///
/// Ordering compares locale first, then text.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalizedText {
    locale: ua::String,
    text: ua::String,
}

impl LocalizedText {
    #[must_use]
    pub fn new(locale: impl Into<ua::String>, text: impl Into<ua::String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Text without a locale tag.
    #[must_use]
    pub fn from_text(text: impl Into<ua::String>) -> Self {
        Self {
            locale: ua::String::null(),
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn locale(&self) -> &ua::String {
        &self.locale
    }

    #[must_use]
    pub const fn text(&self) -> &ua::String {
        &self.text
    }

    /// Checks for the indeterminate localized text: neither locale nor text.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.locale.is_null() && self.text.is_null()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalizedText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
