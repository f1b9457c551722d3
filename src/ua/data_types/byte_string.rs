use std::fmt;

crate::data_type!(ByteString);

/// OPC UA byte string.
///
/// Tri-state like [`ua::String`](crate::ua::String): absent (null), empty, or present. The null
/// byte string orders before the empty one, which orders before all non-empty ones; present values
/// compare byte-lexicographically.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteString(Option<Vec<u8>>);

/// XML fragment carried as its raw bytes.
///
/// Shares the byte-string representation; only the builtin-type tag differs on the wire.
pub type XmlElement = ByteString;

impl ByteString {
    /// The absent byte string.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self(Some(bytes.to_vec()))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Checks for the empty byte string. The null byte string is not empty, it is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.0.as_deref(), Some(&[]))
    }

    /// Returns contents, unless the byte string is null.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }

    /// Returns the length-prefix value of the binary encoding: `-1` when absent, the byte length
    /// otherwise.
    #[must_use]
    pub fn encoded_length(&self) -> i32 {
        self.0
            .as_deref()
            .map_or(-1, |bytes| i32::try_from(bytes.len()).unwrap_or(i32::MAX))
    }

    /// Extracts the byte slice `[start, end]` (inclusive, clipped to the actual length).
    ///
    /// An out-of-range start yields the empty byte string.
    #[must_use]
    pub(crate) fn slice_range(&self, start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        let Some(bytes) = self.as_bytes() else {
            return Self::new(&[]);
        };
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        let end = usize::try_from(end).unwrap_or(usize::MAX);
        if start >= bytes.len() {
            return Self::new(&[]);
        }
        let end = end.min(bytes.len() - 1);
        Self::new(&bytes[start..=end])
    }

    /// Overwrites the byte slice starting at `start` from `src`, which must hold exactly
    /// `end - start + 1` bytes. Writes past the actual length are dropped silently.
    pub(crate) fn write_range(&mut self, src: &Self, start: u32, end: u32) -> bool {
        debug_assert!(start <= end);
        let Some(src) = src.as_bytes() else {
            return false;
        };
        if u32::try_from(src.len()).ok() != Some(end - start + 1) {
            return false;
        }
        let Some(bytes) = self.0.as_deref_mut() else {
            return true;
        };
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        if start >= bytes.len() {
            // Nothing to copy.
            return true;
        }
        let len = src.len().min(bytes.len() - start);
        bytes[start..start + len].copy_from_slice(&src[..len]);
        true
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_deref() {
            Some(bytes) => write!(f, "ByteString({} bytes)", bytes.len()),
            None => f.write_str("ByteString(null)"),
        }
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Some(bytes))
    }
}
