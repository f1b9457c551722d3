use crate::ua;

crate::data_type!(SignatureData);

/// Signature produced by the cryptographic provider, with the URI of the algorithm used.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureData {
    pub algorithm: ua::String,
    pub signature: ua::ByteString,
}

impl SignatureData {
    #[must_use]
    pub fn new(algorithm: impl Into<ua::String>, signature: ua::ByteString) -> Self {
        Self {
            algorithm: algorithm.into(),
            signature,
        }
    }

    /// Checks for the absent signature used with the `None` security policy.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.algorithm.is_null() && self.signature.is_null()
    }
}
