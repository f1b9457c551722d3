use crate::{Result, ua};

/// Length of session nonces in bytes.
pub const NONCE_LENGTH: usize = 32;

/// URI of the `None` security policy, under which no nonces or signatures are produced.
pub const SECURITY_POLICY_NONE_URI: &str = "http://opcfoundation.org/UA/SecurityPolicy#None";

/// Interface to the cryptographic provider.
///
/// The core computes nothing cryptographic itself; nonces, signatures, and key material come from
/// this collaborator.
pub trait CryptoProvider {
    /// URI of the active security policy.
    fn security_policy_uri(&self) -> &str;

    /// Checks for the `None` policy.
    fn is_policy_none(&self) -> bool {
        self.security_policy_uri() == SECURITY_POLICY_NONE_URI
    }

    /// URI of the asymmetric signature algorithm of the active policy.
    fn signature_algorithm_uri(&self) -> &str;

    /// Produces a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Fails when the underlying entropy source fails.
    fn random_nonce(&self) -> Result<[u8; NONCE_LENGTH]>;

    /// Signs `data` with the server's private key.
    ///
    /// # Errors
    ///
    /// Fails when the private key is unavailable or the signature operation fails.
    fn sign_with_server_key(&self, data: &[u8]) -> Result<ua::ByteString>;
}
