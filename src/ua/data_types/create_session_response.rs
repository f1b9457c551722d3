use crate::ua;

/// CreateSession service response.
///
/// The authentication token identifies the session on all subsequent requests; the server
/// signature proves possession of the server certificate's private key.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionResponse {
    pub response_header: ua::ResponseHeader,
    pub session_id: ua::NodeId,
    pub authentication_token: ua::NodeId,
    pub revised_session_timeout: f64,
    pub server_nonce: ua::ByteString,
    pub server_certificate: ua::ByteString,
    pub server_signature: ua::SignatureData,
}
