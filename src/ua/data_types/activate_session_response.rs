use crate::ua;

/// ActivateSession service response.
#[derive(Debug, Clone, Default)]
pub struct ActivateSessionResponse {
    pub response_header: ua::ResponseHeader,
    pub server_nonce: ua::ByteString,
    pub results: Vec<ua::StatusCode>,
}
