use crate::ua;

/// CreateSession service request.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub request_header: ua::RequestHeader,
    pub endpoint_url: ua::String,
    pub session_name: ua::String,
    pub client_nonce: ua::ByteString,
    pub client_certificate: ua::ByteString,
    pub requested_session_timeout: f64,
    pub max_response_message_size: u32,
}
