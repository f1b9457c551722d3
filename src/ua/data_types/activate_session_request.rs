use crate::ua;

/// ActivateSession service request.
///
/// Sent on the session's first channel and again whenever an orphaned session is re-bound to a
/// new secure channel.
#[derive(Debug, Clone, Default)]
pub struct ActivateSessionRequest {
    pub request_header: ua::RequestHeader,
    pub client_signature: ua::SignatureData,
    pub locale_ids: Vec<ua::String>,
    pub user_identity_token: ua::ExtensionObject,
    pub user_token_signature: ua::SignatureData,
}
