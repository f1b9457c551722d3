use crate::ua;

/// CloseSession service request.
#[derive(Debug, Clone, Default)]
pub struct CloseSessionRequest {
    pub request_header: ua::RequestHeader,
    pub delete_subscriptions: bool,
}
