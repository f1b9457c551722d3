use crate::ua;

/// Common header of every service request.
///
/// The authentication token identifies the session on every request after CreateSession.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    pub authentication_token: ua::NodeId,
    pub timestamp: ua::DateTime,
    pub request_handle: u32,
    pub return_diagnostics: u32,
    pub timeout_hint: u32,
}

impl RequestHeader {
    #[must_use]
    pub fn with_token(authentication_token: ua::NodeId) -> Self {
        Self {
            authentication_token,
            ..Self::default()
        }
    }
}
