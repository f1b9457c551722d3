use crate::ua;

/// Common header of every service response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub timestamp: ua::DateTime,
    pub request_handle: u32,
    pub service_result: ua::StatusCode,
    pub service_diagnostics: ua::DiagnosticInfo,
}

impl ResponseHeader {
    #[must_use]
    pub fn new(request_handle: u32, service_result: ua::StatusCode) -> Self {
        Self {
            request_handle,
            service_result,
            ..Self::default()
        }
    }
}
