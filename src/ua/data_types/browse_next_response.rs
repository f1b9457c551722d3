use crate::ua;

/// BrowseNext service response.
#[derive(Debug, Clone, Default)]
pub struct BrowseNextResponse {
    pub response_header: ua::ResponseHeader,
    pub results: Vec<ua::BrowseResult>,
}
