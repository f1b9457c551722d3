use crate::ua;

/// TranslateBrowsePathsToNodeIds service request.
#[derive(Debug, Clone, Default)]
pub struct TranslateBrowsePathsRequest {
    pub request_header: ua::RequestHeader,
    pub browse_paths: Vec<ua::BrowsePath>,
}
