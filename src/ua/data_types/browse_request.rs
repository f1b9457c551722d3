use crate::ua;

/// Browse service request.
///
/// `requested_max_references_per_node` of 0 leaves the cap to the server.
#[derive(Debug, Clone, Default)]
pub struct BrowseRequest {
    pub request_header: ua::RequestHeader,
    pub view: ua::ViewDescription,
    pub requested_max_references_per_node: u32,
    pub nodes_to_browse: Vec<ua::BrowseDescription>,
}
