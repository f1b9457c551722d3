use crate::ua;

/// BrowseNext service request.
///
/// With `release_continuation_points` set, the listed continuation points are freed without
/// returning further references.
#[derive(Debug, Clone, Default)]
pub struct BrowseNextRequest {
    pub request_header: ua::RequestHeader,
    pub release_continuation_points: bool,
    pub continuation_points: Vec<ua::ContinuationPoint>,
}
