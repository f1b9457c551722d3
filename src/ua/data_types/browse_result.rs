use crate::ua;

/// Per-node result of a Browse or BrowseNext operation.
#[derive(Debug, Clone, Default)]
pub struct BrowseResult {
    pub status_code: ua::StatusCode,
    pub continuation_point: Option<ua::ContinuationPoint>,
    pub references: Vec<ua::ReferenceDescription>,
}

impl BrowseResult {
    #[must_use]
    pub fn from_status(status_code: ua::StatusCode) -> Self {
        Self {
            status_code,
            ..Self::default()
        }
    }
}
