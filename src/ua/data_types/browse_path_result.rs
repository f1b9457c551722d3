use crate::ua;

/// Per-path result of a TranslateBrowsePaths operation.
#[derive(Debug, Clone, Default)]
pub struct BrowsePathResult {
    pub status_code: ua::StatusCode,
    pub targets: Vec<ua::BrowsePathTarget>,
}

impl BrowsePathResult {
    #[must_use]
    pub fn from_status(status_code: ua::StatusCode) -> Self {
        Self {
            status_code,
            targets: Vec::new(),
        }
    }
}
