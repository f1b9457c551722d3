use crate::ua;

/// Ordered sequence of relative-path steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelativePath {
    pub elements: Vec<ua::RelativePathElement>,
}

impl RelativePath {
    #[must_use]
    pub fn new(elements: Vec<ua::RelativePathElement>) -> Self {
        Self { elements }
    }
}
