use std::fmt;

/// Direction filter applied to references during Browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowseDirection {
    #[default]
    Forward,
    Inverse,
    Both,
}

impl BrowseDirection {
    /// Checks whether a reference with the given orientation passes this direction filter.
    #[must_use]
    pub const fn accepts(self, is_forward: bool) -> bool {
        match self {
            Self::Forward => is_forward,
            Self::Inverse => !is_forward,
            Self::Both => true,
        }
    }
}

impl fmt::Display for BrowseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            Self::Forward => "FORWARD",
            Self::Inverse => "INVERSE",
            Self::Both => "BOTH",
        };
        f.write_str(str)
    }
}
