use std::fmt;

/// State of a session as tracked by either peer.
///
/// Server view: `Init` → `Creating` → `Created` → `UserActivating` → `UserActivated`. Losing the
/// secure channel from any non-`Closed` state moves to `ScOrphaned`; a subsequent activation on a
/// new channel passes through `ScActivating` back to `UserActivated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Init,
    Creating,
    Created,
    UserActivating,
    ScActivating,
    UserActivated,
    ScOrphaned,
    Closing,
    Closed,
}

impl SessionState {
    /// Checks whether the session has completed user activation at least once and has not been
    /// closed since.
    #[must_use]
    pub const fn is_activated(self) -> bool {
        matches!(self, Self::UserActivated | Self::ScOrphaned | Self::ScActivating)
    }

    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
