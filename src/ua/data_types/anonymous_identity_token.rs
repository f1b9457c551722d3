use crate::ua;

/// Identity token of the anonymous user, the only identity modeled by this stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymousIdentityToken {
    pub policy_id: ua::String,
}

impl AnonymousIdentityToken {
    #[must_use]
    pub fn new(policy_id: impl Into<ua::String>) -> Self {
        Self {
            policy_id: policy_id.into(),
        }
    }
}
