use derive_more::Debug;

use crate::{browse, crypto::NONCE_LENGTH, ua};

/// Opaque session handle, unique within one process run and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u32);

impl SessionId {
    #[must_use]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

/// Handle of an established secure channel, assigned by the secure-channels manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScHandle(pub u32);

/// Client identity bound to a session.
///
/// Only the anonymous identity is modeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserIdentity {
    #[default]
    Anonymous,
}

/// One session with its channel binding, authentication token, and crypto material.
///
/// State transitions are driven by the [`SessionManager`](crate::SessionManager); this type only
/// enforces that each transition starts from a legal state.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    state: ua::SessionState,
    channel: Option<ScHandle>,
    token: Option<ua::NodeId>,
    #[debug(skip)]
    nonce_server: Option<[u8; NONCE_LENGTH]>,
    user: UserIdentity,
    signature: Option<ua::SignatureData>,
    continuation_point: Option<browse::ContinuationPoint>,
    /// Set once the session first reaches `UserActivated`; selects the failure notification.
    activated_once: bool,
}

impl Session {
    pub(crate) fn new(id: SessionId, channel: ScHandle) -> Self {
        Self {
            id,
            state: ua::SessionState::Init,
            channel: Some(channel),
            token: None,
            nonce_server: None,
            user: UserIdentity::Anonymous,
            signature: None,
            continuation_point: None,
            activated_once: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub const fn state(&self) -> ua::SessionState {
        self.state
    }

    #[must_use]
    pub const fn channel(&self) -> Option<ScHandle> {
        self.channel
    }

    #[must_use]
    pub const fn token(&self) -> Option<&ua::NodeId> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn nonce_server(&self) -> Option<&[u8; NONCE_LENGTH]> {
        self.nonce_server.as_ref()
    }

    #[must_use]
    pub const fn user(&self) -> UserIdentity {
        self.user
    }

    #[must_use]
    pub const fn signature(&self) -> Option<&ua::SignatureData> {
        self.signature.as_ref()
    }

    #[must_use]
    pub const fn activated_once(&self) -> bool {
        self.activated_once
    }

    #[must_use]
    pub(crate) const fn continuation_point(&self) -> Option<&browse::ContinuationPoint> {
        self.continuation_point.as_ref()
    }

    /// Stores a fresh continuation point, returning the replaced one.
    pub(crate) fn store_continuation_point(
        &mut self,
        continuation_point: browse::ContinuationPoint,
    ) -> Option<browse::ContinuationPoint> {
        self.continuation_point.replace(continuation_point)
    }

    /// Releases the session's continuation point, if any.
    pub(crate) fn release_continuation_point(&mut self) -> Option<browse::ContinuationPoint> {
        self.continuation_point.take()
    }

    pub(crate) fn set_state(&mut self, state: ua::SessionState) {
        log::debug!(
            "session {:?}: state {} -> {}",
            self.id,
            self.state,
            state
        );
        if state == ua::SessionState::UserActivated {
            self.activated_once = true;
        }
        self.state = state;
    }

    pub(crate) fn set_token(&mut self, token: ua::NodeId) {
        debug_assert!(self.token.is_none(), "tokens are issued once per session");
        self.token = Some(token);
    }

    pub(crate) fn set_crypto_material(
        &mut self,
        nonce: [u8; NONCE_LENGTH],
        signature: ua::SignatureData,
    ) {
        // The server nonce is set once per session.
        debug_assert!(self.nonce_server.is_none());
        self.nonce_server = Some(nonce);
        self.signature = Some(signature);
    }

    pub(crate) fn set_user(&mut self, user: UserIdentity) {
        self.user = user;
    }

    pub(crate) fn bind_channel(&mut self, channel: ScHandle) {
        self.channel = Some(channel);
    }

    pub(crate) fn unbind_channel(&mut self) {
        self.channel = None;
    }

    /// Drops the token and crypto material on close.
    pub(crate) fn wipe(&mut self) {
        self.token = None;
        #[cfg(feature = "zeroize")]
        if let Some(nonce) = self.nonce_server.as_mut() {
            use zeroize::Zeroize as _;
            nonce.zeroize();
        }
        self.nonce_server = None;
        self.signature = None;
        self.continuation_point = None;
    }
}
