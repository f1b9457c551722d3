use crate::{
    Error, Result,
    crypto::CryptoProvider,
    session::{ScHandle, Session, SessionId, UserIdentity},
    ua,
};

/// Client-visible session notification.
///
/// Each notification is emitted exactly once per qualifying transition: `Activated` on every
/// entry into `UserActivated`, `Reactivating` when an activated session loses its channel,
/// `Closed` when an activated session terminates, and `ActivationFailure` when a session fails
/// before its first activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotification {
    Activated {
        session_id: SessionId,
    },
    Reactivating {
        session_id: SessionId,
    },
    Closed {
        session_id: SessionId,
        status: ua::StatusCode,
    },
    ActivationFailure {
        session_id: SessionId,
        status: ua::StatusCode,
    },
}

/// Server-side session registry and state machine driver.
///
/// Sessions are bounded by the configured maximum. Authentication tokens are monotonically
/// increasing numeric node ids in namespace 0; a token once issued is never re-issued within a
/// process run (0 is reserved as indeterminate).
#[derive(Debug)]
pub struct SessionManager {
    sessions: Vec<Session>,
    max_sessions: usize,
    next_session_id: u32,
    next_token: u32,
}

impl SessionManager {
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Vec::new(),
            max_sessions,
            next_session_id: 1,
            next_token: 1,
        }
    }

    #[must_use]
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id() == id)
    }

    /// Mutable access for the service treatments; sessions expose no public mutators.
    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| session.id() == id)
    }

    /// Resolves an authentication token to the owning session.
    ///
    /// Closed sessions no longer resolve: their token is wiped on close.
    #[must_use]
    pub fn session_from_token(&self, token: &ua::NodeId) -> Option<SessionId> {
        self.sessions
            .iter()
            .find(|session| session.token() == Some(token))
            .map(Session::id)
    }

    /// Number of sessions not yet closed.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.sessions
            .iter()
            .filter(|session| !session.state().is_closed())
            .count()
    }

    /// Creates a fresh session bound to `channel`, in state `Creating`.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_TOO_MANY_SESSIONS`](ua::StatusCode::BAD_TOO_MANY_SESSIONS) when the
    /// configured maximum is reached.
    pub fn create_session(&mut self, channel: ScHandle) -> Result<SessionId> {
        if self.open_sessions() >= self.max_sessions {
            return Err(Error::new(ua::StatusCode::BAD_TOO_MANY_SESSIONS));
        }
        let id = SessionId::new(self.next_session_id);
        self.next_session_id = self
            .next_session_id
            .checked_add(1)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_INTERNAL_ERROR))?;

        let mut session = Session::new(id, channel);
        session.set_state(ua::SessionState::Creating);
        self.sessions.push(session);
        Ok(id)
    }

    /// Issues the session's authentication token.
    ///
    /// # Errors
    ///
    /// Fails when the session is unknown or the token space is exhausted.
    pub fn server_issue_token(&mut self, id: SessionId) -> Result<ua::NodeId> {
        let token_value = self.next_token;
        let next = token_value
            .checked_add(1)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_INTERNAL_ERROR))?;
        let session = self
            .session_mut(id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;

        let token = ua::NodeId::ns0(token_value);
        session.set_token(token.clone());
        self.next_token = next;
        Ok(token)
    }

    /// Computes the server nonce and signature for a CreateSession response.
    ///
    /// With the `None` security policy this is a no-op. Otherwise the signature covers the
    /// client certificate concatenated with the client nonce.
    ///
    /// # Errors
    ///
    /// Fails when the session is unknown or the provider fails.
    pub fn server_compute_nonce_signature(
        &mut self,
        id: SessionId,
        request: &ua::CreateSessionRequest,
        crypto: &dyn CryptoProvider,
    ) -> Result<()> {
        if crypto.is_policy_none() {
            return Ok(());
        }

        let nonce = crypto.random_nonce()?;
        let mut signed = Vec::new();
        signed.extend_from_slice(request.client_certificate.as_bytes().unwrap_or_default());
        signed.extend_from_slice(request.client_nonce.as_bytes().unwrap_or_default());
        let signature = ua::SignatureData::new(
            crypto.signature_algorithm_uri(),
            crypto.sign_with_server_key(&signed)?,
        );

        let session = self
            .session_mut(id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        session.set_crypto_material(nonce, signature);
        Ok(())
    }

    /// Marks session creation complete (the CreateSession response is on its way).
    ///
    /// # Errors
    ///
    /// Fails unless the session is in `Creating`.
    pub fn complete_creation(&mut self, id: SessionId) -> Result<()> {
        let session = self.require_state(id, &[ua::SessionState::Creating])?;
        session.set_state(ua::SessionState::Created);
        Ok(())
    }

    /// Starts user activation of a created or re-bound session.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_INVALID_STATE`](ua::StatusCode::BAD_INVALID_STATE) unless the session is
    /// in `Created` (first activation) or `ScActivating` (after channel re-binding).
    pub fn activate_session(&mut self, id: SessionId, user: UserIdentity) -> Result<()> {
        let session = self.require_state(
            id,
            &[ua::SessionState::Created, ua::SessionState::ScActivating],
        )?;
        session.set_user(user);
        if session.state() == ua::SessionState::Created {
            session.set_state(ua::SessionState::UserActivating);
        }
        Ok(())
    }

    /// Completes activation (the ActivateSession response is on its way).
    ///
    /// Returns the `Activated` notification, emitted on every entry into `UserActivated`.
    ///
    /// # Errors
    ///
    /// Fails unless the session is in `UserActivating` or `ScActivating`.
    pub fn complete_activation(&mut self, id: SessionId) -> Result<SessionNotification> {
        let session = self.require_state(
            id,
            &[
                ua::SessionState::UserActivating,
                ua::SessionState::ScActivating,
            ],
        )?;
        session.set_state(ua::SessionState::UserActivated);
        Ok(SessionNotification::Activated { session_id: id })
    }

    /// Re-binds an orphaned session to a new secure channel.
    ///
    /// # Errors
    ///
    /// Fails with [`BAD_INVALID_STATE`](ua::StatusCode::BAD_INVALID_STATE) unless the session is
    /// in `ScOrphaned`.
    pub fn bind_new_channel(&mut self, id: SessionId, channel: ScHandle) -> Result<()> {
        let session = self.require_state(id, &[ua::SessionState::ScOrphaned])?;
        session.bind_channel(channel);
        session.set_state(ua::SessionState::ScActivating);
        Ok(())
    }

    /// Closes a session, wiping its token, nonce, and signature.
    ///
    /// Returns the terminal notification for sessions that had been activated, or an activation
    /// failure for sessions that never were.
    ///
    /// # Errors
    ///
    /// Fails when the session is unknown or already closed.
    pub fn close_session(
        &mut self,
        id: SessionId,
        status: ua::StatusCode,
    ) -> Result<SessionNotification> {
        let session = self
            .session_mut(id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        if session.state().is_closed() {
            return Err(Error::new(ua::StatusCode::BAD_SESSION_CLOSED));
        }

        session.set_state(ua::SessionState::Closing);
        session.wipe();
        session.unbind_channel();
        session.set_state(ua::SessionState::Closed);

        let notification = if session.activated_once() {
            SessionNotification::Closed {
                session_id: id,
                status,
            }
        } else {
            SessionNotification::ActivationFailure {
                session_id: id,
                status,
            }
        };
        Ok(notification)
    }

    /// Handles a session timeout event: the session simply closes.
    ///
    /// # Errors
    ///
    /// Fails when the session is unknown or already closed.
    pub fn session_timeout(&mut self, id: SessionId) -> Result<SessionNotification> {
        log::warn!("session {id:?}: timed out");
        self.close_session(id, ua::StatusCode::BAD_TIMEOUT)
    }

    /// Sessions currently bound to `channel` and not closed, in one of `states` (all when
    /// `states` is empty).
    #[must_use]
    pub fn sessions_on_channel(
        &self,
        channel: ScHandle,
        states: &[ua::SessionState],
    ) -> Vec<SessionId> {
        self.sessions
            .iter()
            .filter(|session| session.channel() == Some(channel))
            .filter(|session| states.is_empty() || states.contains(&session.state()))
            .map(Session::id)
            .collect()
    }

    /// First orphaned session, if any (client side, waiting for a new channel).
    #[must_use]
    pub fn find_orphaned(&self) -> Option<SessionId> {
        self.sessions
            .iter()
            .find(|session| session.state() == ua::SessionState::ScOrphaned)
            .map(Session::id)
    }

    /// Client side: stores the server-issued token and marks the session created.
    ///
    /// # Errors
    ///
    /// Fails unless the session is in `Creating`.
    pub fn client_complete_creation(&mut self, id: SessionId, token: ua::NodeId) -> Result<()> {
        let session = self.require_state(id, &[ua::SessionState::Creating])?;
        session.set_token(token);
        session.set_state(ua::SessionState::Created);
        Ok(())
    }

    /// Client side: marks the session closing while the CloseSession exchange is in flight.
    ///
    /// # Errors
    ///
    /// Fails unless the session is in `UserActivated`.
    pub fn client_start_closing(&mut self, id: SessionId) -> Result<()> {
        let session = self.require_state(id, &[ua::SessionState::UserActivated])?;
        session.set_state(ua::SessionState::Closing);
        Ok(())
    }

    /// Handles the loss of a secure channel.
    ///
    /// Activated sessions become orphaned and may later be re-bound; sessions that never
    /// completed activation close with a failure notification.
    pub fn channel_lost(&mut self, channel: ScHandle) -> Vec<SessionNotification> {
        let affected: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|session| session.channel() == Some(channel))
            .map(Session::id)
            .collect();

        let mut notifications = Vec::new();
        for id in affected {
            let Some(session) = self.session_mut(id) else {
                continue;
            };
            if session.state().is_closed() {
                continue;
            }
            if session.state().is_activated() {
                session.unbind_channel();
                session.set_state(ua::SessionState::ScOrphaned);
                notifications.push(SessionNotification::Reactivating { session_id: id });
            } else if let Ok(notification) =
                self.close_session(id, ua::StatusCode::BAD_SECURE_CHANNEL_CLOSED)
            {
                notifications.push(notification);
            }
        }
        notifications
    }

    fn require_state(
        &mut self,
        id: SessionId,
        states: &[ua::SessionState],
    ) -> Result<&mut Session> {
        let session = self
            .session_mut(id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        if !states.contains(&session.state()) {
            return Err(Error::new(ua::StatusCode::BAD_INVALID_STATE));
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        crypto::{CryptoProvider, NONCE_LENGTH},
        session::{ScHandle, UserIdentity},
        ua,
    };

    use super::{SessionManager, SessionNotification};

    struct NullCrypto;

    impl CryptoProvider for NullCrypto {
        fn security_policy_uri(&self) -> &str {
            crate::crypto::SECURITY_POLICY_NONE_URI
        }

        fn signature_algorithm_uri(&self) -> &str {
            ""
        }

        fn random_nonce(&self) -> crate::Result<[u8; NONCE_LENGTH]> {
            Ok([0; NONCE_LENGTH])
        }

        fn sign_with_server_key(&self, _data: &[u8]) -> crate::Result<ua::ByteString> {
            Ok(ua::ByteString::null())
        }
    }

    #[test]
    fn tokens_are_unique_and_monotonic() {
        let mut manager = SessionManager::new(10);
        let first = manager.create_session(ScHandle(1)).unwrap();
        let second = manager.create_session(ScHandle(1)).unwrap();
        let token_1 = manager.server_issue_token(first).unwrap();
        let token_2 = manager.server_issue_token(second).unwrap();
        assert_ne!(token_1, token_2);
        assert!(!token_1.is_null());
        assert_eq!(manager.session_from_token(&token_1), Some(first));
        assert_eq!(manager.session_from_token(&token_2), Some(second));
    }

    #[test]
    fn server_lifecycle_reaches_activated() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(7)).unwrap();
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::Creating
        );

        manager.server_issue_token(id).unwrap();
        manager
            .server_compute_nonce_signature(id, &ua::CreateSessionRequest::default(), &NullCrypto)
            .unwrap();
        manager.complete_creation(id).unwrap();
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::Created
        );

        manager.activate_session(id, UserIdentity::Anonymous).unwrap();
        let notification = manager.complete_activation(id).unwrap();
        assert_eq!(notification, SessionNotification::Activated { session_id: id });
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::UserActivated
        );
    }

    #[test]
    fn channel_loss_orphans_activated_sessions() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(7)).unwrap();
        manager.server_issue_token(id).unwrap();
        manager.complete_creation(id).unwrap();
        manager.activate_session(id, UserIdentity::Anonymous).unwrap();
        manager.complete_activation(id).unwrap();

        let notifications = manager.channel_lost(ScHandle(7));
        assert_eq!(
            notifications,
            vec![SessionNotification::Reactivating { session_id: id }]
        );
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::ScOrphaned
        );

        // Losing an unrelated channel touches nothing.
        assert!(manager.channel_lost(ScHandle(9)).is_empty());
    }

    #[test]
    fn channel_loss_closes_unactivated_sessions() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(3)).unwrap();
        manager.server_issue_token(id).unwrap();
        manager.complete_creation(id).unwrap();

        let notifications = manager.channel_lost(ScHandle(3));
        assert_eq!(
            notifications,
            vec![SessionNotification::ActivationFailure {
                session_id: id,
                status: ua::StatusCode::BAD_SECURE_CHANNEL_CLOSED,
            }]
        );
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::Closed
        );
        // The token is wiped on close and no longer resolves.
        assert_eq!(manager.session(id).unwrap().token(), None);
    }

    #[test]
    fn orphaned_session_rebinds_to_new_channel() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(1)).unwrap();
        manager.server_issue_token(id).unwrap();
        manager.complete_creation(id).unwrap();
        manager.activate_session(id, UserIdentity::Anonymous).unwrap();
        manager.complete_activation(id).unwrap();
        manager.channel_lost(ScHandle(1));

        manager.bind_new_channel(id, ScHandle(2)).unwrap();
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::ScActivating
        );

        manager.activate_session(id, UserIdentity::Anonymous).unwrap();
        let notification = manager.complete_activation(id).unwrap();
        assert_eq!(notification, SessionNotification::Activated { session_id: id });
        assert_eq!(
            manager.session(id).unwrap().state(),
            ua::SessionState::UserActivated
        );
        assert_eq!(manager.session(id).unwrap().channel(), Some(ScHandle(2)));
    }

    #[test]
    fn session_cap_is_enforced() {
        let mut manager = SessionManager::new(1);
        let first = manager.create_session(ScHandle(1)).unwrap();
        let error = manager.create_session(ScHandle(1)).expect_err("cap reached");
        assert_eq!(error.status_code(), ua::StatusCode::BAD_TOO_MANY_SESSIONS);

        // Closing a session frees its slot.
        manager
            .close_session(first, ua::StatusCode::GOOD)
            .unwrap();
        assert!(manager.create_session(ScHandle(1)).is_ok());
    }

    #[test]
    fn close_of_activated_session_notifies_closed() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(1)).unwrap();
        manager.server_issue_token(id).unwrap();
        manager.complete_creation(id).unwrap();
        manager.activate_session(id, UserIdentity::Anonymous).unwrap();
        manager.complete_activation(id).unwrap();

        let notification = manager.close_session(id, ua::StatusCode::GOOD).unwrap();
        assert_eq!(
            notification,
            SessionNotification::Closed {
                session_id: id,
                status: ua::StatusCode::GOOD,
            }
        );
        // Closing twice is an error.
        assert!(manager.close_session(id, ua::StatusCode::GOOD).is_err());
    }

    #[test]
    fn timeout_closes_session() {
        let mut manager = SessionManager::new(10);
        let id = manager.create_session(ScHandle(1)).unwrap();
        let notification = manager.session_timeout(id).unwrap();
        assert_eq!(
            notification,
            SessionNotification::ActivationFailure {
                session_id: id,
                status: ua::StatusCode::BAD_TIMEOUT,
            }
        );
        assert!(manager.session(id).unwrap().state().is_closed());
    }
}
