use std::collections::HashMap;

use derive_more::Debug;

use crate::{
    Error, Result,
    address_space::AddressSpace,
    browse::BrowseEngine,
    config::{EndpointConfigIdx, ScConfigIdx, StackConfig},
    crypto::CryptoProvider,
    event_queue::EventQueue,
    events::{AppOutputEvent, ScOutputEvent, ServicesEvent},
    message::Message,
    service::ServiceRequest as _,
    session::{ScHandle, SessionId, UserIdentity},
    session_manager::{SessionManager, SessionNotification},
    translate_browse_path::TranslateEngine,
    ua,
};

/// The services dispatcher: the single-threaded event handler at the heart of the stack.
///
/// Events are handled to completion, one at a time; the handlers never block. Decoded service
/// requests are validated against the session bound to their channel and routed to the Browse or
/// TranslateBrowsePath treatment; responses and notifications leave through the output queues.
#[derive(Debug)]
pub struct Dispatcher {
    config: StackConfig,
    #[debug(skip)]
    space: Box<dyn AddressSpace>,
    #[debug(skip)]
    crypto: Box<dyn CryptoProvider>,
    sessions: SessionManager,
    browse: BrowseEngine,
    translate: TranslateEngine,
    sc_out: EventQueue<ScOutputEvent>,
    app_out: EventQueue<AppOutputEvent>,
    /// Channels accepted on our endpoints, with the endpoint they arrived on.
    server_channels: HashMap<ScHandle, EndpointConfigIdx>,
    /// Client-side activations waiting for their secure channel to connect.
    pending_activations: Vec<(ScConfigIdx, UserIdentity)>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        config: StackConfig,
        space: Box<dyn AddressSpace>,
        crypto: Box<dyn CryptoProvider>,
    ) -> Self {
        let limits = config.limits().clone();
        Self {
            config,
            space,
            crypto,
            sessions: SessionManager::new(limits.max_sessions),
            browse: BrowseEngine::new(limits.max_references_per_node),
            translate: TranslateEngine::new(
                limits.max_browse_path_matches,
                limits.max_browse_path_remaining,
            ),
            sc_out: EventQueue::new(),
            app_out: EventQueue::new(),
            server_channels: HashMap::new(),
            pending_activations: Vec::new(),
        }
    }

    /// Queue of events towards the secure-channels manager.
    #[must_use]
    pub fn sc_output(&self) -> EventQueue<ScOutputEvent> {
        self.sc_out.clone()
    }

    /// Queue of events towards the application.
    #[must_use]
    pub fn app_output(&self) -> EventQueue<AppOutputEvent> {
        self.app_out.clone()
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Handles one input event to completion.
    pub fn handle(&mut self, event: ServicesEvent) {
        match event {
            ServicesEvent::EndpointScConnected {
                ep_cfg_idx,
                sc_cfg_idx: _,
                sc_handle,
            } => {
                log::debug!("endpoint {ep_cfg_idx:?}: channel {sc_handle:?} connected");
                self.server_channels.insert(sc_handle, ep_cfg_idx);
            }
            ServicesEvent::EndpointClosed { ep_cfg_idx, status } => {
                self.app_out
                    .push(AppOutputEvent::ClosedEndpoint { ep_cfg_idx, status });
            }
            ServicesEvent::ScConnected {
                sc_handle,
                sc_cfg_idx,
            } => self.client_channel_connected(sc_handle, sc_cfg_idx),
            ServicesEvent::ScConnectionTimeout { sc_cfg_idx } => {
                if self.take_pending_activation(sc_cfg_idx).is_some() {
                    self.app_out.push(AppOutputEvent::SessionActivationFailure {
                        session_id: None,
                        status: ua::StatusCode::BAD_TIMEOUT,
                    });
                }
            }
            ServicesEvent::ScDisconnected { sc_handle, status } => {
                self.server_channels.remove(&sc_handle);
                let notifications = self.sessions.channel_lost(sc_handle);
                for notification in notifications {
                    self.notify(notification);
                }
                log::debug!("channel {sc_handle:?} disconnected: {status}");
            }
            ServicesEvent::ScServiceRcvMsg {
                sc_handle,
                message,
                request_handle,
            } => {
                if message.is_request() {
                    self.handle_server_request(sc_handle, message, request_handle);
                } else {
                    self.handle_client_response(sc_handle, message);
                }
            }
            ServicesEvent::OpenEndpoint { ep_cfg_idx } => {
                if self.config.endpoint(ep_cfg_idx).is_none() {
                    self.app_out.push(AppOutputEvent::ClosedEndpoint {
                        ep_cfg_idx,
                        status: ua::StatusCode::BAD_INVALID_ARGUMENT,
                    });
                }
            }
            ServicesEvent::CloseEndpoint { ep_cfg_idx } => {
                self.app_out.push(AppOutputEvent::ClosedEndpoint {
                    ep_cfg_idx,
                    status: ua::StatusCode::GOOD,
                });
            }
            ServicesEvent::ActivateSession { sc_cfg_idx, user } => {
                self.pending_activations.push((sc_cfg_idx, user));
                self.sc_out.push(ScOutputEvent::ScConnect { sc_cfg_idx });
            }
            ServicesEvent::SendSessionRequest {
                session_id,
                message,
            } => self.client_send_request(session_id, message),
            ServicesEvent::CloseSession { session_id } => self.client_close_session(session_id),
            ServicesEvent::SessionTimeout { session_id } => {
                if let Ok(notification) = self.sessions.session_timeout(session_id) {
                    self.notify(notification);
                }
            }
        }
    }

    fn notify(&mut self, notification: SessionNotification) {
        let event = match notification {
            SessionNotification::Activated { session_id } => {
                AppOutputEvent::ActivatedSession { session_id }
            }
            SessionNotification::Reactivating { session_id } => {
                AppOutputEvent::SessionReactivating { session_id }
            }
            SessionNotification::Closed { session_id, status } => {
                AppOutputEvent::ClosedSession { session_id, status }
            }
            SessionNotification::ActivationFailure { session_id, status } => {
                AppOutputEvent::SessionActivationFailure {
                    session_id: Some(session_id),
                    status,
                }
            }
        };
        self.app_out.push(event);
    }

    fn take_pending_activation(&mut self, sc_cfg_idx: ScConfigIdx) -> Option<UserIdentity> {
        let position = self
            .pending_activations
            .iter()
            .position(|(pending, _)| *pending == sc_cfg_idx)?;
        Some(self.pending_activations.remove(position).1)
    }

    // Client side.

    /// An outgoing channel connected: re-bind an orphaned session or start a fresh one.
    fn client_channel_connected(&mut self, sc_handle: ScHandle, sc_cfg_idx: ScConfigIdx) {
        let Some(user) = self.take_pending_activation(sc_cfg_idx) else {
            return;
        };

        if let Some(session_id) = self.sessions.find_orphaned() {
            let rebound = self
                .sessions
                .bind_new_channel(session_id, sc_handle)
                .and_then(|()| self.sessions.activate_session(session_id, user));
            match rebound {
                Ok(()) => {
                    let token = self
                        .sessions
                        .session(session_id)
                        .and_then(|session| session.token().cloned())
                        .unwrap_or_default();
                    let request = ua::ActivateSessionRequest {
                        request_header: ua::RequestHeader::with_token(token),
                        ..ua::ActivateSessionRequest::default()
                    };
                    self.send(sc_handle, Message::ActivateSessionRequest(Box::new(request)));
                }
                Err(error) => self.app_out.push(AppOutputEvent::SessionActivationFailure {
                    session_id: Some(session_id),
                    status: error.status_code(),
                }),
            }
            return;
        }

        match self.sessions.create_session(sc_handle) {
            Ok(_session_id) => {
                let request = ua::CreateSessionRequest {
                    session_name: ua::String::new("opcua-core client session"),
                    ..ua::CreateSessionRequest::default()
                };
                self.send(sc_handle, Message::CreateSessionRequest(Box::new(request)));
            }
            Err(error) => self.app_out.push(AppOutputEvent::SessionActivationFailure {
                session_id: None,
                status: error.status_code(),
            }),
        }
    }

    fn client_send_request(&mut self, session_id: SessionId, mut message: Message) {
        let session = self.sessions.session(session_id);
        let (channel, token) = match session {
            Some(session) if session.state() == ua::SessionState::UserActivated => (
                session.channel(),
                session.token().cloned().unwrap_or_default(),
            ),
            Some(_) => {
                self.app_out.push(AppOutputEvent::RcvSessionResponse {
                    session_id,
                    message,
                    status: ua::StatusCode::BAD_SESSION_NOT_ACTIVATED,
                });
                return;
            }
            None => {
                self.app_out.push(AppOutputEvent::RcvSessionResponse {
                    session_id,
                    message,
                    status: ua::StatusCode::BAD_SESSION_ID_INVALID,
                });
                return;
            }
        };
        let Some(channel) = channel else {
            self.app_out.push(AppOutputEvent::RcvSessionResponse {
                session_id,
                message,
                status: ua::StatusCode::BAD_SECURE_CHANNEL_CLOSED,
            });
            return;
        };
        if let Some(header) = message.request_header_mut() {
            header.authentication_token = token;
        }
        self.send(channel, message);
    }

    fn client_close_session(&mut self, session_id: SessionId) {
        let Some(session) = self.sessions.session(session_id) else {
            return;
        };
        let channel = session.channel();
        let token = session.token().cloned().unwrap_or_default();
        match (self.sessions.client_start_closing(session_id), channel) {
            (Ok(()), Some(channel)) => {
                let request = ua::CloseSessionRequest {
                    request_header: ua::RequestHeader::with_token(token),
                    ..ua::CloseSessionRequest::default()
                };
                self.send(channel, Message::CloseSessionRequest(Box::new(request)));
            }
            _ => {
                // No channel to say goodbye on: close locally.
                if let Ok(notification) = self
                    .sessions
                    .close_session(session_id, ua::StatusCode::GOOD)
                {
                    self.notify(notification);
                }
            }
        }
    }

    fn handle_client_response(&mut self, sc_handle: ScHandle, message: Message) {
        let status = message
            .response_header()
            .map_or(ua::StatusCode::GOOD, |header| header.service_result);
        match message {
            Message::CreateSessionResponse(response) => {
                let Some(session_id) = self
                    .sessions
                    .sessions_on_channel(sc_handle, &[ua::SessionState::Creating])
                    .first()
                    .copied()
                else {
                    return;
                };
                if status.is_bad() {
                    self.close_with_status(session_id, status);
                    return;
                }
                let proceeded = self
                    .sessions
                    .client_complete_creation(session_id, response.authentication_token.clone())
                    .and_then(|()| {
                        self.sessions
                            .activate_session(session_id, UserIdentity::Anonymous)
                    });
                match proceeded {
                    Ok(()) => {
                        let request = ua::ActivateSessionRequest {
                            request_header: ua::RequestHeader::with_token(
                                response.authentication_token.clone(),
                            ),
                            ..ua::ActivateSessionRequest::default()
                        };
                        self.send(
                            sc_handle,
                            Message::ActivateSessionRequest(Box::new(request)),
                        );
                    }
                    Err(error) => self.close_with_status(session_id, error.status_code()),
                }
            }
            Message::ActivateSessionResponse(_) => {
                let Some(session_id) = self
                    .sessions
                    .sessions_on_channel(
                        sc_handle,
                        &[
                            ua::SessionState::UserActivating,
                            ua::SessionState::ScActivating,
                        ],
                    )
                    .first()
                    .copied()
                else {
                    return;
                };
                if status.is_bad() {
                    self.close_with_status(session_id, status);
                    return;
                }
                match self.sessions.complete_activation(session_id) {
                    Ok(notification) => self.notify(notification),
                    Err(error) => self.close_with_status(session_id, error.status_code()),
                }
            }
            Message::CloseSessionResponse(_) => {
                let Some(session_id) = self
                    .sessions
                    .sessions_on_channel(sc_handle, &[ua::SessionState::Closing])
                    .first()
                    .copied()
                else {
                    return;
                };
                self.close_with_status(session_id, status);
            }
            message => {
                let Some(session_id) = self
                    .sessions
                    .sessions_on_channel(sc_handle, &[ua::SessionState::UserActivated])
                    .first()
                    .copied()
                else {
                    return;
                };
                self.app_out.push(AppOutputEvent::RcvSessionResponse {
                    session_id,
                    message,
                    status,
                });
            }
        }
    }

    fn close_with_status(&mut self, session_id: SessionId, status: ua::StatusCode) {
        if let Ok(notification) = self.sessions.close_session(session_id, status) {
            self.notify(notification);
        }
    }

    // Server side.

    fn send(&self, sc_handle: ScHandle, message: Message) {
        let request_handle = message
            .request_header()
            .map_or(0, |header| header.request_handle);
        self.sc_out.push(ScOutputEvent::ScServiceSndMsg {
            sc_handle,
            message,
            request_handle,
        });
    }

    fn send_response(&self, sc_handle: ScHandle, message: Message, request_handle: u32) {
        self.sc_out.push(ScOutputEvent::ScServiceSndMsg {
            sc_handle,
            message,
            request_handle,
        });
    }

    fn handle_server_request(
        &mut self,
        sc_handle: ScHandle,
        message: Message,
        request_handle: u32,
    ) {
        match message {
            Message::CreateSessionRequest(request) => {
                let response = match self.server_create_session(sc_handle, &request) {
                    Ok(response) => response,
                    Err(error) => ua::CreateSessionResponse {
                        response_header: ua::ResponseHeader::new(
                            request.request_header.request_handle,
                            error.status_code(),
                        ),
                        ..ua::CreateSessionResponse::default()
                    },
                };
                self.send_response(
                    sc_handle,
                    Message::CreateSessionResponse(Box::new(response)),
                    request_handle,
                );
            }
            Message::ActivateSessionRequest(request) => {
                let response = match self.server_activate_session(sc_handle, &request) {
                    Ok(response) => response,
                    Err(error) => ua::ActivateSessionResponse {
                        response_header: ua::ResponseHeader::new(
                            request.request_header.request_handle,
                            error.status_code(),
                        ),
                        ..ua::ActivateSessionResponse::default()
                    },
                };
                self.send_response(
                    sc_handle,
                    Message::ActivateSessionResponse(Box::new(response)),
                    request_handle,
                );
            }
            Message::CloseSessionRequest(request) => {
                let status = match self.server_close_session(sc_handle, &request) {
                    Ok(()) => ua::StatusCode::GOOD,
                    Err(error) => error.status_code(),
                };
                let response = ua::CloseSessionResponse {
                    response_header: ua::ResponseHeader::new(
                        request.request_header.request_handle,
                        status,
                    ),
                };
                self.send_response(
                    sc_handle,
                    Message::CloseSessionResponse(Box::new(response)),
                    request_handle,
                );
            }
            Message::BrowseRequest(request) => {
                let response = self.server_browse(sc_handle, &request);
                self.send_response(
                    sc_handle,
                    Message::BrowseResponse(Box::new(response)),
                    request_handle,
                );
            }
            Message::BrowseNextRequest(request) => {
                let response = self.server_browse_next(sc_handle, &request);
                self.send_response(
                    sc_handle,
                    Message::BrowseNextResponse(Box::new(response)),
                    request_handle,
                );
            }
            Message::TranslateBrowsePathsRequest(request) => {
                let response = self.server_translate(sc_handle, &request);
                self.send_response(
                    sc_handle,
                    Message::TranslateBrowsePathsResponse(Box::new(response)),
                    request_handle,
                );
            }
            message => {
                log::warn!("unexpected message on channel {sc_handle:?}: {message:?}");
            }
        }
    }

    fn server_create_session(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::CreateSessionRequest,
    ) -> Result<ua::CreateSessionResponse> {
        let session_id = self.sessions.create_session(sc_handle)?;
        let token = self.sessions.server_issue_token(session_id)?;
        self.sessions
            .server_compute_nonce_signature(session_id, request, self.crypto.as_ref())?;
        self.sessions.complete_creation(session_id)?;

        let session = self
            .sessions
            .session(session_id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_INTERNAL_ERROR))?;
        let server_certificate = self
            .server_channels
            .get(&sc_handle)
            .and_then(|endpoint| self.config.endpoint(*endpoint))
            .map_or_else(ua::ByteString::null, |endpoint| {
                endpoint.server_certificate.clone()
            });

        Ok(ua::CreateSessionResponse {
            response_header: ua::ResponseHeader::new(
                request.request_header.request_handle,
                ua::StatusCode::GOOD,
            ),
            session_id: ua::NodeId::ns0(session_id.into_inner()),
            authentication_token: token,
            revised_session_timeout: request.requested_session_timeout,
            server_nonce: session
                .nonce_server()
                .map_or_else(ua::ByteString::null, |nonce| ua::ByteString::new(nonce)),
            server_certificate,
            server_signature: session.signature().cloned().unwrap_or_default(),
        })
    }

    fn server_activate_session(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::ActivateSessionRequest,
    ) -> Result<ua::ActivateSessionResponse> {
        let session_id = self
            .sessions
            .session_from_token(&request.request_header.authentication_token)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        let session = self
            .sessions
            .session(session_id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;

        match session.state() {
            ua::SessionState::ScOrphaned => {
                // The session migrates onto the channel carrying this request.
                self.sessions.bind_new_channel(session_id, sc_handle)?;
            }
            _ => {
                // First activation must happen on the channel the session was created on.
                if session.channel() != Some(sc_handle) {
                    return Err(Error::new(ua::StatusCode::BAD_SECURE_CHANNEL_ID_INVALID));
                }
            }
        }

        self.sessions
            .activate_session(session_id, UserIdentity::Anonymous)?;
        let notification = self.sessions.complete_activation(session_id)?;
        self.notify(notification);

        let session = self
            .sessions
            .session(session_id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_INTERNAL_ERROR))?;
        Ok(ua::ActivateSessionResponse {
            response_header: ua::ResponseHeader::new(
                request.request_header.request_handle,
                ua::StatusCode::GOOD,
            ),
            server_nonce: session
                .nonce_server()
                .map_or_else(ua::ByteString::null, |nonce| ua::ByteString::new(nonce)),
            results: Vec::new(),
        })
    }

    fn server_close_session(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::CloseSessionRequest,
    ) -> Result<()> {
        let session_id = self.validate_session(sc_handle, request.request_header())?;
        let notification = self.sessions.close_session(session_id, ua::StatusCode::GOOD)?;
        self.notify(notification);
        Ok(())
    }

    fn server_browse(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::BrowseRequest,
    ) -> ua::BrowseResponse {
        let mut response = ua::BrowseResponse::default();
        response.response_header.request_handle = request.request_header.request_handle;

        let session_id = match self.validate_session(sc_handle, request.request_header()) {
            Ok(session_id) => session_id,
            Err(error) => {
                response.response_header.service_result = error.status_code();
                return response;
            }
        };
        if let Err(error) = Self::check_batch(
            request.nodes_to_browse.len(),
            self.config.limits().max_operations_per_request,
        ) {
            response.response_header.service_result = error.status_code();
            return response;
        }

        for description in &request.nodes_to_browse {
            let Some(session) = self.sessions.session_mut(session_id) else {
                break;
            };
            let result = self.browse.browse(
                self.space.as_ref(),
                session,
                &request.view,
                description,
                request.requested_max_references_per_node,
                false,
            );
            response.results.push(result);
        }
        response.response_header.service_result = ua::StatusCode::GOOD;
        response
    }

    fn server_browse_next(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::BrowseNextRequest,
    ) -> ua::BrowseNextResponse {
        let mut response = ua::BrowseNextResponse::default();
        response.response_header.request_handle = request.request_header.request_handle;

        let session_id = match self.validate_session(sc_handle, request.request_header()) {
            Ok(session_id) => session_id,
            Err(error) => {
                response.response_header.service_result = error.status_code();
                return response;
            }
        };
        if let Err(error) = Self::check_batch(
            request.continuation_points.len(),
            self.config.limits().max_operations_per_request,
        ) {
            response.response_header.service_result = error.status_code();
            return response;
        }

        for continuation_point in &request.continuation_points {
            let Some(session) = self.sessions.session_mut(session_id) else {
                break;
            };
            let result = self.browse.browse_next(
                self.space.as_ref(),
                session,
                continuation_point,
                request.release_continuation_points,
            );
            response.results.push(result);
        }
        response.response_header.service_result = ua::StatusCode::GOOD;
        response
    }

    fn server_translate(
        &mut self,
        sc_handle: ScHandle,
        request: &ua::TranslateBrowsePathsRequest,
    ) -> ua::TranslateBrowsePathsResponse {
        let mut response = ua::TranslateBrowsePathsResponse::default();
        response.response_header.request_handle = request.request_header.request_handle;

        if let Err(error) = self
            .validate_session(sc_handle, request.request_header())
            .and_then(|_| {
                Self::check_batch(
                    request.browse_paths.len(),
                    self.config.limits().max_operations_per_request,
                )
            })
        {
            response.response_header.service_result = error.status_code();
            return response;
        }

        for path in &request.browse_paths {
            response
                .results
                .push(self.translate.translate(self.space.as_ref(), &self.browse, path));
        }
        response.response_header.service_result = ua::StatusCode::GOOD;
        response
    }

    /// Resolves the authentication token and checks that the session is activated on this very
    /// channel.
    fn validate_session(
        &self,
        sc_handle: ScHandle,
        request_header: &ua::RequestHeader,
    ) -> Result<SessionId> {
        let session_id = self
            .sessions
            .session_from_token(&request_header.authentication_token)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        let session = self
            .sessions
            .session(session_id)
            .ok_or_else(|| Error::new(ua::StatusCode::BAD_SESSION_ID_INVALID))?;
        if session.state() != ua::SessionState::UserActivated {
            return Err(Error::new(ua::StatusCode::BAD_SESSION_NOT_ACTIVATED));
        }
        if session.channel() != Some(sc_handle) {
            return Err(Error::new(ua::StatusCode::BAD_SECURE_CHANNEL_ID_INVALID));
        }
        Ok(session_id)
    }

    fn check_batch(operations: usize, max_operations: usize) -> Result<()> {
        if operations == 0 {
            return Err(Error::new(ua::StatusCode::BAD_NOTHING_TO_DO));
        }
        if operations > max_operations {
            return Err(Error::new(ua::StatusCode::BAD_TOO_MANY_OPERATIONS));
        }
        Ok(())
    }
}
