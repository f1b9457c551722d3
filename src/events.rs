use crate::{
    config::{EndpointConfigIdx, ScConfigIdx},
    message::Message,
    session::{ScHandle, SessionId, UserIdentity},
    ua,
};

/// Input events of the services dispatcher.
///
/// The first group arrives from the secure-channels manager, the second from the application API.
/// Events from one secure channel are delivered in FIFO order.
#[derive(Debug)]
pub enum ServicesEvent {
    /// A client secure channel connected to one of our endpoints.
    EndpointScConnected {
        ep_cfg_idx: EndpointConfigIdx,
        sc_cfg_idx: ScConfigIdx,
        sc_handle: ScHandle,
    },
    EndpointClosed {
        ep_cfg_idx: EndpointConfigIdx,
        status: ua::StatusCode,
    },
    /// An outgoing secure channel finished establishment.
    ScConnected {
        sc_handle: ScHandle,
        sc_cfg_idx: ScConfigIdx,
    },
    ScConnectionTimeout {
        sc_cfg_idx: ScConfigIdx,
    },
    ScDisconnected {
        sc_handle: ScHandle,
        status: ua::StatusCode,
    },
    /// A decoded service message received on an established secure channel.
    ScServiceRcvMsg {
        sc_handle: ScHandle,
        message: Message,
        request_handle: u32,
    },

    OpenEndpoint {
        ep_cfg_idx: EndpointConfigIdx,
    },
    CloseEndpoint {
        ep_cfg_idx: EndpointConfigIdx,
    },
    /// Client-side request to open and activate a session over the given channel configuration.
    ActivateSession {
        sc_cfg_idx: ScConfigIdx,
        user: UserIdentity,
    },
    /// Client-side request to send a service request on an activated session.
    SendSessionRequest {
        session_id: SessionId,
        message: Message,
    },
    /// Client-side request to close a session.
    CloseSession {
        session_id: SessionId,
    },
    /// Session timeout raised by the timer service.
    SessionTimeout {
        session_id: SessionId,
    },
}

/// Output events towards the secure-channels manager.
#[derive(Debug)]
pub enum ScOutputEvent {
    ScConnect {
        sc_cfg_idx: ScConfigIdx,
    },
    ScDisconnect {
        sc_handle: ScHandle,
    },
    /// A response or request struct to encode and send on the channel.
    ScServiceSndMsg {
        sc_handle: ScHandle,
        message: Message,
        request_handle: u32,
    },
}

/// Output events towards the application.
#[derive(Debug)]
pub enum AppOutputEvent {
    /// A session failed before its first activation. The session id is absent when the failure
    /// happened before the session was created.
    SessionActivationFailure {
        session_id: Option<SessionId>,
        status: ua::StatusCode,
    },
    ActivatedSession {
        session_id: SessionId,
    },
    SessionReactivating {
        session_id: SessionId,
    },
    RcvSessionResponse {
        session_id: SessionId,
        message: Message,
        status: ua::StatusCode,
    },
    ClosedSession {
        session_id: SessionId,
        status: ua::StatusCode,
    },
    ClosedEndpoint {
        ep_cfg_idx: EndpointConfigIdx,
        status: ua::StatusCode,
    },
}
