use crate::ua;

/// A decoded service message.
///
/// The core never parses bytes: requests arrive decoded from the secure-channel layer, and
/// responses are handed back as structs for the encoding collaborator to serialize.
#[derive(Debug, Clone)]
pub enum Message {
    CreateSessionRequest(Box<ua::CreateSessionRequest>),
    CreateSessionResponse(Box<ua::CreateSessionResponse>),
    ActivateSessionRequest(Box<ua::ActivateSessionRequest>),
    ActivateSessionResponse(Box<ua::ActivateSessionResponse>),
    CloseSessionRequest(Box<ua::CloseSessionRequest>),
    CloseSessionResponse(Box<ua::CloseSessionResponse>),
    BrowseRequest(Box<ua::BrowseRequest>),
    BrowseResponse(Box<ua::BrowseResponse>),
    BrowseNextRequest(Box<ua::BrowseNextRequest>),
    BrowseNextResponse(Box<ua::BrowseNextResponse>),
    TranslateBrowsePathsRequest(Box<ua::TranslateBrowsePathsRequest>),
    TranslateBrowsePathsResponse(Box<ua::TranslateBrowsePathsResponse>),
}

impl Message {
    /// Checks whether this is a request message (as opposed to a response).
    #[must_use]
    pub const fn is_request(&self) -> bool {
        matches!(
            self,
            Self::CreateSessionRequest(_)
                | Self::ActivateSessionRequest(_)
                | Self::CloseSessionRequest(_)
                | Self::BrowseRequest(_)
                | Self::BrowseNextRequest(_)
                | Self::TranslateBrowsePathsRequest(_)
        )
    }

    /// Returns the request header of request messages.
    #[must_use]
    pub fn request_header(&self) -> Option<&ua::RequestHeader> {
        match self {
            Self::CreateSessionRequest(request) => Some(&request.request_header),
            Self::ActivateSessionRequest(request) => Some(&request.request_header),
            Self::CloseSessionRequest(request) => Some(&request.request_header),
            Self::BrowseRequest(request) => Some(&request.request_header),
            Self::BrowseNextRequest(request) => Some(&request.request_header),
            Self::TranslateBrowsePathsRequest(request) => Some(&request.request_header),
            _ => None,
        }
    }

    /// Returns the mutable request header of request messages.
    pub fn request_header_mut(&mut self) -> Option<&mut ua::RequestHeader> {
        match self {
            Self::CreateSessionRequest(request) => Some(&mut request.request_header),
            Self::ActivateSessionRequest(request) => Some(&mut request.request_header),
            Self::CloseSessionRequest(request) => Some(&mut request.request_header),
            Self::BrowseRequest(request) => Some(&mut request.request_header),
            Self::BrowseNextRequest(request) => Some(&mut request.request_header),
            Self::TranslateBrowsePathsRequest(request) => Some(&mut request.request_header),
            _ => None,
        }
    }

    /// Returns the response header of response messages.
    #[must_use]
    pub fn response_header(&self) -> Option<&ua::ResponseHeader> {
        match self {
            Self::CreateSessionResponse(response) => Some(&response.response_header),
            Self::ActivateSessionResponse(response) => Some(&response.response_header),
            Self::CloseSessionResponse(response) => Some(&response.response_header),
            Self::BrowseResponse(response) => Some(&response.response_header),
            Self::BrowseNextResponse(response) => Some(&response.response_header),
            Self::TranslateBrowsePathsResponse(response) => Some(&response.response_header),
            _ => None,
        }
    }

    /// Node id of the message's data type (namespace 0).
    #[must_use]
    pub const fn type_id(&self) -> ua::NodeId {
        let numeric = match self {
            Self::CreateSessionRequest(_) => 459,
            Self::CreateSessionResponse(_) => 462,
            Self::ActivateSessionRequest(_) => 465,
            Self::ActivateSessionResponse(_) => 468,
            Self::CloseSessionRequest(_) => 471,
            Self::CloseSessionResponse(_) => 474,
            Self::BrowseRequest(_) => 525,
            Self::BrowseResponse(_) => 528,
            Self::BrowseNextRequest(_) => 531,
            Self::BrowseNextResponse(_) => 534,
            Self::TranslateBrowsePathsRequest(_) => 552,
            Self::TranslateBrowsePathsResponse(_) => 555,
        };
        ua::NodeId::ns0(numeric)
    }
}
