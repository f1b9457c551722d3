use crate::ua;

/// A generic service request.
///
/// Defines methods supported by all service request types.
pub trait ServiceRequest: 'static {
    type Response: ServiceResponse;

    /// Returns the request header.
    #[must_use]
    fn request_header(&self) -> &ua::RequestHeader;

    /// Returns the mutable request header.
    #[must_use]
    fn request_header_mut(&mut self) -> &mut ua::RequestHeader;
}

/// A generic service response.
///
/// Defines methods supported by all service response types.
pub trait ServiceResponse: 'static {
    type Request: ServiceRequest;

    /// Returns the response header.
    #[must_use]
    fn response_header(&self) -> &ua::ResponseHeader;
}

macro_rules! service_pair {
    ($request:ident, $response:ident) => {
        impl ServiceRequest for ua::$request {
            type Response = ua::$response;

            fn request_header(&self) -> &ua::RequestHeader {
                &self.request_header
            }

            fn request_header_mut(&mut self) -> &mut ua::RequestHeader {
                &mut self.request_header
            }
        }

        impl ServiceResponse for ua::$response {
            type Request = ua::$request;

            fn response_header(&self) -> &ua::ResponseHeader {
                &self.response_header
            }
        }
    };
}

service_pair!(CreateSessionRequest, CreateSessionResponse);
service_pair!(ActivateSessionRequest, ActivateSessionResponse);
service_pair!(CloseSessionRequest, CloseSessionResponse);
service_pair!(BrowseRequest, BrowseResponse);
service_pair!(BrowseNextRequest, BrowseNextResponse);
service_pair!(TranslateBrowsePathsRequest, TranslateBrowsePathsResponse);
