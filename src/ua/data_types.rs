//! OPC UA data types.

mod activate_session_request;
mod activate_session_response;
mod anonymous_identity_token;
mod browse_description;
mod browse_next_request;
mod browse_next_response;
mod browse_path;
mod browse_path_result;
mod browse_path_target;
mod browse_request;
mod browse_response;
mod browse_result;
mod byte_string;
mod close_session_request;
mod close_session_response;
mod create_session_request;
mod create_session_response;
mod data_value;
mod date_time;
mod diagnostic_info;
mod expanded_node_id;
mod extension_object;
mod guid;
mod localized_text;
mod node_class;
mod node_id;
mod numeric_range;
mod qualified_name;
mod reference_description;
mod relative_path;
mod relative_path_element;
mod request_header;
mod response_header;
mod signature_data;
mod status_code;
mod string;
mod translate_browse_paths_request;
mod translate_browse_paths_response;
mod variant;
mod view_description;

pub use self::{
    activate_session_request::ActivateSessionRequest,
    activate_session_response::ActivateSessionResponse,
    anonymous_identity_token::AnonymousIdentityToken,
    browse_description::BrowseDescription,
    browse_next_request::BrowseNextRequest,
    browse_next_response::BrowseNextResponse,
    browse_path::BrowsePath,
    browse_path_result::BrowsePathResult,
    browse_path_target::BrowsePathTarget,
    browse_request::BrowseRequest,
    browse_response::BrowseResponse,
    browse_result::BrowseResult,
    byte_string::{ByteString, XmlElement},
    close_session_request::CloseSessionRequest,
    close_session_response::CloseSessionResponse,
    create_session_request::CreateSessionRequest,
    create_session_response::CreateSessionResponse,
    data_value::DataValue,
    date_time::DateTime,
    diagnostic_info::DiagnosticInfo,
    expanded_node_id::ExpandedNodeId,
    extension_object::{ExtensionObject, ExtensionObjectBody},
    guid::{Guid, ParseGuidError},
    localized_text::LocalizedText,
    node_class::NodeClass,
    node_id::{NodeId, NodeIdIdentifier, ParseNodeIdError},
    numeric_range::{NumericRange, NumericRangeDimension, ParseNumericRangeError},
    qualified_name::QualifiedName,
    reference_description::ReferenceDescription,
    relative_path::RelativePath,
    relative_path_element::RelativePathElement,
    request_header::RequestHeader,
    response_header::ResponseHeader,
    signature_data::SignatureData,
    status_code::StatusCode,
    string::String,
    translate_browse_paths_request::TranslateBrowsePathsRequest,
    translate_browse_paths_response::TranslateBrowsePathsResponse,
    variant::{Variant, VariantArray, VariantScalar},
    view_description::ViewDescription,
};
