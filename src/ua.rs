//! OPC UA data types and enumerations.

mod browse_direction;
mod browse_result_mask;
mod builtin_id;
mod continuation_point;
mod data_types;
mod node_class_mask;
mod session_state;

pub use self::{
    browse_direction::BrowseDirection,
    browse_result_mask::BrowseResultMask,
    builtin_id::BuiltinId,
    continuation_point::ContinuationPoint,
    data_types::*,
    node_class_mask::NodeClassMask,
    session_state::SessionState,
};
