use derive_more::Debug;

use crate::{Result, message::Message, ua};

/// Serializes a message into an outgoing buffer.
pub type EncodeFn = fn(&Message, &mut Vec<u8>) -> Result<()>;

/// Deserializes a message from an incoming buffer.
pub type DecodeFn = fn(&[u8]) -> Result<Message>;

/// Descriptor of an encodeable message type.
///
/// The core never parses bytes itself: `encode` and `decode` are supplied by the encoding
/// collaborator when the type is registered. `initialize` and `clear` give the uniform lifecycle
/// the treatment relies on.
#[derive(Debug, Clone)]
pub struct EncodeableType {
    pub type_id: ua::NodeId,
    pub binary_encoding_type_id: ua::NodeId,
    pub xml_encoding_type_id: ua::NodeId,
    pub allocation_size: usize,
    #[debug(skip)]
    pub initialize: fn() -> Message,
    #[debug(skip)]
    pub clear: fn(&mut Message),
    #[debug(skip)]
    pub encode: EncodeFn,
    #[debug(skip)]
    pub decode: DecodeFn,
}

impl EncodeableType {
    /// Builds the descriptor for a message type from its namespace-0 numeric id, following the
    /// standard id layout (`type`, `type + 1` XML encoding, `type + 2` binary encoding).
    #[must_use]
    pub fn for_type(
        numeric_id: u32,
        allocation_size: usize,
        initialize: fn() -> Message,
        clear: fn(&mut Message),
        encode: EncodeFn,
        decode: DecodeFn,
    ) -> Self {
        Self {
            type_id: ua::NodeId::ns0(numeric_id),
            xml_encoding_type_id: ua::NodeId::ns0(numeric_id + 1),
            binary_encoding_type_id: ua::NodeId::ns0(numeric_id + 2),
            allocation_size,
            initialize,
            clear,
            encode,
            decode,
        }
    }
}

/// Registry of encodeable types, addressed by data-type or encoding node id.
#[derive(Debug, Clone, Default)]
pub struct EncodeableTypeRegistry {
    types: Vec<EncodeableType>,
}

impl EncodeableTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, encodeable_type: EncodeableType) {
        debug_assert!(
            self.by_type_id(&encodeable_type.type_id).is_none(),
            "encodeable types are registered once"
        );
        self.types.push(encodeable_type);
    }

    #[must_use]
    pub fn by_type_id(&self, type_id: &ua::NodeId) -> Option<&EncodeableType> {
        self.types
            .iter()
            .find(|encodeable_type| encodeable_type.type_id == *type_id)
    }

    /// Resolves the descriptor from the binary encoding id found in an extension object.
    #[must_use]
    pub fn by_binary_encoding_id(&self, encoding_id: &ua::NodeId) -> Option<&EncodeableType> {
        self.types
            .iter()
            .find(|encodeable_type| encodeable_type.binary_encoding_type_id == *encoding_id)
    }
}
