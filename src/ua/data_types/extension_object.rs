use crate::ua;

crate::data_type!(ExtensionObject);

/// Body of an [`ExtensionObject`].
///
/// The core never decodes bodies; structured payloads stay with the encoding collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionObjectBody {
    #[default]
    None,
    ByteString(ua::ByteString),
    XmlElement(ua::XmlElement),
}

/// Container for a structured value of a type identified at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionObject {
    type_id: ua::ExpandedNodeId,
    body: ExtensionObjectBody,
}

impl ExtensionObject {
    #[must_use]
    pub const fn new(type_id: ua::ExpandedNodeId, body: ExtensionObjectBody) -> Self {
        Self { type_id, body }
    }

    #[must_use]
    pub const fn type_id(&self) -> &ua::ExpandedNodeId {
        &self.type_id
    }

    #[must_use]
    pub const fn body(&self) -> &ExtensionObjectBody {
        &self.body
    }

    /// Checks for the absent extension object: null type id and no body.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.type_id.node_id().is_null() && matches!(self.body, ExtensionObjectBody::None)
    }
}
