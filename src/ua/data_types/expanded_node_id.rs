use std::{cmp::Ordering, fmt};

use crate::ua;

crate::data_type!(ExpandedNodeId);

/// Node id extended for cross-server references.
///
/// Carries an optional namespace URI overriding the numeric namespace index, and the index of the
/// server hosting the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExpandedNodeId {
    node_id: ua::NodeId,
    namespace_uri: ua::String,
    server_index: u32,
}

impl ExpandedNodeId {
    #[must_use]
    pub const fn local(node_id: ua::NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: ua::String::null(),
            server_index: 0,
        }
    }

    #[must_use]
    pub const fn new(node_id: ua::NodeId, namespace_uri: ua::String, server_index: u32) -> Self {
        Self {
            node_id,
            namespace_uri,
            server_index,
        }
    }

    #[must_use]
    pub const fn node_id(&self) -> &ua::NodeId {
        &self.node_id
    }

    #[must_use]
    pub const fn namespace_uri(&self) -> &ua::String {
        &self.namespace_uri
    }

    #[must_use]
    pub const fn server_index(&self) -> u32 {
        self.server_index
    }

    /// Checks whether the target lives on the local server.
    ///
    /// Holds when the server index is 0 and no namespace URI is set.
    #[must_use]
    pub const fn is_local_server(&self) -> bool {
        self.server_index == 0 && self.namespace_uri.is_null()
    }
}

impl Ord for ExpandedNodeId {
    /// Orders by server index, then namespace URI, then node id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.server_index
            .cmp(&other.server_index)
            .then_with(|| self.namespace_uri.cmp(&other.namespace_uri))
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for ExpandedNodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<ua::NodeId> for ExpandedNodeId {
    fn from(node_id: ua::NodeId) -> Self {
        Self::local(node_id)
    }
}

impl fmt::Display for ExpandedNodeId {
    /// Formats in the part 6 textual form with optional `svr=` and `nsu=` prefixes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        if let Some(namespace_uri) = self.namespace_uri.as_str() {
            write!(f, "nsu={namespace_uri};")?;
        }
        self.node_id.fmt(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ExpandedNodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::ua;

    #[test]
    fn local_server_predicate() {
        let local = ua::ExpandedNodeId::local(ua::NodeId::ns0(85));
        assert!(local.is_local_server());

        let remote = ua::ExpandedNodeId::new(ua::NodeId::ns0(85), ua::String::null(), 3);
        assert!(!remote.is_local_server());

        let with_uri = ua::ExpandedNodeId::new(
            ua::NodeId::ns0(85),
            ua::String::new("urn:other:namespace"),
            0,
        );
        assert!(!with_uri.is_local_server());
    }

    #[test]
    fn display_prefixes() {
        let expanded = ua::ExpandedNodeId::new(
            ua::NodeId::numeric(2, 5),
            ua::String::new("urn:other"),
            7,
        );
        assert_eq!(expanded.to_string(), "svr=7;nsu=urn:other;ns=2;i=5");
        assert_eq!(
            ua::ExpandedNodeId::local(ua::NodeId::ns0(85)).to_string(),
            "i=85"
        );
    }
}
