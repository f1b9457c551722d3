//! In-memory address space and crypto stand-ins shared by the integration tests.
#![allow(dead_code, reason = "not every test binary uses every helper")]

use opcua_core::{AddressSpace, CryptoProvider, NodeHandle, Reference, ua};

/// `References` abstract reference type (ns=0).
pub const REFERENCES: u32 = 31;
/// `HierarchicalReferences` reference type (ns=0).
pub const HIERARCHICAL_REFERENCES: u32 = 33;
/// `HasChild` reference type (ns=0).
pub const HAS_CHILD: u32 = 34;
/// `Organizes` reference type (ns=0).
pub const ORGANIZES: u32 = 35;
/// `HasSubtype` reference type (ns=0).
pub const HAS_SUBTYPE: u32 = 45;
/// `HasComponent` reference type (ns=0).
pub const HAS_COMPONENT: u32 = 47;

struct TestNode {
    id: ua::NodeId,
    node_class: ua::NodeClass,
    browse_name: ua::QualifiedName,
    display_name: ua::LocalizedText,
    type_definition: ua::ExpandedNodeId,
    references: Vec<Reference>,
}

/// Address space backed by plain vectors, good enough to drive the treatments.
#[derive(Default)]
pub struct TestAddressSpace {
    nodes: Vec<TestNode>,
    /// Direct subtype edges: (subtype, supertype).
    subtype_edges: Vec<(ua::NodeId, ua::NodeId)>,
    reference_types: Vec<ua::NodeId>,
}

impl TestAddressSpace {
    pub fn new() -> Self {
        let mut space = Self {
            nodes: Vec::new(),
            subtype_edges: Vec::new(),
            reference_types: Vec::new(),
        };
        // The standard reference-type hierarchy fragment the tests rely on.
        space.add_reference_type(REFERENCES, None);
        space.add_reference_type(HIERARCHICAL_REFERENCES, Some(REFERENCES));
        space.add_reference_type(HAS_CHILD, Some(HIERARCHICAL_REFERENCES));
        space.add_reference_type(ORGANIZES, Some(HIERARCHICAL_REFERENCES));
        space.add_reference_type(HAS_SUBTYPE, Some(HAS_CHILD));
        space.add_reference_type(HAS_COMPONENT, Some(HAS_CHILD));
        space
    }

    pub fn add_reference_type(&mut self, id: u32, supertype: Option<u32>) {
        self.reference_types.push(ua::NodeId::ns0(id));
        if let Some(supertype) = supertype {
            self.subtype_edges
                .push((ua::NodeId::ns0(id), ua::NodeId::ns0(supertype)));
        }
    }

    pub fn add_node(&mut self, id: ua::NodeId, node_class: ua::NodeClass, name: &str) {
        self.nodes.push(TestNode {
            browse_name: ua::QualifiedName::new(id.namespace_index(), name),
            display_name: ua::LocalizedText::from_text(name),
            type_definition: ua::ExpandedNodeId::default(),
            id,
            node_class,
            references: Vec::new(),
        });
    }

    pub fn add_reference(
        &mut self,
        source: &ua::NodeId,
        reference_type: u32,
        target: ua::ExpandedNodeId,
        is_forward: bool,
    ) {
        let node = self
            .nodes
            .iter_mut()
            .find(|node| node.id == *source)
            .expect("source node must exist");
        node.references.push(Reference {
            reference_type_id: ua::NodeId::ns0(reference_type),
            target,
            is_forward,
        });
    }

    fn node(&self, handle: NodeHandle) -> &TestNode {
        &self.nodes[handle.index()]
    }
}

impl AddressSpace for TestAddressSpace {
    fn lookup(&self, node_id: &ua::NodeId) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|node| node.id == *node_id)
            .map(NodeHandle::new)
    }

    fn node_class(&self, node: NodeHandle) -> ua::NodeClass {
        self.node(node).node_class
    }

    fn browse_name(&self, node: NodeHandle) -> ua::QualifiedName {
        self.node(node).browse_name.clone()
    }

    fn display_name(&self, node: NodeHandle) -> ua::LocalizedText {
        self.node(node).display_name.clone()
    }

    fn type_definition(&self, node: NodeHandle) -> ua::ExpandedNodeId {
        self.node(node).type_definition.clone()
    }

    fn reference_count(&self, node: NodeHandle) -> usize {
        self.node(node).references.len()
    }

    fn reference_at(&self, node: NodeHandle, index: usize) -> Option<Reference> {
        self.node(node).references.get(index).cloned()
    }

    fn is_transitive_subtype(&self, subtype: &ua::NodeId, supertype: &ua::NodeId) -> bool {
        // Walk the direct-supertype edges with a visited list, so that cyclic graphs terminate.
        let mut visited = vec![subtype.clone()];
        let mut frontier = vec![subtype.clone()];
        while let Some(current) = frontier.pop() {
            for (sub, sup) in &self.subtype_edges {
                if *sub != current || visited.contains(sup) {
                    continue;
                }
                if *sup == *supertype {
                    return true;
                }
                visited.push(sup.clone());
                frontier.push(sup.clone());
            }
        }
        false
    }

    fn is_valid_reference_type(&self, reference_type_id: &ua::NodeId) -> bool {
        self.reference_types.contains(reference_type_id)
    }
}

/// Crypto provider for tests running under the `None` security policy.
pub struct NoneCrypto;

impl CryptoProvider for NoneCrypto {
    fn security_policy_uri(&self) -> &str {
        opcua_core::SECURITY_POLICY_NONE_URI
    }

    fn signature_algorithm_uri(&self) -> &str {
        ""
    }

    fn random_nonce(&self) -> opcua_core::Result<[u8; opcua_core::NONCE_LENGTH]> {
        Ok([0; opcua_core::NONCE_LENGTH])
    }

    fn sign_with_server_key(&self, _data: &[u8]) -> opcua_core::Result<ua::ByteString> {
        Ok(ua::ByteString::null())
    }
}
