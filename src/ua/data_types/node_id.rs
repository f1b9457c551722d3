use std::{fmt, str::FromStr};

use crate::ua;

crate::data_type!(NodeId);

/// Identifier payload of a [`NodeId`].
///
/// The arm order matches the OPC UA identifier-type tags (numeric 0, string 1, GUID 2, opaque 3)
/// and defines the ordering of node ids within one namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeIdIdentifier {
    Numeric(u32),
    String(ua::String),
    Guid(ua::Guid),
    Opaque(ua::ByteString),
}

impl Default for NodeIdIdentifier {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

impl NodeIdIdentifier {
    /// Returns the identifier-type tag used by hashing and ordering.
    #[must_use]
    const fn tag(&self) -> u8 {
        match self {
            Self::Numeric(_) => 0,
            Self::String(_) => 1,
            Self::Guid(_) => 2,
            Self::Opaque(_) => 3,
        }
    }
}

/// Namespace-scoped identifier of an address-space node.
///
/// The default value, numeric 0 in namespace 0, is the canonical null node id. Ordering compares
/// the namespace first, then the identifier-type tag, then the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    namespace_index: u16,
    identifier: NodeIdIdentifier,
}

impl NodeId {
    #[must_use]
    pub const fn numeric(namespace_index: u16, numeric: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdIdentifier::Numeric(numeric),
        }
    }

    /// Shortcut for namespace-0 numeric node ids.
    #[must_use]
    pub const fn ns0(numeric: u32) -> Self {
        Self::numeric(0, numeric)
    }

    #[must_use]
    pub fn string(namespace_index: u16, string: &str) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdIdentifier::String(ua::String::new(string)),
        }
    }

    #[must_use]
    pub const fn guid(namespace_index: u16, guid: ua::Guid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdIdentifier::Guid(guid),
        }
    }

    #[must_use]
    pub fn opaque(namespace_index: u16, bytes: &[u8]) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdIdentifier::Opaque(ua::ByteString::new(bytes)),
        }
    }

    #[must_use]
    pub const fn namespace_index(&self) -> u16 {
        self.namespace_index
    }

    #[must_use]
    pub const fn identifier(&self) -> &NodeIdIdentifier {
        &self.identifier
    }

    /// Checks for the canonical null node id.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdIdentifier::Numeric(0))
    }

    /// Hashes tag, namespace, and payload with a DJB-style byte-wise accumulator.
    ///
    /// Equal node ids produce equal hashes.
    #[must_use]
    pub fn djb_hash(&self) -> u64 {
        let mut hash = djb_init(&[self.identifier.tag()]);
        hash = djb_step(hash, &self.namespace_index.to_le_bytes());
        match &self.identifier {
            NodeIdIdentifier::Numeric(numeric) => djb_step(hash, &numeric.to_le_bytes()),
            NodeIdIdentifier::String(string) => match string.as_str() {
                Some(str) => djb_step(hash, str.as_bytes()),
                None => hash,
            },
            NodeIdIdentifier::Guid(guid) => djb_step(hash, &guid.to_bytes()),
            NodeIdIdentifier::Opaque(bytes) => match bytes.as_bytes() {
                Some(bytes) => djb_step(hash, bytes),
                None => hash,
            },
        }
    }
}

const DJB_SEED: u64 = 5381;

fn djb_init(bytes: &[u8]) -> u64 {
    djb_step(DJB_SEED, bytes)
}

fn djb_step(mut hash: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(u64::from(*byte));
    }
    hash
}

impl fmt::Display for NodeId {
    /// Formats in the part 6 §5.3.1.10 textual form.
    ///
    /// The `ns=<n>;` prefix appears exactly when the namespace is not 0.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "ns={};", self.namespace_index)?;
        }
        match &self.identifier {
            NodeIdIdentifier::Numeric(numeric) => write!(f, "i={numeric}"),
            NodeIdIdentifier::String(string) => write!(f, "s={string}"),
            NodeIdIdentifier::Guid(guid) => write!(f, "g={guid}"),
            NodeIdIdentifier::Opaque(bytes) => {
                let bytes = bytes.as_bytes().unwrap_or_default();
                write!(f, "b={}", std::string::String::from_utf8_lossy(bytes))
            }
        }
    }
}

/// Error parsing textual node-id form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid NodeId string")]
pub struct ParseNodeIdError;

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let (namespace_index, body) = match str.strip_prefix("ns=") {
            Some(rest) => {
                let (namespace, body) = rest.split_once(';').ok_or(ParseNodeIdError)?;
                let namespace_index: u16 = namespace.parse().map_err(|_| ParseNodeIdError)?;
                // The prefix is only written for non-zero namespaces.
                if namespace_index == 0 {
                    return Err(ParseNodeIdError);
                }
                (namespace_index, body)
            }
            None => (0, str),
        };

        let (kind, payload) = body.split_at_checked(2).ok_or(ParseNodeIdError)?;
        let identifier = match kind {
            "i=" => NodeIdIdentifier::Numeric(payload.parse().map_err(|_| ParseNodeIdError)?),
            "s=" => NodeIdIdentifier::String(ua::String::new(payload)),
            "g=" => NodeIdIdentifier::Guid(payload.parse().map_err(|_| ParseNodeIdError)?),
            "b=" => NodeIdIdentifier::Opaque(ua::ByteString::new(payload.as_bytes())),
            _ => return Err(ParseNodeIdError),
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::ua;

    fn corpus() -> Vec<ua::NodeId> {
        vec![
            ua::NodeId::ns0(0),
            ua::NodeId::ns0(85),
            ua::NodeId::numeric(2, 1234),
            ua::NodeId::string(0, ""),
            ua::NodeId::string(1, "temperature"),
            ua::NodeId::guid(
                1,
                "09087e75-8e5e-499b-954f-f2a9603db28a".parse().unwrap(),
            ),
            ua::NodeId::opaque(3, b"handle"),
        ]
    }

    #[test]
    fn parse_format_round_trip() {
        for node_id in corpus() {
            let text = node_id.to_string();
            let parsed: ua::NodeId = text.parse().expect("should parse formatted node id");
            assert_eq!(parsed, node_id, "round trip failed for {text}");
        }
    }

    #[test]
    fn parse_canonical_forms() {
        assert_eq!(
            "i=85".parse::<ua::NodeId>().unwrap(),
            ua::NodeId::ns0(85)
        );
        assert_eq!(
            "ns=2;i=1234".parse::<ua::NodeId>().unwrap(),
            ua::NodeId::numeric(2, 1234)
        );
        assert_eq!(
            "ns=1;s=temperature".parse::<ua::NodeId>().unwrap(),
            ua::NodeId::string(1, "temperature")
        );
        assert_eq!(
            "b=handle".parse::<ua::NodeId>().unwrap(),
            ua::NodeId::opaque(0, b"handle")
        );
        // A zero namespace must be written without the prefix.
        assert!("ns=0;i=85".parse::<ua::NodeId>().is_err());
        assert!("x=1".parse::<ua::NodeId>().is_err());
        assert!("i".parse::<ua::NodeId>().is_err());
    }

    #[test]
    fn null_node_id() {
        assert!(ua::NodeId::default().is_null());
        assert!(ua::NodeId::ns0(0).is_null());
        assert!(!ua::NodeId::numeric(1, 0).is_null());
        assert!(!ua::NodeId::string(0, "").is_null());
    }

    #[test]
    fn hash_agreement() {
        for left in corpus() {
            for right in corpus() {
                if left == right {
                    assert_eq!(left.djb_hash(), right.djb_hash());
                }
            }
        }
        // Equal payload bytes under different tags must not collide.
        assert_ne!(
            ua::NodeId::string(0, "x").djb_hash(),
            ua::NodeId::opaque(0, b"x").djb_hash()
        );
    }

    #[test]
    fn random_numeric_round_trip() {
        use rand::Rng as _;

        let mut rng = rand::rng();
        for _ in 0..64 {
            let node_id = ua::NodeId::numeric(rng.random_range(0..16), rng.random());
            let parsed: ua::NodeId = node_id.to_string().parse().unwrap();
            assert_eq!(parsed, node_id);
            assert_eq!(parsed.djb_hash(), node_id.djb_hash());
        }
    }

    #[test]
    fn total_order() {
        let corpus = corpus();
        for a in &corpus {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &corpus {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &corpus {
                    if a.cmp(b) != Ordering::Greater && b.cmp(c) != Ordering::Greater {
                        assert_ne!(a.cmp(c), Ordering::Greater);
                    }
                }
            }
        }
        // Namespace orders before identifier tag.
        assert!(ua::NodeId::numeric(0, u32::MAX) < ua::NodeId::numeric(1, 0));
        assert!(ua::NodeId::numeric(1, u32::MAX) < ua::NodeId::string(1, ""));
    }
}
