use std::fmt;

crate::data_type!(NodeClass);

/// Class of an address-space node.
///
/// The discriminants are the OPC UA mask bits. `Unspecified` is the indeterminate value used when
/// the class is unknown or filtered out by the result mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum NodeClass {
    #[default]
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

impl NodeClass {
    /// Returns the bit this class occupies in a node-class mask.
    #[must_use]
    pub const fn mask_bit(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
