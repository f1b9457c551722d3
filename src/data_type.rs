use std::fmt::Debug;

/// Common contract of OPC UA data types.
///
/// Every data type in [`crate::ua`] provides the same four elementary operations:
///
/// - initialize, via [`Default`] (the canonical empty value),
/// - deep copy, via [`Clone`],
/// - total order, via [`Ord`],
/// - reset, via [`clear()`](Self::clear).
///
/// The orderings are structural and match the OPC UA comparison semantics of each type, not
/// necessarily the derived lexicographic order of the Rust definition.
pub trait DataType: Clone + Debug + Default + Ord {
    /// Resets the value to its initial state.
    ///
    /// Owned payloads are dropped. Clearing an already cleared value is a no-op, and a cleared
    /// value compares equal to [`Default::default()`].
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Declares an OPC UA data type.
///
/// This wires up the uniform surface (`init()`, [`DataType`]) shared by all data types. Use another
/// `impl` block to add the type-specific methods.
macro_rules! data_type {
    ($name:ident) => {
        impl $name {
            /// Creates value initialized with defaults.
            #[must_use]
            pub fn init() -> Self {
                <Self as ::std::default::Default>::default()
            }
        }

        impl $crate::DataType for $name {}
    };
}

pub(crate) use data_type;
