use std::{cmp::Ordering, fmt};

use crate::ua;

crate::data_type!(QualifiedName);

/// Namespace-qualified browse name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace_index: u16,
    name: ua::String,
}

impl QualifiedName {
    #[must_use]
    pub fn new(namespace_index: u16, name: impl Into<ua::String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    #[must_use]
    pub const fn namespace_index(&self) -> u16 {
        self.namespace_index
    }

    #[must_use]
    pub const fn name(&self) -> &ua::String {
        &self.name
    }

    /// Checks for the indeterminate browse name: no name and namespace 0.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_null()
    }
}

impl Ord for QualifiedName {
    /// Orders by name, then namespace index.
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.namespace_index.cmp(&other.namespace_index))
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QualifiedName {
    /// Formats as `<ns>:<name>`, omitting the prefix for namespace 0.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            return self.name.fmt(f);
        }
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QualifiedName {
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
    fn orders_by_name_before_namespace() {
        let a = ua::QualifiedName::new(7, "alpha");
        let b = ua::QualifiedName::new(0, "beta");
        assert!(a < b);

        let c = ua::QualifiedName::new(0, "alpha");
        assert!(c < a);
    }

    #[test]
    fn display_form() {
        assert_eq!(ua::QualifiedName::new(0, "Objects").to_string(), "Objects");
        assert_eq!(ua::QualifiedName::new(2, "Motor").to_string(), "2:Motor");
    }
}
