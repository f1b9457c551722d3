use std::cmp::Ordering;

use crate::ua;

crate::data_type!(DiagnosticInfo);

/// Vendor-specific diagnostics attached to a service result.
///
/// The numeric fields index into the string table of the response header; `-1` marks an absent
/// entry. `inner` forms a singly-linked owning chain. All chain traversals (copy, compare, drop)
/// are iterative so that adversarially deep chains cannot exhaust the stack.
#[derive(Debug)]
pub struct DiagnosticInfo {
    symbolic_id: i32,
    namespace_uri: i32,
    locale: i32,
    localized_text: i32,
    additional_info: ua::String,
    inner_status_code: ua::StatusCode,
    inner: Option<Box<DiagnosticInfo>>,
}

impl Default for DiagnosticInfo {
    fn default() -> Self {
        Self {
            symbolic_id: -1,
            namespace_uri: -1,
            locale: -1,
            localized_text: -1,
            additional_info: ua::String::null(),
            inner_status_code: ua::StatusCode::GOOD,
            inner: None,
        }
    }
}

impl DiagnosticInfo {
    #[must_use]
    pub fn new(symbolic_id: i32, additional_info: ua::String) -> Self {
        Self {
            symbolic_id,
            namespace_uri: -1,
            locale: -1,
            localized_text: -1,
            additional_info,
            inner_status_code: ua::StatusCode::GOOD,
            inner: None,
        }
    }

    #[must_use]
    pub const fn symbolic_id(&self) -> i32 {
        self.symbolic_id
    }

    #[must_use]
    pub const fn additional_info(&self) -> &ua::String {
        &self.additional_info
    }

    #[must_use]
    pub const fn inner_status_code(&self) -> ua::StatusCode {
        self.inner_status_code
    }

    #[must_use]
    pub fn inner(&self) -> Option<&DiagnosticInfo> {
        self.inner.as_deref()
    }

    /// Replaces the inner chain, returning the previous one.
    pub fn set_inner(&mut self, inner: Option<DiagnosticInfo>) -> Option<DiagnosticInfo> {
        std::mem::replace(&mut self.inner, inner.map(Box::new)).map(|boxed| *boxed)
    }

    /// Number of entries in the chain, including this one.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut next = self.inner.as_deref();
        while let Some(info) = next {
            len += 1;
            next = info.inner.as_deref();
        }
        len
    }

    fn head_fields_cmp(&self, other: &Self) -> Ordering {
        self.symbolic_id
            .cmp(&other.symbolic_id)
            .then_with(|| self.namespace_uri.cmp(&other.namespace_uri))
            .then_with(|| self.locale.cmp(&other.locale))
            .then_with(|| self.localized_text.cmp(&other.localized_text))
            .then_with(|| self.additional_info.cmp(&other.additional_info))
            .then_with(|| self.inner_status_code.cmp(&other.inner_status_code))
    }
}

impl Clone for DiagnosticInfo {
    fn clone(&self) -> Self {
        fn copy_head(src: &DiagnosticInfo) -> DiagnosticInfo {
            DiagnosticInfo {
                symbolic_id: src.symbolic_id,
                namespace_uri: src.namespace_uri,
                locale: src.locale,
                localized_text: src.localized_text,
                additional_info: src.additional_info.clone(),
                inner_status_code: src.inner_status_code,
                inner: None,
            }
        }

        let mut head = copy_head(self);

        // Rebuild the inner chain iteratively, front to back.
        let mut tail = &mut head.inner;
        let mut next = self.inner.as_deref();
        while let Some(src) = next {
            tail = &mut tail.insert(Box::new(copy_head(src))).inner;
            next = src.inner.as_deref();
        }

        head
    }
}

impl Drop for DiagnosticInfo {
    fn drop(&mut self) {
        // Unlink the chain iteratively so that dropping the head never recurses.
        let mut next = self.inner.take();
        while let Some(mut info) = next {
            next = info.inner.take();
        }
    }
}

impl Ord for DiagnosticInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = Some(self);
        let mut right = Some(other);
        loop {
            match (left, right) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => {
                    let ordering = l.head_fields_cmp(r);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                    left = l.inner.as_deref();
                    right = r.inner.as_deref();
                }
            }
        }
    }
}

impl PartialOrd for DiagnosticInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DiagnosticInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DiagnosticInfo {}

#[cfg(test)]
mod tests {
    use crate::{DataType as _, ua};

    /// Builds a chain of `depth` entries, head first.
    fn deep_chain(depth: usize) -> ua::DiagnosticInfo {
        let mut head: Option<ua::DiagnosticInfo> = None;
        for index in (0..depth).rev() {
            let mut info = ua::DiagnosticInfo::new(
                i32::try_from(index).unwrap_or(i32::MAX),
                ua::String::null(),
            );
            info.set_inner(head.take());
            head = Some(info);
        }
        head.expect("depth must be non-zero")
    }

    #[test]
    fn copy_round_trip() {
        let original = deep_chain(5);
        let copy = original.clone();
        assert_eq!(original, copy);
        assert_eq!(copy.chain_len(), 5);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        // Clone, compare, and drop must all walk iteratively.
        let original = deep_chain(100_000);
        let copy = original.clone();
        assert_eq!(original, copy);
        drop(original);
        drop(copy);
    }

    #[test]
    fn chain_length_breaks_ties() {
        let short = deep_chain(2);
        let long = deep_chain(3);
        assert!(short < long);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut info = deep_chain(3);
        info.clear();
        assert_eq!(info, ua::DiagnosticInfo::default());
        info.clear();
        assert_eq!(info, ua::DiagnosticInfo::default());
    }
}
