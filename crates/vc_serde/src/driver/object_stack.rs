use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use crate::value::ObjectRef;

/// The objects currently being visited, outermost first.
///
/// Membership is identity, not equality.
#[derive(Default, Clone)]
pub(super) struct ObjectStack {
    stack: Vec<ObjectRef>,
}

impl ObjectStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, object: ObjectRef) {
        self.stack.push(object);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    pub fn contains(&self, object: &ObjectRef) -> bool {
        self.stack.iter().any(|seen| ObjectRef::ptr_eq(seen, object))
    }

    /// Type paths from the outermost object inward, e.g. `` `A` -> `B` ``.
    pub fn chain(&self) -> String {
        let mut chain = String::new();
        for (index, object) in self.stack.iter().enumerate() {
            if index > 0 {
                chain.push_str(" -> ");
            }
            chain.push('`');
            chain.push_str(&object.type_path());
            chain.push('`');
        }
        chain
    }
}

impl Debug for ObjectStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DynamicObject;

    #[test]
    fn identity_membership() {
        let a = DynamicObject::new("A").into_ref();
        let twin = DynamicObject::new("A").into_ref();
        let b = DynamicObject::new("B").into_ref();

        let mut stack = ObjectStack::new();
        stack.push(a.clone());
        stack.push(b.clone());

        assert!(stack.contains(&a));
        assert!(!stack.contains(&twin));
        assert_eq!(stack.chain(), "`A` -> `B`");

        stack.pop();
        assert!(!stack.contains(&b));
    }
}
