//! Provide `FixedHasher`.
//!
//! `FixedHasher` is based on the `foldhash` crate and yields stable
//! results through a fixed hash seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// A hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`], created through
/// [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("field");
/// let b = FixedHashState.hash_one("field");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

#[cfg(test)]
mod tests {
    use super::FixedHashState;
    use crate::hash::{HashMap, HashSet};
    use core::hash::BuildHasher;

    #[test]
    fn fixed_state_is_deterministic() {
        assert_eq!(FixedHashState.hash_one(42_u64), FixedHashState.hash_one(42_u64));
        assert_ne!(FixedHashState.hash_one(1_u64), FixedHashState.hash_one(2_u64));
    }

    #[test]
    fn aliases_use_fixed_state() {
        let mut map: HashMap<&str, u32> = HashMap::default();
        map.insert("x", 3);
        map.insert("y", 4);
        assert_eq!(map.get("x"), Some(&3));

        let set: HashSet<&str> = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
