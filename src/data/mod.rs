//! Capabilities that keys must have in order to be stored in the trees.

/// A key that can be stored in a tree.
/// Keys are compared with their [`Ord`] instance, and equal keys are never
/// stored in two different nodes: they collapse into one node's count.
pub trait Key: Ord + Copy + std::fmt::Debug {}

impl<K: Ord + Copy + std::fmt::Debug> Key for K {}

/// A key from a discrete domain, where every value except the minimum
/// has an immediate predecessor.
///
/// The merge/split treap needs this in order to cut a tree into the parts
/// `< key` and `>= key` using a split that only knows how to cut at `<= x`.
/// This is why [`crate::fhq_treap::FhqTreap`] doesn't accept floating point keys.
pub trait DiscreteKey: Key {
    /// The greatest value strictly smaller than `self`.
    /// Returns [`None`] if `self` is the minimum of the domain.
    fn predecessor(&self) -> Option<Self>;
}

macro_rules! impl_discrete_key {
    ($($t:ty),*) => {
        $(
            impl DiscreteKey for $t {
                #[inline]
                fn predecessor(&self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }
        )*
    };
}

impl_discrete_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[test]
fn predecessor_at_domain_edges() {
    assert_eq!(5i32.predecessor(), Some(4));
    assert_eq!(i64::MIN.predecessor(), None);
    assert_eq!(0u8.predecessor(), None);
    assert_eq!(1usize.predecessor(), Some(0));
}
