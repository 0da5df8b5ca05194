/// A strict weak ordering over `T`.
///
/// `less` must be irreflexive (`less(a, a)` is false), asymmetric and transitive.
/// Nothing here checks that; a comparator that breaks these rules leaves the tree in an unspecified (but memory safe) order.
pub trait Compare<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;

    /// Neither element orders before the other.
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders elements by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Compare<T> for F {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders `(key, value)` entries by the key alone, using `C`.
///
/// The value never takes part in a comparison, so two entries with equal keys are equivalent no matter what they map to.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByKey<C>(pub C);

impl<K, V, C: Compare<K>> Compare<(K, V)> for ByKey<C> {
    #[inline]
    fn less(&self, a: &(K, V), b: &(K, V)) -> bool {
        self.0.less(&a.0, &b.0)
    }
}
