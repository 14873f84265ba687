//! Total orders supplied to ordered collections.
//!
//! [`Compare`] is the seam through which a caller hands an ordering to
//! [`PriorityQueue`](super::PriorityQueue) and to the A* frontier. Any
//! `Fn(&T, &T) -> Ordering` is a comparer, and [`NaturalOrder`] forwards to [`Ord`].

use core::cmp::Ordering;

/// A total order over `T`.
pub trait Compare<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// The natural order of a type, as given by its [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_closure_comparer() {
        let descending = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(descending.compare(&1, &2), Ordering::Greater);

        let by_float = |a: &f32, b: &f32| a.total_cmp(b);
        assert_eq!(by_float.compare(&0.5, &0.25), Ordering::Greater);
    }
}
