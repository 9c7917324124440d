//! Binary search that reports every position holding the target.
//!
//! All entry points return the contiguous range of indices whose elements
//! compare equal to the target. When there is no match the range is empty
//! and starts at the index where the target could be inserted while keeping
//! the slice sorted.
//!
//! ```rust
//! use numtools::search::binary_search_iterative;
//!
//! let v = [1, 2, 3, 4, 5, 5, 5, 6, 7, 8];
//! assert_eq!(binary_search_iterative(&v, &5), 4..7);
//! assert_eq!(binary_search_iterative(&v, &10), 10..10);
//! ```
use core::cmp::Ordering;
use core::ops::Range;

/// Default comparison for the plain value types the searches accept without
/// an explicit comparator.
///
/// Floats use the IEEE 754 total order, so NaN sorts after every number and
/// `-0.0` before `0.0`. Strings compare bytewise.
pub trait DefaultOrder {
    fn default_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! default_order_ord {
    ($($t:ty),*) => {
        $(impl DefaultOrder for $t {
            #[inline]
            fn default_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        })*
    };
}

default_order_ord!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, str, String);

impl DefaultOrder for f32 {
    #[inline]
    fn default_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl DefaultOrder for f64 {
    #[inline]
    fn default_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl<T: DefaultOrder + ?Sized> DefaultOrder for &T {
    #[inline]
    fn default_cmp(&self, other: &Self) -> Ordering {
        (**self).default_cmp(*other)
    }
}

/// Iterative binary search with the type's [`DefaultOrder`].
pub fn binary_search_iterative<T: DefaultOrder>(sorted: &[T], target: &T) -> Range<usize> {
    binary_search_iterative_by(sorted, target, T::default_cmp)
}

/// Recursive binary search with the type's [`DefaultOrder`].
pub fn binary_search_recursive<T: DefaultOrder>(sorted: &[T], target: &T) -> Range<usize> {
    binary_search_recursive_by(sorted, target, T::default_cmp)
}

/// Iterative binary search with a custom comparator.
///
/// `cmp(element, target)` must be consistent with the order of `sorted`.
pub fn binary_search_iterative_by<T, F>(sorted: &[T], target: &T, mut cmp: F) -> Range<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut lo, mut hi) = (0, sorted.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp(&sorted[mid], target) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return widen(sorted, target, &mut cmp, lo, mid, hi),
        }
    }
    lo..lo
}

/// Recursive binary search with a custom comparator.
///
/// `cmp(element, target)` must be consistent with the order of `sorted`.
/// Recursion depth is logarithmic in the slice length.
pub fn binary_search_recursive_by<T, F>(sorted: &[T], target: &T, mut cmp: F) -> Range<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    bisect(sorted, target, &mut cmp, 0, sorted.len())
}

fn bisect<T, F>(sorted: &[T], target: &T, cmp: &mut F, lo: usize, hi: usize) -> Range<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if lo >= hi {
        return lo..lo;
    }
    let mid = lo + (hi - lo) / 2;
    match cmp(&sorted[mid], target) {
        Ordering::Less => bisect(sorted, target, cmp, mid + 1, hi),
        Ordering::Greater => bisect(sorted, target, cmp, lo, mid),
        Ordering::Equal => widen(sorted, target, cmp, lo, mid, hi),
    }
}

/// Grow a known match at `hit` to the full run of equal elements, searching
/// only within `[lo, hi)` since everything outside is already excluded.
fn widen<T, F>(sorted: &[T], target: &T, cmp: &mut F, lo: usize, hit: usize, hi: usize) -> Range<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let start = lo + sorted[lo..hit].partition_point(|x| cmp(x, target) == Ordering::Less);
    let end = hit + sorted[hit..hi].partition_point(|x| cmp(x, target) != Ordering::Greater);
    start..end
}
