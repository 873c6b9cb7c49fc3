//! Binary-search bounds over sorted coordinate slices.
//!
//! Both searches are iterative, O(log n), and total: they never panic and
//! always return an index in `0..=x.len()`. The input must be sorted
//! ascending; this is checked in debug builds only.

#[inline]
fn debug_assert_sorted(x: &[u64]) {
    debug_assert!(
        x.windows(2).all(|w| w[0] <= w[1]),
        "bound search requires an ascending slice"
    );
}

/// Index of the first element `>= v`, or `x.len()` if there is none.
///
/// For a run of elements equal to `v` this is the first index of the run.
///
/// ```
/// use bedq::bounds::lower_bound;
///
/// assert_eq!(lower_bound(&[2, 3, 5, 5, 7], 5), 2);
/// assert_eq!(lower_bound(&[2, 3, 5, 5, 7], 8), 5);
/// ```
pub fn lower_bound(x: &[u64], v: u64) -> usize {
    debug_assert_sorted(x);

    let mut low = 0;
    let mut high = x.len();
    while low < high {
        let mid = low + (high - low) / 2;
        if x[mid] < v {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Index of the first element `> v`, or `x.len()` if there is none.
///
/// For a run of elements equal to `v` this is one past the last index of
/// the run.
///
/// ```
/// use bedq::bounds::upper_bound;
///
/// assert_eq!(upper_bound(&[2, 3, 5, 5, 7], 5), 4);
/// assert_eq!(upper_bound(&[2, 3, 5, 5, 7], 1), 0);
/// ```
pub fn upper_bound(x: &[u64], v: u64) -> usize {
    debug_assert_sorted(x);

    let mut low = 0;
    let mut high = x.len();
    while low < high {
        let mid = low + (high - low) / 2;
        if x[mid] <= v {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}
