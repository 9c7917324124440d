//! Convenience methods for constructing grids in a way that echoes,
//! but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

use crate::{Error, Result};

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// Returns an empty vec for `n == 0` and `[start]` for `n == 1`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::nan);
            let dx: T = (stop - start) / steps;
            (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::nan) * dx)
                .collect()
        }
    }
}

/// Number of points [`arange_inclusive`] generates for these arguments,
/// or `None` if the count does not fit in a `usize`.
///
/// Zero if `step` is not positive or `stop < start`. An infinite step
/// gives the single point `start`.
pub fn arange_len(start: f64, stop: f64, step: f64) -> Option<usize> {
    if !(step > 0.0) || stop < start {
        return Some(0);
    }
    let n = ((stop - start) / step + 1e-9).floor() + 1.0;
    // `usize::MAX as f64` rounds up, so equality already overflows
    (n.is_finite() && n < usize::MAX as f64).then_some(n as usize)
}

/// Generates `start, start + step, ...` up to and including `stop`.
///
/// Points are computed as `start + i * step` rather than by repeated
/// addition, and a point that overshoots `stop` by less than a relative
/// 1e-9 of the step is kept, so an endpoint lost to rounding is not dropped.
/// Returns an empty vec if `step` is not positive or `stop < start`.
///
/// # Errors
/// * If the number of points does not fit in a `usize`
pub fn arange_inclusive(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    let n = arange_len(start, stop, step)
        .ok_or(Error::InvalidInput("range has too many points"))?;
    Ok((0..n).map(|i| start + i as f64 * step).collect())
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn)
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0_f64, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0_f64, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0_f64, 3.0, 0).is_empty());
    }

    #[test]
    fn test_arange_inclusive() {
        let arange = |a, b, s| arange_inclusive(a, b, s).unwrap();
        assert_eq!(arange(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(arange(0.0, 0.9, 0.5), vec![0.0, 0.5]);
        assert_eq!(arange(1.0, 1.0, 0.5), vec![1.0]);
        // 0.1 * 3 rounds to just above 0.3
        assert_eq!(arange(0.0, 0.3, 0.1).len(), 4);
        assert!(arange(1.0, 0.0, 0.5).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
        assert!(arange(0.0, 1.0, f64::NAN).is_empty());
        assert_eq!(arange(2.0, 3.0, f64::INFINITY), vec![2.0]);
    }

    #[test]
    fn test_arange_len_overflow() {
        assert_eq!(arange_len(0.0, 1.0, 0.25), Some(5));
        assert_eq!(arange_len(0.0, 0.05, 1e-300), None);
        assert_eq!(arange_len(-1e308, 1e308, 1.0), None);
        assert_eq!(arange_len(0.0, 1e6, 0.5), Some(2_000_001));
        assert_eq!(
            arange_inclusive(0.0, 0.05, 1e-300),
            Err(Error::InvalidInput("range has too many points"))
        );
    }

    #[test]
    fn test_meshgrid() {
        let x = vec![0.0_f64, 1.0];
        let y = vec![2.0_f64, 3.0, 4.0];
        let g = meshgrid(vec![&x, &y]);
        assert_eq!(g.len(), 6);
        assert_eq!(g[0], vec![0.0, 2.0]);
        assert_eq!(g[1], vec![0.0, 3.0]);
        assert_eq!(g[3], vec![1.0, 2.0]);
    }
}
