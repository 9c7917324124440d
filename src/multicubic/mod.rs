//! Cubic interpolation on a 4-wide lattice of samples.
//!
//! Every method here is built from one four-point convolution kernel of the
//! Catmull-Rom family. For samples `[s0, s1, s2, s3]` taken at relative
//! positions -1, 0, 1, 2, the kernel passes through `s1` at `t = 0` and `s2`
//! at `t = 1`, and its slope at those two points is the centered difference
//! of the neighbouring samples. The result has a continuous first derivative
//! when neighbouring cells are chained together.
//!
//! Higher dimensions are handled by collapsing one axis at a time: the
//! bicubic method interpolates each row and then the column of row results,
//! the tricubic method does the same with planes, and the N-dimensional
//! method in [`lattice`] recurses until only one axis is left. Because every
//! level reuses the same kernel, the special cases agree with the general
//! path exactly.
//!
//! ```rust
//! use numtools::multicubic::{bicubic_interpolate, cubic_interpolate, lattice};
//!
//! let p = [1.0_f64, 2.0, 3.0, 4.0];
//! assert_eq!(cubic_interpolate(&p, 0.5).unwrap(), 2.5);
//!
//! let grid = [
//!     [1.0_f64, 2.0, 3.0, 4.0],
//!     [2.0, 3.0, 4.0, 5.0],
//!     [3.0, 4.0, 5.0, 6.0],
//!     [4.0, 5.0, 6.0, 7.0],
//! ];
//! let flat: Vec<f64> = grid.iter().flatten().copied().collect();
//!
//! let a = bicubic_interpolate(&grid, 0.25, 0.75).unwrap();
//! let b = lattice::n_cubic_interpolate(2, &flat, &[0.25, 0.75]).unwrap();
//! assert_eq!(a, b);
//! ```
use num_traits::Float;

use crate::{Error, Result};

pub mod lattice;

pub use lattice::{interpn, n_cubic_interpolate, CubicLattice};

/// Evaluate the four-point cubic kernel at normalized coordinate `t`,
/// where `t = 0` sits on `p[1]` and `t = 1` on `p[2]`.
#[inline]
pub fn cubic_kernel<T: Float>(p: [T; 4], t: T) -> T {
    // Construct some constants using generic methods
    let one = T::one();
    let two = one + one;
    let three = two + one;
    let four = two + two;
    let five = four + one;
    let half = one / two;

    p[1] + half
        * t
        * (p[2] - p[0]
            + t * (two * p[0] - five * p[1] + four * p[2] - p[3]
                + t * (three * (p[1] - p[2]) + p[3] - p[0])))
}

/// Cubic interpolation between the middle two of four samples.
///
/// # Errors
/// * If `samples` does not hold exactly 4 values
#[inline]
pub fn cubic_interpolate<T: Float>(samples: &[T], t: T) -> Result<T> {
    Ok(cubic_kernel(quad(samples)?, t))
}

/// Bicubic interpolation on a 4x4 grid.
///
/// Each row is interpolated along `y`, then the four row results along `x`,
/// so `grid[i][j]` is the sample at `x = i - 1`, `y = j - 1`.
///
/// # Errors
/// * If the grid does not have exactly 4 rows of exactly 4 samples
pub fn bicubic_interpolate<T, R>(grid: &[R], x: T, y: T) -> Result<T>
where
    T: Float,
    R: AsRef<[T]>,
{
    if grid.len() != 4 {
        return Err(Error::ShapeMismatch {
            expected: 4,
            actual: grid.len(),
        });
    }

    let mut rows = [T::zero(); 4];
    for (v, row) in rows.iter_mut().zip(grid) {
        *v = cubic_interpolate(row.as_ref(), y)?;
    }

    Ok(cubic_kernel(rows, x))
}

/// Tricubic interpolation on a 4x4x4 grid.
///
/// Each plane `grid[i]` is interpolated bicubically on `(y, z)`, then the
/// four plane results are interpolated along `x`.
///
/// # Errors
/// * If the grid is not exactly 4x4x4
pub fn tricubic_interpolate<T, P, R>(grid: &[P], x: T, y: T, z: T) -> Result<T>
where
    T: Float,
    P: AsRef<[R]>,
    R: AsRef<[T]>,
{
    if grid.len() != 4 {
        return Err(Error::ShapeMismatch {
            expected: 4,
            actual: grid.len(),
        });
    }

    // Check the whole shape up front so a bad last plane
    // is not reported after the others were already evaluated
    for plane in grid {
        let plane = plane.as_ref();
        if plane.len() != 4 {
            return Err(Error::ShapeMismatch {
                expected: 4,
                actual: plane.len(),
            });
        }
        for row in plane {
            let n = row.as_ref().len();
            if n != 4 {
                return Err(Error::ShapeMismatch {
                    expected: 4,
                    actual: n,
                });
            }
        }
    }

    let mut planes = [T::zero(); 4];
    for (v, plane) in planes.iter_mut().zip(grid) {
        *v = bicubic_interpolate(plane.as_ref(), y, z)?;
    }

    Ok(cubic_kernel(planes, x))
}

/// Copy a 4-sample slice into an array, checking the length.
#[inline]
pub(crate) fn quad<T: Copy>(samples: &[T]) -> Result<[T; 4]> {
    match samples {
        &[a, b, c, d] => Ok([a, b, c, d]),
        _ => Err(Error::ShapeMismatch {
            expected: 4,
            actual: samples.len(),
        }),
    }
}
