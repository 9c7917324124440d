//! N-dimensional cubic interpolation on a 4^N sample lattice.
//!
//! ```rust
//! use numtools::multicubic::lattice::{self, CubicLattice};
//!
//! // A 2D lattice holding x + y at relative indices -1..=2 on each axis
//! let vals: Vec<f64> = (0..16).map(|i| ((i / 4) + (i % 4)) as f64 - 2.0).collect();
//!
//! // One point at a time
//! let v = lattice::n_cubic_interpolate(2, &vals, &[0.5, 0.25]).unwrap();
//! assert!((v - 0.75).abs() < 1e-12);
//!
//! // Many points, one slice per dimension
//! let xobs = [0.0_f64, 0.5, 1.0];
//! let yobs = [0.0_f64, 0.5, 1.0];
//! let mut out = [0.0; 3];
//! CubicLattice::<'_, f64, 2>::new(2, &vals)
//!     .unwrap()
//!     .interp(&[&xobs[..], &yobs[..]], &mut out)
//!     .unwrap();
//! assert_eq!(out, [0.0, 1.0, 2.0]);
//! ```
use num_traits::Float;

use super::cubic_kernel;
use crate::{Error, Result};

/// Number of lattice samples needed for `ndims` dimensions (4^ndims).
///
/// # Errors
/// * If `ndims` is zero
/// * If 4^ndims does not fit in a `usize`
pub fn lattice_len(ndims: usize) -> Result<usize> {
    if ndims < 1 {
        return Err(Error::InvalidInput("at least one dimension required"));
    }
    u32::try_from(ndims)
        .ok()
        .and_then(|n| 4_usize.checked_pow(n))
        .ok_or(Error::InvalidInput("lattice size exceeds addressable memory"))
}

/// Interpolate a value inside a 4^ndims lattice of samples.
///
/// The lattice is C-ordered: the first coordinate selects one of four
/// contiguous blocks of 4^(ndims-1) samples, the second coordinate a block
/// within that, and so on. Each coordinate is normalized so that 0 and 1 land
/// on the middle two samples of its axis; values outside [0, 1] extrapolate.
///
/// # Errors
/// * If `ndims` is zero
/// * If `coords.len() != ndims`
/// * If `samples.len() != 4^ndims`
pub fn n_cubic_interpolate<T: Float>(ndims: usize, samples: &[T], coords: &[T]) -> Result<T> {
    check_lattice(ndims, samples)?;
    if coords.len() != ndims {
        return Err(Error::ShapeMismatch {
            expected: ndims,
            actual: coords.len(),
        });
    }

    Ok(collapse(samples, coords[0], &coords[1..]))
}

/// Evaluate cubic interpolation on a 4^ndims lattice at many observation points,
/// with up to 8 dimensions.
///
/// Observation points are given as one slice per dimension, all with the same
/// length as `out`.
///
/// This is a convenience function; use [`CubicLattice`] directly with a
/// different MAXDIMS for higher dimensions.
pub fn interpn<T: Float>(ndims: usize, vals: &[T], obs: &[&[T]], out: &mut [T]) -> Result<()> {
    CubicLattice::<'_, T, 8>::new(ndims, vals)?.interp(obs, out)
}

/// A validated lattice of 4^ndims samples, reusable across many evaluations.
///
/// MAXDIMS bounds the number of dimensions and sizes the fixed intermediate
/// storage used for batch evaluation; no allocation is done after `new`.
pub struct CubicLattice<'a, T: Float, const MAXDIMS: usize> {
    /// Number of dimensions
    ndims: usize,

    /// Values at each lattice point, size 4^ndims
    vals: &'a [T],
}

impl<'a, T: Float, const MAXDIMS: usize> CubicLattice<'a, T, MAXDIMS> {
    /// Check the lattice shape once so that later evaluations only need to
    /// check the observation points.
    ///
    /// # Errors
    /// * If `ndims` is zero or exceeds MAXDIMS
    /// * If `vals.len() != 4^ndims`
    pub fn new(ndims: usize, vals: &'a [T]) -> Result<Self> {
        if ndims > MAXDIMS {
            return Err(Error::InvalidInput("dimension count exceeds MAXDIMS"));
        }
        check_lattice(ndims, vals)?;

        Ok(Self { ndims, vals })
    }

    /// Number of dimensions of the lattice.
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If the number of coordinate slices does not match the lattice
    ///   * If any coordinate slice has a different length than `out`
    pub fn interp(&self, x: &[&[T]], out: &mut [T]) -> Result<()> {
        let n = out.len();
        let ndims = self.ndims;
        // Make sure there are enough coordinate inputs for each dimension
        if x.len() != ndims {
            return Err(Error::ShapeMismatch {
                expected: ndims,
                actual: x.len(),
            });
        }
        // Make sure the size of inputs and output match
        if let Some(xx) = x.iter().find(|xx| xx.len() != n) {
            return Err(Error::ShapeMismatch {
                expected: n,
                actual: xx.len(),
            });
        }

        let tmp = &mut [T::zero(); MAXDIMS][..ndims];
        for i in 0..n {
            (0..ndims).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(tmp)?;
        }

        Ok(())
    }

    /// Interpolate the value at a single point.
    ///
    /// # Errors
    ///   * If the dimensionality of the point does not match the lattice
    #[inline]
    pub fn interp_one(&self, x: &[T]) -> Result<T> {
        if x.len() != self.ndims {
            return Err(Error::ShapeMismatch {
                expected: self.ndims,
                actual: x.len(),
            });
        }

        Ok(collapse(self.vals, x[0], &x[1..]))
    }
}

fn check_lattice<T>(ndims: usize, samples: &[T]) -> Result<()> {
    let expected = lattice_len(ndims)?;
    if samples.len() != expected {
        return Err(Error::ShapeMismatch {
            expected,
            actual: samples.len(),
        });
    }
    Ok(())
}

/// Recursive evaluation, collapsing the leading dimension last.
///
/// `vals` must hold exactly 4^(rest.len() + 1) samples.
fn collapse<T: Float>(vals: &[T], t: T, rest: &[T]) -> T {
    let inner = match rest.split_first() {
        // If we have arrived at a single axis, the samples are the kernel inputs
        None => [vals[0], vals[1], vals[2], vals[3]],

        // Otherwise, collapse each of the 4 blocks along the remaining dimensions
        Some((&t_next, rest_next)) => {
            let stride = vals.len() / 4;
            let mut inner = [T::zero(); 4];
            for (v, block) in inner.iter_mut().zip(vals.chunks_exact(stride)) {
                *v = collapse(block, t_next, rest_next);
            }
            inner
        }
    };

    cubic_kernel(inner, t)
}
