//! Small numerical toolkit built around two interpolators: cubic
//! interpolation on lattices of any dimension, and Barnes objective analysis
//! of scattered wind observations. Supporting modules cover unit conversion,
//! great-circle geodesy, Gaussian statistics, Sobel edge detection and
//! binary search.
//!
//! # Performance Scalings
//! A cubic interpolation in N dimensions draws on 4^N lattice samples, and
//! the recursive evaluation touches each of them once, so the cost of a
//! single point grows as O(4^ndims). Batch evaluation with
//! [`CubicLattice`] uses fixed-size scratch storage and does not allocate.
//!
//! Barnes interpolation visits every station for each target, so a grid
//! sweep costs O(stations * nodes). With the `parallel` feature the sweep
//! is spread over a `rayon` thread pool.
//!
//! | Method                          | RAM        | Cost per point    |
//! |---------------------------------|------------|-------------------|
//! | multicubic::cubic_interpolate   | O(1)       | O(1)              |
//! | multicubic::lattice             | O(ndims)   | O(4^ndims)        |
//! | barnes::barnes_interpolation    | O(stations)| O(stations)       |
//!
//! # Example: Cubic interpolation on a 3D lattice
//! ```rust
//! use numtools::multicubic::{tricubic_interpolate, CubicLattice};
//!
//! // f(i, j, k) = i + 2j + 3k at relative indices -1..=2
//! let f = |i: usize, j: usize, k: usize| (i + 2 * j + 3 * k) as f64 - 6.0;
//! let grid: Vec<Vec<Vec<f64>>> = (0..4)
//!     .map(|i| (0..4).map(|j| (0..4).map(|k| f(i, j, k)).collect()).collect())
//!     .collect();
//! let flat: Vec<f64> = grid.iter().flatten().flatten().copied().collect();
//!
//! let a = tricubic_interpolate(&grid, 0.5, 0.5, 0.5).unwrap();
//! let b = CubicLattice::<'_, f64, 3>::new(3, &flat)
//!     .unwrap()
//!     .interp_one(&[0.5, 0.5, 0.5])
//!     .unwrap();
//! assert!((a - 3.0).abs() < 1e-12);
//! assert_eq!(a, b);
//! ```
//!
//! # Example: Barnes wind grid
//! ```rust
//! use numtools::barnes::{barnes_grid, GridBounds, KnownPoint};
//!
//! let stations = [
//!     KnownPoint { lat: 32.096, lon: -81.095, magnitude: 22.0, direction: 358.0 },
//!     KnownPoint { lat: 32.060, lon: -81.100, magnitude: 20.0, direction: 294.0 },
//! ];
//! let bounds = GridBounds { min_lat: 32.05, min_lon: -81.13, max_lat: 32.10, max_lon: -81.05 };
//!
//! let grid = barnes_grid(&stations, &bounds, 5.0, 3.0, 1).unwrap();
//! assert_eq!(grid.len(), 4);
//! assert!(grid.iter().all(|p| p.magnitude > 0.0));
//! ```
//!
//! # Logging
//! Diagnostics go through the `log` facade; install any logger to see them.
//! Barnes weight degeneracy and empty station lists are reported at `warn`.
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod error;
pub use error::{Error, Result};

pub mod units;

pub mod geodesy;
pub use geodesy::LatLon;

pub mod gaussian;

pub mod multicubic;
pub use multicubic::{interpn, CubicLattice};

pub mod barnes;
pub use barnes::{barnes_grid, barnes_interpolation, KnownPoint};

pub mod edge;

pub mod search;

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
