//! Barnes objective analysis of a wind field from scattered stations.
//!
//! Each station's wind is split into east and north components, and the
//! estimate at a target location is the average of those components
//! weighted by a Gaussian of the great-circle distance to the target.
//!
//! ```rust
//! use numtools::barnes::{barnes_interpolation, components_to_wind, KnownPoint};
//! use numtools::geodesy::LatLon;
//!
//! let stations = [
//!     KnownPoint { lat: 32.09, lon: -81.10, magnitude: 20.0, direction: 0.0 },
//!     KnownPoint { lat: 32.08, lon: -81.11, magnitude: 20.0, direction: 0.0 },
//! ];
//! let est = barnes_interpolation(&stations, LatLon::new(32.085, -81.105), 3.0, 1).unwrap();
//! let (speed, direction) = components_to_wind(est.components);
//! assert!((speed - 20.0).abs() < 1e-9);
//! assert!(direction < 1e-6 || direction > 360.0 - 1e-6);
//! ```
use crate::error::finite;
use crate::gaussian::gaussian_weight;
use crate::geodesy::{haversine_distance, normalize_degrees, LatLon};
use crate::{Error, Result};

pub mod grid;
pub use grid::{barnes_grid, GridBounds, GridPoint};

/// Total weight below which the weighted average is considered degenerate
pub const WEIGHT_TOLERANCE: f64 = 1e-10;

/// A station observation: position in degrees, wind speed, and the
/// direction in degrees clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownPoint {
    pub lat: f64,
    pub lon: f64,
    pub magnitude: f64,
    pub direction: f64,
}

/// Cartesian wind vector, in the same speed unit as the magnitude it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindComponents {
    pub east: f64,
    pub north: f64,
}

/// Recoverable conditions reported alongside an estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// Every station is so far from the target that the weights sum to
    /// less than [`WEIGHT_TOLERANCE`]; the estimate was set to zero.
    NumericDegeneracy { total_weight: f64 },
}

/// Result of a Barnes interpolation at a single target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarnesEstimate {
    pub components: WindComponents,
    pub total_weight: f64,
    pub diagnostic: Option<Diagnostic>,
}

/// Split a wind into east and north components.
///
/// # Errors
/// * If `magnitude` is negative or not finite
/// * If `direction` is not finite or outside [0, 360)
pub fn wind_to_components(magnitude: f64, direction: f64) -> Result<WindComponents> {
    let magnitude = finite(magnitude, "wind magnitude must be finite")?;
    let direction = finite(direction, "wind direction must be finite")?;
    if magnitude < 0.0 {
        return Err(Error::InvalidInput("wind magnitude must be non-negative"));
    }
    if !(0.0..360.0).contains(&direction) {
        return Err(Error::InvalidInput("wind direction must be in [0, 360)"));
    }

    let (sin, cos) = direction.to_radians().sin_cos();
    Ok(WindComponents {
        east: magnitude * sin,
        north: magnitude * cos,
    })
}

/// Recombine components into `(magnitude, direction)`, direction in [0, 360).
///
/// NaN components give NaN for both.
pub fn components_to_wind(c: WindComponents) -> (f64, f64) {
    let magnitude = c.east.hypot(c.north);
    let direction = normalize_degrees(c.east.atan2(c.north).to_degrees());
    (magnitude, direction)
}

/// Estimate the wind at `target` from `points`.
///
/// Each station is weighted by [`gaussian_weight`] of its haversine distance
/// in kilometres, with `kappa` in kilometres as the smoothing length.
///
/// `passes` is clamped to at least 1. No residual correction is applied
/// between passes, so every pass reproduces the first and the result does
/// not depend on `passes`.
///
/// If the weights sum to less than [`WEIGHT_TOLERANCE`], or to NaN, the
/// components are zero and the estimate carries [`Diagnostic::NumericDegeneracy`].
///
/// # Errors
/// * If `points` is empty
/// * If `target` is not finite
/// * If `kappa` is not positive and finite
/// * If any station has non-finite coordinates or an invalid wind
pub fn barnes_interpolation(
    points: &[KnownPoint],
    target: LatLon,
    kappa: f64,
    passes: usize,
) -> Result<BarnesEstimate> {
    if points.is_empty() {
        return Err(Error::InvalidInput("at least one known point is required"));
    }
    if !target.is_finite() {
        return Err(Error::InvalidInput("target coordinates must be finite"));
    }
    check_kappa(kappa)?;

    // Validate everything before accumulating
    let stations = points
        .iter()
        .map(|p| {
            if !(p.lat.is_finite() && p.lon.is_finite()) {
                return Err(Error::InvalidInput("station coordinates must be finite"));
            }
            Ok((p, wind_to_components(p.magnitude, p.direction)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut estimate = weighted_average(&stations, target, kappa);
    for _ in 1..passes.max(1) {
        estimate = weighted_average(&stations, target, kappa);
    }

    if let Some(Diagnostic::NumericDegeneracy { total_weight }) = estimate.diagnostic {
        log::warn!(
            "Barnes weights sum to {total_weight:e} at ({}, {}); returning zero wind",
            target.lat,
            target.lon
        );
    }

    Ok(estimate)
}

fn weighted_average(
    stations: &[(&KnownPoint, WindComponents)],
    target: LatLon,
    kappa: f64,
) -> BarnesEstimate {
    let (mut east, mut north, mut total_weight) = (0.0, 0.0, 0.0);
    for (p, c) in stations {
        let d = haversine_distance(p.lat, p.lon, target.lat, target.lon);
        let w = gaussian_weight(d, kappa);
        east += c.east * w;
        north += c.north * w;
        total_weight += w;
    }

    if total_weight.is_nan() || total_weight < WEIGHT_TOLERANCE {
        return BarnesEstimate {
            components: WindComponents::default(),
            total_weight,
            diagnostic: Some(Diagnostic::NumericDegeneracy { total_weight }),
        };
    }

    BarnesEstimate {
        components: WindComponents {
            east: east / total_weight,
            north: north / total_weight,
        },
        total_weight,
        diagnostic: None,
    }
}

pub(crate) fn check_kappa(kappa: f64) -> Result<f64> {
    let kappa = finite(kappa, "kappa must be finite")?;
    if kappa <= 0.0 {
        return Err(Error::InvalidInput("kappa must be positive"));
    }
    Ok(kappa)
}
