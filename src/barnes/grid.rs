//! Sweep a Barnes interpolation over a regular latitude/longitude grid.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{barnes_interpolation, check_kappa, components_to_wind, KnownPoint};
use crate::error::finite;
use crate::geodesy::LatLon;
use crate::units::KM_PER_DEGREE;
use crate::utils::{arange_inclusive, arange_len};
use crate::{Error, Result};

/// Largest number of nodes [`barnes_grid`] will lay out.
pub const MAX_GRID_NODES: usize = 1 << 26;

/// Inclusive rectangle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl GridBounds {
    fn validate(&self) -> Result<()> {
        for v in [self.min_lat, self.min_lon, self.max_lat, self.max_lon] {
            finite(v, "grid bounds must be finite")?;
        }
        if self.min_lat > self.max_lat || self.min_lon > self.max_lon {
            return Err(Error::InvalidInput("grid bounds are inverted"));
        }
        if self.min_lat < -90.0 || self.max_lat > 90.0 {
            return Err(Error::InvalidInput("grid latitudes must be within [-90, 90]"));
        }
        Ok(())
    }
}

/// Interpolated wind at one grid node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
    pub magnitude: f64,
    pub direction: f64,
}

/// Interpolate the wind at every node of a grid spanning `bounds`.
///
/// Nodes are spaced `grid_size_km / 111` degrees in latitude and
/// `grid_size_km / (111 cos(min_lat))` degrees in longitude, starting at the
/// minimum corner and including the maximum edge when it falls on a node.
/// The output is row-major with latitude as the outer loop.
///
/// With no stations there is nothing to interpolate from, and every node is
/// returned with NaN magnitude and direction.
///
/// # Errors
/// * If `bounds` are not finite, inverted, or outside [-90, 90] latitude
/// * If `grid_size_km` is not positive and finite
/// * If the grid would have more than [`MAX_GRID_NODES`] nodes
/// * If `kappa` is not positive and finite
/// * If any station is invalid, as for [`barnes_interpolation`]
pub fn barnes_grid(
    points: &[KnownPoint],
    bounds: &GridBounds,
    grid_size_km: f64,
    kappa: f64,
    passes: usize,
) -> Result<Vec<GridPoint>> {
    bounds.validate()?;
    let grid_size_km = finite(grid_size_km, "grid size must be finite")?;
    if grid_size_km <= 0.0 {
        return Err(Error::InvalidInput("grid size must be positive"));
    }
    check_kappa(kappa)?;

    let lat_step = grid_size_km / KM_PER_DEGREE;
    let lon_step = grid_size_km / (KM_PER_DEGREE * bounds.min_lat.to_radians().cos());

    let n_lat = arange_len(bounds.min_lat, bounds.max_lat, lat_step);
    let n_lon = arange_len(bounds.min_lon, bounds.max_lon, lon_step);
    let n_nodes = n_lat
        .zip(n_lon)
        .and_then(|(a, b)| a.checked_mul(b))
        .filter(|&n| n <= MAX_GRID_NODES);
    if n_nodes.is_none() {
        return Err(Error::InvalidInput("grid has too many nodes"));
    }

    let lats = arange_inclusive(bounds.min_lat, bounds.max_lat, lat_step)?;
    let lons = arange_inclusive(bounds.min_lon, bounds.max_lon, lon_step)?;
    let nodes: Vec<LatLon> = lats
        .iter()
        .flat_map(|&lat| lons.iter().map(move |&lon| LatLon::new(lat, lon)))
        .collect();

    log::debug!(
        "Barnes grid: {} x {} nodes, {} stations",
        lats.len(),
        lons.len(),
        points.len()
    );

    if points.is_empty() {
        log::warn!("Barnes grid has no stations; every node is NaN");
        return Ok(nodes
            .into_iter()
            .map(|n| GridPoint {
                lat: n.lat,
                lon: n.lon,
                magnitude: f64::NAN,
                direction: f64::NAN,
            })
            .collect());
    }

    let node = |n: &LatLon| -> Result<GridPoint> {
        let est = barnes_interpolation(points, *n, kappa, passes)?;
        let (magnitude, direction) = components_to_wind(est.components);
        Ok(GridPoint {
            lat: n.lat,
            lon: n.lon,
            magnitude,
            direction,
        })
    };

    #[cfg(feature = "parallel")]
    let iter = nodes.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = nodes.iter();

    iter.map(node).collect()
}
