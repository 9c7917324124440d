//! Great-circle distance and bearing on a spherical Earth, and random
//! sampling of points around a location.
use core::f64::consts::PI;

use rand::Rng;

use crate::error::finite;
use crate::units::KM_PER_DEGREE;
use crate::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic location in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Great-circle distance in kilometres between two points given in degrees,
/// by the haversine formula.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing in degrees, in [0, 360), of the great circle from the
/// first point to the second.
///
/// The longitude difference is wrapped to [-180, 180] degrees first, so the
/// bearing always follows the shorter way around, including across the
/// antimeridian. Identical points give 0.
pub fn azimuth(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());

    let mut dlon = (lon2 - lon1).to_radians();
    if dlon > PI {
        dlon -= 2.0 * PI;
    } else if dlon < -PI {
        dlon += 2.0 * PI;
    }

    let y = dlon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Map an angle in degrees to [0, 360).
#[inline]
pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    let d = (deg + 360.0) % 360.0;
    // -1e-20 + 360 rounds to 360
    if d >= 360.0 {
        d - 360.0
    } else {
        d
    }
}

/// Draw a point uniformly from a disc of `radius_km` around `center`.
///
/// The disc is laid out in degrees with the same 111 km per degree
/// approximation as [`kilometers_to_degrees`](crate::units::kilometers_to_degrees),
/// so it is only accurate for radii well below the Earth radius and away
/// from the poles.
///
/// # Errors
/// * If `center` is not finite
/// * If `radius_km` is negative or not finite
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, center: LatLon, radius_km: f64) -> Result<LatLon> {
    check_disc(center, radius_km)?;
    Ok(sample_disc(rng, center, radius_km))
}

fn check_disc(center: LatLon, radius_km: f64) -> Result<()> {
    if !center.is_finite() {
        return Err(Error::InvalidInput("center must be finite"));
    }
    if !(finite(radius_km, "radius must be finite")? >= 0.0) {
        return Err(Error::InvalidInput("radius must be non-negative"));
    }
    Ok(())
}

fn sample_disc<R: Rng + ?Sized>(rng: &mut R, center: LatLon, radius_km: f64) -> LatLon {
    // Radius of the disc measured in degrees of latitude
    let r_deg = radius_km / KM_PER_DEGREE;

    // sqrt keeps the density uniform over the area
    let w = r_deg * rng.gen::<f64>().sqrt();
    let theta = 2.0 * PI * rng.gen::<f64>();

    LatLon {
        lat: center.lat + w * theta.cos(),
        lon: center.lon + w * theta.sin() / center.lat.to_radians().cos(),
    }
}

/// Distances of random points from a center, with their mean and the
/// mean + k standard deviations marks for k = 0..=3.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceSpread {
    pub distances: Vec<f64>,
    pub mean: f64,
    pub boundaries: [f64; 4],
}

/// Share of random points, in percent, that fall into each ring between
/// consecutive `boundaries` (the first ring starts at the center).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingProbabilities {
    pub boundaries: [f64; 4],
    pub probabilities: [f64; 4],
}

/// Sample `n` points in a disc around `center` and summarize how far they
/// land from it. The standard deviation is the population one.
///
/// # Errors
/// * If `n` is zero
/// * If `center` or `radius_km` are invalid, as for [`random_point`]
pub fn distance_spread<R: Rng + ?Sized>(
    rng: &mut R,
    center: LatLon,
    radius_km: f64,
    n: usize,
) -> Result<DistanceSpread> {
    let distances = sample_distances(rng, center, radius_km, n)?;
    let (mean, boundaries) = sigma_marks(&distances);

    Ok(DistanceSpread {
        distances,
        mean,
        boundaries,
    })
}

/// Sample `n` points in a disc around `center` and report what percentage of
/// them falls in each ring `(0, b0]`, `(b0, b1]`, `(b1, b2]`, `(b2, b3]`, where
/// the `b` are the mean + k standard deviation marks of their distances.
///
/// # Errors
/// * If `n` is zero
/// * If `center` or `radius_km` are invalid, as for [`random_point`]
pub fn ring_probabilities<R: Rng + ?Sized>(
    rng: &mut R,
    center: LatLon,
    radius_km: f64,
    n: usize,
) -> Result<RingProbabilities> {
    let mut distances = sample_distances(rng, center, radius_km, n)?;
    distances.sort_by(f64::total_cmp);
    let (_, boundaries) = sigma_marks(&distances);

    let mut probabilities = [0.0; 4];
    let mut inside_prev = 0;
    for (p, &b) in probabilities.iter_mut().zip(boundaries.iter()) {
        let inside = distances.partition_point(|&d| d <= b);
        *p = (inside - inside_prev) as f64 / n as f64 * 100.0;
        inside_prev = inside;
    }

    Ok(RingProbabilities {
        boundaries,
        probabilities,
    })
}

fn sample_distances<R: Rng + ?Sized>(
    rng: &mut R,
    center: LatLon,
    radius_km: f64,
    n: usize,
) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(Error::InvalidInput("at least one sample point required"));
    }
    check_disc(center, radius_km)?;

    Ok((0..n)
        .map(|_| {
            let p = sample_disc(rng, center, radius_km);
            haversine_distance(center.lat, center.lon, p.lat, p.lon)
        })
        .collect())
}

/// Mean and [mean, mean + σ, mean + 2σ, mean + 3σ] of a non-empty sample.
fn sigma_marks(x: &[f64]) -> (f64, [f64; 4]) {
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let variance = x.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let sd = variance.sqrt();

    (mean, [mean, mean + sd, mean + 2.0 * sd, mean + 3.0 * sd])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_haversine_self_distance() {
        for &(lat, lon) in &[(0.0, 0.0), (32.09, -81.12), (-45.0, 170.0), (89.9, 0.0)] {
            assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_haversine_known() {
        // One degree of longitude on the equator
        let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01);

        // First two Savannah towers are about 2.4 km apart
        let s = savannah_stations();
        let d = haversine_distance(s[0].lat, s[0].lon, s[1].lat, s[1].lon);
        assert!((d - 2.4).abs() < 0.05);

        // Symmetric
        let back = haversine_distance(s[1].lat, s[1].lon, s[0].lat, s[0].lon);
        assert!((d - back).abs() < 1e-12);
    }

    #[test]
    fn test_azimuth_cardinal() {
        assert_eq!(azimuth(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!(azimuth(0.0, 0.0, 1.0, 0.0).abs() < 1e-9);
        assert!((azimuth(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((azimuth(0.0, 0.0, -1.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((azimuth(0.0, 0.0, 0.0, -1.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_azimuth_antimeridian() {
        // Shorter way from 179E to 179W is eastward
        assert!((azimuth(0.0, 179.0, 0.0, -179.0) - 90.0).abs() < 1e-6);
        assert!((azimuth(0.0, -179.0, 0.0, 179.0) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_poles_and_diagonals() {
        assert!((azimuth(90.0, 0.0, 80.0, 0.0) - 180.0).abs() < 1e-6);
        assert!(azimuth(-90.0, 0.0, -80.0, 0.0).abs() < 1e-6);

        let b = azimuth(10.0, 10.0, 20.0, 20.0);
        assert!(b > 40.0 && b < 50.0);

        let b = azimuth(-10.0, -10.0, -20.0, -30.0);
        assert!((0.0..360.0).contains(&b));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
    }

    #[test]
    fn test_random_point_within_radius() {
        let mut rng = rng_fixed_seed();
        let center = LatLon::new(51.5074, -0.1278);
        for _ in 0..1000 {
            let p = random_point(&mut rng, center, 10.0).unwrap();
            let d = haversine_distance(center.lat, center.lon, p.lat, p.lon);
            // 111 km per degree is slightly short of the true arc length
            assert!(d <= 10.0 * 1.01);
        }
    }

    #[test]
    fn test_random_point_rejects_bad_radius() {
        let mut rng = rng_fixed_seed();
        let center = LatLon::new(0.0, 0.0);
        assert!(random_point(&mut rng, center, -1.0).is_err());
        assert!(random_point(&mut rng, center, f64::NAN).is_err());
        assert!(random_point(&mut rng, LatLon::new(f64::NAN, 0.0), 1.0).is_err());
        assert_eq!(random_point(&mut rng, center, 0.0).unwrap(), center);
    }

    #[test]
    fn test_distance_spread() {
        let mut rng = rng_fixed_seed();
        let spread = distance_spread(&mut rng, LatLon::new(40.7128, -74.006), 20.0, 1000).unwrap();

        assert_eq!(spread.distances.len(), 1000);
        assert!(spread.mean > 0.0);
        assert_eq!(spread.boundaries[0], spread.mean);
        assert!(spread.boundaries[1] > spread.mean);
        // Uniform disc: mean distance is 2/3 of the radius
        assert!((spread.mean - 20.0 * 2.0 / 3.0).abs() < 1.0);

        assert!(distance_spread(&mut rng, LatLon::new(0.0, 0.0), 1.0, 0).is_err());
    }

    #[test]
    fn test_ring_probabilities() {
        let mut rng = rng_fixed_seed();
        let rings =
            ring_probabilities(&mut rng, LatLon::new(34.0522, -118.2437), 50.0, 500).unwrap();

        assert_eq!(rings.boundaries.len(), 4);
        let total: f64 = rings.probabilities.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(rings.probabilities.iter().all(|&p| p >= 0.0));
    }
}
