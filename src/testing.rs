use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::barnes::KnownPoint;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    std::iter::repeat_with(|| rng.gen::<T>()).take(n).collect()
}

/// Wind sensor towers around Savannah, GA: (lat, lon, speed [kn], direction [deg]).
const SAVANNAH: [(f64, f64, f64, f64); 27] = [
    (32.096, -81.095, 22.0, 358.0),
    (32.095, -81.12, 28.0, 345.0),
    (32.093, -81.085, 24.0, 348.0),
    (32.0915, -81.111, 280.0, 347.0),
    (32.09, -81.13, 26.0, 345.0),
    (32.0865, -81.106, 21.0, 340.0),
    (32.085, -81.08, 21.0, 337.0),
    (32.0835, -81.0998, 24.0, 349.0),
    (32.082, -81.118, 27.0, 350.0),
    (32.0785, -81.135, 25.0, 330.0),
    (32.0765, -81.11, 23.0, 353.0),
    (32.0745, -81.089, 26.0, 343.0),
    (32.075, -81.127, 20.0, 325.0),
    (32.0725, -81.07, 25.0, 300.0),
    (32.07, -81.12, 26.0, 345.0),
    (32.0675, -81.098, 24.0, 320.0),
    (32.066, -81.113, 22.0, 297.0),
    (32.065, -81.06, 24.0, 310.0),
    (32.063, -81.07, 23.0, 300.0),
    (32.062, -81.088, 23.0, 305.0),
    (32.06, -81.1, 20.0, 294.0),
    (32.06, -81.055, 27.0, 290.0),
    (32.058, -81.105, 27.0, 300.0),
    (32.057, -81.08, 21.0, 315.0),
    (32.055, -81.05, 26.0, 294.0),
    (32.052, -81.065, 25.0, 307.0),
    (32.05, -81.06, 22.0, 290.0),
];

/// The Savannah sensor set as Barnes stations
pub fn savannah_stations() -> Vec<KnownPoint> {
    SAVANNAH
        .iter()
        .map(|&(lat, lon, magnitude, direction)| KnownPoint {
            lat,
            lon,
            magnitude,
            direction,
        })
        .collect()
}

/// Route `log` output through the test harness; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
