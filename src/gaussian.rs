//! Gaussian densities, weights and kernels, a scalar Kalman update,
//! smoothing, and Gauss-Legendre quadrature.
use core::f64::consts::PI;

use crate::error::finite;
use crate::{Error, Result};

/// Probability density of a normal distribution with the given mean and
/// variance at `x`.
#[inline]
pub fn gaussian_pdf(x: f64, mean: f64, variance: f64) -> f64 {
    (1.0 / (2.0 * PI * variance).sqrt()) * (-(x - mean).powi(2) / (2.0 * variance)).exp()
}

/// Gaussian distance weight `exp(-d^2 / kappa^2)`, used by Barnes analysis.
///
/// Equals 1 at zero distance and decays towards 0 once `distance`
/// is a few multiples of `kappa`.
#[inline]
pub fn gaussian_weight(distance: f64, kappa: f64) -> f64 {
    (-(distance / kappa).powi(2)).exp()
}

/// Radial basis function similarity `exp(-(x1 - x2)^2 / (2 l^2))`.
#[inline]
pub fn gaussian_kernel(x1: f64, x2: f64, length_scale: f64) -> f64 {
    (-0.5 * ((x1 - x2) / length_scale).powi(2)).exp()
}

/// A scalar estimate and its variance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianState {
    pub mean: f64,
    pub variance: f64,
}

/// One measurement update of a scalar Kalman filter, followed by adding the
/// process noise for the next step.
///
/// # Errors
/// * If any input is not finite
/// * If any variance is negative, or prior and measurement variance are both zero
pub fn kalman_step(
    prior: GaussianState,
    measurement: f64,
    measurement_variance: f64,
    process_variance: f64,
) -> Result<GaussianState> {
    let x = finite(prior.mean, "prior mean must be finite")?;
    let p = finite(prior.variance, "prior variance must be finite")?;
    let z = finite(measurement, "measurement must be finite")?;
    let r = finite(measurement_variance, "measurement variance must be finite")?;
    let q = finite(process_variance, "process variance must be finite")?;
    if p < 0.0 || r < 0.0 || q < 0.0 {
        return Err(Error::InvalidInput("variances must be non-negative"));
    }
    if p + r == 0.0 {
        return Err(Error::InvalidInput(
            "prior and measurement variance cannot both be zero",
        ));
    }

    let gain = p / (p + r);
    Ok(GaussianState {
        mean: x + gain * (z - x),
        variance: (1.0 - gain) * p + q,
    })
}

/// Likelihood of `x` under independent per-feature normal distributions.
///
/// # Errors
/// * If `mean`, `variance` and `x` do not all have the same length
pub fn gaussian_naive_bayes(mean: &[f64], variance: &[f64], x: &[f64]) -> Result<f64> {
    for n in [mean.len(), variance.len()] {
        if n != x.len() {
            return Err(Error::ShapeMismatch {
                expected: x.len(),
                actual: n,
            });
        }
    }

    Ok(x.iter()
        .zip(mean)
        .zip(variance)
        .map(|((&xi, &m), &v)| gaussian_pdf(xi, m, v))
        .product())
}

/// Widest kernel [`gaussian_smoothing`] will sample, about sigma = 2.8e6
pub const MAX_KERNEL_TAPS: usize = 1 << 24;

/// Smooth a series by convolution with a sampled Gaussian.
///
/// The kernel has `ceil(6 sigma)` taps centered (rounding down) on the
/// current sample. Taps that fall outside the data are dropped, while the
/// normalization still uses the sum of the whole kernel, so values near the
/// ends are pulled towards zero.
///
/// # Errors
/// * If `sigma` is not positive and finite
/// * If the kernel would have more than [`MAX_KERNEL_TAPS`] taps
pub fn gaussian_smoothing(data: &[f64], sigma: f64) -> Result<Vec<f64>> {
    let sigma = finite(sigma, "sigma must be finite")?;
    if sigma <= 0.0 {
        return Err(Error::InvalidInput("sigma must be positive"));
    }
    let width = (6.0 * sigma).ceil();
    if width > MAX_KERNEL_TAPS as f64 {
        return Err(Error::InvalidInput("sigma is too large for a sampled kernel"));
    }

    let size = width as usize;
    let half = (size / 2) as isize;
    let variance = sigma * sigma;
    let kernel: Vec<f64> = (0..size as isize)
        .map(|i| gaussian_pdf((i - half) as f64, 0.0, variance))
        .collect();
    let norm: f64 = kernel.iter().sum();

    let n = data.len() as isize;
    let smoothed = (0..n)
        .map(|i| {
            let acc: f64 = kernel
                .iter()
                .enumerate()
                .filter_map(|(j, k)| {
                    let idx = i + j as isize - half;
                    (0..n).contains(&idx).then(|| data[idx as usize] * k)
                })
                .sum();
            acc / norm
        })
        .collect();

    Ok(smoothed)
}

/// Nodes and weights of an n-point Gauss-Legendre rule on [-1, 1].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quadrature {
    /// Roots of the degree-n Legendre polynomial, in descending order
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl Quadrature {
    /// Integrate `f` over `[a, b]` with this rule.
    ///
    /// Exact for polynomials up to degree `2n - 1`.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F, a: f64, b: f64) -> f64 {
        let half_width = (b - a) / 2.0;
        let center = (a + b) / 2.0;
        let sum: f64 = self
            .nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(center + half_width * x))
            .sum();
        sum * half_width
    }
}

/// Newton iteration stops once a step is smaller than this
const ROOT_TOLERANCE: f64 = 1e-10;

/// Iteration cap; the initial guesses converge in a handful of steps
const MAX_NEWTON_STEPS: usize = 100;

/// Compute an n-point Gauss-Legendre rule.
///
/// # Errors
/// * If `n` is zero
pub fn gaussian_quadrature(n: usize) -> Result<Quadrature> {
    if n == 0 {
        return Err(Error::InvalidInput("quadrature needs at least one node"));
    }

    let nf = n as f64;
    let nodes: Vec<f64> = (1..=n)
        .map(|i| {
            let mut x = (PI * (i as f64 - 0.25) / (nf + 0.5)).cos();
            for _ in 0..MAX_NEWTON_STEPS {
                let (p, dp) = legendre(n, x);
                let delta = p / dp;
                x -= delta;
                if delta.abs() <= ROOT_TOLERANCE {
                    break;
                }
            }
            x
        })
        .collect();

    let weights = nodes
        .iter()
        .map(|&x| {
            let (_, dp) = legendre(n, x);
            2.0 / ((1.0 - x * x) * dp * dp)
        })
        .collect();

    Ok(Quadrature { nodes, weights })
}

/// Legendre polynomial of degree `n >= 1` and its derivative at `x`,
/// by the three-term recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let (mut p_prev, mut p) = (1.0, x);
    for k in 2..=n {
        let kf = k as f64;
        let p_next = ((2.0 * kf - 1.0) * x * p - (kf - 1.0) * p_prev) / kf;
        p_prev = p;
        p = p_next;
    }
    let dp = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, dp)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pdf() {
        assert!((gaussian_pdf(0.0, 0.0, 1.0) - 0.3989422804).abs() < 1e-9);
        assert!((gaussian_pdf(1.0, 0.0, 1.0) - 0.2419707245).abs() < 1e-9);
        // Shifted and scaled
        assert!((gaussian_pdf(5.0, 5.0, 4.0) - 0.3989422804 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight() {
        assert_eq!(gaussian_weight(0.0, 3.0), 1.0);
        assert!((gaussian_weight(3.0, 3.0) - (-1.0_f64).exp()).abs() < 1e-15);
        assert!(gaussian_weight(1000.0, 3.0) < 1e-300);

        // Tiny smoothing lengths must not square to zero
        assert_eq!(gaussian_weight(0.0, 1e-200), 1.0);
        assert_eq!(gaussian_weight(1e-200, 1e-200), (-1.0_f64).exp());
        assert_eq!(gaussian_weight(1.0, 1e-200), 0.0);
        assert_eq!(gaussian_kernel(0.5, 0.5, 1e-200), 1.0);

        // Monotonic decay
        let w: Vec<f64> = (0..10).map(|d| gaussian_weight(d as f64, 2.0)).collect();
        assert!(w.windows(2).all(|p| p[1] < p[0]));
    }

    #[test]
    fn test_kernel() {
        assert_eq!(gaussian_kernel(0.0, 0.0, 1.0), 1.0);
        assert!((gaussian_kernel(0.0, 1.0, 1.0) - 0.6065306597).abs() < 1e-9);
        assert!((gaussian_kernel(0.0, 1.0, 2.0) - 0.8824969025).abs() < 1e-9);
        assert!((gaussian_kernel(0.0, 2.0, 2.0) - 0.6065306597).abs() < 1e-9);
    }

    #[test]
    fn test_kalman_step() {
        let prior = GaussianState {
            mean: 0.0,
            variance: 1.0,
        };
        let post = kalman_step(prior, 1.0, 1.0, 0.1).unwrap();
        assert!((post.mean - 0.5).abs() < 1e-12);
        assert!((post.variance - 0.6).abs() < 1e-12);

        // A perfect measurement replaces the prior
        let post = kalman_step(prior, 3.0, 0.0, 0.0).unwrap();
        assert_eq!(post.mean, 3.0);
        assert_eq!(post.variance, 0.0);
    }

    #[test]
    fn test_kalman_step_errors() {
        let prior = GaussianState {
            mean: 0.0,
            variance: 0.0,
        };
        assert!(kalman_step(prior, 1.0, 0.0, 0.1).is_err());
        assert!(kalman_step(prior, 1.0, -1.0, 0.1).is_err());
        assert!(kalman_step(prior, f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_naive_bayes() {
        let p = gaussian_naive_bayes(&[0.0, 0.0], &[1.0, 1.0], &[1.0, 1.0]).unwrap();
        assert!((p - 0.05854983).abs() < 1e-8);

        assert_eq!(
            gaussian_naive_bayes(&[0.0], &[1.0, 1.0], &[1.0, 1.0]),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(gaussian_naive_bayes(&[], &[], &[]), Ok(1.0));
    }

    #[test]
    fn test_smoothing() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = gaussian_smoothing(&data, 1.0).unwrap();
        assert_eq!(smoothed.len(), data.len());
        assert!(smoothed[2] > smoothed[1]);
    }

    #[test]
    fn test_smoothing_wide_kernel() {
        let data = [1.0, 2.0, 3.0];
        let smoothed = gaussian_smoothing(&data, 2.0).unwrap();
        assert_eq!(smoothed.len(), 3);
        assert!(smoothed.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_smoothing_constant_interior() {
        // Far from the ends a constant series is preserved
        let data = vec![2.0; 50];
        let smoothed = gaussian_smoothing(&data, 1.5).unwrap();
        assert!((smoothed[25] - 2.0).abs() < 1e-12);
        assert!(smoothed[0] < 2.0);
    }

    #[test]
    fn test_smoothing_errors() {
        assert!(gaussian_smoothing(&[1.0], 0.0).is_err());
        assert!(gaussian_smoothing(&[1.0], -1.0).is_err());
        assert!(gaussian_smoothing(&[1.0], f64::NAN).is_err());
        assert_eq!(gaussian_smoothing(&[], 1.0), Ok(vec![]));
    }

    #[test]
    fn test_smoothing_huge_sigma() {
        let data = [1.0, 2.0, 3.0];
        let too_wide = Err(Error::InvalidInput("sigma is too large for a sampled kernel"));
        assert_eq!(gaussian_smoothing(&data, 1e18), too_wide);
        assert_eq!(gaussian_smoothing(&data, 1e300), too_wide);
        assert_eq!(gaussian_smoothing(&data, 1e7), too_wide);

        // Wide but samplable kernels still give finite output
        let smoothed = gaussian_smoothing(&data, 1000.0).unwrap();
        assert!(smoothed.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn test_quadrature_three_point() {
        let q = gaussian_quadrature(3).unwrap();
        assert_eq!(q.nodes.len(), 3);
        assert_eq!(q.weights.len(), 3);
        assert!(q.weights.iter().all(|&w| w > 0.0));

        let r = (3.0_f64 / 5.0).sqrt();
        let expected_nodes = [r, 0.0, -r];
        let expected_weights = [5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0];
        for i in 0..3 {
            assert!((q.nodes[i] - expected_nodes[i]).abs() < 1e-10);
            assert!((q.weights[i] - expected_weights[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn test_quadrature_exact_for_polynomials() {
        for n in 1..=8 {
            let q = gaussian_quadrature(n).unwrap();

            // Weights sum to the length of [-1, 1]
            let total: f64 = q.weights.iter().sum();
            assert!((total - 2.0).abs() < 1e-10);

            // Highest degree integrated exactly is 2n - 1
            let deg = (2 * n - 1) as i32;
            let v = q.integrate(|x| x.powi(deg) + x.powi(deg - 1), 0.0, 1.0);
            let expected = 1.0 / (deg + 1) as f64 + 1.0 / deg as f64;
            assert!((v - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn test_quadrature_rejects_zero() {
        assert!(gaussian_quadrature(0).is_err());
    }
}
