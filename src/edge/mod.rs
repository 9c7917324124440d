//! Sobel edge detection on 8-bit RGBA buffers and binary PPM images.
//!
//! Colour is reduced to luma with `round(0.3 r + 0.59 g + 0.11 b)`, and the
//! gradient magnitude `sqrt(gx^2 + gy^2)` of the 3x3 Sobel operator is
//! computed for every interior pixel. Border pixels have no full
//! neighbourhood and are written black.
//!
//! ```rust
//! use numtools::edge::{detect_edges_rgba, EdgeOptions, RgbaImage};
//!
//! // Top two rows white, bottom row black
//! let mut data = vec![255_u8; 3 * 3 * 4];
//! for px in data[24..].chunks_exact_mut(4) {
//!     px[..3].fill(0);
//! }
//! let img = RgbaImage::new(3, 3, data).unwrap();
//! let edges = detect_edges_rgba(&img, &EdgeOptions::default());
//! assert_eq!(edges.pixel(1, 1), [255, 255, 255, 255]);
//! assert_eq!(edges.pixel(0, 0), [0, 0, 0, 255]);
//! ```
use crate::{Error, Result};

mod ppm;
pub use ppm::{detect_edges_ppm, PpmImage};

/// Post-processing of the raw gradient magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeOptions {
    /// Binarize the output: magnitudes below this become 0, the rest 255.
    /// Without a threshold, magnitudes are clamped to 255.
    pub threshold: Option<u8>,
}

impl EdgeOptions {
    fn apply(&self, magnitude: f64) -> u8 {
        let v = magnitude.min(255.0);
        match self.threshold {
            Some(t) if v < f64::from(t) => 0,
            Some(_) => 255,
            None => v.round_ties_even() as u8,
        }
    }
}

/// Perceptual luma of an RGB triple.
#[inline]
pub fn grayscale(r: u8, g: u8, b: u8) -> u8 {
    (0.3 * f64::from(r) + 0.59 * f64::from(g) + 0.11 * f64::from(b))
        .round()
        .min(255.0) as u8
}

/// Sobel edge magnitude of a row-major grayscale buffer.
///
/// Border pixels are 0. Images narrower or shorter than 3 pixels have no
/// interior and come back all 0.
pub fn sobel(gray: &[u8], width: usize, height: usize, opts: &EdgeOptions) -> Vec<u8> {
    let mut out = vec![0_u8; width * height];
    if width < 3 || height < 3 {
        return out;
    }

    let g = |x: usize, y: usize| -> f64 { f64::from(gray[y * width + x]) };
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = -g(x - 1, y - 1) - 2.0 * g(x - 1, y) - g(x - 1, y + 1)
                + g(x + 1, y - 1)
                + 2.0 * g(x + 1, y)
                + g(x + 1, y + 1);
            let gy = -g(x - 1, y - 1) - 2.0 * g(x, y - 1) - g(x + 1, y - 1)
                + g(x - 1, y + 1)
                + 2.0 * g(x, y + 1)
                + g(x + 1, y + 1);
            out[y * width + x] = opts.apply(gx.hypot(gy));
        }
    }

    out
}

/// Row-major 8-bit RGBA pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wrap an RGBA buffer.
    ///
    /// # Errors
    /// * If `data.len() != width * height * 4`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(Error::InvalidInput("image dimensions overflow"))?;
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at column `x`, row `y`.
    ///
    /// # Panics
    /// If the pixel is out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Edge map of an RGBA image, as an opaque grey RGBA image of the same size.
///
/// The source alpha channel is ignored.
pub fn detect_edges_rgba(img: &RgbaImage, opts: &EdgeOptions) -> RgbaImage {
    let gray: Vec<u8> = img
        .data
        .chunks_exact(4)
        .map(|px| grayscale(px[0], px[1], px[2]))
        .collect();
    let edges = sobel(&gray, img.width, img.height, opts);

    let data = edges.iter().flat_map(|&e| [e, e, e, 255]).collect();
    RgbaImage {
        width: img.width,
        height: img.height,
        data,
    }
}
