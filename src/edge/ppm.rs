//! Binary (P6) PPM codec.
use super::{grayscale, sobel, EdgeOptions};
use crate::{Error, Result};

const NOT_P6: Error = Error::UnsupportedFormat("Only P6 PPM images are supported");

/// An 8-bit RGB image decoded from P6 PPM bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PpmImage {
    pub width: usize,
    pub height: usize,
    /// Row-major RGB triples
    pub pixels: Vec<u8>,
}

impl PpmImage {
    /// Parse a binary PPM.
    ///
    /// The header is the magic `P6` followed by width, height and maxval,
    /// separated by any whitespace, with `#` comments running to the end of
    /// the line. A single whitespace byte separates the header from the
    /// pixel data. Sample values are taken as they are, without rescaling
    /// from maxval. Bytes past the last pixel are ignored.
    ///
    /// # Errors
    /// * [`Error::UnsupportedFormat`] if the magic is not `P6` or maxval exceeds 255
    /// * [`Error::InvalidInput`] if the header is malformed or the pixel data is short
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut h = Header { bytes, pos: 0 };
        if h.token() != Some(&b"P6"[..]) {
            return Err(NOT_P6);
        }
        let width = h.number()?;
        let height = h.number()?;
        let maxval = h.number()?;
        if maxval == 0 {
            return Err(Error::InvalidInput("PPM maxval must be positive"));
        }
        if maxval > 255 {
            return Err(Error::UnsupportedFormat(
                "PPM images with more than 8 bits per sample are not supported",
            ));
        }
        // Single separator before the raster
        match bytes.get(h.pos) {
            Some(b) if b.is_ascii_whitespace() => h.pos += 1,
            _ => return Err(Error::InvalidInput("malformed PPM header")),
        }

        let n = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(Error::InvalidInput("PPM dimensions overflow"))?;
        let raster = &bytes[h.pos..];
        if raster.len() < n {
            return Err(Error::InvalidInput("PPM pixel data is shorter than the header declares"));
        }

        Ok(Self {
            width,
            height,
            pixels: raster[..n].to_vec(),
        })
    }

    /// Serialize with a minimal `P6\n{width} {height}\n255\n` header.
    pub fn encode(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.pixels);
        out
    }
}

/// Header tokenizer
struct Header<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    /// Next whitespace-delimited token, skipping comments
    fn token(&mut self) -> Option<&'a [u8]> {
        loop {
            match self.bytes.get(self.pos)? {
                b if b.is_ascii_whitespace() => self.pos += 1,
                b'#' => {
                    while self.bytes.get(self.pos).is_some_and(|&b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        Some(&self.bytes[start..self.pos])
    }

    fn number(&mut self) -> Result<usize> {
        let bad = Error::InvalidInput("malformed PPM header");
        let tok = self.token().ok_or(bad)?;
        core::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(bad)
    }
}

/// Run Sobel edge detection on a P6 PPM and return the edge map as a P6 PPM
/// of the same size, grey level repeated in all three channels.
///
/// Border pixels are 0.
pub fn detect_edges_ppm(bytes: &[u8], opts: &EdgeOptions) -> Result<Vec<u8>> {
    let img = PpmImage::decode(bytes)?;
    log::debug!("PPM edge detection on {}x{} image", img.width, img.height);

    let gray: Vec<u8> = img
        .pixels
        .chunks_exact(3)
        .map(|px| grayscale(px[0], px[1], px[2]))
        .collect();
    let edges = sobel(&gray, img.width, img.height, opts);

    let out = PpmImage {
        width: img.width,
        height: img.height,
        pixels: edges.iter().flat_map(|&e| [e, e, e]).collect(),
    };
    Ok(out.encode())
}
