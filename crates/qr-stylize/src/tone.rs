//! Luminance extraction, threshold binarization, and dithering.
//!
//! Every tone operation in this crate uses the same grayscale weighting,
//! `0.299 r + 0.587 g + 0.114 b` (ITU-R BT.601, not BT.709). Threshold and
//! dither outputs follow the BW convention: channel values are 0 or 255
//! replicated across R, G, B with alpha forced to 255.

use crate::buffer::PixelBuffer;
use crate::noise::Mulberry32;

/// The single grayscale formula used by every tone, mask, and threshold
/// operation: `0.299 r + 0.587 g + 0.114 b`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Binarize against a fixed threshold: luminance strictly above `threshold`
/// becomes white, everything else black. Alpha is forced to 255.
pub fn threshold_bw(buf: &PixelBuffer, threshold: u8) -> PixelBuffer {
    let t = threshold as f64;
    buf.map_pixels(|_, _, [r, g, b, _]| {
        let bw = if luminance(r, g, b) > t { 255 } else { 0 };
        [bw, bw, bw, 255]
    })
}

/// Random-threshold dithering: each pixel draws one uniform value from `rng`
/// and becomes white with probability `luminance / 255`.
///
/// Exactly one draw is consumed per pixel, in raster order, so a seeded
/// generator reproduces the same pattern. Chrominance is discarded.
pub fn random_dither(buf: &PixelBuffer, rng: &mut Mulberry32) -> PixelBuffer {
    buf.map_pixels(|_, _, [r, g, b, _]| {
        let white = rng.next_f64() < luminance(r, g, b) / 255.0;
        let bw = if white { 255 } else { 0 };
        [bw, bw, bw, 255]
    })
}

/// The brightness/contrast curve applied before dithering.
///
/// For gamma `g` in [-1, 1] the output gray is
/// `clamp((gray - 128) * (1 + |g|) + 128 + 128 * g, 0, 255)`: positive
/// values brighten and add contrast, negative values darken and add
/// contrast, 0 is the identity on mid-gray. Output is a grayscale buffer
/// with alpha 255.
pub fn adjust_brightness_contrast(buf: &PixelBuffer, gamma: f64) -> PixelBuffer {
    buf.map_pixels(|_, _, [r, g, b, _]| {
        let gray = luminance(r, g, b);
        let out = (gray - 128.0) * (1.0 + gamma.abs()) + 128.0 + gamma * 128.0;
        let v = out.round().clamp(0.0, 255.0) as u8;
        [v, v, v, 255]
    })
}

/// Floyd-Steinberg error-diffusion dithering to pure black/white.
///
/// The image is reduced to a floating-point luminance plane, then scanned in
/// raster order. Each pixel is binarized at 128 and the signed error is
/// pushed into not-yet-visited neighbors:
///
/// ```text
///        X   7
///    3   5   1      (all /16)
/// ```
///
/// Contributions that fall outside the buffer are dropped, not wrapped.
/// Raster order is load-bearing: later pixels read previously accumulated
/// error, so the scan must not be reordered or parallelized.
pub fn floyd_steinberg_dither(buf: &PixelBuffer) -> PixelBuffer {
    let width = buf.width() as usize;
    let height = buf.height() as usize;

    // Luminance working plane, one f64 per pixel.
    let mut plane: Vec<f64> = Vec::with_capacity(width * height);
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            let [r, g, b, _] = buf.pixel(x, y);
            plane.push(luminance(r, g, b));
        }
    }

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = plane[idx];
            let new = if old < 128.0 { 0.0 } else { 255.0 };
            let error = old - new;
            plane[idx] = new;

            if x + 1 < width {
                plane[idx + 1] += error * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    plane[idx + width - 1] += error * 3.0 / 16.0;
                }
                plane[idx + width] += error * 5.0 / 16.0;
                if x + 1 < width {
                    plane[idx + width + 1] += error * 1.0 / 16.0;
                }
            }
        }
    }

    let mut out = PixelBuffer::new(buf.width(), buf.height());
    for y in 0..height {
        for x in 0..width {
            let bw = if plane[y * width + x] < 128.0 { 0 } else { 255 };
            out.set_pixel(x as u32, y as u32, [bw, bw, bw, 255]);
        }
    }
    out
}
