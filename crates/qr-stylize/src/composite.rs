//! Compositing: opaque-pixel overlay and the diagonal shine gradient.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::error::StylizeError;

/// Stamp `over` onto `base`: wherever `over` has alpha > 0, its full RGBA
/// pixel replaces the base pixel (no alpha blending). Transparent pixels of
/// `over` leave the base untouched.
///
/// Fails with [`StylizeError::SizeMismatch`] when dimensions differ.
pub fn overlay(base: &PixelBuffer, over: &PixelBuffer) -> Result<PixelBuffer, StylizeError> {
    if !base.same_dimensions(over) {
        return Err(base.size_mismatch(over));
    }
    Ok(base.map_pixels(|x, y, px| {
        let op = over.pixel(x, y);
        if op[3] > 0 {
            op
        } else {
            px
        }
    }))
}

/// Blend a bottom-left to top-right linear gradient over the image using the
/// overlay blend mode.
///
/// The gradient parameter is `t = (x/(w-1) + (1 - y/(h-1))) / 2`, 0 at the
/// bottom-left corner and 1 at the top-right; the gradient color at each
/// pixel is the rounded lerp of the two endpoints. Each RGB channel is then
/// combined with the image via
///
/// `overlay(a, b) = a < 0.5 ? 2ab : 1 - 2(1-a)(1-b)` (channels in [0, 1])
///
/// which darkens shadows and brightens highlights while leaving mid-gray
/// alone. Alpha passes through unchanged. A single-pixel axis uses a
/// denominator of 1 instead of dividing by zero.
pub fn overlay_diagonal_gradient(
    buf: &PixelBuffer,
    bottom_left: Rgb,
    top_right: Rgb,
) -> PixelBuffer {
    let w = buf.width().saturating_sub(1).max(1) as f64;
    let h = buf.height().saturating_sub(1).max(1) as f64;

    let lerp = |a: u8, b: u8, t: f64| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
    let blend = |a: u8, b: u8| {
        let a = a as f64 / 255.0;
        let b = b as f64 / 255.0;
        let out = if a < 0.5 {
            2.0 * a * b
        } else {
            1.0 - 2.0 * (1.0 - a) * (1.0 - b)
        };
        (out * 255.0).round() as u8
    };

    buf.map_pixels(|x, y, [r, g, b, a]| {
        let t = (x as f64 / w + (1.0 - y as f64 / h)) / 2.0;
        [
            blend(r, lerp(bottom_left.r, top_right.r, t)),
            blend(g, lerp(bottom_left.g, top_right.g, t)),
            blend(b, lerp(bottom_left.b, top_right.b, t)),
            a,
        ]
    })
}
