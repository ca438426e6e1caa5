//! Recoloring of binarized images: duotone substitution and photo-color
//! restoration.

use crate::buffer::PixelBuffer;
use crate::color::{hsl_to_rgb, rgb_to_hsl, Rgb};

/// Map a black/white image onto a two-color palette: channel-0 black becomes
/// `dark`, everything else `bright`. Alpha is forced to 255.
pub fn apply_duotone(buf: &PixelBuffer, dark: Rgb, bright: Rgb) -> PixelBuffer {
    buf.map_pixels(|_, _, px| {
        let c = if px[0] == 0 { dark } else { bright };
        [c.r, c.g, c.b, 255]
    })
}

/// Restore the photograph's hues onto a binarized image, keeping the code
/// readable by bending lightness toward the black/white pole the pixel was
/// assigned.
///
/// Only pixels where `mask` has alpha > 0 are recolored; elsewhere the
/// black/white pixel is copied through with alpha 255. For a recolored pixel
/// the hue and saturation come from `original`, optionally boosted, and the
/// lightness is clamped by `bend = 35 * (1 - robustness / 100)`:
///
/// - pixel binarized black: `l = min(l, bend)`
/// - pixel binarized white: `l = max(l, 100 - bend)`
///
/// so robustness 100 collapses to pure duotone and robustness 0 lets
/// lightness wander up to 35 points from the pole.
///
/// `saturation_boost` in [0, 1] applies a vibrance pass (larger lift for
/// unsaturated pixels) followed by a flat multiplier, both clamped to 100.
///
/// The three buffers are expected to share dimensions; mismatches are a
/// caller bug, checked in debug builds only.
pub fn apply_original_colors(
    bw: &PixelBuffer,
    original: &PixelBuffer,
    mask: &PixelBuffer,
    saturation_boost: f64,
    robustness: f64,
) -> PixelBuffer {
    debug_assert!(bw.same_dimensions(original));
    debug_assert!(bw.same_dimensions(mask));

    let bend = 35.0 * (1.0 - robustness / 100.0);

    bw.map_pixels(|x, y, bw_px| {
        if mask.pixel(x, y)[3] == 0 {
            return [bw_px[0], bw_px[1], bw_px[2], 255];
        }

        let [r, g, b, _] = original.pixel(x, y);
        let mut hsl = rgb_to_hsl(Rgb { r, g, b });

        if saturation_boost > 0.0 {
            let vibrance = (1.0 - hsl.s / 100.0) * 0.6 * saturation_boost * 100.0;
            hsl.s = (hsl.s + vibrance).min(100.0);
            hsl.s = (hsl.s * (1.0 + 0.25 * saturation_boost)).min(100.0);
        }

        hsl.l = if bw_px[0] == 0 {
            hsl.l.min(bend)
        } else {
            hsl.l.max(100.0 - bend)
        };

        let out = hsl_to_rgb(hsl);
        [out.r, out.g, out.b, 255]
    })
}

/// Pull every pixel's lightness 10% toward mid-gray, leaving hue,
/// saturation, and alpha alone. Applied before the shine gradient so the
/// overlay blend has tonal room to work in on pure black/white input.
pub fn soften_lightness(buf: &PixelBuffer) -> PixelBuffer {
    buf.map_pixels(|_, _, [r, g, b, a]| {
        let mut hsl = rgb_to_hsl(Rgb { r, g, b });
        hsl.l += (50.0 - hsl.l) * 0.1;
        let out = hsl_to_rgb(hsl);
        [out.r, out.g, out.b, a]
    })
}
