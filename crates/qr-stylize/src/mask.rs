//! Mask generation and mask-guided pixel substitution.
//!
//! A mask is an ordinary [`PixelBuffer`]: "masked" means channel 0 is
//! greater than zero, unmasked pixels are all-zero. Consumers only inspect
//! channel 0, so there is no separate boolean buffer type.

use crate::buffer::PixelBuffer;
use crate::error::StylizeError;

/// Side length of the fixed bottom-right marker square, in pixels.
const FOURTH_SQUARE_SIZE: i64 = 5;
/// Inset of that marker from the bottom-right corner, in pixels.
const FOURTH_SQUARE_INSET: i64 = 5;

/// Build the control mask for a code buffer: the margin band plus the
/// finder-pattern stripes.
///
/// A pixel is masked (all channels 255) when it lies
///
/// - within `margin` of any edge, or
/// - in the left stripe (width `margin + rect`) combined with the top or
///   bottom stripe of the same thickness (top-left and bottom-left finder
///   corners), or
/// - in the right stripe combined with the top stripe only — the mask is
///   three-cornered on purpose, mirroring the finder layout of the code
///   format; there is no bottom-right finder square.
///
/// When `add_fourth_square` is set, a fixed 5x5 block inset 5 pixels from
/// the bottom-right corner is masked as well. It is a visual marker with a
/// constant size regardless of image dimensions.
pub fn generate_mask(
    buf: &PixelBuffer,
    margin: u32,
    rect: u32,
    add_fourth_square: bool,
) -> PixelBuffer {
    let width = buf.width();
    let height = buf.height();
    let stripe = margin + rect;

    buf.map_pixels(|x, y, _| {
        let mut masked = x < margin
            || x >= width.saturating_sub(margin)
            || y < margin
            || y >= height.saturating_sub(margin);

        let left = x < stripe;
        let right = x >= width.saturating_sub(stripe);
        let upper = y < stripe;
        let lower = y >= height.saturating_sub(stripe);
        if (left && (upper || lower)) || (right && upper) {
            masked = true;
        }

        if add_fourth_square {
            // Signed math: tiny buffers can push the square past the origin.
            let sq_right = width as i64 - FOURTH_SQUARE_INSET;
            let sq_left = sq_right - FOURTH_SQUARE_SIZE;
            let sq_bottom = height as i64 - FOURTH_SQUARE_INSET;
            let sq_top = sq_bottom - FOURTH_SQUARE_SIZE;
            let (x, y) = (x as i64, y as i64);
            if x >= sq_left && x < sq_right && y >= sq_top && y < sq_bottom {
                masked = true;
            }
        }

        if masked {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 0]
        }
    })
}

/// Replace pixels according to a mask.
///
/// For each pixel, the masked-state is `mask.channel0 > 0`, XORed with
/// `invert`; masked pixels are replaced by the literal `fill` constant,
/// unmasked pixels pass through unchanged. Swapping `invert` turns the same
/// mask into an extractor (keep the target, blank the rest) or a carver
/// (blank the target, keep the rest).
///
/// Fails with [`StylizeError::SizeMismatch`] when the two buffers differ in
/// dimensions — never truncates.
pub fn apply_mask(
    image: &PixelBuffer,
    mask: &PixelBuffer,
    fill: [u8; 4],
    invert: bool,
) -> Result<PixelBuffer, StylizeError> {
    if !image.same_dimensions(mask) {
        return Err(image.size_mismatch(mask));
    }
    Ok(image.map_pixels(|x, y, px| {
        let masked = (mask.pixel(x, y)[0] > 0) != invert;
        if masked {
            fill
        } else {
            px
        }
    }))
}
