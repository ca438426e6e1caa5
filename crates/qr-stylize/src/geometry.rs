//! Geometric operators: block up-scaling, margin padding, center-pixel
//! thinning.
//!
//! All three allocate a new buffer; the nearest-neighbor scaling replicates
//! each source pixel into an n x n block with no interpolation.

use crate::buffer::PixelBuffer;
use crate::error::StylizeError;

/// Replicate every source pixel into a `factor` x `factor` block.
///
/// Output dimensions are `(w * factor, h * factor)`; each of the factor²
/// destination pixels receives the source pixel's exact 4 channel values.
pub fn scale_by_factor(buf: &PixelBuffer, factor: u32) -> PixelBuffer {
    let mut out = PixelBuffer::new(buf.width() * factor, buf.height() * factor);
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            let px = buf.pixel(x, y);
            for dy in 0..factor {
                for dx in 0..factor {
                    out.set_pixel(x * factor + dx, y * factor + dy, px);
                }
            }
        }
    }
    out
}

/// The x3 scaling used throughout the pipeline: one module becomes a 3x3
/// block so that thinning can later keep the block center.
pub fn scale3(buf: &PixelBuffer) -> PixelBuffer {
    scale_by_factor(buf, 3)
}

/// Pad the buffer with a `margin`-pixel band of opaque white on all sides.
///
/// Output dimensions are `(w + 2*margin, h + 2*margin)`; interior pixels are
/// copied unchanged at offset `(x - margin, y - margin)`.
pub fn add_margin(margin: u32, buf: &PixelBuffer) -> PixelBuffer {
    let new_width = buf.width() + 2 * margin;
    let new_height = buf.height() + 2 * margin;
    let mut out = PixelBuffer::new(new_width, new_height);
    for y in 0..new_height {
        for x in 0..new_width {
            let is_margin = y < margin
                || y >= margin + buf.height()
                || x < margin
                || x >= margin + buf.width();
            let px = if is_margin {
                [255, 255, 255, 255]
            } else {
                buf.pixel(x - margin, y - margin)
            };
            out.set_pixel(x, y, px);
        }
    }
    out
}

/// Keep only the center pixel of every 3x3 block, zeroing the other eight.
///
/// The kept pixel is the one at local offset (1, 1); everything else becomes
/// transparent black. Fails with [`StylizeError::Dimension`] unless both
/// dimensions are divisible by 3.
pub fn keep_block_centers(buf: &PixelBuffer) -> Result<PixelBuffer, StylizeError> {
    if buf.width() % 3 != 0 || buf.height() % 3 != 0 {
        return Err(StylizeError::Dimension {
            width: buf.width(),
            height: buf.height(),
            divisor: 3,
        });
    }
    Ok(buf.map_pixels(|x, y, px| {
        if x % 3 == 1 && y % 3 == 1 {
            px
        } else {
            [0, 0, 0, 0]
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered_2x2() -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 0, [10, 11, 12, 13]);
        buf.set_pixel(1, 0, [20, 21, 22, 23]);
        buf.set_pixel(0, 1, [30, 31, 32, 33]);
        buf.set_pixel(1, 1, [40, 41, 42, 43]);
        buf
    }

    #[test]
    fn test_scale_by_factor_dimensions() {
        let out = scale_by_factor(&numbered_2x2(), 4);
        assert_eq!(out.width(), 8);
        assert_eq!(out.height(), 8);
    }

    #[test]
    fn test_scale_by_factor_replicates_blocks_exactly() {
        let src = numbered_2x2();
        let n = 3;
        let out = scale_by_factor(&src, n);
        for sy in 0..2 {
            for sx in 0..2 {
                let expected = src.pixel(sx, sy);
                for dy in 0..n {
                    for dx in 0..n {
                        assert_eq!(
                            out.pixel(sx * n + dx, sy * n + dy),
                            expected,
                            "block ({sx},{sy}) pixel ({dx},{dy})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_scale_factor_one_is_identity() {
        let src = numbered_2x2();
        assert_eq!(scale_by_factor(&src, 1), src);
    }

    #[test]
    fn test_scale3_matches_general_operator() {
        let src = numbered_2x2();
        assert_eq!(scale3(&src), scale_by_factor(&src, 3));
    }

    #[test]
    fn test_add_margin_dimensions_and_band() {
        let src = numbered_2x2();
        let m = 2;
        let out = add_margin(m, &src);
        assert_eq!(out.width(), 6);
        assert_eq!(out.height(), 6);
        for y in 0..6 {
            for x in 0..6 {
                let in_band = x < m || x >= m + 2 || y < m || y >= m + 2;
                if in_band {
                    assert_eq!(out.pixel(x, y), [255, 255, 255, 255], "margin at ({x},{y})");
                }
            }
        }
        // Interior copied at the offset position
        assert_eq!(out.pixel(2, 2), src.pixel(0, 0));
        assert_eq!(out.pixel(3, 3), src.pixel(1, 1));
    }

    #[test]
    fn test_keep_block_centers() {
        let src = PixelBuffer::filled(6, 3, [9, 9, 9, 9]);
        let out = keep_block_centers(&src).unwrap();
        for y in 0..3 {
            for x in 0..6 {
                let expected = if x % 3 == 1 && y % 3 == 1 {
                    [9, 9, 9, 9]
                } else {
                    [0, 0, 0, 0]
                };
                assert_eq!(out.pixel(x, y), expected, "at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_keep_block_centers_rejects_indivisible_width() {
        let src = PixelBuffer::new(10, 9);
        assert_eq!(
            keep_block_centers(&src).unwrap_err(),
            StylizeError::Dimension {
                width: 10,
                height: 9,
                divisor: 3,
            }
        );
    }
}
