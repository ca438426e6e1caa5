//! Fitting the photograph to the code's pixel grid.
//!
//! [`fit_to_dimensions`] letterboxes, crops, or stretches the source photo
//! into an exact target size. The letterbox background is picked
//! automatically: corner voting when the photo has a solid border, a
//! black/white fallback otherwise, and a contrast-based override when the
//! photo carries significant transparency.

use serde::Deserialize;

use crate::buffer::PixelBuffer;
use crate::tone::luminance;

/// Per-channel tolerance when deciding whether two corner colors agree.
const CORNER_TOLERANCE: i32 = 10;
/// Fraction of non-opaque pixels above which the transparency background
/// rule takes over.
const ALPHA_RATIO_CUTOFF: f64 = 0.1;

/// How the photograph is mapped into the target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ScalingMode {
    /// Largest source dimension matches the target, aspect preserved, the
    /// rest letterboxed. The default.
    Shrink,
    /// Smallest source dimension matches the target, aspect preserved, the
    /// overflow cropped.
    Grow,
    /// Fill the target exactly, ignoring aspect ratio.
    Stretch,
    /// Manual zoom and pan. `zoom` of 0 behaves like shrink-to-largest-side;
    /// -0.5 halves the image, 2 triples it. `offset_x`/`offset_y` in [-1, 1]
    /// pan within the letterbox slack, or pick the crop window when the
    /// zoomed image overflows the target.
    Custom {
        #[serde(default)]
        zoom: f64,
        #[serde(default)]
        offset_x: f64,
        #[serde(default)]
        offset_y: f64,
    },
}

impl Default for ScalingMode {
    fn default() -> Self {
        ScalingMode::Shrink
    }
}

/// A sub-rectangle in continuous pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct RectF {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Scale the photo into an exact `target_width` x `target_height` buffer.
///
/// The uncovered area is filled with the detected background color. Sampling
/// is bilinear with edge clamping.
pub fn fit_to_dimensions(
    src: &PixelBuffer,
    target_width: u32,
    target_height: u32,
    mode: ScalingMode,
) -> PixelBuffer {
    let bg = background_color(src);
    let mut out = PixelBuffer::filled(target_width, target_height, bg);

    let tw = target_width as f64;
    let th = target_height as f64;
    let sw = src.width() as f64;
    let sh = src.height() as f64;
    let source_aspect = sw / sh;
    let target_aspect = tw / th;

    let full_crop = RectF {
        x: 0.0,
        y: 0.0,
        w: sw,
        h: sh,
    };

    let (crop, dest) = match mode {
        ScalingMode::Stretch => (
            full_crop,
            RectF {
                x: 0.0,
                y: 0.0,
                w: tw,
                h: th,
            },
        ),
        ScalingMode::Grow => {
            let (dw, dh) = if source_aspect > target_aspect {
                (th * source_aspect, th)
            } else {
                (tw, tw / source_aspect)
            };
            (
                full_crop,
                RectF {
                    x: (tw - dw) / 2.0,
                    y: (th - dh) / 2.0,
                    w: dw,
                    h: dh,
                },
            )
        }
        ScalingMode::Shrink => {
            let (dw, dh) = if source_aspect > target_aspect {
                (tw, tw / source_aspect)
            } else {
                (th * source_aspect, th)
            };
            (
                full_crop,
                RectF {
                    x: (tw - dw) / 2.0,
                    y: (th - dh) / 2.0,
                    w: dw,
                    h: dh,
                },
            )
        }
        ScalingMode::Custom {
            zoom,
            offset_x,
            offset_y,
        } => custom_placement(sw, sh, tw, th, zoom, offset_x, offset_y),
    };

    draw_bilinear(&mut out, src, crop, dest);
    out
}

/// Placement for custom mode: zoom sets the size, each axis then either pans
/// inside the letterbox slack (when the drawn image fits) or shifts the crop
/// window (when it overflows).
fn custom_placement(
    sw: f64,
    sh: f64,
    tw: f64,
    th: f64,
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
) -> (RectF, RectF) {
    let source_aspect = sw / sh;
    let target_aspect = tw / th;
    let zoom_factor = 1.0 + zoom;

    let (draw_w, draw_h) = if source_aspect > target_aspect {
        let w = tw * zoom_factor;
        (w, w / source_aspect)
    } else {
        let h = th * zoom_factor;
        (h * source_aspect, h)
    };

    let scale_x = sw / draw_w;
    let scale_y = sh / draw_h;

    // max/min instead of clamp: an out-of-range zoom can drive the overflow
    // term to NaN, and clamp panics on NaN bounds.
    let (crop_x, crop_w, dest_x, dest_w) = if draw_w <= tw {
        let slack = (tw - draw_w) / 2.0;
        (0.0, sw, slack + offset_x * slack, draw_w)
    } else {
        let overflow = (draw_w - tw) * scale_x;
        let cx = (overflow / 2.0) * (1.0 + offset_x);
        let cx = cx.min(sw - overflow).max(0.0);
        (cx, (sw - cx).min(sw - overflow), 0.0, tw)
    };

    let (crop_y, crop_h, dest_y, dest_h) = if draw_h <= th {
        let slack = (th - draw_h) / 2.0;
        (0.0, sh, slack + offset_y * slack, draw_h)
    } else {
        let overflow = (draw_h - th) * scale_y;
        let cy = (overflow / 2.0) * (1.0 + offset_y);
        let cy = cy.min(sh - overflow).max(0.0);
        (cy, (sh - cy).min(sh - overflow), 0.0, th)
    };

    (
        RectF {
            x: crop_x,
            y: crop_y,
            w: crop_w,
            h: crop_h,
        },
        RectF {
            x: dest_x,
            y: dest_y,
            w: dest_w,
            h: dest_h,
        },
    )
}

/// Pick the letterbox background for a source photo.
///
/// Priority order:
///
/// 1. if more than 10% of the pixels are non-opaque, use solid black when
///    the opaque content averages bright, white when it averages dark;
/// 2. if at least two of the four corner pixels agree within a per-channel
///    tolerance of 10, use the first such corner verbatim;
/// 3. otherwise average the corners and snap to black or white by luminance.
fn background_color(src: &PixelBuffer) -> [u8; 4] {
    if src.width() == 0 || src.height() == 0 {
        return [255, 255, 255, 255];
    }

    let mut opaque_luminance_sum = 0.0;
    let mut opaque_count = 0u64;
    let mut non_opaque = 0u64;
    for px in src.data().chunks_exact(4) {
        if px[3] > 0 {
            opaque_luminance_sum += luminance(px[0], px[1], px[2]);
            opaque_count += 1;
        }
        if px[3] < 255 {
            non_opaque += 1;
        }
    }
    let total = (src.width() as u64 * src.height() as u64) as f64;
    if opaque_count > 0 && non_opaque as f64 / total > ALPHA_RATIO_CUTOFF {
        let avg = opaque_luminance_sum / opaque_count as f64;
        return if avg > 128.0 {
            [0, 0, 0, 255]
        } else {
            [255, 255, 255, 255]
        };
    }

    let corners = [
        src.pixel(0, 0),
        src.pixel(src.width() - 1, 0),
        src.pixel(0, src.height() - 1),
        src.pixel(src.width() - 1, src.height() - 1),
    ];
    for (i, a) in corners.iter().enumerate() {
        let agreeing = corners
            .iter()
            .enumerate()
            .filter(|&(j, b)| i != j && colors_almost_equal(*a, *b))
            .count();
        if agreeing >= 1 {
            return *a;
        }
    }

    let mut avg = [0u32; 4];
    for c in &corners {
        for (acc, v) in avg.iter_mut().zip(c) {
            *acc += *v as u32;
        }
    }
    let avg: Vec<u8> = avg.iter().map(|v| (*v as f64 / 4.0).round() as u8).collect();
    if luminance(avg[0], avg[1], avg[2]) < 128.0 {
        [0, 0, 0, 255]
    } else {
        [255, 255, 255, 255]
    }
}

fn colors_almost_equal(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter()
        .zip(&b)
        .all(|(&x, &y)| (x as i32 - y as i32).abs() <= CORNER_TOLERANCE)
}

/// Resample `crop` of `src` into `dest` of `out` with bilinear filtering,
/// compositing source-over the existing background by source alpha.
fn draw_bilinear(out: &mut PixelBuffer, src: &PixelBuffer, crop: RectF, dest: RectF) {
    if dest.w <= 0.0 || dest.h <= 0.0 || crop.w <= 0.0 || crop.h <= 0.0 {
        return;
    }
    let x0 = dest.x.max(0.0).floor() as u32;
    let y0 = dest.y.max(0.0).floor() as u32;
    let x1 = (dest.x + dest.w).min(out.width() as f64).ceil() as u32;
    let y1 = (dest.y + dest.h).min(out.height() as f64).ceil() as u32;

    for dy in y0..y1 {
        for dx in x0..x1 {
            let cx = dx as f64 + 0.5;
            let cy = dy as f64 + 0.5;
            if cx < dest.x || cx >= dest.x + dest.w || cy < dest.y || cy >= dest.y + dest.h {
                continue;
            }
            let sx = crop.x + (cx - dest.x) * crop.w / dest.w - 0.5;
            let sy = crop.y + (cy - dest.y) * crop.h / dest.h - 0.5;
            let sample = sample_bilinear(src, sx, sy);
            let under = out.pixel(dx, dy);
            out.set_pixel(dx, dy, blend_over(sample, under));
        }
    }
}

/// Edge-clamped bilinear sample at continuous source coordinates.
fn sample_bilinear(src: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let max_x = (src.width() - 1) as f64;
    let max_y = (src.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut result = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        result[c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
    }
    result
}

/// Standard source-over blend of `top` onto an opaque-or-not `under` pixel.
fn blend_over(top: [u8; 4], under: [u8; 4]) -> [u8; 4] {
    if top[3] == 255 {
        return top;
    }
    if top[3] == 0 {
        return under;
    }
    let ta = top[3] as f64 / 255.0;
    let ua = under[3] as f64 / 255.0;
    let out_a = ta + ua * (1.0 - ta);
    if out_a == 0.0 {
        return [0, 0, 0, 0];
    }
    let mut result = [0u8; 4];
    for c in 0..3 {
        let v = (top[c] as f64 * ta + under[c] as f64 * ua * (1.0 - ta)) / out_a;
        result[c] = v.round() as u8;
    }
    result[3] = (out_a * 255.0).round() as u8;
    result
}
