//! Seeded noise injection and the Mulberry32 generator behind it.
//!
//! [`Mulberry32`] is a small 32-bit-state PRNG with good statistical
//! behavior for visual noise. It is not cryptographic; its job here is to
//! make [`add_noise`] reproducible from a numeric seed.

use crate::buffer::PixelBuffer;

/// The Mulberry32 pseudo-random generator.
///
/// 32 bits of state, one add-xor-multiply scramble per draw. The sequence is
/// fully determined by the seed, so two runs with the same seed produce
/// identical noise patterns.
///
/// # Example
///
/// ```
/// use qr_stylize::Mulberry32;
///
/// let mut a = Mulberry32::new(12345);
/// let mut b = Mulberry32::new(12345);
/// assert_eq!(a.next_u32(), b.next_u32());
/// let v = a.next_f64();
/// assert!((0.0..1.0).contains(&v));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Seed the generator.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Draw the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Draw a uniform value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Invert random pixels of a black/white image at roughly `probability`
/// percent, seeded by `seed`.
///
/// One random draw is consumed per pixel in raster order whether or not the
/// pixel flips, so the pattern depends only on the seed and dimensions, not
/// on the image content. The per-pixel flip chance is damped in two cases:
///
/// - when the 3x3 neighborhood (edge-clipped) is not uniform in channel 0,
///   the probability is multiplied by 0.15, keeping noise off the module
///   boundaries where it would read as scanning damage;
/// - on the module-center lattice (`x % 3 == 1 || y % 3 == 1`) it is
///   multiplied by 0.15 again, protecting the thinned data pixels.
///
/// A flip inverts each RGB channel (`0 -> 255`, anything else `-> 0`) and
/// leaves alpha untouched.
pub fn add_noise(buf: &PixelBuffer, probability: f64, seed: u32) -> PixelBuffer {
    let width = buf.width() as i64;
    let height = buf.height() as i64;
    let mut rng = Mulberry32::new(seed);

    buf.map_pixels(|x, y, px| {
        let draw = rng.next_f64();

        let mut adjusted = probability;
        if !neighborhood_uniform(buf, x as i64, y as i64, width, height) {
            adjusted *= 0.15;
        }
        if x % 3 == 1 || y % 3 == 1 {
            adjusted *= 0.15;
        }

        if draw * 100.0 < adjusted {
            let flip = |v: u8| if v == 0 { 255 } else { 0 };
            [flip(px[0]), flip(px[1]), flip(px[2]), px[3]]
        } else {
            px
        }
    })
}

/// Whether the 3x3 neighborhood around `(x, y)` agrees in channel 0.
/// Out-of-bounds neighbors are skipped rather than wrapped.
fn neighborhood_uniform(buf: &PixelBuffer, x: i64, y: i64, width: i64, height: i64) -> bool {
    let center = buf.pixel(x as u32, y as u32)[0];
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            if buf.pixel(nx as u32, ny as u32)[0] != center {
                return false;
            }
        }
    }
    true
}
