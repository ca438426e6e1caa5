//! Hex, RGB, and HSL color conversions.
//!
//! Three interchangeable representations: a `#rrggbb` hex string, an [`Rgb`]
//! byte triple, and an [`Hsl`] triple (hue 0-360, saturation/lightness 0-100).
//! All conversions are pure functions. RGB -> HSL -> RGB round-trips within
//! ±1 per channel; the hex round-trip is exact.

use thiserror::Error;

/// A string that could not be parsed as a 6-digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {input:?}")]
pub struct ParseColorError {
    /// The rejected input.
    pub input: String,
}

/// An RGB byte triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An HSL triple: hue in degrees (0-360), saturation and lightness in
/// percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Rgb {
    /// Parse a `#rrggbb` string (the leading `#` is optional).
    ///
    /// # Example
    ///
    /// ```
    /// use qr_stylize::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb { r: 255, g: 128, b: 0 });
    /// assert_eq!(Rgb::from_hex("ff8000").unwrap(), Rgb { r: 255, g: 128, b: 0 });
    /// assert!(Rgb::from_hex("#f80").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError {
                input: hex.to_string(),
            });
        }
        // Unwraps cannot fire: all six bytes were just checked.
        let channel = |range| u8::from_str_radix(&digits[range], 16).unwrap();
        Ok(Self {
            r: channel(0..2),
            g: channel(2..4),
            b: channel(4..6),
        })
    }

    /// Format as a lowercase `#rrggbb` string, zero-padded.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert an RGB byte triple to HSL.
///
/// Standard min/max chroma formula; achromatic input (`max == min`) yields
/// `h = 0, s = 0`.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h / 6.0 * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Convert an HSL triple back to RGB bytes.
///
/// Standard piecewise hue-to-channel function; each channel is rounded to
/// the nearest integer.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let (r, g, b) = if s == 0.0 {
        // achromatic
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_and_without_hash() {
        assert_eq!(
            Rgb::from_hex("#211e59").unwrap(),
            Rgb {
                r: 0x21,
                g: 0x1e,
                b: 0x59
            }
        );
        assert_eq!(
            Rgb::from_hex("f9f7dd").unwrap(),
            Rgb {
                r: 0xf9,
                g: 0xf7,
                b: 0xdd
            }
        );
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("#1234567").is_err());
    }

    #[test]
    fn test_hex_roundtrip_exact() {
        for &(r, g, b) in &[(0, 0, 0), (255, 255, 255), (1, 2, 3), (0x21, 0x1e, 0x59)] {
            let rgb = Rgb { r, g, b };
            assert_eq!(Rgb::from_hex(&rgb.to_hex()).unwrap(), rgb);
        }
    }

    #[test]
    fn test_to_hex_zero_pads() {
        assert_eq!(Rgb { r: 0, g: 10, b: 255 }.to_hex(), "#000aff");
    }

    #[test]
    fn test_achromatic_has_zero_hue_and_saturation() {
        let hsl = rgb_to_hsl(Rgb {
            r: 128,
            g: 128,
            b: 128,
        });
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 50.196).abs() < 0.01);
    }

    #[test]
    fn test_primary_hues() {
        assert!((rgb_to_hsl(Rgb { r: 255, g: 0, b: 0 }).h - 0.0).abs() < 1e-9);
        assert!((rgb_to_hsl(Rgb { r: 0, g: 255, b: 0 }).h - 120.0).abs() < 1e-9);
        assert!((rgb_to_hsl(Rgb { r: 0, g: 0, b: 255 }).h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_roundtrip_within_one() {
        // Sample the cube rather than iterating all 16M triples.
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let rgb = Rgb {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    };
                    let back = hsl_to_rgb(rgb_to_hsl(rgb));
                    assert!(
                        (back.r as i32 - rgb.r as i32).abs() <= 1
                            && (back.g as i32 - rgb.g as i32).abs() <= 1
                            && (back.b as i32 - rgb.b as i32).abs() <= 1,
                        "round-trip drifted more than ±1: {:?} -> {:?}",
                        rgb,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_hsl_to_rgb_pure_white_and_black() {
        assert_eq!(
            hsl_to_rgb(Hsl {
                h: 0.0,
                s: 0.0,
                l: 100.0
            }),
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(
            hsl_to_rgb(Hsl {
                h: 0.0,
                s: 0.0,
                l: 0.0
            }),
            Rgb { r: 0, g: 0, b: 0 }
        );
    }
}
