//! qr-stylize: pixel-buffer pipeline that styles QR codes with photographs
//!
//! This library fuses a scannable QR code with a photograph: the code's
//! functional modules stay machine-readable while the surrounding visual
//! field is replaced by a dithered, tinted, optionally noised rendering of
//! the photograph.
//!
//! # Quick Start
//!
//! The [`stylize`] function is the primary entry point. It takes a
//! [`MatrixSource`] (anything that can turn text into a QR module matrix),
//! a decoded photograph, and a [`StylizeParams`]:
//!
//! ```
//! use qr_stylize::{stylize, MatrixSource, ModuleMatrix, PixelBuffer, StylizeParams};
//!
//! struct Checkerboard;
//!
//! impl MatrixSource for Checkerboard {
//!     fn generate(&self, _text: &str) -> Result<ModuleMatrix, qr_stylize::StylizeError> {
//!         Ok(ModuleMatrix::from_fn(21, |x, y| (x + y) % 2 == 0))
//!     }
//! }
//!
//! let photo = PixelBuffer::filled(64, 64, [180, 120, 90, 255]);
//! let params = StylizeParams::default();
//! let output = stylize(&Checkerboard, &photo, &params).unwrap();
//!
//! // (21 modules + 2 margin) * 3 thinning scale * 3 output scale
//! assert_eq!(output.final_image.width(), (21 + 2) * 3 * 3);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! text ──> module matrix ──> 1px margin ──> control mask
//!                                │              │
//!                     ┌──────────┴───────┐      │
//!                control-only        data-only  │
//!                     │ x3               │ x3, thinned to block centers
//!                     │                  │
//! photo ──> fit ──> B/W (threshold or Floyd-Steinberg) ──> seeded noise
//!                     │                  │                      │
//!                     └───── overlay ────┴────── overlay ───────┘
//!                                        │
//!                          duotone / original-color remap
//!                                        │
//!                          optional shine gradient, final up-scale
//! ```
//!
//! Every stage is a pure function: it reads previously produced buffers and
//! allocates a fresh [`PixelBuffer`] — inputs are never mutated. All
//! intermediate buffers are retained in [`StylizeOutput`] for inspection.
//!
//! # Determinism
//!
//! The only randomness in the pipeline is the structural noise stage, which
//! uses an explicit [`Mulberry32`] generator seeded from
//! [`StylizeParams::noise_seed`]. The same seed and inputs produce
//! byte-identical output. Floyd-Steinberg dithering and noise injection
//! process pixels in strict raster order; their scan order is part of the
//! contract.

pub mod buffer;
pub mod color;
pub mod composite;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod mask;
pub mod matrix;
pub mod noise;
pub mod pipeline;
pub mod recolor;
pub mod tone;

#[cfg(test)]
mod domain_tests;

pub use buffer::PixelBuffer;
pub use color::{hsl_to_rgb, rgb_to_hsl, Hsl, ParseColorError, Rgb};
pub use error::StylizeError;
pub use fit::ScalingMode;
pub use matrix::{MatrixSource, ModuleMatrix};
pub use noise::Mulberry32;
pub use pipeline::{stylize, BwMode, StylizeOutput, StylizeParams};
