//! Photoqr - stylized, scannable QR codes from photographs.
//!
//! The pixel pipeline lives in the `qr-stylize` crate; this crate adds the
//! collaborators around it: the QR encoder, PNG decode/encode, and JSON
//! preset loading. Exposed as a library for integration testing.

pub mod codec;
pub mod error;
pub mod preset;
pub mod qr;
