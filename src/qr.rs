//! QR encoding via `fast_qr`, plugged into the pipeline's matrix seam.

use fast_qr::{QRBuilder, ECL};
use qr_stylize::{MatrixSource, ModuleMatrix, StylizeError};

/// [`MatrixSource`] backed by the `fast_qr` encoder.
///
/// Always encodes at error-correction level H: the pipeline deliberately
/// damages data modules with photo texture and noise, so the code needs all
/// the redundancy it can get.
pub struct FastQr;

impl MatrixSource for FastQr {
    fn generate(&self, text: &str) -> Result<ModuleMatrix, StylizeError> {
        let qr = QRBuilder::new(text)
            .ecl(ECL::H)
            .build()
            .map_err(|e| StylizeError::MatrixGeneration(e.to_string()))?;
        let size = qr.size as u32;
        Ok(ModuleMatrix::from_fn(size, |x, y| {
            qr[y as usize][x as usize].value()
        }))
    }
}
