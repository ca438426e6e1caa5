//! The module matrix abstraction and its pixel rendering.
//!
//! The pipeline does not encode codes itself; it consumes a square boolean
//! matrix from a [`MatrixSource`] implementation supplied by the caller.
//! This keeps the crate free of any particular encoder.

use crate::buffer::PixelBuffer;
use crate::error::StylizeError;

/// A square grid of dark/light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: u32,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Wrap a row-major module vector.
    ///
    /// Fails with [`StylizeError::MatrixGeneration`] when the vector length
    /// is not `size * size`.
    pub fn new(size: u32, modules: Vec<bool>) -> Result<Self, StylizeError> {
        let expected = size as usize * size as usize;
        if modules.len() != expected {
            return Err(StylizeError::MatrixGeneration(format!(
                "module vector has length {} for a {size}x{size} matrix (expected {expected})",
                modules.len()
            )));
        }
        Ok(Self { size, modules })
    }

    /// Build a matrix by evaluating `f(x, y)` for every module, row-major.
    pub fn from_fn(size: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut modules = Vec::with_capacity(size as usize * size as usize);
        for y in 0..size {
            for x in 0..size {
                modules.push(f(x, y));
            }
        }
        Self { size, modules }
    }

    /// Side length in modules.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether module `(x, y)` is dark.
    #[inline]
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.modules[y as usize * self.size as usize + x as usize]
    }
}

/// Something that can turn text into a [`ModuleMatrix`], typically a QR
/// encoder.
pub trait MatrixSource {
    /// Encode `text` into a module matrix.
    fn generate(&self, text: &str) -> Result<ModuleMatrix, StylizeError>;
}

/// Render a matrix at one pixel per module: dark modules become opaque
/// black, light ones opaque white.
pub fn render_matrix(matrix: &ModuleMatrix) -> PixelBuffer {
    let mut buf = PixelBuffer::new(matrix.size(), matrix.size());
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            let px = if matrix.is_dark(x, y) {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            };
            buf.set_pixel(x, y, px);
        }
    }
    buf
}
