//! The RGBA pixel buffer shared by every pipeline stage.
//!
//! [`PixelBuffer`] stores a flat, row-major RGBA byte plane (4 bytes per
//! pixel). The length invariant `data.len() == width * height * 4` holds for
//! every live buffer; constructors that accept caller data fail fast when it
//! is violated. Buffers are immutable once produced — every transform in
//! this crate allocates and returns a new one.

use crate::error::StylizeError;

/// A width x height RGBA pixel plane, row-major, 4 bytes per pixel.
///
/// # Example
///
/// ```
/// use qr_stylize::PixelBuffer;
///
/// let mut buf = PixelBuffer::new(2, 2);
/// buf.set_pixel(1, 0, [255, 0, 0, 255]);
/// assert_eq!(buf.pixel(1, 0), [255, 0, 0, 255]);
/// assert_eq!(buf.pixel(0, 0), [0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed buffer (every pixel transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Create a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap caller-supplied channel data.
    ///
    /// Fails with [`StylizeError::BufferLength`] when `data.len()` does not
    /// equal `width * height * 4` — the invariant is enforced at the
    /// boundary, never by truncation.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, StylizeError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(StylizeError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The flat RGBA channel plane, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the channel plane.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read the 4 channel values of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Write the 4 channel values of pixel `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Build a [`StylizeError::SizeMismatch`] against `other`.
    pub(crate) fn size_mismatch(&self, other: &PixelBuffer) -> StylizeError {
        StylizeError::SizeMismatch {
            left_width: self.width,
            left_height: self.height,
            right_width: other.width,
            right_height: other.height,
        }
    }

    /// Run a per-pixel transform over the whole plane, producing a new
    /// buffer of the same dimensions.
    ///
    /// This is the single raster-scan driver shared by the threshold,
    /// duotone, mask, and gradient operators; `f` receives `(x, y, rgba)`
    /// and returns the output pixel. Pixels are visited in raster order, so
    /// stateful closures (e.g. holding a seeded generator) observe a
    /// deterministic sequence.
    pub fn map_pixels(&self, mut f: impl FnMut(u32, u32, [u8; 4]) -> [u8; 4]) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set_pixel(x, y, f(x, y, self.pixel(x, y)));
            }
        }
        out
    }
}
