//! PNG decode/encode for pipeline buffers.
//!
//! Decoding normalizes every input to 8-bit RGBA so the pipeline only ever
//! sees one pixel layout; encoding always writes 8-bit RGBA.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use qr_stylize::PixelBuffer;

use crate::error::AppError;

/// Decode a PNG file into an RGBA [`PixelBuffer`].
///
/// Palette, grayscale, and sub-8-bit images are expanded; a missing alpha
/// channel is filled with 255.
pub fn decode_png(path: &Path) -> Result<PixelBuffer, AppError> {
    let mut decoder = png::Decoder::new(File::open(path)?);
    decoder.set_transformations(png::Transformations::normalize_to_color8() | png::Transformations::ALPHA);
    let mut reader = decoder
        .read_info()
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut data)
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    data.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => data,
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(data.len() * 2);
            for ga in data.chunks_exact(2) {
                out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
            }
            out
        }
        other => {
            return Err(AppError::PngDecode(format!(
                "unexpected color type after normalization: {other:?}"
            )))
        }
    };

    Ok(PixelBuffer::from_raw(info.width, info.height, rgba)?)
}

/// Encode a buffer as an 8-bit RGBA PNG file.
pub fn encode_png(path: &Path, buf: &PixelBuffer) -> Result<(), AppError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), buf.width(), buf.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| AppError::PngEncode(e.to_string()))?;
    writer
        .write_image_data(buf.data())
        .map_err(|e| AppError::PngEncode(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");

        let mut buf = PixelBuffer::new(3, 2);
        buf.set_pixel(0, 0, [255, 0, 0, 255]);
        buf.set_pixel(1, 0, [0, 255, 0, 128]);
        buf.set_pixel(2, 1, [0, 0, 255, 0]);

        encode_png(&path, &buf).unwrap();
        let decoded = decode_png(&path).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_decode_missing_file_is_io_error() {
        let err = decode_png(Path::new("/nonexistent/x.png")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_decode_grayscale_expands_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 200]).unwrap();
        }
        let decoded = decode_png(&path).unwrap();
        assert_eq!(decoded.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(decoded.pixel(1, 0), [200, 200, 200, 255]);
    }
}
