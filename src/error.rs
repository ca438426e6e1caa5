use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Pipeline error: {0}")]
    Stylize(#[from] qr_stylize::StylizeError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Preset error: {0}")]
    Preset(String),
}
