use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("invalid field order: {reason}")]
    InvalidFieldOrder { reason: String },

    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error(
        "snapshot surface is {actual_width}x{actual_height}, \
         expected {expected_width}x{expected_height}"
    )]
    SnapshotGeometry {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("snapshot surface has {actual} bytes of pixel data, expected {expected}")]
    SnapshotPixels { expected: usize, actual: usize },
}
