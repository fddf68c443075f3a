use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("frame acquisition failed: {0}")]
    Acquisition(String),

    #[error("hand tracker failed: {0}")]
    Tracker(String),

    #[error("display sink failed: {0}")]
    Sink(String),

    #[error("palette assets: {0}")]
    Assets(String),

    #[error("geometry mismatch: {0}")]
    Geometry(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
