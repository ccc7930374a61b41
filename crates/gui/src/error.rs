//! Error types surfaced to the user through notifications.

use shared::AreaInputError;

/// Rejected scale computation. Nothing is mutated when this is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid area: {0}")]
    InvalidArea(#[from] AreaInputError),
    #[error("the room outline must be closed with at least 3 points")]
    PolygonNotClosed,
    #[error("the room outline has zero area")]
    DegeneratePolygon,
}

impl ValidationError {
    /// i18n key of the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::InvalidArea(_) => "notify.invalid_area",
            ValidationError::PolygonNotClosed => "notify.polygon_required",
            ValidationError::DegeneratePolygon => "notify.degenerate_polygon",
        }
    }
}

/// Failure while accepting, decoding or preparing a floor plan image
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("not an image file (type '{mime}')")]
    NotAnImage { mime: String },
    #[error("file is too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to re-encode image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("image decoding was interrupted")]
    Interrupted,
}

impl ImageLoadError {
    /// i18n key of the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            ImageLoadError::NotAnImage { .. } => "notify.not_an_image",
            ImageLoadError::TooLarge { .. } => "notify.too_large",
            ImageLoadError::Read(_) => "notify.read_failed",
            ImageLoadError::Decode(_) => "notify.decode_failed",
            ImageLoadError::Encode(_) | ImageLoadError::Interrupted => "notify.process_failed",
        }
    }
}
