//! Error type shared by the rendering pipeline.

use thiserror::Error;

/// Everything that can stop a caption render.
///
/// Overflowing the caption zone at the minimum size is *not* an error: the
/// auto-fit search always yields a layout.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The request did not name a background image.
    #[error("Background image is required")]
    MissingBackground,
    /// The named background does not exist (or is not a plain file name).
    #[error("Background image not found: {0}")]
    BackgroundNotFound(String),
    /// `textColor` is not a `#rgb` / `#rrggbb` hex color.
    #[error("invalid text color `{0}`, expected #rrggbb")]
    InvalidColor(String),
    /// No usable font face for the requested family.
    #[error("font `{family}` unavailable: {reason}")]
    FontUnavailable { family: String, reason: String },
    /// The drawing backend rejected an operation.
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CaptionError {
    /// HTTP status a web front end should report for this failure.
    pub fn http_status(&self) -> u16 {
        match self {
            CaptionError::MissingBackground | CaptionError::InvalidColor(_) => 400,
            CaptionError::BackgroundNotFound(_) => 404,
            _ => 500,
        }
    }

    /// True for failures caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

pub type Result<T> = std::result::Result<T, CaptionError>;
