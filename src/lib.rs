//! caption_rs
//!
//! Render a caption onto a background photo. Pairs with the `caption` CLI.
//!
//! ### Features
//! - Greedy per-character line breaking that keeps the author's blank lines
//! - Auto-fit: largest size on a descending ladder whose block fits the zone,
//!   with a guaranteed result at the floor size
//! - Cover-scaled backgrounds on a fixed 900 x 900 canvas
//! - Centred, bottom-anchored captions with optional outline and bold
//! - Timestamped PNG output
//!
//! ### Example
//! ```no_run
//! use caption_rs::{CaptionRequest, FontCatalog, Settings};
//!
//! let settings = Settings::default();
//! let fonts = FontCatalog::load(&settings.font_dir)?;
//! let request = CaptionRequest {
//!     text: Some("Hello\nworld".into()),
//!     bg_image: Some("beach.jpg".into()),
//!     use_outline: true,
//!     ..CaptionRequest::default()
//! };
//! let out = caption_rs::generate::generate(&settings, &fonts, &request)?;
//! println!("{}", out.image_url);
//! # Ok::<(), caption_rs::CaptionError>(())
//! ```

pub mod assets;
pub mod compose;
pub mod config;
pub mod error;
pub mod fonts;
pub mod generate;
pub mod layout;
pub mod models;
pub mod storage;

pub use config::Settings;
pub use error::CaptionError;
pub use fonts::FontCatalog;
pub use layout::{FitBudget, FitResult, StyleSpec, TextMeasurer, WrapResult, fit, wrap};
pub use models::{ApiResponse, CaptionRequest};
