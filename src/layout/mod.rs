//! Caption text layout: line breaking and auto-fit sizing.
//!
//! - [`wrap`] splits text into paragraphs and greedily wraps each one per
//!   character against a pixel width
//! - [`fit`] walks a descending size ladder and keeps the first size whose
//!   wrapped block fits the height budget, falling back to the floor size
//! - [`TextMeasurer`] is the only thing layout needs from a font
//!
//! ### Example
//! ```
//! use caption_rs::layout::{EstimateMeasurer, FitBudget, StyleSpec, fit};
//!
//! let style = StyleSpec::new("sans-serif", 100, false);
//! let out = fit("HELLO", &FitBudget::default(), &EstimateMeasurer::with_ratio(0.5), &style)?;
//! assert_eq!(out.lines, vec!["HELLO"]);
//! assert_eq!(out.size_px, 100);
//! # Ok::<(), std::convert::Infallible>(())
//! ```

pub mod fit;
pub mod measure;
pub mod types;
pub mod wrap;

pub use fit::{fit, size_ladder};
pub use measure::{EstimateMeasurer, FontMeasurer, TextMeasurer, embolden_px};
pub use types::{
    FitBudget, FitResult, LINE_HEIGHT_FACTOR, StyleSpec, WrapResult, line_height_px,
};
pub use wrap::{paragraphs, wrap};
