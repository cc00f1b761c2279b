//! Text width measurement.
//!
//! The font style is passed on every call; no measurer keeps a "current
//! font", so one measurer can serve concurrent renders with different styles.

use plotters::style::{FontDesc, FontFamily, FontStyle};

use super::types::StyleSpec;
use crate::error::CaptionError;

/// Width of rendered text, in pixels, for an explicit style.
pub trait TextMeasurer {
    type Error;

    /// Must be deterministic for a fixed `(text, style)`.
    fn measure_width(&self, text: &str, style: &StyleSpec) -> Result<f64, Self::Error>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    type Error = M::Error;

    fn measure_width(&self, text: &str, style: &StyleSpec) -> Result<f64, Self::Error> {
        (**self).measure_width(text, style)
    }
}

/// Extra horizontal pixels used to fake a bold weight at `font_size_px`.
pub fn embolden_px(font_size_px: u32) -> u32 {
    (font_size_px / 40).max(1)
}

fn weight_spread(style: &StyleSpec) -> u32 {
    if style.bold {
        embolden_px(style.font_size_px)
    } else {
        0
    }
}

/// Measures with the glyph advances of fonts registered in `plotters`.
///
/// See [`crate::fonts`] for registration. Unknown families fail with
/// [`CaptionError::FontUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMeasurer;

impl FontMeasurer {
    pub(crate) fn font_desc(style: &StyleSpec) -> FontDesc<'_> {
        let weight = if style.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        FontDesc::new(
            FontFamily::Name(&style.font_family),
            f64::from(style.font_size_px),
            weight,
        )
    }
}

impl TextMeasurer for FontMeasurer {
    type Error = CaptionError;

    fn measure_width(&self, text: &str, style: &StyleSpec) -> Result<f64, CaptionError> {
        let (w, _h) = Self::font_desc(style)
            .box_size(text)
            .map_err(|e| CaptionError::FontUnavailable {
                family: style.font_family.clone(),
                reason: format!("{:?}", e),
            })?;
        Ok(f64::from(w + weight_spread(style)))
    }
}

/// Font-less heuristic: every char is `em_ratio * size` wide.
///
/// Useful for dry runs and tests; with a ratio of 0.5 it is an exact
/// monospace measurer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateMeasurer {
    pub em_ratio: f64,
}

impl Default for EstimateMeasurer {
    fn default() -> Self {
        Self { em_ratio: 0.60 }
    }
}

impl EstimateMeasurer {
    pub fn with_ratio(em_ratio: f64) -> Self {
        Self { em_ratio }
    }
}

impl TextMeasurer for EstimateMeasurer {
    type Error = std::convert::Infallible;

    fn measure_width(&self, text: &str, style: &StyleSpec) -> Result<f64, Self::Error> {
        let chars = text.chars().count() as f64;
        let w = (chars * f64::from(style.font_size_px) * self.em_ratio).ceil();
        Ok(w + f64::from(weight_spread(style)))
    }
}
