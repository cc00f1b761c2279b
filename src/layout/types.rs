//! Value types passed between the line breaker, the sizer and the renderer.

use serde::{Deserialize, Serialize};

/// Fixed line-spacing multiplier applied to the font size.
///
/// Approximates ascent + descent + gap without querying font metrics.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Line height in pixels for a font size.
pub fn line_height_px(font_size_px: u32) -> f64 {
    f64::from(font_size_px) * LINE_HEIGHT_FACTOR
}

/// Font selection used for one measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleSpec {
    pub font_family: String,
    pub font_size_px: u32,
    pub bold: bool,
}

impl StyleSpec {
    pub fn new(font_family: impl Into<String>, font_size_px: u32, bold: bool) -> Self {
        Self {
            font_family: font_family.into(),
            font_size_px,
            bold,
        }
    }

    /// Same family and weight at another size.
    pub fn with_size(&self, font_size_px: u32) -> Self {
        Self {
            font_family: self.font_family.clone(),
            font_size_px,
            bold: self.bold,
        }
    }
}

/// Output of the line breaker for one candidate size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapResult {
    /// Paragraph order, then break order within a paragraph.
    pub lines: Vec<String>,
    pub line_height_px: f64,
    /// Always `lines.len() * line_height_px`.
    pub total_height_px: f64,
}

/// Bounds for the auto-fit search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBudget {
    pub max_width_px: f64,
    pub max_height_px: f64,
    pub initial_size_px: u32,
    pub min_size_px: u32,
    pub step_px: u32,
}

impl Default for FitBudget {
    fn default() -> Self {
        Self {
            max_width_px: 800.0,
            max_height_px: 300.0,
            initial_size_px: 100,
            min_size_px: 20,
            step_px: 5,
        }
    }
}

impl FitBudget {
    /// Default budget starting the search at `initial_size_px`.
    pub fn starting_at(initial_size_px: u32) -> Self {
        Self {
            initial_size_px,
            ..Self::default()
        }
    }
}

/// Layout handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    pub lines: Vec<String>,
    pub line_height_px: f64,
    pub size_px: u32,
}

impl FitResult {
    pub(crate) fn from_wrap(wrapped: WrapResult, size_px: u32) -> Self {
        Self {
            lines: wrapped.lines,
            line_height_px: wrapped.line_height_px,
            size_px,
        }
    }

    pub fn total_height_px(&self) -> f64 {
        self.lines.len() as f64 * self.line_height_px
    }

    /// True when the block is taller than the budget allows (floor fallback).
    pub fn overflows(&self, budget: &FitBudget) -> bool {
        self.total_height_px() > budget.max_height_px
    }
}
