//! Render settings: directories, canvas and caption zone.

use std::path::PathBuf;

use crate::layout::FitBudget;

/// Where assets live and how the caption zone is laid out.
///
/// `Settings::default()` matches the reference service: a 900 x 900 canvas,
/// an 800px-wide caption zone whose bottom edge sits at y = 880 and which may
/// grow 300px upwards, sizes tried from the request's size down to 20 in
/// steps of 5.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub font_dir: PathBuf,
    pub background_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Font file registered as `sans-serif` before the system locations.
    pub fallback_font: Option<PathBuf>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub zone_width_px: f64,
    pub zone_bottom_px: f64,
    pub zone_height_px: f64,
    pub min_size_px: u32,
    pub step_px: u32,
    /// URL prefix under which output files are served.
    pub output_url_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("Font"),
            background_dir: PathBuf::from("background_images"),
            output_dir: PathBuf::from("output_images"),
            fallback_font: None,
            canvas_width: 900,
            canvas_height: 900,
            zone_width_px: 800.0,
            zone_bottom_px: 880.0,
            zone_height_px: 300.0,
            min_size_px: 20,
            step_px: 5,
            output_url_prefix: "/output_images".to_string(),
        }
    }
}

impl Settings {
    /// Auto-fit budget for a request asking for `font_size_px`.
    pub fn fit_budget(&self, font_size_px: u32) -> FitBudget {
        FitBudget {
            max_width_px: self.zone_width_px,
            max_height_px: self.zone_height_px,
            initial_size_px: font_size_px,
            min_size_px: self.min_size_px,
            step_px: self.step_px,
        }
    }

    /// Public URL of an output file.
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}/{}", self.output_url_prefix.trim_end_matches('/'), filename)
    }
}
