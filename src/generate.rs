//! End-to-end render: request -> background -> layout -> PNG on disk.

use chrono::{DateTime, Utc};
use image::RgbImage;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use crate::assets::resolve_background;
use crate::compose::{CaptionPaint, cover_background, draw_caption, parse_color};
use crate::config::Settings;
use crate::error::{CaptionError, Result};
use crate::fonts::{FALLBACK_FAMILY, FontCatalog, ensure_fallback_registered};
use crate::layout::{FitResult, FontMeasurer, StyleSpec, fit};
use crate::models::{ApiResponse, CaptionRequest};
use crate::storage;

/// A rendered canvas and the layout drawn on it (`None` without text).
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbImage,
    pub layout: Option<FitResult>,
    pub font_family: Option<String>,
}

/// A render written to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub filename: String,
    pub path: PathBuf,
    pub image_url: String,
    pub layout: Option<FitResult>,
}

impl GeneratedImage {
    pub fn response(&self) -> ApiResponse {
        ApiResponse::success(&self.image_url, &self.filename)
    }
}

/// Render `request` in memory.
///
/// Fails before any drawing when the background is missing or the color is
/// invalid. Without caption text the background is returned as scaled.
pub fn render(settings: &Settings, fonts: &FontCatalog, request: &CaptionRequest) -> Result<Rendered> {
    let bg_path = resolve_background(&settings.background_dir, request.bg_image.as_deref())?;
    info!("Received request for bgImage: {}", bg_path.display());
    let color = parse_color(&request.text_color)?;

    let bytes = fs::read(&bg_path)?;
    let background = image::load_from_memory(&bytes).map_err(CaptionError::Decode)?;
    let mut canvas = cover_background(&background, settings.canvas_width, settings.canvas_height);

    let Some(text) = request.caption_text() else {
        debug!("no caption text, emitting background only");
        return Ok(Rendered {
            image: canvas,
            layout: None,
            font_family: None,
        });
    };

    let family = fonts.resolve(request.font_name());
    if family == FALLBACK_FAMILY {
        ensure_fallback_registered(settings.fallback_font.as_deref());
    }
    let style = StyleSpec::new(family, request.font_size, request.use_bold);
    let budget = settings.fit_budget(request.font_size);
    let layout = fit(text, &budget, &FontMeasurer, &style)?;
    info!(
        "caption fitted at {}px in {} line(s){}",
        layout.size_px,
        layout.lines.len(),
        if layout.overflows(&budget) { " (overflowing)" } else { "" }
    );

    let paint = CaptionPaint {
        color,
        outline_px: request.outline_px(),
    };
    draw_caption(
        &mut canvas,
        &layout,
        &style.font_family,
        style.bold,
        &paint,
        settings.zone_bottom_px,
    )?;

    Ok(Rendered {
        image: canvas,
        layout: Some(layout),
        font_family: Some(style.font_family),
    })
}

/// Render `request` and save it under the output directory, named after `at`.
pub fn generate_at(
    settings: &Settings,
    fonts: &FontCatalog,
    request: &CaptionRequest,
    at: DateTime<Utc>,
) -> Result<GeneratedImage> {
    let rendered = render(settings, fonts, request)?;
    let (filename, path) = storage::persist(&rendered.image, &settings.output_dir, at)?;
    info!("wrote {}", path.display());
    Ok(GeneratedImage {
        image_url: settings.image_url(&filename),
        filename,
        path,
        layout: rendered.layout,
    })
}

/// [`generate_at`] with the current time.
pub fn generate(
    settings: &Settings,
    fonts: &FontCatalog,
    request: &CaptionRequest,
) -> Result<GeneratedImage> {
    generate_at(settings, fonts, request, Utc::now())
}

/// [`generate`] folded into the JSON reply shape.
pub fn respond(settings: &Settings, fonts: &FontCatalog, request: &CaptionRequest) -> ApiResponse {
    match generate(settings, fonts, request) {
        Ok(out) => out.response(),
        Err(e) => {
            log::error!("render failed: {}", e);
            ApiResponse::failure(&e)
        }
    }
}
