//! Canvas composition: cover-scaled background plus the fitted caption.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;

use crate::error::{CaptionError, Result};
use crate::layout::{FitResult, FontMeasurer, StyleSpec, TextMeasurer, embolden_px};

/// Largest outline radius drawn, in pixels.
pub const MAX_OUTLINE_PX: u32 = 32;

/// The part of a background that stays visible when it covers the canvas,
/// in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Region of `src` that, scaled to `dst` keeping its aspect ratio, fills it.
///
/// Wider images keep their full height and lose their sides; taller (or
/// equal) images keep their full width and lose top and bottom. The region
/// is centred and never empty.
pub fn cover_rect(src: (u32, u32), dst: (u32, u32)) -> CoverRect {
    let (sw, sh) = (u64::from(src.0.max(1)), u64::from(src.1.max(1)));
    let (dw, dh) = (u64::from(dst.0.max(1)), u64::from(dst.1.max(1)));
    if sw * dh > dw * sh {
        let width = ((sh * dw + dh / 2) / dh).clamp(1, sw);
        CoverRect {
            x: ((sw - width) / 2) as u32,
            y: 0,
            width: width as u32,
            height: sh as u32,
        }
    } else {
        let height = ((sw * dh + dw / 2) / dw).clamp(1, sh);
        CoverRect {
            x: 0,
            y: ((sh - height) / 2) as u32,
            width: sw as u32,
            height: height as u32,
        }
    }
}

/// Render `background` onto a fresh `width` x `height` RGB canvas.
///
/// Only the visible region is resampled, so the work is bounded by the
/// source and canvas sizes whatever the aspect ratio.
pub fn cover_background(background: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = background.to_rgb8();
    let rect = cover_rect(rgb.dimensions(), (width, height));
    let visible = imageops::crop_imm(&rgb, rect.x, rect.y, rect.width, rect.height).to_image();
    imageops::resize(&visible, width, height, FilterType::Triangle)
}

/// Parse `#rrggbb` or `#rgb` (the `#` is optional).
pub fn parse_color(s: &str) -> Result<RGBColor> {
    let invalid = || CaptionError::InvalidColor(s.to_string());
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Ok(RGBColor(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

/// Pixel offsets that stamp an outline of `radius` around a glyph.
///
/// Every integer point inside the disc except the centre, radius capped at
/// [`MAX_OUTLINE_PX`].
pub fn outline_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = radius.min(MAX_OUTLINE_PX) as i32;
    let mut out = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx, dy) != (0, 0) && dx * dx + dy * dy <= r * r {
                out.push((dx, dy));
            }
        }
    }
    out
}

/// How the caption is painted.
#[derive(Debug, Clone, Copy)]
pub struct CaptionPaint {
    pub color: RGBColor,
    /// Black outline radius; `None` draws fill only.
    pub outline_px: Option<u32>,
}

/// Top-left position of every line: centred horizontally, block bottom at
/// `zone_bottom`.
pub fn line_origins<M: TextMeasurer>(
    layout: &FitResult,
    style: &StyleSpec,
    canvas_width: u32,
    zone_bottom: f64,
    measurer: &M,
) -> std::result::Result<Vec<(i32, i32)>, M::Error> {
    let start_y = zone_bottom - layout.total_height_px();
    layout
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let w = measurer.measure_width(line, style)?;
            let x = (f64::from(canvas_width) - w) / 2.0;
            let y = start_y + i as f64 * layout.line_height_px;
            Ok((x.round() as i32, y.round() as i32))
        })
        .collect()
}

fn draw_error<E: std::fmt::Debug>(e: E) -> CaptionError {
    CaptionError::Draw(format!("{:?}", e))
}

/// Draw `layout` onto `canvas`, bottom-anchored at `zone_bottom`.
///
/// `family` and `bold` must match the style the layout was fitted with.
pub fn draw_caption(
    canvas: &mut RgbImage,
    layout: &FitResult,
    family: &str,
    bold: bool,
    paint: &CaptionPaint,
    zone_bottom: f64,
) -> Result<()> {
    let style = StyleSpec::new(family, layout.size_px, bold);
    let (w, h) = canvas.dimensions();
    let origins = line_origins(layout, &style, w, zone_bottom, &FontMeasurer)?;

    let font = FontMeasurer::font_desc(&style);
    let fill = font
        .color(&paint.color)
        .pos(Pos::new(HPos::Left, VPos::Top));
    let stroke = font.color(&BLACK).pos(Pos::new(HPos::Left, VPos::Top));
    let outline = paint.outline_px.map(outline_offsets).unwrap_or_default();
    let spread = if bold { embolden_px(layout.size_px) as i32 } else { 0 };

    let root = BitMapBackend::with_buffer(&mut **canvas, (w, h)).into_drawing_area();
    for (line, (x, y)) in layout.lines.iter().zip(origins) {
        if line.is_empty() {
            continue;
        }
        for (dx, dy) in &outline {
            root.draw_text(line, &stroke, (x + dx, y + dy))
                .map_err(draw_error)?;
        }
        for dx in 0..=spread {
            root.draw_text(line, &fill, (x + dx, y)).map_err(draw_error)?;
        }
    }
    root.present().map_err(draw_error)?;
    Ok(())
}
