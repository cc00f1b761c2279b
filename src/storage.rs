//! PNG output: timestamped file names, encoding and saving rendered canvases.

use crate::error::{CaptionError, Result};
use chrono::{DateTime, Utc};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file name for a render finished at `at`: `YYYYMMDDHHMMSS.png` (UTC).
///
/// Two renders in the same second share a name; the later one wins.
pub fn timestamp_filename(at: DateTime<Utc>) -> String {
    format!("{}.png", at.format("%Y%m%d%H%M%S"))
}

/// Encode as PNG with fast compression and no row filtering.
pub fn write_png<W: Write>(img: &RgbImage, writer: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Fast, FilterType::NoFilter);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(CaptionError::Encode)
}

/// PNG bytes of `img`, for callers that serve the image without a file.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(img, &mut buf)?;
    Ok(buf)
}

/// Save `img` as a PNG at `path`.
pub fn save_png<P: AsRef<Path>>(img: &RgbImage, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_png(img, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save `img` under `dir` with a timestamp name; creates `dir` if needed.
/// Returns the file name and full path.
pub fn persist<P: AsRef<Path>>(
    img: &RgbImage,
    dir: P,
    at: DateTime<Utc>,
) -> Result<(String, PathBuf)> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let filename = timestamp_filename(at);
    let path = dir.join(&filename);
    save_png(img, &path)?;
    Ok((filename, path))
}
