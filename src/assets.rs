//! Font and background directory listings.

use crate::error::{CaptionError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Extensions recognised as font files (case-insensitive).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];
/// Extensions recognised as background images (case-insensitive).
pub const BACKGROUND_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// True if `name` ends in one of `exts`, ignoring ASCII case.
pub fn has_extension(name: &str, exts: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// File names in `dir` with one of `exts`, sorted. A missing directory is empty.
pub fn list_files<P: AsRef<Path>>(dir: P, exts: &[&str]) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str()
            && has_extension(name, exts)
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Font files available in `dir`.
pub fn list_fonts<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    list_files(dir, FONT_EXTENSIONS)
}

/// Background images available in `dir`.
pub fn list_backgrounds<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    list_files(dir, BACKGROUND_EXTENSIONS)
}

/// Resolve a requested background name to a file inside `dir`.
///
/// Only plain file names are accepted; anything with a directory part is
/// reported as not found.
pub fn resolve_background<P: AsRef<Path>>(dir: P, name: Option<&str>) -> Result<PathBuf> {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(CaptionError::MissingBackground)?;

    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    let path = dir.as_ref().join(name);
    if !plain || !path.is_file() {
        return Err(CaptionError::BackgroundNotFound(name.to_string()));
    }
    Ok(path)
}
