//! Font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so every face must be registered
//! with `plotters` before it can be measured or drawn. Files from the font
//! directory are registered under their file name; a system face (if one can
//! be found) is registered as [`FALLBACK_FAMILY`].

use log::{info, warn};
use plotters::style::FontStyle;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::assets::list_fonts;
use crate::error::{CaptionError, Result};

/// Family used when no font was requested or the request names an unknown one.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Well-known locations of a plain sans-serif face.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// Registered bytes are leaked (`plotters` wants `&'static [u8]`); tracking
// names keeps repeated loads from leaking the same file again.
static REGISTERED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());
static FALLBACK: OnceLock<Option<PathBuf>> = OnceLock::new();

/// True if `family` has been registered in this process.
pub fn is_registered(family: &str) -> bool {
    REGISTERED
        .lock()
        .map(|set| set.contains(family))
        .unwrap_or(false)
}

/// Register raw font bytes under `family`.
///
/// The face is registered for both the regular and bold style; bold is
/// emulated at draw time. Registering a family twice is a no-op.
pub fn register_font_bytes(family: &str, bytes: Vec<u8>) -> Result<()> {
    let mut set = REGISTERED.lock().map_err(|_| CaptionError::FontUnavailable {
        family: family.to_string(),
        reason: "font registry poisoned".into(),
    })?;
    if set.contains(family) {
        return Ok(());
    }
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    for style in [FontStyle::Normal, FontStyle::Bold] {
        plotters::style::register_font(family, style, bytes).map_err(|_| {
            CaptionError::FontUnavailable {
                family: family.to_string(),
                reason: "not a valid TrueType/OpenType font".into(),
            }
        })?;
    }
    set.insert(family.to_string());
    Ok(())
}

/// Read `path` and register it under `family`.
pub fn register_font_file<P: AsRef<Path>>(family: &str, path: P) -> Result<()> {
    let bytes = fs::read(path.as_ref())?;
    register_font_bytes(family, bytes)
}

/// Register [`FALLBACK_FAMILY`] once per process.
///
/// `preferred` is tried before the built-in system locations. Returns the
/// file that was registered, if any.
pub fn ensure_fallback_registered(preferred: Option<&Path>) -> Option<&'static Path> {
    FALLBACK
        .get_or_init(|| {
            let candidates = preferred
                .map(Path::to_path_buf)
                .into_iter()
                .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
            for path in candidates {
                if !path.is_file() {
                    continue;
                }
                match register_font_file(FALLBACK_FAMILY, &path) {
                    Ok(()) => {
                        info!("fallback font: {}", path.display());
                        return Some(path);
                    }
                    Err(e) => warn!("skipping fallback font {}: {}", path.display(), e),
                }
            }
            warn!("no fallback font found; captions need a font from the font directory");
            None
        })
        .as_deref()
}

/// Fonts loaded from the font directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<String>,
}

impl FontCatalog {
    /// Register every font file in `dir`. Unreadable or invalid files are
    /// logged and skipped; a missing directory gives an empty catalog.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut families = Vec::new();
        for name in list_fonts(dir)? {
            match register_font_file(&name, dir.join(&name)) {
                Ok(()) => families.push(name),
                Err(e) => warn!("skipping font {}: {}", name, e),
            }
        }
        info!("registered {} font(s) from {}", families.len(), dir.display());
        Ok(Self { families })
    }

    /// Registered font names, in listing order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// First font of the directory, or the fallback family.
    pub fn default_family(&self) -> &str {
        self.families
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_FAMILY)
    }

    /// Family to use for a request. Blank or unknown names fall back to
    /// [`Self::default_family`].
    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim).filter(|r| !r.is_empty()) {
            Some(name) if self.families.iter().any(|f| f == name) || is_registered(name) => {
                name.to_string()
            }
            Some(name) => {
                warn!("font {} not registered, using {}", name, self.default_family());
                self.default_family().to_string()
            }
            None => self.default_family().to_string(),
        }
    }
}
