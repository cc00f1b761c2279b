use serde::{Deserialize, Serialize};

use crate::error::CaptionError;

/// A caption render request, as posted by the web client.
///
/// Field names follow the JSON body (`bgImage`, `fontSize`, ...). Numeric
/// fields accept either a number or a numeric string, since form inputs are
/// sent as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub bg_image: Option<String>,
    /// Font file name from the font directory; blank means "default".
    #[serde(default)]
    pub font_file: Option<String>,
    #[serde(
        default = "default_font_size",
        deserialize_with = "de_u32_from_string_or_number"
    )]
    pub font_size: u32,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default)]
    pub use_outline: bool,
    #[serde(
        default = "default_outline_width",
        deserialize_with = "de_u32_from_string_or_number"
    )]
    pub outline_width: u32,
    #[serde(default)]
    pub use_bold: bool,
}

fn default_font_size() -> u32 {
    100
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

fn default_outline_width() -> u32 {
    2
}

impl Default for CaptionRequest {
    fn default() -> Self {
        Self {
            text: None,
            bg_image: None,
            font_file: None,
            font_size: default_font_size(),
            text_color: default_text_color(),
            use_outline: false,
            outline_width: default_outline_width(),
            use_bold: false,
        }
    }
}

impl CaptionRequest {
    /// Caption text, if there is any to draw.
    pub fn caption_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Requested font, with blank treated as absent.
    pub fn font_name(&self) -> Option<&str> {
        self.font_file.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Outline radius in pixels, if outlining is on.
    pub fn outline_px(&self) -> Option<u32> {
        self.use_outline.then_some(self.outline_width)
    }
}

/// Serde helper: parse `u32` from a JSON number or a string.
///
/// Fractions are truncated and surrounding whitespace is ignored, the way a
/// form field would be read.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number representing a non-negative integer")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !v.is_finite() || v < 0.0 || v > f64::from(u32::MAX) {
                return Err(E::custom(format!("{v} is not a valid size")));
            }
            Ok(v.trunc() as u32)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.trim();
            match s.parse::<u32>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    let v = s.parse::<f64>().map_err(E::custom)?;
                    self.visit_f64(v)
                }
            }
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// JSON reply for a render: `{success, imageUrl, filename}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Success {
        success: bool,
        #[serde(rename = "imageUrl")]
        image_url: String,
        filename: String,
    },
    Failure {
        error: String,
    },
}

impl ApiResponse {
    pub fn success(image_url: impl Into<String>, filename: impl Into<String>) -> Self {
        ApiResponse::Success {
            success: true,
            image_url: image_url.into(),
            filename: filename.into(),
        }
    }

    pub fn failure(err: &CaptionError) -> Self {
        ApiResponse::Failure {
            error: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { success: true, .. })
    }
}
