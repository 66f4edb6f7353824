//! IGDB image URL canonicalization.
//!
//! IGDB hands out protocol-relative URLs with small size tokens baked into
//! the path (`//images.igdb.com/igdb/image/upload/t_thumb/abc.jpg`). Every
//! image shown to the user goes through [`canonicalize_image_url`] so it is
//! absolute HTTPS and uses the large variant.

use serde_json::Value;

/// Size tokens that get upgraded to the target size.
const SMALL_SIZE_TOKENS: &[&str] = &["t_thumb", "t_screenshot_med"];

/// Target IGDB size class for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    CoverBig,
    ScreenshotBig,
}

impl ImageSize {
    pub fn token(&self) -> &'static str {
        match self {
            Self::CoverBig => "t_cover_big",
            Self::ScreenshotBig => "t_screenshot_big",
        }
    }
}

/// Make an image URL absolute HTTPS and upgrade its size token.
///
/// Empty input yields an empty string; callers render a placeholder.
pub fn canonicalize_image_url(url: &str, size: ImageSize) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    let mut out = if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    };

    for token in SMALL_SIZE_TOKENS {
        if out.contains(token) {
            out = out.replace(token, size.token());
        }
    }
    out
}

/// Extract an image URL from either a bare string or an object with a `url`
/// field, then canonicalize it.
pub fn image_from_value(value: &Value, size: ImageSize) -> String {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("url").and_then(Value::as_str).unwrap_or(""),
        _ => "",
    };
    canonicalize_image_url(raw, size)
}

#[cfg(test)]
#[path = "tests/image_tests.rs"]
mod tests;
