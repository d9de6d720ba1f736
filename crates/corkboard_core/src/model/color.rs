//! Note color spec parsing and contrast helper.
//!
//! # Responsibility
//! - Parse `#RGB`/`#RRGGBB` hex and `rgb(r, g, b)` color specs.
//! - Classify colors as dark or light for text contrast decisions.
//!
//! # Invariants
//! - Brightness uses the `(r*299 + g*587 + b*114) / 1000` weighting with
//!   a dark threshold below 150.
//! - Unparseable specs classify as light; storage never rejects them.

use once_cell::sync::Lazy;
use regex::Regex;

const DARK_BRIGHTNESS_THRESHOLD: u32 = 150;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));
static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("valid rgb regex")
});

/// Parses a color spec into RGB channels.
///
/// Accepts `#RGB`, `#RRGGBB` and `rgb(r, g, b)` with channels 0-255.
pub fn parse_color(spec: &str) -> Option<(u8, u8, u8)> {
    let spec = spec.trim();

    if let Some(caps) = HEX_RE.captures(spec) {
        let digits = caps.get(1)?.as_str();
        return match digits.len() {
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..=i], 16)
                        .ok()
                        .map(|v| v * 16 + v)
                };
                Some((channel(0)?, channel(1)?, channel(2)?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some((channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        };
    }

    if let Some(caps) = RGB_RE.captures(spec) {
        let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
        return Some((channel(1)?, channel(2)?, channel(3)?));
    }

    None
}

/// Returns whether a color spec is well formed.
pub fn is_valid_color(spec: &str) -> bool {
    parse_color(spec).is_some()
}

/// Returns whether text rendered over this color needs a light treatment.
///
/// Unparseable or empty specs return `false`.
pub fn is_dark(spec: &str) -> bool {
    let Some((r, g, b)) = parse_color(spec) else {
        return false;
    };
    let brightness = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    brightness < DARK_BRIGHTNESS_THRESHOLD
}
