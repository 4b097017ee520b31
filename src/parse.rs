//! Parsing and validation of color text.
//!
//! Accepted notations (case-insensitive, surrounding blanks ignored):
//!
//! - hexadecimal `#rgb` / `#rrggbb`, the `#` being optional;
//! - `rgb(r, g, b)` with integer channels (clamped to 0–255),
//!   `rgb(r%, g%, b%)` and `rgba(r, g, b, a)`;
//! - `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`;
//! - `cmyk(c%, m%, y%, k%)` with integer components in 0–100;
//! - CSS color keywords such as `white` or `rebeccapurple`.
//!
//! Alpha is accepted for compatibility but discarded.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use crate::color::{Color, InvalidColorFormat, Reason};
use crate::named;

const NUM: &str = r"(-?\d+(?:\.\d+)?)";
const ALPHA: &str = r"([01]|[01]?\.\d+)";

lazy_static! {
    static ref HEX: Regex = Regex::new(
        r"^#?([[:xdigit:]]{3}|[[:xdigit:]]{6})$").unwrap();
    static ref CMYK: Regex = Regex::new(
        r"(?i)^cmyk\(\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*\)$").unwrap();
    static ref RGB: Regex = Regex::new(
        r"^rgb\(\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*\)$").unwrap();
    static ref RGBA: Regex = Regex::new(&format!(
        r"^rgba\(\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*{ALPHA}\s*\)$")).unwrap();
    static ref RGB_PCT: Regex = Regex::new(&format!(
        r"^rgb\(\s*{NUM}%\s*,\s*{NUM}%\s*,\s*{NUM}%\s*\)$")).unwrap();
    static ref HSL: Regex = Regex::new(&format!(
        r"^hsl\(\s*{NUM}\s*,\s*{NUM}%\s*,\s*{NUM}%\s*\)$")).unwrap();
    static ref HSLA: Regex = Regex::new(&format!(
        r"^hsla\(\s*{NUM}\s*,\s*{NUM}%\s*,\s*{NUM}%\s*,\s*{ALPHA}\s*\)$")).unwrap();
}

/// Parse `text` as a color in any supported notation.
///
/// # Example
///
/// ```
/// use chromatone::parse_color;
/// let c = parse_color("rgb(14, 165, 233)").unwrap();
/// assert_eq!(c.hex(), "#0ea5e9");
/// ```
pub fn parse_color(text: &str) -> Result<Color, InvalidColorFormat> {
    let s = text.trim();
    if s.is_empty() {
        return Err(InvalidColorFormat::new(text, Reason::Empty))
    }
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("cmyk") {
        return parse_cmyk(s)
    }
    if let Some(rgb) = named::lookup(&lower) {
        return Ok(Color::from(rgb))
    }
    if let Some(m) = HEX.captures(s) {
        return Ok(hex_digits(&m[1]))
    }
    if s.starts_with('#') {
        return Err(InvalidColorFormat::new(text, Reason::Hex))
    }
    css_function(&lower)
        .ok_or_else(|| InvalidColorFormat::new(text, Reason::Unrecognized))
}

/// Parse a `cmyk(c%, m%, y%, k%)` notation.  Each component must be
/// an integer in 0–100.  Channels are rounded to integers.
pub fn parse_cmyk(text: &str) -> Result<Color, InvalidColorFormat> {
    let [c, m, y, k] = cmyk_components(text.trim())
        .ok_or_else(|| InvalidColorFormat::new(text, Reason::Cmyk))?;
    Ok(Color::from_cmyk(c / 100., m / 100., y / 100., k / 100.))
}

/// Whether `text` is a color.  Never fails: empty or malformed text
/// simply yields `false`.  `cmyk…` text is checked against the
/// `cmyk()` notation only.
pub fn is_valid_color(text: &str) -> bool {
    let s = text.trim();
    if s.is_empty() {
        return false
    }
    if s.to_ascii_lowercase().starts_with("cmyk") {
        return is_valid_cmyk(s)
    }
    parse_color(s).is_ok()
}

/// Whether `text` is `#rgb` or `#rrggbb` (the `#` is required here).
pub fn is_valid_hex(text: &str) -> bool {
    text.starts_with('#') && HEX.is_match(text)
}

/// Whether `text` is a `cmyk()` notation with components in 0–100.
pub fn is_valid_cmyk(text: &str) -> bool {
    cmyk_components(text.trim()).is_some()
}

fn cmyk_components(s: &str) -> Option<[f64; 4]> {
    let m = CMYK.captures(s)?;
    let mut v = [0.; 4];
    for (i, x) in v.iter_mut().enumerate() {
        let pct: u16 = m[i + 1].parse().ok()?;
        if pct > 100 {
            return None
        }
        *x = pct as f64;
    }
    Some(v)
}

/// `digits` has already been checked to be 3 or 6 hex digits.
fn hex_digits(digits: &str) -> Color {
    let nibble = |i: usize| {
        u8::from_str_radix(&digits[i .. i + 1], 16).unwrap_or(0)
    };
    let byte = |i: usize| {
        u8::from_str_radix(&digits[i .. i + 2], 16).unwrap_or(0)
    };
    if digits.len() == 3 {
        Color::new(17 * nibble(0), 17 * nibble(1), 17 * nibble(2))
    } else {
        Color::new(byte(0), byte(2), byte(4))
    }
}

/// Return the first `N` captures as reals.
fn numbers<const N: usize>(m: &Captures) -> Option<[f64; N]> {
    let mut v = [0.; N];
    for (i, x) in v.iter_mut().enumerate() {
        *x = m.get(i + 1)?.as_str().parse().ok()?;
    }
    Some(v)
}

/// Functional notations; `s` is lowercase and trimmed.
fn css_function(s: &str) -> Option<Color> {
    if let Some(m) = RGB.captures(s).or_else(|| RGBA.captures(s)) {
        let [r, g, b] = numbers(&m)?;
        return Some(Color::from_rgb_f64(r, g, b))
    }
    if let Some(m) = RGB_PCT.captures(s) {
        let [r, g, b] = numbers(&m)?;
        let pct = |x: f64| 255. * x / 100.;
        return Some(Color::from_rgb_f64(pct(r), pct(g), pct(b)))
    }
    if let Some(m) = HSL.captures(s).or_else(|| HSLA.captures(s)) {
        let [h, sat, l] = numbers(&m)?;
        return Some(Color::from_hsl(h, sat / 100., l / 100.))
    }
    None
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn rgb8(s: &str) -> RGB8 { parse_color(s).unwrap().rgb8() }

    #[test]
    fn hex_forms() {
        assert_eq!(rgb8("#0ea5e9"), RGB8::new(14, 165, 233));
        assert_eq!(rgb8("#0EA5E9"), RGB8::new(14, 165, 233));
        assert_eq!(rgb8("0ea5e9"), RGB8::new(14, 165, 233));
        assert_eq!(rgb8("#fa0"), RGB8::new(255, 170, 0));
        assert_eq!(rgb8("  #FFF "), RGB8::new(255, 255, 255));
    }

    #[test]
    fn bad_hex() {
        for s in ["#12", "#12345", "#gggggg", "#1234567"] {
            let err = parse_color(s).unwrap_err();
            assert_eq!(err.reason(), Reason::Hex, "{s}");
        }
    }

    #[test]
    fn rgb_forms() {
        assert_eq!(rgb8("rgb(14, 165, 233)"), RGB8::new(14, 165, 233));
        assert_eq!(rgb8("RGB(14,165,233)"), RGB8::new(14, 165, 233));
        assert_eq!(rgb8("rgb(300, -5, 0)"), RGB8::new(255, 0, 0));
        assert_eq!(rgb8("rgba(1, 2, 3, 0.5)"), RGB8::new(1, 2, 3));
        assert_eq!(rgb8("rgb(100%, 50%, 0%)"), RGB8::new(255, 128, 0));
    }

    #[test]
    fn hsl_forms() {
        assert_eq!(rgb8("hsl(0, 100%, 50%)"), RGB8::new(255, 0, 0));
        assert_eq!(rgb8("hsla(120, 100%, 25%, 1)"), RGB8::new(0, 128, 0));
        assert_eq!(rgb8("hsl(0, 0%, 100%)"), RGB8::new(255, 255, 255));
    }

    #[test]
    fn named_colors() {
        assert_eq!(rgb8("white"), RGB8::new(255, 255, 255));
        assert_eq!(rgb8("Black"), RGB8::new(0, 0, 0));
        assert_eq!(rgb8("SkyBlue"), RGB8::new(135, 206, 235));
    }

    #[test]
    fn cmyk_notation() {
        assert_eq!(rgb8("cmyk(0%, 0%, 0%, 0%)"), RGB8::new(255, 255, 255));
        assert_eq!(rgb8("CMYK(0%,100%,100%,0%)"), RGB8::new(255, 0, 0));
        assert_eq!(rgb8("cmyk(10%, 20%, 30%, 40%)"), RGB8::new(138, 122, 107));
        let err = parse_color("cmyk(110%, 0%, 0%, 0%)").unwrap_err();
        assert_eq!(err.reason(), Reason::Cmyk);
        assert_eq!(parse_cmyk("cmyk(1, 2, 3, 4)").unwrap_err().reason(),
                   Reason::Cmyk);
    }

    #[test]
    fn rejected() {
        assert_eq!(parse_color("").unwrap_err().reason(), Reason::Empty);
        assert_eq!(parse_color("   ").unwrap_err().reason(), Reason::Empty);
        for s in ["notacolor", "rgb(1, 2)", "hsl(10, 20, 30)", "rgba(1,2,3,4)"] {
            assert_eq!(parse_color(s).unwrap_err().reason(),
                       Reason::Unrecognized, "{s}");
        }
    }

    #[test]
    fn validator() {
        assert!(is_valid_color("#0ea5e9"));
        assert!(is_valid_color("white"));
        assert!(is_valid_color("cmyk(10%, 20%, 30%, 40%)"));
        assert!(is_valid_color("cmyk(100%,100%,100%,100%)"));
        assert!(!is_valid_color("cmyk(110%,0%,0%,0%)"));
        assert!(!is_valid_color("cmyk(10, 20, 30, 40)"));
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("#xyz"));
    }

    #[test]
    fn hex_validator_requires_hash() {
        assert!(is_valid_hex("#abc"));
        assert!(is_valid_hex("#AABBCC"));
        assert!(!is_valid_hex("aabbcc"));
        assert!(!is_valid_hex("#abcd"));
        assert!(!is_valid_hex(""));
    }
}
