//! The canonical color value all notations derive from.

use std::fmt;
use std::str::FromStr;
use rgb::{RGB, RGB8, RGBA};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use crate::{parse, RGBColor};

/// Why a piece of text is not a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("empty input")]
    Empty,
    #[error("malformed hexadecimal notation")]
    Hex,
    #[error("malformed cmyk() notation or component above 100%")]
    Cmyk,
    #[error("not a hex, rgb(), hsl(), cmyk() or named color")]
    Unrecognized,
}

/// The text given as a color could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color format {input:?}: {reason}")]
pub struct InvalidColorFormat {
    input: String,
    reason: Reason,
}

impl InvalidColorFormat {
    pub(crate) fn new(input: &str, reason: Reason) -> Self {
        Self { input: input.to_string(), reason }
    }

    /// The rejected text.
    pub fn input(&self) -> &str { &self.input }

    /// Which notation the text failed to match.
    pub fn reason(&self) -> Reason { self.reason }
}

/// An sRGB color.
///
/// Channels are kept as reals in \[0, 255\] so that derived colors
/// (gradients, luminance adjustments) do not accumulate rounding.
/// Every textual notation is computed on demand; 8-bit values are
/// obtained by rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    rgb: RGB<f64>,
}

impl Color {
    pub const BLACK: Color = Color { rgb: RGB { r: 0., g: 0., b: 0. } };
    pub const WHITE: Color = Color { rgb: RGB { r: 255., g: 255., b: 255. } };

    /// Create a color from 8-bit channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { rgb: RGB { r: r as f64, g: g as f64, b: b as f64 } }
    }

    /// Create a color from real channels in \[0, 255\].  Values outside
    /// this range are clamped and NaN is taken as `0`.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        fn clamp(x: f64) -> f64 {
            if x.is_nan() { 0. } else { x.clamp(0., 255.) }
        }
        Color { rgb: RGB { r: clamp(r), g: clamp(g), b: clamp(b) } }
    }

    /// Create a color from its hue `h` (in degrees, any real), its
    /// saturation `s` and lightness `l` (both in \[0, 1\]).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0., 1.);
        let l = l.clamp(0., 1.);
        if s == 0. {
            let v = 255. * l;
            return Color::from_rgb_f64(v, v, v)
        }
        let t2 = if l < 0.5 { l * (1. + s) } else { l + s - l * s };
        let t1 = 2. * l - t2;
        let h = h.rem_euclid(360.) / 360.;
        let channel = |t: f64| {
            let t = if t < 0. { t + 1. } else if t > 1. { t - 1. } else { t };
            let c = if 6. * t < 1. { t1 + (t2 - t1) * 6. * t }
                    else if 2. * t < 1. { t2 }
                    else if 3. * t < 2. { t1 + (t2 - t1) * (2. / 3. - t) * 6. }
                    else { t1 };
            255. * c
        };
        Color::from_rgb_f64(channel(h + 1. / 3.), channel(h),
                            channel(h - 1. / 3.))
    }

    /// Create a color from its cyan, magenta, yellow and key (black)
    /// components in \[0, 1\].  Channels are rounded to integers.
    pub fn from_cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        let ch = |x: f64| (255. * (1. - x) * (1. - k)).round();
        Color::from_rgb_f64(ch(c), ch(m), ch(y))
    }

    /// Return the real channels, in \[0, 255\].
    pub fn rgb(&self) -> RGB<f64> { self.rgb }

    /// Return the channels rounded to 8 bits.
    pub fn rgb8(&self) -> RGB8 {
        RGB8::from_rgba(self.to_rgba())
    }

    /// Return the `#rrggbb` notation (lowercase).
    pub fn hex(&self) -> String {
        let RGB8 { r, g, b } = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Return the hue in degrees in \[0, 360), the saturation and the
    /// lightness in \[0, 1\].  The hue of an achromatic color is `0`.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let r = self.rgb.r / 255.;
        let g = self.rgb.g / 255.;
        let b = self.rgb.b / 255.;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.;
        if max == min {
            return (0., 0., l)
        }
        let d = max - min;
        let s = if l < 0.5 { d / (max + min) } else { d / (2. - max - min) };
        let h = if r == max { (g - b) / d }
                else if g == max { 2. + (b - r) / d }
                else { 4. + (r - g) / d };
        ((60. * h).rem_euclid(360.), s, l)
    }

    /// Return the cyan, magenta, yellow and key components in \[0, 1\]
    /// (subtractive conversion, no color management).
    pub fn cmyk(&self) -> [f64; 4] {
        let r = self.rgb.r / 255.;
        let g = self.rgb.g / 255.;
        let b = self.rgb.b / 255.;
        let k = 1. - r.max(g).max(b);
        if k >= 1. {
            return [0., 0., 0., 1.]
        }
        let f = 1. / (1. - k);
        [(1. - r - k) * f, (1. - g - k) * f, (1. - b - k) * f, k]
    }

    /// Whether every 8-bit channel is a multiple of 51.
    pub fn is_web_safe(&self) -> bool {
        let RGB8 { r, g, b } = self.rgb8();
        r % 51 == 0 && g % 51 == 0 && b % 51 == 0
    }

    /// Linear interpolation of the channels, `t = 0.` giving `self`.
    pub(crate) fn mix(&self, other: &Color, t: f64) -> Color {
        let lerp = |a: f64, b: f64| a + t * (b - a);
        Color::from_rgb_f64(lerp(self.rgb.r, other.rgb.r),
                            lerp(self.rgb.g, other.rgb.g),
                            lerp(self.rgb.b, other.rgb.b))
    }

    /// The same color with channels rounded to integers.
    pub(crate) fn rounded(&self) -> Color { Color::from(self.rgb8()) }
}

impl RGBColor for Color {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA { r: self.rgb.r, g: self.rgb.g, b: self.rgb.b, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { Color::from_rgb_f64(c.r, c.g, c.b) }
}

impl From<RGB8> for Color {
    fn from(c: RGB8) -> Self { Color::new(c.r, c.g, c.b) }
}

impl From<Color> for RGB8 {
    fn from(c: Color) -> Self { c.rgb8() }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = InvalidColorFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parse::parse_color(s) }
}

impl TryFrom<&str> for Color {
    type Error = InvalidColorFormat;

    fn try_from(s: &str) -> Result<Self, Self::Error> { parse::parse_color(s) }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S)
                                -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D)
                                         -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse::parse_color(&s).map_err(de::Error::custom)
    }
}

/// Anything the lenient functions accept as a color: text in any
/// notation [`crate::parse_color`] understands, or an already parsed
/// color.
pub trait ColorSource {
    /// Parse (if needed) into a [`Color`].
    fn to_color(&self) -> Result<Color, InvalidColorFormat>;

    /// The value handed back unchanged when [`Self::to_color`] fails.
    fn fallback(&self) -> String;
}

impl ColorSource for str {
    fn to_color(&self) -> Result<Color, InvalidColorFormat> {
        parse::parse_color(self)
    }

    fn fallback(&self) -> String { self.to_string() }
}

impl ColorSource for String {
    fn to_color(&self) -> Result<Color, InvalidColorFormat> {
        parse::parse_color(self)
    }

    fn fallback(&self) -> String { self.clone() }
}

impl ColorSource for Color {
    fn to_color(&self) -> Result<Color, InvalidColorFormat> { Ok(*self) }

    fn fallback(&self) -> String { self.hex() }
}

impl ColorSource for RGB8 {
    fn to_color(&self) -> Result<Color, InvalidColorFormat> {
        Ok(Color::from(*self))
    }

    fn fallback(&self) -> String { Color::from(*self).hex() }
}

impl<T: ColorSource + ?Sized> ColorSource for &T {
    fn to_color(&self) -> Result<Color, InvalidColorFormat> {
        (**self).to_color()
    }

    fn fallback(&self) -> String { (**self).fallback() }
}
