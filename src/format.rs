//! Textual notations of a [`Color`].

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use crate::color::{Color, ColorSource};

/// A format name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format {0:?}")]
pub struct UnknownFormat(pub String);

/// Textual color notations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
         Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `#rrggbb`, lowercase.
    #[default]
    Hex,
    /// `rgb(R, G, B)` with integer channels in 0–255.
    Rgb,
    /// `hsl(H, S%, L%)` with integer degrees in 0–359.
    Hsl,
    /// `cmyk(C%, M%, Y%, K%)`.
    Cmyk,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Hex, Format::Rgb, Format::Hsl,
                                  Format::Cmyk];

    pub const fn name(&self) -> &'static str {
        match self {
            Format::Hex => "hex",
            Format::Rgb => "rgb",
            Format::Hsl => "hsl",
            Format::Cmyk => "cmyk",
        }
    }

    /// Parse a format name, unknown names giving [`Format::Hex`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Format::ALL.into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Largest 8-bit channel error of a color written with [`Format::Hsl`]
/// and parsed back.
pub const HSL_TEXT_TOLERANCE: u8 = 5;

/// Largest 8-bit channel error of a color written with
/// [`Format::Cmyk`] and parsed back.
pub const CMYK_TEXT_TOLERANCE: u8 = 2;

impl Color {
    /// Integer hue in 0–359, saturation and lightness percentages.
    fn hsl_rounded(&self) -> (u16, u8, u8) {
        let (h, s, l) = self.hsl();
        ((h.round() as u16) % 360, (100. * s).round() as u8,
         (100. * l).round() as u8)
    }

    fn cmyk_rounded(&self) -> [u8; 4] {
        self.cmyk().map(|x| (100. * x).round() as u8)
    }

    /// Return the color written in `format`.
    ///
    /// Hex and rgb notations parse back to the same 8-bit channels.
    /// The integer components of the hsl and cmyk notations lose
    /// precision: parsing them back gives channels within
    /// [`HSL_TEXT_TOLERANCE`] and [`CMYK_TEXT_TOLERANCE`] of the
    /// original ones.
    ///
    /// # Example
    ///
    /// ```
    /// use chromatone::{Color, Format};
    /// let c = Color::new(14, 165, 233);
    /// assert_eq!(c.format(Format::Rgb), "rgb(14, 165, 233)");
    /// assert_eq!(c.format(Format::Hsl), "hsl(199, 89%, 48%)");
    /// assert_eq!(c.format(Format::Cmyk), "cmyk(94%, 29%, 0%, 9%)");
    /// ```
    pub fn format(&self, format: Format) -> String {
        match format {
            Format::Hex => self.hex(),
            Format::Rgb => {
                let rgb::RGB8 { r, g, b } = self.rgb8();
                format!("rgb({r}, {g}, {b})")
            }
            Format::Hsl => {
                let (h, s, l) = self.hsl_rounded();
                format!("hsl({h}, {s}%, {l}%)")
            }
            Format::Cmyk => {
                let [c, m, y, k] = self.cmyk_rounded();
                format!("cmyk({c}%, {m}%, {y}%, {k}%)")
            }
        }
    }

    /// Return the color broken down in every notation.
    pub fn values(&self) -> ColorValues {
        let rgb::RGB8 { r, g, b } = self.rgb8();
        let (h, s, l) = self.hsl_rounded();
        let [c, m, y, k] = self.cmyk_rounded();
        ColorValues {
            hex: self.hex(),
            rgb: RgbValues { r, g, b, string: self.format(Format::Rgb) },
            hsl: HslValues { h, s, l, string: self.format(Format::Hsl) },
            cmyk: CmykValues { c, m, y, k, string: self.format(Format::Cmyk) },
            luminance: (100. * self.luminance()).round() / 100.,
        }
    }
}

/// Convert `color` to the notation `format`.
///
/// If `color` does not parse, a warning is logged and the input is
/// returned unchanged.
pub fn convert_color(color: impl ColorSource, format: Format) -> String {
    match color.to_color() {
        Ok(c) => c.format(format),
        Err(err) => {
            warn!(%err, %format, "cannot convert color, keeping it as is");
            color.fallback()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RgbValues {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HslValues {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmykValues {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
    pub string: String,
}

/// A color in every notation, with its integer components and its
/// relative luminance rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorValues {
    pub hex: String,
    pub rgb: RgbValues,
    pub hsl: HslValues,
    pub cmyk: CmykValues,
    pub luminance: f64,
}

impl ColorValues {
    /// All components zero, `hex` holding the text that did not parse.
    fn unparsed(hex: String) -> Self {
        ColorValues {
            hex,
            rgb: RgbValues { r: 0, g: 0, b: 0,
                             string: "rgb(0, 0, 0)".to_string() },
            hsl: HslValues { h: 0, s: 0, l: 0,
                             string: "hsl(0, 0%, 0%)".to_string() },
            cmyk: CmykValues { c: 0, m: 0, y: 0, k: 0,
                               string: "cmyk(0%, 0%, 0%, 0%)".to_string() },
            luminance: 0.,
        }
    }
}

/// Return `color` in every notation.  If `color` does not parse, a
/// warning is logged and the result has zero components with the raw
/// input as `hex`.
pub fn color_values(color: impl ColorSource) -> ColorValues {
    match color.to_color() {
        Ok(c) => c.values(),
        Err(err) => {
            warn!(%err, "cannot analyse color");
            ColorValues::unparsed(color.fallback())
        }
    }
}
