//! Serialization of an 11-shade palette into configuration text.

use std::fmt::{self, Write};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::format::UnknownFormat;
use crate::scale::STEP_LABELS;

/// The color used when the palette to export is empty.
pub const DEFAULT_SEED: &str = "#0ea5e9";

/// Name of the palette in the exported variables.
pub const PALETTE_NAME: &str = "primary";

/// Targets of [`export_colors`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
         Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// A `tailwind.config.js` extending the theme colors.
    Tailwind,
    /// CSS custom properties on `:root`.
    Css,
    /// SCSS variables and a map.
    Scss,
    /// A JSON array of the 11 colors.
    #[default]
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [ExportFormat::Tailwind,
                                        ExportFormat::Css, ExportFormat::Scss,
                                        ExportFormat::Json];

    pub const fn name(&self) -> &'static str {
        match self {
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a format name, unknown names giving [`ExportFormat::Json`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Tailwind => "js",
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
        }
    }

    /// Suggested name of the downloaded file, `color-palette.<ext>`.
    pub fn file_name(&self) -> String {
        format!("color-palette.{}", self.extension())
    }

    /// MIME type of the exported text.
    pub const fn mime_type(&self) -> &'static str { "text/plain" }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ExportFormat::ALL.into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Name of the CSS custom property of the shade `step`.
pub(crate) fn css_variable(step: u16) -> String {
    format!("--color-{PALETTE_NAME}-{step}")
}

/// Pair each step label with a color.  Missing colors repeat the last
/// one given ([`DEFAULT_SEED`] if none or empty), extra colors are
/// dropped.
fn labelled<S: AsRef<str>>(colors: &[S]) -> [(u16, &str); 11] {
    let last: &str = colors.last().map(|c| c.as_ref())
        .filter(|c| !c.is_empty()).unwrap_or(DEFAULT_SEED);
    std::array::from_fn(|i| {
        (STEP_LABELS[i], colors.get(i).map_or(last, |c| c.as_ref()))
    })
}

fn tailwind(out: &mut impl Write, table: &[(u16, &str)]) -> fmt::Result {
    writeln!(out, "module.exports = {{\n  \
                   theme: {{\n    \
                   extend: {{\n      \
                   colors: {{\n        \
                   {PALETTE_NAME}: {{")?;
    for (step, color) in table {
        writeln!(out, "          {step}: '{color}',")?;
    }
    write!(out, "        }},\n      }},\n    }},\n  }},\n}}")
}

fn css(out: &mut impl Write, table: &[(u16, &str)]) -> fmt::Result {
    writeln!(out, ":root {{")?;
    for (step, color) in table {
        writeln!(out, "  {}: {color};", css_variable(*step))?;
    }
    write!(out, "}}")
}

fn scss(out: &mut impl Write, table: &[(u16, &str)]) -> fmt::Result {
    writeln!(out, "// {PALETTE_NAME} color variables")?;
    for (step, color) in table {
        writeln!(out, "${}: {color};", &css_variable(*step)[2..])?;
    }
    writeln!(out, "\n// {PALETTE_NAME} color map")?;
    writeln!(out, "$colors-{PALETTE_NAME}: (")?;
    for (step, color) in table {
        writeln!(out, "  {step}: {color},")?;
    }
    write!(out, ");")
}

fn json(table: &[(u16, &str)]) -> String {
    let colors: Vec<&str> = table.iter().map(|&(_, c)| c).collect();
    match serde_json::to_string_pretty(&colors) {
        Ok(s) => s,
        Err(err) => {
            warn!(%err, "cannot serialize the palette");
            "[]".to_string()
        }
    }
}

/// Write the 11 shades `colors` (lightest first) for the target
/// `format`.  The colors are written as given, they are not parsed.
///
/// `colors` is brought to 11 entries first: an empty slice stands for
/// [`DEFAULT_SEED`], a short one is padded with its last color (or
/// with [`DEFAULT_SEED`] if that one is empty) and a long one is
/// truncated.
///
/// # Example
///
/// ```
/// use chromatone::{export_colors, ExportFormat};
/// let css = export_colors(&["#f0f9ff", "#e0f2fe"], ExportFormat::Css);
/// assert!(css.starts_with(":root {\n  --color-primary-50: #f0f9ff;\n"));
/// assert!(css.ends_with("  --color-primary-950: #e0f2fe;\n}"));
/// ```
pub fn export_colors<S: AsRef<str>>(colors: &[S], format: ExportFormat)
                                    -> String {
    let table = labelled(colors);
    let mut out = String::new();
    let written = match format {
        ExportFormat::Tailwind => tailwind(&mut out, &table),
        ExportFormat::Css => css(&mut out, &table),
        ExportFormat::Scss => scss(&mut out, &table),
        ExportFormat::Json => return json(&table),
    };
    match written {
        Ok(()) => out,
        Err(err) => {
            warn!(%err, %format, "export failed, falling back to JSON");
            json(&table)
        }
    }
}
