//! Tonal scales: a light-to-dark ramp of colors of the same family.
//!
//! The ramp goes from a light variant of the base color (relative
//! luminance raised to 0.9), through the base itself, to a dark variant
//! (luminance lowered to 0.05).  Both variants are mixes of the base
//! with white or black.  The ramp is interpolated in CIE L\*a\*b\*.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::color::{Color, ColorSource};
use crate::export::{self, ExportFormat};
use crate::{ColorRange, RGBColor};

/// Labels of the 11 shades of a [`ColorScale`], lightest first.
pub const STEP_LABELS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700,
                                    800, 900, 950];

const MAX_BISECTIONS: usize = 20;
const LUMINANCE_EPS: f64 = 1e-7;

/// Parameters of the scale generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Number of colors produced.
    pub steps: usize,
    /// Relative luminance of the lightest color.
    pub light_luminance: f64,
    /// Relative luminance of the darkest color.
    pub dark_luminance: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        ScaleConfig { steps: STEP_LABELS.len(), light_luminance: 0.9,
                      dark_luminance: 0.05 }
    }
}

impl Color {
    /// Return a color of relative luminance `target` obtained by
    /// mixing `self` with black (to darken) or white (to lighten).
    /// The channels of the result are rounded to integers.
    ///
    /// The mix proportion is found by bisection, to within `1e-7` of
    /// the target or after 20 halvings.
    pub fn with_luminance(&self, target: f64) -> Color {
        if target <= 0. {
            return Color::BLACK
        }
        if target >= 1. {
            return Color::WHITE
        }
        let (mut low, mut high) =
            if self.luminance() > target { (Color::BLACK, *self) }
            else { (*self, Color::WHITE) };
        let mut mid = low.mix(&high, 0.5);
        for _ in 0 .. MAX_BISECTIONS {
            let lum = mid.luminance();
            if (lum - target).abs() < LUMINANCE_EPS {
                return mid.rounded()
            }
            if lum > target { high = mid } else { low = mid }
            mid = low.mix(&high, 0.5);
        }
        debug!(color = %self, target, "luminance bisection exhausted");
        mid.rounded()
    }

    /// Return `steps` colors going from light to dark through `self`,
    /// with the default luminance bounds.  See [`Color::scale_with`].
    pub fn scale(&self, steps: usize) -> Vec<Color> {
        self.scale_with(&ScaleConfig { steps, ..ScaleConfig::default() })
    }

    /// Return `config.steps` colors sampled evenly, both ends included,
    /// along the L\*a\*b\* path lightest → `self` → darkest.
    /// No step gives an empty list and a single step gives `self`.
    pub fn scale_with(&self, config: &ScaleConfig) -> Vec<Color> {
        match config.steps {
            0 => vec![],
            1 => vec![*self],
            n => {
                let lightest = self.with_luminance(config.light_luminance);
                let darkest = self.with_luminance(config.dark_luminance);
                lightest.gradient(self).then(self.gradient(&darkest))
                    .samples(n).collect()
            }
        }
    }
}

/// Return `steps` hex colors from light to dark around `base`.
///
/// If `base` does not parse, a warning is logged and the list holds
/// `base` alone, unchanged.
pub fn generate_color_scale(base: impl ColorSource, steps: usize)
                            -> Vec<String> {
    match base.to_color() {
        Ok(c) => c.scale(steps).iter().map(Color::hex).collect(),
        Err(err) => {
            warn!(%err, "cannot generate a color scale");
            vec![base.fallback()]
        }
    }
}

/// One row of a [`ColorScale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shade {
    /// One of [`STEP_LABELS`].
    pub step: u16,
    pub color: Color,
}

/// The 11 shades of a base color, labelled 50 (lightest) to 950
/// (darkest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    base: Color,
    shades: [Shade; 11],
}

impl ColorScale {
    /// The scale of `base` with the default luminance bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use chromatone::{Color, ColorScale};
    /// let scale = ColorScale::new(Color::new(14, 165, 233));
    /// assert_eq!(scale.shade(500).map(|c| c.hex()), Some("#0ea5e9".into()));
    /// ```
    pub fn new(base: Color) -> Self {
        Self::with_config(base, &ScaleConfig::default())
    }

    /// The scale of `base` with the luminance bounds of `config`
    /// (`config.steps` is ignored: a `ColorScale` has 11 shades).
    pub fn with_config(base: Color, config: &ScaleConfig) -> Self {
        let colors = base.scale_with(
            &ScaleConfig { steps: STEP_LABELS.len(), ..*config });
        let shades = std::array::from_fn(|i| {
            Shade { step: STEP_LABELS[i],
                    color: colors.get(i).copied().unwrap_or(base) }
        });
        ColorScale { base, shades }
    }

    /// The color the scale was generated from.
    pub fn base(&self) -> Color { self.base }

    /// The shades, lightest first.
    pub fn shades(&self) -> &[Shade; 11] { &self.shades }

    /// Iterate over the shades, lightest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shade> + '_ {
        self.shades.iter()
    }

    /// The color labelled `step`, if `step` is one of [`STEP_LABELS`].
    pub fn shade(&self, step: u16) -> Option<Color> {
        self.shades.iter().find(|s| s.step == step).map(|s| s.color)
    }

    /// The shade labelled 50.
    pub fn lightest(&self) -> Color { self.shades[0].color }

    /// The shade labelled 950.
    pub fn darkest(&self) -> Color { self.shades[10].color }

    /// The 11 colors without their labels.
    pub fn colors(&self) -> Vec<Color> {
        self.shades.iter().map(|s| s.color).collect()
    }

    /// The 11 colors in `#rrggbb` notation.
    pub fn hex_strings(&self) -> Vec<String> {
        self.shades.iter().map(|s| s.color.hex()).collect()
    }

    /// The custom properties `--color-primary-<step>` with their hex
    /// values, for the caller to set on its style root.
    pub fn css_properties(&self) -> Vec<(String, String)> {
        self.shades.iter()
            .map(|s| (export::css_variable(s.step), s.color.hex()))
            .collect()
    }

    /// Serialize the scale, see [`crate::export_colors`].
    pub fn export(&self, format: ExportFormat) -> String {
        export::export_colors(&self.hex_strings(), format)
    }
}

impl<'a> IntoIterator for &'a ColorScale {
    type Item = &'a Shade;
    type IntoIter = std::slice::Iter<'a, Shade>;

    fn into_iter(self) -> Self::IntoIter { self.shades.iter() }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sky() -> Color { Color::new(14, 165, 233) }

    #[test]
    fn luminance_targets() {
        for c in [sky(), Color::WHITE, Color::BLACK, Color::new(200, 30, 30)] {
            let light = c.with_luminance(0.9);
            let dark = c.with_luminance(0.05);
            assert!((light.luminance() - 0.9).abs() < 0.01,
                    "{c}: {}", light.luminance());
            assert!((dark.luminance() - 0.05).abs() < 0.01,
                    "{c}: {}", dark.luminance());
        }
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(sky().with_luminance(0.), Color::BLACK);
        assert_eq!(sky().with_luminance(1.), Color::WHITE);
    }

    #[test]
    fn darkening_keeps_hue() {
        let (h0, _, _) = sky().hsl();
        let (h1, _, _) = sky().with_luminance(0.05).hsl();
        assert!((h0 - h1).abs() < 3., "{h0} vs {h1}");
    }

    #[test]
    fn eleven_steps() {
        let scale = sky().scale(11);
        assert_eq!(scale.len(), 11);
        assert_eq!(scale[5].hex(), "#0ea5e9");
        assert!(scale[0].luminance() > scale[10].luminance());
        assert!((scale[0].luminance() - 0.9).abs() < 0.01);
    }

    #[test]
    fn gray_scale_is_monotonic() {
        let scale = Color::new(128, 128, 128).scale(11);
        for w in scale.windows(2) {
            assert!(w[0].luminance() > w[1].luminance());
        }
    }

    #[test]
    fn degenerate_step_counts() {
        assert!(sky().scale(0).is_empty());
        assert_eq!(sky().scale(1), vec![sky()]);
        assert_eq!(sky().scale(2).len(), 2);
    }

    #[test]
    fn lenient_scale() {
        let v = generate_color_scale("#0ea5e9", 11);
        assert_eq!(v.len(), 11);
        assert!(v.iter().all(|c| c.len() == 7 && c.starts_with('#')));
        assert_eq!(generate_color_scale("bogus", 11), vec!["bogus"]);
    }

    #[test]
    fn scale_table() {
        let scale = ColorScale::new(sky());
        let steps: Vec<_> = scale.iter().map(|s| s.step).collect();
        assert_eq!(steps, STEP_LABELS);
        assert_eq!(scale.shade(500), Some(scale.shades()[5].color));
        assert_eq!(scale.shade(550), None);
        assert_eq!(scale.lightest(), scale.shades()[0].color);
        assert_eq!(scale.hex_strings(), generate_color_scale(sky(), 11));
    }

    #[test]
    fn css_properties() {
        let props = ColorScale::new(sky()).css_properties();
        assert_eq!(props.len(), 11);
        assert_eq!(props[0].0, "--color-primary-50");
        assert_eq!(props[10].0, "--color-primary-950");
        assert_eq!(props[5].1, "#0ea5e9");
    }

    #[test]
    fn config_from_json() {
        let config: ScaleConfig =
            serde_json::from_str(r#"{ "light_luminance": 0.8 }"#).unwrap();
        assert_eq!(config.steps, 11);
        assert_eq!(config.dark_luminance, 0.05);
        let scale = ColorScale::with_config(sky(), &config);
        assert!((scale.lightest().luminance() - 0.8).abs() < 0.01);
    }
}
