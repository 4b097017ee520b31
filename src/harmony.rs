//! Hue rotations on the color wheel.

use serde::Serialize;
use tracing::warn;
use crate::color::{Color, ColorSource};

/// Colors related to a base color by a hue rotation, saturation and
/// lightness being kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarmonySet<C> {
    /// Hue + 180°.
    pub complementary: C,
    /// Hue + 30° and hue − 30°.
    pub analogous: [C; 2],
    /// Hue + 120° and hue + 240°.
    pub triadic: [C; 2],
}

impl<C> HarmonySet<C> {
    /// Apply `f` to every slot.
    pub fn map<D>(self, mut f: impl FnMut(C) -> D) -> HarmonySet<D> {
        let [a1, a2] = self.analogous;
        let [t1, t2] = self.triadic;
        HarmonySet { complementary: f(self.complementary),
                     analogous: [f(a1), f(a2)],
                     triadic: [f(t1), f(t2)] }
    }

    /// A set whose every slot is `c`.
    fn uniform(c: C) -> Self where C: Clone {
        HarmonySet { complementary: c.clone(),
                     analogous: [c.clone(), c.clone()],
                     triadic: [c.clone(), c] }
    }
}

impl Color {
    /// Rotate the hue by `degrees` (any sign), keeping the saturation
    /// and lightness.
    pub fn rotate_hue(&self, degrees: f64) -> Color {
        let (h, s, l) = self.hsl();
        Color::from_hsl((h + degrees).rem_euclid(360.), s, l)
    }

    /// The complementary, analogous and triadic colors of `self`.
    pub fn harmonies(&self) -> HarmonySet<Color> {
        HarmonySet {
            complementary: self.rotate_hue(180.),
            analogous: [self.rotate_hue(30.), self.rotate_hue(-30.)],
            triadic: [self.rotate_hue(120.), self.rotate_hue(240.)],
        }
    }
}

/// Return the harmonies of `base` as hex colors.
///
/// If `base` does not parse, a warning is logged and every slot holds
/// `base` unchanged.
pub fn generate_related_colors(base: impl ColorSource) -> HarmonySet<String> {
    match base.to_color() {
        Ok(c) => c.harmonies().map(|c| c.hex()),
        Err(err) => {
            warn!(%err, "cannot generate related colors");
            HarmonySet::uniform(base.fallback())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.);
        d.min(360. - d)
    }

    #[test]
    fn primaries() {
        let set = generate_related_colors("#ff0000");
        assert_eq!(set.complementary, "#00ffff");
        assert_eq!(set.triadic, ["#00ff00", "#0000ff"]);
        let [plus, minus] = Color::new(255, 0, 0).harmonies().analogous;
        assert!((plus.hsl().0 - 30.).abs() < 1e-6);
        assert!((minus.hsl().0 - 330.).abs() < 1e-6);
    }

    #[test]
    fn complementary_keeps_saturation_and_lightness() {
        let base = Color::new(14, 165, 233);
        let (h0, s0, l0) = base.hsl();
        let comp = base.harmonies().complementary.rounded();
        let (h1, s1, l1) = comp.hsl();
        assert!((hue_distance(h0, h1) - 180.).abs() <= 1.);
        assert!((s0 - s1).abs() < 0.01);
        assert!((l0 - l1).abs() < 0.01);
    }

    #[test]
    fn analogous_wraps_below_zero() {
        let base = Color::from_hsl(10., 0.8, 0.5);
        let [_, minus] = base.harmonies().analogous;
        let (h, _, _) = minus.hsl();
        assert!((h - 340.).abs() < 1e-6, "{h}");
    }

    #[test]
    fn gray_is_its_own_harmony() {
        let set = generate_related_colors("#777777");
        assert_eq!(set, HarmonySet::uniform("#777777".to_string()));
    }

    #[test]
    fn invalid_base() {
        let set = generate_related_colors("nope");
        assert_eq!(set.complementary, "nope");
        assert_eq!(set.analogous, ["nope", "nope"]);
        assert_eq!(set.triadic, ["nope", "nope"]);
    }
}
