//! WCAG 2 relative luminance and contrast ratio.

use serde::Serialize;
use tracing::warn;
use crate::color::{Color, ColorSource};

/// Minimum contrast for normal text, level AA.
pub const AA_NORMAL: f64 = 4.5;
/// Minimum contrast for normal text, level AAA.
pub const AAA_NORMAL: f64 = 7.0;
/// Minimum contrast for large text and UI components, level AA.
pub const AA_LARGE: f64 = 3.0;
/// Below this the pair is hardly distinguishable.
pub const MIN_READABLE: f64 = 2.0;

/// sRGB channel in \[0, 255\] to linear light.
fn linearize(c: f64) -> f64 {
    let c = c / 255.;
    if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

impl Color {
    /// Relative luminance, in \[0, 1\].
    pub fn luminance(&self) -> f64 {
        let rgb = self.rgb();
        0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g)
            + 0.0722 * linearize(rgb.b)
    }

    /// Contrast ratio with `other`, in \[1, 21\].  Symmetric.
    pub fn contrast(&self, other: &Color) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Evaluate `self` as text color over `background`.
    pub fn accessibility_on(&self, background: &Color) -> AccessibilityResult {
        AccessibilityResult::from_contrast(self.contrast(background))
    }
}

/// Contrast ratio between `a` and `b`.
///
/// If either does not parse, a warning is logged and `1.` (no
/// contrast at all) is returned.
pub fn contrast(a: impl ColorSource, b: impl ColorSource) -> f64 {
    match (a.to_color(), b.to_color()) {
        (Ok(a), Ok(b)) => a.contrast(&b),
        (Err(err), _) | (_, Err(err)) => {
            warn!(%err, "cannot compute contrast");
            1.
        }
    }
}

/// Coarse grade of a contrast ratio: 100 from 7:1, 80 from 4.5:1,
/// 60 from 3:1, 40 from 2:1, 20 below.
pub fn score(contrast: f64) -> u8 {
    if contrast >= AAA_NORMAL { 100 }
    else if contrast >= AA_NORMAL { 80 }
    else if contrast >= AA_LARGE { 60 }
    else if contrast >= MIN_READABLE { 40 }
    else { 20 }
}

/// Legibility of a text color over a background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResult {
    /// Contrast ratio, ≥ 1.
    pub contrast: f64,
    /// Level AA for normal text.
    #[serde(rename = "wcagAA")]
    pub wcag_aa: bool,
    /// Level AAA for normal text.
    #[serde(rename = "wcagAAA")]
    pub wcag_aaa: bool,
    pub small_text: bool,
    pub large_text: bool,
    pub ui_components: bool,
    /// See [`score`].
    pub score: u8,
}

impl AccessibilityResult {
    pub fn from_contrast(contrast: f64) -> Self {
        AccessibilityResult {
            contrast,
            wcag_aa: contrast >= AA_NORMAL,
            wcag_aaa: contrast >= AAA_NORMAL,
            small_text: contrast >= AA_NORMAL,
            large_text: contrast >= AA_LARGE,
            ui_components: contrast >= AA_LARGE,
            score: score(contrast),
        }
    }
}

/// Evaluate `text` over `background`.  Unparsable colors give the
/// result of a contrast of 1.
///
/// # Example
///
/// ```
/// use chromatone::evaluate_accessibility;
/// let r = evaluate_accessibility("white", "#000000");
/// assert!(r.wcag_aaa);
/// assert_eq!(r.score, 100);
/// ```
pub fn evaluate_accessibility(text: impl ColorSource,
                              background: impl ColorSource)
                              -> AccessibilityResult {
    AccessibilityResult::from_contrast(contrast(text, background))
}

/// White or black, whichever contrasts more with `background`
/// (black on a tie).
pub fn readable_text_color(background: &Color) -> Color {
    if Color::WHITE.contrast(background) > Color::BLACK.contrast(background) {
        Color::WHITE
    } else {
        Color::BLACK
    }
}
