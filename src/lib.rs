//! Tonal scales, colour harmonies and accessibility metrics.
//!
//! Start from a base colour, either a [`Color`] or text in any notation
//! [`parse_color`] understands, and derive:
//!
//! - an 11-step tonal [`ColorScale`] (see also [`generate_color_scale`]),
//! - the [`HarmonySet`] of complementary, analogous and triadic colours,
//! - the WCAG [`contrast`] ratio and an [`AccessibilityResult`],
//! - textual notations ([`convert_color`]) and config exports
//!   ([`export_colors`]).
//!
//! The free functions taking a [`ColorSource`] never fail: when the
//! input does not parse they emit a `tracing` warning and return a
//! fallback (the input itself, a contrast of 1, …).  The methods on
//! [`Color`] are their strict counterparts.
//!
//! The interpolation machinery ([`ColorRange`], [`Gradient`],
//! [`Stops`]) works with any [`RGBColor`], which includes the pixel
//! types of the `rgb` crate.

use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod color;
mod named;
mod parse;
mod format;
mod scale;
mod harmony;
mod wcag;
mod export;

pub use color::{Color, ColorSource, InvalidColorFormat, Reason};
pub use parse::{is_valid_cmyk, is_valid_color, is_valid_hex, parse_cmyk,
                parse_color};
pub use format::{color_values, convert_color, CmykValues, ColorValues, Format,
                 HslValues, RgbValues, UnknownFormat, CMYK_TEXT_TOLERANCE,
                 HSL_TEXT_TOLERANCE};
pub use scale::{generate_color_scale, ColorScale, ScaleConfig, Shade,
                STEP_LABELS};
pub use harmony::{generate_related_colors, HarmonySet};
pub use wcag::{contrast, evaluate_accessibility, readable_text_color, score,
               AccessibilityResult, AAA_NORMAL, AA_LARGE, AA_NORMAL,
               MIN_READABLE};
pub use export::{export_colors, ExportFormat, DEFAULT_SEED, PALETTE_NAME};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding `n` colors sampled at evenly spaced
    /// parameters, the bounds `0.` and `1.` included.
    fn samples(self, n: usize) -> Samples<Self, Color>
    where Self: Sized {
        Samples { range: self,  color: PhantomData,
                  last: n.saturating_sub(1), i: 0, j: n }
    }
}

/// An iterator yielding uniformly spaced colors of a [`ColorRange`].
///
/// Created by [`ColorRange::samples`].
pub struct Samples<R, Color> {
    range: R,
    color: PhantomData<Color>,
    last: usize, // index of the last sample
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // position after the last one to be consumed
}

impl<R, Color> Samples<R, Color> where R: ColorRange<Color> {
    /// Return the color of the sample `k` (assuming `k ≤ self.last`).
    /// The bounds are requested with exact parameters.
    fn rgb(&self, k: usize) -> Color {
        if k == 0 {
            self.range.rgb(0.)
        } else if k == self.last {
            self.range.rgb(1.)
        } else {
            self.range.rgb(k as f64 / self.last as f64)
        }
    }
}

impl<R, Color> Iterator for Samples<R, Color>
where R: ColorRange<Color> {
    type Item = Color;

    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.j - self.i;
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Samples<R, Color>
where R: ColorRange<Color> {}

impl<R, Color> DoubleEndedIterator for Samples<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i < self.j {
            self.j -= 1;
            Some(self.rgb(self.j))
        } else {
            None
        }
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    /// Components outside that interval are clamped.
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a gradient from color `c0` to color `c1`, interpolated
    /// in CIE L\*a\*b\*.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use chromatone::{RGBColor, ColorRange};
    /// let red = RGB8::new(255,0, 0);
    /// let blue = RGB8::new(0, 0, 255);
    /// let grad = red.gradient(&blue);
    /// let rgb = grad.rgb(0.5);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lab0 = Lab::from_rgb(Self::to_rgba(self));
        let lab1 = Lab::from_rgb(Self::to_rgba(c1));
        Gradient { c0: lab0,
                   dc: Lab { l: lab1.l - lab0.l, a: lab1.a - lab0.a,
                             b: lab1.b - lab0.b,
                             alpha: lab1.alpha - lab0.alpha },
                   color: PhantomData }
    }
}

/// Round and clamp a component in \[0, 255\] to an integer type.
macro_rules! channel {
    ($x: expr, $t: ty) => { $x.round().clamp(0., <$t>::MAX as f64) as $t }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA { r: c.r.clamp(0., 255.), g: c.g.clamp(0., 255.),
               b: c.b.clamp(0., 255.), a: c.a.clamp(0., 255.) }
    }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: channel!(c.r, u8), g: channel!(c.g, u8),
               b: channel!(c.b, u8) }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: channel!(c.r, u16), g: channel!(c.g, u16),
                b: channel!(c.b, u16) }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: channel!(c.r, u8), g: channel!(c.g, u8),
                b: channel!(c.b, u8), a: channel!(c.a, u8) }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: channel!(c.r, u16), g: channel!(c.g, u16),
                 b: channel!(c.b, u16), a: channel!(c.a, u16) }
    }
}

/// The type for colors in the CIE L\*a\*b\* color space with a D65
/// reference white point and an alpha component.
#[derive(Clone, Copy, Debug)]
struct Lab {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// Green–red axis.
    a: f64,
    /// Blue–yellow axis.
    b: f64,
    /// Alpha component, in \[0, 255\].
    alpha: f64,
}

const T0: f64 = 4. / 29.;
const T1: f64 = 6. / 29.;
const T2: f64 = 3. * T1 * T1;
const T3: f64 = T1 * T1 * T1;
// D65 reference white (Y = 1).
const XN: f64 = 0.950470;
const ZN: f64 = 1.088830;

impl Lab {
    fn from_rgb(c: RGBA<f64>) -> Lab {
        fn linear(v: f64) -> f64 {
            let v = v / 255.;
            if v <= 0.04045 { v / 12.92 }
            else { ((v + 0.055) / 1.055).powf(2.4) }
        }
        fn f(t: f64) -> f64 { if t > T3 { t.cbrt() } else { t / T2 + T0 } }
        let r = linear(c.r);
        let g = linear(c.g);
        let b = linear(c.b);
        let fx = f((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / XN);
        let fy = f(0.2126729 * r + 0.7151522 * g + 0.0721750 * b);
        let fz = f((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / ZN);
        let l = 116. * fy - 16.;
        Lab { l: l.max(0.), a: 500. * (fx - fy), b: 200. * (fy - fz),
              alpha: c.a }
    }

    fn to_rgb(&self) -> RGBA<f64> {
        fn f(t: f64) -> f64 { if t > T1 { t * t * t } else { T2 * (t - T0) } }
        fn gamma(v: f64) -> f64 {
            255. * (if v <= 0.00304 { 12.92 * v }
                    else { 1.055 * v.powf(1. / 2.4) - 0.055 })
        }
        let fy = (self.l + 16.) / 116.;
        let x = XN * f(fy + self.a / 500.);
        let y = f(fy);
        let z = ZN * f(fy - self.b / 200.);
        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;
        RGBA { r: gamma(r), g: gamma(g), b: gamma(b), a: self.alpha }
    }
}


/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: Lab, // first color
    dc: Lab, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    fn rgb_unsafe(&self, t: f64) -> Color {
        let lab = Lab { l: self.c0.l + t * self.dc.l,
                        a: self.c0.a + t * self.dc.a,
                        b: self.c0.b + t * self.dc.b,
                        alpha: self.c0.alpha + t * self.dc.alpha };
        Color::from_rgba(lab.to_rgb())
    }

    /// Continue this gradient with `next`.  The two gradients share
    /// the parameter interval \[0, 1\] equally.
    pub fn then(self, next: Gradient<Color>) -> Stops<Color> {
        Stops { gradients: vec![self, next] }
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unsafe(t.clamp(0., 1.)) }
}

/// A gradient through several colors, each consecutive pair joined
/// by a [`Gradient`] covering an equal share of \[0, 1\].
///
/// Created by [`Gradient::then`].
pub struct Stops<Color> {
    gradients: Vec<Gradient<Color>>, // Invariant: non-empty
}

impl<Color> Stops<Color>
where Color: RGBColor {
    /// Append one more gradient.
    pub fn then(mut self, next: Gradient<Color>) -> Self {
        self.gradients.push(next);
        self
    }
}

impl<Color> ColorRange<Color> for Stops<Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.gradients.len();
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb_unsafe(tn.fract()) }
        else { self.gradients[n-1].rgb_unsafe(1.) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_bounds() {
        let red = RGB8::new(255, 0, 0);
        let blue = RGB8::new(0, 0, 255);
        let g = red.gradient(&blue);
        assert_eq!(g.rgb(0.), red);
        assert_eq!(g.rgb(1.), blue);
        assert_eq!(g.rgb(-3.), red);
        assert_eq!(g.rgb(7.), blue);
    }

    #[test]
    fn gradient_bounds_16_bits() {
        let c0 = RGBA16::new(255, 0, 0, 65535);
        let c1 = RGBA16::new(0, 0, 255, 0);
        let g = c0.gradient(&c1);
        assert_eq!(g.rgb(0.), c0);
        assert_eq!(g.rgb(1.), c1);
        let mid = g.rgb(0.5);
        assert!(mid.a > 0 && mid.a < 65535);
    }

    #[test]
    fn from_rgba_rounds_and_clamps() {
        let c = RGBA { r: -3., g: 12.5, b: 70000., a: 254.4 };
        assert_eq!(RGBA16::from_rgba(c), RGBA16::new(0, 13, 65535, 254));
        assert_eq!(RGBA8::from_rgba(c), RGBA8::new(0, 13, 255, 254));
        assert_eq!(RGB16::from_rgba(c), RGB16::new(0, 13, 65535));
        let f = RGBA::<f64>::from_rgba(c);
        assert_eq!(f, RGBA { r: 0., g: 12.5, b: 255., a: 254.4 });
    }

    #[test]
    fn lab_round_trip() {
        for c in [RGB8::new(14, 165, 233), RGB8::new(0, 0, 0),
                  RGB8::new(255, 255, 255), RGB8::new(250, 10, 90)] {
            let back = RGB8::from_rgba(Lab::from_rgb(c.to_rgba()).to_rgb());
            assert_eq!(back, c);
        }
    }

    #[test]
    fn lab_white_is_100() {
        let white = Lab::from_rgb(RGB8::new(255, 255, 255).to_rgba());
        assert!((white.l - 100.).abs() < 1e-3, "L = {}", white.l);
        assert!(white.a.abs() < 1e-2 && white.b.abs() < 1e-2);
    }

    #[test]
    fn samples_include_bounds() {
        let black = RGB8::new(0, 0, 0);
        let white = RGB8::new(255, 255, 255);
        let v: Vec<_> = black.gradient(&white).samples(5).collect();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], black);
        assert_eq!(v[4], white);
        for w in v.windows(2) {
            assert!(w[0].r < w[1].r);
        }
    }

    #[test]
    fn samples_reversed() {
        let g = RGB8::new(255, 0, 0).gradient(&RGB8::new(0, 0, 255));
        let fwd: Vec<_> = g.samples(7).collect();
        let g = RGB8::new(255, 0, 0).gradient(&RGB8::new(0, 0, 255));
        let mut bwd: Vec<_> = g.samples(7).rev().collect();
        bwd.reverse();
        assert_eq!(fwd, bwd);
    }

    #[test]
    fn samples_empty() {
        let g = RGB8::new(1, 2, 3).gradient(&RGB8::new(4, 5, 6));
        assert_eq!(g.samples(0).len(), 0);
    }

    #[test]
    fn stops_pass_through_middle() {
        let a = RGB8::new(255, 255, 255);
        let b = RGB8::new(14, 165, 233);
        let c = RGB8::new(0, 0, 0);
        let s = a.gradient(&b).then(b.gradient(&c));
        assert_eq!(s.rgb(0.), a);
        assert_eq!(s.rgb(0.5), b);
        assert_eq!(s.rgb(1.), c);
    }
}
