use chromatone::*;
use pretty_assertions::assert_eq;

/// A coarse sweep of the RGB cube, corners included.
fn cube() -> impl Iterator<Item = Color> {
    let levels = [0u8, 1, 37, 74, 111, 128, 148, 185, 222, 254, 255];
    levels.into_iter().flat_map(move |r| {
        levels.into_iter().flat_map(move |g| {
            levels.into_iter().map(move |b| Color::new(r, g, b))
        })
    })
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.);
    d.min(360. - d)
}

#[test]
fn hex_round_trip() {
    for c in cube() {
        let hex = c.hex();
        assert_eq!(convert_color(hex.as_str(), Format::Hex), hex);
        let upper = hex.to_ascii_uppercase();
        assert_eq!(convert_color(upper.as_str(), Format::Hex), hex);
    }
}

fn channel_error(a: Color, b: Color) -> u8 {
    let (a, b) = (a.rgb8(), b.rgb8());
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

#[test]
fn hsl_and_cmyk_text_round_trip() {
    for c in cube() {
        let hsl: Color = convert_color(c, Format::Hsl).parse().unwrap();
        assert!(channel_error(c, hsl) <= HSL_TEXT_TOLERANCE,
                "{c} → {}", c.format(Format::Hsl));
        let cmyk: Color = convert_color(c, Format::Cmyk).parse().unwrap();
        assert!(channel_error(c, cmyk) <= CMYK_TEXT_TOLERANCE,
                "{c} → {}", c.format(Format::Cmyk));
        let rgb: Color = convert_color(c, Format::Rgb).parse().unwrap();
        assert_eq!(rgb.rgb8(), c.rgb8());
    }
}

#[test]
fn contrast_is_reflexive_and_symmetric() {
    let colors: Vec<_> = cube().step_by(17).collect();
    for a in &colors {
        assert_eq!(contrast(a, a), 1.);
        for b in &colors {
            let ab = contrast(a, b);
            assert_eq!(ab, contrast(b, a));
            assert!((1. ..= 21.0001).contains(&ab), "{a} {b}: {ab}");
        }
    }
}

#[test]
fn white_on_black_is_maximal() {
    assert!((contrast("white", "black") - 21.).abs() < 1e-9);
    let r = evaluate_accessibility("white", "#000000");
    assert!(r.wcag_aaa);
    assert_eq!(r.score, 100);
}

#[test]
fn scales_go_from_light_to_dark() {
    for c in cube() {
        let scale = generate_color_scale(c, 11);
        assert_eq!(scale.len(), 11);
        let first: Color = scale[0].parse().unwrap();
        let last: Color = scale[10].parse().unwrap();
        assert!(first.luminance() > last.luminance(), "{c}: {scale:?}");
    }
}

#[test]
fn complementary_is_opposite() {
    for c in cube() {
        let rgb = c.rgb8();
        let max = rgb.r.max(rgb.g).max(rgb.b);
        let min = rgb.r.min(rgb.g).min(rgb.b);
        if max - min < 100 {
            continue // 8-bit rounding dominates the hue
        }
        let (h0, s0, l0) = c.hsl();
        let comp: Color =
            generate_related_colors(c).complementary.parse().unwrap();
        let (h1, s1, l1) = comp.hsl();
        assert!((hue_distance(h0, h1) - 180.).abs() <= 1., "{c} → {comp}");
        assert!((s0 - s1).abs() < 0.01, "{c} → {comp}");
        assert!((l0 - l1).abs() < 0.01, "{c} → {comp}");
    }
}

#[test]
fn cmyk_validation() {
    assert!(is_valid_color("cmyk(10%, 20%, 30%, 40%)"));
    assert!(!is_valid_color("cmyk(110%,0%,0%,0%)"));
    assert!(is_valid_cmyk("CMYK(0%,0%,0%,100%)"));
}

#[test]
fn empty_json_export() {
    let json = export_colors::<&str>(&[], ExportFormat::Json);
    let colors: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(colors, vec!["#0ea5e9"; 11]);
}

#[test]
fn scale_to_css() {
    let colors = generate_color_scale("#0ea5e9", 11);
    let css = export_colors(&colors, ExportFormat::Css);
    let declared: Vec<(u16, &str)> = css.lines()
        .filter_map(|l| l.trim().strip_prefix("--color-primary-"))
        .map(|l| {
            let (step, value) = l.split_once(": ").unwrap();
            (step.parse().unwrap(), value.trim_end_matches(';'))
        })
        .collect();
    let expected: Vec<(u16, &str)> = STEP_LABELS.iter().copied()
        .zip(colors.iter().map(String::as_str))
        .collect();
    assert_eq!(declared, expected);
    assert_eq!(declared[5].1, "#0ea5e9");
}

#[test]
fn scale_object_matches_lenient_api() {
    let scale = ColorScale::new("#0ea5e9".parse().unwrap());
    assert_eq!(scale.hex_strings(), generate_color_scale("#0ea5e9", 11));
    assert_eq!(scale.export(ExportFormat::Scss),
               export_colors(&scale.hex_strings(), ExportFormat::Scss));
}
