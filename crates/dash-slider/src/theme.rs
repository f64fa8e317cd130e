//! Colour and font mapping for the iced backend
//!
//! Option colours are opaque strings; only the iced backend interprets them.

use iced::font::{Family, Weight};
use iced::{Color, Font};

/// Parse a CSS-style colour string
///
/// Supports "#RGB", "#RRGGBB", "#RRGGBBAA" (with or without '#'),
/// "transparent" and the CSS basic colour keywords.
pub fn parse_color(color: &str) -> Option<Color> {
    let color = color.trim();
    if let Some(named) = named_color(&color.to_ascii_lowercase()) {
        return Some(named);
    }

    let hex = color.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let short = |s: &str| channel(s).map(|v| v * 17);

    match hex.len() {
        3 => Some(Color::from_rgb8(short(&hex[0..1])?, short(&hex[1..2])?, short(&hex[2..3])?)),
        6 => Some(Color::from_rgb8(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        8 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])? as f32 / 255.0,
        )),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let rgb = match name {
        "transparent" => return Some(Color::TRANSPARENT),
        "black" => (0x00, 0x00, 0x00),
        "silver" => (0xC0, 0xC0, 0xC0),
        "gray" | "grey" => (0x80, 0x80, 0x80),
        "white" => (0xFF, 0xFF, 0xFF),
        "maroon" => (0x80, 0x00, 0x00),
        "red" => (0xFF, 0x00, 0x00),
        "purple" => (0x80, 0x00, 0x80),
        "fuchsia" | "magenta" => (0xFF, 0x00, 0xFF),
        "green" => (0x00, 0x80, 0x00),
        "lime" => (0x00, 0xFF, 0x00),
        "olive" => (0x80, 0x80, 0x00),
        "yellow" => (0xFF, 0xFF, 0x00),
        "navy" => (0x00, 0x00, 0x80),
        "blue" => (0x00, 0x00, 0xFF),
        "teal" => (0x00, 0x80, 0x80),
        "aqua" | "cyan" => (0x00, 0xFF, 0xFF),
        "orange" => (0xFF, 0xA5, 0x00),
        _ => return None,
    };
    Some(Color::from_rgb8(rgb.0, rgb.1, rgb.2))
}

/// Map a CSS font family and numeric weight to an iced font
///
/// Only the generic families are recognised; anything else uses the default family.
pub fn font(family: &str, weight: u16) -> Font {
    let family = match family.trim().to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::SansSerif,
    };

    let weight = match weight {
        0..=149 => Weight::Thin,
        150..=249 => Weight::ExtraLight,
        250..=349 => Weight::Light,
        350..=449 => Weight::Normal,
        450..=549 => Weight::Medium,
        550..=649 => Weight::Semibold,
        650..=749 => Weight::Bold,
        750..=849 => Weight::ExtraBold,
        _ => Weight::Black,
    };

    Font {
        family,
        weight,
        ..Font::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let color = parse_color("#FF0000").unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);

        let color = parse_color("00FF00").unwrap();
        assert_eq!(color.g, 1.0);

        let color = parse_color("#fff").unwrap();
        assert_eq!(color, Color::WHITE);

        let color = parse_color("#00000080").unwrap();
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_named_color() {
        assert_eq!(parse_color("red"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(parse_color(" Yellow "), Some(Color::from_rgb8(255, 255, 0)));
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_parse_invalid_color() {
        assert_eq!(parse_color("linear-gradient(180deg, #E3EEF6 0%, #BAC7D0 100%)"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#GGHHII"), None);
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn test_font_mapping() {
        let f = font("sans-serif", 600);
        assert_eq!(f.family, Family::SansSerif);
        assert_eq!(f.weight, Weight::Semibold);
        assert_eq!(font("monospace", 900).weight, Weight::Black);
        assert_eq!(font("Helvetica", 400).family, Family::SansSerif);
    }
}
