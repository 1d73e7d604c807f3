//! Color conversion between HEX, RGB, HSL and HSV
//!
//! Two tools share these helpers: `color-converter` accepts any of the three
//! textual forms and `color-picker` expands a single hex value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

const DEFAULT_PICKER_COLOR: &str = "#007acc";

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid hex regex"));
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("valid rgb regex")
});
static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsl\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*\)$").expect("valid hsl regex")
});

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let caps = HEX_RE.captures(s.trim())?;
        let digits = &caps[1];
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    fn unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Hue in degrees [0, 1) scaled, shared by HSL and HSV
    fn hue(&self) -> f64 {
        let (r, g, b) = self.unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        if d == 0.0 {
            return 0.0;
        }
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h / 6.0
    }

    /// (h°, s%, l%) rounded to integers
    pub fn to_hsl(&self) -> (u16, u8, u8) {
        let (r, g, b) = self.unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let s = if max == min {
            0.0
        } else if l > 0.5 {
            (max - min) / (2.0 - max - min)
        } else {
            (max - min) / (max + min)
        };
        (
            (self.hue() * 360.0).round() as u16 % 360,
            (s * 100.0).round() as u8,
            (l * 100.0).round() as u8,
        )
    }

    /// (h°, s%, v%) rounded to integers
    pub fn to_hsv(&self) -> (u16, u8, u8) {
        let (r, g, b) = self.unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let s = if max == 0.0 { 0.0 } else { (max - min) / max };
        (
            (self.hue() * 360.0).round() as u16 % 360,
            (s * 100.0).round() as u8,
            (max * 100.0).round() as u8,
        )
    }

    pub fn from_hsl(h: u16, s: u8, l: u8) -> Self {
        let h = (h % 360) as f64;
        let s = s as f64 / 100.0;
        let l = l as f64 / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u16 {
            0..60 => (c, x, 0.0),
            60..120 => (x, c, 0.0),
            120..180 => (0.0, c, x),
            180..240 => (0.0, x, c),
            240..300 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_byte(r), to_byte(g), to_byte(b))
    }
}

fn component(s: &str, max: u32, what: &str) -> Result<u32> {
    let value: u32 = s
        .parse()
        .map_err(|_| OktoolsError::InvalidInput(format!("{} out of range", what)))?;
    if value > max {
        return Err(OktoolsError::InvalidInput(format!(
            "{} must be between 0 and {}",
            what, max
        )));
    }
    Ok(value)
}

/// Parse `#rrggbb`, `rgb(r, g, b)` or `hsl(h, s%, l%)`
pub fn parse_color(input: &str) -> Result<Rgb> {
    let input = input.trim();
    if let Some(rgb) = Rgb::from_hex(input) {
        return Ok(rgb);
    }
    if let Some(caps) = RGB_RE.captures(input) {
        return Ok(Rgb::new(
            component(&caps[1], 255, "red")? as u8,
            component(&caps[2], 255, "green")? as u8,
            component(&caps[3], 255, "blue")? as u8,
        ));
    }
    if let Some(caps) = HSL_RE.captures(input) {
        return Ok(Rgb::from_hsl(
            component(&caps[1], 360, "hue")? as u16,
            component(&caps[2], 100, "saturation")? as u8,
            component(&caps[3], 100, "lightness")? as u8,
        ));
    }
    Err(OktoolsError::InvalidInput(format!(
        "unrecognised color '{}', use #rrggbb, rgb(r, g, b) or hsl(h, s%, l%)",
        input
    )))
}

fn rgb_line(c: &Rgb) -> String {
    format!("rgb({}, {}, {})", c.r, c.g, c.b)
}

fn hsl_line(c: &Rgb) -> String {
    let (h, s, l) = c.to_hsl();
    format!("hsl({}, {}%, {}%)", h, s, l)
}

pub struct ColorConverterTool;

impl Tool for ColorConverterTool {
    fn id(&self) -> &'static str {
        "color-converter"
    }

    fn name(&self) -> &'static str {
        "Color Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Convert between HEX, RGB, HSL color formats"
    }

    fn icon(&self) -> &'static str {
        "🎨"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let color = parse_color(require_input(input, "a color")?)?;
        Ok(format!(
            "HEX: {}\nRGB: {}\nHSL: {}",
            color.to_hex(),
            rgb_line(&color),
            hsl_line(&color)
        ))
    }
}

pub struct ColorPickerTool;

impl Tool for ColorPickerTool {
    fn id(&self) -> &'static str {
        "color-picker"
    }

    fn name(&self) -> &'static str {
        "Color Picker"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Interactive color picker with format conversion"
    }

    fn icon(&self) -> &'static str {
        "🎨"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "alpha": { "type": "number", "default": 1, "description": "Alpha channel for the RGBA line (0-1)" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let hex = match input.trim() {
            "" => DEFAULT_PICKER_COLOR,
            other => other,
        };
        let color = Rgb::from_hex(hex)
            .ok_or_else(|| OktoolsError::InvalidInput(format!("'{}' is not a #rrggbb color", hex)))?;

        let alpha = match options.get("alpha") {
            None => 1.0,
            Some(v) => v
                .as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
                .filter(|a| (0.0..=1.0).contains(a))
                .ok_or_else(|| OktoolsError::option("alpha", "must be a number between 0 and 1"))?,
        };
        let (h, s, v) = color.to_hsv();

        Ok(format!(
            "HEX: {}\nRGB: {}\nRGBA: rgba({}, {}, {}, {})\nHSL: {}\nHSV: hsv({}, {}%, {}%)",
            color.to_hex(),
            rgb_line(&color),
            color.r,
            color.g,
            color.b,
            alpha,
            hsl_line(&color),
            h,
            s,
            v
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: u8, b: u8) -> bool {
        (a as i16 - b as i16).abs() <= 1
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#fff"), None);
    }

    #[test]
    fn test_known_hsl() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsl(), (0, 100, 50));
        assert_eq!(Rgb::new(0, 0, 255).to_hsl(), (240, 100, 50));
        assert_eq!(Rgb::new(128, 128, 128).to_hsl(), (0, 0, 50));
        assert_eq!(Rgb::from_hsl(120, 100, 50), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_hsl_round_trip_within_one() {
        for &(r, g, b) in &[(0, 122, 204), (255, 0, 0), (0, 128, 0), (255, 255, 255), (0, 0, 0)] {
            let c = Rgb::new(r, g, b);
            let (h, s, l) = c.to_hsl();
            let back = Rgb::from_hsl(h, s, l);
            assert!(close(c.r, back.r) && close(c.g, back.g) && close(c.b, back.b), "{:?} -> {:?}", c, back);
        }
    }

    #[test]
    fn test_hsl_round_trip_bounded_by_quantization() {
        // Integer percentages limit precision for saturated mid tones
        for &(r, g, b) in &[(12, 200, 99), (250, 250, 10), (33, 33, 34), (200, 10, 180)] {
            let c = Rgb::new(r, g, b);
            let (h, s, l) = c.to_hsl();
            let back = Rgb::from_hsl(h, s, l);
            for (a, z) in [(c.r, back.r), (c.g, back.g), (c.b, back.b)] {
                assert!((a as i16 - z as i16).abs() <= 3, "{:?} -> {:?}", c, back);
            }
        }
    }

    #[test]
    fn test_hex_rgb_round_trip() {
        let c = parse_color("rgb(18, 52, 86)").unwrap();
        assert_eq!(c.to_hex(), "#123456");
        assert_eq!(parse_color(&c.to_hex()).unwrap(), c);
    }

    #[test]
    fn test_converter_output() {
        let out = ColorConverterTool.process("rgb(255, 0, 0)", &ToolOptions::new()).unwrap();
        assert_eq!(out, "HEX: #FF0000\nRGB: rgb(255, 0, 0)\nHSL: hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_converter_range_checks() {
        assert!(ColorConverterTool.process("rgb(256, 0, 0)", &ToolOptions::new()).is_err());
        assert!(ColorConverterTool.process("hsl(361, 0%, 0%)", &ToolOptions::new()).is_err());
        assert!(ColorConverterTool.process("hsl(0, 101%, 0%)", &ToolOptions::new()).is_err());
        assert!(ColorConverterTool.process("blue", &ToolOptions::new()).is_err());
    }

    #[test]
    fn test_picker_default_color() {
        let out = ColorPickerTool.process("", &ToolOptions::new()).unwrap();
        assert!(out.starts_with("HEX: #007ACC"));
        assert!(out.contains("RGB: rgb(0, 122, 204)"));
        assert!(out.contains("RGBA: rgba(0, 122, 204, 1)"));
        assert!(out.contains("HSV: hsv(204, 100%, 80%)"));
    }

    #[test]
    fn test_picker_alpha() {
        let opts = ToolOptions::new().with("alpha", 0.5);
        let out = ColorPickerTool.process("#000000", &opts).unwrap();
        assert!(out.contains("rgba(0, 0, 0, 0.5)"));
        let bad = ToolOptions::new().with("alpha", 2);
        assert!(ColorPickerTool.process("#000000", &bad).is_err());
    }
}
