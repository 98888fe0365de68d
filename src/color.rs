use std::str::FromStr;

use image::Rgb;

use crate::error::{Error, QrResult};

// Color
//------------------------------------------------------------------------------

/// A renderable RGB color, parsed from a hex spec such as `"#0b6e4f"`,
/// `"0b6e4f"` or the shorthand `"#fff"`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Color(Rgb<u8>);

impl Color {
    pub const BLACK: Color = Color(Rgb([0, 0, 0]));
    pub const WHITE: Color = Color(Rgb([255, 255, 255]));

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb([r, g, b]))
    }

    pub fn rgb(&self) -> Rgb<u8> {
        self.0
    }

    pub fn channels(&self) -> [u8; 3] {
        self.0 .0
    }
}

impl From<Rgb<u8>> for Color {
    fn from(rgb: Rgb<u8>) -> Self {
        Self(rgb)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> QrResult<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return Err(Error::ColorFormat(s.to_string()));
        }

        let channel =
            |h: &str| u8::from_str_radix(h, 16).map_err(|_| Error::ColorFormat(s.to_string()));

        match hex.len() {
            6 => Ok(Self(Rgb([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ]))),
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in rgb.iter_mut().zip(hex.chars()) {
                    let v = channel(&c.to_string())?;
                    *i = v << 4 | v;
                }
                Ok(Self(Rgb(rgb)))
            }
            _ => Err(Error::ColorFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod color_tests {
    use test_case::test_case;

    use super::Color;
    use crate::error::Error;

    #[test_case("#000000", Color::BLACK; "black")]
    #[test_case("#ffffff", Color::WHITE; "white")]
    #[test_case("ffffff", Color::WHITE; "no hash")]
    #[test_case("#FF8000", Color::new(255, 128, 0); "uppercase")]
    #[test_case("#fff", Color::WHITE; "shorthand")]
    #[test_case("#f80", Color::new(255, 136, 0); "shorthand mixed")]
    #[test_case("  #102030 ", Color::new(16, 32, 48); "surrounding whitespace")]
    fn test_parse(spec: &str, expected: Color) {
        assert_eq!(spec.parse::<Color>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("#"; "hash only")]
    #[test_case("#12345"; "five digits")]
    #[test_case("#1234567"; "seven digits")]
    #[test_case("#gggggg"; "not hex")]
    #[test_case("#αααααα"; "not ascii")]
    fn test_parse_invalid(spec: &str) {
        assert!(matches!(spec.parse::<Color>(), Err(Error::ColorFormat(_))));
    }
}
