use image::RgbImage;

use crate::color::Color;
use crate::encode::Symbol;

/// Quiet zone width in modules on every side, per the QR spec.
pub const QUIET_ZONE: u32 = 4;

/// Default edge length of one module in pixels.
pub const DEFAULT_MODULE_SIZE: u32 = 10;

// Renderer
//------------------------------------------------------------------------------

impl Symbol {
    /// Rasterizes the symbol into an RGB image, painting dark modules with
    /// `foreground` and light modules plus the quiet zone with `background`.
    /// Each module becomes a `module_sz` x `module_sz` pixel block.
    pub fn to_image(&self, foreground: Color, background: Color, module_sz: u32) -> RgbImage {
        let fg = foreground.rgb();
        let bg = background.rgb();

        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = RgbImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, bg);
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as usize;
                let c = ((j - qz_sz) / module_sz) as usize;

                canvas.put_pixel(j, i, if self.is_dark(r, c) { fg } else { bg });
            }
        }

        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use test_case::test_case;

    use super::{DEFAULT_MODULE_SIZE, QUIET_ZONE};
    use crate::color::Color;
    use crate::encode::encode;

    #[test_case(1; "single pixel modules")]
    #[test_case(4; "small modules")]
    #[test_case(DEFAULT_MODULE_SIZE; "default modules")]
    fn test_image_dimensions(module_sz: u32) {
        let symbol = encode("https://example.com").unwrap();
        let img = symbol.to_image(Color::BLACK, Color::WHITE, module_sz);
        let expected = (symbol.width() as u32 + 2 * QUIET_ZONE) * module_sz;
        assert_eq!(img.dimensions(), (expected, expected));
    }

    #[test]
    fn test_quiet_zone_is_background() {
        let symbol = encode("https://example.com").unwrap();
        let bg = Color::new(200, 220, 240);
        let img = symbol.to_image(Color::BLACK, bg, 2);
        let edge = img.width() - 1;
        for p in [(0, 0), (edge, 0), (0, edge), (edge, edge), (edge / 2, 0)] {
            assert_eq!(*img.get_pixel(p.0, p.1), bg.rgb());
        }
    }

    #[test]
    fn test_modules_take_palette_colors() {
        let symbol = encode("https://example.com").unwrap();
        let fg = Color::new(10, 20, 90);
        let bg = Color::new(250, 250, 240);
        let img = symbol.to_image(fg, bg, 1);

        let qz = QUIET_ZONE;
        for r in 0..symbol.width() {
            for c in 0..symbol.width() {
                let expected = if symbol.is_dark(r, c) { fg.rgb() } else { bg.rgb() };
                assert_eq!(*img.get_pixel(c as u32 + qz, r as u32 + qz), expected);
            }
        }
    }
}
