use image::RgbImage;

use crate::error::{Error, QrResult};

/// The logo's longest side is bounded to this fraction of the base width.
/// One fifth keeps the occlusion safely inside level H's ~30% tolerance.
const LOGO_FRACTION: u32 = 5;

// Logo compositor
//------------------------------------------------------------------------------

/// Decodes `logo_bytes`, scales the logo (aspect ratio preserved) so its
/// longest side is 20% of the base width, and pastes it centered onto a copy
/// of `base`. A logo with an alpha channel is blended through it; anything
/// else is pasted opaquely. The base image is never mutated.
pub fn overlay_logo(base: &RgbImage, logo_bytes: &[u8]) -> QrResult<RgbImage> {
    let logo = image::load_from_memory(logo_bytes).map_err(Error::LogoDecode)?;

    let bound = base.width() / LOGO_FRACTION;
    let logo = logo.thumbnail(bound, bound);
    let (lw, lh) = (logo.width(), logo.height());
    let (x0, y0) = ((base.width() - lw) / 2, (base.height() - lh) / 2);

    let mut canvas = base.clone();
    if logo.color().has_alpha() {
        let logo = logo.to_rgba8();
        for (x, y, pixel) in logo.enumerate_pixels() {
            let [lr, lg, lb, la] = pixel.0;
            let out = canvas.get_pixel_mut(x0 + x, y0 + y);
            for (o, l) in out.0.iter_mut().zip([lr, lg, lb]) {
                *o = blend(l, *o, la);
            }
        }
    } else {
        let logo = logo.to_rgb8();
        for (x, y, pixel) in logo.enumerate_pixels() {
            canvas.put_pixel(x0 + x, y0 + y, *pixel);
        }
    }

    Ok(canvas)
}

/// Rounded alpha blend of one channel: `top * a + bottom * (1 - a)`.
fn blend(top: u8, bottom: u8, alpha: u8) -> u8 {
    let (t, b, a) = (top as u32, bottom as u32, alpha as u32);
    ((t * a + b * (255 - a) + 127) / 255) as u8
}
