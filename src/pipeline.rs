use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::color::Color;
use crate::compose::overlay_logo;
use crate::encode::encode;
use crate::error::{Error, QrResult, Stage};
use crate::render::DEFAULT_MODULE_SIZE;

// Single item pipeline
//------------------------------------------------------------------------------

/// One QR generation request: encode, render, optionally stamp a logo.
///
/// Defaults are black on white at 10 px per module, matching the classic
/// QR look; every knob can be overridden before calling [`QrRequest::image`]
/// or [`QrRequest::png`].
pub struct QrRequest<'a> {
    payload: &'a str,
    foreground: Color,
    background: Color,
    logo: Option<&'a [u8]>,
    module_sz: u32,
}

impl<'a> QrRequest<'a> {
    pub fn new(payload: &'a str) -> Self {
        Self {
            payload,
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
            module_sz: DEFAULT_MODULE_SIZE,
        }
    }

    pub fn foreground(&mut self, color: Color) -> &mut Self {
        self.foreground = color;
        self
    }

    pub fn background(&mut self, color: Color) -> &mut Self {
        self.background = color;
        self
    }

    pub fn logo(&mut self, logo: &'a [u8]) -> &mut Self {
        self.logo = Some(logo);
        self
    }

    pub fn module_size(&mut self, module_sz: u32) -> &mut Self {
        self.module_sz = module_sz;
        self
    }

    /// Runs encode -> render -> compose and returns the raster image.
    /// The first failing stage aborts the run, tagged with its origin.
    pub fn image(&self) -> QrResult<RgbImage> {
        let symbol = encode(self.payload).map_err(|e| Error::stage(Stage::Encode, e))?;
        let img = symbol.to_image(self.foreground, self.background, self.module_sz);

        match self.logo {
            Some(bytes) => overlay_logo(&img, bytes).map_err(|e| Error::stage(Stage::Compose, e)),
            None => Ok(img),
        }
    }

    /// Like [`QrRequest::image`], serialized to PNG bytes.
    pub fn png(&self) -> QrResult<Vec<u8>> {
        let img = self.image()?;
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(Error::Image)?;
        Ok(buf)
    }
}
