//! Decoded logo raster ready to be embedded as a PDF image.

use image::ImageFormat;

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub width: u32,
    pub height: u32,
    /// Interleaved 8-bit RGB samples, row-major.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when the source had an alpha channel.
    pub alpha: Option<Vec<u8>>,
}

impl Logo {
    pub fn from_png(bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        let has_alpha = decoded.color().has_alpha();
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(if has_alpha { pixels } else { 0 });
        for px in rgba.pixels() {
            rgb.extend_from_slice(&px.0[..3]);
            if has_alpha {
                alpha.push(px.0[3]);
            }
        }

        Ok(Self {
            width,
            height,
            rgb,
            alpha: has_alpha.then_some(alpha),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    /// A tiny PNG with a transparent corner.
    pub fn logo_png() -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([20, 60, 120, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rgba_into_colour_and_alpha_planes() {
        let logo = Logo::from_png(&fixtures::logo_png()).unwrap();
        assert_eq!((logo.width, logo.height), (4, 2));
        assert_eq!(logo.rgb.len(), 4 * 2 * 3);
        assert_eq!(&logo.rgb[3..6], &[20, 60, 120]);

        let alpha = logo.alpha.unwrap();
        assert_eq!(alpha[0], 0);
        assert!(alpha[1..].iter().all(|a| *a == 255));
    }

    #[test]
    fn garbage_is_a_logo_error() {
        let err = Logo::from_png(b"not a png").unwrap_err();
        assert!(matches!(err, RenderError::Logo(_)));
    }
}
