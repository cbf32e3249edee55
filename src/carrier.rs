//! Carrier normalization: the codec works on 8-bit RGB or RGBA buffers only.

use image::{DynamicImage, RgbImage, RgbaImage};
use log::warn;

use crate::codec;
use crate::config::CarrierSettings;
use crate::error::{Result, StegoError};
use crate::framer::Frame;

/// A private, writable copy of a carrier's pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Canvas {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Canvas {
    /// Copy `image` into a canvas, converting other color types when the
    /// settings allow it. Alpha is kept whenever the source has it.
    pub fn from_image(image: &DynamicImage, settings: &CarrierSettings) -> Result<Self> {
        match image {
            DynamicImage::ImageRgb8(buffer) => Ok(Canvas::Rgb(buffer.clone())),
            DynamicImage::ImageRgba8(buffer) => Ok(Canvas::Rgba(buffer.clone())),
            other if settings.convert_color => {
                let color = other.color();
                if color.has_alpha() {
                    warn!("Converting {:?} carrier to 8-bit RGBA", color);
                    Ok(Canvas::Rgba(other.to_rgba8()))
                } else {
                    warn!("Converting {:?} carrier to 8-bit RGB", color);
                    Ok(Canvas::Rgb(other.to_rgb8()))
                }
            }
            other => Err(StegoError::UnsupportedColor(format!("{:?}", other.color()))),
        }
    }

    pub fn into_image(self) -> DynamicImage {
        match self {
            Canvas::Rgb(buffer) => DynamicImage::ImageRgb8(buffer),
            Canvas::Rgba(buffer) => DynamicImage::ImageRgba8(buffer),
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            Canvas::Rgb(buffer) => codec::capacity(buffer),
            Canvas::Rgba(buffer) => codec::capacity(buffer),
        }
    }

    pub fn write(&mut self, frames: &[Frame]) -> Result<()> {
        match self {
            Canvas::Rgb(buffer) => codec::write(buffer, frames),
            Canvas::Rgba(buffer) => codec::write(buffer, frames),
        }
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Canvas::Rgb(buffer) => codec::read(buffer),
            Canvas::Rgba(buffer) => codec::read(buffer),
        }
    }
}
