//! Reading and writing carrier files.
//!
//! The output format is picked from the file extension. Only lossless formats
//! are accepted for writing, since any recompression scrambles channel parity.

use image::codecs::pnm::{PnmSubtype, SampleEncoding};
use image::{ColorType, DynamicImage, ImageFormat, ImageOutputFormat};
use log::{debug, warn};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, StegoError};

/// Formats whose encoders reproduce 8-bit RGB(A) pixels exactly.
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Tga
            | ImageFormat::Pnm
            | ImageFormat::Qoi
    )
}

/// Open an image file as a carrier.
pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = image::open(path)?;
    if let Ok(format) = ImageFormat::from_path(path) {
        if !is_lossless(format) {
            warn!(
                "{} is stored as {:?}; hidden data may not have survived",
                path.display(),
                format
            );
        }
    }
    debug!(
        "Opened {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// Resolve the lossless format to write `path` with.
///
/// # Errors
/// - [`StegoError::UnknownFormat`] if the extension names no known format
/// - [`StegoError::UnsupportedOutput`] if it names one outside [`is_lossless`]
pub fn output_format(path: impl AsRef<Path>) -> Result<ImageFormat> {
    let path = path.as_ref();
    let format =
        ImageFormat::from_path(path).map_err(|_| StegoError::UnknownFormat(path.to_path_buf()))?;
    if !is_lossless(format) {
        return Err(StegoError::UnsupportedOutput(format));
    }
    Ok(format)
}

/// Check that `format` can store pixels of `color` without dropping channels.
/// PNM output is written as an RGB pixmap, which has no alpha.
///
/// # Errors
/// - [`StegoError::AlphaUnsupported`] for an alpha carrier written as PNM
pub fn check_color(format: ImageFormat, color: ColorType) -> Result<()> {
    if format == ImageFormat::Pnm && color.has_alpha() {
        return Err(StegoError::AlphaUnsupported(format));
    }
    Ok(())
}

/// Save `image` to `path` in the lossless format named by its extension.
///
/// The whole file is encoded in memory first, so an encoder failure never
/// leaves a truncated file behind.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = output_format(path)?;
    check_color(format, image.color())?;

    // PNM files are always written as binary RGB pixmaps
    let encoding = match format {
        ImageFormat::Pnm => ImageOutputFormat::Pnm(PnmSubtype::Pixmap(SampleEncoding::Binary)),
        other => ImageOutputFormat::from(other),
    };

    let mut output_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut output_bytes), encoding)?;
    fs::write(path, &output_bytes)?;

    debug!(
        "Wrote {} as {:?} ({} bytes)",
        path.display(),
        format,
        output_bytes.len()
    );
    Ok(())
}

/// Encode `image` as PNG in memory.
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}
