//! # Encode / Decode
//!
//! Ties the [`framer`](crate::framer) and the [`codec`](crate::codec) together
//! over whole images.
//!
//! ### Encoding
//! 1. Reject an empty payload before touching any pixel
//! 2. Copy the carrier into a private 8-bit RGB(A) canvas
//! 3. Split the payload into frames and write one frame per 3-pixel group,
//!    the last group carrying the stop marker
//! 4. Hand the new image back; the caller must store it losslessly
//!
//! ### Decoding
//! Read groups in the same scan order until the stop marker and join the
//! recovered frames back into bytes.
//!
//! ### Capacity
//! A carrier with `width * height` pixels holds `(width * height) / 3` bytes.
//!
//! Example: an 800x600 image can hide 160,000 bytes.

use image::{DynamicImage, GenericImageView};
use log::{debug, info};

use crate::carrier::Canvas;
use crate::config::CarrierSettings;
use crate::error::{Result, StegoError};
use crate::framer;
use crate::groups::GroupLayout;
use crate::imageio;

/// Hide `payload` in a copy of `carrier` using the default carrier settings.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] for a zero-length payload
/// - [`StegoError::CarrierTooSmall`] if the carrier has fewer than
///   `payload.len()` pixel groups
pub fn encode(carrier: &DynamicImage, payload: &[u8]) -> Result<DynamicImage> {
    encode_with(carrier, payload, &CarrierSettings::default())
}

/// Like [`encode`], with explicit handling of non-RGB carriers.
pub fn encode_with(
    carrier: &DynamicImage,
    payload: &[u8],
    settings: &CarrierSettings,
) -> Result<DynamicImage> {
    let frames = framer::to_frames(payload)?;

    let mut canvas = Canvas::from_image(carrier, settings)?;
    canvas.write(&frames)?;

    info!(
        "Hid {} bytes in {}x{} carrier (capacity {} bytes)",
        payload.len(),
        carrier.width(),
        carrier.height(),
        canvas.capacity()
    );
    Ok(canvas.into_image())
}

/// Recover the hidden bytes from `carrier`.
///
/// # Errors
/// - [`StegoError::UnterminatedMessage`] if no group carries a stop marker
pub fn decode(carrier: &DynamicImage) -> Result<Vec<u8>> {
    decode_with(carrier, &CarrierSettings::default())
}

pub fn decode_with(carrier: &DynamicImage, settings: &CarrierSettings) -> Result<Vec<u8>> {
    let payload = match carrier {
        DynamicImage::ImageRgb8(buffer) => crate::codec::read(buffer)?,
        DynamicImage::ImageRgba8(buffer) => crate::codec::read(buffer)?,
        other => Canvas::from_image(other, settings)?.read()?,
    };
    debug!("Recovered {} bytes", payload.len());
    Ok(payload)
}

/// Recover the hidden payload as UTF-8 text.
pub fn decode_text(carrier: &DynamicImage) -> Result<String> {
    decode_text_with(carrier, &CarrierSettings::default())
}

pub fn decode_text_with(carrier: &DynamicImage, settings: &CarrierSettings) -> Result<String> {
    Ok(String::from_utf8(decode_with(carrier, settings)?)?)
}

/// Number of payload bytes `carrier` can hold.
pub fn capacity(carrier: &DynamicImage) -> usize {
    let (width, height) = carrier.dimensions();
    GroupLayout::new(width, height).len()
}

/// Hide `text` in an encoded image held in memory.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the carrier (any format the `image` crate reads)
/// - `text`: UTF-8 text to hide
///
/// # Returns
/// PNG bytes of the new image.
///
/// # Example
/// ```ignore
/// let carrier = std::fs::read("input.png")?;
/// let hidden = embed_text_bytes(&carrier, "Secret message")?;
/// std::fs::write("output.png", hidden)?;
/// ```
pub fn embed_text_bytes(image_bytes: &[u8], text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(StegoError::EmptyPayload);
    }
    let carrier = image::load_from_memory(image_bytes)?;
    let encoded = encode(&carrier, text.as_bytes())?;
    imageio::to_png_bytes(&encoded)
}

/// Recover text hidden by [`embed_text_bytes`] (or any lossless encode).
///
/// # Example
/// ```ignore
/// let hidden = std::fs::read("output.png")?;
/// println!("Extracted: {}", extract_text_bytes(&hidden)?);
/// ```
pub fn extract_text_bytes(image_bytes: &[u8]) -> Result<String> {
    let carrier = image::load_from_memory(image_bytes)?;
    decode_text(&carrier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn carrier(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 31) as u8, (y * 17) as u8, ((x + y) * 5) as u8])
        }))
    }

    #[test]
    fn test_round_trip_text() {
        let image = carrier(16, 16);
        let encoded = encode(&image, "hello, world".as_bytes()).unwrap();
        assert_eq!(decode_text(&encoded).unwrap(), "hello, world");
    }

    #[test]
    fn test_carrier_is_not_mutated() {
        let image = carrier(8, 8);
        let before = image.clone();
        let encoded = encode(&image, b"secret").unwrap();
        assert_eq!(image, before);
        assert_ne!(encoded, before);
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(
            encode(&carrier(8, 8), b""),
            Err(StegoError::EmptyPayload)
        ));
    }

    #[test]
    fn test_empty_payload_checked_before_carrier() {
        // even an unusable carrier reports the empty payload first
        let image = DynamicImage::new_luma8(1, 1);
        let settings = CarrierSettings {
            convert_color: false,
        };
        assert!(matches!(
            encode_with(&image, b"", &settings),
            Err(StegoError::EmptyPayload)
        ));
    }

    #[test]
    fn test_too_small() {
        let image = carrier(3, 3);
        assert_eq!(capacity(&image), 3);
        assert!(matches!(
            encode(&image, b"four"),
            Err(StegoError::CarrierTooSmall {
                needed: 4,
                available: 3
            })
        ));
        assert!(encode(&image, b"two").is_ok());
    }

    #[test]
    fn test_hi_scenario() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 1, Rgb([128, 64, 32])));
        let encoded = encode(&image, b"Hi").unwrap();
        assert_eq!(decode(&encoded).unwrap(), b"Hi");

        let truncated = encoded.crop_imm(0, 0, 3, 1);
        assert!(matches!(
            decode(&truncated),
            Err(StegoError::UnterminatedMessage { groups: 1 })
        ));
    }

    #[test]
    fn test_rgba_keeps_alpha_channel() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 2, Rgba([0, 0, 0, 9])));
        let encoded = encode(&image, b"abc").unwrap();
        let buffer = encoded.as_rgba8().unwrap();
        assert!(buffer.pixels().all(|p| p[3] == 9));
        assert_eq!(decode(&encoded).unwrap(), b"abc");
    }

    #[test]
    fn test_grayscale_carrier_is_converted() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(9, 1, Luma([200])));
        let encoded = encode(&image, b"ok").unwrap();
        assert!(encoded.as_rgb8().is_some());
        assert_eq!(decode_text(&encoded).unwrap(), "ok");
    }

    #[test]
    fn test_invalid_utf8_reported() {
        let image = carrier(6, 1);
        let encoded = encode(&image, &[0xFF, 0xFE]).unwrap();
        assert_eq!(decode(&encoded).unwrap(), vec![0xFF, 0xFE]);
        assert!(matches!(
            decode_text(&encoded),
            Err(StegoError::InvalidText(_))
        ));
    }

    #[test]
    fn test_in_memory_png_round_trip() {
        let png = imageio::to_png_bytes(&carrier(12, 12)).unwrap();
        let hidden = embed_text_bytes(&png, "tiny secret").unwrap();
        assert_eq!(extract_text_bytes(&hidden).unwrap(), "tiny secret");
    }
}
