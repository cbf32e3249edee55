//! # Pixel Codec
//!
//! Writes frames into, and reads them out of, the parity of an image's
//! channel groups (see [`crate::groups`]).
//!
//! ## Write path
//! For frame `i` and its group `g`:
//! 1. `g[0..8]` are forced to the parity of the frame bits (even = 0, odd = 1)
//! 2. `g[8]` is forced to the continuation marker: even for every frame but
//!    the last, odd ("stop") for the last one
//! 3. The adjusted values go back into their three pixels, alpha untouched
//!
//! The carrier is checked for enough groups before the first pixel changes,
//! so a failed write leaves the image exactly as it was.
//!
//! ## Read path
//! Groups are read in the same order. Each yields one byte from the parity of
//! `g[0..8]`; reading stops after the first group whose `g[8]` is odd. There is
//! no length prefix and no sentinel byte.

use image::{ImageBuffer, Pixel};
use log::debug;

use crate::error::{Result, StegoError};
use crate::framer::{self, Frame, FRAME_BITS};
use crate::groups::{Channels, GroupLayout, DATA_CHANNELS};
use crate::parity::{force_parity, is_odd};

/// Index of the channel that carries the continuation marker.
pub const MARKER_CHANNEL: usize = FRAME_BITS;

/// Continuation marker carried by the last channel of every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// More groups follow (even channel).
    Continue,
    /// This group holds the final byte (odd channel).
    Stop,
}

impl Continuation {
    /// Marker for frame `index` of a payload with `count` frames.
    pub fn for_frame(index: usize, count: usize) -> Self {
        if index + 1 == count {
            Continuation::Stop
        } else {
            Continuation::Continue
        }
    }

    pub fn from_channel(value: u8) -> Self {
        if is_odd(value) {
            Continuation::Stop
        } else {
            Continuation::Continue
        }
    }

    pub fn is_stop(self) -> bool {
        self == Continuation::Stop
    }
}

/// Force the parity of one group's channels to `frame` followed by `marker`.
pub fn embed_group(channels: &mut Channels, frame: &Frame, marker: Continuation) {
    for (value, &bit) in channels.iter_mut().zip(frame.bits()) {
        *value = force_parity(*value, bit);
    }
    channels[MARKER_CHANNEL] = force_parity(channels[MARKER_CHANNEL], marker.is_stop());
}

/// Read the frame and marker carried by one group.
pub fn extract_group(channels: &Channels) -> (Frame, Continuation) {
    let mut bits = [false; FRAME_BITS];
    for (bit, &value) in bits.iter_mut().zip(channels.iter()) {
        *bit = is_odd(value);
    }
    (Frame::from(bits), Continuation::from_channel(channels[MARKER_CHANNEL]))
}

/// Number of payload bytes the image can carry.
pub fn capacity<P>(image: &ImageBuffer<P, Vec<u8>>) -> usize
where
    P: Pixel<Subpixel = u8>,
{
    GroupLayout::of(image).len()
}

fn check_channels<P: Pixel<Subpixel = u8>>() -> Result<()> {
    if (P::CHANNEL_COUNT as usize) < DATA_CHANNELS {
        return Err(StegoError::UnsupportedColor(P::COLOR_MODEL.to_string()));
    }
    Ok(())
}

/// Embed `frames` into `image`, one group per frame, in place.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] if `frames` is empty
/// - [`StegoError::CarrierTooSmall`] if the image has fewer groups than frames;
///   the image is not modified in that case
pub fn write<P>(image: &mut ImageBuffer<P, Vec<u8>>, frames: &[Frame]) -> Result<()>
where
    P: Pixel<Subpixel = u8>,
{
    check_channels::<P>()?;
    if frames.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    // Check capacity before the first pixel changes
    let layout = GroupLayout::of(image);
    if frames.len() > layout.len() {
        return Err(StegoError::CarrierTooSmall {
            needed: frames.len(),
            available: layout.len(),
        });
    }

    let count = frames.len();
    for (slot, frame) in layout.iter().zip(frames) {
        // Gather R, G, B of the group's three pixels
        let mut channels = slot.read(image);

        // Frame bits into g[0..8], stop marker only on the last frame
        embed_group(&mut channels, frame, Continuation::for_frame(slot.index(), count));

        // Put the adjusted values back, alpha stays as it was
        slot.write(image, &channels);
    }

    debug!(
        "Embedded {} frames into {}x{} carrier ({} groups available)",
        count,
        image.width(),
        image.height(),
        layout.len()
    );
    Ok(())
}

/// Read frames from `image` up to and including the first stop marker.
///
/// # Errors
/// - [`StegoError::UnterminatedMessage`] if the groups run out before a stop marker
pub fn read_frames<P>(image: &ImageBuffer<P, Vec<u8>>) -> Result<Vec<Frame>>
where
    P: Pixel<Subpixel = u8>,
{
    check_channels::<P>()?;

    let mut frames = Vec::new();
    for slot in GroupLayout::of(image) {
        // Parity of g[0..8] is the byte, parity of g[8] the marker
        let (frame, marker) = extract_group(&slot.read(image));
        frames.push(frame);

        // An odd marker closes the message
        if marker.is_stop() {
            debug!("Stop marker found in group {}", slot.index());
            return Ok(frames);
        }
    }

    // Ran out of pixels without seeing a stop marker
    Err(StegoError::UnterminatedMessage {
        groups: frames.len(),
    })
}

/// Read the hidden payload bytes from `image`.
pub fn read<P>(image: &ImageBuffer<P, Vec<u8>>) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    Ok(framer::from_frames(&read_frames(image)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = (x * 7 + y * 13) as u8;
            Rgb([v, v.wrapping_add(1), v.wrapping_add(2)])
        })
    }

    fn markers(image: &RgbImage) -> Vec<bool> {
        GroupLayout::of(image)
            .iter()
            .map(|slot| is_odd(slot.read(image)[MARKER_CHANNEL]))
            .collect()
    }

    #[test]
    fn test_embed_group_sets_bits_and_marker() {
        let mut channels = [100u8; 9];
        embed_group(&mut channels, &Frame::from_byte(b'H'), Continuation::Continue);
        assert_eq!(channels, [100, 99, 100, 100, 99, 100, 100, 100, 100]);

        let mut channels = [100u8; 9];
        embed_group(&mut channels, &Frame::from_byte(b'i'), Continuation::Stop);
        assert_eq!(channels, [100, 99, 99, 100, 99, 100, 100, 99, 99]);
    }

    #[test]
    fn test_extract_group_inverts_embed() {
        let mut channels = [0, 255, 17, 42, 3, 200, 1, 128, 64];
        embed_group(&mut channels, &Frame::from_byte(0xA5), Continuation::Stop);
        let (frame, marker) = extract_group(&channels);
        assert_eq!(frame.to_byte(), 0xA5);
        assert_eq!(marker, Continuation::Stop);
    }

    #[test]
    fn test_hi_uses_exactly_two_groups() {
        let mut image = RgbImage::from_pixel(4, 2, Rgb([100, 100, 100]));
        let frames = framer::to_frames(b"Hi").unwrap();
        write(&mut image, &frames).unwrap();

        // pixels 6 and 7 lie outside the two groups
        assert_eq!(image.get_pixel(2, 1), &Rgb([100, 100, 100]));
        assert_eq!(image.get_pixel(3, 1), &Rgb([100, 100, 100]));
        assert_eq!(read(&image).unwrap(), b"Hi");
    }

    #[test]
    fn test_only_last_group_carries_stop() {
        let mut image = gradient(9, 3);
        let frames = framer::to_frames(b"steg").unwrap();
        write(&mut image, &frames).unwrap();
        let stops = markers(&image);
        assert_eq!(&stops[..4], &[false, false, false, true]);
    }

    #[test]
    fn test_carrier_too_small_leaves_image_untouched() {
        let mut image = gradient(3, 2);
        let original = image.clone();
        let frames = framer::to_frames(b"abc").unwrap();
        let err = write(&mut image, &frames).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CarrierTooSmall {
                needed: 3,
                available: 2
            }
        ));
        assert_eq!(image, original);
    }

    #[test]
    fn test_zero_channels_raised_to_one() {
        let mut image = RgbImage::new(3, 1);
        write(&mut image, &[Frame::from_byte(0xFF)]).unwrap();
        for pixel in image.pixels() {
            assert_eq!(pixel, &Rgb([1, 1, 1]));
        }
    }

    #[test]
    fn test_alpha_is_preserved() {
        let mut image = RgbaImage::from_fn(6, 1, |x, _| Rgba([0, 128, 255, x as u8 * 40]));
        write(&mut image, &framer::to_frames(b"ok").unwrap()).unwrap();
        for (x, _, pixel) in image.enumerate_pixels() {
            assert_eq!(pixel[3], x as u8 * 40);
        }
        assert_eq!(read(&image).unwrap(), b"ok");
    }

    #[test]
    fn test_truncated_message_is_unterminated() {
        let mut image = RgbImage::from_pixel(6, 1, Rgb([50, 60, 70]));
        write(&mut image, &framer::to_frames(b"Hi").unwrap()).unwrap();
        let first_group = imageops::crop_imm(&image, 0, 0, 3, 1).to_image();
        assert!(matches!(
            read(&first_group),
            Err(StegoError::UnterminatedMessage { groups: 1 })
        ));
    }

    #[test]
    fn test_blank_carrier_is_unterminated() {
        let image = RgbImage::new(10, 10);
        assert!(matches!(
            read(&image),
            Err(StegoError::UnterminatedMessage { groups: 33 })
        ));
    }

    #[test]
    fn test_grayscale_buffer_rejected() {
        let mut image = GrayImage::new(9, 9);
        assert!(matches!(
            write(&mut image, &[Frame::from_byte(1)]),
            Err(StegoError::UnsupportedColor(_))
        ));
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(&gradient(10, 10)), 33);
        assert_eq!(capacity(&gradient(2, 1)), 0);
    }
}
