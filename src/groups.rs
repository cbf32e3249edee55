//! # Channel Groups
//!
//! The carrier is scanned in raster order (left to right, top to bottom,
//! wrapping at the image width) and cut into groups of three consecutive
//! pixels. The first three channels (R, G, B) of each pixel are concatenated
//! into a 9-channel group, which carries exactly one payload byte:
//!
//! ```text
//! pixel:    p0          p1          p2
//! channel:  R  G  B  |  R  G  B  |  R  G  B
//! group:    0  1  2     3  4  5     6  7  8
//!           \_____________________/  \
//!              frame bits 0..8        continuation marker
//! ```
//!
//! Pixels left over after the last whole group are never touched. Both the
//! write and the read path walk the same [`GroupLayout`], so the scan order is
//! identical on encode and decode.

use image::{ImageBuffer, Pixel};

/// Pixels that make up one group.
pub const PIXELS_PER_GROUP: usize = 3;
/// Leading channels of each pixel that carry data. Alpha is never one of them.
pub const DATA_CHANNELS: usize = 3;
/// Channels in one group: 8 frame bits plus the continuation marker.
pub const GROUP_CHANNELS: usize = PIXELS_PER_GROUP * DATA_CHANNELS;

/// The nine channel values of one group, in group order.
pub type Channels = [u8; GROUP_CHANNELS];

/// Group geometry of an image of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    width: u32,
    height: u32,
}

impl GroupLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of<P: Pixel>(image: &ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Number of whole groups, i.e. the number of payload bytes that fit.
    pub fn len(&self) -> usize {
        let pixels = self.width as u64 * self.height as u64;
        (pixels / PIXELS_PER_GROUP as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restartable walk over all whole groups, in scan order.
    pub fn iter(&self) -> GroupIter {
        GroupIter {
            layout: *self,
            next: 0,
            end: self.len(),
        }
    }

    fn slot(&self, index: usize) -> GroupSlot {
        let first = index as u64 * PIXELS_PER_GROUP as u64;
        let width = self.width as u64;
        let mut pixels = [(0u32, 0u32); PIXELS_PER_GROUP];
        // Linear pixel index wraps to the next row at the image width
        for (offset, pixel) in pixels.iter_mut().enumerate() {
            let linear = first + offset as u64;
            *pixel = ((linear % width) as u32, (linear / width) as u32);
        }
        GroupSlot { index, pixels }
    }
}

impl IntoIterator for GroupLayout {
    type Item = GroupSlot;
    type IntoIter = GroupIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the groups of a [`GroupLayout`]. Ends exactly where the last
/// whole group ends.
#[derive(Debug, Clone)]
pub struct GroupIter {
    layout: GroupLayout,
    next: usize,
    end: usize,
}

impl Iterator for GroupIter {
    type Item = GroupSlot;

    fn next(&mut self) -> Option<GroupSlot> {
        if self.next >= self.end {
            return None;
        }
        let slot = self.layout.slot(self.next);
        self.next += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GroupIter {}

/// Position of one group inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSlot {
    index: usize,
    pixels: [(u32, u32); PIXELS_PER_GROUP],
}

impl GroupSlot {
    /// Zero-based position of this group in scan order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// `(x, y)` of the three source pixels.
    pub fn pixels(&self) -> &[(u32, u32); PIXELS_PER_GROUP] {
        &self.pixels
    }

    /// Gather the nine data channels of this group.
    ///
    /// The pixel type must have at least [`DATA_CHANNELS`] channels.
    pub fn read<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> Channels
    where
        P: Pixel<Subpixel = u8>,
    {
        let mut channels = [0u8; GROUP_CHANNELS];
        for (chunk, &(x, y)) in channels.chunks_exact_mut(DATA_CHANNELS).zip(&self.pixels) {
            chunk.copy_from_slice(&image.get_pixel(x, y).channels()[..DATA_CHANNELS]);
        }
        channels
    }

    /// Scatter nine channel values back into the source pixels. Channels past
    /// the third (alpha) keep their value.
    pub fn write<P>(&self, image: &mut ImageBuffer<P, Vec<u8>>, channels: &Channels)
    where
        P: Pixel<Subpixel = u8>,
    {
        for (chunk, &(x, y)) in channels.chunks_exact(DATA_CHANNELS).zip(&self.pixels) {
            image.get_pixel_mut(x, y).channels_mut()[..DATA_CHANNELS].copy_from_slice(chunk);
        }
    }
}
