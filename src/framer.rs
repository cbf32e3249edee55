//! # Bit Framer
//!
//! Turns a payload into one [`Frame`] per byte and back. A frame is the byte
//! written as 8 big-endian bits, so `frame.bit(0)` is the most significant bit.
//!
//! ```text
//! 'H' = 0x48  ->  0 1 0 0 1 0 0 0
//! ```

use std::fmt;

use crate::error::{Result, StegoError};

/// Number of bits in a frame (one payload byte).
pub const FRAME_BITS: usize = 8;

/// One payload byte as an ordered, MSB-first bit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([bool; FRAME_BITS]);

impl Frame {
    pub fn from_byte(byte: u8) -> Self {
        let mut bits = [false; FRAME_BITS];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (byte >> (FRAME_BITS - 1 - i)) & 1 == 1;
        }
        Frame(bits)
    }

    /// Build a frame from a chunk of exactly 8 bits; any other length yields `None`.
    pub fn from_bits(bits: &[bool]) -> Option<Self> {
        <[bool; FRAME_BITS]>::try_from(bits).ok().map(Frame)
    }

    /// Bit `i`, counted from the most significant end.
    ///
    /// # Panics
    /// If `i >= FRAME_BITS`.
    pub fn bit(&self, i: usize) -> bool {
        self.0[i]
    }

    pub fn bits(&self) -> &[bool; FRAME_BITS] {
        &self.0
    }

    pub fn to_byte(&self) -> u8 {
        self.0.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
    }
}

impl From<u8> for Frame {
    fn from(byte: u8) -> Self {
        Frame::from_byte(byte)
    }
}

impl From<[bool; FRAME_BITS]> for Frame {
    fn from(bits: [bool; FRAME_BITS]) -> Self {
        Frame(bits)
    }
}

impl From<Frame> for u8 {
    fn from(frame: Frame) -> Self {
        frame.to_byte()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Split a payload into frames, one per byte.
///
/// # Errors
/// - [`StegoError::EmptyPayload`] if `payload` has no bytes: without a last
///   frame there is no group to carry the stop bit.
pub fn to_frames(payload: &[u8]) -> Result<Vec<Frame>> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }
    Ok(payload.iter().copied().map(Frame::from_byte).collect())
}

/// Join frames back into bytes. Every bit pattern is a valid byte.
pub fn from_frames(frames: &[Frame]) -> Vec<u8> {
    frames.iter().map(Frame::to_byte).collect()
}
