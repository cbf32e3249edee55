//! # Error Types
//!
//! Every failure the encoder, decoder and their image/config collaborators can
//! report. All of them are recoverable and returned to the caller; nothing in
//! the library panics on bad input.

use image::ImageFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while hiding or recovering a payload.
#[derive(Debug, Error)]
pub enum StegoError {
    /// Encoding a zero-length payload leaves no group to carry the stop bit.
    #[error("payload is empty, nothing to hide")]
    EmptyPayload,

    /// The carrier does not have one pixel group per payload byte.
    #[error("carrier too small: payload needs {needed} pixel groups but only {available} are available")]
    CarrierTooSmall { needed: usize, available: usize },

    /// The pixel data ended before any group carried a stop bit.
    #[error("no stop bit found after reading {groups} pixel groups")]
    UnterminatedMessage { groups: usize },

    /// The recovered bytes are not valid UTF-8 text.
    #[error("decoded payload is not valid UTF-8")]
    InvalidText(#[from] std::string::FromUtf8Error),

    /// The output format is not one hidden data can be written in.
    #[error("unsupported output format {0:?}")]
    UnsupportedOutput(ImageFormat),

    /// The output format cannot store the carrier's alpha channel.
    #[error("{0:?} cannot store the carrier's alpha channel")]
    AlphaUnsupported(ImageFormat),

    #[error("cannot determine an image format for {}", .0.display())]
    UnknownFormat(PathBuf),

    /// The carrier has fewer than three 8-bit color channels and conversion is disabled.
    #[error("unsupported carrier color type {0}")]
    UnsupportedColor(String),

    /// A command-line option required for the requested mode was not given.
    #[error("missing required argument {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_numbers() {
        let err = StegoError::CarrierTooSmall {
            needed: 5,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));

        let err = StegoError::UnterminatedMessage { groups: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_output_format_messages() {
        let err = StegoError::UnsupportedOutput(ImageFormat::Jpeg);
        assert_eq!(err.to_string(), "unsupported output format Jpeg");

        let err = StegoError::AlphaUnsupported(ImageFormat::Pnm);
        assert!(err.to_string().contains("alpha"));
    }
}
