//! # Jobs
//!
//! A [`Job`] is one fully specified request: which mode to run and on which
//! files. The `stego` binary builds it from its command-line flags and hands
//! it to [`run`]; library users can build one directly.

use log::info;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{Result, StegoError};
use crate::{imageio, stego};

/// One encode or decode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Recover hidden text from `input`.
    Decode { input: PathBuf },
    /// Hide `payload` in `input` and write the result to `output`.
    Encode {
        input: PathBuf,
        payload: String,
        output: PathBuf,
    },
}

/// Result of a successful [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Decoded(String),
    Encoded { output: PathBuf, bytes: usize },
}

impl Job {
    /// Build a job from raw command-line values. Decoding is the default mode.
    ///
    /// # Errors
    /// - [`StegoError::MissingArgument`] if encoding without a payload or output path
    /// - [`StegoError::EmptyPayload`] if encoding an empty payload
    pub fn from_flags(
        encode: bool,
        input: PathBuf,
        insert: Option<String>,
        outfile: Option<PathBuf>,
    ) -> Result<Self> {
        if !encode {
            return Ok(Job::Decode { input });
        }

        let payload = insert.ok_or(StegoError::MissingArgument("--insert"))?;
        if payload.is_empty() {
            return Err(StegoError::EmptyPayload);
        }
        let output = outfile
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(StegoError::MissingArgument("--outfile"))?;

        Ok(Job::Encode {
            input,
            payload,
            output,
        })
    }
}

/// Execute `job`.
///
/// For encoding, the output format is validated before any pixel work and the
/// file is only written once the payload has been embedded, so a failed encode
/// leaves nothing behind.
pub fn run(job: &Job, settings: &Settings) -> Result<Outcome> {
    match job {
        Job::Decode { input } => {
            info!("Decoding {}", input.display());
            let carrier = imageio::open(input)?;
            let text = stego::decode_text_with(&carrier, &settings.carrier)?;
            Ok(Outcome::Decoded(text))
        }
        Job::Encode {
            input,
            payload,
            output,
        } => {
            info!("Encoding {} bytes into {}", payload.len(), input.display());
            let format = imageio::output_format(output)?;
            let carrier = imageio::open(input)?;
            imageio::check_color(format, carrier.color())?;
            let encoded = stego::encode_with(&carrier, payload.as_bytes(), &settings.carrier)?;
            imageio::save(&encoded, output)?;
            info!("Wrote {}", output.display());
            Ok(Outcome::Encoded {
                output: output.clone(),
                bytes: payload.len(),
            })
        }
    }
}
