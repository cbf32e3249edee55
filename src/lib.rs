pub mod carrier;
pub mod codec;
pub mod config;
pub mod error;
pub mod framer;
pub mod groups;
pub mod imageio;
pub mod job;
pub mod parity;
pub mod stego;

pub use config::{load_config, Settings};
pub use error::{Result, StegoError};
pub use job::{run, Job, Outcome};
pub use stego::{capacity, decode, decode_text, embed_text_bytes, encode, extract_text_bytes};
