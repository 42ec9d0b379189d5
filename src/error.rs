//! Crate-wide error type

use std::io;

use thiserror::Error;

use crate::mp3::frame::FrameError;

/// Errors produced while scanning, trimming or splicing MPEG audio buffers
#[derive(Debug, Error)]
pub enum Error {
    /// A frame header carried a reserved or invalid field
    #[error("malformed frame header: {0}")]
    MalformedFrame(#[from] FrameError),

    /// A bad frame was found with more than a legacy trailer's worth of data left
    #[error("corrupt stream at byte {offset}: {remaining} bytes remain after the last valid frame")]
    CorruptStream { offset: usize, remaining: usize },

    /// Not enough bytes to hold a 128-byte legacy trailer
    #[error("buffer of {len} bytes is too short for an ID3v1 trailer")]
    ShortBuffer { len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
