//! mp3splice - scan, trim, tag and splice MP3 streams
//!
//! mp3splice works directly on the MPEG audio frames of an MP3 file. It finds
//! the first frame sync, walks the stream frame by frame using the bitrate and
//! sample rate in each header, and uses those frame boundaries to measure,
//! cut and join files without decoding any audio.
//!
//! # Quick Start
//!
//! ```no_run
//! use mp3splice::{AudioBuffer, TagFields};
//!
//! let song = AudioBuffer::load("song.mp3")?;
//! println!("{:.2}s", song.duration_secs()?);
//!
//! // The first 30 seconds, retagged
//! let mut intro = song.extract(0.0, 30.0);
//! intro.strip_tags();
//! intro.prepend_tag(&TagFields {
//!     title: "Intro".into(),
//!     ..Default::default()
//! });
//! intro.save("intro.mp3")?;
//! # Ok::<(), mp3splice::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`mp3`]: frame header decoding and frame-by-frame stream walking
//! - [`tag`]: ID3v1 trailer detection and the fixed ID3v2 tag writer
//! - [`buffer`]: the owned [`AudioBuffer`] and the edits made on it
//! - [`report`]: per-file scan reports (JSON, CSV)
//! - [`config`]: TOML configuration for the command line tool

pub mod buffer;
pub mod config;
pub mod error;
pub mod mp3;
pub mod report;
pub mod tag;

pub use buffer::{join_all, AudioBuffer, Stripped};
pub use config::Config;
pub use error::{Error, Result};
pub use mp3::{FrameHeader, StreamStats};
pub use report::{StreamReport, Summary};
pub use tag::TagFields;
