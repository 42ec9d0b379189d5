//! Metadata tags around the audio frames: the legacy ID3v1 trailer this crate
//! detects and strips, and the fixed ID3v2 block it prepends.

pub mod id3v1;
pub mod id3v2;

pub use id3v2::{build_tag, TagFields};
