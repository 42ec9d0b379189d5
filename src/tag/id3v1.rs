//! ID3v1 trailer detection
//!
//! An ID3v1 tag is a fixed 128-byte block at the very end of a file whose
//! first three bytes read `TAG`.

use crate::error::{Error, Result};

/// Size of an ID3v1 trailer
pub const TRAILER_LEN: usize = 128;

/// Bytes removed when stripping a detected trailer
///
/// One more than the trailer itself, so the byte just before the tag goes too.
pub const STRIP_LEN: usize = TRAILER_LEN + 1;

/// Return the trailing 128 bytes if they carry the `TAG` signature
///
/// The signature compare is case-insensitive and covers only those three
/// bytes; the remaining 125 are not inspected.
pub fn probe(data: &[u8]) -> Result<Option<&[u8]>> {
    let start = data
        .len()
        .checked_sub(TRAILER_LEN)
        .ok_or(Error::ShortBuffer { len: data.len() })?;
    let trailer = &data[start..];

    if trailer[..3].eq_ignore_ascii_case(b"TAG") {
        Ok(Some(trailer))
    } else {
        Ok(None)
    }
}
