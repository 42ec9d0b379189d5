//! Frame-by-frame stream walking
//!
//! A stream is walked from its sync point one frame at a time: decode the
//! header at the current offset, jump ahead by the frame length, repeat until
//! the end of the buffer. A bad header close to the end (inside the last 128
//! bytes) is taken to be a legacy ID3v1 trailer and ends the walk quietly; a
//! bad header anywhere earlier means the stream is corrupt.

use serde::Serialize;
use tracing::debug;

use super::frame::{FrameError, FrameHeader};
use crate::error::{Error, Result};
use crate::tag::id3v1::TRAILER_LEN;

/// Find the sync position (first valid frame) in a buffer
///
/// Every `0xFF` byte is tried in order; the first one whose 4-byte window
/// parses as a frame header wins.
pub fn find_sync(data: &[u8]) -> Option<usize> {
    data.iter()
        .enumerate()
        .filter(|&(_, &byte)| byte == 0xFF)
        .map(|(pos, _)| pos)
        .find(|&pos| FrameHeader::from_slice(&data[pos..]).is_ok())
}

/// Like [`find_sync`], but falls back to offset 0 when nothing syncs
pub fn sync_start(data: &[u8]) -> usize {
    find_sync(data).unwrap_or_else(|| {
        debug!(len = data.len(), "no frame sync found, treating whole buffer as audio");
        0
    })
}

/// Position of a walk through a stream
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScanCursor {
    pub offset: usize,
    pub elapsed_secs: f64,
    pub frame_count: usize,
}

impl ScanCursor {
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }

    /// Decode the frame under the cursor and step over it
    ///
    /// The cursor does not move when the header is rejected.
    pub fn advance(&mut self, data: &[u8]) -> Result<FrameHeader, FrameError> {
        let header = FrameHeader::from_slice(data.get(self.offset..).unwrap_or(&[]))?;
        self.offset += header.frame_size as usize;
        self.elapsed_secs += header.duration_secs();
        self.frame_count += 1;
        Ok(header)
    }
}

/// A decoded frame and where it starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub offset: usize,
    pub header: FrameHeader,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.header.frame_size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        self.header.duration_secs()
    }
}

/// Lazy walk over the frames of a buffer
///
/// Yields each frame in order. A rejected header with more than
/// [`TRAILER_LEN`] bytes still ahead produces one [`Error::CorruptStream`];
/// either way the walk ends at the first rejected header.
pub struct Frames<'a> {
    data: &'a [u8],
    cursor: ScanCursor,
    done: bool,
}

impl<'a> Frames<'a> {
    pub fn new(data: &'a [u8], from: usize) -> Self {
        Self {
            data,
            cursor: ScanCursor::at(from),
            done: false,
        }
    }

    /// Where the walk currently stands
    pub fn cursor(&self) -> ScanCursor {
        self.cursor
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.offset >= self.data.len() {
            return None;
        }

        let offset = self.cursor.offset;
        match self.cursor.advance(self.data) {
            Ok(header) => Some(Ok(Frame { offset, header })),
            Err(reason) => {
                self.done = true;
                let remaining = self.data.len() - offset;
                if remaining > TRAILER_LEN {
                    debug!(offset, remaining, %reason, "frame walk hit a corrupt header");
                    Some(Err(Error::CorruptStream { offset, remaining }))
                } else {
                    debug!(offset, remaining, "frame walk ended at trailer region");
                    None
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Frames<'_> {}

/// Totals gathered by walking a whole stream
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamStats {
    /// Offset of the first frame
    pub sync_offset: usize,
    /// Offset just past the last frame walked
    pub end_offset: usize,
    pub frame_count: usize,
    pub duration_secs: f64,
    pub is_vbr: bool,
    pub avg_bitrate: u32,
    pub min_bitrate: u32,
    pub max_bitrate: u32,
}

/// Walk the whole buffer from its sync point and total it up
pub fn scan(data: &[u8]) -> Result<StreamStats> {
    let sync_offset = sync_start(data);
    let mut frames = Frames::new(data, sync_offset);

    let mut bitrate_total: u64 = 0;
    let mut min_bitrate = u32::MAX;
    let mut max_bitrate = 0;
    for frame in frames.by_ref() {
        let bitrate = frame?.header.bitrate;
        bitrate_total += u64::from(bitrate);
        min_bitrate = min_bitrate.min(bitrate);
        max_bitrate = max_bitrate.max(bitrate);
    }

    let cursor = frames.cursor();
    let mut stats = StreamStats {
        sync_offset,
        end_offset: cursor.offset,
        frame_count: cursor.frame_count,
        duration_secs: cursor.elapsed_secs,
        ..Default::default()
    };

    if cursor.frame_count > 0 {
        stats.is_vbr = min_bitrate != max_bitrate;
        stats.avg_bitrate = (bitrate_total / cursor.frame_count as u64) as u32;
        stats.min_bitrate = min_bitrate;
        stats.max_bitrate = max_bitrate;
    }

    Ok(stats)
}
