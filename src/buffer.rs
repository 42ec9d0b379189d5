//! Owned MP3 byte buffers and the edits made on them
//!
//! An [`AudioBuffer`] owns the whole encoded file in memory. Extraction and
//! joining always produce fresh copies; the remaining edits mutate the buffer
//! in place through `&mut self`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::mp3::frame::FrameHeader;
use crate::mp3::scan::{self, Frames, ScanCursor, StreamStats};
use crate::tag::id3v1::{self, STRIP_LEN};
use crate::tag::id3v2::{build_tag, TagFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioBuffer {
    data: Vec<u8>,
}

/// How many bytes [`AudioBuffer::strip_tags`] removed from each end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stripped {
    pub leading: usize,
    pub trailing: usize,
}

impl From<Vec<u8>> for AudioBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl AudioBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a whole file into a buffer
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read(path)?))
    }

    /// Like [`AudioBuffer::load`], but a missing file reads as empty
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read(path) {
            Ok(data) => Ok(Self::new(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the whole buffer out, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(&self.data)?;
        file.flush()?;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset of the first valid frame, or 0 if there is none
    pub fn sync_start(&self) -> usize {
        scan::sync_start(&self.data)
    }

    /// Header of the first frame
    pub fn first_header(&self) -> Result<FrameHeader> {
        let start = self.sync_start();
        Ok(FrameHeader::from_slice(&self.data[start..])?)
    }

    /// Walk the frames from the sync point
    pub fn frames(&self) -> Frames<'_> {
        Frames::new(&self.data, self.sync_start())
    }

    /// Walk every frame and total the stream up
    pub fn stats(&self) -> Result<StreamStats> {
        scan::scan(&self.data)
    }

    /// Total playback time in seconds
    pub fn duration_secs(&self) -> Result<f64> {
        Ok(self.stats()?.duration_secs)
    }

    /// The trailing ID3v1 block, if the buffer ends in one
    pub fn probe_trailer(&self) -> Option<&[u8]> {
        id3v1::probe(&self.data).ok().flatten()
    }

    /// Copy out the frames covering `[start_secs, start_secs + length_secs)`
    ///
    /// The copy begins at the first frame that starts at or after
    /// `start_secs` and ends before the first frame that starts at or after
    /// the end time. If the end time is never reached, everything from the
    /// first frame to the end of the buffer is kept (including any trailer or
    /// garbage after the last good frame). If no frame starts late enough the
    /// result is empty. The walk stops at the first bad header.
    pub fn extract(&self, start_secs: f64, length_secs: f64) -> AudioBuffer {
        let end_secs = start_secs + length_secs;
        let mut cursor = ScanCursor::at(self.sync_start());
        let mut start: Option<usize> = None;
        let mut span: Option<usize> = None;

        while cursor.offset < self.data.len() {
            if start.is_none() && cursor.elapsed_secs >= start_secs {
                start = Some(cursor.offset);
            }
            if let Some(start) = start {
                if span.is_none() && cursor.elapsed_secs >= end_secs {
                    span = Some(cursor.offset - start);
                }
            }
            if let Err(reason) = cursor.advance(&self.data) {
                debug!(offset = cursor.offset, %reason, "extraction stopped at bad frame");
                break;
            }
        }

        let Some(start) = start else {
            debug!(start_secs, elapsed = cursor.elapsed_secs, "extraction start is past the end");
            return AudioBuffer::default();
        };
        let span = span.unwrap_or(self.data.len() - start);

        debug!(start, span, frames = cursor.frame_count, "extracted segment");
        AudioBuffer::new(self.data[start..start + span].to_vec())
    }

    /// Put a freshly built ID3v2 tag in front of the audio
    pub fn prepend_tag(&mut self, fields: &TagFields) {
        let mut tagged = build_tag(fields);
        tagged.extend_from_slice(&self.data);
        self.data = tagged;
    }

    /// Drop everything before the first frame and any ID3v1 trailer
    ///
    /// A detected trailer takes one extra byte with it (129 bytes in total).
    pub fn strip_tags(&mut self) -> Stripped {
        let leading = self.sync_start();
        self.data.drain(..leading);

        let trailing = if self.probe_trailer().is_some() {
            let keep = self.data.len().saturating_sub(STRIP_LEN);
            let removed = self.data.len() - keep;
            self.data.truncate(keep);
            removed
        } else {
            0
        };

        debug!(leading, trailing, "stripped tags");
        Stripped { leading, trailing }
    }

    /// Append `other` after this buffer
    pub fn merge_behind(&mut self, other: &AudioBuffer) {
        self.data.extend_from_slice(&other.data);
    }

    /// Insert `other` before this buffer
    pub fn merge_infront(&mut self, other: &AudioBuffer) {
        let mut merged = other.data.clone();
        merged.extend_from_slice(&self.data);
        self.data = merged;
    }
}

/// Splice `sources` into `destination`, one at a time
///
/// Each source is loaded and stripped, then the current destination is
/// appended behind it and the result written back to `destination`. Every
/// source therefore lands in front of what is already there, so the final
/// file holds the sources in reverse order followed by the original
/// destination content. A missing destination starts out empty.
pub fn join_all<P, Q>(destination: P, sources: &[Q]) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let destination = destination.as_ref();

    for source in sources {
        let source = source.as_ref();
        let mut joined = AudioBuffer::load(source)?;
        let stripped = joined.strip_tags();

        let existing = AudioBuffer::load_or_empty(destination)?;
        joined.merge_behind(&existing);
        joined.save(destination)?;

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            leading = stripped.leading,
            trailing = stripped.trailing,
            bytes = joined.len(),
            "joined source"
        );
    }

    Ok(())
}
