pub mod frame;
pub mod scan;

pub use frame::{ChannelMode, FrameError, FrameHeader, Layer, MpegVersion};
pub use scan::{find_sync, scan, sync_start, Frame, Frames, ScanCursor, StreamStats};

/// Build one zero-filled frame behind `header`
#[cfg(test)]
pub(crate) fn test_frame(header: [u8; 4]) -> Vec<u8> {
    let size = FrameHeader::parse(header)
        .expect("test header should parse")
        .frame_size as usize;
    let mut frame = header.to_vec();
    frame.resize(size, 0);
    frame
}
