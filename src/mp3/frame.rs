//! MP3 frame header parsing
//!
//! MP3 frames start with a sync word followed by header info.
//! Frame header structure (4 bytes):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits): 00=2.5, 01=reserved, 10=2, 11=1
//! C = Layer (2 bits): 00=reserved, 01=III, 10=II, 11=I
//! D = Protection bit (CRC)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H = Private bit
//! I = Channel mode (2 bits)
//! J = Mode extension (2 bits)
//! K = Copyright
//! L = Original
//! M = Emphasis (2 bits)
//!
//! Only the first sync byte is checked. The three sync bits in byte 1 are not
//! re-validated; a header is accepted as long as the version and layer fields
//! that share that byte decode.
//!
//! Sample rates are read from the MPEG-1 table for every version, so MPEG-2 and
//! MPEG-2.5 streams report 44100/48000/32000 Hz rather than their halved or
//! quartered rates. Frame lengths and durations across this crate depend on it.

use thiserror::Error;

/// Size of the fixed frame header
pub const HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

/// Why a 4-byte window is not a usable frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("fewer than 4 bytes available")]
    Truncated,
    #[error("first byte 0x{0:02X} is not a sync byte")]
    NoSync(u8),
    #[error("reserved MPEG version bits")]
    ReservedVersion,
    #[error("reserved layer bits")]
    ReservedLayer,
    #[error("free or invalid bitrate index {0}")]
    BadBitrate(u8),
    #[error("reserved sample rate index")]
    ReservedSampleRate,
    #[error("layer I frames have no supported length")]
    UnsupportedLayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    /// Bitrate in kbps
    pub bitrate: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    pub channel_mode: ChannelMode,
    /// Total frame length in bytes, header included
    pub frame_size: u32,
}

// Bitrate lookup table (kbps), one row per 4-bit index
// Columns: V1 L1, V1 L2, V1 L3, V2/2.5 L1, V2/2.5 L2+L3
// Row 0 = free, row 15 = bad
const BITRATES: [[i16; 5]; 16] = [
    [0, 0, 0, 0, 0],
    [32, 32, 32, 32, 8],
    [64, 48, 40, 48, 16],
    [96, 56, 48, 56, 24],
    [128, 64, 56, 64, 32],
    [160, 80, 64, 80, 40],
    [192, 96, 80, 96, 48],
    [224, 112, 96, 112, 56],
    [256, 128, 112, 128, 64],
    [288, 160, 128, 144, 80],
    [320, 192, 160, 160, 96],
    [352, 224, 192, 176, 112],
    [384, 256, 224, 192, 128],
    [416, 320, 256, 224, 144],
    [448, 384, 320, 256, 160],
    [-1, -1, -1, -1, -1],
];

// Sample rate lookup table (Hz), shared by all versions
// Index 3 = reserved
const SAMPLE_RATES: [u32; 4] = [44100, 48000, 32000, 0];

impl MpegVersion {
    fn from_bits(bits: u8) -> Result<Self, FrameError> {
        match bits {
            0b00 => Ok(Self::Mpeg25),
            0b10 => Ok(Self::Mpeg2),
            0b11 => Ok(Self::Mpeg1),
            _ => Err(FrameError::ReservedVersion),
        }
    }
}

impl Layer {
    fn from_bits(bits: u8) -> Result<Self, FrameError> {
        match bits {
            0b01 => Ok(Self::Layer3),
            0b10 => Ok(Self::Layer2),
            0b11 => Ok(Self::Layer1),
            _ => Err(FrameError::ReservedLayer),
        }
    }
}

fn bitrate_column(version: MpegVersion, layer: Layer) -> usize {
    match (version, layer) {
        (MpegVersion::Mpeg1, Layer::Layer1) => 0,
        (MpegVersion::Mpeg1, Layer::Layer2) => 1,
        (MpegVersion::Mpeg1, Layer::Layer3) => 2,
        (_, Layer::Layer1) => 3,
        (_, _) => 4,
    }
}

impl FrameHeader {
    /// Parse a 4-byte MP3 frame header
    pub fn parse(header: [u8; 4]) -> Result<Self, FrameError> {
        if header[0] != 0xFF {
            return Err(FrameError::NoSync(header[0]));
        }

        // MPEG version (bits 4-3 of byte 1)
        let version = MpegVersion::from_bits((header[1] >> 3) & 0x03)?;

        // Layer (bits 2-1 of byte 1)
        let layer = Layer::from_bits((header[1] >> 1) & 0x03)?;

        // Bitrate index (bits 7-4 of byte 2)
        let bitrate_idx = (header[2] >> 4) & 0x0F;
        let bitrate = BITRATES[bitrate_idx as usize][bitrate_column(version, layer)];
        if bitrate <= 0 {
            return Err(FrameError::BadBitrate(bitrate_idx));
        }
        let bitrate = bitrate as u32;

        // Sample rate index (bits 3-2 of byte 2)
        let sample_rate = SAMPLE_RATES[((header[2] >> 2) & 0x03) as usize];
        if sample_rate == 0 {
            return Err(FrameError::ReservedSampleRate);
        }

        // Padding (bit 1 of byte 2)
        let padding = (header[2] & 0x02) != 0;

        // Channel mode (bits 7-6 of byte 3)
        let channel_mode = match (header[3] >> 6) & 0x03 {
            0 => ChannelMode::Stereo,
            1 => ChannelMode::JointStereo,
            2 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        };

        let frame_size = match layer {
            Layer::Layer1 => 0,
            _ => 144 * bitrate * 1000 / sample_rate + u32::from(padding),
        };
        if frame_size == 0 {
            return Err(FrameError::UnsupportedLayer);
        }

        Ok(FrameHeader {
            version,
            layer,
            bitrate,
            sample_rate,
            padding,
            channel_mode,
            frame_size,
        })
    }

    /// Parse the header at the start of `bytes`
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        let window: [u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|w| w.try_into().ok())
            .ok_or(FrameError::Truncated)?;
        Self::parse(window)
    }

    /// Playback time covered by this frame, in seconds
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.frame_size) * 8.0 / (f64::from(self.bitrate) * 1000.0)
    }
}
