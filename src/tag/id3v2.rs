//! Fixed-layout ID3v2.3 tag writer
//!
//! Emits one tag shape only: a 10-byte header followed by twelve frames in a
//! fixed order. Each frame is laid out as
//!
//! ```text
//! id (4) | size (4, big-endian) | flags (2) | prefix | text
//! ```
//!
//! where `size` covers the prefix and the text. The prefix is the text
//! encoding byte (ISO-8859-1), plus an empty description for `WXXX` and a
//! language/description block for `COMM`.
//!
//! The header's size field is the constant `00 00 08 35` and is not derived
//! from the frames that follow. Readers that trust it will misjudge where the
//! audio starts; [`crate::AudioBuffer::strip_tags`] does not rely on it.

use serde::Deserialize;

/// `ID3`, version 3, revision 0, no flags, fixed declared size
pub const TAG_HEADER: [u8; 10] = [b'I', b'D', b'3', 0x03, 0x00, 0x00, 0x00, 0x00, 0x08, 0x35];

/// Text written into the tag, one entry per frame
///
/// Text is copied verbatim: no escaping, no terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TagFields {
    pub track: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub comments: String,
    pub composer: String,
    pub original_artist: String,
    pub copyright: String,
    pub url: String,
    pub encoded_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameId {
    TrackNumber,
    EncodedBy,
    Url,
    Copyright,
    OriginalArtist,
    Composer,
    Comment,
    Genre,
    Year,
    Album,
    Artist,
    Title,
}

/// Order in which frames are written
pub const FRAME_ORDER: [FrameId; 12] = [
    FrameId::TrackNumber,
    FrameId::EncodedBy,
    FrameId::Url,
    FrameId::Copyright,
    FrameId::OriginalArtist,
    FrameId::Composer,
    FrameId::Comment,
    FrameId::Genre,
    FrameId::Year,
    FrameId::Album,
    FrameId::Artist,
    FrameId::Title,
];

impl FrameId {
    pub fn to_bytes(self) -> &'static [u8; 4] {
        match self {
            FrameId::TrackNumber => b"TRCK",
            FrameId::EncodedBy => b"TENC",
            FrameId::Url => b"WXXX",
            FrameId::Copyright => b"TCOP",
            FrameId::OriginalArtist => b"TOPE",
            FrameId::Composer => b"TCOM",
            FrameId::Comment => b"COMM",
            FrameId::Genre => b"TCON",
            FrameId::Year => b"TYER",
            FrameId::Album => b"TALB",
            FrameId::Artist => b"TPE1",
            FrameId::Title => b"TIT2",
        }
    }

    fn flags(self) -> [u8; 2] {
        match self {
            FrameId::EncodedBy => [0x40, 0x00],
            _ => [0x00, 0x00],
        }
    }

    /// Bytes between the flags and the text; also the frame's size overhead
    fn prefix(self) -> &'static [u8] {
        match self {
            FrameId::Url => &[0x00, 0x00],
            FrameId::Comment => &[0x00, 0x00, 0x09, 0x00, 0x00],
            _ => &[0x00],
        }
    }
}

impl TagFields {
    pub fn text(&self, id: FrameId) -> &str {
        match id {
            FrameId::TrackNumber => &self.track,
            FrameId::EncodedBy => &self.encoded_by,
            FrameId::Url => &self.url,
            FrameId::Copyright => &self.copyright,
            FrameId::OriginalArtist => &self.original_artist,
            FrameId::Composer => &self.composer,
            FrameId::Comment => &self.comments,
            FrameId::Genre => &self.genre,
            FrameId::Year => &self.year,
            FrameId::Album => &self.album,
            FrameId::Artist => &self.artist,
            FrameId::Title => &self.title,
        }
    }
}

/// Serialize `fields` into a complete tag block
pub fn build_tag(fields: &TagFields) -> Vec<u8> {
    let mut tag = TAG_HEADER.to_vec();

    for id in FRAME_ORDER {
        let text = fields.text(id).as_bytes();
        let prefix = id.prefix();
        let size = (prefix.len() + text.len()) as u32;

        tag.extend_from_slice(id.to_bytes());
        tag.extend_from_slice(&size.to_be_bytes());
        tag.extend_from_slice(&id.flags());
        tag.extend_from_slice(prefix);
        tag.extend_from_slice(text);
    }

    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> TagFields {
        TagFields {
            track: "7".into(),
            title: "Tide".into(),
            artist: "Gulls".into(),
            album: "Shore".into(),
            year: "1999".into(),
            genre: "Ambient".into(),
            comments: "ok".into(),
            composer: "R".into(),
            original_artist: "Q".into(),
            copyright: "C".into(),
            url: "u".into(),
            encoded_by: "enc".into(),
        }
    }

    // ==========================================================================
    // LAYOUT TESTS
    // ==========================================================================
    //
    // Plain text frame, e.g. TRCK "7":
    //   54 52 43 4B | 00 00 00 02 | 00 00 | 00 | 37
    // ==========================================================================

    #[test]
    fn test_header_bytes() {
        let tag = build_tag(&TagFields::default());
        assert_eq!(&tag[..10], b"ID3\x03\x00\x00\x00\x00\x08\x35");
    }

    #[test]
    fn test_empty_fields_length() {
        // 10 header + 12 * 10 frame headers + 17 prefix bytes
        assert_eq!(build_tag(&TagFields::default()).len(), 147);
    }

    #[test]
    fn test_full_layout_byte_for_byte() {
        let mut expected: Vec<u8> = b"ID3\x03\x00\x00\x00\x00\x08\x35".to_vec();
        expected.extend_from_slice(b"TRCK\x00\x00\x00\x02\x00\x00\x00");
        expected.extend_from_slice(b"7");
        expected.extend_from_slice(b"TENC\x00\x00\x00\x04\x40\x00\x00");
        expected.extend_from_slice(b"enc");
        expected.extend_from_slice(b"WXXX\x00\x00\x00\x03\x00\x00\x00\x00");
        expected.extend_from_slice(b"u");
        expected.extend_from_slice(b"TCOP\x00\x00\x00\x02\x00\x00\x00");
        expected.extend_from_slice(b"C");
        expected.extend_from_slice(b"TOPE\x00\x00\x00\x02\x00\x00\x00");
        expected.extend_from_slice(b"Q");
        expected.extend_from_slice(b"TCOM\x00\x00\x00\x02\x00\x00\x00");
        expected.extend_from_slice(b"R");
        expected.extend_from_slice(b"COMM\x00\x00\x00\x07\x00\x00\x00\x00\x09\x00\x00");
        expected.extend_from_slice(b"ok");
        expected.extend_from_slice(b"TCON\x00\x00\x00\x08\x00\x00\x00");
        expected.extend_from_slice(b"Ambient");
        expected.extend_from_slice(b"TYER\x00\x00\x00\x05\x00\x00\x00");
        expected.extend_from_slice(b"1999");
        expected.extend_from_slice(b"TALB\x00\x00\x00\x06\x00\x00\x00");
        expected.extend_from_slice(b"Shore");
        expected.extend_from_slice(b"TPE1\x00\x00\x00\x06\x00\x00\x00");
        expected.extend_from_slice(b"Gulls");
        expected.extend_from_slice(b"TIT2\x00\x00\x00\x05\x00\x00\x00");
        expected.extend_from_slice(b"Tide");

        assert_eq!(build_tag(&sample_fields()), expected);
    }

    #[test]
    fn test_frame_order() {
        let tag = build_tag(&TagFields::default());
        let mut pos = TAG_HEADER.len();
        for id in FRAME_ORDER {
            assert_eq!(&tag[pos..pos + 4], id.to_bytes());
            let size = u32::from_be_bytes(tag[pos + 4..pos + 8].try_into().unwrap()) as usize;
            pos += 10 + size;
        }
        assert_eq!(pos, tag.len());
    }

    #[test]
    fn test_size_overheads() {
        let fields = TagFields {
            url: "http://x".into(),
            comments: "hello".into(),
            title: "abc".into(),
            ..Default::default()
        };
        let tag = build_tag(&fields);

        let size_of = |id: &[u8; 4]| {
            let pos = tag.windows(4).position(|w| w == id).unwrap();
            u32::from_be_bytes(tag[pos + 4..pos + 8].try_into().unwrap())
        };
        assert_eq!(size_of(b"WXXX"), 8 + 2);
        assert_eq!(size_of(b"COMM"), 5 + 5);
        assert_eq!(size_of(b"TIT2"), 3 + 1);
        assert_eq!(size_of(b"TENC"), 1);
    }

    #[test]
    fn test_long_text_size_is_big_endian() {
        let fields = TagFields {
            title: "x".repeat(300),
            ..Default::default()
        };
        let tag = build_tag(&fields);
        let pos = tag.len() - 300 - 11;
        assert_eq!(&tag[pos..pos + 4], b"TIT2");
        assert_eq!(&tag[pos + 4..pos + 8], &[0x00, 0x00, 0x01, 0x2D]);
    }

    #[test]
    fn test_fields_from_toml_default_missing() {
        let fields: TagFields = toml::from_str("title = \"Tide\"\nyear = \"1999\"").unwrap();
        assert_eq!(fields.title, "Tide");
        assert_eq!(fields.year, "1999");
        assert_eq!(fields.artist, "");
    }
}
