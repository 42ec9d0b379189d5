//! TOML configuration
//!
//! ```toml
//! [tag]
//! title = "Tide"
//! artist = "Gulls"
//! year = "1999"
//! ```
//!
//! Keys left out of `[tag]` are written as empty frames.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::tag::id3v2::TagFields;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tag: TagFields,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_parse_tag_table() {
        let config = Config::parse(
            r#"
            [tag]
            track = "3"
            title = "Tide"
            original_artist = "Gulls"
            encoded_by = "mp3splice"
            "#,
        )
        .unwrap();

        assert_eq!(config.tag.track, "3");
        assert_eq!(config.tag.title, "Tide");
        assert_eq!(config.tag.original_artist, "Gulls");
        assert_eq!(config.tag.encoded_by, "mp3splice");
        assert_eq!(config.tag.url, "");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_unknown_table() {
        assert!(matches!(Config::parse("[tags]\ntitle = \"x\""), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_wrong_type() {
        assert!(matches!(Config::parse("[tag]\nyear = 1999"), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tag.toml");
        std::fs::write(&path, "[tag]\nalbum = \"Shore\"\n").unwrap();

        assert_eq!(Config::load(&path).unwrap().tag.album, "Shore");
        assert!(matches!(Config::load(dir.path().join("missing.toml")), Err(Error::Io(_))));
    }
}
