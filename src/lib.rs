pub mod assemble;
pub mod batch;
pub mod cache;
pub mod config;
pub mod dates;
pub mod error;
pub mod generate;
pub mod metadata;
pub mod normalize;
pub mod output;
pub mod segment;
pub mod timestamp;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Placeholder used when an artist or song could not be determined
pub const NOT_AVAILABLE: &str = "N/A";

/// Header row of every generated sheet
pub const HEADER: [&str; 3] = ["アーティスト名", "楽曲名", "YouTubeリンク"];

/// A single timestamped song mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    pub offset_seconds: u32,
    pub artist: String,
    pub song: String,
}

/// Outcome of parsing a whole setlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseBatchResult {
    pub records: Vec<ParsedRecord>,
    /// Raw text of lines without a leading timestamp, verbatim
    pub invalid_lines: Vec<String>,
}

static YOUTUBE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+$").unwrap());

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=)([\w-]+)|(?:youtu\.be/)([\w-]+)|(?:shorts/)([\w-]+)").unwrap());

/// Check that the input looks like a YouTube video URL
pub fn is_valid_youtube_url(input: &str) -> bool {
    YOUTUBE_URL.is_match(input.trim())
}

/// Extract video ID from watch, short-host and shorts URLs
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = VIDEO_ID.captures(input.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

/// The `watch?v=` form every generated link is built on
pub fn canonical_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_no_video_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/@channel"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_valid_youtube_url() {
        assert!(is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("http://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("  https://youtu.be/dQw4w9WgXcQ  "));
    }

    #[test]
    fn test_invalid_youtube_url() {
        assert!(!is_valid_youtube_url("https://vimeo.com/12345"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/"));
        assert!(!is_valid_youtube_url("not a url"));
    }

    #[test]
    fn test_canonical_watch_url() {
        assert_eq!(
            canonical_watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
