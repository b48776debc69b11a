//! Video ID extraction for the platforms with dedicated fetchers.

use regex::Regex;
use std::sync::LazyLock;

/// YouTube URL shapes, tried in order. Captures stop at `&`, `?`, `#` or a
/// newline so query strings and fragments never leak into the ID.
static YOUTUBE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"youtube\.com/watch\?v=([^&\n?#]+)").unwrap(),
        Regex::new(r"youtu\.be/([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/embed/([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/shorts/([^&\n?#]+)").unwrap(),
    ]
});

static VIMEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").unwrap());

/// Extract a YouTube video ID from any of the supported URL shapes
/// (`watch?v=`, `youtu.be/`, `embed/`, `shorts/`).
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Extract a numeric Vimeo video ID from `vimeo.com/<id>` or
/// `vimeo.com/video/<id>`.
pub fn extract_vimeo_id(url: &str) -> Option<&str> {
    VIMEO_ID_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn youtube_watch_url_with_extra_params() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn youtube_short_link() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn youtube_embed_and_shorts() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/shorts/abc123XYZ_-"),
            Some("abc123XYZ_-")
        );
    }

    #[test]
    fn youtube_fragment_stops_capture() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ#t=1m"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn non_youtube_url_yields_none() {
        assert_eq!(extract_youtube_id("https://example.com/watch?v=nope"), None);
        assert_eq!(extract_youtube_id("https://vimeo.com/12345"), None);
    }

    #[test]
    fn vimeo_plain_and_video_paths() {
        assert_eq!(extract_vimeo_id("https://vimeo.com/123456789"), Some("123456789"));
        assert_eq!(
            extract_vimeo_id("https://vimeo.com/video/987654321"),
            Some("987654321")
        );
    }

    #[test]
    fn vimeo_requires_digits() {
        assert_eq!(extract_vimeo_id("https://vimeo.com/channels"), None);
        assert_eq!(extract_vimeo_id("https://youtube.com/watch?v=x"), None);
    }
}
