//! Shared oEmbed plumbing for the video providers.

use crate::fetcher::{FetchError, get_client};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::instrument;

/// Escape set matching JavaScript's `encodeURIComponent`: everything but
/// alphanumerics and `- _ . ! ~ * ' ( )` is percent-encoded.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The subset of an oEmbed payload the scraper reads. Providers differ in
/// which fields they send, so everything defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbed {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Seconds. YouTube omits it, Vimeo sends it.
    #[serde(default)]
    pub duration: u64,
}

pub fn youtube_oembed_url(video_url: &str) -> String {
    format!(
        "https://www.youtube.com/oembed?url={}&format=json",
        utf8_percent_encode(video_url, URL_COMPONENT)
    )
}

pub fn vimeo_oembed_url(video_url: &str) -> String {
    format!(
        "https://vimeo.com/api/oembed.json?url={}",
        utf8_percent_encode(video_url, URL_COMPONENT)
    )
}

#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn fetch_oembed(endpoint: &str) -> Result<OEmbed, FetchError> {
    let response = get_client()
        .get(endpoint)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    response
        .json::<OEmbed>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oembed_urls_escape_the_video_url() {
        let url = youtube_oembed_url("https://www.youtube.com/watch?v=abc&t=1");
        assert_eq!(
            url,
            "https://www.youtube.com/oembed?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc%26t%3D1&format=json"
        );

        let url = vimeo_oembed_url("https://vimeo.com/123");
        assert!(url.starts_with("https://vimeo.com/api/oembed.json?url=https%3A%2F%2F"));
    }

    #[test]
    fn unreserved_marks_survive_encoding() {
        let url = youtube_oembed_url("https://youtu.be/a-b_c.d~e");
        assert!(url.contains("a-b_c.d~e"));
    }

    #[test]
    fn oembed_payload_defaults_missing_fields() {
        let oembed: OEmbed = serde_json::from_str(r#"{"title": "Only title"}"#).unwrap();
        assert_eq!(oembed.title, "Only title");
        assert_eq!(oembed.author_name, "");
        assert_eq!(oembed.duration, 0);
    }
}
