use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a fetched body to UTF-8 using the detected charset.
///
/// Decoding is lossy: the scraper extracts from whatever survives, so a
/// few replacement characters beat failing the whole page.
pub fn process_response(
    url_final: Url,
    status: StatusCode,
    content_type: String,
    body_bytes: Bytes,
) -> PageResponse {
    let charset = detect_charset(&content_type, &body_bytes);
    let (decoded, _encoding, had_errors) = charset.encoding().decode(&body_bytes);
    if had_errors {
        debug!(url = %url_final, charset = ?charset, "lossy decode of page body");
    }

    PageResponse {
        url_final,
        status,
        content_type,
        body_utf8: decoded.into_owned(),
        charset,
        fetched_at: Utc::now(),
    }
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Check Content-Type header for charset
    if let Some(charset) = charset_from_capture(&CHARSET_REGEX, content_type) {
        return charset;
    }

    // 2. Check meta tags in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(charset) = charset_from_capture(&META_CHARSET_REGEX, &search_str) {
        return charset;
    }
    if let Some(charset) = charset_from_capture(&META_HTTP_EQUIV_REGEX, &search_str) {
        return charset;
    }

    // 3. Heuristic detection as a last resort
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn charset_from_capture(pattern: &Regex, haystack: &str) -> Option<Charset> {
    let label = pattern.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}
