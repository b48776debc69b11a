//! Generic page scraping: regex-extracted meta tags with a PDF
//! short-circuit. Deliberately not a DOM parse; meta tags sit in the
//! document head where attribute-order regexes are reliable enough.

use crate::fetcher::{self, FetchError};
use crate::resources::ResourceType;
use crate::scraper::ScrapeResult;
use crate::scraper::text::{collapse_whitespace, decode_html_entities, truncate_chars};
use crate::tags::TagTaxonomy;
use regex::Regex;
use std::sync::LazyLock;
use tracing::instrument;
use url::Url;

const SUMMARY_MAX_CHARS: usize = 500;
const AUTHOR_MAX_CHARS: usize = 160;

static TITLE_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page(url: &str, taxonomy: &TagTaxonomy) -> Result<ScrapeResult, FetchError> {
    let page = fetcher::fetch(url).await?;

    if page.is_pdf() {
        return Ok(pdf_result(url));
    }

    let html = &page.body_utf8;

    let mut title = meta_content(html, "og:title")
        .or_else(|| meta_content(html, "twitter:title"))
        .unwrap_or_default();
    if title.is_empty() {
        title = TITLE_TAG_REGEX
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
    }

    let summary = meta_content(html, "og:description")
        .or_else(|| meta_content(html, "twitter:description"))
        .or_else(|| meta_content(html, "description"))
        .unwrap_or_default();

    let author = meta_content(html, "author")
        .or_else(|| meta_content(html, "article:author"))
        .or_else(|| meta_content(html, "og:site_name"))
        .unwrap_or_default();

    let thumbnail = meta_content(html, "og:image")
        .or_else(|| meta_content(html, "twitter:image"))
        .unwrap_or_default();
    let thumbnail = absolutize_thumbnail(thumbnail, url);

    // Length caps apply before entity decoding
    let title = decode_html_entities(&collapse_whitespace(&title));
    let summary = decode_html_entities(truncate_chars(
        &collapse_whitespace(&summary),
        SUMMARY_MAX_CHARS,
    ));
    let author = decode_html_entities(truncate_chars(
        &collapse_whitespace(&author),
        AUTHOR_MAX_CHARS,
    ));

    let tag_text = format!("{title} {summary} {author} {url}");

    Ok(ScrapeResult {
        suggested_tags: taxonomy.suggest(&tag_text),
        title,
        author,
        summary,
        thumbnail,
        resource_type: None,
        duration: None,
    })
}

/// Minimal record for a PDF response: the body is never downloaded, so
/// the title comes from the trailing path segment.
fn pdf_result(url: &str) -> ScrapeResult {
    let filename = url
        .rsplit('/')
        .next()
        .unwrap_or("")
        .replacen(".pdf", "", 1);
    ScrapeResult {
        title: filename.replace(['-', '_'], " "),
        author: String::new(),
        summary: "PDF document".to_string(),
        thumbnail: String::new(),
        resource_type: Some(ResourceType::Pdf),
        duration: None,
        suggested_tags: vec!["PDF".to_string(), "Document".to_string()],
    }
}

/// First capture of `<meta property|name=... content=...>` for a
/// property, trying both attribute orders.
fn meta_content(html: &str, property: &str) -> Option<String> {
    let escaped = regex::escape(property);
    let patterns = [
        format!(r#"(?i)<meta[^>]*(?:property|name)=["']{escaped}["'][^>]*content=["']([^"']+)["']"#),
        format!(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*(?:property|name)=["']{escaped}["']"#),
    ];
    patterns.iter().find_map(|pattern| {
        Regex::new(pattern)
            .ok()?
            .captures(html)?
            .get(1)
            .map(|m| m.as_str().to_string())
    })
}

/// Resolve a non-absolute thumbnail against the source URL's origin.
/// Unresolvable values degrade to empty, never to an error.
fn absolutize_thumbnail(thumbnail: String, source_url: &str) -> String {
    if thumbnail.is_empty() || thumbnail.starts_with("http") {
        return thumbnail;
    }
    resolve_against_origin(&thumbnail, source_url).unwrap_or_default()
}

fn resolve_against_origin(thumbnail: &str, source_url: &str) -> Option<String> {
    let base = Url::parse(source_url).ok()?;
    let origin = Url::parse(&base.origin().ascii_serialization()).ok()?;
    origin.join(thumbnail).ok().map(|joined| joined.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_content_property_first_order() {
        let html = r#"<meta property="og:title" content="Hello World" />"#;
        assert_eq!(meta_content(html, "og:title"), Some("Hello World".to_string()));
    }

    #[test]
    fn meta_content_content_first_order() {
        let html = r#"<meta content="Reversed" name="og:title">"#;
        assert_eq!(meta_content(html, "og:title"), Some("Reversed".to_string()));
    }

    #[test]
    fn meta_content_accepts_name_attribute_and_single_quotes() {
        let html = r#"<meta name='description' content='A fine page'>"#;
        assert_eq!(meta_content(html, "description"), Some("A fine page".to_string()));
    }

    #[test]
    fn meta_content_misses_cleanly() {
        assert_eq!(meta_content("<html></html>", "og:title"), None);
    }

    #[test]
    fn title_tag_regex_takes_inner_text() {
        let html = "<title data-x=\"1\">  My Page  </title>";
        let captured = TITLE_TAG_REGEX
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        assert_eq!(captured, Some("  My Page  "));
    }

    #[test]
    fn absolutize_keeps_absolute_urls() {
        assert_eq!(
            absolutize_thumbnail(
                "https://cdn.example.com/x.png".to_string(),
                "https://example.com/articles/x"
            ),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn absolutize_resolves_against_origin_not_page_path() {
        assert_eq!(
            absolutize_thumbnail(
                "/img/foo.png".to_string(),
                "https://example.com/articles/x"
            ),
            "https://example.com/img/foo.png"
        );
        assert_eq!(
            absolutize_thumbnail("img/foo.png".to_string(), "https://example.com/articles/x"),
            "https://example.com/img/foo.png"
        );
    }

    #[test]
    fn absolutize_degrades_to_empty_on_bad_base() {
        assert_eq!(
            absolutize_thumbnail("/img/foo.png".to_string(), "not a url"),
            ""
        );
    }

    #[test]
    fn pdf_result_titles_from_path_segment() {
        let result = pdf_result("https://example.com/papers/deep-learning_intro.pdf");
        assert_eq!(result.title, "deep learning intro");
        assert_eq!(result.summary, "PDF document");
        assert_eq!(result.resource_type, Some(ResourceType::Pdf));
        assert_eq!(result.suggested_tags, vec!["PDF", "Document"]);
    }

    #[test]
    fn pdf_result_with_trailing_slash_is_untitled() {
        let result = pdf_result("https://example.com/papers/");
        assert_eq!(result.title, "");
    }
}
