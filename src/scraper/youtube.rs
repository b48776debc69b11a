//! YouTube metadata: oEmbed for title/author, plus a best-effort page
//! scrape for duration and description, which oEmbed does not carry.

use crate::fetcher::{self, FetchError};
use crate::resources::ResourceType;
use crate::scraper::oembed;
use crate::scraper::text::{collapse_whitespace, truncate_chars};
use crate::scraper::{ScrapeResult, format_duration};
use crate::tags::TagTaxonomy;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

const DESCRIPTION_MAX_CHARS: usize = 400;

static LENGTH_SECONDS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""lengthSeconds":"(\d+)""#).unwrap());

static APPROX_DURATION_MS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"approxDurationMs":"(\d+)""#).unwrap());

static SHORT_DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""shortDescription":"([^"]*)""#).unwrap());

static SIMPLE_TEXT_DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""description":\{"simpleText":"([^"]*)""#).unwrap());

#[instrument(skip_all, fields(video_id = %video_id))]
pub async fn fetch_video(
    url: &str,
    video_id: &str,
    taxonomy: &TagTaxonomy,
) -> Result<ScrapeResult, FetchError> {
    let oembed = oembed::fetch_oembed(&oembed::youtube_oembed_url(url)).await?;
    let thumbnail = format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg");

    // Best effort: the watch page embeds a player-config blob with the
    // fields oEmbed lacks, but YouTube serves it inconsistently. A miss
    // here must not fail the scrape.
    let (duration, description) = match fetcher::fetch_as_browser(url).await {
        Ok(page) => (
            extract_duration(&page.body_utf8),
            extract_description(&page.body_utf8),
        ),
        Err(e) => {
            debug!(error = %e, "duration/description page fetch failed");
            (None, None)
        }
    };

    let summary = match description.as_deref() {
        Some(d) if d.chars().count() > 20 => d.to_string(),
        _ => {
            let author = if oembed.author_name.is_empty() {
                "Unknown"
            } else {
                &oembed.author_name
            };
            format!("Video by {author} on YouTube.")
        }
    };

    let tag_text = format!(
        "{} {} {} youtube video tutorial",
        oembed.title,
        oembed.author_name,
        description.as_deref().unwrap_or_default()
    );

    Ok(ScrapeResult {
        title: oembed.title,
        author: oembed.author_name,
        summary,
        thumbnail,
        resource_type: Some(ResourceType::Video),
        duration,
        suggested_tags: taxonomy.suggest(&tag_text),
    })
}

/// Video length from the player config: `lengthSeconds` when present,
/// else `approxDurationMs` floored to seconds.
fn extract_duration(html: &str) -> Option<String> {
    if let Some(captures) = LENGTH_SECONDS_REGEX.captures(html) {
        let seconds: u64 = captures.get(1)?.as_str().parse().ok()?;
        return Some(format_duration(seconds));
    }
    let captures = APPROX_DURATION_MS_REGEX.captures(html)?;
    let millis: u64 = captures.get(1)?.as_str().parse().ok()?;
    Some(format_duration(millis / 1000))
}

/// Description from the embedded JSON, unescaped and capped at
/// [`DESCRIPTION_MAX_CHARS`] with a trailing ellipsis when cut.
fn extract_description(html: &str) -> Option<String> {
    let raw = SHORT_DESCRIPTION_REGEX
        .captures(html)
        .or_else(|| SIMPLE_TEXT_DESCRIPTION_REGEX.captures(html))?
        .get(1)?
        .as_str();

    let unescaped = raw.replace("\\n", " ").replace("\\\"", "\"");
    let cleaned = collapse_whitespace(&unescaped);
    let mut description = truncate_chars(&cleaned, DESCRIPTION_MAX_CHARS).to_string();
    if description.chars().count() == DESCRIPTION_MAX_CHARS {
        description.push_str("...");
    }
    Some(description)
}
