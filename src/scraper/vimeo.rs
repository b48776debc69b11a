//! Vimeo metadata. One oEmbed call carries everything we use, duration
//! and description included.

use crate::fetcher::FetchError;
use crate::resources::ResourceType;
use crate::scraper::oembed;
use crate::scraper::text::truncate_chars;
use crate::scraper::{ScrapeResult, format_duration};
use crate::tags::TagTaxonomy;
use tracing::instrument;

const SUMMARY_MAX_CHARS: usize = 300;

#[instrument(skip_all, fields(video_id = %video_id))]
pub async fn fetch_video(
    url: &str,
    video_id: &str,
    taxonomy: &TagTaxonomy,
) -> Result<ScrapeResult, FetchError> {
    let oembed = oembed::fetch_oembed(&oembed::vimeo_oembed_url(url)).await?;

    // The full description feeds tag matching; the summary is capped.
    let tag_text = format!(
        "{} {} {} vimeo video tutorial",
        oembed.title, oembed.author_name, oembed.description
    );

    let duration = (oembed.duration > 0).then(|| format_duration(oembed.duration));
    let summary = if oembed.description.is_empty() {
        let author = if oembed.author_name.is_empty() {
            "Unknown"
        } else {
            &oembed.author_name
        };
        format!("Video by {author} on Vimeo.")
    } else {
        truncate_chars(&oembed.description, SUMMARY_MAX_CHARS).to_string()
    };

    Ok(ScrapeResult {
        title: oembed.title,
        author: oembed.author_name,
        summary,
        thumbnail: oembed.thumbnail_url,
        resource_type: Some(ResourceType::Video),
        duration,
        suggested_tags: taxonomy.suggest(&tag_text),
    })
}
