//! URL metadata extraction.
//!
//! `scrape` tries the platform fetchers in priority order (YouTube, then
//! Vimeo, then a generic meta-tag scrape) and returns the first success.
//! A failed platform fetch falls through rather than failing the scrape;
//! only the final generic attempt can surface an error, and the API layer
//! degrades even that to an empty-field result.

pub mod cache;
pub mod oembed;
pub mod page;
pub mod text;
pub mod video_id;
pub mod vimeo;
pub mod youtube;

use crate::fetcher::FetchError;
use crate::resources::ResourceType;
use crate::tags::TagTaxonomy;
use tracing::{debug, instrument};

pub use cache::ScrapeCache;

/// Normalized metadata for a scraped URL. Transient: the caller decides
/// what becomes a stored resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeResult {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub thumbnail: String,
    pub resource_type: Option<ResourceType>,
    pub duration: Option<String>,
    pub suggested_tags: Vec<String>,
}

#[instrument(skip_all, fields(url = %url))]
pub async fn scrape(url: &str, taxonomy: &TagTaxonomy) -> Result<ScrapeResult, FetchError> {
    if let Some(video_id) = video_id::extract_youtube_id(url) {
        match youtube::fetch_video(url, video_id, taxonomy).await {
            Ok(result) => return Ok(result),
            Err(e) => {
                debug!(error = %e, "youtube fetch failed, falling back to page scrape");
            }
        }
    }

    if let Some(video_id) = video_id::extract_vimeo_id(url) {
        match vimeo::fetch_video(url, video_id, taxonomy).await {
            Ok(result) => return Ok(result),
            Err(e) => {
                debug!(error = %e, "vimeo fetch failed, falling back to page scrape");
            }
        }
    }

    page::fetch_page(url, taxonomy).await
}

/// Render seconds as `M:SS`, or `H:MM:SS` once there is an hour part.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
