//! The resource model: the unit of the curated library.
//!
//! Resources are plain values. The library UI owns the collection; this
//! crate owns the invariants (rating accumulator consistency, tag
//! deduplication, stable ids) and the XML persistence codec.

pub mod citation;
pub mod xml;

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use utoipa::ToSchema;

pub use citation::generate_apa_citation;
pub use xml::{FormatError, resources_from_xml, resources_to_xml};

/// Star ratings run 1 to 4.
pub const MAX_RATING: u8 = 4;

const DEFAULT_TITLE: &str = "Untitled Resource";
const DEFAULT_SUMMARY: &str = "No description provided.";
const PLACEHOLDER_URL: &str = "#";
const PLACEHOLDER_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=400&h=250&fit=crop";

static IMAGE_EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpg|jpeg|png|gif|svg|webp)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Pdf,
    Video,
    Link,
    Graphic,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Link => "link",
            Self::Graphic => "graphic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(Self::Pdf),
            "video" => Some(Self::Video),
            "link" => Some(Self::Link),
            "graphic" => Some(Self::Graphic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub thumbnail: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date_added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Handle to a user-local file. Never persisted by the codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_sum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be between 1 and {MAX_RATING}, got {0}")]
    OutOfRange(u8),
}

impl Resource {
    /// A fresh draft resource with the standard placeholder fields.
    pub fn new(
        title: impl Into<String>,
        resource_type: ResourceType,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let url = url.into();
        Self {
            id: generate_id(),
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            resource_type,
            url: if url.trim().is_empty() {
                PLACEHOLDER_URL.to_string()
            } else {
                url
            },
            thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
            summary: DEFAULT_SUMMARY.to_string(),
            tags: Vec::new(),
            date_added: Utc::now().format("%Y-%m-%d").to_string(),
            author: None,
            year: None,
            duration: None,
            pages: None,
            local_path: None,
            rating_sum: None,
            rating_count: None,
            user_rating: None,
        }
    }

    /// Record, move or retract the user's own star vote.
    ///
    /// Re-clicking the current star retracts the vote; a different star
    /// moves it. `rating_sum` and `rating_count` track the change in the
    /// same call, and both clear to absent when the last vote goes away.
    pub fn rate(&mut self, stars: u8) -> Result<(), RatingError> {
        if stars == 0 || stars > MAX_RATING {
            return Err(RatingError::OutOfRange(stars));
        }
        let sum = self.rating_sum.unwrap_or(0);
        let count = self.rating_count.unwrap_or(0);
        match self.user_rating {
            Some(current) if current == stars => {
                let sum = sum.saturating_sub(u32::from(stars));
                let count = count.saturating_sub(1);
                if count == 0 {
                    self.rating_sum = None;
                    self.rating_count = None;
                } else {
                    self.rating_sum = Some(sum);
                    self.rating_count = Some(count);
                }
                self.user_rating = None;
            }
            Some(current) => {
                self.rating_sum = Some(sum.saturating_sub(u32::from(current)) + u32::from(stars));
                self.rating_count = Some(count.max(1));
                self.user_rating = Some(stars);
            }
            None => {
                self.rating_sum = Some(sum + u32::from(stars));
                self.rating_count = Some(count + 1);
                self.user_rating = Some(stars);
            }
        }
        Ok(())
    }

    /// Normalize and append a tag, skipping empties and duplicates.
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = crate::tags::format_tag(raw);
        if tag.is_empty() || self.tags.iter().any(|existing| *existing == tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }
}

/// Time-based id with a random base-36 suffix. Collision resistance is
/// probabilistic, which is enough for a single-user library.
pub fn generate_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Classify a URL into a resource type by host and extension.
pub fn detect_resource_type(url: &str) -> ResourceType {
    let lower = url.to_lowercase();
    const VIDEO_HOSTS: &[&str] = &[
        "youtube.com",
        "youtu.be",
        "vimeo.com",
        "loom.com",
        "wistia.com",
    ];
    if VIDEO_HOSTS.iter().any(|host| lower.contains(host)) {
        return ResourceType::Video;
    }
    if lower.ends_with(".pdf") {
        return ResourceType::Pdf;
    }
    if IMAGE_EXTENSION_REGEX.is_match(&lower) {
        return ResourceType::Graphic;
    }
    ResourceType::Link
}
