use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::resources::{Resource, ResourceType};
use crate::scraper::ScrapeResult;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

impl ScrapeRequest {
    pub fn validate(&self) -> Result<(), String> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(()),
            _ => Err("URL is required".to_string()),
        }
    }
}

/// Scrape outcome on the wire. The string fields are always present,
/// empty when nothing was extracted; `error` marks the degraded case.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub thumbnail: String,
    pub suggested_tags: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    pub fn degraded(error: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            summary: String::new(),
            thumbnail: String::new(),
            suggested_tags: Vec::new(),
            resource_type: None,
            duration: None,
            error: Some(error.into()),
        }
    }
}

impl From<ScrapeResult> for ScrapeResponse {
    fn from(result: ScrapeResult) -> Self {
        Self {
            title: result.title,
            author: result.author,
            summary: result.summary,
            thumbnail: result.thumbnail,
            suggested_tags: result.suggested_tags,
            resource_type: result.resource_type,
            duration: result.duration,
            error: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub resources: Option<Vec<Resource>>,
}

impl ExportRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.resources.is_none() {
            return Err("Invalid resources data".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_request_requires_url() {
        assert!(ScrapeRequest { url: None }.validate().is_err());
        assert!(
            ScrapeRequest {
                url: Some("".to_string())
            }
            .validate()
            .is_err()
        );
        assert!(
            ScrapeRequest {
                url: Some("https://example.com".to_string())
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_export_request_requires_array() {
        assert!(ExportRequest { resources: None }.validate().is_err());
        assert!(
            ExportRequest {
                resources: Some(Vec::new())
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_degraded_response_shape() {
        let json = serde_json::to_value(ScrapeResponse::degraded("Failed to fetch URL")).unwrap();
        assert_eq!(json["error"], "Failed to fetch URL");
        assert_eq!(json["title"], "");
        assert_eq!(json["suggestedTags"], serde_json::json!([]));
        assert!(json.get("type").is_none());
        assert!(json.get("duration").is_none());
    }

    #[test]
    fn test_successful_response_hides_error_field() {
        let result = ScrapeResult {
            title: "T".to_string(),
            author: "A".to_string(),
            summary: "S".to_string(),
            thumbnail: "http://t".to_string(),
            resource_type: Some(ResourceType::Video),
            duration: Some("1:35".to_string()),
            suggested_tags: vec!["Tutorial".to_string()],
        };
        let json = serde_json::to_value(ScrapeResponse::from(result)).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["duration"], "1:35");
        assert!(json.get("error").is_none());
    }
}
