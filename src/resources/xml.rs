//! XML persistence codec for resource lists.
//!
//! One canonical schema: a flat `<resources>` root with one `<resource>`
//! per record. Required fields are always emitted; optional fields are
//! emitted only when they carry a value, so element presence means the
//! field was set. Import is strict about the document (well-formed,
//! correct root) and lenient about records (an incomplete `<resource>`
//! is dropped, its siblings survive).

use crate::resources::{MAX_RATING, Resource, ResourceType};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

const ROOT_ELEMENT: &str = "resources";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("malformed xml: {0}")]
    Malformed(String),

    #[error("invalid resource document: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("unexpected root element <{0}>, expected <{ROOT_ELEMENT}>")]
    UnexpectedRoot(String),

    #[error("document has no root element")]
    MissingRoot,
}

/// Serialize resources to the canonical XML document.
///
/// Deterministic output: fixed element order, two-space indent, entity
/// escaping for `& < > " '`. The transient `local_path` is never written.
pub fn resources_to_xml(resources: &[Resource]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<resources>\n");

    for resource in resources {
        xml.push_str("  <resource>\n");
        push_text(&mut xml, "id", &resource.id);
        push_text(&mut xml, "title", &resource.title);
        push_text(&mut xml, "type", resource.resource_type.as_str());
        push_text(&mut xml, "url", &resource.url);
        push_text(&mut xml, "thumbnail", &resource.thumbnail);
        push_text(&mut xml, "summary", &resource.summary);
        push_text(&mut xml, "dateAdded", &resource.date_added);

        if let Some(author) = resource.author.as_deref().filter(|a| !a.is_empty()) {
            push_text(&mut xml, "author", author);
        }
        if let Some(year) = resource.year {
            push_number(&mut xml, "year", u64::from(year));
        }
        if let Some(duration) = resource.duration.as_deref().filter(|d| !d.is_empty()) {
            push_text(&mut xml, "duration", duration);
        }
        if let Some(pages) = resource.pages {
            push_number(&mut xml, "pages", u64::from(pages));
        }
        if let Some(rating_sum) = resource.rating_sum {
            push_number(&mut xml, "ratingSum", u64::from(rating_sum));
        }
        if let Some(rating_count) = resource.rating_count {
            push_number(&mut xml, "ratingCount", u64::from(rating_count));
        }
        if let Some(user_rating) = resource.user_rating {
            push_number(&mut xml, "userRating", u64::from(user_rating));
        }

        if !resource.tags.is_empty() {
            xml.push_str("    <tags>\n");
            for tag in &resource.tags {
                xml.push_str(&format!("      <tag>{}</tag>\n", escape(tag.as_str())));
            }
            xml.push_str("    </tags>\n");
        }

        xml.push_str("  </resource>\n");
    }

    xml.push_str("</resources>\n");
    xml
}

fn push_text(xml: &mut String, name: &str, value: &str) {
    xml.push_str(&format!("    <{name}>{}</{name}>\n", escape(value)));
}

fn push_number(xml: &mut String, name: &str, value: u64) {
    xml.push_str(&format!("    <{name}>{value}</{name}>\n"));
}

/// Intermediate record with every field optional, so a single bad record
/// cannot fail the whole document.
#[derive(Debug, Deserialize)]
struct ResourceRecord {
    id: Option<String>,
    title: Option<String>,
    #[serde(rename = "type")]
    resource_type: Option<String>,
    url: Option<String>,
    thumbnail: Option<String>,
    summary: Option<String>,
    #[serde(rename = "dateAdded")]
    date_added: Option<String>,
    author: Option<String>,
    year: Option<String>,
    duration: Option<String>,
    pages: Option<String>,
    #[serde(rename = "ratingSum")]
    rating_sum: Option<String>,
    #[serde(rename = "ratingCount")]
    rating_count: Option<String>,
    #[serde(rename = "userRating")]
    user_rating: Option<String>,
    tags: Option<TagList>,
}

#[derive(Debug, Deserialize)]
struct TagList {
    #[serde(rename = "tag", default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ResourcesDoc {
    #[serde(rename = "resource", default)]
    resources: Vec<ResourceRecord>,
}

/// Parse the canonical XML document back into resources.
///
/// Fails on malformed XML or a wrong root element; silently drops
/// `<resource>` records missing a required field or carrying an unknown
/// `type`. Legacy `localPath` elements are ignored.
pub fn resources_from_xml(xml: &str) -> Result<Vec<Resource>, FormatError> {
    expect_resources_root(xml)?;

    let doc: ResourcesDoc = quick_xml::de::from_str(xml)?;
    let total = doc.resources.len();
    let resources: Vec<Resource> = doc.resources.into_iter().filter_map(into_resource).collect();
    if resources.len() < total {
        warn!(
            dropped = total - resources.len(),
            kept = resources.len(),
            "dropped incomplete resource records during import"
        );
    }
    Ok(resources)
}

/// Scan up to the first element and require it to be `<resources>`.
///
/// The serde deserializer does not care what the root is called, so the
/// schema check happens here with the event reader.
fn expect_resources_root(xml: &str) -> Result<(), FormatError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                return if name == ROOT_ELEMENT {
                    Ok(())
                } else {
                    Err(FormatError::UnexpectedRoot(name))
                };
            }
            Ok(Event::Text(text)) => {
                let raw = String::from_utf8_lossy(text.as_ref()).into_owned();
                if !raw.trim().is_empty() {
                    return Err(FormatError::Malformed(
                        "text content before root element".to_string(),
                    ));
                }
            }
            Ok(Event::CData(_)) => {
                return Err(FormatError::Malformed(
                    "cdata before root element".to_string(),
                ));
            }
            Ok(Event::Eof) => return Err(FormatError::MissingRoot),
            Ok(_) => {}
            Err(e) => return Err(FormatError::Malformed(e.to_string())),
        }
    }
}

fn into_resource(record: ResourceRecord) -> Option<Resource> {
    let resource_type = ResourceType::parse(record.resource_type?.trim())?;

    let mut tags: Vec<String> = Vec::new();
    if let Some(list) = record.tags {
        for tag in list.tags {
            if !tag.is_empty() && !tags.iter().any(|existing| *existing == tag) {
                tags.push(tag);
            }
        }
    }

    Some(Resource {
        id: record.id?,
        title: record.title?,
        resource_type,
        url: record.url?,
        thumbnail: record.thumbnail?,
        summary: record.summary?,
        tags,
        date_added: record.date_added?,
        author: non_empty(record.author),
        year: parse_number(record.year),
        duration: non_empty(record.duration),
        pages: parse_number(record.pages),
        local_path: None,
        rating_sum: parse_number(record.rating_sum),
        rating_count: parse_number(record.rating_count),
        user_rating: parse_number::<u8>(record.user_rating)
            .filter(|rating| (1..=MAX_RATING).contains(rating)),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
