//! APA-style citation rendering.

use crate::resources::{Resource, ResourceType};

const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// APA's marker for an undatable source.
const NO_DATE: &str = "n.d.";

/// Render `Author (Year). Title [qualifier]. Retrieved from URL`.
///
/// The year falls back to the calendar year of `date_added`; the
/// retrieved-from clause is dropped for the `"#"` placeholder URL.
pub fn generate_apa_citation(resource: &Resource) -> String {
    let author = resource
        .author
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(UNKNOWN_AUTHOR);
    let year = match resource.year {
        Some(year) => year.to_string(),
        None => year_from_date(&resource.date_added)
            .map(|y| y.to_string())
            .unwrap_or_else(|| NO_DATE.to_string()),
    };

    let mut citation = format!("{} ({}). {}", author, year, resource.title);
    match resource.resource_type {
        ResourceType::Video => citation.push_str(" [Video]"),
        ResourceType::Pdf => match resource.pages {
            Some(pages) => citation.push_str(&format!(" [PDF document, {} pages]", pages)),
            None => citation.push_str(" [PDF document]"),
        },
        ResourceType::Graphic => citation.push_str(" [Graphic]"),
        ResourceType::Link => {}
    }
    citation.push('.');

    if !resource.url.is_empty() && resource.url != "#" {
        citation.push_str(&format!(" Retrieved from {}", resource.url));
    }
    citation
}

/// Leading `YYYY` of a `YYYY-MM-DD` date, if it parses.
fn year_from_date(date_added: &str) -> Option<u16> {
    date_added.get(..4)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> Resource {
        Resource {
            id: "1-a".to_string(),
            title: "Designing with AI".to_string(),
            resource_type: ResourceType::Link,
            url: "https://example.com/ai".to_string(),
            thumbnail: String::new(),
            summary: String::new(),
            tags: Vec::new(),
            date_added: "2024-03-01".to_string(),
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

    #[test]
    fn full_citation_with_author_and_year() {
        let mut r = resource();
        r.author = Some("Norman, D.".to_string());
        r.year = Some(2013);
        assert_eq!(
            generate_apa_citation(&r),
            "Norman, D. (2013). Designing with AI. Retrieved from https://example.com/ai"
        );
    }

    #[test]
    fn year_falls_back_to_date_added() {
        let citation = generate_apa_citation(&resource());
        assert!(citation.contains("(2024)"));
        assert!(citation.starts_with("Unknown Author"));
    }

    #[test]
    fn unparseable_date_renders_no_date() {
        let mut r = resource();
        r.date_added = "soon".to_string();
        assert!(generate_apa_citation(&r).contains("(n.d.)"));
    }

    #[test]
    fn placeholder_url_omits_retrieved_from() {
        let mut r = resource();
        r.url = "#".to_string();
        let citation = generate_apa_citation(&r);
        assert!(!citation.contains("Retrieved from"));
        assert!(citation.ends_with("Designing with AI."));
    }

    #[test]
    fn type_qualifiers() {
        let mut r = resource();
        r.resource_type = ResourceType::Video;
        assert!(generate_apa_citation(&r).contains("Designing with AI [Video]."));

        r.resource_type = ResourceType::Pdf;
        r.pages = Some(12);
        assert!(generate_apa_citation(&r).contains("[PDF document, 12 pages]."));

        r.pages = None;
        assert!(generate_apa_citation(&r).contains("[PDF document]."));

        r.resource_type = ResourceType::Graphic;
        assert!(generate_apa_citation(&r).contains("[Graphic]."));
    }
}
