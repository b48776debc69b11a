use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB

/// Descriptive UA for regular scraping.
const BOT_USER_AGENT: &str = "Mozilla/5.0 (compatible; AlcoveBot/0.1; +https://alcove.example.com)";

/// Desktop browser UA. YouTube serves the player-config blob (duration,
/// description) only to something that looks like a real browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static BOT_CLIENT: Lazy<Client> = Lazy::new(|| build_client(BOT_USER_AGENT));
static BROWSER_CLIENT: Lazy<Client> = Lazy::new(|| build_client(BROWSER_USER_AGENT));

fn build_client(user_agent: &str) -> Client {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .expect("static accept header"),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
}

/// The scraping client, for callers issuing their own requests (oEmbed).
pub fn get_client() -> &'static Client {
    &BOT_CLIENT
}

/// Fetch a page with the bot user agent.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with(&BOT_CLIENT, url).await
}

/// Fetch a page presenting as a desktop browser.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_as_browser(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with(&BROWSER_CLIENT, url).await
}

async fn fetch_with(client: &Client, url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    // PDFs are classified by header alone; skip the body entirely
    if content_type.contains("application/pdf") {
        return Ok(PageResponse {
            url_final: final_url,
            status,
            content_type,
            body_utf8: String::new(),
            charset: crate::fetcher::types::Charset::Utf8,
            fetched_at: chrono::Utc::now(),
        });
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    Ok(process_response(final_url, status, content_type, body_bytes))
}
