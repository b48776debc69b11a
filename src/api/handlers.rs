use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    api::dtos::{ErrorResponse, ExportRequest, ScrapeRequest, ScrapeResponse},
    app_state::AppState,
    resources::resources_to_xml,
    scraper,
};

#[utoipa::path(
    post,
    path = "/api/scrape",
    tag = "scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Scraped metadata, or empty fields with an error marker when the upstream failed", body = ScrapeResponse),
        (status = 400, description = "Missing or empty url", body = ErrorResponse)
    )
)]
pub async fn scrape_url(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    // An unreadable body degrades like any other scrape failure
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable scrape request body");
            return Json(ScrapeResponse::degraded("Failed to scrape URL")).into_response();
        }
    };
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let url = payload.url.unwrap_or_default();

    if let Some(cached) = state.cache.get(&url) {
        debug!(url = %url, "scrape cache hit");
        return Json(ScrapeResponse::from(cached)).into_response();
    }

    match scraper::scrape(&url, &state.taxonomy).await {
        Ok(result) => {
            state.cache.insert(&url, result.clone());
            Json(ScrapeResponse::from(result)).into_response()
        }
        // Upstream answered but refused us; the caller still gets 200
        Err(e) if e.is_upstream_rejection() => {
            info!(url = %url, error = %e, "upstream refused scrape");
            Json(ScrapeResponse::degraded("Failed to fetch URL")).into_response()
        }
        Err(e) => {
            warn!(url = %url, error = %e, "scrape failed");
            Json(ScrapeResponse::degraded("Failed to scrape URL")).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/export-xml",
    tag = "export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "XML document as an attachment", content_type = "application/xml"),
        (status = 400, description = "Missing or invalid resources array", body = ErrorResponse),
        (status = 500, description = "Request body could not be read", body = ErrorResponse)
    )
)]
pub async fn export_xml(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        // A present-but-wrong-shape `resources` is invalid input; anything
        // below that (unparseable body) is an export failure
        Err(JsonRejection::JsonDataError(e)) => {
            debug!(error = %e, "export payload shape mismatch");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid resources data".to_string(),
                }),
            )
                .into_response();
        }
        Err(rejection) => {
            warn!(error = %rejection, "unreadable export request body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to export XML".to_string(),
                }),
            )
                .into_response();
        }
    };
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let resources = payload.resources.unwrap_or_default();

    let xml = resources_to_xml(&resources);
    info!(resources = resources.len(), bytes = xml.len(), "exported xml");

    let filename = format!("resources-{}.xml", Utc::now().timestamp_millis());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        xml,
    )
        .into_response()
}
