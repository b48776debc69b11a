pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app_state::AppState;
use crate::health;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::scrape_url, handlers::export_xml, health::health_check),
    components(schemas(
        dtos::ScrapeRequest,
        dtos::ScrapeResponse,
        dtos::ExportRequest,
        dtos::ErrorResponse,
        crate::resources::Resource,
        crate::resources::ResourceType,
    )),
    tags(
        (name = "scrape", description = "URL metadata extraction"),
        (name = "export", description = "Library export"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/healthz", get(health::health_check))
        .route("/api/scrape", post(handlers::scrape_url))
        .route("/api/export-xml", post(handlers::export_xml))
        .with_state(state)
}
