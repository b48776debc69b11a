use axum::Router;

use alcove::{api, app_state::AppState, tags::TagTaxonomy};

pub fn test_app() -> Router {
    let state = AppState::new(TagTaxonomy::builtin(), 3600);
    api::router(state)
}
