use crate::{scraper::ScrapeCache, tags::TagTaxonomy};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub taxonomy: Arc<TagTaxonomy>,
    pub cache: ScrapeCache,
}

impl AppState {
    pub fn new(taxonomy: TagTaxonomy, cache_ttl_seconds: i64) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
            cache: ScrapeCache::new(cache_ttl_seconds),
        }
    }
}
