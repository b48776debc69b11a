pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{fetch, fetch_as_browser, get_client};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
