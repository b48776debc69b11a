//! Alcove: backend for a curated resource library.
//!
//! The crate extracts metadata from arbitrary URLs (with dedicated handling
//! for YouTube, Vimeo and PDFs), suggests tags from a keyword taxonomy, and
//! round-trips resource collections through a portable XML format. The HTTP
//! surface lives in [`api`]; everything else is plain library code usable
//! without a server.

pub mod api;
pub mod app_state;
pub mod config;
pub mod fetcher;
pub mod health;
pub mod resources;
pub mod scraper;
pub mod tags;
