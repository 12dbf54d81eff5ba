//! External service interactions
//!
//! - Detections backend HTTP client
//! - Background detections fetch
//! - Opening image links in the system browser

pub mod api;
pub mod browser;
#[cfg(test)]
pub mod fake;
pub mod fetcher;

pub use api::{DetectionsApi, HttpApi};
pub use browser::open_url;
pub use fetcher::DetectionFetcher;
