//! Talking to the external container-tracking service.

pub mod error;
pub mod fetcher;
pub mod http_fetcher;
pub mod normalize;
pub mod scripted;

pub use error::FetchError;
pub use fetcher::TrackingFetcher;
pub use http_fetcher::HttpTrackingFetcher;
pub use scripted::ScriptedFetcher;
