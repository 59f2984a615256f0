//! Error types for remote lookups.

use thiserror::Error;

/// A failed request against the encyclopedia service.
///
/// Missing data (no extract, no thumbnail) is not an error; those cases are
/// reported as valid empty results by the fetchers.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not decode image from {url}: {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid request URL {url}: {message}")]
    Url { url: String, message: String },
}
