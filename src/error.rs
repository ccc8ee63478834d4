//! Error types for the catalog client and sprite decoding

/// Failure of a single upstream request.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected payload from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    #[error("sprite decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("sprite has no visible pixels")]
    Empty,
}
