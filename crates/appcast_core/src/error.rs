use thiserror::Error;

/// Reasons a release record cannot be turned into feed metadata.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The response is not a JSON object with a string `tag_name`.
    #[error("response is not a release record (missing `tag_name`)")]
    NotARelease,
    #[error("release record is malformed")]
    Malformed(#[from] serde_json::Error),
    #[error("published_at {value:?} does not match {expected}")]
    InvalidTimestamp {
        value: String,
        expected: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("no release asset name ends with {suffix:?} (assets: {available:?})")]
    AssetNotFound {
        suffix: String,
        available: Vec<String>,
    },
}
