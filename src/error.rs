use thiserror::Error;

/// Failures that reject a whole generate request
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("not a valid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("could not extract video id from URL: {0}")]
    VideoId(String),

    #[error("no valid timestamped song lines found")]
    NoValidData,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
