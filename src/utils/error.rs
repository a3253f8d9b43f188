use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unparseable price text: {input:?}")]
    Parse { input: String },

    #[error("Missing required field: {selector}")]
    MissingField { selector: String },

    #[error("Download failed for {url}: {source}")]
    Download { url: String, source: reqwest::Error },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
