pub mod cli;
pub mod config;
pub mod dedupe;
pub mod http;
pub mod images;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use models::Snapshot;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
