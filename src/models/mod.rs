pub mod snapshot;

// Re-exports for convenience
pub use snapshot::*;
