//! Trapline: a corpus-driven crawl controller with crawler-trap detection
//!
//! This crate implements the control core of a web crawler: it pulls pending
//! URLs from a frontier, resolves their content through a captured corpus,
//! extracts outbound links, and runs every candidate link through a stateful
//! trap-detection policy before feeding survivors back into the frontier.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod filter;
pub mod frontier;
pub mod output;

use thiserror::Error;

/// Main error type for Trapline operations
#[derive(Debug, Error)]
pub enum TraplineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error for {url}: {message}")]
    Corpus { url: String, message: String },

    #[error("Corpus directory not found: {0}")]
    CorpusMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Trapline operations
pub type Result<T> = std::result::Result<T, TraplineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::{Corpus, FileCorpus, MemoryCorpus, PageFetch};
pub use crawler::{run_crawl, Coordinator};
pub use filter::{RejectReason, TrapFilter, TrapState, Verdict};
pub use frontier::Frontier;
pub use output::CrawlReport;
