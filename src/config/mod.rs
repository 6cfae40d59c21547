//! Configuration module for Trapline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use trapline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling scope: {}", config.crawler.allowed_domain_suffix);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CorpusConfig, CrawlerConfig, OutputConfig, DEFAULT_IGNORED_EXTENSIONS};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
