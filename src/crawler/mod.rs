//! Crawler module: link extraction and crawl orchestration
//!
//! This module contains the crawl-control core:
//! - Extracting outbound links from fetched page content
//! - Driving the pop / fetch / extract / validate / push loop
//! - Accumulating session statistics and the trap set

mod coordinator;
mod extractor;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::extract_links;
