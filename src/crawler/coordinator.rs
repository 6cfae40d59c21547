//! Crawl coordinator - main crawl loop
//!
//! Drives the session: pop the next URL from the frontier, fetch its content
//! from the corpus, extract outbound links, validate each candidate through
//! the trap filter, and push admitted links back into the frontier. The
//! validator's rolling history and the session trap set live here and end up
//! in the final report.

use crate::config::Config;
use crate::corpus::{Corpus, FileCorpus};
use crate::crawler::extract_links;
use crate::filter::{TrapFilter, TrapState, Verdict};
use crate::frontier::Frontier;
use crate::output::CrawlReport;
use crate::Result;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Main crawl coordinator
pub struct Coordinator<C: Corpus> {
    corpus: C,
    frontier: Frontier,
    filter: TrapFilter,
    abort: Arc<AtomicBool>,
}

impl<C: Corpus> Coordinator<C> {
    /// Creates a coordinator with a frontier seeded from the configuration
    pub fn new(config: &Config, corpus: C) -> Self {
        Self {
            corpus,
            frontier: Frontier::with_seeds(&config.crawler.seeds),
            filter: TrapFilter::new(&config.crawler),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for requesting an abort between iterations.
    ///
    /// Setting the flag stops the loop before the next URL is popped; the
    /// session still produces its report.
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Runs the crawl until the frontier is exhausted or an abort is requested
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The session summary, aborted or not
    /// * `Err(TraplineError)` - A collaborator (corpus) failed
    pub async fn run(&mut self) -> Result<CrawlReport> {
        let mut state = TrapState::new();
        let mut traps: BTreeSet<String> = BTreeSet::new();
        let mut best_page: Option<(String, u64)> = None;

        let start_time = std::time::Instant::now();

        while self.frontier.has_next() {
            if self.abort.load(Ordering::Relaxed) {
                tracing::warn!(
                    "Abort requested, stopping with {} URLs still pending",
                    self.frontier.len()
                );
                break;
            }

            let url = match self.frontier.pop_next() {
                Some(url) => url,
                None => break,
            };

            tracing::info!(
                "Fetching {} (fetched: {}, queue: {})",
                url,
                self.frontier.fetched_count(),
                self.frontier.len()
            );

            let page = self.corpus.fetch(&url)?;

            let mut admitted = 0u64;
            for link in extract_links(&page) {
                // Pre-filter: only links the corpus can resolve are worth
                // validating at all.
                if !self.corpus.contains(&link) {
                    continue;
                }

                let (verdict, next_state) = self.filter.validate(&link, &state);
                state = next_state;

                match verdict {
                    Verdict::Admit => {
                        admitted += 1;
                        self.frontier.push(&link);
                    }
                    Verdict::Reject(reason) => {
                        if verdict.is_trap() {
                            tracing::debug!("Trapped {} ({:?})", link, reason);
                            traps.insert(link);
                        }
                    }
                }
            }

            // Strict comparison keeps the earliest page on ties
            if admitted > best_page.as_ref().map(|(_, count)| *count).unwrap_or(0) {
                best_page = Some((page.url.clone(), admitted));
            }

            tokio::task::yield_now().await;
        }

        tracing::info!(
            "Crawl finished: {} URLs fetched, {} traps in {:?}",
            self.frontier.fetched_count(),
            traps.len(),
            start_time.elapsed()
        );

        Ok(CrawlReport {
            domain_counts: self.frontier.domain_counts().clone(),
            best_page,
            fetched: self.frontier.fetched_count(),
            seen_urls: self.frontier.seen_urls().iter().cloned().collect(),
            traps: traps.into_iter().collect(),
        })
    }
}

/// Runs a complete crawl session over the configured file corpus
///
/// This is the main entry point for the binary: it opens the corpus, seeds
/// the frontier, runs the loop to completion, and returns the session
/// report for the caller to write out.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Example
///
/// ```no_run
/// use trapline::config::load_config;
/// use trapline::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("fetched {}", report.fetched);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport> {
    let corpus = FileCorpus::open(Path::new(&config.corpus.content_dir))?;
    let mut coordinator = Coordinator::new(config, corpus);
    coordinator.run().await
}
