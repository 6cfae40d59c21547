//! Plain-text session report
//!
//! Four fixed sections, one entry per line: domain counts, best page,
//! accepted URLs, and the trap set.

use crate::Result;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Summary of a completed (or aborted) crawl session
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlReport {
    /// Accepted-URL counts per domain
    pub domain_counts: BTreeMap<String, u64>,

    /// The page with the most admitted out-links, with its count
    pub best_page: Option<(String, u64)>,

    /// Number of URLs popped from the frontier
    pub fetched: u64,

    /// Every URL the frontier accepted, in sorted order
    pub seen_urls: Vec<String>,

    /// Every URL identified as a trap, in sorted order
    pub traps: Vec<String>,
}

impl CrawlReport {
    /// Renders the report as plain text
    pub fn render(&self) -> String {
        let rule = "-".repeat(50);
        let mut out = String::new();

        out.push_str(&format!(
            "Crawl report generated {}\n",
            chrono::Utc::now().to_rfc3339()
        ));
        out.push_str(&format!("URLs fetched: {}\n\n", self.fetched));

        out.push_str(&format!("1) Domain Count\n{}\n", rule));
        for (domain, count) in &self.domain_counts {
            out.push_str(&format!("{}:\t{}\n", domain, count));
        }

        out.push_str("\n2) Most links:\t");
        match &self.best_page {
            Some((url, count)) => out.push_str(&format!("{} ({} out-links)\n", url, count)),
            None => out.push_str("none\n"),
        }

        out.push_str(&format!("\n3) Downloaded\n{}\n", rule));
        for url in &self.seen_urls {
            out.push_str(&format!("{}\n", url));
        }

        out.push_str(&format!("\n4) Traps\n{}\n", rule));
        for url in &self.traps {
            out.push_str(&format!("{}\n", url));
        }

        out
    }

    /// Writes the rendered report to a file
    ///
    /// # Arguments
    ///
    /// * `path` - Destination path, truncated if it exists
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Prints a short session summary to stdout
pub fn print_summary(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");
    println!("URLs fetched: {}", report.fetched);
    println!("URLs accepted: {}", report.seen_urls.len());
    println!("Domains: {}", report.domain_counts.len());
    println!("Traps identified: {}", report.traps.len());

    match &report.best_page {
        Some((url, count)) => println!("Most out-links: {} ({})", url, count),
        None => println!("Most out-links: none"),
    }
}
