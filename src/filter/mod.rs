//! Link validation and crawler-trap detection
//!
//! This module decides, one candidate URL at a time, whether a discovered
//! link is worth fetching. Detection is deliberately not a pure function of
//! the candidate: the validator carries a rolling history of the last
//! admitted URL and the last examined path/query, and judges each candidate
//! by its transition from that baseline. This is what catches infinite URL
//! spaces (calendar pages, session-id churn, faceted search) that look
//! harmless one URL at a time.

use crate::config::CrawlerConfig;
use std::collections::HashSet;
use url::Url;

/// Rolling history the validator compares each candidate against.
///
/// The struct is a plain value: [`TrapFilter::validate`] takes the current
/// state and returns the successor state instead of mutating shared fields,
/// so callers own the history and sequential-comparison semantics stay
/// explicit.
///
/// `last_path`/`last_query` track the most recently *examined* candidate
/// that survived the churn checks, while `last_admitted` only ever advances
/// on a full admission. Rejected candidates must not become the comparison
/// baseline for the near-duplicate check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrapState {
    /// The most recently admitted URL, if any
    last_admitted: Option<String>,
    /// Path of the most recently recorded candidate
    last_path: Option<String>,
    /// Query of the most recently recorded candidate ("" when absent)
    last_query: String,
}

impl TrapState {
    /// Creates an empty history for a fresh crawl session
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently admitted URL, if any
    pub fn last_admitted(&self) -> Option<&str> {
        self.last_admitted.as_deref()
    }
}

/// Outcome of validating a single candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate should be fetched
    Admit,
    /// The candidate should be skipped
    Reject(RejectReason),
}

impl Verdict {
    /// Returns true if the candidate was admitted
    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }

    /// Returns true if the rejection identified a crawler trap
    pub fn is_trap(&self) -> bool {
        matches!(self, Self::Reject(reason) if reason.is_trap())
    }
}

/// Why a candidate URL was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The URL string could not be parsed into components
    Unparseable,
    /// Scheme other than http/https
    DisallowedScheme,
    /// One single-character edit away from the last admitted URL
    NearDuplicate,
    /// Same path as the previous candidate with a near-identical query
    QueryChurn,
    /// URL string exceeds the configured length limit
    OverLength,
    /// Hostname outside the crawl's allowed domain scope
    OutOfScope,
    /// Path ends in a denylisted non-HTML extension
    IgnoredExtension,
}

impl RejectReason {
    /// Returns true if this rejection marks the URL as a crawler trap.
    ///
    /// Scope and scheme rejections are ordinary filtering; only the churn
    /// and length heuristics identify URLs worth recording as traps.
    pub fn is_trap(&self) -> bool {
        matches!(
            self,
            Self::NearDuplicate | Self::QueryChurn | Self::OverLength
        )
    }
}

/// The stateful link validator.
///
/// Holds the session's policy knobs; the rolling [`TrapState`] is threaded
/// through [`validate`](Self::validate) by the caller. Checks run in a fixed
/// order and short-circuit, so the baseline-update asymmetry described on
/// [`TrapState`] is load-bearing: the path/query baseline advances even for
/// candidates the later length and scope checks reject.
#[derive(Debug, Clone)]
pub struct TrapFilter {
    allowed_domain_suffix: String,
    max_url_length: usize,
    query_similarity_threshold: f64,
    ignored_extensions: HashSet<String>,
}

impl TrapFilter {
    /// Creates a filter from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            allowed_domain_suffix: config.allowed_domain_suffix.clone(),
            max_url_length: config.max_url_length,
            query_similarity_threshold: config.query_similarity_threshold,
            ignored_extensions: config.ignored_extensions.iter().cloned().collect(),
        }
    }

    /// Validates one candidate URL against the rolling history.
    ///
    /// Returns the verdict together with the successor history. The caller
    /// is expected to adopt the returned state unconditionally and, when the
    /// verdict [`is_trap`](Verdict::is_trap), record the URL in its trap set.
    pub fn validate(&self, candidate: &str, state: &TrapState) -> (Verdict, TrapState) {
        let url = match Url::parse(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Rejecting unparseable URL {}: {}", candidate, e);
                return (Verdict::Reject(RejectReason::Unparseable), state.clone());
            }
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return (
                Verdict::Reject(RejectReason::DisallowedScheme),
                state.clone(),
            );
        }

        // Single-character churn against the last admission: an incrementing
        // counter or rotating session character differs by exactly one edit.
        if let Some(last) = state.last_admitted.as_deref() {
            if strsim::damerau_levenshtein(last, candidate) == 1 {
                return (Verdict::Reject(RejectReason::NearDuplicate), state.clone());
            }
        }

        let path = url.path();
        let query = url.query().unwrap_or("");

        // Same page, slightly different query: session tokens and the like.
        // Pagination tends to score just below the threshold and pass, which
        // is accepted to avoid false positives on legitimate paging.
        if state.last_path.as_deref() == Some(path) && !query.is_empty() {
            let similarity = strsim::jaro_winkler(query, &state.last_query);
            if similarity >= self.query_similarity_threshold {
                return (Verdict::Reject(RejectReason::QueryChurn), state.clone());
            }
        }

        // The comparison baseline advances here, before the length and scope
        // checks, so even a candidate rejected below shapes the next churn
        // comparison. Only last_admitted waits for an actual admission.
        let mut next = state.clone();
        next.last_path = Some(path.to_string());
        next.last_query = query.to_string();

        if candidate.len() > self.max_url_length {
            return (Verdict::Reject(RejectReason::OverLength), next);
        }

        let host = match url.host_str() {
            Some(host) => host,
            None => {
                tracing::debug!("Rejecting URL without hostname: {}", candidate);
                return (Verdict::Reject(RejectReason::OutOfScope), next);
            }
        };

        if !host.contains(&self.allowed_domain_suffix) {
            return (Verdict::Reject(RejectReason::OutOfScope), next);
        }

        if self.has_ignored_extension(path) {
            return (Verdict::Reject(RejectReason::IgnoredExtension), next);
        }

        next.last_admitted = Some(candidate.to_string());
        (Verdict::Admit, next)
    }

    /// Checks whether the path ends in a denylisted extension (case-insensitive)
    fn has_ignored_extension(&self, path: &str) -> bool {
        let lowered = path.to_lowercase();
        match lowered.rfind('.') {
            Some(dot) => self.ignored_extensions.contains(&lowered[dot + 1..]),
            None => false,
        }
    }
}
