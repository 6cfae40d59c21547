use serde::Deserialize;

/// File extensions excluded from crawling by default.
///
/// Any URL whose path ends in `.<ext>` for one of these entries is treated
/// as non-HTML content and skipped. The list is configuration data so it can
/// be tested and extended without touching validator control flow.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2", "mp3",
    "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps", "eps",
    "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe", "bz2",
    "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx",
    "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
];

/// Main configuration structure for Trapline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub corpus: CorpusConfig,
    pub output: OutputConfig,
}

/// Crawler behavior and link-policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hostname fragment a URL must contain to be in scope
    #[serde(rename = "allowed-domain-suffix")]
    pub allowed_domain_suffix: String,

    /// URLs longer than this are treated as traps
    #[serde(rename = "max-url-length", default = "default_max_url_length")]
    pub max_url_length: usize,

    /// Query similarity at or above this threshold counts as churn
    #[serde(rename = "query-similarity-threshold", default = "default_similarity_threshold")]
    pub query_similarity_threshold: f64,

    /// File extensions to skip (lowercase, without the dot)
    #[serde(rename = "ignored-extensions", default = "default_ignored_extensions")]
    pub ignored_extensions: Vec<String>,

    /// Seed URLs the frontier starts from
    pub seeds: Vec<String>,
}

/// Corpus configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding captured page content, one file per URL
    #[serde(rename = "content-dir")]
    pub content_dir: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the plain-text session report is written to
    #[serde(rename = "report-path")]
    pub report_path: String,
}

fn default_max_url_length() -> usize {
    200
}

fn default_similarity_threshold() -> f64 {
    0.85
}

fn default_ignored_extensions() -> Vec<String> {
    DEFAULT_IGNORED_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}
