use crate::config::types::{Config, CorpusConfig, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_corpus_config(&config.corpus)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler and link-policy configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.allowed_domain_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "allowed-domain-suffix cannot be empty".to_string(),
        ));
    }

    if config.max_url_length < 1 {
        return Err(ConfigError::Validation(format!(
            "max-url-length must be >= 1, got {}",
            config.max_url_length
        )));
    }

    if !(0.0..=1.0).contains(&config.query_similarity_threshold) {
        return Err(ConfigError::Validation(format!(
            "query-similarity-threshold must be within [0, 1], got {}",
            config.query_similarity_threshold
        )));
    }

    for ext in &config.ignored_extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "ignored-extensions entries must be bare lowercase extensions, got '{}'",
                ext
            )));
        }
        if ext.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "ignored-extensions entries must be lowercase, got '{}'",
                ext
            )));
        }
    }

    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed '{}': {}", seed, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed '{}' must use http or https",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates corpus configuration
fn validate_corpus_config(config: &CorpusConfig) -> Result<(), ConfigError> {
    if config.content_dir.is_empty() {
        return Err(ConfigError::Validation(
            "content-dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
