use crate::config::types::{Config, CrawlerConfig, NamesConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_names_config(&config.names)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // A malformed start URL is a fatal configuration error, caught before
    // any crawling begins.
    let start = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidStartUrl(format!("{}: {}", config.start_url, e)))?;

    if start.scheme() != "http" && start.scheme() != "https" {
        return Err(ConfigError::InvalidStartUrl(format!(
            "start-url must be HTTP or HTTPS, got scheme '{}'",
            start.scheme()
        )));
    }

    let start_host = start
        .host_str()
        .ok_or_else(|| ConfigError::InvalidStartUrl("start-url has no host".to_string()))?
        .to_lowercase();

    if config.base_host.is_empty() {
        return Err(ConfigError::Validation(
            "base-host cannot be empty".to_string(),
        ));
    }

    let base = config.base_host.to_lowercase();
    if start_host != base && !start_host.ends_with(&format!(".{}", base)) {
        return Err(ConfigError::Validation(format!(
            "start-url host '{}' is outside base-host '{}'",
            start_host, base
        )));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.deadline_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "deadline-secs must be >= 1, got {}",
            config.deadline_secs
        )));
    }

    Ok(())
}

/// Validates name list configuration
fn validate_names_config(config: &NamesConfig) -> Result<(), ConfigError> {
    if config.first_names_path.is_empty() {
        return Err(ConfigError::Validation(
            "first-names-path cannot be empty".to_string(),
        ));
    }

    if config.last_names_path.is_empty() {
        return Err(ConfigError::Validation(
            "last-names-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("raw-report-path", &config.raw_report_path),
        ("validated-report-path", &config.validated_report_path),
        ("summary-path", &config.summary_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} cannot be empty",
                field
            )));
        }
    }

    Ok(())
}
