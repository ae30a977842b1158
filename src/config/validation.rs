use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::url::normalize_url;
use crate::{ConfigError, UrlError};
use url::Url;

/// Longest per-request timeout accepted, in seconds
const MAX_TIMEOUT_SECS: u64 = 600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    if let Some(seed) = &config.crawler.seed {
        validate_seed(seed)?;
    }
    Ok(())
}

/// Parses, checks and normalizes a seed URL
///
/// The seed must be absolute http(s) with a host. It comes back in the same
/// normalized form the crawler uses for discovered links, so its fragment is
/// dropped.
pub fn validate_seed(seed: &str) -> Result<Url, ConfigError> {
    normalize_url(seed).map_err(|e| {
        let reason = match e {
            UrlError::InvalidScheme(_) => "must use http or https".to_string(),
            UrlError::MissingHost => "has no host".to_string(),
            other => other.to_string(),
        };
        ConfigError::InvalidUrl(format!("Seed URL '{}' {}", seed.trim(), reason))
    })
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 {
        return Err(ConfigError::Validation(
            "max-depth must be >= 1 (the seed itself is depth 1)".to_string(),
        ));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    // robots.txt product tokens are letters, digits, '-' and '_'
    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only ASCII letters, digits, '-' or '_', got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_seed() {
        assert!(validate_seed("https://example.com/").is_ok());
        assert!(validate_seed("http://127.0.0.1:8080/start").is_ok());
        assert!(validate_seed("  https://example.com  ").is_ok());

        assert!(validate_seed("").is_err());
        assert!(validate_seed("example.com").is_err());
        assert!(validate_seed("ftp://example.com/").is_err());
        assert!(validate_seed("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_validate_seed_normalizes() {
        let seed = validate_seed("https://Example.com/#top").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/");

        let err = validate_seed("ftp://example.com/").unwrap_err();
        assert!(err.to_string().contains("must use http or https"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.crawler.request_timeout_secs = MAX_TIMEOUT_SECS + 1;
        assert!(validate(&config).is_err());

        config.crawler.request_timeout_secs = MAX_TIMEOUT_SECS;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_crawler_name_rules() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "my-bot_2".to_string();
        assert!(validate(&config).is_ok());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "my bot".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_contact_url_must_parse() {
        let mut config = Config::default();
        config.user_agent.contact_url = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_seed_in_config() {
        let mut config = Config::default();
        config.crawler.seed = Some("ftp://example.com/".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }
}
