use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for deciding which target pages the gateway may fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetFilterConfig {
    /// URL schemes that may be fetched
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,

    /// Regex patterns for URLs to allow (if empty, all URLs are allowed unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to refuse (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

impl Default for TargetFilterConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: default_allowed_schemes(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// Target filter that uses scheme rules and regex patterns to vet summary targets
#[derive(Debug)]
pub struct TargetFilter {
    config: TargetFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for TargetFilter {
    fn default() -> Self {
        Self {
            config: TargetFilterConfig::default(),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }
}

impl TargetFilter {
    /// Create a new target filter from configuration
    pub fn new(config: TargetFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a URL may be fetched based on all filtering rules
    pub fn is_allowed(&self, url: &Url) -> bool {
        if !self.is_allowed_scheme(url) {
            ::log::debug!("Refusing {}: scheme {} not allowed", url, url.scheme());
            return false;
        }

        if url.host_str().is_none_or(str::is_empty) {
            ::log::debug!("Refusing {}: no host", url);
            return false;
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url_str)) {
            ::log::debug!("Refusing {}: matched exclude pattern", url);
            return false;
        }

        if !self.include_regexes.is_empty()
            && !self.include_regexes.iter().any(|regex| regex.is_match(url_str))
        {
            ::log::debug!("Refusing {}: no include pattern matched", url);
            return false;
        }

        true
    }

    fn is_allowed_scheme(&self, url: &Url) -> bool {
        self.config
            .allowed_schemes
            .iter()
            .any(|scheme| scheme.eq_ignore_ascii_case(url.scheme()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = TargetFilter::default();

        let http_url = Url::parse("http://example.com/page.html").unwrap();
        assert!(filter.is_allowed(&http_url));

        let https_url = Url::parse("https://example.com/").unwrap();
        assert!(filter.is_allowed(&https_url));

        // Other schemes are refused
        let file_url = Url::parse("file:///etc/passwd").unwrap();
        assert!(!filter.is_allowed(&file_url));

        let ftp_url = Url::parse("ftp://example.com/file").unwrap();
        assert!(!filter.is_allowed(&ftp_url));
    }

    #[test]
    fn test_regex_patterns() {
        let config = TargetFilterConfig {
            include_patterns: vec![r"^https://([a-z]+\.)?example\.com/".to_string()],
            exclude_patterns: vec![r"/private/".to_string()],
            ..TargetFilterConfig::default()
        };
        let filter = TargetFilter::new(config).unwrap();

        let included = Url::parse("https://news.example.com/story").unwrap();
        assert!(filter.is_allowed(&included));

        let not_included = Url::parse("https://other.org/story").unwrap();
        assert!(!filter.is_allowed(&not_included));

        // Exclusions win over inclusions
        let excluded = Url::parse("https://example.com/private/page").unwrap();
        assert!(!filter.is_allowed(&excluded));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let config = TargetFilterConfig {
            exclude_patterns: vec!["(unclosed".to_string()],
            ..TargetFilterConfig::default()
        };
        assert!(TargetFilter::new(config).is_err());
    }
}
