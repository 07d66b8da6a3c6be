//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_loader(config, &mut result);
        Self::validate_storage(config, &mut result);
        Self::validate_page(config, &mut result);
        Self::validate_marker(config, &mut result);

        result
    }

    fn validate_loader(config: &Config, result: &mut ValidationResult) {
        let loader = &config.loader;

        if loader.mirrors.is_empty() {
            result.add_warning(ValidationWarning::new(
                "loader.mirrors",
                "No mirrors configured, only the manual list and cache can supply factions",
            ));
        }

        for (i, mirror) in loader.mirrors.iter().enumerate() {
            match url::Url::parse(mirror) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                Ok(parsed) => result.add_error(ValidationError::new(
                    format!("loader.mirrors[{}]", i),
                    format!("Unsupported scheme '{}', expected http or https", parsed.scheme()),
                )),
                Err(e) => result.add_error(ValidationError::new(
                    format!("loader.mirrors[{}]", i),
                    format!("Invalid URL '{}': {}", mirror, e),
                )),
            }
        }

        if loader.cache_ttl_secs == 0 {
            result.add_warning(ValidationWarning::new(
                "loader.cache_ttl_secs",
                "cache_ttl_secs is 0, the cache will never be considered fresh",
            ));
        }

        if loader.fetch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "loader.fetch_timeout_ms",
                "fetch_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "storage.path",
                "Storage path cannot be empty",
            ));
        }
    }

    fn validate_page(config: &Config, result: &mut ValidationResult) {
        let page = &config.page;

        for (path, value) in [
            ("page.poll_interval_ms", page.poll_interval_ms),
            ("page.debounce_ms", page.debounce_ms),
            ("page.url_poll_interval_ms", page.url_poll_interval_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if page.poll_interval_ms > page.max_wait_ms {
            result.add_warning(ValidationWarning::new(
                "page.poll_interval_ms",
                "poll_interval_ms exceeds max_wait_ms, the page will be checked only once",
            ));
        }

        if page.force_show {
            result.add_warning(ValidationWarning::new(
                "page.force_show",
                "force_show is enabled, the marker will show on every profile",
            ));
        }
    }

    fn validate_marker(config: &Config, result: &mut ValidationResult) {
        let marker = &config.marker;

        if marker.banner_id.is_empty() {
            result.add_error(ValidationError::new("marker.banner_id", "banner_id cannot be empty"));
        }
        if marker.badge_id.is_empty() {
            result.add_error(ValidationError::new("marker.badge_id", "badge_id cannot be empty"));
        }
        if !marker.banner_id.is_empty() && marker.banner_id == marker.badge_id {
            result.add_error(ValidationError::new(
                "marker",
                "banner_id and badge_id must differ",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
