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

        Self::validate_sync(config, &mut result);
        Self::validate_context(config, &mut result);
        Self::validate_organizer(config, &mut result);
        Self::validate_classifier(config, &mut result);

        result
    }

    fn validate_sync(config: &Config, result: &mut ValidationResult) {
        if config.sync.quiet_period_ms == 0 {
            result.add_error(ValidationError::new(
                "sync.quiet_period_ms",
                "quiet_period_ms must be greater than 0",
            ));
        }

        if config.sync.quiet_period_ms > 10_000 {
            result.add_warning(ValidationWarning::new(
                "sync.quiet_period_ms",
                "quiet_period_ms above 10s makes context updates feel stale",
            ));
        }
    }

    fn validate_context(config: &Config, result: &mut ValidationResult) {
        if config.context.bookmark_limit == 0 {
            result.add_error(ValidationError::new(
                "context.bookmark_limit",
                "bookmark_limit must be greater than 0",
            ));
        }
    }

    fn validate_organizer(config: &Config, result: &mut ValidationResult) {
        let organizer = &config.organizer;
        if organizer.min_groups == 0 {
            result.add_error(ValidationError::new(
                "organizer.min_groups",
                "min_groups must be greater than 0",
            ));
        }

        if organizer.min_groups > organizer.max_groups {
            result.add_error(ValidationError::new(
                "organizer.max_groups",
                format!(
                    "max_groups ({}) must not be less than min_groups ({})",
                    organizer.max_groups, organizer.min_groups
                ),
            ));
        }
    }

    fn validate_classifier(config: &Config, result: &mut ValidationResult) {
        let classifier = &config.classifier;
        if classifier.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "classifier.model",
                "model cannot be empty",
            ));
        }

        if classifier.api_key.as_deref().is_none_or(str::is_empty) {
            result.add_warning(ValidationWarning::new(
                "classifier.api_key",
                "No API key configured, tab organization will fail",
            ));
        }

        if !classifier.base_url.starts_with("http://") && !classifier.base_url.starts_with("https://") {
            result.add_warning(ValidationWarning::new(
                "classifier.base_url",
                format!("base_url '{}' is not an http(s) URL", classifier.base_url),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
