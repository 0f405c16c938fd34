use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoffsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No <table> element found on {page}")]
    TableNotFound { page: String },

    #[error("Timed out after {waited_ms}ms waiting for a table on {page}")]
    PageWaitTimeout { page: String, waited_ms: u64 },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Extraction,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LayoffsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoffsError::ConfigValidationError { .. }
            | LayoffsError::InvalidConfigValueError { .. }
            | LayoffsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LayoffsError::CsvError(_) | LayoffsError::IoError(_) => ErrorCategory::Input,
            LayoffsError::HttpError(_) | LayoffsError::PageWaitTimeout { .. } => {
                ErrorCategory::Network
            }
            LayoffsError::TableNotFound { .. } => ErrorCategory::Extraction,
            LayoffsError::SerializationError(_) | LayoffsError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LayoffsError::HttpError(_) | LayoffsError::PageWaitTimeout { .. } => {
                ErrorSeverity::Medium
            }
            LayoffsError::CsvError(_)
            | LayoffsError::TableNotFound { .. }
            | LayoffsError::SerializationError(_)
            | LayoffsError::ProcessingError { .. } => ErrorSeverity::High,
            LayoffsError::IoError(_)
            | LayoffsError::ConfigValidationError { .. }
            | LayoffsError::InvalidConfigValueError { .. }
            | LayoffsError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LayoffsError::HttpError(_) => {
                "Check network connectivity and that the WARN page URL is reachable".to_string()
            }
            LayoffsError::PageWaitTimeout { .. } => {
                "Increase scraper.timeout_seconds or verify the page still renders a table"
                    .to_string()
            }
            LayoffsError::TableNotFound { .. } => {
                "The page layout may have changed; open it in a browser and confirm a table is present"
                    .to_string()
            }
            LayoffsError::CsvError(_) => {
                "Verify the CSV file is well formed and has a header row".to_string()
            }
            LayoffsError::IoError(_) => {
                "Check that the file exists and the process has permission to read it".to_string()
            }
            LayoffsError::SerializationError(_) => {
                "Report this as a bug; the chart payload could not be encoded".to_string()
            }
            LayoffsError::ConfigValidationError { field, .. }
            | LayoffsError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            LayoffsError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            LayoffsError::ProcessingError { .. } => {
                "Inspect the input data for unexpected values".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input data: {}", self),
            ErrorCategory::Network => format!("Could not load the page: {}", self),
            ErrorCategory::Extraction => format!("Nothing to extract: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoffsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_not_found_is_fatal_extraction_error() {
        let err = LayoffsError::TableNotFound {
            page: "https://example.com".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Extraction);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = LayoffsError::MissingConfigError {
            field: "scraper.url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("scraper.url"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }
}
