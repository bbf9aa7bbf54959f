use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{reason}")]
    InvalidVelocity { value: f64, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::InvalidVelocity { .. } | AppError::ValidationError { .. } => {
                ErrorCategory::Validation
            }
            AppError::NotFound { .. } => ErrorCategory::NotFound,
            AppError::IoError(_) | AppError::SerializationError(_) => ErrorCategory::Storage,
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 持久層 I/O 失敗 (磁碟、權限、損毀的 JSON)
    pub fn is_store_failure(&self) -> bool {
        self.category() == ErrorCategory::Storage
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Storage | ErrorCategory::Configuration => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "VALIDATION_ERROR",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Storage | ErrorCategory::Configuration => "INTERNAL_ERROR",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::InvalidVelocity { reason, .. } => reason.clone(),
            AppError::ValidationError { message } => message.clone(),
            AppError::NotFound { resource, .. } => format!("{} not found", resource),
            AppError::IoError(_) => "Could not access the data store".to_string(),
            AppError::SerializationError(_) => "The data store contains invalid JSON".to_string(),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AppError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' could not be read: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::InvalidVelocity { .. } => "Send a velocity between 0 and 10 m/s",
            AppError::ValidationError { .. } => "Check the request body and query parameters",
            AppError::NotFound { .. } => "Check the identifier and try again",
            AppError::IoError(_) => "Check that the data directory exists and is writable",
            AppError::SerializationError(_) => {
                "Repair or remove db.json; it will be re-created with the seed zones"
            }
            AppError::ConfigError { .. } | AppError::MissingConfigError { .. } => {
                "Review the command line flags or the configuration file"
            }
            AppError::InvalidConfigValueError { .. } => "Correct the reported setting and restart",
            AppError::ConfigValidationError { .. } => "Make sure the file is valid TOML",
        }
    }
}
