use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("Recipient not allowed: {address}")]
    ValidationError { address: String },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Generation failed: {message}")]
    GenerationError { message: String },

    #[error("Delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Upstream,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ComposerError {
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationError {
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::DeliveryError {
            message: message.into(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::MissingFieldError {
            field: field.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::MissingFieldError { .. } => {
                ErrorCategory::Validation
            }
            Self::GenerationError { .. } => ErrorCategory::Upstream,
            Self::DeliveryError { .. } => ErrorCategory::Delivery,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Drives the process exit code: Medium failures are worth re-triggering as-is.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Upstream | ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { .. } => {
                "Please enter a valid @bhavyabgada.dev email address.".to_string()
            }
            Self::MissingFieldError { .. } => "Please fill in all fields.".to_string(),
            Self::GenerationError { message } => {
                format!("Could not generate the poetic version: {}", message)
            }
            Self::DeliveryError { message } => format!("Error sending email: {}", message),
            Self::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration error: {}", message),
            Self::IoError(e) => format!("System error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => {
                "Only addresses ending in @bhavyabgada.dev can receive messages"
            }
            Self::MissingFieldError { .. } => "Provide a non-empty subject and message",
            Self::GenerationError { .. } => {
                "Check OPENAI_API_KEY and network connectivity, then try again"
            }
            Self::DeliveryError { .. } => {
                "Check EMAIL_SENDER / EMAIL_PASSWORD (an app password may be required), then send again"
            }
            Self::MissingConfigError { .. } => {
                "Set OPENAI_API_KEY, EMAIL_SENDER and EMAIL_PASSWORD, or add them to the config file"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            Self::IoError(_) => "Check file permissions and terminal availability",
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_severity() {
        let err = ComposerError::ValidationError {
            address: "bob@gmail.com".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = ComposerError::delivery("auth failed");
        assert_eq!(err.category(), ErrorCategory::Delivery);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = ComposerError::IoError(std::io::Error::other("closed"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_delivery_message_carries_reason() {
        let err = ComposerError::delivery("535 authentication failed");
        assert_eq!(
            err.user_friendly_message(),
            "Error sending email: 535 authentication failed"
        );
    }
}
