use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("{message}")]
    InvalidState { message: String },

    #[error("Vehicle not found: {vehicle_id}")]
    NotFound { vehicle_id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 錯誤分類，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    InvalidState,
    NotFound,
    Config,
    System,
}

impl RentalError {
    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn not_found(vehicle_id: &str) -> Self {
        Self::NotFound {
            vehicle_id: vehicle_id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            Self::InvalidState { .. } => ErrorCategory::InvalidState,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Config,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { field, reason } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            Self::InvalidState { message } => message.clone(),
            Self::NotFound { vehicle_id } => {
                format!("Vehicle not found ({})", vehicle_id)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::IoError(e) => format!("Could not access file: {}", e),
            Self::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidArgument => "Check the identifiers, rates and day counts you passed",
            ErrorCategory::InvalidState => "Return the vehicle first or pick another available vehicle",
            ErrorCategory::NotFound => "List the fleet to see which vehicle IDs are registered",
            ErrorCategory::Config => "Fix the fleet TOML file and try again",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;
