use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    #[error("A question fetch is already in progress")]
    FetchInProgress,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {0}")]
    FileError(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NetworkError(_) => "NETWORK_ERROR",
            AppError::EmptyResponse(_) => "EMPTY_RESPONSE",
            AppError::ParseError(_) => "PARSE_ERROR",
            AppError::PreconditionViolation(_) => "PRECONDITION_VIOLATION",
            AppError::FetchInProgress => "FETCH_IN_PROGRESS",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::FileError(_) => "FILE_ERROR",
            AppError::TerminalError(_) => "TERMINAL_ERROR",
        }
    }

    /// Failures caused by the generation service. These degrade to
    /// "no questions available" and the user may simply retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkError(_) | AppError::EmptyResponse(_) | AppError::ParseError(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::NetworkError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}
impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileError(format!("CSV error: {}", err))
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileError(format!("I/O error: {}", err))
    }
}
impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::TerminalError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::ParseError("test".into()).error_code(), "PARSE_ERROR");
        assert_eq!(AppError::FetchInProgress.error_code(), "FETCH_IN_PROGRESS");
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::EmptyResponse("no candidates".into());
        assert_eq!(err.to_string(), "Empty response: no candidates");
    }

    #[test]
    fn test_only_service_failures_are_recoverable() {
        assert!(AppError::NetworkError("timeout".into()).is_recoverable());
        assert!(AppError::EmptyResponse("none".into()).is_recoverable());
        assert!(AppError::ParseError("bad json".into()).is_recoverable());

        assert!(!AppError::ValidationError("blank".into()).is_recoverable());
        assert!(!AppError::PreconditionViolation("order".into()).is_recoverable());
        assert!(!AppError::FetchInProgress.is_recoverable());
    }

    #[test]
    fn test_serde_json_error_maps_to_parse_error() {
        let err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let app_err: AppError = err.into();
        assert_eq!(app_err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_io_error_maps_to_file_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let app_err: AppError = err.into();
        assert_eq!(app_err.to_string(), "File error: I/O error: no such file");
    }
}
