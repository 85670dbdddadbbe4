use thiserror::Error;

#[derive(Error, Debug)]
pub enum HooksError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Session state error: {0}")]
    SessionState(String),

    #[error("Empty hook input")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HooksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = HooksError::Config("missing file".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing file");
    }

    #[test]
    fn test_provider_error_display() {
        let err = HooksError::Provider("elevenlabs exited with 1".to_string());
        assert_eq!(err.to_string(), "Provider error: elevenlabs exited with 1");
    }

    #[test]
    fn test_empty_input_display() {
        assert_eq!(HooksError::EmptyInput.to_string(), "Empty hook input");
    }

    #[test]
    fn test_json_error_from() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: HooksError = parse.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
