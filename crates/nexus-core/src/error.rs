use thiserror::Error;

/// Top-level error type for the Nexus system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for NexusError` so that the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NexusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("Generation error: {0}")]
    Generation(String),
}

impl From<toml::de::Error> for NexusError {
    fn from(err: toml::de::Error) -> Self {
        NexusError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NexusError {
    fn from(err: toml::ser::Error) -> Self {
        NexusError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NexusError {
    fn from(err: serde_json::Error) -> Self {
        NexusError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Nexus operations.
pub type Result<T> = std::result::Result<T, NexusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NexusError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(NexusError, &str)> = vec![
            (
                NexusError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                NexusError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
            (
                NexusError::Persistence("disk full".to_string()),
                "Persistence error: disk full",
            ),
            (
                NexusError::Voice("engine busy".to_string()),
                "Voice error: engine busy",
            ),
            (
                NexusError::Scheduler("clock skew".to_string()),
                "Scheduler error: clock skew",
            ),
            (
                NexusError::Generation("quota".to_string()),
                "Generation error: quota",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let nexus_err: NexusError = io_err.into();
        assert!(matches!(nexus_err, NexusError::Io(_)));
        assert!(nexus_err.to_string().starts_with("I/O error:"));
        assert!(nexus_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let nexus_err: NexusError = err.unwrap_err().into();
        assert!(matches!(nexus_err, NexusError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let nexus_err: NexusError = err.unwrap_err().into();
        assert!(matches!(nexus_err, NexusError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(format!("value {}", value))
        }

        assert_eq!(inner().unwrap(), "value 42");
    }
}
