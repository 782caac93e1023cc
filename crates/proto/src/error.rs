use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading/validation error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistent store error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Outbound registry request error.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Backup file import error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Backup file export error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Interactive command error.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value and reason.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Filesystem read error.
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(String),
}

/// Persistent store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No persistence backend could be opened.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A read, write, delete, or clear operation failed.
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Outbound registry request errors
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection-level or client construction failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// Registry answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Backup import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// The backup file could not be read.
    #[error("IO error reading backup: {0}")]
    Io(#[from] std::io::Error),

    /// The backup file is not a valid backup document.
    #[error("Malformed backup file: {0}")]
    Parse(String),

    /// Writing the restored records failed.
    #[error("{0}")]
    Storage(#[from] StorageError),
}

/// Backup export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading the collections failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// The backup document could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backup file could not be written.
    #[error("IO error writing backup: {0}")]
    Io(#[from] std::io::Error),
}

/// Interactive command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// The user declined a confirmation prompt.
    #[error("Declined by user")]
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_config_error_variant() {
        let err = ConfigError::InvalidValue {
            field: "stats.timeout_secs".to_string(),
            reason: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("Invalid value for stats.timeout_secs"));
    }

    #[test]
    fn wraps_storage_error_into_top_level_error() {
        let err: Error = StorageError::Unavailable("no home".to_string()).into();
        assert!(err.to_string().contains("Storage error"));
        assert!(err.to_string().contains("Storage unavailable"));
    }

    #[test]
    fn network_status_error_names_url() {
        let err = NetworkError::Status {
            status: 404,
            url: "https://api.npmjs.org/downloads/point/last-week/x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 from https://api.npmjs.org/downloads/point/last-week/x"
        );
    }

    #[test]
    fn serde_errors_become_serialization_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: StorageError = parse.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn wraps_import_and_command_errors() {
        let import_err: Error = ImportError::Parse("missing brace".to_string()).into();
        assert!(import_err.to_string().contains("Malformed backup file"));

        let declined: Error = CommandError::Declined.into();
        assert!(declined.to_string().contains("Declined"));
    }
}
