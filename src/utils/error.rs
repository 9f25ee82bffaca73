use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Field {field} cannot be empty")]
    MissingField { field: String },

    #[error("Invalid {field} '{value}': {reason}")]
    FieldFormatInvalid {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Record #{row}: expected {expected} fields, found {found}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Record #{row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: Box<ReservationError>,
    },

    #[error("No records to validate")]
    EmptyBatch,

    #[error("Permission denied: {}", .path.display())]
    FileAccessDenied { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    FileIoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReservationError {
    /// 將 IO 錯誤依種類轉換，權限問題獨立成 `FileAccessDenied`
    pub fn from_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => ReservationError::FileAccessDenied { path },
            _ => ReservationError::FileIoError { path, source },
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReservationError::MissingField { .. }
            | ReservationError::FieldFormatInvalid { .. }
            | ReservationError::RowWidthMismatch { .. }
            | ReservationError::InvalidRecord { .. }
            | ReservationError::EmptyBatch
            | ReservationError::CsvError(_) => ErrorCategory::Validation,
            ReservationError::FileAccessDenied { .. }
            | ReservationError::FileIoError { .. }
            | ReservationError::SerializationError(_) => ErrorCategory::Io,
            ReservationError::ConfigError { .. }
            | ReservationError::InvalidConfigValueError { .. }
            | ReservationError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReservationError::EmptyBatch => ErrorSeverity::Low,
            ReservationError::MissingField { .. }
            | ReservationError::FieldFormatInvalid { .. }
            | ReservationError::RowWidthMismatch { .. }
            | ReservationError::InvalidRecord { .. }
            | ReservationError::CsvError(_) => ErrorSeverity::Medium,
            ReservationError::ConfigError { .. }
            | ReservationError::InvalidConfigValueError { .. }
            | ReservationError::MissingConfigError { .. } => ErrorSeverity::High,
            ReservationError::FileAccessDenied { .. }
            | ReservationError::FileIoError { .. }
            | ReservationError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReservationError::MissingField { .. } | ReservationError::FieldFormatInvalid { .. } => {
                "Fix the offending field in the reservation file and run again"
            }
            ReservationError::RowWidthMismatch { .. } | ReservationError::InvalidRecord { .. } => {
                "Check that every row has the same number of columns as the header"
            }
            ReservationError::EmptyBatch => "Add some reservations before partitioning",
            ReservationError::FileAccessDenied { .. } => {
                "Check the permissions of the data directory"
            }
            ReservationError::FileIoError { .. } => {
                "Make sure the file exists and the disk is writable"
            }
            ReservationError::CsvError(_) => "Make sure the input is plain comma-separated text",
            ReservationError::SerializationError(_) => "Retry without --json",
            ReservationError::ConfigError { .. }
            | ReservationError::InvalidConfigValueError { .. }
            | ReservationError::MissingConfigError { .. } => {
                "Review the TOML configuration and command-line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Invalid reservation data: {}", self),
            ErrorCategory::Io => format!("File problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
