use crate::core::coordinates::format_degrees;
use thiserror::Error;

/// Failures that abort the whole run.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file '{path}' not found")]
    InputFileNotFound { path: String },

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputFileNotFound { path } => {
                format!("Error: Input file '{}' not found.", path)
            }
            EtlError::CsvError(e) => format!("Could not read or write CSV data: {}", e),
            EtlError::IoError(e) => format!("File system error: {}", e),
            EtlError::ApiError(e) => format!("Could not set up the HTTP client: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InputFileNotFound { .. } => {
                "Check the input path; it must point to an existing CSV file"
            }
            EtlError::CsvError(_) => "Make sure the input is a CSV file with a header row",
            EtlError::IoError(_) => "Check file permissions and free disk space",
            EtlError::ApiError(_) => "Check the TLS setup of this machine",
            EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => "Run with --help to see valid usage",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

/// Per-row failures. These never abort the run; each one becomes an `ERROR` row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("Missing lat/long coordinates")]
    MissingCoordinates,

    #[error("Invalid coordinates: {}, {}", format_degrees(.lat), format_degrees(.lon))]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("HTTP Error: {status} - {reason}")]
    HttpError { status: u16, reason: String },

    #[error("{0}")]
    TransportError(String),
}

impl From<reqwest::Error> for RowError {
    fn from(e: reqwest::Error) -> Self {
        RowError::TransportError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages() {
        assert_eq!(
            RowError::MissingCoordinates.to_string(),
            "Missing lat/long coordinates"
        );
        assert_eq!(
            RowError::InvalidCoordinates { lat: 91.5, lon: 10.0 }.to_string(),
            "Invalid coordinates: 91.5, 10.0"
        );
        assert_eq!(
            RowError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            RowError::HttpError {
                status: 503,
                reason: "Service Unavailable".to_string()
            }
            .to_string(),
            "HTTP Error: 503 - Service Unavailable"
        );
    }

    #[test]
    fn test_input_file_not_found_message() {
        let e = EtlError::InputFileNotFound {
            path: "points.csv".to_string(),
        };
        assert_eq!(e.user_friendly_message(), "Error: Input file 'points.csv' not found.");
        assert!(e.recovery_suggestion().contains("input path"));
    }
}
