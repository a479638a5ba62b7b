//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Malformed document '{file}': {reason}")]
    MalformedDocument { file: String, reason: String },

    #[error("JD unavailable: {0}")]
    JdUnavailable(String),

    #[error("No candidates to screen")]
    NoCandidates,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScreenerError {
    fn from(err: anyhow::Error) -> Self {
        ScreenerError::Processing(err.to_string())
    }
}

impl From<zip::result::ZipError> for ScreenerError {
    fn from(err: zip::result::ZipError) -> Self {
        ScreenerError::DocxExtraction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScreenerError::MalformedDocument {
            file: "cv.pdf".to_string(),
            reason: "not a readable PDF".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed document 'cv.pdf': not a readable PDF");
        assert_eq!(ScreenerError::NoCandidates.to_string(), "No candidates to screen");
    }

    #[test]
    fn test_conversions() {
        let err: ScreenerError = anyhow::anyhow!("pool exhausted").into();
        assert!(matches!(err, ScreenerError::Processing(ref m) if m == "pool exhausted"));

        let err: ScreenerError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, ScreenerError::DocxExtraction(_)));
    }
}
