//! Documents as they cross the input boundary

use crate::input::file_detector::FileType;
use serde::{Deserialize, Serialize};

/// Raw uploaded bytes plus the declared file name. Discarded after extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Pasted text, e.g. a JD typed straight into the caller's form
    pub fn from_text(file_name: impl Into<String>, text: &str) -> Self {
        Self::new(file_name, text.as_bytes().to_vec())
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_file_name(&self.file_name)
    }
}

/// Normalized, newline-joined text produced by one extraction. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    file_name: String,
    text: String,
}

impl ExtractedText {
    pub fn new(file_name: impl Into<String>, text: String) -> Self {
        Self {
            file_name: file_name.into(),
            text,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A file that was skipped, and why. The rest of the batch carries on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

impl FileFailure {
    pub fn new(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            reason: reason.into(),
        }
    }
}
