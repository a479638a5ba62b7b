//! File type detection

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
}

impl FileType {
    /// Anything that is not a PDF or DOCX is decoded as text.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            _ => FileType::Text,
        }
    }

    pub fn from_file_name(file_name: &str) -> Self {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Text)
    }
}

/// Extensions picked up when scanning a resume directory
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];
