//! Input manager for loading documents from disk

use crate::error::{Result, ScreenerError};
use crate::input::document::{ExtractedText, FileFailure, RawDocument};
use crate::input::file_detector::RESUME_EXTENSIONS;
use crate::input::text_extractor::extract_document;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads documents from disk. Extraction itself happens on the screening workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a file into a [`RawDocument`] named after its file name.
    pub async fn load_document(&self, path: &Path) -> Result<RawDocument> {
        if !path.is_file() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        Ok(RawDocument::new(file_name_of(path), bytes))
    }

    /// Load and extract a single file.
    pub async fn extract_text(&self, path: &Path) -> Result<ExtractedText> {
        let document = self.load_document(path).await?;
        info!("Extracting text from {:?}: {}", document.file_type(), path.display());
        extract_document(&document)
    }

    /// Load every path in order. Unreadable files become failures instead of errors.
    pub async fn load_batch(&self, paths: &[PathBuf]) -> (Vec<RawDocument>, Vec<FileFailure>) {
        let mut documents = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();

        for path in paths {
            match self.load_document(path).await {
                Ok(document) => documents.push(document),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    failures.push(FileFailure::new(path.display().to_string(), e.to_string()));
                }
            }
        }

        (documents, failures)
    }
}

/// Expand directories into their resume files. Directory entries are sorted by
/// name so the upload order is stable; explicit file paths keep their order.
pub fn collect_resume_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && has_resume_extension(path))
                .collect();
            entries.sort();
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_resume_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| RESUME_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
