//! Input processing module
//! Handles file detection, text extraction, and input management

pub mod document;
pub mod file_detector;
pub mod manager;
pub mod text_extractor;
