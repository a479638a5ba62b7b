//! Report assembly and formatting

pub mod formatter;
pub mod report;
