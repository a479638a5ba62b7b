//! Resume and JD analysis pipeline

pub mod analyzer;
pub mod fields;
pub mod jd_analyzer;
pub mod outreach;
pub mod scorer;
pub mod similarity;
pub mod taxonomy;
pub mod text_processor;
