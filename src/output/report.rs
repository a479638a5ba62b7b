//! Ranked screening report assembled from one engine run

use crate::input::document::FileFailure;
use crate::processing::analyzer::{CandidateRecord, ScreeningOutcome};
use crate::processing::jd_analyzer::JdProfile;
use crate::processing::scorer::FitTag;
use crate::processing::taxonomy::TAXONOMY_VERSION;
use crate::processing::text_processor::round1;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub summary: ScreeningSummary,

    /// The profile every candidate was scored against, for audit
    pub jd_profile: Option<JdProfile>,

    /// Relevant candidates first, then by score, then by upload order
    pub candidates: Vec<CandidateRecord>,

    pub failures: Vec<FileFailure>,

    pub metadata: ReportMetadata,
}

/// Headline metrics for the batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total_candidates: usize,
    pub strong_matches: usize,
    pub not_relevant: usize,
    pub average_score: f64,
    pub failed_files: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub taxonomy_version: u32,
    pub processing_time_ms: u64,
}

impl ScreeningReport {
    /// Rank the outcome's candidates and compute the summary.
    pub fn from_outcome(outcome: ScreeningOutcome, strong_fit_threshold: f64) -> Self {
        let mut candidates = outcome.candidates;
        rank_candidates(&mut candidates);

        let summary = ScreeningSummary::compute(&candidates, outcome.failures.len(), strong_fit_threshold);

        Self {
            summary,
            jd_profile: outcome.jd_profile,
            candidates,
            failures: outcome.failures,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                taxonomy_version: TAXONOMY_VERSION,
                processing_time_ms: outcome.processing_time_ms,
            },
        }
    }

    pub fn is_scored(&self) -> bool {
        self.jd_profile.is_some()
    }
}

impl ScreeningSummary {
    pub fn compute(candidates: &[CandidateRecord], failed_files: usize, strong_fit_threshold: f64) -> Self {
        let scored: Vec<&CandidateRecord> = candidates
            .iter()
            .filter(|c| c.fit_tag != FitTag::Unscored)
            .collect();

        let average_score = if scored.is_empty() {
            0.0
        } else {
            round1(scored.iter().map(|c| c.fit_score).sum::<f64>() / scored.len() as f64)
        };

        Self {
            total_candidates: candidates.len(),
            strong_matches: scored
                .iter()
                .filter(|c| c.fit_score >= strong_fit_threshold)
                .count(),
            not_relevant: candidates.iter().filter(|c| c.not_relevant).count(),
            average_score,
            failed_files,
        }
    }
}

/// Not-relevant candidates sink to the bottom; otherwise score descending, upload order on ties.
pub fn rank_candidates(candidates: &mut [CandidateRecord]) {
    candidates.sort_by(|a, b| {
        a.not_relevant
            .cmp(&b.not_relevant)
            .then_with(|| b.fit_score.partial_cmp(&a.fit_score).unwrap_or(Ordering::Equal))
            .then_with(|| a.upload_index.cmp(&b.upload_index))
    });
}
