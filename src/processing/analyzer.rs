//! Screening engine: runs extraction, field analysis and scoring over a batch

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use crate::input::document::{FileFailure, RawDocument};
use crate::input::text_extractor::extract_document;
use crate::processing::fields::{CandidateFields, FieldExtractor};
use crate::processing::jd_analyzer::{JdAnalyzer, JdProfile};
use crate::processing::outreach::MessageBuilder;
use crate::processing::scorer::{extra_keyword_hits, FitScorer, FitTag};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// The per-candidate output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub file_name: String,
    /// Position in the upload order, used to break score ties
    pub upload_index: usize,
    #[serde(flatten)]
    pub fields: CandidateFields,
    pub fit_score: f64,
    pub fit_tag: FitTag,
    pub score_breakdown: BTreeMap<String, f64>,
    pub role_match: bool,
    pub industry_match: bool,
    pub not_relevant: bool,
    pub remark: String,
    pub extra_keyword_hits: Vec<String>,
    pub outreach_message: String,
}

/// Caller-supplied extras that do not come from the documents.
#[derive(Debug, Clone, Default)]
pub struct ScreeningOptions {
    /// Used only by the outreach message
    pub role_title: Option<String>,
    pub extra_keywords: Vec<String>,
}

/// Unranked results of one run. Partial batches are valid.
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub jd_profile: Option<JdProfile>,
    pub candidates: Vec<CandidateRecord>,
    pub failures: Vec<FileFailure>,
    pub processing_time_ms: u64,
}

pub struct ScreeningEngine {
    field_extractor: FieldExtractor,
    jd_analyzer: JdAnalyzer,
    scorer: FitScorer,
    messages: MessageBuilder,
    pool: Option<rayon::ThreadPool>,
}

impl ScreeningEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.scoring.validate()?;

        let pool = if config.processing.workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.processing.workers)
                .build()
                .map_err(|e| ScreenerError::Processing(format!("Failed to build worker pool: {}", e)))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            field_extractor: FieldExtractor::new(config.extraction.clone())?,
            jd_analyzer: JdAnalyzer::new(config.jd.clone()),
            scorer: FitScorer::new(config.scoring.clone()),
            messages: MessageBuilder::new(config.outreach.clone()),
            pool,
        })
    }

    /// Extract and analyze the JD. Any failure here means there is nothing to score against.
    pub fn analyze_jd(&self, jd: &RawDocument) -> Result<JdProfile> {
        let text = extract_document(jd).map_err(|e| {
            ScreenerError::JdUnavailable(format!("could not read {}: {}", jd.file_name, e))
        })?;
        self.jd_analyzer.analyze(text.text())
    }

    /// Score every resume against the JD. The JD profile is complete before any candidate is touched.
    pub fn screen<F>(
        &self,
        jd: &RawDocument,
        resumes: &[RawDocument],
        options: &ScreeningOptions,
        progress: F,
    ) -> Result<ScreeningOutcome>
    where
        F: Fn(&str) + Sync,
    {
        if resumes.is_empty() {
            return Err(ScreenerError::NoCandidates);
        }
        let jd_profile = self.analyze_jd(jd)?;
        self.run_batch(Some(jd_profile), resumes, options, progress)
    }

    /// Field extraction only; every record is `Unscored`.
    pub fn extract_only<F>(
        &self,
        resumes: &[RawDocument],
        options: &ScreeningOptions,
        progress: F,
    ) -> Result<ScreeningOutcome>
    where
        F: Fn(&str) + Sync,
    {
        if resumes.is_empty() {
            return Err(ScreenerError::NoCandidates);
        }
        self.run_batch(None, resumes, options, progress)
    }

    fn run_batch<F>(
        &self,
        jd_profile: Option<JdProfile>,
        resumes: &[RawDocument],
        options: &ScreeningOptions,
        progress: F,
    ) -> Result<ScreeningOutcome>
    where
        F: Fn(&str) + Sync,
    {
        let start_time = Instant::now();
        info!("Screening {} resumes", resumes.len());

        let jd = jd_profile.as_ref();
        let results: Vec<std::result::Result<CandidateRecord, FileFailure>> = self.install(|| {
            resumes
                .par_iter()
                .enumerate()
                .map(|(index, document)| {
                    let result = self.process_document(index, document, jd, options);
                    progress(&document.file_name);
                    result
                })
                .collect()
        });

        let mut candidates = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(record) => candidates.push(record),
                Err(failure) => failures.push(failure),
            }
        }

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Screened {} candidates ({} failed) in {}ms",
            candidates.len(),
            failures.len(),
            processing_time_ms
        );

        Ok(ScreeningOutcome {
            jd_profile,
            candidates,
            failures,
            processing_time_ms,
        })
    }

    fn process_document(
        &self,
        index: usize,
        document: &RawDocument,
        jd: Option<&JdProfile>,
        options: &ScreeningOptions,
    ) -> std::result::Result<CandidateRecord, FileFailure> {
        match extract_document(document) {
            Ok(extracted) => {
                if extracted.is_blank() {
                    warn!("{}: no text extracted, fields will be unknown", extracted.file_name());
                }
                Ok(self.evaluate(index, extracted.file_name(), extracted.text(), jd, options))
            }
            Err(e) => {
                warn!("Skipping {}: {}", document.file_name, e);
                Err(FileFailure::new(document.file_name.clone(), e.to_string()))
            }
        }
    }

    /// Build one record from already-extracted text. Scored only when a JD profile is given.
    pub fn evaluate(
        &self,
        index: usize,
        file_name: &str,
        text: &str,
        jd: Option<&JdProfile>,
        options: &ScreeningOptions,
    ) -> CandidateRecord {
        let fields = self.field_extractor.extract(text, Some(file_name));
        let lower = text.to_lowercase();
        let outreach_message = self.messages.build(&fields.name, options.role_title.as_deref());
        let extra_keyword_hits = extra_keyword_hits(&options.extra_keywords, &lower);

        match jd {
            Some(profile) => {
                let assessment = self.scorer.score(profile, text, &fields);
                CandidateRecord {
                    file_name: file_name.to_string(),
                    upload_index: index,
                    fields,
                    fit_score: assessment.fit_score,
                    fit_tag: assessment.fit_tag,
                    score_breakdown: assessment.breakdown.to_map(),
                    role_match: assessment.role_match,
                    industry_match: assessment.industry_match,
                    not_relevant: assessment.not_relevant,
                    remark: assessment.remark,
                    extra_keyword_hits,
                    outreach_message,
                }
            }
            None => CandidateRecord {
                file_name: file_name.to_string(),
                upload_index: index,
                fields,
                fit_score: 0.0,
                fit_tag: FitTag::Unscored,
                score_breakdown: BTreeMap::new(),
                role_match: false,
                industry_match: false,
                not_relevant: false,
                remark: "No JD available".to_string(),
                extra_keyword_hits,
                outreach_message,
            },
        }
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::SENTINEL;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const JD: &str = "Looking for a Sales Manager with 5+ years business development and export sales experience in the chemical industry";

    fn engine() -> ScreeningEngine {
        let mut config = Config::default();
        config.processing.workers = 2;
        ScreeningEngine::new(&config).unwrap()
    }

    #[test]
    fn test_screen_batch_with_failure() {
        let engine = engine();
        let jd = RawDocument::from_text("jd.txt", JD);
        let resumes = vec![
            RawDocument::from_text(
                "ravi.txt",
                "Ravi Kumar\nravi@mail.com\n9876543210\nExport sales manager, 6 years in chemical distribution.",
            ),
            RawDocument::new("broken.docx", b"not a zip".to_vec()),
            RawDocument::from_text("empty.txt", ""),
        ];
        let seen = AtomicUsize::new(0);

        let outcome = engine
            .screen(&jd, &resumes, &ScreeningOptions::default(), |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].file_name, "broken.docx");

        let empty = outcome.candidates.iter().find(|c| c.file_name == "empty.txt").unwrap();
        assert_eq!(empty.fields.email, SENTINEL);
        assert!(empty.fit_score <= 15.0);
        assert!(empty.not_relevant);
    }

    #[test]
    fn test_preconditions() {
        let engine = engine();
        let jd = RawDocument::from_text("jd.txt", JD);
        assert!(matches!(
            engine.screen(&jd, &[], &ScreeningOptions::default(), |_| {}),
            Err(ScreenerError::NoCandidates)
        ));

        let blank = RawDocument::from_text("jd.txt", "  \n");
        let resumes = vec![RawDocument::from_text("a.txt", "Anything")];
        assert!(matches!(
            engine.screen(&blank, &resumes, &ScreeningOptions::default(), |_| {}),
            Err(ScreenerError::JdUnavailable(_))
        ));
    }

    #[test]
    fn test_extract_only_is_unscored() {
        let engine = engine();
        let options = ScreeningOptions {
            role_title: Some("Export Manager".to_string()),
            extra_keywords: vec!["incoterms".to_string()],
        };
        let resumes = vec![RawDocument::from_text("asha.txt", "Asha Rao\nIncoterms, export documentation")];

        let outcome = engine.extract_only(&resumes, &options, |_| {}).unwrap();
        let record = &outcome.candidates[0];

        assert!(outcome.jd_profile.is_none());
        assert_eq!(record.fit_tag, FitTag::Unscored);
        assert_eq!(record.remark, "No JD available");
        assert_eq!(record.extra_keyword_hits, vec!["incoterms"]);
        assert!(record.outreach_message.starts_with("Hi Asha,"));
        assert!(record.outreach_message.contains("Export Manager"));
    }
}
