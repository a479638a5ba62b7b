//! Job description analysis: ranked keywords plus role and industry classification

use crate::config::JdConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::taxonomy::{IndustryCategory, RoleCategory, JD_PHRASES, JD_STOP_WORDS};
use crate::processing::text_processor::count_occurrences;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Derived once per batch and shared read-only by every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdProfile {
    pub keywords: Vec<String>,
    pub primary_role: RoleCategory,
    pub primary_industry: IndustryCategory,
    pub role_hits: BTreeMap<String, usize>,
    pub industry_hits: BTreeMap<String, usize>,
    /// Normalized JD text, kept for the semantic scorer
    #[serde(skip)]
    pub text: String,
}

pub struct JdAnalyzer {
    config: JdConfig,
    word_regex: Regex,
    section_regex: Regex,
}

impl JdAnalyzer {
    pub fn new(config: JdConfig) -> Self {
        let word_regex = Regex::new(&format!(r"\b[a-z]{{{},}}\b", config.min_word_len.max(1)))
            .expect("Invalid JD word regex");
        let section_regex = Regex::new(r"(?s)\b(?:skills|requirements|qualifications)\s*:")
            .expect("Invalid JD section regex");

        Self {
            config,
            word_regex,
            section_regex,
        }
    }

    /// Build the profile, refusing a JD that yields no keywords.
    pub fn analyze(&self, text: &str) -> Result<JdProfile> {
        if text.trim().is_empty() {
            return Err(ScreenerError::JdUnavailable("job description is empty".to_string()));
        }

        let keywords = self.extract_keywords(text);
        if keywords.is_empty() {
            return Err(ScreenerError::JdUnavailable(
                "no keywords could be extracted from the job description".to_string(),
            ));
        }

        let lower = text.to_lowercase();
        let role_counts: Vec<(RoleCategory, usize)> = RoleCategory::SCORABLE
            .iter()
            .map(|role| (*role, Self::hit_count(&lower, role.keywords())))
            .collect();
        let industry_counts: Vec<(IndustryCategory, usize)> = IndustryCategory::SCORABLE
            .iter()
            .map(|industry| (*industry, Self::hit_count(&lower, industry.keywords())))
            .collect();

        let primary_role = self.pick_role(&role_counts);
        let primary_industry = Self::pick_best(&industry_counts).unwrap_or(IndustryCategory::Other);

        info!(
            "JD profile: role={}, industry={}, {} keywords",
            primary_role,
            primary_industry,
            keywords.len()
        );
        debug!("JD keywords: {:?}", keywords);

        Ok(JdProfile {
            keywords,
            primary_role,
            primary_industry,
            role_hits: role_counts
                .iter()
                .map(|(role, hits)| (role.to_string(), *hits))
                .collect(),
            industry_hits: industry_counts
                .iter()
                .map(|(industry, hits)| (industry.to_string(), *hits))
                .collect(),
            text: text.to_string(),
        })
    }

    /// Top keywords by weighted frequency. Known phrases lead the list when enabled.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();

        let mut phrases: Vec<(usize, &str)> = if self.config.phrase_extraction {
            JD_PHRASES
                .iter()
                .filter_map(|phrase| lower.find(phrase).map(|pos| (pos, *phrase)))
                .collect()
        } else {
            Vec::new()
        };
        phrases.sort_by_key(|(pos, _)| *pos);

        // word -> (weight, first position)
        let mut weights: HashMap<&str, (usize, usize)> = HashMap::new();
        for mat in self.word_regex.find_iter(&lower) {
            let word = mat.as_str();
            if JD_STOP_WORDS.contains(&word) {
                continue;
            }
            weights.entry(word).or_insert((0, mat.start())).0 += 1;
        }

        let boost = self.config.section_boost.saturating_sub(1);
        for section in self.section_regex.find_iter(&lower) {
            let window: String = lower[section.end()..]
                .chars()
                .take(self.config.section_window_chars)
                .collect();
            for mat in self.word_regex.find_iter(&window) {
                if let Some(entry) = weights.get_mut(mat.as_str()) {
                    entry.0 += boost;
                }
            }
        }

        let mut ranked: Vec<(&str, usize, usize)> = weights
            .into_iter()
            .map(|(word, (weight, first))| (word, weight, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        phrases
            .into_iter()
            .map(|(_, phrase)| phrase)
            .chain(ranked.into_iter().map(|(word, _, _)| word))
            .take(self.config.top_keywords)
            .map(str::to_string)
            .collect()
    }

    pub fn detect_role(&self, text: &str) -> RoleCategory {
        let lower = text.to_lowercase();
        let counts: Vec<(RoleCategory, usize)> = RoleCategory::SCORABLE
            .iter()
            .map(|role| (*role, Self::hit_count(&lower, role.keywords())))
            .collect();
        self.pick_role(&counts)
    }

    pub fn detect_industry(&self, text: &str) -> IndustryCategory {
        let lower = text.to_lowercase();
        let counts: Vec<(IndustryCategory, usize)> = IndustryCategory::SCORABLE
            .iter()
            .map(|industry| (*industry, Self::hit_count(&lower, industry.keywords())))
            .collect();
        Self::pick_best(&counts).unwrap_or(IndustryCategory::Other)
    }

    // R&D vocabulary overlaps with management terms, so a strong R&D signal wins outright.
    fn pick_role(&self, counts: &[(RoleCategory, usize)]) -> RoleCategory {
        let rnd_hits = counts
            .iter()
            .find(|(role, _)| *role == RoleCategory::RndLead)
            .map(|(_, hits)| *hits)
            .unwrap_or(0);
        if rnd_hits >= self.config.rnd_override_hits {
            return RoleCategory::RndLead;
        }
        Self::pick_best(counts).unwrap_or(RoleCategory::Other)
    }

    /// Highest nonzero count; earlier entries win ties.
    fn pick_best<T: Copy>(counts: &[(T, usize)]) -> Option<T> {
        let mut best: Option<(T, usize)> = None;
        for (category, hits) in counts {
            if *hits > 0 && best.map_or(true, |(_, top)| *hits > top) {
                best = Some((*category, *hits));
            }
        }
        best.map(|(category, _)| category)
    }

    fn hit_count(lower: &str, keywords: &[&str]) -> usize {
        keywords.iter().map(|kw| count_occurrences(lower, kw)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALES_JD: &str = "Looking for a Sales Manager with 5+ years business development and export sales experience in the chemical industry";

    #[test]
    fn test_sales_chemical_classification() {
        let analyzer = JdAnalyzer::new(JdConfig::default());
        let profile = analyzer.analyze(SALES_JD).unwrap();

        assert_eq!(profile.primary_role, RoleCategory::Sales);
        assert_eq!(profile.primary_industry, IndustryCategory::Chemical);
        assert_eq!(profile.role_hits["sales"], 4);
        assert_eq!(profile.industry_hits["chemical"], 1);
    }

    #[test]
    fn test_keywords_phrases_first_then_frequency() {
        let analyzer = JdAnalyzer::new(JdConfig::default());
        let keywords = analyzer.extract_keywords(SALES_JD);

        assert_eq!(keywords[0], "business development");
        assert_eq!(keywords[1], "sales");
        assert!(keywords.contains(&"chemical".to_string()));
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"looking".to_string()));
    }

    #[test]
    fn test_section_boost_promotes_skills() {
        let analyzer = JdAnalyzer::new(JdConfig {
            phrase_extraction: false,
            ..JdConfig::default()
        });
        let jd = "Operations manager. Manager for plant. Manager on site.\nSkills: tally, tally";
        let keywords = analyzer.extract_keywords(jd);
        assert_eq!(keywords[0], "tally");
        assert_eq!(keywords[1], "manager");
    }

    #[test]
    fn test_top_n_limit() {
        let analyzer = JdAnalyzer::new(JdConfig {
            top_keywords: 3,
            ..JdConfig::default()
        });
        assert_eq!(analyzer.extract_keywords(SALES_JD).len(), 3);
    }

    #[test]
    fn test_rnd_override() {
        let analyzer = JdAnalyzer::new(JdConfig::default());
        let jd = "R&D lead for formulation research. Manage recruit plans, recruit interns, recruit staff, recruit leads.";
        assert_eq!(analyzer.detect_role(jd), RoleCategory::RndLead);
    }

    #[test]
    fn test_unknown_role_and_industry() {
        let analyzer = JdAnalyzer::new(JdConfig::default());
        assert_eq!(analyzer.detect_role("gardener wanted"), RoleCategory::Other);
        assert_eq!(analyzer.detect_industry("gardener wanted"), IndustryCategory::Other);
    }

    #[test]
    fn test_empty_jd_is_unavailable() {
        let analyzer = JdAnalyzer::new(JdConfig::default());
        assert!(matches!(analyzer.analyze("   "), Err(ScreenerError::JdUnavailable(_))));
        assert!(matches!(analyzer.analyze("a an to of"), Err(ScreenerError::JdUnavailable(_))));
    }
}
