//! Multi-factor fit scoring of one candidate against a JD profile
//!
//! The final score is a pure function of the sub-scores and the two match
//! booleans; [`FitScorer::combine`] holds that function on its own so it can
//! be checked without any text.

use crate::config::ScoringPolicy;
use crate::processing::fields::CandidateFields;
use crate::processing::jd_analyzer::JdProfile;
use crate::processing::similarity::SemanticScorer;
use crate::processing::taxonomy::{IndustryCategory, RoleCategory};
use crate::processing::text_processor::{clamp_score, count_occurrences, round1};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MAX_BULLETS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitTag {
    #[serde(rename = "Strong Fit")]
    StrongFit,
    #[serde(rename = "Partial Fit")]
    PartialFit,
    #[serde(rename = "Not a Fit")]
    NotAFit,
    Unscored,
}

impl fmt::Display for FitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FitTag::StrongFit => "Strong Fit",
            FitTag::PartialFit => "Partial Fit",
            FitTag::NotAFit => "Not a Fit",
            FitTag::Unscored => "Unscored",
        };
        write!(f, "{}", label)
    }
}

/// Which hard ceiling, if any, replaced the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCeiling {
    WrongRole,
    WrongIndustry,
}

/// Sub-scores, each in [0, 100]. `semantic` is `None` when semantic scoring is off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub role: f64,
    pub industry: f64,
    pub keyword: f64,
    pub semantic: Option<f64>,
    pub experience: f64,
}

impl ScoreBreakdown {
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("role".to_string(), self.role);
        map.insert("industry".to_string(), self.industry);
        map.insert("keyword".to_string(), self.keyword);
        if let Some(semantic) = self.semantic {
            map.insert("semantic".to_string(), semantic);
        }
        map.insert("experience".to_string(), self.experience);
        map
    }

    /// Semantic similarity, or keyword overlap when semantic scoring is off.
    pub fn relevance(&self) -> f64 {
        self.semantic.unwrap_or(self.keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitAssessment {
    pub breakdown: ScoreBreakdown,
    pub role_match: bool,
    pub industry_match: bool,
    pub fit_score: f64,
    pub fit_tag: FitTag,
    pub not_relevant: bool,
    pub ceiling: Option<ScoreCeiling>,
    pub bullets: Vec<String>,
    pub remark: String,
}

pub struct FitScorer {
    policy: ScoringPolicy,
    semantic: SemanticScorer,
}

impl FitScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            semantic: SemanticScorer::new(),
        }
    }

    pub fn score(&self, jd: &JdProfile, resume_text: &str, fields: &CandidateFields) -> FitAssessment {
        let lower = resume_text.to_lowercase();

        let (role, role_match) = self.role_score(jd.primary_role, &lower);
        let (industry, industry_match) = self.industry_score(jd.primary_industry, &lower);
        let breakdown = ScoreBreakdown {
            role,
            industry,
            keyword: Self::keyword_score(&jd.keywords, &lower),
            semantic: self
                .policy
                .semantic_enabled
                .then(|| self.semantic.similarity(&jd.text, resume_text)),
            experience: self.experience_score(fields.total_experience_years),
        };

        let (fit_score, ceiling) = self.combine(&breakdown, role_match, industry_match);
        let fit_tag = self.tag_for(fit_score);
        let not_relevant = self.is_not_relevant(&breakdown, role_match);
        let bullets = self.bullets(jd, &breakdown, role_match, industry_match, fields);
        let remark = Self::remark(fit_tag, &bullets);

        debug!(
            "Scored {}: {:.1} ({}) breakdown={:?} ceiling={:?}",
            fields.name, fit_score, fit_tag, breakdown, ceiling
        );

        FitAssessment {
            breakdown,
            role_match,
            industry_match,
            fit_score,
            fit_tag,
            not_relevant,
            ceiling,
            bullets,
            remark,
        }
    }

    /// Distinct role keywords found, doubled as a percentage of the list.
    pub fn role_score(&self, role: RoleCategory, lower_text: &str) -> (f64, bool) {
        if role == RoleCategory::Other {
            return (self.policy.unclear_role_score, true);
        }

        let keywords = role.keywords();
        let matched = keywords.iter().filter(|kw| lower_text.contains(*kw)).count();
        let score = clamp_score((matched as f64 / keywords.len() as f64) * 200.0);

        (score, matched > 0 && score >= self.policy.role_match_threshold)
    }

    /// Total industry keyword hits mapped onto a coarse ladder.
    pub fn industry_score(&self, industry: IndustryCategory, lower_text: &str) -> (f64, bool) {
        if industry == IndustryCategory::Other {
            return (self.policy.unclear_role_score, true);
        }

        let hits: usize = industry
            .keywords()
            .iter()
            .map(|kw| count_occurrences(lower_text, kw))
            .sum();
        let score = match hits {
            0 => 0.0,
            1..=2 => self.policy.industry_low_tier_score,
            3..=4 => 75.0,
            _ => 100.0,
        };

        (score, score >= self.policy.industry_match_threshold)
    }

    /// Percentage of JD keywords present anywhere in the text. 0.0 for an empty list.
    pub fn keyword_score(keywords: &[String], lower_text: &str) -> f64 {
        if keywords.is_empty() {
            return 0.0;
        }
        let hits = keywords.iter().filter(|kw| lower_text.contains(kw.as_str())).count();
        clamp_score(round1(hits as f64 / keywords.len() as f64 * 100.0))
    }

    pub fn experience_score(&self, years: f64) -> f64 {
        clamp_score(years / self.policy.experience_cap_years * 100.0)
    }

    /// Apply the wrong-role and wrong-industry ceilings, else the weighted sum.
    pub fn combine(
        &self,
        breakdown: &ScoreBreakdown,
        role_match: bool,
        industry_match: bool,
    ) -> (f64, Option<ScoreCeiling>) {
        let policy = &self.policy;
        let relevance = breakdown.relevance();

        if !role_match && relevance < policy.wrong_role_semantic_floor {
            let capped = (relevance * 0.2).min(policy.wrong_role_ceiling);
            return (clamp_score(round1(capped)), Some(ScoreCeiling::WrongRole));
        }

        if !industry_match && relevance < policy.wrong_industry_semantic_floor {
            let capped = (breakdown.role * 0.3 + relevance * 0.3).min(policy.wrong_industry_ceiling);
            return (clamp_score(round1(capped)), Some(ScoreCeiling::WrongIndustry));
        }

        let mut components = vec![
            (breakdown.role, policy.role_weight),
            (breakdown.industry, policy.industry_weight),
            (breakdown.keyword, policy.keyword_weight),
            (breakdown.experience, policy.experience_weight),
        ];
        if let Some(semantic) = breakdown.semantic {
            components.push((semantic, policy.semantic_weight));
        }

        // A missing semantic component hands its weight to the others proportionally
        let total_weight: f64 = components.iter().map(|(_, w)| w).sum();
        if total_weight <= 0.0 {
            return (0.0, None);
        }
        let weighted: f64 = components.iter().map(|(s, w)| s * w).sum::<f64>() / total_weight;

        (clamp_score(round1(weighted)), None)
    }

    pub fn tag_for(&self, score: f64) -> FitTag {
        if score >= self.policy.strong_fit_threshold {
            FitTag::StrongFit
        } else if score >= self.policy.partial_fit_threshold {
            FitTag::PartialFit
        } else {
            FitTag::NotAFit
        }
    }

    pub fn is_not_relevant(&self, breakdown: &ScoreBreakdown, role_match: bool) -> bool {
        let relevance = breakdown.relevance();
        relevance < self.policy.not_relevant_semantic_floor
            || (!role_match && relevance < self.policy.wrong_role_semantic_floor)
    }

    fn bullets(
        &self,
        jd: &JdProfile,
        breakdown: &ScoreBreakdown,
        role_match: bool,
        industry_match: bool,
        fields: &CandidateFields,
    ) -> Vec<String> {
        let mut bullets = Vec::new();

        if jd.primary_role == RoleCategory::Other {
            bullets.push("Role unclear in JD".to_string());
        } else if role_match {
            bullets.push(format!("{} role match ({:.0}%)", jd.primary_role, breakdown.role));
        } else {
            bullets.push(format!("No {} role background", jd.primary_role));
        }

        if jd.primary_industry != IndustryCategory::Other {
            if industry_match {
                bullets.push(format!("{} industry exposure", jd.primary_industry));
            } else {
                bullets.push(format!("No {} industry exposure", jd.primary_industry));
            }
        }

        if breakdown.keyword >= 50.0 {
            bullets.push(format!("Strong keyword overlap ({:.1}%)", breakdown.keyword));
        } else if breakdown.keyword > 0.0 {
            bullets.push(format!("Keyword overlap {:.1}%", breakdown.keyword));
        }

        if let Some(semantic) = breakdown.semantic {
            if semantic >= 40.0 {
                bullets.push(format!("High semantic similarity ({:.1}%)", semantic));
            } else if semantic < self.policy.not_relevant_semantic_floor {
                bullets.push("Low semantic similarity".to_string());
            }
        }

        if fields.total_experience_years > 0.0 {
            bullets.push(format!("{} experience", fields.experience));
        }

        bullets.truncate(MAX_BULLETS);
        bullets
    }

    fn remark(tag: FitTag, bullets: &[String]) -> String {
        if bullets.is_empty() {
            format!("{} – limited match", tag)
        } else {
            format!("{} – {}", tag, bullets.join(", "))
        }
    }
}

/// Recruiter-supplied keywords that occur in the resume, in the order given.
pub fn extra_keyword_hits(extra_keywords: &[String], lower_text: &str) -> Vec<String> {
    extra_keywords
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty() && lower_text.contains(kw.as_str()))
        .collect()
}
