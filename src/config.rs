//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringPolicy,
    pub extraction: ExtractionConfig,
    pub jd: JdConfig,
    pub processing: ProcessingConfig,
    pub outreach: OutreachConfig,
    pub output: OutputConfig,
}

/// Every weight, threshold and cap the fit scorer uses.
///
/// Alternate scoring profiles are just different constant sets; see
/// [`ScoringPolicy::canonical`] and [`ScoringPolicy::lenient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub role_weight: f64,
    pub industry_weight: f64,
    pub keyword_weight: f64,
    pub semantic_weight: f64,
    pub experience_weight: f64,
    pub experience_cap_years: f64,
    pub role_match_threshold: f64,
    pub industry_match_threshold: f64,
    /// Industry score for one or two taxonomy hits
    pub industry_low_tier_score: f64,
    /// Score given to role/industry when the JD category is "other"
    pub unclear_role_score: f64,
    pub wrong_role_semantic_floor: f64,
    pub wrong_role_ceiling: f64,
    pub wrong_industry_semantic_floor: f64,
    pub wrong_industry_ceiling: f64,
    pub not_relevant_semantic_floor: f64,
    pub strong_fit_threshold: f64,
    pub partial_fit_threshold: f64,
    pub semantic_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub name_scan_lines: usize,
    pub top_skills: usize,
    pub short_resume_chars: usize,
    pub max_company_mentions: usize,
    pub company_max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JdConfig {
    pub top_keywords: usize,
    pub min_word_len: usize,
    pub section_boost: usize,
    pub section_window_chars: usize,
    pub phrase_extraction: bool,
    pub rnd_override_hits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Worker threads for extraction and scoring, 0 means one per core
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachConfig {
    pub recruiter_name: String,
    pub agency_name: String,
    pub default_role_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl ScoringPolicy {
    /// The final scoring profile: five weighted factors, 10-year experience cap.
    pub fn canonical() -> Self {
        Self {
            role_weight: 0.25,
            industry_weight: 0.20,
            keyword_weight: 0.20,
            semantic_weight: 0.25,
            experience_weight: 0.10,
            experience_cap_years: 10.0,
            role_match_threshold: 30.0,
            industry_match_threshold: 30.0,
            industry_low_tier_score: 40.0,
            unclear_role_score: 50.0,
            wrong_role_semantic_floor: 25.0,
            wrong_role_ceiling: 15.0,
            wrong_industry_semantic_floor: 30.0,
            wrong_industry_ceiling: 25.0,
            not_relevant_semantic_floor: 15.0,
            strong_fit_threshold: 60.0,
            partial_fit_threshold: 35.0,
            semantic_enabled: true,
        }
    }

    /// Same weights with a 15-year experience cap and a softer industry ladder.
    pub fn lenient() -> Self {
        Self {
            experience_cap_years: 15.0,
            industry_low_tier_score: 50.0,
            ..Self::canonical()
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "canonical" | "default" => Some(Self::canonical()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }

    /// Switch to the named preset, keeping every value in `self` that differs
    /// from the canonical defaults. Values left at their defaults follow the preset.
    pub fn rebased_on(&self, name: &str) -> Result<Self> {
        let preset = Self::by_name(name)
            .ok_or_else(|| ScreenerError::InvalidInput(format!("Unknown scoring profile: {}", name)))?;

        let current = policy_table(self)?;
        let canonical = policy_table(&Self::canonical())?;
        let mut merged = policy_table(&preset)?;
        for (key, value) in current {
            if canonical.get(&key) != Some(&value) {
                merged.insert(key, value);
            }
        }

        let policy: Self = toml::Value::Table(merged)
            .try_into()
            .map_err(|e| ScreenerError::Configuration(format!("Failed to apply scoring profile: {}", e)))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.role_weight,
            self.industry_weight,
            self.keyword_weight,
            self.semantic_weight,
            self.experience_weight,
        ];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(ScreenerError::Configuration(
                "Scoring weights must not be negative".to_string(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ScreenerError::Configuration(
                "At least one scoring weight must be positive".to_string(),
            ));
        }
        if self.experience_cap_years <= 0.0 {
            return Err(ScreenerError::Configuration(
                "experience_cap_years must be positive".to_string(),
            ));
        }
        if self.partial_fit_threshold > self.strong_fit_threshold {
            return Err(ScreenerError::Configuration(
                "partial_fit_threshold must not exceed strong_fit_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

fn policy_table(policy: &ScoringPolicy) -> Result<toml::Table> {
    match toml::Value::try_from(policy) {
        Ok(toml::Value::Table(table)) => Ok(table),
        Ok(_) => Err(ScreenerError::Configuration("Scoring policy is not a table".to_string())),
        Err(e) => Err(ScreenerError::Configuration(format!("Failed to serialize scoring policy: {}", e))),
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 8,
            top_skills: 5,
            short_resume_chars: 500,
            max_company_mentions: 6,
            company_max_chars: 50,
        }
    }
}

impl Default for JdConfig {
    fn default() -> Self {
        Self {
            top_keywords: 30,
            min_word_len: 3,
            section_boost: 3,
            section_window_chars: 500,
            phrase_extraction: true,
            rnd_override_hits: 3,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
        }
    }
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            recruiter_name: "Joy".to_string(),
            agency_name: "Seven Hiring".to_string(),
            default_role_title: "the open position".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.scoring.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }
}
