//! Candidate field extraction
//!
//! Every extractor here is a pure function of the resume text (and, for name
//! and experience, the uploaded file name). None of them can fail: a missing
//! signal yields [`SENTINEL`] or the field's empty value.

use crate::config::ExtractionConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::taxonomy::{
    CORPORATE_SUFFIX_PATTERN, FILENAME_NOISE, LOCATION_NOISE, MISSPELLINGS, NAME_BOILERPLATE,
    SKILL_VOCABULARY,
};
use crate::processing::text_processor::{is_word_bounded, title_case, SENTINEL};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "PhD")]
    PhD,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Diploma")]
    Diploma,
    #[serde(rename = "-")]
    Unknown,
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EducationLevel::PhD => "PhD",
            EducationLevel::Masters => "Master's",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::Unknown => SENTINEL,
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RedFlag {
    #[serde(rename = "Very short resume")]
    VeryShortResume,
    #[serde(rename = "Frequent job changes")]
    FrequentJobChanges,
    #[serde(rename = "Spelling errors")]
    SpellingErrors,
    #[serde(rename = "No email")]
    NoEmail,
    #[serde(rename = "No phone")]
    NoPhone,
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RedFlag::VeryShortResume => "Very short resume",
            RedFlag::FrequentJobChanges => "Frequent job changes",
            RedFlag::SpellingErrors => "Spelling errors",
            RedFlag::NoEmail => "No email",
            RedFlag::NoPhone => "No phone",
        };
        write!(f, "{}", label)
    }
}

/// Everything the field extractor derives from one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFields {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub location: String,
    pub total_experience_years: f64,
    /// `"3.5 Years"` or the sentinel
    pub experience: String,
    pub education_level: EducationLevel,
    pub notice_period: String,
    pub current_company: String,
    pub employment_gaps: String,
    pub top_skills: Vec<String>,
    pub red_flags: BTreeSet<RedFlag>,
}

impl CandidateFields {
    /// Red flags joined for display, or "None".
    pub fn red_flags_display(&self) -> String {
        if self.red_flags.is_empty() {
            "None".to_string()
        } else {
            self.red_flags
                .iter()
                .map(|flag| flag.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

pub struct FieldExtractor {
    config: ExtractionConfig,
    skill_matcher: AhoCorasick,
    email_regex: Regex,
    phone_regex: Regex,
    location_label_regex: Regex,
    experience_regex: Regex,
    filename_experience_regex: Regex,
    filename_tag_regex: Regex,
    education_regexes: Vec<(EducationLevel, Regex)>,
    immediate_regex: Regex,
    notice_before_regex: Regex,
    notice_after_regex: Regex,
    company_after_regex: Regex,
    company_suffix_line_regex: Regex,
    corporate_suffix_regex: Regex,
    year_regex: Regex,
    word_regex: Regex,
}

impl FieldExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        let skill_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(SKILL_VOCABULARY)
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        let education_regexes = vec![
            (
                EducationLevel::PhD,
                Regex::new(r"\bph\.?\s?d\b|\bdoctorate\b|\bdoctor of philosophy\b")
                    .expect("Invalid PhD regex"),
            ),
            (
                EducationLevel::Masters,
                Regex::new(
                    r"\bmaster(?:'?s)?\s+(?:of|in|degree)\b|\bmba\b|\bm\.?\s?tech\b|\bm\.?\s?sc\b|\bm\.\s?com\b|\bmcom\b|\bmca\b|\bpgdm\b|\bpost\s?-?graduat",
                )
                .expect("Invalid master's regex"),
            ),
            (
                EducationLevel::Bachelors,
                Regex::new(
                    r"\bbachelor(?:'?s)?\b|\bb\.?\s?tech\b|\bb\.\s?e\b|\bb\.?\s?sc\b|\bb\.\s?com\b|\bbcom\b|\bbba\b|\bbca\b|\bb\.\s?a\b|\bgraduat(?:e|ion)\b",
                )
                .expect("Invalid bachelor's regex"),
            ),
            (
                EducationLevel::Diploma,
                Regex::new(r"\bdiploma\b|\bpolytechnic\b|\biti\b").expect("Invalid diploma regex"),
            ),
        ];

        Ok(Self {
            config,
            skill_matcher,
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .expect("Invalid email regex"),
            phone_regex: Regex::new(r"(?:\+91[\s\-]?|\b91[\s\-]?|\b0|\b)\d{5}[\s\-]?\d{5}\b")
                .expect("Invalid phone regex"),
            location_label_regex: Regex::new(
                r"(?im)^\s*(current location|location|city|address)\s*[:\-]\s*(.+)$",
            )
            .expect("Invalid location regex"),
            experience_regex: Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b")
                .expect("Invalid experience regex"),
            filename_experience_regex: Regex::new(r"(?i)\[(\d+)y[_\-](\d+)m\]")
                .expect("Invalid filename experience regex"),
            filename_tag_regex: Regex::new(r"\[[^\]]*\]|\([^)]*\)").expect("Invalid filename tag regex"),
            education_regexes,
            immediate_regex: Regex::new(
                r"\bimmediate(?:ly)?\s+(?:joiner|joining|available|start)|\bavailable\s+immediately\b|\bnotice\s*(?:period)?\s*[:\-]?\s*(?:immediate|nil|none|0\s*days?)\b",
            )
            .expect("Invalid immediate regex"),
            notice_before_regex: Regex::new(r"\b(\d{1,3})\s*(day|week|month)s?\s*(?:of\s+)?notice\b")
                .expect("Invalid notice regex"),
            notice_after_regex: Regex::new(
                r"\bnotice\s*(?:period)?\s*(?:of|is|:|-)?\s*(\d{1,3})\s*(day|week|month)s?\b",
            )
            .expect("Invalid notice regex"),
            company_after_regex: Regex::new(
                r"\b(?:at|with)\s+([A-Z][A-Za-z0-9&.\-]*(?:\s+[A-Z][A-Za-z0-9&.\-]*)*)",
            )
            .expect("Invalid company regex"),
            company_suffix_line_regex: Regex::new(
                r"^([A-Z][\w&.,'\- ]*?\b(?i:ltd|inc|corp|pvt|private|limited)\b(?:\.?\s+(?i:ltd|inc|corp|pvt|private|limited)\b)*\.?)",
            )
            .expect("Invalid company suffix regex"),
            corporate_suffix_regex: Regex::new(CORPORATE_SUFFIX_PATTERN)
                .expect("Invalid corporate suffix regex"),
            year_regex: Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("Invalid year regex"),
            word_regex: Regex::new(r"[a-z]+").expect("Invalid word regex"),
        })
    }

    /// Run every sub-extractor over one resume.
    pub fn extract(&self, text: &str, file_name: Option<&str>) -> CandidateFields {
        let email = self.extract_email(text);
        let mobile = self.extract_mobile(text);
        let experience_years = self.extract_experience_years(text, file_name);

        let fields = CandidateFields {
            name: self.extract_name(text, file_name, &email),
            location: self.extract_location(text),
            total_experience_years: experience_years.unwrap_or(0.0),
            experience: experience_years
                .map(|years| format!("{:.1} Years", years))
                .unwrap_or_else(|| SENTINEL.to_string()),
            education_level: self.extract_education(text),
            notice_period: self.extract_notice_period(text),
            current_company: self.extract_current_company(text),
            employment_gaps: self.detect_employment_gaps(text),
            top_skills: self.extract_top_skills(text),
            red_flags: self.detect_red_flags(text, &email, &mobile),
            email,
            mobile,
        };

        debug!(
            "Extracted fields for {}: name={}, experience={}, education={}",
            file_name.unwrap_or("<text>"),
            fields.name,
            fields.experience,
            fields.education_level
        );
        fields
    }

    /// Name from the header lines, then the file name, then the e-mail local part.
    pub fn extract_name(&self, text: &str, file_name: Option<&str>, email: &str) -> String {
        let header = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.config.name_scan_lines);

        for line in header {
            if let Some(name) = Self::name_from_line(line) {
                return name;
            }
        }

        if let Some(name) = file_name.and_then(|f| self.name_from_file_name(f)) {
            return name;
        }

        Self::name_from_email(email).unwrap_or_else(|| SENTINEL.to_string())
    }

    fn name_from_line(line: &str) -> Option<String> {
        if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let lower = line.to_lowercase();
        let has_boilerplate = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .any(|token| NAME_BOILERPLATE.contains(&token));
        if has_boilerplate {
            return None;
        }

        let words: Vec<&str> = line
            .split_whitespace()
            .map(|w| w.trim_end_matches(|c| c == '.' || c == ','))
            .collect();
        let alphabetic = words
            .iter()
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_alphabetic()));

        if (2..=4).contains(&words.len()) && alphabetic {
            Some(title_case(&words.join(" ")))
        } else {
            None
        }
    }

    fn name_from_file_name(&self, file_name: &str) -> Option<String> {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let untagged = self.filename_tag_regex.replace_all(&stem, " ");

        let tokens: Vec<String> = untagged
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| t.chars().count() > 1)
            .filter(|t| !FILENAME_NOISE.contains(&t.to_lowercase().as_str()))
            .map(str::to_string)
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(title_case(&tokens.join(" ")))
        }
    }

    fn name_from_email(email: &str) -> Option<String> {
        let local = email.split('@').next().filter(|_| email.contains('@'))?;
        let tokens: Vec<&str> = local
            .split(|c: char| matches!(c, '.' | '_' | '-'))
            .map(|t| t.trim_matches(|c: char| c.is_ascii_digit()))
            .filter(|t| t.chars().count() > 1 && t.chars().all(|c| c.is_alphabetic()))
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(title_case(&tokens.join(" ")))
        }
    }

    pub fn extract_email(&self, text: &str) -> String {
        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| SENTINEL.to_string())
    }

    /// Prefer numbers near a contact/phone/mobile line, then anywhere in the text.
    pub fn extract_mobile(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();

        for (i, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();
            if lower.contains("contact") || lower.contains("phone") || lower.contains("mobile") {
                let start = i.saturating_sub(1);
                let end = (i + 3).min(lines.len());
                let window = lines[start..end].join("\n");
                if let Some(number) = self.first_mobile(&window) {
                    return number;
                }
            }
        }

        self.first_mobile(text).unwrap_or_else(|| SENTINEL.to_string())
    }

    fn first_mobile(&self, text: &str) -> Option<String> {
        self.phone_regex.find_iter(text).find_map(|m| {
            let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
            let valid = match digits.len() {
                10 => true,
                11 => digits.starts_with('0'),
                12 => digits.starts_with("91"),
                _ => false,
            };
            valid.then(|| digits[digits.len() - 10..].to_string())
        })
    }

    pub fn extract_location(&self, text: &str) -> String {
        for cap in self.location_label_regex.captures_iter(text) {
            let label = cap[1].to_lowercase();
            let segments: Vec<&str> = cap[2]
                .split(',')
                .map(str::trim)
                .filter(|s| {
                    !s.is_empty()
                        && !s.chars().any(|c| c.is_ascii_digit())
                        && !s.eq_ignore_ascii_case("india")
                })
                .collect();
            let value = if label == "address" {
                segments.last()
            } else {
                segments.first()
            };
            if let Some(location) = value.and_then(|v| Self::clean_location(v)) {
                return location;
            }
        }

        for line in text.lines().take(15) {
            let lower = line.to_lowercase();
            if !lower.contains("india") || !line.contains(',') || line.contains('@') {
                continue;
            }
            let before_comma = line.split(',').next().unwrap_or_default();
            let word: String = before_comma
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .chars()
                .filter(|c| c.is_alphabetic())
                .collect();
            if let Some(location) = Self::clean_location(&word) {
                return location;
            }
        }

        SENTINEL.to_string()
    }

    fn clean_location(value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() || value.chars().count() > 40 || !value.chars().any(|c| c.is_alphabetic()) {
            return None;
        }
        let lower = value.to_lowercase();
        if LOCATION_NOISE.iter().any(|noise| lower.contains(noise)) {
            return None;
        }
        Some(title_case(value))
    }

    /// Maximum of the "N years" phrases and the `[Yy_Mm]` file name tag.
    pub fn extract_experience_years(&self, text: &str, file_name: Option<&str>) -> Option<f64> {
        let from_text = self
            .experience_regex
            .captures_iter(text)
            .filter_map(|cap| cap[1].parse::<f64>().ok())
            .filter(|years| *years > 0.0 && *years < 50.0);

        let from_file = file_name
            .and_then(|f| self.filename_experience_regex.captures(f))
            .and_then(|cap| {
                let years = cap[1].parse::<f64>().ok()?;
                let months = cap[2].parse::<f64>().ok()?;
                Some(years + months / 12.0)
            })
            .filter(|years| *years > 0.0 && *years < 50.0);

        from_text.chain(from_file).fold(None, |best: Option<f64>, years| {
            Some(best.map_or(years, |b| b.max(years)))
        })
    }

    pub fn extract_education(&self, text: &str) -> EducationLevel {
        let lower = text.to_lowercase();
        self.education_regexes
            .iter()
            .find(|(_, regex)| regex.is_match(&lower))
            .map(|(level, _)| *level)
            .unwrap_or(EducationLevel::Unknown)
    }

    pub fn extract_notice_period(&self, text: &str) -> String {
        let lower = text.to_lowercase();

        if self.immediate_regex.is_match(&lower) {
            return "Immediate".to_string();
        }

        let explicit = self
            .notice_before_regex
            .captures(&lower)
            .or_else(|| self.notice_after_regex.captures(&lower));
        if let Some(cap) = explicit {
            if let Ok(amount) = cap[1].parse::<u32>() {
                let unit = &cap[2];
                let plural = if amount == 1 { "" } else { "s" };
                return format!("{} {}{}", amount, unit, plural);
            }
        }

        let lines: Vec<&str> = lower.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("notice") {
                continue;
            }
            let context = lines[i..(i + 2).min(lines.len())].join(" ");
            if let Some(bucket) = Self::notice_bucket(&context) {
                return bucket.to_string();
            }
        }

        SENTINEL.to_string()
    }

    fn notice_bucket(context: &str) -> Option<&'static str> {
        const BUCKETS: [(&[&str], &str); 4] = [
            (&["2 weeks", "two weeks", "fortnight"], "15 days"),
            (&["1 month", "one month"], "30 days"),
            (&["2 months", "two months"], "60 days"),
            (&["3 months", "three months"], "90 days"),
        ];
        BUCKETS
            .iter()
            .find(|(phrases, _)| phrases.iter().any(|p| context.contains(p)))
            .map(|(_, bucket)| *bucket)
    }

    pub fn extract_current_company(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();

        for (i, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();
            if !(lower.contains("current") || lower.contains("present") || lower.contains("working at")) {
                continue;
            }
            for candidate in &lines[i..(i + 3).min(lines.len())] {
                if let Some(cap) = self.company_after_regex.captures(candidate) {
                    let company = cap[1].trim_end_matches(|c| c == '.' || c == '-').trim();
                    if !company.is_empty() {
                        return self.truncate_company(company);
                    }
                }
            }
        }

        let heading = lines.iter().position(|line| {
            let lower = line.trim().to_lowercase();
            lower.chars().count() <= 40
                && (lower.contains("experience") || lower.contains("work history") || lower.contains("employment"))
        });
        if let Some(start) = heading {
            for line in &lines[start + 1..] {
                if let Some(cap) = self.company_suffix_line_regex.captures(line.trim()) {
                    return self.truncate_company(cap[1].trim());
                }
            }
        }

        SENTINEL.to_string()
    }

    fn truncate_company(&self, company: &str) -> String {
        company.chars().take(self.config.company_max_chars).collect::<String>().trim().to_string()
    }

    pub fn detect_employment_gaps(&self, text: &str) -> String {
        let mut years: Vec<u32> = self
            .year_regex
            .captures_iter(text)
            .filter_map(|cap| cap[1].parse().ok())
            .collect();

        if years.len() < 2 {
            return "unable to detect".to_string();
        }
        years.sort_unstable();

        let gaps: Vec<String> = years
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|diff| *diff > 2)
            .map(|diff| format!("{}yr gap", diff))
            .collect();

        if gaps.is_empty() {
            "no major gaps".to_string()
        } else {
            gaps.join(", ")
        }
    }

    /// Most frequent vocabulary skills, ties broken by first appearance.
    pub fn extract_top_skills(&self, text: &str) -> Vec<String> {
        // (pattern, count, first position)
        let mut counts: Vec<(usize, usize, usize)> = Vec::new();

        for mat in self.skill_matcher.find_iter(text) {
            if !is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let pattern = mat.pattern().as_usize();
            match counts.iter_mut().find(|(p, _, _)| *p == pattern) {
                Some(entry) => entry.1 += 1,
                None => counts.push((pattern, 1, mat.start())),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        counts
            .into_iter()
            .take(self.config.top_skills)
            .map(|(pattern, _, _)| title_case(SKILL_VOCABULARY[pattern]))
            .collect()
    }

    pub fn detect_red_flags(&self, text: &str, email: &str, mobile: &str) -> BTreeSet<RedFlag> {
        let mut flags = BTreeSet::new();

        if text.chars().count() < self.config.short_resume_chars {
            flags.insert(RedFlag::VeryShortResume);
        }
        if self.corporate_suffix_regex.find_iter(text).count() > self.config.max_company_mentions {
            flags.insert(RedFlag::FrequentJobChanges);
        }

        let lower = text.to_lowercase();
        if self.word_regex.find_iter(&lower).any(|w| MISSPELLINGS.contains(&w.as_str())) {
            flags.insert(RedFlag::SpellingErrors);
        }
        if email == SENTINEL {
            flags.insert(RedFlag::NoEmail);
        }
        if mobile == SENTINEL {
            flags.insert(RedFlag::NoPhone);
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_basic_resume_fields() {
        let text = "John Smith\njohn.smith@example.com\n9876543210\n3.5 Years experience\nBachelor's in Commerce";
        let fields = extractor().extract(text, None);

        assert_eq!(fields.name, "John Smith");
        assert_eq!(fields.email, "john.smith@example.com");
        assert_eq!(fields.mobile, "9876543210");
        assert_eq!(fields.experience, "3.5 Years");
        assert_eq!(fields.education_level, EducationLevel::Bachelors);
    }

    #[test]
    fn test_empty_text_yields_sentinels() {
        let fields = extractor().extract("", None);

        assert_eq!(fields.name, SENTINEL);
        assert_eq!(fields.email, SENTINEL);
        assert_eq!(fields.mobile, SENTINEL);
        assert_eq!(fields.location, SENTINEL);
        assert_eq!(fields.experience, SENTINEL);
        assert_eq!(fields.total_experience_years, 0.0);
        assert_eq!(fields.education_level, EducationLevel::Unknown);
        assert_eq!(fields.notice_period, SENTINEL);
        assert_eq!(fields.current_company, SENTINEL);
        assert_eq!(fields.employment_gaps, "unable to detect");
        assert!(fields.top_skills.is_empty());
    }

    #[test]
    fn test_name_skips_boilerplate_and_falls_back() {
        let fx = extractor();
        assert_eq!(fx.extract_name("RESUME\nPriya  sharma\n", None, SENTINEL), "Priya Sharma");
        assert_eq!(
            fx.extract_name("Objective: growth", Some("Naukri_Rahul_Verma[3y_6m].pdf"), SENTINEL),
            "Rahul Verma"
        );
        assert_eq!(
            fx.extract_name("", Some("12345.pdf"), "anita.desai92@mail.com"),
            "Anita Desai"
        );
    }

    #[test]
    fn test_mobile_prefers_contact_window() {
        let fx = extractor();
        let text = "Ref id 1234567890\nSummary\nContact:\nPhone: +91 98765 43210";
        assert_eq!(fx.extract_mobile(text), "9876543210");
        assert_eq!(fx.extract_mobile("call 2015 - 2019"), SENTINEL);
    }

    #[test]
    fn test_mobile_followed_by_other_digits() {
        let fx = extractor();
        assert_eq!(fx.extract_mobile("Mobile: 9876543210 9123456789"), "9876543210");
        assert_eq!(fx.extract_mobile("Phone: 9876543210 5 years in sales"), "9876543210");
        assert_eq!(fx.extract_mobile("9876543210 2019"), "9876543210");
        assert_eq!(fx.extract_mobile("Cell 919845012345"), "9845012345");
        assert_eq!(fx.extract_mobile("Tel 09845012345"), "9845012345");
        assert_eq!(fx.extract_mobile("Order 123456789012345"), SENTINEL);
    }

    #[test]
    fn test_location() {
        let fx = extractor();
        assert_eq!(fx.extract_location("Location: pune, Maharashtra"), "Pune");
        assert_eq!(fx.extract_location("Jane\n12 MG Road Bengaluru, Karnataka, India"), "Bengaluru");
        assert_eq!(fx.extract_location("Location: LinkedIn"), SENTINEL);
    }

    #[test]
    fn test_experience_takes_maximum_signal() {
        let fx = extractor();
        assert_eq!(fx.extract_experience_years("2 years in sales, 5+ years overall", None), Some(5.0));
        assert_eq!(fx.extract_experience_years("1 year", Some("Jane [4y_6m].pdf")), Some(4.5));
        assert_eq!(fx.extract_experience_years("75 years old company", None), None);
        assert_eq!(fx.extract_experience_years("3 years", Some("Old [99y_0m].pdf")), Some(3.0));
        assert_eq!(fx.extract_experience_years("", Some("Fresher [0y_0m].pdf")), None);
    }

    #[test]
    fn test_education_priority() {
        let fx = extractor();
        assert_eq!(fx.extract_education("B.Tech 2012, MBA 2015"), EducationLevel::Masters);
        assert_eq!(fx.extract_education("Ph.D in Chemistry"), EducationLevel::PhD);
        assert_eq!(fx.extract_education("Diploma in Mechanical"), EducationLevel::Diploma);
        assert_eq!(fx.extract_education("Scrum master certified"), EducationLevel::Unknown);
    }

    #[test]
    fn test_notice_period() {
        let fx = extractor();
        assert_eq!(fx.extract_notice_period("Immediate joiner"), "Immediate");
        assert_eq!(fx.extract_notice_period("Notice period: 45 days"), "45 days");
        assert_eq!(fx.extract_notice_period("1 month notice"), "1 month");
        assert_eq!(fx.extract_notice_period("Notice Period\nOne month"), "30 days");
        assert_eq!(fx.extract_notice_period("nothing here"), SENTINEL);
    }

    #[test]
    fn test_current_company() {
        let fx = extractor();
        assert_eq!(
            fx.extract_current_company("Currently working at Acme Chemicals Pvt Ltd since 2019"),
            "Acme Chemicals Pvt Ltd"
        );
        assert_eq!(
            fx.extract_current_company("Work Experience\nSunrise Polymers Private Limited, Vapi\n2018 - now"),
            "Sunrise Polymers Private Limited"
        );
    }

    #[test]
    fn test_employment_gaps() {
        let fx = extractor();
        assert_eq!(fx.detect_employment_gaps("2010 - 2012, 2016 - 2020"), "4yr gap, 4yr gap");
        assert_eq!(fx.detect_employment_gaps("2018 2019 2020"), "no major gaps");
        assert_eq!(fx.detect_employment_gaps("since 2018"), "unable to detect");
    }

    #[test]
    fn test_top_skills_ordered_by_frequency() {
        let fx = extractor();
        let skills = fx.extract_top_skills("Excel, SAP, sap reports, Python and JavaScript. Clean lean sap.");
        assert_eq!(skills[0], "Sap");
        assert_eq!(skills[1], "Excel");
        assert!(skills.contains(&"Javascript".to_string()));
        assert!(!skills.contains(&"Java".to_string()));
        assert_eq!(skills.iter().filter(|s| *s == "Lean").count(), 1);
    }

    #[test]
    fn test_red_flags_for_short_anonymous_resume() {
        let fx = extractor();
        let text = "a".repeat(200);
        let fields = fx.extract(&text, None);

        assert!(fields.red_flags.contains(&RedFlag::VeryShortResume));
        assert!(fields.red_flags.contains(&RedFlag::NoEmail));
        assert!(fields.red_flags.contains(&RedFlag::NoPhone));
        assert!(!fields.red_flags.contains(&RedFlag::SpellingErrors));
    }

    #[test]
    fn test_spelling_and_job_hopping_flags() {
        let fx = extractor();
        let text = "A Ltd, B Ltd, C Ltd, D Ltd, E Inc, F Corp, G Pvt. Managment of teams.";
        let flags = fx.detect_red_flags(text, "x@y.com", "9876543210");
        assert!(flags.contains(&RedFlag::FrequentJobChanges));
        assert!(flags.contains(&RedFlag::SpellingErrors));
        assert!(!flags.contains(&RedFlag::NoEmail));
    }

    #[test]
    fn test_private_limited_counts_once_per_employer() {
        let fx = extractor();
        let text = "Alpha Resins Private Limited
Beta Polymers Private Limited
                    Gamma Dyes Private Limited
Delta Chem Private Limited";
        let flags = fx.detect_red_flags(text, "x@y.com", "9876543210");
        assert!(!flags.contains(&RedFlag::FrequentJobChanges));
        assert!(flags.contains(&RedFlag::VeryShortResume));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let fx = extractor();
        let text = "Priya Sharma\npriya@mail.com\nSales Manager at Acme Ltd\n2015 - 2023\nMBA";
        assert_eq!(fx.extract(text, Some("priya.pdf")), fx.extract(text, Some("priya.pdf")));
    }
}
