//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScreeningReport;
use crate::processing::analyzer::CandidateRecord;
use crate::processing::jd_analyzer::JdProfile;
use crate::processing::scorer::FitTag;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal table, optionally with the per-candidate breakdown
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Green, amber and red follow the spreadsheet row colouring.
    fn format_tag(&self, tag: FitTag) -> String {
        let color = match tag {
            FitTag::StrongFit => Color::Green,
            FitTag::PartialFit => Color::Yellow,
            FitTag::NotAFit => Color::Red,
            FitTag::Unscored => Color::White,
        };
        if self.use_colors {
            format!("[{}]", tag.to_string().color(color).bold())
        } else {
            format!("[{}]", tag)
        }
    }

    fn format_jd_profile(&self, profile: &JdProfile) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Role: {} | Industry: {}\n",
            self.colorize(profile.primary_role.as_str(), Color::Cyan),
            self.colorize(profile.primary_industry.as_str(), Color::Cyan)
        ));
        output.push_str(&format!("Keywords ({}): {}\n", profile.keywords.len(), profile.keywords.join(", ")));
        output
    }

    fn format_candidate(&self, rank: usize, candidate: &CandidateRecord) -> String {
        let fields = &candidate.fields;
        let mut output = format!(
            "{:>3}. {} {} {}\n",
            rank,
            self.colorize(&fields.name, Color::BrightWhite),
            self.format_tag(candidate.fit_tag),
            if candidate.fit_tag == FitTag::Unscored {
                String::new()
            } else {
                format!("{:.1}%", candidate.fit_score)
            }
        );
        output.push_str(&format!(
            "     {} | {} | {} | Notice: {}\n",
            fields.email, fields.mobile, fields.experience, fields.notice_period
        ));

        if self.detailed {
            output.push_str(&format!(
                "     Location: {} | Education: {} | Company: {}\n",
                fields.location, fields.education_level, fields.current_company
            ));
            output.push_str(&format!("     Gaps: {}\n", fields.employment_gaps));
            if !fields.top_skills.is_empty() {
                output.push_str(&format!("     Skills: {}\n", fields.top_skills.join(", ")));
            }
            output.push_str(&format!("     Red flags: {}\n", fields.red_flags_display()));
            if !candidate.score_breakdown.is_empty() {
                let breakdown: Vec<String> = candidate
                    .score_breakdown
                    .iter()
                    .map(|(name, value)| format!("{} {:.1}", name, value))
                    .collect();
                output.push_str(&format!("     Breakdown: {}\n", breakdown.join(", ")));
            }
            if !candidate.extra_keyword_hits.is_empty() {
                output.push_str(&format!("     Keyword hits: {}\n", candidate.extra_keyword_hits.join(", ")));
            }
        }

        let remark_color = if candidate.not_relevant { Color::BrightBlack } else { Color::Cyan };
        output.push_str(&format!("     {}\n", self.colorize(&candidate.remark, remark_color)));
        if candidate.not_relevant {
            output.push_str(&format!("     {}\n", self.colorize("(not relevant)", Color::BrightBlack)));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        if let Some(profile) = &report.jd_profile {
            output.push_str(&self.format_header("Job Description", 2));
            output.push_str(&self.format_jd_profile(profile));
        }

        let summary = &report.summary;
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!("Candidates: {}\n", summary.total_candidates));
        if report.is_scored() {
            output.push_str(&format!(
                "Strong matches: {}\n",
                self.colorize(&summary.strong_matches.to_string(), Color::Green)
            ));
            output.push_str(&format!("Not relevant: {}\n", summary.not_relevant));
            output.push_str(&format!("Average score: {:.1}%\n", summary.average_score));
        }
        if summary.failed_files > 0 {
            output.push_str(&format!(
                "Failed files: {}\n",
                self.colorize(&summary.failed_files.to_string(), Color::Red)
            ));
        }

        output.push_str(&self.format_header("Candidates", 2));
        for (i, candidate) in report.candidates.iter().enumerate() {
            output.push_str(&self.format_candidate(i + 1, candidate));
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Skipped Files", 3));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    self.colorize("✗", Color::Red),
                    failure.file_name,
                    failure.reason
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::from("# Resume Screening Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} · screener v{} · taxonomy v{}*\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
                report.metadata.screener_version,
                report.metadata.taxonomy_version
            ));
        }

        if let Some(profile) = &report.jd_profile {
            output.push_str("## Job Description\n\n");
            output.push_str(&format!("- **Role:** {}\n", profile.primary_role));
            output.push_str(&format!("- **Industry:** {}\n", profile.primary_industry));
            output.push_str(&format!("- **Keywords:** {}\n\n", profile.keywords.join(", ")));
        }

        let summary = &report.summary;
        output.push_str("## Summary\n\n");
        output.push_str("| Candidates | Strong matches | Not relevant | Average score | Failed files |\n");
        output.push_str("|---|---|---|---|---|\n");
        output.push_str(&format!(
            "| {} | {} | {} | {:.1} | {} |\n\n",
            summary.total_candidates,
            summary.strong_matches,
            summary.not_relevant,
            summary.average_score,
            summary.failed_files
        ));

        output.push_str("## Candidates\n\n");
        output.push_str(
            "| # | Name | Score | Tag | Experience | Education | Notice | Email | Mobile | Location | Company | Skills | Red flags | Remark |\n",
        );
        output.push_str("|---|---|---|---|---|---|---|---|---|---|---|---|---|---|\n");
        for (i, c) in report.candidates.iter().enumerate() {
            let f = &c.fields;
            let cells = [
                (i + 1).to_string(),
                f.name.clone(),
                format!("{:.1}", c.fit_score),
                c.fit_tag.to_string(),
                f.experience.clone(),
                f.education_level.to_string(),
                f.notice_period.clone(),
                f.email.clone(),
                f.mobile.clone(),
                f.location.clone(),
                f.current_company.clone(),
                f.top_skills.join(", "),
                f.red_flags_display(),
                c.remark.clone(),
            ];
            let row: Vec<String> = cells.iter().map(|cell| Self::escape_cell(cell)).collect();
            output.push_str(&format!("| {} |\n", row.join(" | ")));
        }

        if !report.failures.is_empty() {
            output.push_str("\n## Skipped Files\n\n");
            for failure in &report.failures {
                output.push_str(&format!("- `{}`: {}\n", failure.file_name, failure.reason));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, jd_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(jd_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::document::{FileFailure, RawDocument};
    use crate::processing::analyzer::{ScreeningEngine, ScreeningOptions};
    use tempfile::TempDir;

    fn sample_report() -> ScreeningReport {
        let engine = ScreeningEngine::new(&Config::default()).unwrap();
        let jd = RawDocument::from_text("jd.txt", "Export sales manager for our chemical business");
        let resumes = vec![RawDocument::from_text(
            "meera.txt",
            "Meera Iyer\nmeera@mail.com\nExport sales | chemical | 7 years",
        )];
        let mut outcome = engine.screen(&jd, &resumes, &ScreeningOptions::default(), |_| {}).unwrap();
        outcome.failures.push(FileFailure::new("bad.pdf", "not a readable PDF"));
        ScreeningReport::from_outcome(outcome, 60.0)
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("RESUME SCREENING REPORT"));
        assert!(output.contains("Meera Iyer"));
        assert!(output.contains("Role: sales"));
        assert!(output.contains("bad.pdf: not a readable PDF"));
        assert!(output.contains("Breakdown:"));
    }

    #[test]
    fn test_json_round_trips_fields() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["candidates"][0]["name"], "Meera Iyer");
        assert_eq!(value["summary"]["failed_files"], 1);
        assert!(value["candidates"][0]["score_breakdown"]["role"].is_number());
    }

    #[test]
    fn test_markdown_table() {
        let report = sample_report();
        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();

        assert!(output.contains("| # | Name | Score |"));
        assert!(output.contains("| Meera Iyer |"));
        assert!(output.contains("- `bad.pdf`"));
        assert_eq!(MarkdownFormatter::new(false).supports_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_save_and_suggest_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.md");
        save_report_to_file("# hi", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi");

        assert_eq!(suggest_filename(&OutputFormat::Json, "jd/export.pdf", false), "export_screening.json");
    }
}
