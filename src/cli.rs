//! CLI interface for the resume screener

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Batch resume screening against a job description")]
#[command(long_about = "Extract candidate facts from PDF, DOCX and text resumes and rank them against a job description by role, industry, keyword and semantic fit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and rank resumes against a job description
    Screen {
        /// Path to the job description (PDF, DOCX, TXT)
        #[arg(short, long)]
        jd: PathBuf,

        /// Resume files or directories containing them
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Role title used in the outreach message
        #[arg(long)]
        role: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Extra comma-separated keywords to look for in every resume
        #[arg(short, long)]
        keywords: Option<String>,

        /// Scoring preset: canonical, lenient. Values edited in the config file still apply
        #[arg(short, long)]
        profile: Option<String>,

        /// Skip TF-IDF similarity and score on keywords only
        #[arg(long)]
        no_semantic: bool,

        /// Show every extracted field and the score breakdown
        #[arg(short, long)]
        detailed: bool,
    },

    /// Extract candidate fields without a job description
    Extract {
        /// Resume files or directories containing them
        #[arg(short, long, num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,

        /// Role title used in the outreach message
        #[arg(long)]
        role: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every extracted field
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the keywords, role and industry derived from a job description
    Jd {
        /// Path to the job description
        #[arg(short, long)]
        jd: PathBuf,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the outreach message for a candidate
    Message {
        /// Candidate name
        #[arg(short, long)]
        name: String,

        /// Role title
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Split a comma-separated keyword list, dropping blanks
pub fn parse_keywords(list: &str) -> Vec<String> {
    list.split(',')
        .map(|kw| kw.trim().to_string())
        .filter(|kw| !kw.is_empty())
        .collect()
}
