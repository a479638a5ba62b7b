//! Resume screener: batch resume screening against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::document::{FileFailure, RawDocument};
use resume_screener::input::manager::{collect_resume_paths, InputManager};
use resume_screener::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::analyzer::{ScreeningEngine, ScreeningOptions};
use resume_screener::processing::jd_analyzer::JdAnalyzer;
use resume_screener::processing::outreach::MessageBuilder;
use resume_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Screen {
            jd,
            resumes,
            role,
            output,
            save,
            keywords,
            profile,
            no_semantic,
            detailed,
        } => {
            if let Some(name) = profile {
                config.scoring = config.scoring.rebased_on(&name)?;
            }
            if no_semantic {
                config.scoring.semantic_enabled = false;
            }
            let format = resolve_format(output.as_deref(), &config)?;
            let options = ScreeningOptions {
                role_title: role,
                extra_keywords: keywords.as_deref().map(cli::parse_keywords).unwrap_or_default(),
            };

            let manager = InputManager::new();
            let jd_document = manager.load_document(&jd).await?;
            let (documents, load_failures) = load_resumes(&manager, &resumes).await?;

            info!("Screening {} resumes against {}", documents.len(), jd.display());
            let progress = progress_bar(documents.len());
            let strong_threshold = config.scoring.strong_fit_threshold;
            let engine_config = config.clone();
            let bar = progress.clone();

            let mut outcome = tokio::task::spawn_blocking(move || {
                let engine = ScreeningEngine::new(&engine_config)?;
                engine.screen(&jd_document, &documents, &options, |name| {
                    bar.set_message(name.to_string());
                    bar.inc(1);
                })
            })
            .await
            .map_err(|e| ScreenerError::Processing(format!("Screening task failed: {}", e)))??;
            progress.finish_and_clear();

            outcome.failures.extend(load_failures);
            let report = ScreeningReport::from_outcome(outcome, strong_threshold);
            let stem = jd.to_string_lossy().to_string();
            emit_report(&report, &config, format, detailed, save.as_deref(), &stem)?;
        }

        Commands::Extract {
            resumes,
            role,
            output,
            save,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let options = ScreeningOptions {
                role_title: role,
                extra_keywords: Vec::new(),
            };

            let manager = InputManager::new();
            let (documents, load_failures) = load_resumes(&manager, &resumes).await?;

            let progress = progress_bar(documents.len());
            let strong_threshold = config.scoring.strong_fit_threshold;
            let engine_config = config.clone();
            let bar = progress.clone();

            let mut outcome = tokio::task::spawn_blocking(move || {
                let engine = ScreeningEngine::new(&engine_config)?;
                engine.extract_only(&documents, &options, |name| {
                    bar.set_message(name.to_string());
                    bar.inc(1);
                })
            })
            .await
            .map_err(|e| ScreenerError::Processing(format!("Extraction task failed: {}", e)))??;
            progress.finish_and_clear();

            outcome.failures.extend(load_failures);
            let report = ScreeningReport::from_outcome(outcome, strong_threshold);
            emit_report(&report, &config, format, detailed, save.as_deref(), "candidates")?;
        }

        Commands::Jd { jd, json } => {
            let extracted = InputManager::new().extract_text(&jd).await?;
            let profile = JdAnalyzer::new(config.jd.clone()).analyze(extracted.text())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("Job description: {}", jd.display());
                println!("Primary role: {}", profile.primary_role);
                println!("Primary industry: {}", profile.primary_industry);
                println!("\nKeywords:");
                for (i, keyword) in profile.keywords.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, keyword);
                }
                println!("\nRole hits: {:?}", profile.role_hits);
                println!("Industry hits: {:?}", profile.industry_hits);
            }
        }

        Commands::Message { name, role } => {
            let builder = MessageBuilder::new(config.outreach.clone());
            println!("{}", builder.build(&name, role.as_deref()));
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset: {}", path.display());
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

async fn load_resumes(
    manager: &InputManager,
    inputs: &[PathBuf],
) -> Result<(Vec<RawDocument>, Vec<FileFailure>)> {
    let paths = collect_resume_paths(inputs)?;
    if paths.is_empty() {
        return Err(ScreenerError::NoCandidates);
    }

    let (documents, failures) = manager.load_batch(&paths).await;
    if !failures.is_empty() {
        warn!("{} of {} files could not be read", failures.len(), paths.len());
    }
    Ok((documents, failures))
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    bar
}

fn emit_report(
    report: &ScreeningReport,
    config: &Config,
    format: OutputFormat,
    detailed: bool,
    save: Option<&Path>,
    report_name: &str,
) -> Result<()> {
    let generator = ReportGenerator::with_options(
        config.output.color_output && save.is_none(),
        detailed || config.output.detailed,
        true,
        true,
    );
    let content = generator.generate_report(report, &format)?;

    match save {
        Some(path) => {
            // A directory gets a timestamped file named after the input
            let path = if path.is_dir() {
                path.join(suggest_filename(&format, report_name, true))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(&content, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
