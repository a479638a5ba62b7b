//! Integration tests for the resume screener

use resume_screener::config::Config;
use resume_screener::input::document::RawDocument;
use resume_screener::input::manager::{collect_resume_paths, InputManager};
use resume_screener::output::formatter::ReportGenerator;
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::analyzer::{ScreeningEngine, ScreeningOptions};
use resume_screener::processing::fields::{EducationLevel, FieldExtractor, RedFlag};
use resume_screener::processing::scorer::FitTag;
use resume_screener::processing::taxonomy::{IndustryCategory, RoleCategory};
use resume_screener::processing::text_processor::SENTINEL;
use resume_screener::ScreenerError;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document><w:body>{}</w:body></w:document>",
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("word/document.xml", FileOptions::default()).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn fixture(name: &str) -> PathBuf {
    Path::new("tests/fixtures").join(name)
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::new();
    let extracted = manager.extract_text(&fixture("priya_sharma.txt")).await.unwrap();

    assert_eq!(extracted.file_name(), "priya_sharma.txt");
    assert!(extracted.text().contains("Priya Sharma"));
    assert!(extracted.text().contains("Gujarat Resins"));
    assert!(!extracted.text().contains('\r'));
}

#[tokio::test]
async fn test_load_batch_records_missing_files() {
    let manager = InputManager::new();
    let paths = vec![fixture("arjun_dev.txt"), fixture("gone.docx"), fixture("priya_sharma.txt")];

    let (documents, failures) = manager.load_batch(&paths).await;
    let names: Vec<&str> = documents.iter().map(|d| d.file_name.as_str()).collect();
    assert_eq!(names, vec!["arjun_dev.txt", "priya_sharma.txt"]);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].file_name.ends_with("gone.docx"));
}

#[tokio::test]
async fn test_missing_file_is_invalid_input() {
    let manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nope.pdf")).await;
    assert!(matches!(result, Err(ScreenerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_docx_resume_from_directory() {
    let dir = TempDir::new().unwrap();
    let docx = docx_bytes(&[
        "Kavya Nair",
        "kavya.nair@example.com | Mobile: 98450 12345",
        "Export sales executive, 3 years in chemical trading",
        "B.Com, 2019",
    ]);
    std::fs::write(dir.path().join("Kavya Nair [3y_4m].docx"), docx).unwrap();
    std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();

    let paths = collect_resume_paths(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(paths.len(), 2);

    let manager = InputManager::new();
    assert!(paths[0].ends_with("Kavya Nair [3y_4m].docx"));
    let extracted = manager.extract_text(&paths[0]).await.unwrap();
    let fields = FieldExtractor::new(Default::default())
        .unwrap()
        .extract(extracted.text(), Some(extracted.file_name()));

    assert_eq!(fields.name, "Kavya Nair");
    assert_eq!(fields.mobile, "9845012345");
    assert_eq!(fields.total_experience_years, 3.0 + 4.0 / 12.0);
    assert_eq!(fields.experience, "3.3 Years");
    assert_eq!(fields.education_level, EducationLevel::Bachelors);
}

#[tokio::test]
async fn test_full_screening_pipeline() {
    let manager = InputManager::new();
    let jd = manager.load_document(&fixture("sales_jd.txt")).await.unwrap();
    let paths = vec![fixture("arjun_dev.txt"), fixture("priya_sharma.txt")];
    let (mut resumes, failures) = manager.load_batch(&paths).await;
    assert!(failures.is_empty());
    resumes.push(RawDocument::new("corrupt.docx", b"PK but not really".to_vec()));

    let engine = ScreeningEngine::new(&Config::default()).unwrap();
    let options = ScreeningOptions {
        role_title: Some("Export Sales Manager".to_string()),
        extra_keywords: vec!["incoterms".to_string(), "kubernetes".to_string()],
    };
    let outcome = engine.screen(&jd, &resumes, &options, |_| {}).unwrap();
    let report = ScreeningReport::from_outcome(outcome, 60.0);

    let profile = report.jd_profile.as_ref().unwrap();
    assert_eq!(profile.primary_role, RoleCategory::Sales);
    assert_eq!(profile.primary_industry, IndustryCategory::Chemical);

    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.summary.failed_files, 1);

    let priya = &report.candidates[0];
    let arjun = &report.candidates[1];
    assert_eq!(priya.fields.name, "Priya Sharma");
    assert_eq!(priya.fields.email, "priya.sharma@example.com");
    assert_eq!(priya.fields.mobile, "9876543210");
    assert_eq!(priya.fields.location, "Vadodara");
    assert_eq!(priya.fields.education_level, EducationLevel::Masters);
    assert_eq!(priya.fields.notice_period, "30 days");
    assert_eq!(priya.fields.current_company, "Gujarat Resins Pvt Ltd");
    assert!(priya.role_match);
    assert!(priya.industry_match);
    assert_eq!(priya.extra_keyword_hits, vec!["incoterms"]);
    assert!(priya.outreach_message.contains("Hi Priya"));

    assert_eq!(arjun.fields.notice_period, "Immediate");
    assert!(!arjun.role_match);
    assert!(arjun.fit_score <= 15.0);
    assert!(arjun.not_relevant);
    assert_eq!(arjun.extra_keyword_hits, vec!["kubernetes"]);
    assert!(priya.fit_score > arjun.fit_score);

    for candidate in &report.candidates {
        assert!((0.0..=100.0).contains(&candidate.fit_score));
        assert!(candidate.fields.total_experience_years >= 0.0);
        assert!(candidate.remark.starts_with(&candidate.fit_tag.to_string()));
    }

    let json = ReportGenerator::new()
        .generate_report(&report, &resume_screener::config::OutputFormat::Json)
        .unwrap();
    assert!(json.contains("\"Priya Sharma\""));
}

#[test]
fn test_screening_is_deterministic() {
    let engine = ScreeningEngine::new(&Config::default()).unwrap();
    let jd = RawDocument::from_text("jd.txt", include_str!("fixtures/sales_jd.txt"));
    let resumes = vec![
        RawDocument::from_text("priya.txt", include_str!("fixtures/priya_sharma.txt")),
        RawDocument::from_text("arjun.txt", include_str!("fixtures/arjun_dev.txt")),
    ];

    let first = engine.screen(&jd, &resumes, &ScreeningOptions::default(), |_| {}).unwrap();
    let second = engine.screen(&jd, &resumes, &ScreeningOptions::default(), |_| {}).unwrap();

    let mut a = first.candidates;
    let mut b = second.candidates;
    a.sort_by_key(|c| c.upload_index);
    b.sort_by_key(|c| c.upload_index);
    assert_eq!(a, b);
}

#[test]
fn test_short_anonymous_resume_flags() {
    let extractor = FieldExtractor::new(Default::default()).unwrap();
    let text = "Operations coordinator handling dispatch and warehouse records. ".repeat(3);
    let text = &text[..text.len().min(200)];
    let fields = extractor.extract(text, None);

    assert!(fields.red_flags.contains(&RedFlag::VeryShortResume));
    assert!(fields.red_flags.contains(&RedFlag::NoEmail));
    assert!(fields.red_flags.contains(&RedFlag::NoPhone));
    assert_eq!(fields.red_flags_display(), "Very short resume, No email, No phone");
}

#[test]
fn test_zero_keyword_overlap_scores_zero() {
    let engine = ScreeningEngine::new(&Config::default()).unwrap();
    let jd = engine
        .analyze_jd(&RawDocument::from_text("jd.txt", include_str!("fixtures/sales_jd.txt")))
        .unwrap();
    let record = engine.evaluate(0, "x.txt", "qqq zzz", Some(&jd), &ScreeningOptions::default());

    assert_eq!(record.score_breakdown["keyword"], 0.0);
    assert_eq!(record.fit_tag, FitTag::NotAFit);
    assert!(record.fit_score <= 15.0);
}

#[test]
fn test_empty_resume_yields_sentinels() {
    let engine = ScreeningEngine::new(&Config::default()).unwrap();
    let record = engine.evaluate(0, "", "", None, &ScreeningOptions::default());

    assert_eq!(record.fields.name, SENTINEL);
    assert_eq!(record.fields.email, SENTINEL);
    assert_eq!(record.fields.mobile, SENTINEL);
    assert_eq!(record.fields.current_company, SENTINEL);
    assert_eq!(record.fit_tag, FitTag::Unscored);
    assert!(record.outreach_message.starts_with("Hi there,"));
}
