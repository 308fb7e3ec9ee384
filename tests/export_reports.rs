//! Tests for JSON and CSV report files.

use mail_posture::export::{report_filename, write_report};
use mail_posture::OutputFormat;
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{mock_auditor, MockLookup, MockProbe};

async fn sample_report() -> mail_posture::AuditReport {
    let lookup = MockLookup::new()
        .txt("example.com", "v=spf1 +all")
        .txt("_dmarc.example.com", "v=DMARC1; p=none");
    mock_auditor(lookup, MockProbe::new())
        .audit("example.com", "selector1")
        .await
}

#[tokio::test]
async fn test_json_report_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = sample_report().await;

    let path = write_report(&report, OutputFormat::Json, dir.path())
        .expect("Failed to write report")
        .expect("JSON format should produce a file");

    let expected = report_filename("example.com", report.scan_time, "json");
    assert_eq!(path.file_name().unwrap().to_string_lossy(), expected);

    let body = std::fs::read_to_string(&path).expect("Failed to read report");
    let json: serde_json::Value = serde_json::from_str(&body).expect("Invalid JSON");
    let object = json.as_object().expect("Report should be an object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "dkim_vulnerabilities",
            "dmarc_vulnerabilities",
            "domain",
            "scan_time",
            "spf_vulnerabilities",
        ]
    );
    assert_eq!(json["domain"], "example.com");
    assert_eq!(json["spf_vulnerabilities"][0], "Overly permissive SPF policy (+all)");
    assert_eq!(
        json["dmarc_vulnerabilities"][0],
        "Policy set to monitoring only (p=none)"
    );
    assert_eq!(json["dkim_vulnerabilities"][0], "Missing DKIM record");
}

#[tokio::test]
async fn test_csv_report_rows() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = sample_report().await;

    let path = write_report(&report, OutputFormat::Csv, dir.path())
        .expect("Failed to write report")
        .expect("CSV format should produce a file");
    assert!(path.extension().is_some_and(|ext| ext == "csv"));

    let mut reader = csv::Reader::from_path(&path).expect("Failed to open CSV");
    assert_eq!(
        reader.headers().expect("Missing header").iter().collect::<Vec<_>>(),
        vec!["Type", "Finding"]
    );
    let rows: Vec<(String, String)> = reader
        .records()
        .map(|r| {
            let r = r.expect("Bad CSV row");
            (r[0].to_string(), r[1].to_string())
        })
        .collect();

    let expected: Vec<(String, String)> = [
        ("SPF", "Overly permissive SPF policy (+all)"),
        ("DMARC", "Policy set to monitoring only (p=none)"),
        ("DKIM", "Missing DKIM record"),
    ]
    .iter()
    .map(|(kind, finding)| (kind.to_string(), finding.to_string()))
    .collect();
    assert_eq!(rows, expected);
}

#[tokio::test]
async fn test_text_format_writes_nothing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = sample_report().await;

    let written = write_report(&report, OutputFormat::Text, dir.path()).expect("Text never fails");
    assert!(written.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_report_filename_format() {
    use chrono::TimeZone;
    let time = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
    assert_eq!(
        report_filename("example.com", time, "csv"),
        "report_example.com_20240305_070809.csv"
    );
}
