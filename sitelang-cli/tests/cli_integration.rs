//! Integration tests for the sitelang CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn sitelang() -> Command {
    Command::cargo_bin("sitelang").unwrap()
}

#[test]
fn test_list_languages() {
    sitelang()
        .args(["list", "languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("de\n"))
        .stdout(predicate::str::contains("zh-cn\n"));
}

#[test]
fn test_list_formats() {
    sitelang()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_meta_markup_declaration() {
    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("declared.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("declared.html\tde\tmarkup"));
}

#[test]
fn test_meta_sibling_headers() {
    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("header_only.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("header_only.html\tfr\theader"));
}

#[test]
fn test_meta_nothing_declared() {
    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("undeclared.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("undeclared.html\t-\tnone"));
}

#[test]
fn test_meta_restricted_languages() {
    sitelang()
        .args(["meta", "-q", "-l", "en,it", "-i"])
        .arg(fixture_path("declared.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\t-\tnone"));
}

#[test]
fn test_meta_json_output() {
    sitelang()
        .args(["meta", "-q", "-f", "json", "-i"])
        .arg(fixture_path("*.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"meta\""))
        .stdout(predicate::str::contains("\"source\": \"header\""));
}

#[test]
fn test_meta_malformed_headers() {
    let temp_dir = TempDir::new().unwrap();
    let headers = temp_dir.path().join("bad.json");
    fs::write(&headers, r#"[{"header": "Content-Language"}]"#).unwrap();

    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("undeclared.html"))
        .arg("--headers")
        .arg(&headers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 file(s) failed"));
}

#[test]
fn test_detect_text_file() {
    sitelang()
        .args(["detect", "-q", "-l", "de,en", "--seed", "42", "-i"])
        .arg(fixture_path("german.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("german.txt\tde\tstatistical"));
}

#[test]
fn test_analyze_declared_page_with_scripts() {
    sitelang()
        .args(["analyze", "-q", "-l", "de,en", "-f", "json"])
        .args(["--domain", "gemeinde.at", "-i"])
        .arg(fixture_path("declared.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"de\""))
        .stdout(predicate::str::contains("\"include-local\""))
        .stdout(predicate::str::contains("\"src_domain\": \"jsdelivr.net\""));
}

#[test]
fn test_analyze_statistical_fallback() {
    sitelang()
        .args(["analyze", "-q", "-l", "de,en", "--seed", "1", "-i"])
        .arg(fixture_path("undeclared.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("undeclared.html\tde\tstatistical"));
}

#[test]
fn test_markdown_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.md");

    sitelang()
        .args(["meta", "-q", "-f", "markdown", "-i"])
        .arg(fixture_path("*.html"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("| File |"));
    assert!(content.contains("*Total files: 3, declared: 2*"));
}

#[test]
fn test_invalid_pattern() {
    sitelang()
        .args(["meta", "-i", "[invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file pattern"));
}

#[test]
fn test_missing_file() {
    sitelang()
        .args(["meta", "-i", "tests/fixtures/does-not-exist.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_seed_conflicts_with_random() {
    sitelang()
        .args(["detect", "--seed", "1", "--random", "-i"])
        .arg(fixture_path("german.txt"))
        .assert()
        .failure();
}

#[test]
fn test_generate_config_then_use() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("sitelang.toml");

    sitelang()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("[detection]"));

    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("declared.html"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\tde\tmarkup"));
}

#[test]
fn test_config_file_sets_format() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("sitelang.toml");
    fs::write(&config, "[output]\ndefault_format = \"json\"\npretty_json = false\n").unwrap();

    sitelang()
        .args(["meta", "-q", "-i"])
        .arg(fixture_path("declared.html"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\":\"meta\""));
}

#[test]
fn test_detect_strips_links() {
    sitelang()
        .args(["detect", "-q", "-l", "de,en", "--seed", "1", "-f", "json", "-i"])
        .arg(fixture_path("links.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word_count\": 10"));

    sitelang()
        .args(["detect", "-q", "-l", "de,en", "--seed", "1", "-f", "json", "--keep-urls", "-i"])
        .arg(fixture_path("links.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word_count\": 12"));
}

#[test]
fn test_analyze_empty_header_object() {
    let temp_dir = TempDir::new().unwrap();
    let headers = temp_dir.path().join("empty.json");
    fs::write(&headers, "{}").unwrap();

    sitelang()
        .args(["analyze", "-q", "-l", "de,en", "--seed", "1", "-i"])
        .arg(fixture_path("undeclared.html"))
        .arg("--headers")
        .arg(&headers)
        .assert()
        .success()
        .stdout(predicate::str::contains("undeclared.html\tde\tstatistical"));
}
