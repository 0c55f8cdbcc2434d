//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SUBMISSION: &str = r#"
studentNames = """
Ali
Ayse
"""
examVariant = """
A
B
"""

[[courses]]
courseName = "Matematik"
answerKey = """
A
B
"""
questionReferenceMap = """
2
1
"""
questionTopics = """
Kesirler
Oranlar
"""
studentAnswers = """
AX
BA
"""

[[courses]]
courseName = "Fen Bilgisi"
"#;

fn examgrade(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("examgrade").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("EXAMGRADE_OUTPUT_DIR")
        .env_remove("EXAMGRADE_DRAFT_PATH")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("exam.toml"), SUBMISSION).unwrap();
    dir
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect()
}

#[test]
fn validate_valid_submission() {
    let dir = workspace();
    examgrade(dir.path())
        .arg("validate")
        .arg("--input")
        .arg("exam.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 students, 1 course(s)"))
        .stdout(predicate::str::contains("All submissions valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("short.toml"),
        r#"
studentNames = "Ali\nAyse"

[[courses]]
courseName = "Türkçe"
answerKey = "A\nB\nC"
studentAnswers = "AB"
"#,
    )
    .unwrap();

    examgrade(dir.path())
        .arg("validate")
        .arg("--input")
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Türkçe] WARNING: 1 answer line(s) for 2 student(s)"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    examgrade(dir.path())
        .arg("validate")
        .arg("--input")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_writes_reports_and_draft() {
    let dir = workspace();
    examgrade(dir.path())
        .arg("grade")
        .arg("--input")
        .arg("exam.toml")
        .arg("--output")
        .arg("out")
        .arg("--format")
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matematik"))
        .stderr(predicate::str::contains("1 course(s) graded, 1 blank skipped"));

    let out = dir.path().join("out");
    let json = files_with_extension(&out, "json");
    assert_eq!(json.len(), 1);
    assert_eq!(files_with_extension(&out, "html").len(), 1);

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json[0]).unwrap()).unwrap();
    let course = &report["courses"][0];
    assert_eq!(course["courseName"], "Matematik");
    assert_eq!(course["overallAverages"]["correct"], 1.5);
    assert_eq!(course["questionsAnalysis"][1]["notAnsweredStudents"][0], "Ali");

    let sheets = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.is_dir())
        .expect("sheet directory");
    assert!(sheets.join("01-Matematik.tsv").exists());

    assert!(dir.path().join(".examgrade/exam-data.json").exists());
}

#[test]
fn grade_last_reuses_saved_draft() {
    let dir = workspace();
    examgrade(dir.path())
        .args(["grade", "--input", "exam.toml", "--output", "first"])
        .assert()
        .success();

    std::fs::remove_file(dir.path().join("exam.toml")).unwrap();

    examgrade(dir.path())
        .args(["grade", "--last", "--output", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matematik"));

    assert_eq!(files_with_extension(&dir.path().join("second"), "json").len(), 1);
}

#[test]
fn grade_last_without_draft_fails() {
    let dir = TempDir::new().unwrap();
    examgrade(dir.path())
        .args(["grade", "--last"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved submission"));
}

#[test]
fn grade_respects_no_save_draft() {
    let dir = workspace();
    examgrade(dir.path())
        .args(["grade", "--input", "exam.toml", "--no-save-draft"])
        .assert()
        .success();

    assert!(!dir.path().join(".examgrade/exam-data.json").exists());
    assert_eq!(
        files_with_extension(&dir.path().join("examgrade-results"), "json").len(),
        1
    );
}

#[test]
fn grade_requires_input_or_last() {
    let dir = TempDir::new().unwrap();
    examgrade(dir.path()).arg("grade").assert().failure();
}

#[test]
fn show_prints_course_table() {
    let dir = workspace();
    examgrade(dir.path())
        .args(["grade", "--input", "exam.toml", "--output", "out"])
        .assert()
        .success();

    let report = files_with_extension(&dir.path().join("out"), "json").remove(0);

    examgrade(dir.path())
        .arg("show")
        .arg("--report")
        .arg(&report)
        .arg("--course")
        .arg("matematik")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matematik (2 students, 2 questions)"))
        .stdout(predicate::str::contains("Oranlar"));

    examgrade(dir.path())
        .arg("show")
        .arg("--report")
        .arg(&report)
        .arg("--course")
        .arg("Tarih")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examgrade(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examgrade.toml"))
        .stdout(predicate::str::contains("Created submissions/example.toml"));

    assert!(dir.path().join("examgrade.toml").exists());
    assert!(dir.path().join("submissions/example.toml").exists());

    examgrade(dir.path())
        .args(["validate", "--input", "submissions/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All submissions valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examgrade(dir.path()).arg("init").assert().success();

    examgrade(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    examgrade(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multiple-choice exam grader"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    examgrade(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("examgrade"));
}
