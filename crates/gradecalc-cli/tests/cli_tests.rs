//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "../../gradebooks/sample.toml";
const WARNINGS: &str = "../../gradebooks/warnings.toml";

fn gradecalc() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradecalc").unwrap();
    cmd.env_remove("GRADECALC_TOTAL_SEMESTERS")
        .env_remove("GRADECALC_MIN_FLOOR");
    cmd
}

#[test]
fn summary_lists_every_semester() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fall 2026: GPA 3.70 (1 of 3 subjects graded)"))
        .stdout(predicate::str::contains("Spring 2027: GPA 0.00 (0 of 1 subjects graded)"))
        .stdout(predicate::str::contains("52.4%"))
        .stdout(predicate::str::contains("92.4%"))
        .stdout(predicate::str::contains("90% achieved"))
        .stdout(predicate::str::contains("95% out of reach"))
        .stdout(predicate::str::contains("85% reachable"));
}

#[test]
fn summary_single_semester() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--semester", "spring 2027"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring 2027"))
        .stdout(predicate::str::contains("Fall 2026").not());
}

#[test]
fn summary_unknown_semester_fails() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--semester", "Summer 2030"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("semester 'Summer 2030' not found"));
}

#[test]
fn summary_json() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"letter_grade\": \"A-\""))
        .stdout(predicate::str::contains("\"status\": \"achieved\""))
        .stdout(predicate::str::contains("\"status\": \"infeasible\""));
}

#[test]
fn summary_rejects_unknown_format() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'yaml'"));
}

#[test]
fn required_scores_for_subject_goal() {
    gradecalc()
        .args(["required", "--gradebook", SAMPLE, "--subject", "Calculus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("currently 52.4%, to reach 85.0%"))
        .stdout(predicate::str::contains("final_exam"))
        .stdout(predicate::str::contains("81.5%"));
}

#[test]
fn required_with_unreachable_goal() {
    gradecalc()
        .args(["required", "--gradebook", SAMPLE, "--subject", "calculus", "--goal", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of reach (best possible 92.4%)"));
}

#[test]
fn required_when_goal_already_met() {
    gradecalc()
        .args(["required", "--gradebook", SAMPLE, "--subject", "Physics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already achieved (currently 91.0%)"));
}

#[test]
fn required_json() {
    gradecalc()
        .args([
            "required",
            "--gradebook",
            SAMPLE,
            "--subject",
            "Calculus",
            "--semester",
            "Fall 2026",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"required\""))
        .stdout(predicate::str::contains("\"final_exam\""));
}

#[test]
fn required_rejects_negative_goal() {
    gradecalc()
        .args(["required", "--gradebook", SAMPLE, "--subject", "Calculus", "--goal=-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be negative"));
}

#[test]
fn required_unknown_subject_fails() {
    gradecalc()
        .args(["required", "--gradebook", SAMPLE, "--subject", "Biology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("subject 'Biology' not found"));
}

#[test]
fn project_outlook() {
    gradecalc()
        .args(["project", "--gradebook", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 3 of 8 semesters, current GPA 3.50"))
        .stdout(predicate::str::contains("3.81"))
        .stdout(predicate::str::contains("2.56"));
}

#[test]
fn project_with_goal() {
    gradecalc()
        .args(["project", "--gradebook", SAMPLE, "--goal-gpa", "3.6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("average 3.66 per remaining semester"))
        .stdout(predicate::str::contains("difficulty 86%, hard"));
}

#[test]
fn project_finished_program() {
    gradecalc()
        .args(["project", "--gradebook", SAMPLE, "--total-semesters", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 3 of 3 semesters"));
}

#[test]
fn project_rejects_out_of_range_goal() {
    gradecalc()
        .args(["project", "--gradebook", SAMPLE, "--goal-gpa", "4.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("goal GPA must be between 0.0 and 4.0"));
}

#[test]
fn validate_clean_gradebook() {
    gradecalc()
        .args(["validate", "--gradebook", SAMPLE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gradebook: 2 semester(s), 4 subject(s)"))
        .stdout(predicate::str::contains("All gradebooks valid"));
}

#[test]
fn validate_reports_warnings() {
    gradecalc()
        .args(["validate", "--gradebook", WARNINGS])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 semesters recorded but the program has 1"))
        .stdout(predicate::str::contains("[Term 2] WARNING: semester has no subjects"))
        .stdout(predicate::str::contains("assessment weights sum to 80, expected 100"))
        .stdout(predicate::str::contains("quiz expects 4 records, found 2"))
        .stdout(predicate::str::contains("4 warning(s) found"));
}

#[test]
fn validate_directory() {
    gradecalc()
        .args(["validate", "--gradebook", "../../gradebooks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 subject(s)"))
        .stdout(predicate::str::contains("4 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    gradecalc()
        .args(["validate", "--gradebook", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn invalid_score_is_rejected_with_location() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[semesters]]
name = "Fall"

[[semesters.subjects]]
name = "Art"

[[semesters.subjects.types]]
kind = "midterm"
weight = 100
records = [{ score = 120, final = true }]
"#,
    )
    .unwrap();

    gradecalc()
        .args(["validate", "--gradebook"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("in subject 'Art'"))
        .stderr(predicate::str::contains("120"));
}

#[test]
fn report_json() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("report.json");

    gradecalc()
        .args(["report", "--gradebook", SAMPLE, "--goal-gpa", "3.6", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let report = gradecalc_core::report::GradeReport::load_json(&output).unwrap();
    assert_eq!(report.semesters.len(), 2);
    assert_eq!(report.program.completed_semesters, 3);
    assert!((report.program.goal_gpa.unwrap() - 3.6).abs() < 1e-9);
}

#[test]
fn report_markdown() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.md");

    gradecalc()
        .args(["report", "--gradebook", SAMPLE, "--format", "markdown", "--output"])
        .arg(&output)
        .assert()
        .success();

    let md = std::fs::read_to_string(&output).unwrap();
    assert!(md.contains("## Fall 2026 (GPA 3.70)"));
    assert!(md.contains("| Physics | 91.0% | A- | 3.7 |"));
    assert!(md.contains("needs final_exam 81.5%"));
}

#[test]
fn custom_scale_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gradecalc.toml");
    std::fs::write(
        &config,
        r#"
[[scale.bands]]
letter = "A"
min_percentage = 90.0
grade_points = 4.0

[[scale.bands]]
letter = "B"
min_percentage = 80.0
grade_points = 3.0
"#,
    )
    .unwrap();

    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fall 2026: GPA 4.00"));
}

#[test]
fn missing_config_fails() {
    gradecalc()
        .args(["summary", "--gradebook", SAMPLE, "--config", "no-such-config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn bad_env_override_fails() {
    gradecalc()
        .env("GRADECALC_MIN_FLOOR", "lots")
        .args(["summary", "--gradebook", SAMPLE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid GRADECALC_MIN_FLOOR"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    gradecalc()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradecalc.toml"))
        .stdout(predicate::str::contains("Created gradebooks/example.toml"));

    assert!(dir.path().join("gradecalc.toml").exists());
    assert!(dir.path().join("gradebooks/example.toml").exists());

    gradecalc()
        .current_dir(dir.path())
        .args(["validate", "--gradebook", "gradebooks/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All gradebooks valid"));
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gradecalc.toml"), "total_semesters = 4\n").unwrap();

    gradecalc()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradecalc.toml already exists, skipping."))
        .stdout(predicate::str::contains("Created gradebooks/example.toml"));

    let kept = std::fs::read_to_string(dir.path().join("gradecalc.toml")).unwrap();
    assert_eq!(kept, "total_semesters = 4\n");
}

#[test]
fn help_lists_commands() {
    gradecalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("required"))
        .stdout(predicate::str::contains("project"));
}
