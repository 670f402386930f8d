use chrono::NaiveDate;
use flightdesk::export::model::estimate_completion;
use predicates::str::contains;
use std::fs;

mod common;
use common::{fd, init_db_with_school, setup_test_db, temp_out};

fn complete_first_lesson(db_path: &str) {
    fd().args([
        "--db",
        db_path,
        "schedule",
        "--enrollment",
        "1",
        "--date",
        "2026-03-02",
        "--start",
        "09:00",
        "--aircraft",
        "1",
    ])
    .assert()
    .success();
    fd().args(["--db", db_path, "mission", "start", "1"])
        .assert()
        .success();
    fd().args([
        "--db",
        db_path,
        "mission",
        "complete",
        "1",
        "--assessment",
        "satisfactory",
    ])
    .assert()
    .success();
}

#[test]
fn test_export_progress_csv() {
    let db_path = setup_test_db("export_progress_csv");
    let out = temp_out("export_progress_csv", "csv");
    init_db_with_school(&db_path);
    complete_first_lesson(&db_path);

    fd().args([
        "--db",
        &db_path,
        "export",
        "--report",
        "progress",
        "--format",
        "csv",
        "--enrollment",
        "1",
        "--file",
        &out,
    ])
    .assert()
    .success()
    .stdout(contains("export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        "Syllabus,Start Date,Instructor,Progress %,Total Lessons,Completed Lessons,Estimated Completion"
    );
    assert!(lines[1].starts_with("Private Pilot Certificate,2026-01-05,Sam Pilot,33.3,3,1,"));
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "Lesson,Status,Order");
    // completed first, then pending in syllabus order
    assert_eq!(lines[4], "Intro to Flight,Completed,1");
    assert_eq!(lines[5], "Ground School Basics,Pending,2");
    assert_eq!(lines[6], "Slow Flight and Stalls,Pending,3");
}

#[test]
fn test_export_progress_requires_enrollment() {
    let db_path = setup_test_db("export_progress_no_enrollment");
    let out = temp_out("export_progress_no_enrollment", "csv");
    init_db_with_school(&db_path);

    fd().args(["--db", &db_path, "export", "--report", "progress", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("--enrollment"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_missions_in_all_formats() {
    let db_path = setup_test_db("export_missions");
    init_db_with_school(&db_path);
    complete_first_lesson(&db_path);

    let csv_out = temp_out("export_missions", "csv");
    fd().args([
        "--db", &db_path, "export", "--report", "missions", "--file", &csv_out,
    ])
    .assert()
    .success();
    let csv = fs::read_to_string(&csv_out).expect("read csv");
    assert!(csv.starts_with(
        "Mission Code,Date,Start Time,Type,Status,Student,Lesson Code,Title,Aircraft,Assessment"
    ));
    assert!(csv.contains(
        "DSA-PPC-F1,2026-03-02,09:00,Flight,completed,Jane Doe,PPC-L1,Intro to Flight,N12345,satisfactory"
    ));

    let md_out = temp_out("export_missions", "md");
    fd().args([
        "--db",
        &db_path,
        "export",
        "--report",
        "missions",
        "--format",
        "markdown",
        "--file",
        &md_out,
    ])
    .assert()
    .success();
    let md = fs::read_to_string(&md_out).expect("read md");
    assert!(md.contains("| Mission Code | Date |"));
    assert!(md.contains("| DSA-PPC-F1 |"));

    let json_out = temp_out("export_missions", "json");
    fd().args([
        "--db",
        &db_path,
        "export",
        "--report",
        "missions",
        "--format",
        "json",
        "--file",
        &json_out,
    ])
    .assert()
    .success();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read json")).expect("parse");
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["mission_code"], "DSA-PPC-F1");
    assert_eq!(rows[0]["aircraft"], "N12345");
}

#[test]
fn test_export_missions_range_filter() {
    let db_path = setup_test_db("export_missions_range");
    let out = temp_out("export_missions_range", "csv");
    init_db_with_school(&db_path);
    complete_first_lesson(&db_path);

    fd().args([
        "--db", &db_path, "export", "--report", "missions", "--range", "2025", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("No missions found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_rejects_relative_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_school(&db_path);

    fd().args([
        "--db",
        &db_path,
        "export",
        "--report",
        "missions",
        "--file",
        "relative.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_export_overwrite_needs_force() {
    let db_path = setup_test_db("export_force");
    let out = temp_out("export_force", "csv");
    init_db_with_school(&db_path);
    complete_first_lesson(&db_path);
    fs::write(&out, "old content").expect("seed file");

    fd().args([
        "--db", &db_path, "export", "--report", "missions", "--file", &out,
    ])
    .write_stdin("n\n")
    .assert()
    .failure()
    .stderr(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "old content");

    fd().args([
        "--db", &db_path, "export", "--report", "missions", "--file", &out, "--force",
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).expect("read").contains("DSA-PPC-F1"));
}

#[test]
fn test_estimated_completion_follows_pace() {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();

    // 25% in 10 days: 30 more days
    assert_eq!(
        estimate_completion(start, today, 25.0),
        NaiveDate::from_ymd_opt(2026, 2, 10)
    );
    assert_eq!(estimate_completion(start, today, 0.0), None);
    assert_eq!(estimate_completion(start, today, 100.0), None);
    assert_eq!(estimate_completion(start, start, 50.0), None);
}
