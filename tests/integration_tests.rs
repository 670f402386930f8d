use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rusqlite::Connection;

mod common;
use common::{fd, init_db, init_db_with_school, setup_test_db};

fn schedule_flight(db_path: &str, date: &str) {
    fd().args([
        "--db",
        db_path,
        "schedule",
        "--enrollment",
        "1",
        "--date",
        date,
        "--start",
        "09:00",
        "--aircraft",
        "1",
    ])
    .assert()
    .success();
}

#[test]
fn test_init_applies_migrations_once() {
    let db_path = setup_test_db("init_once");

    init_db(&db_path);
    fd().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    let conn = Connection::open(&db_path).expect("open db");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
             AND name IN ('aircraft','syllabi','lessons','enrollments','missions','log')",
            [],
            |r| r.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 6);

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .expect("count migrations");
    assert_eq!(applied, 3);
}

#[test]
fn test_blocks_for_a_flight() {
    fd().args(["blocks", "F", "09:00", "120"])
        .assert()
        .success()
        .stdout(
            contains("Pre-Flight Inspection")
                .and(contains("Flight Training"))
                .and(contains("Post-Flight Debrief"))
                .and(contains("student + instructor"))
                .and(contains("Ends       : 12:00"))
                .and(contains("9:30 AM")),
        );
}

#[test]
fn test_blocks_json_and_defaults() {
    // ground default is 90 minutes
    fd().args(["blocks", "G", "14:00", "--json"])
        .assert()
        .success()
        .stdout(contains("\"end_time\": \"15:30\"").and(contains("\"mission_type\": \"G\"")));
}

#[test]
fn test_blocks_rejects_bad_input() {
    fd().args(["blocks", "F", "22:00", "120"])
        .assert()
        .failure()
        .stderr(contains("following day"));

    fd().args(["blocks", "X", "09:00", "60"])
        .assert()
        .failure()
        .stderr(contains("Invalid mission type"));

    fd().args(["blocks", "S", "09:00", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    fd().args(["blocks", "G", "09:00", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));
}

#[test]
fn test_progress_of_new_enrollment() {
    let db_path = setup_test_db("progress_new");
    init_db_with_school(&db_path);

    fd().args(["--db", &db_path, "progress", "1"])
        .assert()
        .success()
        .stdout(
            contains("0/3 lessons")
                .and(contains("Continue with Intro to Flight"))
                .and(contains("Create a custom training mission"))
                .and(contains("Practice").not()),
        );

    fd().args(["--db", &db_path, "progress", "42"])
        .assert()
        .failure()
        .stderr(contains("enrollment 42"));
}

#[test]
fn test_schedule_uses_suggested_lesson_and_numbers_missions() {
    let db_path = setup_test_db("schedule_numbers");
    init_db_with_school(&db_path);

    fd().args([
        "--db",
        &db_path,
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
    .success()
    .stdout(
        contains("Step 4 of 4")
            .and(contains("Mission code: DSA-PPC-F1"))
            .and(contains("Mission DSA-PPC-F1 scheduled for 2026-03-02")),
    );

    schedule_flight(&db_path, "2026-03-04");

    fd().args([
        "--db",
        &db_path,
        "schedule",
        "--enrollment",
        "1",
        "--lesson",
        "2",
        "--date",
        "2026-03-05",
    ])
    .assert()
    .success()
    .stdout(contains("Mission DSA-PPC-G1 scheduled"));

    let conn = Connection::open(&db_path).expect("open db");
    let rows: Vec<(String, Option<String>, String)> = conn
        .prepare("SELECT mission_code, lesson_code, status FROM missions ORDER BY id")
        .expect("prepare")
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("DSA-PPC-F1".to_string(), Some("PPC-L1".to_string()), "scheduled".to_string()),
            ("DSA-PPC-F2".to_string(), Some("PPC-L1".to_string()), "scheduled".to_string()),
            ("DSA-PPC-G1".to_string(), Some("PPC-L2".to_string()), "scheduled".to_string()),
        ]
    );
}

#[test]
fn test_schedule_wizard_guards() {
    let db_path = setup_test_db("schedule_guards");
    init_db_with_school(&db_path);

    fd().args(["--db", &db_path, "schedule", "--date", "2026-03-02"])
        .assert()
        .failure()
        .stderr(contains("Please select a student enrollment"));

    fd().args([
        "--db",
        &db_path,
        "schedule",
        "--enrollment",
        "1",
        "--date",
        "2026-03-02",
    ])
    .assert()
    .failure()
    .stderr(contains("Please select an aircraft for flight missions"));

    fd().args(["--db", &db_path, "schedule", "--enrollment", "1", "--aircraft", "1"])
        .assert()
        .failure()
        .stderr(contains("Please select a date"));

    fd().args(["--db", &db_path, "schedule", "--enrollment", "42", "--date", "2026-03-02"])
        .assert()
        .failure()
        .stderr(contains("enrollment 42"));

    fd().args([
        "--db",
        &db_path,
        "schedule",
        "--enrollment",
        "1",
        "--lesson",
        "999",
        "--date",
        "2026-03-02",
    ])
    .assert()
    .failure()
    .stderr(contains("Unknown lesson 999"));

    let conn = Connection::open(&db_path).expect("open db");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM missions", [], |r| r.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_schedule_dry_run_prints_payload() {
    let db_path = setup_test_db("schedule_dry_run");
    init_db_with_school(&db_path);

    fd().args([
        "--db",
        &db_path,
        "schedule",
        "--enrollment",
        "1",
        "--date",
        "2026-03-02",
        "--start",
        "08:00",
        "--aircraft",
        "1",
        "--no-poa",
        "--dry-run",
    ])
    .assert()
    .success()
    .stdout(
        contains("\"generatePOA\": false")
            .and(contains("\"missionType\": \"F\""))
            .and(contains("Dry run")),
    );

    let conn = Connection::open(&db_path).expect("open db");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM missions", [], |r| r.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_schedule_custom_mission() {
    let db_path = setup_test_db("schedule_custom");
    init_db_with_school(&db_path);

    fd().args([
        "--db",
        &db_path,
        "schedule",
        "--enrollment",
        "1",
        "--custom-title",
        "Crosswind landings",
        "--maneuver",
        "crosswind takeoff",
        "--type",
        "S",
        "--date",
        "2026-03-02",
    ])
    .assert()
    .success()
    .stdout(contains("Mission DSA-PPC-S1 scheduled"));

    let conn = Connection::open(&db_path).expect("open db");
    let (lesson_id, custom): (Option<i64>, String) = conn
        .query_row(
            "SELECT lesson_id, custom FROM missions WHERE mission_code = 'DSA-PPC-S1'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("custom mission");
    assert_eq!(lesson_id, None);
    assert!(custom.contains("Crosswind landings"));
    assert!(custom.contains("crosswind takeoff"));
}

#[test]
fn test_express_schedule() {
    let db_path = setup_test_db("express");
    init_db_with_school(&db_path);

    fd().args(["--db", &db_path, "express", "--enrollment", "1"])
        .assert()
        .failure()
        .stderr(contains("Please fill in all required fields"));

    fd().args([
        "--db",
        &db_path,
        "express",
        "--enrollment",
        "1",
        "--date",
        "2026-03-03",
        "--aircraft",
        "1",
    ])
    .assert()
    .success()
    .stdout(contains("Mission DSA-PPC-F1 scheduled for 2026-03-03 at 07:00"));

    // ground lesson: no aircraft needed, type follows the lesson
    fd().args([
        "--db",
        &db_path,
        "express",
        "--enrollment",
        "1",
        "--lesson",
        "2",
        "--date",
        "2026-03-04",
        "--start",
        "13:00",
    ])
    .assert()
    .success()
    .stdout(contains("Mission DSA-PPC-G1 scheduled for 2026-03-04 at 13:00"));
}

#[test]
fn test_mission_lifecycle_and_progress() {
    let db_path = setup_test_db("lifecycle");
    init_db_with_school(&db_path);
    schedule_flight(&db_path, "2026-03-02");
    schedule_flight(&db_path, "2026-03-09");

    // cannot complete before starting
    fd().args([
        "--db",
        &db_path,
        "mission",
        "complete",
        "1",
        "--assessment",
        "outstanding",
    ])
    .assert()
    .failure()
    .stderr(contains("Cannot move mission from 'scheduled' to 'completed'"));

    fd().args(["--db", &db_path, "mission", "start", "1"])
        .assert()
        .success()
        .stdout(contains("DSA-PPC-F1 is now in_progress"));

    fd().args([
        "--db",
        &db_path,
        "mission",
        "complete",
        "1",
        "--assessment",
        "outstanding",
    ])
    .assert()
    .success()
    .stdout(contains("is now completed"));

    fd().args(["--db", &db_path, "mission", "cancel", "1", "--reason", "weather"])
        .assert()
        .failure()
        .stderr(contains("Cannot move mission"));

    fd().args(["--db", &db_path, "mission", "cancel", "2", "--reason", " "])
        .assert()
        .failure()
        .stderr(contains("A cancellation reason is required"));

    fd().args(["--db", &db_path, "mission", "cancel", "2", "--reason", "weather"])
        .assert()
        .success()
        .stdout(contains("DSA-PPC-F2 is now cancelled"));

    fd().args(["--db", &db_path, "progress", "1"])
        .assert()
        .success()
        .stdout(
            contains("1/3 lessons")
                .and(contains("Continue with Ground School Basics"))
                .and(contains("Practice Intro to Flight again"))
                .and(contains("DSA-PPC-F1 on 2026-03-02")),
        );

    fd().args(["--db", &db_path, "stats", "100"])
        .assert()
        .success()
        .stdout(
            contains("Total missions     : 2")
                .and(contains("Completed          : 1"))
                .and(contains("Cancelled          : 1"))
                .and(contains("Average assessment : 4.00")),
        );

    fd().args(["--db", &db_path, "missions", "--status", "cancelled"])
        .assert()
        .success()
        .stdout(contains("DSA-PPC-F2").and(contains("DSA-PPC-F1").not()));
}

#[test]
fn test_listing_commands() {
    let db_path = setup_test_db("listing");
    init_db_with_school(&db_path);
    schedule_flight(&db_path, "2026-03-02");

    fd().args(["--db", &db_path, "aircraft", "list"])
        .assert()
        .success()
        .stdout(contains("N12345").and(contains("Cessna")));

    fd().args(["--db", &db_path, "enrollments"])
        .assert()
        .success()
        .stdout(contains("Jane Doe (#100)").and(contains("PPC")));

    fd().args(["--db", &db_path, "lesson", "list", "--enrollment", "1"])
        .assert()
        .success()
        .stdout(contains("PPC-L3").and(contains("1 hr 30 min")));

    fd().args(["--db", &db_path, "missions", "--range", "2026-03"])
        .assert()
        .success()
        .stdout(contains("DSA-PPC-F1").and(contains("N12345")));

    fd().args(["--db", &db_path, "missions", "--range", "2025"])
        .assert()
        .success()
        .stdout(contains("No missions found"));
}

#[test]
fn test_log_print_shows_audit_trail() {
    let db_path = setup_test_db("log_print");
    init_db_with_school(&db_path);
    schedule_flight(&db_path, "2026-03-02");

    fd().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("init"))
                .and(contains("DSA-PPC-F1"))
                .and(contains("Scheduled Flight mission for Jane Doe")),
        );
}

#[test]
fn test_config_print() {
    fd().args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("school_prefix").and(contains("preflight_minutes")));
}
