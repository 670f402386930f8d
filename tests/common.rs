#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use flightdesk::models::lesson::{Lesson, LessonType};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn fd() -> Command {
    cargo_bin_cmd!("flightdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_flightdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_flightdesk_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    fd().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB and add a small school:
/// - aircraft 1: N12345
/// - enrollment 1: Jane Doe (student 100) in PPC with instructor 7
/// - lessons 1..3: flight (60 min), ground (90 min), flight (no estimate)
pub fn init_db_with_school(db_path: &str) {
    init_db(db_path);

    fd().args([
        "--db", db_path, "aircraft", "add", "N12345", "--make", "Cessna", "--model", "172",
    ])
    .assert()
    .success();

    fd().args([
        "--db",
        db_path,
        "enroll",
        "--student-id",
        "100",
        "--student",
        "Jane Doe",
        "--instructor-id",
        "7",
        "--instructor",
        "Sam Pilot",
        "--syllabus",
        "Private Pilot Certificate",
        "--code",
        "PPC",
        "--start",
        "2026-01-05",
    ])
    .assert()
    .success();

    for (order, title, kind, duration) in [
        ("1", "Intro to Flight", "flight", Some("60")),
        ("2", "Ground School Basics", "ground", Some("90")),
        ("3", "Slow Flight and Stalls", "flight", None),
    ] {
        let mut cmd = fd();
        cmd.args([
            "--db",
            db_path,
            "lesson",
            "add",
            "--syllabus",
            "Private Pilot Certificate",
            "--title",
            title,
            "--order",
            order,
            "--type",
            kind,
        ]);
        if let Some(d) = duration {
            cmd.args(["--duration", d]);
        }
        cmd.assert().success();
    }
}

pub fn lesson(id: i64, order: i32, title: &str, kind: LessonType) -> Lesson {
    Lesson {
        id,
        syllabus_id: 1,
        title: title.to_string(),
        description: String::new(),
        order_index: order,
        lesson_type: kind,
        estimated_duration_minutes: None,
        is_active: true,
    }
}
