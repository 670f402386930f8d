use flightdesk::config::migrate::{fill_missing, missing_keys};
use std::fs;

mod common;
use common::temp_out;

#[test]
fn test_config_migrate_adds_missing_keys() {
    let path = temp_out("config_migrate", "conf");
    fs::write(&path, "school_prefix: ABC\n").expect("seed config");
    let path = std::path::Path::new(&path);

    let missing = missing_keys(path).expect("check");
    assert!(missing.contains(&"preflight_minutes".to_string()));
    assert!(missing.contains(&"allow_cross_midnight".to_string()));
    assert!(!missing.contains(&"school_prefix".to_string()));

    let added = fill_missing(path).expect("migrate");
    assert_eq!(added, missing);

    let content = fs::read_to_string(path).expect("read config");
    assert!(content.contains("school_prefix: ABC"));
    assert!(content.contains("preflight_minutes: 30"));

    assert!(missing_keys(path).expect("recheck").is_empty());
    assert!(fill_missing(path).expect("second migrate").is_empty());
}

#[test]
fn test_config_migrate_rejects_non_mapping() {
    let path = temp_out("config_not_mapping", "conf");
    fs::write(&path, "- just\n- a list\n").expect("seed config");

    assert!(missing_keys(std::path::Path::new(&path)).is_err());
}
