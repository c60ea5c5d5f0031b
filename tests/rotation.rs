//! Tests for size-triggered rotation through the logger.

mod common;

use common::{dir_string, read_lines};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;
use tierlog::rotation::list_backups;
use tierlog::{ConfigOption, Logger};

/// Roughly 300 KB once encoded, so four of them overflow a 1 MB file.
fn big_message(tag: usize) -> String {
    format!("{tag}:{}", "x".repeat(300_000))
}

fn tag_of(line: &str) -> String {
    let msg = line.split('\t').nth(3).unwrap();
    msg.split(':').next().unwrap().to_string()
}

#[test]
fn rollover_keeps_newest_backup_only() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(tmp.path()), "common.log", false),
        ConfigOption::rotation(1, 1, 0, false),
    ])
    .unwrap();

    for i in 1..=8 {
        logger.info(&big_message(i), &[]);
    }

    let active = tmp.path().join("common.log");
    let tags: Vec<String> = read_lines(&active).iter().map(|l| tag_of(l)).collect();
    assert_eq!(tags, vec!["7", "8"]);

    let backups = list_backups(&active).unwrap();
    assert_eq!(backups.len(), 1);
    let backup_tags: Vec<String> = read_lines(&backups[0].path)
        .iter()
        .map(|l| tag_of(l))
        .collect();
    assert_eq!(backup_tags, vec!["4", "5", "6"]);
}

#[test]
fn rollover_compresses_backups() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(tmp.path()), "common.log", false),
        ConfigOption::rotation(1, 5, 30, true),
    ])
    .unwrap();

    for i in 1..=8 {
        logger.info(&big_message(i), &[]);
    }

    let active = tmp.path().join("common.log");
    let backups = list_backups(&active).unwrap();
    assert_eq!(backups.len(), 2);
    assert!(backups.iter().all(|b| b.compressed));

    let mut oldest = String::new();
    GzDecoder::new(File::open(&backups[1].path).unwrap())
        .read_to_string(&mut oldest)
        .unwrap();
    let tags: Vec<String> = oldest.lines().map(tag_of).collect();
    assert_eq!(tags, vec!["1", "2", "3"]);
}

#[test]
fn oversized_record_is_dropped_not_fatal() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(tmp.path()), "common.log", false),
        ConfigOption::rotation(1, 0, 0, false),
    ])
    .unwrap();

    logger.info(&"y".repeat(2 * 1024 * 1024), &[]);
    logger.info("small", &[]);

    let lines = read_lines(&tmp.path().join("common.log"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("\tsmall"));
}

#[test]
fn tiers_rotate_independently() {
    let tmp = tempdir().unwrap();
    let dir = dir_string(tmp.path());
    let logger = Logger::from_options([
        ConfigOption::common_log(&dir, "common.log", false),
        ConfigOption::error_log(&dir, "error.log", false),
        ConfigOption::rotation(1, 0, 0, false),
    ])
    .unwrap();

    for i in 1..=4 {
        logger.info(&big_message(i), &[]);
    }
    logger.error("only error", &[]);

    assert_eq!(list_backups(&tmp.path().join("common.log")).unwrap().len(), 1);
    assert!(list_backups(&tmp.path().join("error.log")).unwrap().is_empty());
    assert_eq!(read_lines(&tmp.path().join("error.log")).len(), 1);
}

#[test]
fn huge_max_size_from_toml_builds_and_writes() {
    let tmp = tempdir().unwrap();
    let config = tierlog::LoggerConfig::from_toml_str(&format!(
        "[common]\ndir = {:?}\nfile = \"common.log\"\n\n[rotation]\nmax_size = 17592186044416\n",
        dir_string(tmp.path())
    ))
    .unwrap();
    assert_eq!(config.rotation.max_size_bytes(), u64::MAX);

    let logger = Logger::from_config(&config).unwrap();
    logger.info("fits anywhere", &[]);

    let active = tmp.path().join("common.log");
    assert_eq!(read_lines(&active).len(), 1);
    assert!(list_backups(&active).unwrap().is_empty());
}

#[test]
fn out_of_range_max_age_survives_rotation() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(tmp.path()), "common.log", false),
        ConfigOption::rotation(1, 0, u32::MAX, false),
    ])
    .unwrap();

    let message = "y".repeat(600_000);
    logger.info(&message, &[]);
    logger.info(&message, &[]);

    let active = tmp.path().join("common.log");
    assert_eq!(read_lines(&active).len(), 1);
    assert_eq!(list_backups(&active).unwrap().len(), 1);
}
