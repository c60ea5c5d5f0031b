//! Tests for tiered logger construction and severity routing.

mod common;

use common::{SharedBuf, columns, dir_string, read_lines};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use tierlog::fmt::ConsoleEncoder;
use tierlog::output::TierWriter;
use tierlog::rotation::RotatingFile;
use tierlog::{ConfigOption, Error, Field, Level, Logger, LoggerConfig, RotationPolicy, Tier};

fn three_tier_config(dir: &Path) -> LoggerConfig {
    let dir = dir_string(dir);
    LoggerConfig::new()
        .common_log(&dir, "common.log", false)
        .info_log(&dir, "info.log", false)
        .error_log(&dir, "error.log", false)
}

fn levels_in(path: &Path) -> Vec<String> {
    read_lines(path)
        .iter()
        .map(|line| columns(line)[1].to_string())
        .collect()
}

#[test]
fn no_active_tier_fails() {
    let err = Logger::from_config(&LoggerConfig::new()).unwrap_err();
    assert!(matches!(err, Error::NoSinksConfigured));

    let err = Logger::from_options([ConfigOption::common_log("logs", "", true)]).unwrap_err();
    assert!(matches!(err, Error::NoSinksConfigured));
}

#[test]
fn one_output_per_active_tier() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_config(&three_tier_config(tmp.path())).unwrap();
    assert_eq!(logger.output_count(), 3);

    let single = Logger::from_options([ConfigOption::error_log(
        dir_string(tmp.path()),
        "error.log",
        false,
    )])
    .unwrap();
    assert_eq!(single.output_count(), 1);
    assert!(!single.enabled(Level::Warn));
    assert!(single.enabled(Level::Error));
}

#[test]
fn records_reach_tiers_at_or_above_floor() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_config(&three_tier_config(tmp.path())).unwrap();

    logger.debug("d", &[]);
    logger.info("i", &[]);
    logger.warn("w", &[]);
    logger.error("e", &[]);
    logger.flush().unwrap();

    assert_eq!(
        levels_in(&tmp.path().join("common.log")),
        vec!["DEBUG", "INFO", "WARN", "ERROR"]
    );
    assert_eq!(
        levels_in(&tmp.path().join("info.log")),
        vec!["INFO", "WARN", "ERROR"]
    );
    assert_eq!(levels_in(&tmp.path().join("error.log")), vec!["ERROR"]);
}

#[test]
fn error_record_is_identical_in_every_tier() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_config(&three_tier_config(tmp.path())).unwrap();

    logger.error("boom", &[Field::new("code", 7)]);

    let common = read_lines(&tmp.path().join("common.log"));
    let info = read_lines(&tmp.path().join("info.log"));
    let error = read_lines(&tmp.path().join("error.log"));
    assert_eq!(common.len(), 1);
    assert_eq!(common, info);
    assert_eq!(common, error);
}

#[test]
fn line_carries_caller_message_and_fields() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([ConfigOption::common_log(
        dir_string(tmp.path()),
        "common.log",
        false,
    )])
    .unwrap();

    let line_no = line!() + 1;
    logger.info("user logged in", &[Field::new("user", "alice"), Field::new("attempt", 2)]);

    let lines = read_lines(&tmp.path().join("common.log"));
    let cols = columns(&lines[0]);
    assert_eq!(cols[1], "INFO");
    assert_eq!(cols[2], format!("tests/tiers.rs:{line_no}"));
    assert_eq!(cols[3], "user logged in");
    assert_eq!(cols[4], r#"{"user":"alice","attempt":2}"#);
}

#[test]
fn formatted_variants_render_arguments() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([ConfigOption::common_log(
        dir_string(tmp.path()),
        "common.log",
        false,
    )])
    .unwrap();

    logger.debugf(format_args!("{} of {}", 1, 2));
    logger.warnf(format_args!("retry in {}s", 5));

    let lines = read_lines(&tmp.path().join("common.log"));
    assert_eq!(columns(&lines[0])[3], "1 of 2");
    assert_eq!(columns(&lines[1])[1], "WARN");
    assert_eq!(columns(&lines[1])[3], "retry in 5s");
}

#[test]
fn context_fields_come_first() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([ConfigOption::common_log(
        dir_string(tmp.path()),
        "common.log",
        false,
    )])
    .unwrap();
    let request = logger.with([Field::new("req", "r-1")]);

    request.info("handled", &[Field::new("ms", 12)]);
    logger.info("plain", &[]);

    let lines = read_lines(&tmp.path().join("common.log"));
    assert_eq!(columns(&lines[0])[4], r#"{"req":"r-1","ms":12}"#);
    assert_eq!(columns(&lines[1]).len(), 4);
}

#[test]
fn configured_time_format_is_used() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(tmp.path()), "common.log", false),
        ConfigOption::time_format("%Y/%m/%d"),
    ])
    .unwrap();

    logger.info("x", &[]);

    let lines = read_lines(&tmp.path().join("common.log"));
    let ts = columns(&lines[0])[0];
    assert_eq!(ts.len(), 10);
    assert_eq!(ts.matches('/').count(), 2);
}

#[test]
fn default_time_format_has_milliseconds() {
    let tmp = tempdir().unwrap();
    let logger = Logger::from_options([ConfigOption::common_log(
        dir_string(tmp.path()),
        "common.log",
        false,
    )])
    .unwrap();

    logger.info("x", &[]);

    let lines = read_lines(&tmp.path().join("common.log"));
    let ts = columns(&lines[0])[0];
    // 2024-03-09 07:05:01.123
    assert_eq!(ts.len(), 23);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], " ");
    assert_eq!(&ts[19..20], ".");
}

#[test]
fn directory_failure_aborts_before_later_tiers() {
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("blocked");
    fs::write(&blocker, "file, not dir").unwrap();
    let info_dir = tmp.path().join("info");

    let err = Logger::from_options([
        ConfigOption::common_log(dir_string(&tmp.path().join("common")), "common.log", false),
        ConfigOption::error_log(dir_string(&blocker), "error.log", false),
        ConfigOption::info_log(dir_string(&info_dir), "info.log", false),
    ])
    .unwrap_err();

    match &err {
        Error::DirectoryCreationFailed { tier, .. } => assert_eq!(*tier, Tier::Error),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!info_dir.exists());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn mirrored_tier_writes_same_bytes_to_console() {
    let tmp = tempdir().unwrap();
    let console = SharedBuf::default();
    let path = tmp.path().join("common.log");
    let writer = TierWriter::new(RotatingFile::new(&path, RotationPolicy::default()))
        .mirror_to(console.clone());

    let logger = Logger::builder()
        .tier(Tier::Common, Arc::new(ConsoleEncoder::default()), writer)
        .build();

    logger.info("hello world", &[]);
    logger.debug("hello world", &[]);
    logger.flush().unwrap();

    let file = fs::read_to_string(&path).unwrap();
    assert_eq!(console.contents(), file);
    assert_eq!(levels_in(&path), vec!["INFO", "DEBUG"]);
}

#[test]
fn common_tier_scenario() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("logs");
    let logger = Logger::from_options([
        ConfigOption::common_log(dir_string(&dir), "common.log", true),
        ConfigOption::time_format("%Y-%m-%d %H:%M:%S%.3f"),
    ])
    .unwrap();

    logger.info("hello world", &[]);
    logger.debug("hello world", &[]);
    logger.flush().unwrap();

    let lines = read_lines(&dir.join("common.log"));
    assert_eq!(lines.len(), 2);
    assert_eq!(columns(&lines[0])[1], "INFO");
    assert_eq!(columns(&lines[1])[1], "DEBUG");
    assert_eq!(columns(&lines[0])[0].len(), 23);
}
