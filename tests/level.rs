//! Tests for log level functionality.

use tierlog::{Level, Tier};

#[test]
fn level_ordering() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
}

#[test]
fn level_display() {
    assert_eq!(Level::Debug.to_string(), "debug");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Level::Warn.to_string(), "warn");
    assert_eq!(Level::Error.to_string(), "error");
}

#[test]
fn level_capital_names() {
    let names: Vec<&str> = Level::all().iter().map(|l| l.as_capital_str()).collect();
    assert_eq!(names, vec!["DEBUG", "INFO", "WARN", "ERROR"]);
}

#[test]
fn level_from_str() {
    assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
}

#[test]
fn level_from_str_invalid() {
    let err = "trace".parse::<Level>().unwrap_err();
    assert_eq!(err.input(), "trace");
    let err: tierlog::Error = err.into();
    assert_eq!(err.to_string(), "invalid level: trace");
}

#[test]
fn tier_floors() {
    assert_eq!(Tier::Common.floor(), Level::Debug);
    assert_eq!(Tier::Info.floor(), Level::Info);
    assert_eq!(Tier::Error.floor(), Level::Error);
}

#[test]
fn tier_accepts_levels_at_or_above_floor() {
    let accepted: Vec<usize> = [Tier::Common, Tier::Info, Tier::Error]
        .iter()
        .map(|tier| Level::all().iter().filter(|l| **l >= tier.floor()).count())
        .collect();
    assert_eq!(accepted, vec![4, 3, 1]);
    assert!(Level::Warn >= Tier::Info.floor());
    assert!(Level::Warn < Tier::Error.floor());
}
