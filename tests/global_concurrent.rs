//! Concurrent callers of `init` all observe the single first result.

mod common;

use common::dir_string;
use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;
use tierlog::LoggerConfig;

#[test]
fn concurrent_init_builds_once() {
    let tmp = tempdir().unwrap();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            let dir = dir_string(&tmp.path().join(format!("t{i}")));
            thread::spawn(move || {
                barrier.wait();
                let logger = tierlog::init(LoggerConfig::new().common_log(dir, "common.log", false))
                    .unwrap();
                std::ptr::from_ref(logger) as usize
            })
        })
        .collect();

    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));

    let created = fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(created, 1);
}
