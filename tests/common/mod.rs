//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Console stand-in that keeps everything written to it.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lines of a log file, or nothing if it does not exist.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Tab-separated columns of an encoded line.
pub fn columns(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

pub fn dir_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
