#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub fn init_tracing() {
    driver_sut_test_utils::init_tracing();
}

/// Write `contents` to a fresh temporary `.ini` file.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
