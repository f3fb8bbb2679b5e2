#![allow(dead_code)]

use connectors::sql::sqlite::adapter::SqliteBackend;
use engine_core::settings::{IngestSettings, IngestSettingsBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod fake;
pub mod integration;
pub mod utils;

/// Header plus three well-formed rows, reused by several scenarios.
pub const PLAYERS_TSV: &str = "id\tname\tscore\n1\tleo\t9.5\n2\tmia\t7.25\n3\tzoe\t8\n";

/// Fresh private in-memory database.
pub fn memory_db() -> SqliteBackend {
    SqliteBackend::open_in_memory().expect("open in-memory sqlite")
}

pub fn settings(flush_threshold: usize) -> IngestSettings {
    IngestSettingsBuilder::new()
        .flush_threshold(flush_threshold)
        .build()
        .expect("valid settings")
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write source file");
    path
}

/// `count` data rows of `id\tlabel`, preceded by the header.
pub fn numbered_rows(count: usize) -> String {
    let mut out = String::from("id\tlabel\n");
    for i in 1..=count {
        out.push_str(&format!("{i}\trow{i}\n"));
    }
    out
}
