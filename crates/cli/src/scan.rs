use connectors::sql::base::adapter::StorageBackend;
use engine_core::{
    error::IngestionError, loader::ingest_file, metrics::IngestionCounters, report::IngestReport,
    settings::IngestSettings,
};
use serde::Serialize;
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};

/// Files a scan will try to load, plus the matching entries it cannot.
#[derive(Debug, Default)]
pub struct ScanCandidates {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Entries in `dir` whose extension matches `extension` case-insensitively,
/// sorted by file name. Only readable regular files (symlinks followed) are
/// loadable; other matches are listed as skipped.
pub fn matching_files(dir: &Path, extension: &str) -> io::Result<ScanCandidates> {
    let wanted = extension.trim_start_matches('.');
    let mut matched = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
        {
            matched.push(path);
        }
    }
    matched.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut candidates = ScanCandidates::default();
    for path in matched {
        match check_loadable(&path) {
            Ok(()) => candidates.files.push(path),
            Err(reason) => {
                warn!("Skipping {}: {}", path.display(), reason);
                candidates.skipped.push(SkippedFile::new(&path, reason));
            }
        }
    }
    Ok(candidates)
}

fn check_loadable(path: &Path) -> Result<(), String> {
    let metadata = fs::metadata(path).map_err(|err| err.to_string())?;
    if !metadata.is_file() {
        return Err("not a regular file".to_string());
    }
    File::open(path).map(drop).map_err(|err| err.to_string())
}

/// Table-name hint for a scanned file: its name without the extension.
pub fn table_hint(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

impl SkippedFile {
    fn new(path: &Path, reason: impl Into<String>) -> Self {
        SkippedFile {
            file: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

/// Outcome of a directory scan.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub loaded: Vec<IngestReport>,
    pub failed: Vec<FailedFile>,
    /// Unreadable or non-regular entries with a matching extension.
    pub skipped: Vec<SkippedFile>,
    /// Files never started because of a shutdown request.
    pub interrupted: Vec<String>,
    pub totals: IngestionCounters,
}

impl ScanReport {
    pub fn record_loaded(&mut self, report: IngestReport) {
        self.totals.accumulate(&report.counters);
        self.loaded.push(report);
    }

    pub fn record_failed(&mut self, file: &Path, error: String) {
        self.failed.push(FailedFile {
            file: file.display().to_string(),
            error,
        });
    }
}

/// Loads every candidate in order through one backend.
///
/// The first failed load ends the scan with that error unless `keep_going` is set.
/// `stop_requested` is checked between files; the file in progress always finishes.
pub fn load_files<B, F>(
    backend: &mut B,
    candidates: ScanCandidates,
    settings: &IngestSettings,
    keep_going: bool,
    stop_requested: F,
) -> Result<ScanReport, IngestionError>
where
    B: StorageBackend,
    F: Fn() -> bool,
{
    let ScanCandidates { files, skipped } = candidates;
    let mut report = ScanReport {
        skipped,
        ..Default::default()
    };

    for (i, path) in files.iter().enumerate() {
        if stop_requested() {
            warn!("Shutdown requested; skipping {} remaining files", files.len() - i);
            report.interrupted = files[i..].iter().map(|p| p.display().to_string()).collect();
            break;
        }

        match ingest_file(backend, path, &table_hint(path), settings) {
            Ok(loaded) => report.record_loaded(loaded),
            Err(err) if keep_going => {
                error!("Failed to load {}: {}", path.display(), err);
                report.record_failed(path, err.to_string());
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        "Scan finished: {} files loaded, {} failed, {} skipped, {} rows inserted",
        report.loaded.len(),
        report.failed.len(),
        report.skipped.len(),
        report.totals.rows_inserted
    );
    Ok(report)
}
