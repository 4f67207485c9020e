//! Builds a reference list by mining ZIP archives for filenames.
//!
//! Each archive's directory is listed without extracting anything; entry
//! names are reduced to their basenames, pooled across all archives, and
//! deduplicated with first-seen order kept. One unreadable archive is
//! reported and skipped, never fatal to the build.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::reference::list::write_reference_list;
use crate::types::events::ShellEmitter;

use serde::Serialize;

/// Share of the build progress spent scanning archives; the remainder is
/// the write phase.
pub const SCAN_PROGRESS_SHARE: f64 = 0.8;

/// An archive that could not be opened or parsed during a build.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveFailure {
    pub path: String,
    pub error: String,
}

/// Entry tally for one successfully scanned archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveCount {
    pub path: String,
    pub entries: usize,
}

/// Terminal summary of a reference build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub output_path: PathBuf,
    pub archives_scanned: usize,
    pub entry_counts: Vec<ArchiveCount>,
    pub unique_files: usize,
    pub failures: Vec<ArchiveFailure>,
}

/// List the file basenames stored in a ZIP archive, in archive order.
///
/// Directory entries (names ending in a path separator) are dropped, as are
/// entries whose basename is empty. Backslash separators are normalized so
/// archives built on Windows tooling list the same way.
pub fn list_archive_basenames(archive_path: &Path) -> Result<Vec<String>, String> {
    let file = fs::File::open(archive_path).map_err(|e| format!("Failed to open archive: {e}"))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| format!("Failed to read ZIP: {e}"))?;

    let mut names = Vec::new();
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| format!("Failed to read entry: {e}"))?;
        let normalized = entry.name().replace('\\', "/");
        if normalized.ends_with('/') {
            continue;
        }
        if let Some(base) = normalized.rsplit('/').next() {
            if !base.is_empty() {
                names.push(base.to_string());
            }
        }
    }

    Ok(names)
}

/// Drop later duplicates, keeping each name at its first occurrence.
pub fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Scan `archive_paths` in order and write the deduplicated basename list
/// to `output_path`.
///
/// Progress is a monotonic fraction of the whole build: the archive scan
/// covers `[0, 0.8]` split evenly per archive, the write covers the rest.
/// A failed archive still advances progress and ends up in
/// [`BuildOutcome::failures`]; a failed write aborts the build.
pub fn build_reference(
    archive_paths: &[PathBuf],
    output_path: &Path,
    emitter: &dyn ShellEmitter,
    mut on_progress: impl FnMut(f64),
) -> Result<BuildOutcome, String> {
    if archive_paths.is_empty() {
        return Err("No archives supplied".to_string());
    }

    let total = archive_paths.len();
    let mut all_names = Vec::new();
    let mut entry_counts = Vec::new();
    let mut failures = Vec::new();

    for (i, archive_path) in archive_paths.iter().enumerate() {
        let display = display_name(archive_path);
        emitter.log_info(&format!("Processing: {display}"));

        match list_archive_basenames(archive_path) {
            Ok(names) => {
                emitter.log_info(&format!("Found {} files in {display}", names.len()));
                entry_counts.push(ArchiveCount {
                    path: archive_path.to_string_lossy().to_string(),
                    entries: names.len(),
                });
                all_names.extend(names);
            }
            Err(e) => {
                log::warn!("Skipping archive {}: {e}", archive_path.display());
                emitter.log_error(&format!("Error processing {display}: {e}"));
                failures.push(ArchiveFailure {
                    path: archive_path.to_string_lossy().to_string(),
                    error: e,
                });
            }
        }

        on_progress((i + 1) as f64 / total as f64 * SCAN_PROGRESS_SHARE);
    }

    let unique = dedup_preserving_order(all_names);
    emitter.log_info(&format!("Total unique files found: {}", unique.len()));

    write_reference_list(output_path, &unique)?;
    on_progress(1.0);

    Ok(BuildOutcome {
        output_path: output_path.to_path_buf(),
        archives_scanned: entry_counts.len(),
        entry_counts,
        unique_files: unique.len(),
        failures,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
