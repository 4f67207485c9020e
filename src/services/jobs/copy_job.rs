//! The copy run: read reference list, resolve against the source tree,
//! copy the matches, summarize.

use std::collections::HashSet;
use std::path::Path;

use crate::services::copier::engine::{copy_resolved, CopyFailure};
use crate::services::copier::resolver::resolve_files;
use crate::services::core::operation_lock::OperationLock;
use crate::services::reference::list::read_reference_list;
use crate::types::errors::{CoreError, CoreResult};
use crate::types::events::{ProgressPayload, ShellEmitter};

use serde::Serialize;

/// Share of the combined progress bar spent searching; copying fills the
/// remainder.
const SEARCH_PROGRESS_SHARE: f64 = 0.3;

/// Terminal summary of a copy run.
#[derive(Debug, Clone, Serialize)]
pub struct CopyRunSummary {
    /// Names in the reference list (as read, duplicates included).
    pub requested: usize,
    /// Names that resolved to a source file.
    pub found: usize,
    /// Files actually copied.
    pub copied: usize,
    /// Per-file copy failures.
    pub failures: Vec<CopyFailure>,
    /// Names with no match anywhere under the source root, in list order.
    pub not_found: Vec<String>,
}

/// Run the full reference-driven copy pipeline.
///
/// Fails up front (nothing touched) on a missing reference file, an empty
/// list, an invalid source directory, or a copy run already in flight.
/// Per-file problems after that point are folded into the summary instead
/// of aborting.
pub async fn run_copy(
    lock: &OperationLock,
    emitter: &dyn ShellEmitter,
    reference_file: &Path,
    source_dir: &Path,
    dest_dir: &Path,
) -> CoreResult<CopyRunSummary> {
    let _guard = lock
        .try_acquire()
        .map_err(|_| CoreError::Busy("Copy operation is already in progress.".to_string()))?;

    if !source_dir.is_dir() {
        return Err(CoreError::Precondition(format!(
            "Source directory does not exist: {}",
            source_dir.display()
        )));
    }

    let wanted = read_reference_list(reference_file).map_err(CoreError::Precondition)?;
    if wanted.is_empty() {
        return Err(CoreError::Precondition(
            "No valid file names found in reference file.".to_string(),
        ));
    }

    emitter.log_info(&format!(
        "Found {} files to copy in reference file.",
        wanted.len()
    ));
    emitter.log_info(&format!(
        "Searching for files in '{}'...",
        source_dir.display()
    ));
    emitter.emit_progress(ProgressPayload {
        label: "Searching for files...".to_string(),
        fraction: 0.0,
        active: true,
    });

    let resolution = resolve_files(&wanted, source_dir, |resolved, total| {
        emitter.emit_progress(ProgressPayload {
            label: "Searching for files...".to_string(),
            fraction: resolved as f64 / total as f64 * SEARCH_PROGRESS_SHARE,
            active: true,
        });
    })
    .map_err(CoreError::Precondition)?;

    // Absence from the resolution map is the only "not found" signal.
    let resolved_names: HashSet<&str> = resolution.names().collect();
    let mut reported: HashSet<&str> = HashSet::new();
    let mut not_found = Vec::new();
    for name in &wanted {
        if resolved_names.contains(name.as_str()) || !reported.insert(name.as_str()) {
            continue;
        }
        log::warn!("File '{name}' not found in source directory");
        emitter.log_warn(&format!("File '{name}' not found in source directory."));
        not_found.push(name.clone());
    }

    emitter.log_info(&format!(
        "Found {} out of {} files in source directory.",
        resolution.len(),
        wanted.len()
    ));

    if resolution.is_empty() {
        emitter.log_warn("No files found in source directory!");
        emitter.emit_progress(ProgressPayload {
            label: "No files to copy.".to_string(),
            fraction: 1.0,
            active: false,
        });
        return Ok(CopyRunSummary {
            requested: wanted.len(),
            found: 0,
            copied: 0,
            failures: Vec::new(),
            not_found,
        });
    }

    emitter.log_info("Starting file copy operation...");
    emitter.log_info(&format!("Source: {}", source_dir.display()));
    emitter.log_info(&format!("Destination: {}", dest_dir.display()));
    emitter.log_info(&"-".repeat(50));

    let total = resolution.len();
    let outcome = copy_resolved(&resolution, dest_dir, emitter, |copied, total| {
        emitter.emit_progress(ProgressPayload {
            label: format!("Copying files... {copied}/{total}"),
            fraction: SEARCH_PROGRESS_SHARE
                + copied as f64 / total as f64 * (1.0 - SEARCH_PROGRESS_SHARE),
            active: true,
        });
    })
    .map_err(CoreError::Io)?;

    emitter.log_info(&"-".repeat(50));
    emitter.log_info(&format!(
        "Successfully copied {} out of {} files.",
        outcome.copied.len(),
        total
    ));
    emitter.emit_progress(ProgressPayload {
        label: format!("Completed! {}/{} files copied.", outcome.copied.len(), total),
        fraction: 1.0,
        active: false,
    });

    Ok(CopyRunSummary {
        requested: wanted.len(),
        found: total,
        copied: outcome.copied.len(),
        failures: outcome.failures,
        not_found,
    })
}

#[cfg(test)]
#[path = "tests/copy_job_tests.rs"]
mod tests;
