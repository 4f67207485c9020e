//! The build run: validate archive inputs, mine them for filenames, write
//! the reference list.

use std::path::{Path, PathBuf};

use crate::services::core::operation_lock::OperationLock;
use crate::services::reference::builder::{build_reference, BuildOutcome, SCAN_PROGRESS_SHARE};
use crate::types::errors::{CoreError, CoreResult};
use crate::types::events::{ProgressPayload, ShellEmitter};
use crate::REFERENCE_FILE_NAME;

/// Build a reference list from `archive_paths` into
/// `output_dir/stz_ref.txt`.
///
/// Fails up front (nothing written) when no archives are supplied, an
/// archive path is missing, the output directory does not exist, or a
/// build run is already in flight. An archive that exists but cannot be
/// parsed is a per-archive failure inside the outcome, not an abort.
pub async fn run_build(
    lock: &OperationLock,
    emitter: &dyn ShellEmitter,
    archive_paths: &[PathBuf],
    output_dir: &Path,
) -> CoreResult<BuildOutcome> {
    let _guard = lock
        .try_acquire()
        .map_err(|_| CoreError::Busy("Build operation is already in progress.".to_string()))?;

    if archive_paths.is_empty() {
        return Err(CoreError::Precondition(
            "Please select at least one zip file.".to_string(),
        ));
    }
    for path in archive_paths {
        if !path.is_file() {
            return Err(CoreError::Precondition(format!(
                "Zip file does not exist: {}",
                path.display()
            )));
        }
    }
    if !output_dir.is_dir() {
        return Err(CoreError::Precondition(format!(
            "Output directory does not exist: {}",
            output_dir.display()
        )));
    }

    let output_path = output_dir.join(REFERENCE_FILE_NAME);

    emitter.log_info("Starting reference file building process...");
    emitter.emit_progress(ProgressPayload {
        label: "Building reference file...".to_string(),
        fraction: 0.0,
        active: true,
    });

    // The builder's own fraction is already phased (scan then write), so it
    // maps onto the whole bar unscaled.
    let outcome = build_reference(archive_paths, &output_path, emitter, |fraction| {
        let label = if fraction <= SCAN_PROGRESS_SHARE {
            "Scanning zip files..."
        } else {
            "Writing reference file..."
        };
        emitter.emit_progress(ProgressPayload {
            label: label.to_string(),
            fraction,
            active: true,
        });
    })
    .map_err(CoreError::Io)?;

    emitter.log_info(&"-".repeat(50));
    emitter.log_info(&format!(
        "Reference file created: {}",
        outcome.output_path.display()
    ));
    emitter.log_info(&format!("Total files listed: {}", outcome.unique_files));
    emitter.emit_progress(ProgressPayload {
        label: "Reference file created successfully!".to_string(),
        fraction: 1.0,
        active: false,
    });

    Ok(outcome)
}

#[cfg(test)]
#[path = "tests/build_job_tests.rs"]
mod tests;
