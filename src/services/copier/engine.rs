//! Copies resolved files into a destination directory.
//!
//! A collision is overwritten with a warning, and a single failed copy is
//! recorded and skipped past; only failing to create the destination
//! directory aborts the batch.

use std::fs;
use std::path::Path;

use crate::services::copier::resolver::ResolutionMap;
use crate::services::fs_utils::file_utils::copy_with_metadata;
use crate::types::events::ShellEmitter;

use serde::Serialize;

/// One file that could not be copied, and why.
#[derive(Debug, Clone, Serialize)]
pub struct CopyFailure {
    pub name: String,
    pub error: String,
}

/// Per-file outcome of a copy batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CopyBatchResult {
    pub copied: Vec<String>,
    pub failures: Vec<CopyFailure>,
}

impl CopyBatchResult {
    pub fn attempted(&self) -> usize {
        self.copied.len() + self.failures.len()
    }
}

/// Copy every resolved file into `dest_root`, creating it (and missing
/// parents) first.
///
/// Files are copied in map order with contents, permission bits, and
/// modification time carried over. `on_progress` receives
/// `(copied_so_far, total)` after each success; failures do not advance
/// the count.
pub fn copy_resolved(
    resolution: &ResolutionMap,
    dest_root: &Path,
    emitter: &dyn ShellEmitter,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<CopyBatchResult, String> {
    fs::create_dir_all(dest_root).map_err(|e| {
        format!(
            "Failed to create destination directory {}: {e}",
            dest_root.display()
        )
    })?;

    let total = resolution.len();
    let mut result = CopyBatchResult::default();

    for resolved in resolution.entries() {
        let dest_path = dest_root.join(&resolved.name);

        if dest_path.exists() {
            log::warn!(
                "'{}' already exists in destination, overwriting",
                resolved.name
            );
            emitter.log_warn(&format!(
                "'{}' already exists in destination. Overwriting...",
                resolved.name
            ));
        }

        match copy_with_metadata(&resolved.source_path, &dest_path) {
            Ok(_) => {
                result.copied.push(resolved.name.clone());
                emitter.log_info(&format!("Copied: {}", resolved.name));
                on_progress(result.copied.len(), total);
            }
            Err(e) => {
                log::error!("Failed to copy '{}': {e}", resolved.name);
                emitter.log_error(&format!("Error copying '{}': {e}", resolved.name));
                result.failures.push(CopyFailure {
                    name: resolved.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
