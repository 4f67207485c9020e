//! Tree search that maps wanted filenames to actual files.
//!
//! One recursive pass over the source tree resolves every wanted name it
//! can; a name that never matches is simply absent from the result, which
//! is the caller's "not found" signal.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A wanted filename and the source file chosen for it.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub name: String,
    pub source_path: PathBuf,
}

/// Wanted filename → resolved source path, in wanted-list order.
///
/// Keys are unique; a duplicate wanted name resolves once, at its first
/// occurrence. Built by [`resolve_files`] and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResolutionMap {
    entries: Vec<ResolvedFile>,
}

impl ResolutionMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResolvedFile] {
        &self.entries
    }

    /// Resolved names, in map order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.source_path.as_path())
    }
}

/// Search `source_root` recursively and pick a source file for each wanted
/// filename.
///
/// Traversal is depth-first with each directory's entries visited in
/// lexicographic file-name order, and the first file whose name equals a
/// wanted name wins; later same-named files anywhere else in the tree are
/// ignored. Names are compared byte-for-byte as the filesystem reports
/// them, with no case or Unicode normalization. The walk stops early once
/// every wanted name has been resolved, and never mutates the tree.
///
/// `on_progress` receives `(resolved_so_far, wanted_total)` as matches
/// land, plus a final completion tick.
pub fn resolve_files(
    wanted: &[String],
    source_root: &Path,
    mut on_progress: impl FnMut(usize, usize),
) -> Result<ResolutionMap, String> {
    if !source_root.exists() {
        return Err(format!(
            "Source directory does not exist: {}",
            source_root.display()
        ));
    }
    if !source_root.is_dir() {
        return Err(format!(
            "Source path is not a directory: {}",
            source_root.display()
        ));
    }

    let total = wanted.len();
    if total == 0 {
        return Ok(ResolutionMap::default());
    }

    let mut pending: HashSet<&str> = wanted.iter().map(String::as_str).collect();
    let mut found: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if pending.remove(name.as_str()) {
            found.insert(name, entry.into_path());
            on_progress(found.len(), total);
            if pending.is_empty() {
                break;
            }
        }
    }

    // Re-order into wanted-list order, first occurrence per name.
    let mut entries = Vec::with_capacity(found.len());
    for name in wanted {
        if let Some(source_path) = found.remove(name) {
            entries.push(ResolvedFile {
                name: name.clone(),
                source_path,
            });
        }
    }

    on_progress(total, total);
    Ok(ResolutionMap { entries })
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
