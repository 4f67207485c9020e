//! Reference list file format.
//!
//! A reference list is plain UTF-8 text, one filename per line. The reader
//! trims each line and drops blanks and `#` comments; the writer emits
//! exactly one name per line with a trailing newline and nothing else.

use std::fs;
use std::path::Path;

/// Read the filenames out of a reference file, in file order.
///
/// Duplicates are kept as-is; deciding what to do with them is the
/// caller's business. An empty result is not an error here.
pub fn read_reference_list(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read reference file {}: {e}", path.display()))?;

    let names = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    Ok(names)
}

/// Write `names` to `path`, replacing any existing file.
pub fn write_reference_list(path: &Path, names: &[String]) -> Result<(), String> {
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }

    fs::write(path, out)
        .map_err(|e| format!("Failed to write reference file {}: {e}", path.display()))
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
