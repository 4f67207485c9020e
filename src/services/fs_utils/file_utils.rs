use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Copy a file and carry its metadata along.
///
/// `std::fs::copy` brings the contents and permission bits; the source's
/// modification time is then mirrored onto the destination so copied files
/// sort and diff like the originals. An existing destination file is
/// truncated and overwritten.
pub fn copy_with_metadata(from: &Path, to: &Path) -> std::io::Result<u64> {
    let bytes = fs::copy(from, to)?;

    let meta = fs::metadata(from)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_mtime(to, mtime)?;

    Ok(bytes)
}
