//! Synchronous file I/O operations.
//!
//! Reads are size-limited and binary-rejecting; writes go through a temp file
//! in the destination directory and are renamed into place.

use std::fs as std_fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size and binary checks (synchronous).
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Returns
/// Decoded text content or an error.
///
/// # Example
///
/// ```rust,ignore
/// use omni_io::read_text_safe;
///
/// let content = read_text_safe("src/pages/Reports.js", 10 * 1024 * 1024)?;
/// ```
///
/// # Errors
/// `NotFound`, `TooLarge`, `BinaryFile`, `Encoding` or `Read`.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();
    let shown = path.to_string_lossy().to_string();

    let metadata = std_fs::metadata(path).map_err(|_| IoError::NotFound(shown.clone()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge {
            path: shown,
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let read_err = |source| IoError::Read {
        path: shown.clone(),
        source,
    };
    let mut file = std_fs::File::open(path).map_err(read_err)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer).map_err(read_err)?;

    debug!(path = %shown, bytes = buffer.len(), "read text file");
    decode_buffer(buffer, &shown)
}

/// Replace the contents of `path` with `content` atomically.
///
/// The text is written and flushed to a temp file next to `path`, then
/// renamed over it, so readers see either the old or the new file and a
/// crash never leaves a truncated one. Permissions of an existing target
/// are carried over to the new file. A symlinked `path` is resolved first,
/// so the link stays in place and its target receives the new text.
///
/// # Errors
/// `IoError::Write` naming `path` when any step fails; the target is
/// untouched in that case.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let requested = path.as_ref();
    // Rename replaces a symlink itself; write through to its target instead.
    let resolved = std_fs::canonicalize(requested).ok();
    let path = resolved.as_deref().unwrap_or(requested);
    let write_err = |source| IoError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(content.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = std_fs::metadata(path) {
        std_fs::set_permissions(temp.path(), metadata.permissions()).map_err(write_err)?;
    }

    temp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "persisted text file");
    Ok(())
}
