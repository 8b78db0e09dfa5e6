//! Binary detection and strict UTF-8 decoding.
//!
//! Edited files are written back, so decoding never substitutes U+FFFD:
//! a lossy round trip would silently corrupt the target.

use memchr::memchr;

use crate::error::IoError;

/// Number of leading bytes scanned for NULL.
const BINARY_PROBE_LEN: usize = 8192;

/// Quick binary detection - checks first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), BINARY_PROBE_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes read from `path` into a `String`.
///
/// # Errors
/// Returns `IoError::BinaryFile` when binary content is detected and
/// `IoError::Encoding` with the offset of the first invalid sequence when
/// the buffer is not UTF-8.
pub fn decode_buffer(buffer: Vec<u8>, path: &str) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile(path.to_string()));
    }

    String::from_utf8(buffer).map_err(|e| IoError::Encoding {
        path: path.to_string(),
        offset: e.utf8_error().valid_up_to(),
    })
}
