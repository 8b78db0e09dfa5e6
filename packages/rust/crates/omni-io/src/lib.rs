#![allow(clippy::doc_markdown)]

//! omni-io - Safe file I/O for Omni Splice
//!
//! Reads and writes whole text documents for in-place source patching.
//!
//! # Features
//!
//! - **Safety**: Binary detection, size limits and strict UTF-8
//! - **Atomic writes**: Temp file in the target directory, then rename
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! └── sync.rs     # Read / atomic write API
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{read_text_safe, write_text_atomic};
//!
//! let content = read_text_safe("Reports.js", 10 * 1024 * 1024)?;
//! write_text_atomic("Reports.js", &content.replace("a", "b"))?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod detect;
mod error;
mod sync;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use error::IoError;
pub use sync::{read_text_safe, write_text_atomic};

// Re-export detection utilities for advanced use
pub use detect::{decode_buffer, is_binary};
