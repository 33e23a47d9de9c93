//! # DFN Format
//!
//! Whole-novel flat text files (`.dfn`).
//!
//! ```text
//! [title]<novel title>[/title]
//!
//! ---CHAPTER: <chapter title>---
//! [status]<status>[/status]
//! <chapter content, blank for a chapter with extracts>
//!
//! ---EXTRACT: <extract title>---
//! [status]<status>[/status]
//! <extract content>
//! ```
//!
//! Export is lossless for titles, statuses and content that does not itself
//! contain marker lines or leading/trailing whitespace. Import always yields a
//! well-formed novel with fresh ids.

mod filename;
mod reader;
mod writer;

pub use filename::{export_filename, EXTENSION};
pub use reader::{classify, import, Line, FALLBACK_TITLE};
pub use writer::{export, DfnWriter, Marker};

use dfn_editor::{IdGenerator, Novel};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Import a `.dfn` file; ids are seeded from the file name
pub fn read_file(path: &Path) -> Result<Novel, FormatError> {
    let text = fs::read_to_string(path).map_err(|source| FormatError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let mut ids = IdGenerator::new(&name);
    Ok(import(&text, &mut ids))
}

/// Export `novel` into `dir` under its derived file name
pub fn write_file(novel: &Novel, dir: &Path) -> Result<PathBuf, FormatError> {
    let path = dir.join(export_filename(&novel.title));
    let write_err = |source| FormatError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(write_err)?;
    fs::write(&path, export(novel)).map_err(write_err)?;
    Ok(path)
}
