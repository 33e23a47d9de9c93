pub mod check;
pub mod convert;
pub mod find;
pub mod init;
pub mod replace;
pub mod stats;

pub use check::{check, CheckArgs};
pub use convert::{convert, ConvertArgs};
pub use find::{find, FindArgs};
pub use init::{init, InitArgs};
pub use replace::{replace, ReplaceArgs};
pub use stats::{stats, StatsArgs};

use anyhow::{anyhow, bail, Context, Result};
use colored::{ColoredString, Colorize};
use dfn_editor::{JsonFileStore, Novel, NovelStore, SlideStatus};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk novel formats, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NovelFile {
    Dfn,
    Json,
}

impl NovelFile {
    pub fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(dfn_format::EXTENSION) => Ok(NovelFile::Dfn),
            Some("json") => Ok(NovelFile::Json),
            _ => bail!("Unsupported file type: {} (expected .dfn or .json)", path.display()),
        }
    }
}

pub fn open_novel(path: &Path) -> Result<Novel> {
    match NovelFile::of(path)? {
        NovelFile::Dfn => Ok(dfn_format::read_file(path)?),
        NovelFile::Json => JsonFileStore::new(path)
            .load()
            .with_context(|| format!("Failed to load {}", path.display()))?
            .ok_or_else(|| anyhow!("No novel at {}", path.display())),
    }
}

pub fn save_novel(novel: &Novel, path: &Path) -> Result<()> {
    match NovelFile::of(path)? {
        NovelFile::Dfn => fs::write(path, dfn_format::export(novel))
            .with_context(|| format!("Failed to write {}", path.display())),
        NovelFile::Json => Ok(JsonFileStore::new(path).save(novel)?),
    }
}

/// The file itself, or every .dfn file below a directory
pub fn resolve_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else if path.is_dir() {
        Ok(find_dfn_files(path))
    } else {
        bail!("Input path does not exist: {}", path.display())
    }
}

fn find_dfn_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(dfn_format::EXTENSION))
        .collect();
    files.sort();
    files
}

pub fn status_label(status: &SlideStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        SlideStatus::Draft => label.dimmed(),
        SlideStatus::NeedsReview => label.yellow(),
        SlideStatus::Complete => label.green(),
        SlideStatus::Other(_) => label.normal(),
    }
}
