use super::open_novel;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dfn_editor::{search, SearchMatch};
use std::path::{Path, PathBuf};

const CONTEXT_CHARS: usize = 30;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Text to search for (case-insensitive, literal)
    pub query: String,

    /// Novel file (.dfn or .json); defaults to the store
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn find(args: FindArgs, cwd: &Path) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => Config::load(cwd)?.store_path(cwd),
    };
    let novel = open_novel(&input)?;
    let matches = search(&novel, &args.query);

    if matches.is_empty() {
        println!("{} No matches for \"{}\"", "⚠️".yellow(), args.query);
        return Ok(());
    }

    println!(
        "🔍 {} matches for \"{}\" in {}",
        matches.len().to_string().bold(),
        args.query,
        input.display()
    );

    for found in &matches {
        let Some(slide) = novel.slide(&found.slide_id) else {
            continue;
        };
        let (before, hit, after) = snippet(&slide.content, found, CONTEXT_CHARS);
        println!(
            "  {} {}{}{}",
            format!("{}:", slide.title).bright_white(),
            before.dimmed(),
            hit.red().bold(),
            after.dimmed()
        );
    }

    Ok(())
}

/// Up to `radius` chars either side of a match, on one line
pub fn snippet(content: &str, found: &SearchMatch, radius: usize) -> (String, String, String) {
    let flatten = |s: &str| s.replace(['\n', '\r'], " ");

    let head = &content[..found.start];
    let skip = head.chars().count().saturating_sub(radius);
    let before: String = head.chars().skip(skip).collect();
    let after: String = content[found.end..].chars().take(radius).collect();

    (
        flatten(&before),
        flatten(&content[found.start..found.end]),
        flatten(&after),
    )
}
