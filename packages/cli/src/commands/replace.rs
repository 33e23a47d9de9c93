use super::{open_novel, save_novel};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dfn_editor::{EditSession, Novel};
use dfn_markup::LiteralMatcher;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Text to replace (case-insensitive, literal)
    pub query: String,

    /// Replacement text, inserted verbatim
    pub replacement: String,

    /// Novel file (.dfn or .json); defaults to the store
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the result back instead of previewing
    #[arg(short, long)]
    pub write: bool,
}

pub fn replace(args: ReplaceArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match args.input {
        Some(input) => input,
        None => config.store_path(cwd),
    };

    let mut session = EditSession::new(open_novel(&input)?, config.editor_config());
    if session.find(&args.query) == 0 {
        println!("{} No matches for \"{}\"", "⚠️".yellow(), args.query);
        return Ok(());
    }

    let per_slide = replacement_counts(session.novel(), &args.query);
    for (title, n) in &per_slide {
        println!("  {} {} ({n})", "✎".cyan(), title);
    }
    let count: usize = per_slide.iter().map(|(_, n)| n).sum();

    session.replace_all(&args.replacement);
    let remaining = session.find(&args.query);

    println!();
    println!(
        "{} Replaced {} occurrences of \"{}\" with \"{}\"",
        "✅".green(),
        count,
        args.query,
        args.replacement
    );
    if remaining > 0 {
        println!("   {} {} matches remain in the replaced text", "ℹ".blue(), remaining);
    }

    if args.write {
        save_novel(session.novel(), &input)?;
        println!("   Wrote {}", input.display());
    } else {
        println!("   {}", "Preview only; pass --write to save".dimmed());
    }

    Ok(())
}

/// Slides that `replace_all` would touch, with how many matches each rewrites
fn replacement_counts(novel: &Novel, query: &str) -> Vec<(String, usize)> {
    let Some(matcher) = LiteralMatcher::new(query) else {
        return Vec::new();
    };
    novel
        .iter_slides()
        .map(|slide| (slide.title.clone(), matcher.count_replaceable(&slide.content)))
        .filter(|(_, n)| *n > 0)
        .collect()
}
