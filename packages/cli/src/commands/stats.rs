use super::{open_novel, resolve_inputs, status_label};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dfn_editor::{Novel, NovelStats, SlideStats, WORDS_PER_MINUTE};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Novel file (.dfn or .json) or directory of .dfn files; defaults to the store
    pub input: Option<PathBuf>,

    /// List every chapter and extract
    #[arg(short, long)]
    pub slides: bool,
}

pub fn stats(args: StatsArgs, cwd: &Path) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => Config::load(cwd)?.store_path(cwd),
    };

    let files = resolve_inputs(&input)?;
    if files.is_empty() {
        println!("{}", "⚠️  No .dfn files found".yellow());
        return Ok(());
    }

    let mut total = NovelStats::default();
    for file in &files {
        let novel = open_novel(file)?;
        let novel_stats = print_novel(&novel, file, args.slides);
        total.chapters += novel_stats.chapters;
        total.extracts += novel_stats.extracts;
        total.words += novel_stats.words;
    }

    if files.len() > 1 {
        println!(
            "{} {} novels, {} chapters, {} extracts, {} words",
            "Σ".bright_blue().bold(),
            files.len(),
            total.chapters,
            total.extracts,
            total.words
        );
    }

    Ok(())
}

fn print_novel(novel: &Novel, path: &Path, slides: bool) -> NovelStats {
    let stats = NovelStats::of(novel);

    println!("📊 {} {}", novel.title.bold(), format!("({})", path.display()).dimmed());
    println!(
        "   {} chapters, {} extracts, {} words, ~{} min read",
        stats.chapters,
        stats.extracts,
        stats.words,
        stats.words.div_ceil(WORDS_PER_MINUTE)
    );

    if slides {
        for chapter in &novel.slides {
            print_slide(chapter, "●", 3);
            for extract in chapter.extracts() {
                print_slide(extract, "○", 5);
            }
        }
    }
    println!();

    stats
}

fn print_slide(slide: &dfn_editor::Slide, bullet: &str, indent: usize) {
    let stats = SlideStats::of(slide);
    println!(
        "{:indent$}{} {} [{}] {} words, {} chars",
        "",
        bullet,
        slide.title,
        status_label(&slide.status),
        stats.words,
        stats.characters,
    );
}
