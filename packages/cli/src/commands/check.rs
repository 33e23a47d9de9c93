use super::{open_novel, resolve_inputs};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use dfn_editor::{Novel, Slide};
use dfn_markup::{parse, plain_text, serialize, SimpleTag, ValuedTag};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Novel file or directory of .dfn files; defaults to the store
    pub input: Option<PathBuf>,

    /// Print files without problems too
    #[arg(short, long)]
    pub verbose: bool,
}

/// A problem found in one slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub slide: String,
    pub message: String,
}

pub fn check(args: CheckArgs, cwd: &Path) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => Config::load(cwd)?.store_path(cwd),
    };

    println!("🔍 {} DFN check", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let mut total = 0;
    let files = resolve_inputs(&input)?;
    for file in &files {
        let problems = check_novel(&open_novel(file)?);

        if problems.is_empty() {
            if args.verbose {
                println!("{} {}", "✓".green(), file.display());
            }
            continue;
        }

        println!("{} {}", "✗".red(), file.display());
        for problem in &problems {
            println!("   {} {}", format!("{}:", problem.slide).bright_white(), problem.message);
        }
        total += problems.len();
    }

    println!();
    println!("   Files checked: {}", files.len());
    if total > 0 {
        bail!("{} problems found", total);
    }
    println!("   {} No issues found!", "✓".green());
    Ok(())
}

/// Structural and markup problems in a novel
pub fn check_novel(novel: &Novel) -> Vec<Problem> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for slide in novel.iter_slides() {
        let mut report = |message: String| {
            problems.push(Problem {
                slide: slide.title.clone(),
                message,
            })
        };

        if !seen.insert(slide.id.as_str()) {
            report(format!("duplicate id {}", slide.id));
        }
        if slide.is_container() && !slide.content.is_empty() {
            report("chapter has extracts but also its own text".to_string());
        }
        if serialize(&parse(&slide.content)) != slide.content {
            report("markup does not survive a parse/serialize round trip".to_string());
        }
        for tag in stray_tags(slide) {
            report(format!("unmatched tag {tag}"));
        }
    }

    problems
}

/// Known tags left as literal text, i.e. never closed or never opened
fn stray_tags(slide: &Slide) -> Vec<String> {
    let text = plain_text(&slide.content);
    let names = SimpleTag::ALL
        .iter()
        .map(|tag| tag.name())
        .chain(ValuedTag::ALL.iter().map(|tag| tag.name()));

    let mut stray = Vec::new();
    for name in names {
        let open_plain = format!("[{name}]");
        let open_valued = format!("[{name}=");
        let close = format!("[/{name}]");
        if text.contains(&open_plain) || text.contains(&open_valued) {
            stray.push(format!("[{name}]"));
        }
        if text.contains(&close) {
            stray.push(close);
        }
    }
    stray
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfn_editor::SlideStatus;

    #[test]
    fn test_sample_is_clean() {
        assert!(check_novel(&Novel::sample()).is_empty());
    }

    #[test]
    fn test_reports_unclosed_tags() {
        let novel = Novel::new("T").with_slides(vec![Slide::chapter("c", "C").with_content("[b]open and [i]closed[/i]")]);
        let problems = check_novel(&novel);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, "unmatched tag [b]");
    }

    #[test]
    fn test_reports_structure_problems() {
        let mut chapter = Slide::chapter("dup", "C").with_extracts(vec![Slide::extract("dup", "E")]);
        chapter.content = "stray".into();
        let novel = Novel::new("T").with_slides(vec![chapter.with_status(SlideStatus::Draft)]);

        let messages: Vec<_> = check_novel(&novel).into_iter().map(|p| p.message).collect();
        assert!(messages.contains(&"chapter has extracts but also its own text".to_string()));
        assert!(messages.contains(&"duplicate id dup".to_string()));
    }
}
