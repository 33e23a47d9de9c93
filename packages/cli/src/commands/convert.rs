use super::{open_novel, save_novel, NovelFile};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// .json store to export, or .dfn file to import; defaults to the store
    pub input: Option<PathBuf>,

    /// Output file (defaults to the derived .dfn name in outDir, or the input with .json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn convert(args: ConvertArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match args.input {
        Some(input) => input,
        None => config.store_path(cwd),
    };
    let novel = open_novel(&input)?;

    let output = match (NovelFile::of(&input)?, args.output) {
        (_, Some(output)) => {
            save_novel(&novel, &output)?;
            output
        }
        (NovelFile::Json, None) => dfn_format::write_file(&novel, &config.out_dir(cwd))?,
        (NovelFile::Dfn, None) => {
            let output = input.with_extension("json");
            save_novel(&novel, &output)?;
            output
        }
    };

    println!(
        "  {} {} → {}",
        "✓".green(),
        input.display(),
        output.display()
    );
    Ok(())
}
