use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dfn_editor::{JsonFileStore, Novel, NovelStore};
use dfn_format::export_filename;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for exported .dfn files
    #[arg(short, long, default_value = ".")]
    pub out_dir: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing DFN project...".bright_blue().bold());

    let config = Config {
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let novel = Novel::sample();

    let store_path = config.store_path(cwd);
    if store_path.exists() && !args.force {
        println!("  {} {} exists, skipped", "-".dimmed(), store_path.display());
    } else {
        JsonFileStore::new(&store_path).save(&novel)?;
        println!("  {} Created {}", "✓".green(), config.store_path);
    }

    let out_dir = config.out_dir(cwd);
    let dfn_path = out_dir.join(export_filename(&novel.title));
    if dfn_path.exists() && !args.force {
        println!("  {} {} exists, skipped", "-".dimmed(), dfn_path.display());
    } else {
        let written = dfn_format::write_file(&novel, &out_dir)?;
        println!("  {} Created {}", "✓".green(), written.display());
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: dfn stats");
    println!("  2. Run: dfn find moonlight");
    println!("  3. Run: dfn convert {}", config.store_path);

    Ok(())
}
