mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, convert, find, init, replace, stats, CheckArgs, ConvertArgs, FindArgs, InitArgs, ReplaceArgs, StatsArgs,
};
use tracing::Level;

/// DFN CLI - tools for novels written in DFN markup
#[derive(Parser, Debug)]
#[command(name = "dfn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log library activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a DFN project with the sample novel
    Init(InitArgs),

    /// Word and slide counts
    Stats(StatsArgs),

    /// List matches of a search
    Find(FindArgs),

    /// Replace every match of a search
    Replace(ReplaceArgs),

    /// Verify markup and structure
    Check(CheckArgs),

    /// Convert between the JSON store and .dfn files
    Convert(ConvertArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Stats(args) => stats(args, &cwd),
            Command::Find(args) => find(args, &cwd),
            Command::Replace(args) => replace(args, &cwd),
            Command::Check(args) => check(args, &cwd),
            Command::Convert(args) => convert(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
