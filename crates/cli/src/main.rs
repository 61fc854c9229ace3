use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tagger_cli::commands::{self, Assignment};
use tagger_cli::shell;
use tagger_core::config;
use tagger_core::sort::SortKey;
use tagger_core::App;
use tracing::debug;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_tagger=info,tagger_cli=info,tagger_core=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    debug!("Configuration: {:?}", cfg);
    let mut app = App::from_config(&cfg)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Scan { sort, desc, json } => {
            commands::run_scan(&mut app, sort, desc, json, &mut out)
        }
        Commands::Folders { json } => commands::run_folders(&app, json, &mut out),
        Commands::SetFolder { tag, folder } => {
            commands::run_set_folder(&mut app, &tag, &folder, &mut out)
        }
        Commands::Cleanup {
            assign,
            dry_run,
            json,
        } => commands::run_cleanup(&mut app, &assign, dry_run, json, &mut out),
        Commands::Shell => shell::run(&mut app, io::stdin().lock(), &mut out),
    }
}

#[derive(Parser)]
#[command(name = "file-tagger")]
#[command(about = "Tag office documents in Downloads/Documents and move them into per-tag folders", long_about = None)]
struct Cli {
    /// Path to a config file (TOML, JSON, ...)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the source folders and list matching files
    Scan {
        /// Sort column: name|tag|type|modified
        #[arg(long, value_parser = parse_sort_key)]
        sort: Option<SortKey>,
        /// Sort descending
        #[arg(long, default_value_t = false)]
        desc: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the tag -> folder mapping
    Folders {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the destination folder for a tag
    SetFolder {
        tag: String,
        folder: PathBuf,
    },
    /// Tag files and move every tagged file into its folder
    Cleanup {
        /// TAG=FILE[,FILE...]; may be repeated
        #[arg(long, required = true, value_parser = parse_assignment)]
        assign: Vec<Assignment>,
        /// Only print what would be moved
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session
    Shell,
}

fn parse_sort_key(s: &str) -> std::result::Result<SortKey, String> {
    s.parse()
}

fn parse_assignment(s: &str) -> std::result::Result<Assignment, String> {
    commands::parse_assignment(s).map_err(|e| e.to_string())
}
