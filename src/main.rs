//! CLI tool to dump tokens, check, and format Aster source files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aster", version, about = "Scan, check, and format Aster source files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (`RUST_LOG` overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print every token as `[line:col] KIND lexeme`
    Tokens {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that files parse
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print files in canonical format
    Fmt {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Self::Tokens { files } | Self::Check { files } | Self::Fmt { files } => files,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut had_error = false;

    for path in cli.command.files() {
        let result = match cli.command {
            Command::Tokens { .. } => dump_tokens(path),
            Command::Check { .. } => check(path),
            Command::Fmt { .. } => fmt(path),
        };
        if let Err(e) = result {
            eprintln!("{}: {e:#}", path.display());
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn read(path: &Path) -> Result<String> {
    log::debug!("reading {}", path.display());
    fs::read_to_string(path).context("failed to read file")
}

fn dump_tokens(path: &Path) -> Result<()> {
    let tokens = aster::scan(&read(path)?);
    for token in &tokens {
        println!("{token}");
    }

    let errors = aster::lex_errors(&tokens).count();
    if errors > 0 {
        bail!("{errors} lexical error(s)");
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let program = aster::parse_str(&read(path)?)?;
    eprintln!("{}: ok ({} statement(s))", path.display(), program.len());
    Ok(())
}

fn fmt(path: &Path) -> Result<()> {
    let program = aster::parse_str(&read(path)?)?;
    print!("{}", aster::format(&program));
    Ok(())
}
