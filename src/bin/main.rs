//! `hanzi` - convert Chinese text between character forms and sort it
//! naturally.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use hanzi_core::{persistence, Comparison, HanziConfig, HanziEngine};
use std::cmp::Ordering;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "hanzi.json";
const LOG_ENV: &str = "HANZI_LOG";

#[derive(Parser)]
#[command(name = "hanzi")]
#[command(about = "Chinese character form conversion and natural sorting", long_about = None)]
#[command(version)]
struct Cli {
    /// Dictionary file in the record line format
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text to traditional or simplified characters
    Convert {
        /// Convert to simplified instead of traditional
        #[arg(short, long, default_value_t = false)]
        simplified: bool,
        /// Input file (stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sort lines in natural order
    Sort {
        /// Comparison policy (lexical, ignore-form, fold-form, ...)
        #[arg(short, long)]
        policy: Option<Comparison>,
        /// Input file (stdin if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Compare two strings in natural order
    Compare {
        left: String,
        right: String,
        #[arg(short, long)]
        policy: Option<Comparison>,
    },
    /// Write a binary snapshot of the dictionary
    Snapshot { output: PathBuf },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = HanziConfig::load(&cli.config)?;
    if let Some(dictionary) = cli.dictionary {
        config.dictionary_path = Some(dictionary);
        config.snapshot_path = None;
    }
    let engine = HanziEngine::from_config(&config);

    match cli.command {
        Commands::Convert {
            simplified,
            input,
            output,
        } => match (input, output) {
            (Some(input), Some(output)) => {
                let lines = engine.convert_file(&input, &output, !simplified)?;
                eprintln!("Converted {} lines to {}", lines, output.display());
            }
            (input, output) => {
                let text = read_input(input.as_ref())?;
                let mut out: Box<dyn Write> = match output {
                    Some(path) => Box::new(BufWriter::new(
                        std::fs::File::create(&path)
                            .with_context(|| format!("creating {}", path.display()))?,
                    )),
                    None => Box::new(BufWriter::new(io::stdout().lock())),
                };
                for line in text.lines() {
                    let converted = if simplified {
                        engine.to_simplified(line)?
                    } else {
                        engine.to_traditional(line)?
                    };
                    writeln!(out, "{}", converted)?;
                }
                out.flush()?;
            }
        },
        Commands::Sort { policy, input } => {
            let policy = policy.unwrap_or(config.default_policy);
            let text = read_input(input.as_ref())?;
            let mut lines: Vec<&str> = text.lines().collect();
            engine.sort_natural(&mut lines, policy)?;
            let mut out = BufWriter::new(io::stdout().lock());
            for line in lines {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
        }
        Commands::Compare {
            left,
            right,
            policy,
        } => {
            let policy = policy.unwrap_or(config.default_policy);
            let symbol = match engine.compare_natural(&left, &right, policy)? {
                Ordering::Less => "<".green(),
                Ordering::Equal => "=".yellow(),
                Ordering::Greater => ">".red(),
            };
            println!("{} {} {}   ({})", left, symbol.bold(), right, policy);
        }
        Commands::Snapshot { output } => {
            let registry = engine.registry()?;
            if registry.is_empty() {
                bail!("dictionary {} has no entries", config.dictionary_path().display());
            }
            persistence::save_snapshot(registry, &output)?;
            eprintln!("Saved {} entries to {}", registry.len(), output.display());
        }
    }

    Ok(())
}
