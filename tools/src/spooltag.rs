/*!
Command line front end for the `spooltag` decoder.

```bash
# Decode a tag dump, printing the filament descriptor
spooltag parse tag.bin

# As JSON, with the card UID reported by the reader
spooltag parse --format json --uid 04A23B1A5C6D80 tag.bin

# List the NDEF records on a tag
spooltag records tag.bin

# Hex dump from stdin
cat tag.bin | spooltag dump -
```

On a decode failure the status code is printed and the process exits with
its magnitude, e.g. 3 for `NOT_FOUND`.
*/

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, process::ExitCode, str::FromStr};
use tracing::*;

mod dump;
mod io;
mod parse;
mod records;
mod settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Verbosity {
    #[value(name = "trace")]
    Trace,
    #[value(name = "debug")]
    Debug,
    #[value(name = "info")]
    Info,
    #[value(name = "warn")]
    Warn,
    #[value(name = "error")]
    Error,
}

impl From<Verbosity> for Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Trace => Level::TRACE,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Info => Level::INFO,
            Verbosity::Warn => Level::WARN,
            Verbosity::Error => Level::ERROR,
        }
    }
}

/// Decode filament spool NFC tag dumps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use a custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log to stderr at this level, default 'info'
    #[arg(short, long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "info")]
    verbose: Option<Verbosity>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a tag dump into a filament descriptor
    Parse(parse::Command),

    /// List the MIME records on a tag
    Records(records::Command),

    /// Show a hex dump of a tag
    Dump(dump::Command),
}

/// A card UID given as hex, e.g. `04A23B1A5C6D80` or `04:A2:3B:1A`.
#[derive(Debug, Clone)]
struct CardUid(Vec<u8>);

impl FromStr for CardUid {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.replace([':', ' '], "")).map(CardUid)
    }
}

/// Report a decode failure and map its status to a process exit code.
fn failure(e: &spooltag::Error) -> ExitCode {
    let status = e.status();
    let code = i32::from(status);
    eprintln!("Error: {status} ({code}): {e}");
    ExitCode::from(u8::try_from(code.unsigned_abs()).unwrap_or(u8::MAX))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = settings::init(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Parse(args) => args.exec(&settings),
        Commands::Records(args) => args.exec(&settings),
        Commands::Dump(args) => args.exec(),
    }
}
