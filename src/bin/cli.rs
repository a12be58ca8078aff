//! tagmap CLI
//!
//! Interactive shell over an in-memory table. Reads one command per line
//! from stdin until `quit` or end of input.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tagmap::{Config, HashTable, TableError, Value, ValueType};
use tracing_subscriber::{fmt, EnvFilter};

/// tagmap CLI
#[derive(Parser, Debug)]
#[command(name = "tagmap-cli")]
#[command(about = "Interactive shell for the tagmap hash table")]
#[command(version)]
struct Args {
    /// Initial slot count (0 selects the default)
    #[arg(short, long, default_value = "64")]
    capacity: usize,

    /// Truncate keys to this many bytes
    #[arg(short = 'k', long)]
    max_key_len: Option<usize>,

    /// Never compact tombstones in place
    #[arg(long)]
    no_compaction: bool,
}

/// A single shell line
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Set a key to a value
    Set {
        /// The key to set
        key: String,

        /// The value to store
        value: String,

        /// Value type (inferred as int, then float, then string if omitted)
        #[arg(short = 't', long = "type")]
        ty: Option<ValueType>,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Print the table contents
    Print,

    /// Show capacity, size and tombstone counts
    Stats,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tagmap=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("tagmap CLI v{}", tagmap::VERSION);

    // Build config from args
    let mut builder = Config::builder()
        .initial_capacity(args.capacity)
        .compact_tombstones(!args.no_compaction);
    if let Some(len) = args.max_key_len {
        builder = builder.max_key_len(len);
    }

    let mut table = match HashTable::with_config(builder.build()) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create table: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut table) {
        tracing::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

/// Read-eval-print loop over stdin
fn run(table: &mut HashTable) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            prompt(&mut stdout)?;
            continue;
        }

        match Line::try_parse_from(words) {
            Ok(Line { command: ShellCommand::Quit }) => break,
            Ok(Line { command }) => execute(table, command, &mut stdout)?,
            Err(e) => write!(stdout, "{}", e)?,
        }

        prompt(&mut stdout)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Run one command against the table and print its outcome
fn execute(table: &mut HashTable, command: ShellCommand, out: &mut impl Write) -> io::Result<()> {
    match command {
        ShellCommand::Set { key, value, ty } => {
            let parsed = match ty {
                Some(ty) => match Value::parse_as(ty, &value) {
                    Some(parsed) => parsed,
                    None => {
                        return writeln!(out, "(error) '{}' is not a valid {}", value, ty)
                    }
                },
                None => Value::infer(&value),
            };
            match table.set(&key, parsed) {
                Ok(Some(previous)) => writeln!(out, "OK (was {})", previous),
                Ok(None) => writeln!(out, "OK"),
                Err(e) => writeln!(out, "(error) {}", e),
            }
        }
        ShellCommand::Get { key } => match table.get(&key) {
            Some(entry) => writeln!(out, "({}) {}", entry.value_type(), entry.value()),
            None => writeln!(out, "(nil)"),
        },
        ShellCommand::Del { key } => match table.delete(&key) {
            Ok(value) => writeln!(out, "(deleted) {}", value),
            Err(TableError::NotFound) => writeln!(out, "(nil)"),
            Err(e) => writeln!(out, "(error) {}", e),
        },
        ShellCommand::Print => write!(out, "{}", table),
        ShellCommand::Stats => {
            let stats = table.stats();
            writeln!(
                out,
                "capacity={} size={} tombstones={} max_load={} load_factor={:.3}",
                stats.capacity,
                stats.size,
                stats.tombstones,
                stats.max_load,
                table.load_factor()
            )
        }
        ShellCommand::Quit => Ok(()),
    }
}
