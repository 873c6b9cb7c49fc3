//! bedq: sorted single-nucleotide BED queries
//!
//! Usage: bedq <COMMAND> [OPTIONS]

use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use bedq::bed::{load_table, open_input, BedError, TableLoad};
use bedq::commands::{sort_table, MergeCommand, QueryCommand, SortCommand};

#[derive(Parser)]
#[command(name = "bedq")]
#[command(version)]
#[command(about = "Sorted single-nucleotide BED queries: sort, extract regions, merge-join", long_about = None)]
struct Cli {
    /// Reject records that are not exactly one base wide (end = start + 1)
    #[arg(long, global = true)]
    strict_width: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a BED file by chromosome and start position
    Sort {
        /// Input BED file (use - for stdin)
        infile: Option<PathBuf>,

        /// Output file (default: stdout)
        outfile: Option<PathBuf>,

        /// Print sorting statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Extract the records starting inside each query region
    Query {
        /// Sorted BED file to query (use - for stdin)
        bed: PathBuf,

        /// Query file with one "chrom start end" region per line (use - for stdin)
        query: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "output")]
        outfile: Option<PathBuf>,

        /// Allow unsorted BED input (sorted in memory instead of rejected)
        #[arg(long)]
        allow_unsorted: bool,

        /// Print query statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Merge-join two sorted BED files, pairing names at shared positions
    Merge {
        /// First sorted BED file
        file_a: PathBuf,

        /// Second sorted BED file
        file_b: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "output")]
        outfile: Option<PathBuf>,

        /// Print merge statistics to stderr
        #[arg(long)]
        stats: bool,
    },
}

/// Install the logger. A set `RUST_LOG` takes precedence over `-v`/`-q`.
fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp(None).format_target(false);
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log_level(verbose, quiet));
    }
    builder.init();
}

fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Must be set before any parsing occurs
    if cli.strict_width {
        bedq::config::set_strict_width(true);
    }

    let result = match cli.command {
        Commands::Sort {
            infile,
            outfile,
            stats,
        } => run_sort(infile, outfile, stats),

        Commands::Query {
            bed,
            query,
            outfile,
            allow_unsorted,
            stats,
        } => run_query(bed, query, outfile, allow_unsorted, stats),

        Commands::Merge {
            file_a,
            file_b,
            outfile,
            stats,
        } => run_merge(file_a, file_b, outfile, stats),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Open the output file, or stdout when none (or `-`) is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, BedError> {
    match path {
        Some(p) if !is_stdio(p) => Ok(Box::new(File::create(p)?)),
        _ => Ok(Box::new(io::stdout().lock())),
    }
}

fn run_sort(
    infile: Option<PathBuf>,
    outfile: Option<PathBuf>,
    stats: bool,
) -> Result<(), BedError> {
    let source = match infile.as_deref() {
        Some(p) if !is_stdio(p) => p.display().to_string(),
        _ => "stdin".to_string(),
    };
    let reader = open_input(infile.as_deref())?;
    let output = open_output(outfile.as_deref())?;

    let result = SortCommand::new().run(reader, &source, output)?;
    log::info!("sorted {} records from {}", result.records, source);

    if stats {
        eprintln!("Sort stats: {}", result);
    }
    Ok(())
}

fn run_query(
    bed: PathBuf,
    query: PathBuf,
    outfile: Option<PathBuf>,
    allow_unsorted: bool,
    stats: bool,
) -> Result<(), BedError> {
    if is_stdio(&bed) && is_stdio(&query) {
        return Err(BedError::InvalidFormat(
            "BED input and query input cannot both be stdin".to_string(),
        ));
    }

    let table = if allow_unsorted {
        sort_table(load_table(Some(bed.as_path()), TableLoad::Unchecked)?)
    } else {
        load_table(Some(bed.as_path()), TableLoad::Validated).map_err(|e| match e {
            BedError::Order { record, message } => BedError::Order {
                record,
                message: format!(
                    "{}\n\n\
                     Fix: Run 'bedq sort {}' first.\n\
                     Or use '--allow-unsorted' to sort in memory.",
                    message,
                    bed.display()
                ),
            },
            other => other,
        })?
    };
    log::info!(
        "loaded {} records on {} chromosomes",
        table.len(),
        table.num_chromosomes()
    );

    let output = open_output(outfile.as_deref())?;
    let cmd = QueryCommand::new();
    let result = if is_stdio(&query) {
        cmd.run(&table, io::stdin().lock(), output)?
    } else {
        cmd.run(&table, BufReader::new(File::open(&query)?), output)?
    };

    if stats {
        eprintln!("Query stats: {}", result);
    }
    Ok(())
}

fn run_merge(
    file_a: PathBuf,
    file_b: PathBuf,
    outfile: Option<PathBuf>,
    stats: bool,
) -> Result<(), BedError> {
    if is_stdio(&file_a) && is_stdio(&file_b) {
        return Err(BedError::InvalidFormat(
            "merge inputs cannot both be stdin".to_string(),
        ));
    }

    let a = load_table(Some(file_a.as_path()), TableLoad::Validated)?;
    let b = load_table(Some(file_b.as_path()), TableLoad::Validated)?;

    let output = open_output(outfile.as_deref())?;
    let result = MergeCommand::new().run(&a, &b, output)?;
    log::info!(
        "merged {} and {} into {} records ({} left-only, {} right-only)",
        file_a.display(),
        file_b.display(),
        result.records_written,
        result.unmatched_left(),
        result.unmatched_right()
    );

    if stats {
        eprintln!("Merge stats: {}", result);
    }
    Ok(())
}
