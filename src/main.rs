// sqldumpjson: pull selected columns of one table out of a SQL dump's INSERT
// statements and write them as a JSON array of objects.

mod error;
mod logger;
mod parser;
mod pipeline;
mod progress;
mod projector;

use clap::{CommandFactory, Parser};
use parser::locator::LocatorMode;
use pipeline::{ExtractConfig, Extractor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

// Command-line flags and positional arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Table whose INSERT statements are extracted.
    #[arg(long)]
    table: String,

    /// Comma-separated column names to keep, in output key order.
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,

    /// How VALUES tuples are located in the dump.
    #[arg(long, value_enum, default_value_t = LocatorMode::Balanced)]
    locator: LocatorMode,

    /// Enable debug logging (disables progress bars).
    #[arg(long)]
    debug: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// SQL dump file path.
    input: PathBuf,

    /// Output JSON file path.
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let wall_start = Instant::now();
    if std::env::args().len() == 1 {
        Args::command().print_help()?;
        eprintln!();
        std::process::exit(1);
    }
    let args = Args::parse();

    logger::init(args.debug);
    tracing::debug!(input = %args.input.display(), output = %args.output.display(), "main: starting extraction");

    // Progress bars are disabled in debug mode to avoid mangled output.
    let progress = progress::ProgressManager::new(!args.debug && !args.no_progress);

    let extractor = Extractor::new(ExtractConfig {
        table: args.table,
        fields: args.fields.into_iter().map(|f| f.trim().to_string()).collect(),
        input: args.input,
        output: args.output,
        locator: args.locator,
    });

    let summary = match extractor.run(&progress) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let sep = "=".repeat(60);
    {
        let mut stderr = io::stderr();
        writeln!(stderr, "\n{}\nSUMMARY\n{}", sep, sep)?;
        writeln!(stderr, "Rows found:      {}", summary.rows_found)?;
        writeln!(stderr, "Rows parsed:     {}", summary.rows_parsed)?;
        writeln!(stderr, "Rows dropped:    {}", summary.rows_dropped)?;
        writeln!(stderr, "Unbalanced rows: {}", summary.unbalanced_rows)?;
        if !summary.unmapped_fields.is_empty() {
            writeln!(stderr, "Unmapped fields: {}", summary.unmapped_fields.join(", "))?;
        }
        writeln!(stderr, "Output:          {}", extractor.config().output.display())?;
        writeln!(stderr, "{}", sep)?;
    }

    tracing::debug!(elapsed = ?wall_start.elapsed(), "main: extraction complete");
    Ok(())
}
