use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use statusgrid::{
    output::{default_output_path, write_table},
    process::{load_csv, streamline, utils::is_csv_path, StreamlineOptions},
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "statusgrid",
    version,
    about = "Streamline an issue-count export by consolidating status columns by name",
    after_help = "Examples:\n  statusgrid input.csv\n  statusgrid input.csv -o custom_output.csv\n  statusgrid input.csv --no-merge-minor\n  statusgrid input.csv --no-merge-versions"
)]
struct Args {
    /// Input CSV file path
    input_file: PathBuf,

    /// Output file path (.csv, .parquet or .json; default: auto-generated CSV)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable version merging
    #[arg(long)]
    no_merge_versions: bool,

    /// Disable merging minor versions (e.g. 1.17.2 stays separate)
    #[arg(long)]
    no_merge_minor: bool,
}

impl Args {
    fn options(&self) -> StreamlineOptions {
        StreamlineOptions {
            merge_versions: !self.no_merge_versions,
            merge_minor_versions: !self.no_merge_minor,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) validate input ───────────────────────────────────────────
    if !args.input_file.exists() {
        bail!("input file '{}' not found", args.input_file.display());
    }
    if !is_csv_path(&args.input_file) {
        bail!(
            "input file must be a CSV file. Got: {}",
            args.input_file.display()
        );
    }

    // ─── 3) load ─────────────────────────────────────────────────────
    info!("reading input file: {}", args.input_file.display());
    let table = load_csv(&args.input_file)?;
    if args.verbose {
        println!("Input data shape: {:?}", table.shape());
        println!("Original columns:");
        for (i, col) in table.headers.iter().enumerate() {
            println!("  {}: {}", i + 1, col);
        }
    }

    // ─── 4) streamline ───────────────────────────────────────────────
    let options = args.options();
    debug!(?options, "streamlining");
    let result = streamline(table, options);

    // ─── 5) write ────────────────────────────────────────────────────
    let output_file = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input_file, Local::now().naive_local()));
    write_table(&result, &output_file)
        .with_context(|| format!("writing {}", output_file.display()))?;

    println!("Successfully processed data!");
    println!("Input file: {}", args.input_file.display());
    println!("Output file: {}", output_file.display());
    println!("Output shape: {:?}", result.shape());

    if args.verbose {
        println!("\nStreamlined columns:");
        for (i, col) in result.headers().iter().enumerate() {
            println!("  {}: {}", i + 1, col);
        }
        println!("\nFirst 5 rows:");
        println!("{}", result.preview(5));
    }

    info!("all done");
    Ok(())
}
