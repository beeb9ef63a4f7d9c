use anyhow::Result;
use statusgrid::process::{sample::sample_table, streamline, StreamlineOptions};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    info!("running streamline on the built-in sample export");

    println!("Status Grid - Sample Usage");
    println!("{}", "=".repeat(50));

    let sample = sample_table();
    println!("Sample input data:");
    println!("{}", sample.preview(5));

    let result = streamline(sample, StreamlineOptions::default());
    println!("\nStreamlined result:");
    println!("{}", result.preview(5));

    println!("\nCommand line usage:");
    println!("  statusgrid input.csv");
    println!("  statusgrid input.csv -o output.csv");
    println!("  statusgrid input.csv --no-merge-minor");
    println!("  statusgrid input.csv --no-merge-versions");
    Ok(())
}
