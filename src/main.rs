//! Inspection tool for fabmatrix
//!
//! Prints the memory type matrix, the deduplicated RMA combinations and the
//! size axes, and reorders test names read from stdin.

use std::io::{self, Write};
use std::process::ExitCode;

use fabmatrix::{
    order_collected_names, rma_bw_combinations, CapabilitySet, MemoryTypeMatrix, RangeSpec,
    SizeAxes, SizeAxis,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("pairs");
    let rest = &args[args.len().min(2)..];

    let result = match mode {
        "pairs" => show_pairs(rest),
        "rma" => show_rma(),
        "sizes" => show_sizes(rest),
        "order" => order_stdin(),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("Usage: fabmatrix <mode> [args]");
    println!();
    println!("Modes:");
    println!("  pairs [capability...] - List memory type pairs, optionally only runnable ones");
    println!("  rma                   - List deduplicated RMA bandwidth combinations");
    println!("  sizes [descriptor...] - Expand range descriptors (default: configured axes)");
    println!("  order                 - Read test names from stdin, print them in run order");
}

fn show_pairs(markers: &[String]) -> fabmatrix::Result<()> {
    let matrix = MemoryTypeMatrix::default();

    if markers.is_empty() {
        println!("Bidirectional:");
        for pair in matrix.bidirectional_pairs() {
            print_pair(pair);
        }
        println!("Unidirectional only:");
        for pair in matrix.unidirectional_only_pairs() {
            print_pair(pair);
        }
        return Ok(());
    }

    let capabilities = CapabilitySet::from_markers(markers.iter().map(String::as_str))?;
    for pair in MemoryTypeMatrix::runnable(matrix.all_pairs(), &capabilities) {
        print_pair(&pair);
    }
    Ok(())
}

fn print_pair(pair: &fabmatrix::MemoryTypePair) {
    match pair.capability() {
        Some(tag) => println!("  {:<18} [{}]", pair.name(), tag),
        None => println!("  {}", pair.name()),
    }
}

fn show_rma() -> fabmatrix::Result<()> {
    let matrix = MemoryTypeMatrix::default();
    for combo in rma_bw_combinations(&matrix) {
        println!("{}", combo.id());
    }
    Ok(())
}

fn show_sizes(descriptors: &[String]) -> fabmatrix::Result<()> {
    if descriptors.is_empty() {
        let axes = SizeAxes::from_env()?;
        println!("{}", axes.summary());
        return Ok(());
    }

    let axis = SizeAxis::parse(descriptors.iter().map(String::as_str))?;
    for spec in axis.specs() {
        print_spec(spec);
    }
    Ok(())
}

fn print_spec(spec: &RangeSpec) {
    println!(
        "{}: {} sizes, first {}, last {}",
        spec,
        spec.len(),
        spec.start(),
        spec.last()
    );
}

fn order_stdin() -> fabmatrix::Result<()> {
    // Read everything before printing so a bad line leaves stdout empty
    let ordered = order_collected_names(io::stdin().lock())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in ordered {
        writeln!(out, "{name}")?;
    }
    out.flush()?;
    Ok(())
}
