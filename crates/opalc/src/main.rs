//! Opal checker - type checks an Opal source file
//!
//! Usage: opalc [OPTIONS] <input>

use anyhow::Context;
use clap::Parser as ClapParser;
use opal_sema::{CheckConfig, DiagnosticReporter, Driver};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(ClapParser, Debug)]
#[command(name = "opalc")]
#[command(author, version)]
#[command(about = "Semantic checker for the Opal systems language", long_about = None)]
struct Args {
    /// Input source file (.opal)
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump every binding with its type
    #[arg(long)]
    dump_types: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Check the input file; `Ok(false)` when diagnostics were reported
fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    // Set up diagnostic reporter
    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    let config = CheckConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        dump_types: args.dump_types,
        verbose: args.verbose,
    };

    let driver = Driver::new(&reporter, file_id, config);
    match driver.check_source(&source) {
        Ok(checked) => Ok(!checked.analysis.has_errors()),
        // Already rendered by the driver
        Err(_) => Ok(false),
    }
}
