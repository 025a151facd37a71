//! Tokenize a file of lambda calculus expressions, one per line, and print
//! the validity report and/or the parse tree of each valid line.
//!
//! Example usage:
//!
//!     cargo run -- \
//!         --mode both \
//!         --input-filepath test_inputs/valid_examples.txt
//!
//! Set `RUST_LOG=lambda_parse_tree=debug` for per-line diagnostics on stderr.

use clap::Parser;
use lambda_parse_tree::end_to_end::{run_driver, DriverConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lambda_parse_tree=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let driver_config = DriverConfig::parse();

    let driver_result = run_driver(&driver_config);

    match driver_result {
        Ok(report) => {
            println!("{}", report);
        }

        Err(run_error) => {
            eprintln!("{}", run_error);
            std::process::exit(1);
        }
    }
}
