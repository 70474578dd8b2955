//! # dpll_sat
//!
//! Command-line front end for the DPLL solver in this crate.
//!
//! ```sh
//! # Solve a DIMACS file
//! dpll_sat problem.cnf
//! dpll_sat file --path problem.cnf --print-solution
//!
//! # Solve a formula given inline, in any supported notation
//! dpll_sat text --input "(1 OR -2) AND (2 OR 3)"
//! dpll_sat text --input "[[1, -2], [2, 3]]"
//!
//! # Solve every .cnf file below a directory
//! dpll_sat dir --path benchmarks/
//!
//! # Generated instances
//! dpll_sat random --vars 50 --ratio 4.3 -k 3 --seed 7 --timeout-ms 2000
//! dpll_sat pigeonhole --holes 4 --max-decisions 100000
//! ```
//!
//! `RUST_LOG` controls logging; `--debug` lowers the default level to
//! `debug`.

use clap::Parser;
use command_line::cli::{self, Cli};

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.active_options().debug {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
