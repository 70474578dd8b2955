//! Command-line surface: argument definitions and the solve-and-report flow
//! shared by every subcommand.

use crate::command_line::report::{self, MemoryUsage, SolveReport};
use clap::{Args, CommandFactory, Parser, Subcommand};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::parse_file;
use dpll_sat::sat::generator::{self, DEFAULT_3SAT_RATIO, MAX_PIGEONHOLE_HOLES};
use dpll_sat::sat::notation::parse_formula;
use dpll_sat::sat::preprocessing::PreprocessorChain;
use dpll_sat::sat::variable_selection::{
    FirstUnassigned, LowestIndex, VariableSelection, VariableSelectionType,
};
use dpll_sat::{Dpll, Limits, SolutionStats, SolveOutcome, Solver, SolverError};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Defines the command-line interface for the solver.
#[derive(Parser, Debug)]
#[command(name = "dpll_sat", version, about = "A DPLL SAT solver")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a formula given as text: DIMACS, infix ("(1 OR -2) AND 3") or
    /// nested lists ("[[1, -2], [3]]").
    Text {
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.cnf` file below a directory.
    Dir {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate and solve a random k-SAT formula.
    Random {
        #[arg(
            long,
            default_value_t = 20,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(i32::MAX))
        )]
        vars: u32,

        /// Clauses per variable.
        #[arg(long, default_value_t = DEFAULT_3SAT_RATIO)]
        ratio: f64,

        /// Literals per clause.
        #[arg(short = 'k', long, default_value_t = 3)]
        width: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate and solve the pigeonhole formula for `holes` holes.
    Pigeonhole {
        #[arg(
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PIGEONHOLE_HOLES))
        )]
        holes: u32,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every solving subcommand.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging and print the full formula.
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Check the model against the formula, clause by clause.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verify: bool,

    /// Print problem and search statistics.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub stats: bool,

    /// Print the satisfying assignment as a table.
    #[arg(short, long, default_value_t = false)]
    pub print_solution: bool,

    #[arg(long, default_value_t = VariableSelectionType::First)]
    pub variable_selection: VariableSelectionType,

    /// Give up after this many logged decisions.
    #[arg(long)]
    pub max_decisions: Option<usize>,

    /// Give up after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Drop tautologies and duplicate literals and clauses before solving.
    #[arg(long, default_value_t = false)]
    pub preprocess: bool,

    /// Write the formula, result, model and statistics to this file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// The options that apply to the command being run.
    pub(crate) fn active_options(&self) -> &CommonOptions {
        match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Text { common, .. }
                | Commands::Dir { common, .. }
                | Commands::Random { common, .. }
                | Commands::Pigeonhole { common, .. },
            ) => common,
            Some(Commands::Completions { .. }) | None => &self.common,
        }
    }
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            variable_selection: VariableSelectionType::First,
            max_decisions: None,
            timeout_ms: None,
            preprocess: false,
            export: None,
        }
    }
}

impl CommonOptions {
    pub(crate) fn limits(&self) -> Limits {
        let mut limits = Limits::none();
        if let Some(max) = self.max_decisions {
            limits = limits.with_max_decisions(max);
        }
        if let Some(ms) = self.timeout_ms {
            limits = limits.with_timeout(Duration::from_millis(ms));
        }
        limits
    }
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Solution failed verification")]
    VerificationFailed,

    #[error("Unable to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No command provided. Use --help for more information.")]
    NoCommand,
}

/// Dispatches to the requested subcommand.
///
/// # Errors
///
/// Parse and I/O failures, a model that fails verification, or a failed
/// export.
pub(crate) fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => {
            let time = Instant::now();
            let cnf = parse_formula(&input)?;
            solve_and_report(&cnf, &common, None, time.elapsed())
        }
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Random {
            vars,
            ratio,
            width,
            seed,
            common,
        }) => {
            let time = Instant::now();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let num_clauses = (f64::from(vars) * ratio).floor().max(0.0) as usize;
            let cnf = generator::random_ksat(vars, num_clauses, width, seed)?;
            log::info!("Generated random {width}-SAT: {vars} variables, {num_clauses} clauses, seed {seed}");
            solve_and_report(&cnf, &common, None, time.elapsed())
        }
        Some(Commands::Pigeonhole { holes, common }) => {
            let time = Instant::now();
            let cnf = generator::pigeonhole(holes)?;
            solve_and_report(&cnf, &common, None, time.elapsed())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_file(&path, &cli.common),
            None => Err(CliError::NoCommand),
        },
    }
}

fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, Some(path), parse_time)
}

/// Solves every `.cnf` file below `path`, in walk order.
///
/// # Errors
///
/// If `path` is not a directory, or any file fails to parse or verify.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory(path.to_path_buf()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::debug!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Runs the search with the chosen strategy.
pub(crate) fn solve(cnf: &Cnf, common: &CommonOptions) -> (SolveOutcome, Duration, SolutionStats) {
    match common.variable_selection {
        VariableSelectionType::First => solve_with::<FirstUnassigned>(cnf, common.limits()),
        VariableSelectionType::Lowest => solve_with::<LowestIndex>(cnf, common.limits()),
    }
}

fn solve_with<S: VariableSelection>(
    cnf: &Cnf,
    limits: Limits,
) -> (SolveOutcome, Duration, SolutionStats) {
    let mut solver = Dpll::<S>::with_limits(cnf.clone(), limits);

    let time = Instant::now();
    let outcome = solver.solve();
    let elapsed = time.elapsed();

    (outcome, elapsed, solver.stats())
}

/// Solves `cnf` and prints the result block, verification, statistics and
/// model as requested by `common`.
///
/// # Errors
///
/// A model that does not satisfy the formula, or a failed export.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), CliError> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let simplified;
    let cnf = if common.preprocess {
        simplified = PreprocessorChain::standard().apply(cnf);
        &simplified
    } else {
        cnf
    };

    let (outcome, elapsed, stats) = solve(cnf, common);
    let memory = MemoryUsage::sample();

    print!("{}", report::render_result(cnf, &outcome, common.debug));

    let mut verified = true;
    if let (true, Some(assignment)) = (common.verify, outcome.assignment()) {
        let (text, ok) = report::render_verification(cnf, assignment);
        if common.debug || cnf.len() <= 64 {
            print!("{text}");
        } else {
            println!("\nVerified: {ok}");
        }
        verified = ok;
    }

    let summary = SolveReport {
        cnf,
        outcome: &outcome,
        stats,
        parse_time,
        solve_time: elapsed,
        memory,
    };

    if common.stats {
        print!("{}", report::render_stats(&summary));
    }

    if let (true, Some(assignment)) = (common.print_solution, outcome.assignment()) {
        print!("{}", report::render_assignment_table(assignment));
    }

    if let Some(path) = &common.export {
        report::export(path, &summary).map_err(|source| CliError::Export {
            path: path.clone(),
            source,
        })?;
        println!("\nResults exported to: {}", path.display());
    }

    println!("\n{outcome}");

    if verified {
        Ok(())
    } else {
        Err(CliError::VerificationFailed)
    }
}
