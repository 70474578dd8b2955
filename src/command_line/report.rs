#![allow(clippy::cast_precision_loss)]
//! Text rendering of a solve: result block, per-clause verification,
//! statistics table and the assignment table. Everything here renders to a
//! `String` so the same text can be printed and exported.

use dpll_sat::sat::assignment::Assignment;
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::notation::to_readable;
use dpll_sat::{SolutionStats, SolveOutcome};
use itertools::Itertools;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

const RULE: &str = "============================================================";
const VARS_PER_ROW: usize = 10;
const TABLE_WIDTH: usize = 59;

/// Formulas longer than this are summarised rather than written out.
const READABLE_CLAUSE_LIMIT: usize = 32;

/// Allocator figures in MiB, sampled after a solve.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MemoryUsage {
    pub allocated: f64,
    pub resident: f64,
}

impl MemoryUsage {
    /// Reads jemalloc's counters. Zeroes if the allocator cannot report.
    pub(crate) fn sample() -> Self {
        if epoch::advance().is_err() {
            return Self::default();
        }
        let mib = |bytes: usize| bytes as f64 / (1024.0 * 1024.0);

        Self {
            allocated: stats::allocated::read().map_or(0.0, mib),
            resident: stats::resident::read().map_or(0.0, mib),
        }
    }
}

/// Everything the report needs about one solve.
#[derive(Debug)]
pub(crate) struct SolveReport<'a> {
    pub cnf: &'a Cnf,
    pub outcome: &'a SolveOutcome,
    pub stats: SolutionStats,
    pub parse_time: Duration,
    pub solve_time: Duration,
    pub memory: MemoryUsage,
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("|  {label:<28} {value:>18}  |")
}

pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) -> String {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    format!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |")
}

fn formula_line(cnf: &Cnf, full: bool) -> String {
    if full || cnf.len() <= READABLE_CLAUSE_LIMIT {
        to_readable(cnf)
    } else {
        format!(
            "{} clauses over {} variables",
            cnf.len(),
            cnf.variables().len()
        )
    }
}

/// Headline block: formula, clause count and the answer.
pub(crate) fn render_result(cnf: &Cnf, outcome: &SolveOutcome, full_formula: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}\nSAT SOLVER RESULT\n{RULE}");
    let _ = writeln!(out, "\nFormula: {}", formula_line(cnf, full_formula));
    let _ = writeln!(out, "Clauses: {}", cnf.len());

    match outcome {
        SolveOutcome::Satisfiable(assignment) => {
            let _ = writeln!(out, "\n✓ SATISFIABLE");
            let _ = writeln!(out, "Assigned variables: {}", assignment.len());
        }
        SolveOutcome::Unsatisfiable => {
            let _ = writeln!(out, "\n✗ UNSATISFIABLE");
            let _ = writeln!(out, "No satisfying assignment exists.");
        }
        SolveOutcome::Undetermined => {
            let _ = writeln!(out, "\n? UNDETERMINED");
            let _ = writeln!(out, "The search stopped at a decision or time limit.");
        }
    }
    out
}

/// One line per clause naming the literals that satisfy it, then a verdict.
pub(crate) fn render_verification(cnf: &Cnf, assignment: &Assignment) -> (String, bool) {
    let mut out = String::from("\nVerification:\n");
    let mut all_satisfied = true;

    for (idx, clause) in cnf.iter().enumerate() {
        let satisfied_by = clause
            .iter()
            .filter(|&&lit| assignment.literal_value(lit) == Some(true))
            .map(|lit| format!("x{}={}", lit.variable(), lit.polarity()))
            .join(", ");

        if satisfied_by.is_empty() {
            all_satisfied = false;
            let _ = writeln!(out, "  Clause {}: ✗ NOT SATISFIED", idx + 1);
        } else {
            let _ = writeln!(out, "  Clause {}: ✓ (satisfied by {satisfied_by})", idx + 1);
        }
    }

    if all_satisfied {
        out.push_str("\n  ✓ All clauses satisfied!\n");
    } else {
        out.push_str("\n  ✗ Some clauses not satisfied\n");
    }
    (out, all_satisfied)
}

pub(crate) fn render_stats(report: &SolveReport<'_>) -> String {
    let elapsed_secs = report.solve_time.as_secs_f64();
    let s = &report.stats;
    let formula = report.cnf.stats();

    let lines = [
        "\n=======================[ Problem Statistics ]=========================".to_string(),
        stat_line("Parse time (s)", format!("{:.3}", report.parse_time.as_secs_f64())),
        stat_line("Variables", formula.num_variables),
        stat_line("Clauses", s.clauses),
        stat_line("Literals", formula.total_literals),
        stat_line("Clause length (min/max)", format!("{}/{}", formula.min_clause_length, formula.max_clause_length)),
        stat_line("Clause length (avg)", format!("{:.2}", formula.avg_clause_length)),
        stat_line("Clause/variable ratio", format!("{:.2}", formula.clause_to_variable_ratio)),
        "========================[ Search Statistics ]========================".to_string(),
        stat_line_with_rate("Decisions", s.total_decisions, elapsed_secs),
        stat_line_with_rate("Unit propagations", s.unit_propagations, elapsed_secs),
        stat_line_with_rate("Pure literals", s.pure_literals, elapsed_secs),
        stat_line_with_rate("Branches", s.branches, elapsed_secs),
        stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs),
        stat_line("Assigned variables", s.variables),
        stat_line("Memory usage (MiB)", format!("{:.2}", report.memory.allocated)),
        stat_line("Resident memory (MiB)", format!("{:.2}", report.memory.resident)),
        stat_line("CPU time (s)", format!("{elapsed_secs:.3}")),
        "=====================================================================".to_string(),
    ];
    lines.join("\n") + "\n"
}

fn table_row(cells: &str) -> String {
    format!("│ {cells:<width$}│\n", width = TABLE_WIDTH - 1)
}

/// Boxed table of the model, ten variables per row.
pub(crate) fn render_assignment_table(assignment: &Assignment) -> String {
    if assignment.is_empty() {
        return "No assignment\n".to_string();
    }
    let border = "─".repeat(TABLE_WIDTH);
    let mut out = format!("\n┌{border}┐\n");
    out.push_str(&format!("│{:^TABLE_WIDTH$}│\n", "VARIABLE ASSIGNMENT"));
    out.push_str(&format!("├{border}┤\n"));

    let rows: Vec<Vec<(u32, bool)>> = assignment
        .iter()
        .chunks(VARS_PER_ROW)
        .into_iter()
        .map(Iterator::collect)
        .collect();

    for (idx, row) in rows.iter().enumerate() {
        let names: String = row.iter().map(|(var, _)| format!("x{var:<4}")).collect();
        let values: String = row
            .iter()
            .map(|&(_, value)| format!(" {:<4}", if value { "T" } else { "F" }))
            .collect();
        out.push_str(&table_row(&names));
        out.push_str(&table_row(&values));
        if idx + 1 < rows.len() {
            out.push_str(&format!("├{border}┤\n"));
        }
    }

    out.push_str(&format!("└{border}┘\n"));
    out
}

/// Plain-text record of a solve: formula, answer, model and statistics.
pub(crate) fn render_export(report: &SolveReport<'_>) -> String {
    let mut out = format!("SAT SOLVER RESULT\n{RULE}\n\n");
    let _ = writeln!(out, "Formula: {}", to_readable(report.cnf));
    let _ = writeln!(out, "Clauses: {}\n", report.cnf.len());
    let _ = writeln!(out, "Result: {}\n", report.outcome);

    if let Some(assignment) = report.outcome.assignment() {
        out.push_str("Assignment:\n");
        for (var, value) in assignment.iter() {
            let _ = writeln!(out, "  x{var} = {value}");
        }
        let _ = writeln!(out, "v {} 0", assignment);
    }

    let s = &report.stats;
    let _ = write!(out, "\n{RULE}\nSTATISTICS\n{RULE}\n\n");
    let _ = writeln!(out, "total_decisions: {}", s.total_decisions);
    let _ = writeln!(out, "unit_propagations: {}", s.unit_propagations);
    let _ = writeln!(out, "pure_literals: {}", s.pure_literals);
    let _ = writeln!(out, "branches: {}", s.branches);
    let _ = writeln!(out, "backtracks: {}", s.backtracks);
    let _ = writeln!(out, "clauses: {}", s.clauses);
    let _ = writeln!(out, "variables: {}", s.variables);
    let _ = writeln!(out, "solve_time_s: {:.6}", report.solve_time.as_secs_f64());
    out
}

/// Writes [`render_export`] to `path`.
pub(crate) fn export(path: &Path, report: &SolveReport<'_>) -> std::io::Result<()> {
    std::fs::write(path, render_export(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpll_sat::{Dpll, Solver};

    fn solved(clauses: Vec<Vec<i32>>) -> (Cnf, SolveOutcome, SolutionStats) {
        let mut solver = Dpll::from_clauses(clauses).unwrap();
        let outcome = solver.solve();
        (solver.cnf.clone(), outcome, solver.stats())
    }

    #[test]
    fn test_stat_line_width() {
        let line = stat_line("Variables", 42);
        assert!(line.starts_with("|  Variables"));
        assert!(line.ends_with("42  |"));
        assert_eq!(line.chars().count(), stat_line("Clauses", 1_000_000).chars().count());
    }

    #[test]
    fn test_rate_zero_elapsed() {
        assert!(stat_line_with_rate("Decisions", 10, 0.0).contains("(        0/sec)"));
    }

    #[test]
    fn test_result_block() {
        let (cnf, outcome, _) = solved(vec![vec![1, 2], vec![-1]]);
        let text = render_result(&cnf, &outcome, false);
        assert!(text.contains("Formula: (x1 ∨ x2) ∧ (¬x1)"));
        assert!(text.contains("✓ SATISFIABLE"));

        let (cnf, outcome, _) = solved(vec![vec![1], vec![-1]]);
        assert!(render_result(&cnf, &outcome, false).contains("✗ UNSATISFIABLE"));
    }

    #[test]
    fn test_verification_lines() {
        let (cnf, outcome, _) = solved(vec![vec![1, 2], vec![-1]]);
        let (text, ok) = render_verification(&cnf, outcome.assignment().unwrap());
        assert!(ok);
        assert!(text.contains("Clause 1: ✓ (satisfied by x2=true)"));
        assert!(text.contains("Clause 2: ✓ (satisfied by x1=false)"));
    }

    #[test]
    fn test_verification_failure() {
        let cnf = Cnf::try_from(vec![vec![1], vec![2]]).unwrap();
        let mut assignment = Assignment::new();
        assignment.set(1, true);
        let (text, ok) = render_verification(&cnf, &assignment);
        assert!(!ok);
        assert!(text.contains("Clause 2: ✗ NOT SATISFIED"));
    }

    #[test]
    fn test_assignment_table_rows() {
        let mut assignment = Assignment::new();
        for var in 1..=12 {
            assignment.set(var, var % 2 == 0);
        }
        let table = render_assignment_table(&assignment);
        // header rule, two rows separated by one rule
        assert_eq!(table.matches('├').count(), 2);
        assert!(table.contains("x11"));
        assert!(table.contains("VARIABLE ASSIGNMENT"));
        assert_eq!(render_assignment_table(&Assignment::default()), "No assignment\n");
    }

    #[test]
    fn test_export_contents() {
        let (cnf, outcome, stats) = solved(vec![vec![1, 2], vec![-1]]);
        let report = SolveReport {
            cnf: &cnf,
            outcome: &outcome,
            stats,
            parse_time: Duration::ZERO,
            solve_time: Duration::ZERO,
            memory: MemoryUsage::default(),
        };
        let text = render_export(&report);
        assert!(text.contains("Result: SATISFIABLE"));
        assert!(text.contains("  x1 = false"));
        assert!(text.contains(&format!("total_decisions: {}", stats.total_decisions)));
        assert!(render_stats(&report).contains("Problem Statistics"));
    }
}
