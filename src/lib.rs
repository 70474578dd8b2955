#![deny(missing_docs)]
//! This crate provides a DPLL solver for Boolean satisfiability over formulas
//! in conjunctive normal form, together with readers, writers and generators
//! for such formulas.

/// The `sat` module implements the solver, its data model, and the formula
/// utilities around it.
#[allow(missing_docs)]
pub mod sat;

pub use sat::cnf::Cnf;
pub use sat::dpll::Dpll;
pub use sat::error::{Result, SolverError};
pub use sat::solver::{Limits, SolutionStats, SolveOutcome, Solver};
