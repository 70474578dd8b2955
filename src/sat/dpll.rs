//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) SAT solver.
//!
//! This module provides the `Dpll` struct, a complete backtracking search
//! over a CNF formula. Each search state runs, in order:
//!
//! 1.  **Trivial checks:** an empty formula is satisfied, a formula with an
//!     empty clause is not.
//! 2.  **Unit propagation:** unit clauses are assigned and simplified away
//!     until none is left or a conflict shows up.
//! 3.  **Pure literal elimination:** variables that occur with one polarity
//!     only are given that polarity.
//! 4.  **Decision:** a variable is picked by the `VariableSelection` strategy,
//!     tried `true` first, and, if that whole subtree fails, `false`.
//!
//! Instead of recursing, the solver keeps an explicit stack of choice
//! points. A choice point holds the formula and assignment from just before
//! the `true` branch was taken, plus the variable whose `false` branch is
//! still open. A failure pops the nearest choice point, which is exactly
//! where the recursive formulation would resume, so the order of decisions
//! and the assignment found are the same while the depth of the search no
//! longer depends on the call stack.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::error::Result;
use crate::sat::literal::Variable;
use crate::sat::log::targets::SEARCH as LOG_SEARCH;
use crate::sat::propagation::{eliminate_pure_literals, unit_propagate, Propagation};
use crate::sat::solver::{Limits, SolutionStats, SolveOutcome, Solver};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::{FirstUnassigned, VariableSelection};
use std::time::Instant;

/// The state saved when branching, used to try the `false` polarity later.
#[derive(Debug, Clone)]
struct ChoicePoint {
    cnf: Cnf,
    assignment: Assignment,
    var: Variable,
}

/// What a search state turned into after the simplification passes.
#[derive(Debug)]
enum Frame {
    Satisfied(Assignment),
    Failed,
    Branch {
        cnf: Cnf,
        assignment: Assignment,
        var: Variable,
    },
}

/// A DPLL SAT solver.
///
/// Generic over the branching strategy; the default picks the first
/// unassigned variable in clause order.
#[derive(Debug, Clone)]
pub struct Dpll<S: VariableSelection = FirstUnassigned> {
    /// The formula as given. Never modified.
    pub cnf: Cnf,
    /// The assignment found by the last satisfiable `solve()`.
    pub assignment: Option<Assignment>,
    /// Decision log of the last `solve()`.
    pub trail: Trail,
    pub selector: S,
    pub limits: Limits,
}

impl<S: VariableSelection> Solver for Dpll<S> {
    fn new(cnf: Cnf) -> Self {
        Self::with_limits(cnf, Limits::none())
    }

    fn solve(&mut self) -> SolveOutcome {
        self.trail.clear();
        self.assignment = None;

        let started = Instant::now();
        let outcome = self.search(started);

        log::info!(
            target: LOG_SEARCH,
            "{outcome} after {} decisions in {:?}",
            self.trail.len(),
            started.elapsed()
        );

        if let SolveOutcome::Satisfiable(assignment) = &outcome {
            self.assignment = Some(assignment.clone());
        }
        outcome
    }

    fn solutions(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Counts every reason in the decision log. Reads state only.
    fn stats(&self) -> SolutionStats {
        SolutionStats {
            total_decisions: self.trail.len(),
            unit_propagations: self.trail.count(Reason::UnitPropagation),
            pure_literals: self.trail.count(Reason::PureLiteral),
            branches: self.trail.count(Reason::Branch),
            backtracks: self.trail.count(Reason::Backtrack),
            clauses: self.cnf.len(),
            variables: self.assignment.as_ref().map_or(0, Assignment::len),
        }
    }
}

impl Dpll {
    /// Builds a solver with the default strategy from signed integer clauses.
    ///
    /// # Errors
    ///
    /// Rejects clauses containing `0`.
    pub fn from_clauses(clauses: Vec<Vec<i32>>) -> Result<Self> {
        Ok(Self::new(Cnf::try_from(clauses)?))
    }
}

impl<S: VariableSelection> Dpll<S> {
    #[must_use]
    pub fn with_limits(cnf: Cnf, limits: Limits) -> Self {
        Self {
            cnf,
            assignment: None,
            trail: Trail::new(),
            selector: S::default(),
            limits,
        }
    }

    /// The decision log of the last `solve()`.
    #[must_use]
    pub const fn decisions(&self) -> &Trail {
        &self.trail
    }

    fn search(&mut self, started: Instant) -> SolveOutcome {
        let mut choice_points: Vec<ChoicePoint> = Vec::new();
        let mut cnf = self.cnf.clone();
        let mut assignment = Assignment::new();

        loop {
            match self.settle(cnf, assignment) {
                Frame::Satisfied(model) => return SolveOutcome::Satisfiable(model),

                Frame::Failed => {
                    let Some(ChoicePoint {
                        cnf: parent_cnf,
                        assignment: mut parent,
                        var,
                    }) = choice_points.pop()
                    else {
                        return SolveOutcome::Unsatisfiable;
                    };

                    if self.limit_reached(started) {
                        return SolveOutcome::Undetermined;
                    }

                    log::debug!(target: LOG_SEARCH, "Backtrack {var} = false at depth {}", choice_points.len());
                    parent.set(var, false);
                    cnf = parent_cnf.simplify(var, false);
                    assignment = parent;
                    self.trail.push(var, false, Reason::Backtrack);
                }

                Frame::Branch {
                    cnf: parent_cnf,
                    assignment: parent,
                    var,
                } => {
                    if self.limit_reached(started) {
                        return SolveOutcome::Undetermined;
                    }

                    log::debug!(target: LOG_SEARCH, "Branch {var} = true at depth {}", choice_points.len());
                    let mut child = parent.clone();
                    child.set(var, true);
                    cnf = parent_cnf.simplify(var, true);
                    assignment = child;
                    self.trail.push(var, true, Reason::Branch);

                    choice_points.push(ChoicePoint {
                        cnf: parent_cnf,
                        assignment: parent,
                        var,
                    });
                }
            }
        }
    }

    /// Runs the checks and simplification passes of one search state and
    /// reports whether it is solved, dead, or needs a decision.
    fn settle(&mut self, cnf: Cnf, mut assignment: Assignment) -> Frame {
        if cnf.is_empty() {
            return Frame::Satisfied(assignment);
        }
        if cnf.has_empty_clause() {
            return Frame::Failed;
        }

        let cnf = match unit_propagate(cnf, &mut assignment, &mut self.trail) {
            Propagation::Satisfied => return Frame::Satisfied(assignment),
            Propagation::Conflict => return Frame::Failed,
            Propagation::Settled(cnf) => cnf,
        };

        let cnf = eliminate_pure_literals(cnf, &mut assignment, &mut self.trail);

        if cnf.is_empty() {
            return Frame::Satisfied(assignment);
        }
        if cnf.has_empty_clause() {
            return Frame::Failed;
        }

        match self.selector.pick(&cnf, &assignment) {
            Some(var) => Frame::Branch {
                cnf,
                assignment,
                var,
            },
            None => Frame::Satisfied(assignment),
        }
    }

    fn limit_reached(&self, started: Instant) -> bool {
        let decisions = self
            .limits
            .max_decisions
            .is_some_and(|max| self.trail.len() >= max);
        let time = self
            .limits
            .timeout
            .is_some_and(|timeout| started.elapsed() >= timeout);

        if decisions || time {
            log::info!(target: LOG_SEARCH, "Search limit reached after {} decisions", self.trail.len());
        }
        decisions || time
    }
}
