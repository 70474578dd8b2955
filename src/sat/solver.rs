//! The solver interface shared by the engine and its callers.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use std::fmt::{self, Display};
use std::time::Duration;

/// Result of a `solve()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A satisfying (possibly partial) assignment was found.
    Satisfiable(Assignment),
    /// No assignment satisfies the formula.
    Unsatisfiable,
    /// A configured limit stopped the search before an answer was reached.
    Undetermined,
}

impl SolveOutcome {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            _ => None,
        }
    }

    /// The `(satisfiable, assignment)` pair. `Undetermined` reads as not
    /// satisfiable without an assignment.
    #[must_use]
    pub fn into_pair(self) -> (bool, Option<Assignment>) {
        match self {
            Self::Satisfiable(a) => (true, Some(a)),
            Self::Unsatisfiable | Self::Undetermined => (false, None),
        }
    }
}

impl Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable(_) => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Undetermined => write!(f, "UNDETERMINED"),
        }
    }
}

/// Counts derived from the decision log after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub total_decisions: usize,
    pub unit_propagations: usize,
    pub pure_literals: usize,
    pub branches: usize,
    pub backtracks: usize,
    /// Clauses in the original formula.
    pub clauses: usize,
    /// Variables in the final assignment, 0 when none was found.
    pub variables: usize,
}

/// Bounds on a single search. Both are checked before each branch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    pub max_decisions: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Limits {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_decisions: None,
            timeout: None,
        }
    }

    #[must_use]
    pub const fn with_max_decisions(mut self, max: usize) -> Self {
        self.max_decisions = Some(max);
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_decisions.is_none() && self.timeout.is_none()
    }
}

pub trait Solver {
    /// Takes ownership of the formula; it is never modified.
    fn new(cnf: Cnf) -> Self;

    /// Runs the search from scratch. The decision log is reset first.
    fn solve(&mut self) -> SolveOutcome;

    /// The assignment found by the last successful `solve()`.
    fn solutions(&self) -> Option<&Assignment>;

    fn stats(&self) -> SolutionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_pair() {
        let mut a = Assignment::new();
        a.set(1, true);
        let (sat, model) = SolveOutcome::Satisfiable(a.clone()).into_pair();
        assert!(sat);
        assert_eq!(model, Some(a));

        assert_eq!(SolveOutcome::Unsatisfiable.into_pair(), (false, None));
        assert_eq!(SolveOutcome::Undetermined.into_pair(), (false, None));
        assert_eq!(SolveOutcome::Undetermined.to_string(), "UNDETERMINED");
    }

    #[test]
    fn test_limits_builder() {
        let limits = Limits::none()
            .with_max_decisions(10)
            .with_timeout(Duration::from_millis(5));
        assert_eq!(limits.max_decisions, Some(10));
        assert_eq!(limits.timeout, Some(Duration::from_millis(5)));
        assert!(!limits.is_unbounded());
        assert!(Limits::default().is_unbounded());
    }
}
