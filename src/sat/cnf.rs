#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A `Cnf` is an ordered list of clauses read as their conjunction. The
//! search never edits a formula in place: [`Cnf::simplify`] returns a fresh
//! value, so a parent frame can hand its formula to a child and still hold
//! the untouched original when the child fails.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use itertools::Itertools;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    /// Highest variable index mentioned by any clause.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from signed integer literals.
    ///
    /// # Errors
    ///
    /// `ZeroLiteral` with the clause and position of the first `0` found,
    /// or `VariableOutOfRange` for `i32::MIN`.
    pub fn try_new<I, C>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = i32>,
    {
        let clauses = clauses
            .into_iter()
            .enumerate()
            .map(|(idx, clause)| {
                let lits = clause.into_iter().collect_vec();
                Clause::try_from(lits).map_err(|e| match e {
                    SolverError::ZeroLiteral { position, .. } => SolverError::ZeroLiteral {
                        clause: idx,
                        position,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_clauses(clauses))
    }

    #[must_use]
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let num_vars = clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|l| l.variable() as usize)
            .max()
            .unwrap_or(0);

        Self { clauses, num_vars }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is the constant `true`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.iter().any(Clause::is_empty)
    }

    /// The literal of the first unit clause in scan order.
    #[must_use]
    pub fn find_unit(&self) -> Option<Literal> {
        self.iter().find(|c| c.is_unit()).map(|c| c[0])
    }

    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.iter().map(Clause::len).sum()
    }

    /// Distinct variables in ascending order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        self.iter()
            .flat_map(Clause::iter)
            .map(|l| l.variable())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Applies `var = value` to the formula.
    ///
    /// Clauses made true are dropped and the now-false literal is removed
    /// from the rest. Surviving clauses and literals keep their order. A
    /// variable too large to form a literal occurs nowhere, so the formula
    /// comes back unchanged.
    #[must_use]
    pub fn simplify(&self, var: Variable, value: bool) -> Self {
        let Ok(lit) = Literal::new(var, value) else {
            return self.clone();
        };
        let falsified = lit.negated();

        let clauses = self
            .iter()
            .filter(|c| !c.contains(lit))
            .map(|c| {
                if c.contains(falsified) {
                    c.without(falsified)
                } else {
                    c.clone()
                }
            })
            .collect();

        Self {
            clauses,
            num_vars: self.num_vars,
        }
    }

    /// `true` if every clause has a literal made true by `assignment`.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        self.iter().all(|c| c.is_satisfied_by(assignment))
    }

    #[must_use]
    pub fn stats(&self) -> FormulaStats {
        FormulaStats::new(self)
    }

    #[must_use]
    pub fn to_vecs(&self) -> Vec<Vec<i32>> {
        self.iter().map(Clause::to_i32s).collect()
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl TryFrom<Vec<Vec<i32>>> for Cnf {
    type Error = SolverError;

    fn try_from(clauses: Vec<Vec<i32>>) -> Result<Self> {
        Self::try_new(clauses)
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::from_clauses(iter.into_iter().collect())
    }
}

/// DIMACS rendering: a `p cnf` header followed by one `... 0` line per clause.
impl Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Shape statistics of a formula, independent of any solving.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormulaStats {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub total_literals: usize,
    pub min_clause_length: usize,
    pub max_clause_length: usize,
    pub avg_clause_length: f64,
    pub clause_to_variable_ratio: f64,
}

impl FormulaStats {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        let num_variables = cnf.variables().len();
        let num_clauses = cnf.len();
        let total_literals = cnf.literal_count();
        let (min_clause_length, max_clause_length) = cnf
            .iter()
            .map(Clause::len)
            .minmax()
            .into_option()
            .unwrap_or((0, 0));

        let avg_clause_length = if num_clauses == 0 {
            0.0
        } else {
            total_literals as f64 / num_clauses as f64
        };
        let clause_to_variable_ratio = if num_variables == 0 {
            0.0
        } else {
            num_clauses as f64 / num_variables as f64
        };

        Self {
            num_variables,
            num_clauses,
            total_literals,
            min_clause_length,
            max_clause_length,
            avg_clause_length,
            clause_to_variable_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(clauses: Vec<Vec<i32>>) -> Cnf {
        Cnf::try_from(clauses).unwrap()
    }

    #[test]
    fn test_num_vars() {
        let f = cnf(vec![vec![1, -5], vec![3]]);
        assert_eq!(f.num_vars, 5);
        assert_eq!(f.len(), 2);
        assert_eq!(f.variables(), vec![1, 3, 5]);
    }

    #[test]
    fn test_zero_literal_location() {
        let err = Cnf::try_new(vec![vec![1, 2], vec![3, 0]]).unwrap_err();
        assert!(matches!(
            err,
            SolverError::ZeroLiteral {
                clause: 1,
                position: 1
            }
        ));
    }

    #[test]
    fn test_simplify_removes_satisfied_and_false_literals() {
        let f = cnf(vec![vec![1, 2], vec![-1, 3], vec![2, -1, 4], vec![5]]);
        let g = f.simplify(1, true);
        assert_eq!(g.to_vecs(), vec![vec![3], vec![2, 4], vec![5]]);
        // the input is untouched
        assert_eq!(f.len(), 4);
    }

    #[test]
    fn test_simplify_false() {
        let f = cnf(vec![vec![1, 2], vec![-1, 3]]);
        let g = f.simplify(1, false);
        assert_eq!(g.to_vecs(), vec![vec![2]]);
    }

    #[test]
    fn test_simplify_can_produce_empty_clause() {
        let f = cnf(vec![vec![1], vec![-1]]);
        let g = f.simplify(1, true);
        assert!(g.has_empty_clause());
    }

    #[test]
    fn test_simplify_variable_beyond_literal_range() {
        let f = cnf(vec![vec![i32::MAX, 1], vec![-i32::MAX]]);
        assert_eq!(f.simplify(u32::MAX, true), f);
        assert_eq!(f.simplify(i32::MAX as u32, true).to_vecs(), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_find_unit_is_first() {
        let f = cnf(vec![vec![1, 2], vec![-3], vec![4]]);
        assert_eq!(f.find_unit().map(Literal::to_i32), Some(-3));
        assert_eq!(cnf(vec![vec![1, 2]]).find_unit(), None);
    }

    #[test]
    fn test_verify() {
        let f = cnf(vec![vec![1, -2], vec![2]]);
        let mut a = Assignment::new();
        a.set(2, true);
        assert!(!f.verify(&a));
        a.set(1, true);
        assert!(f.verify(&a));
    }

    #[test]
    fn test_display_dimacs() {
        let f = cnf(vec![vec![1, -2], vec![2, 3]]);
        assert_eq!(f.to_string(), "p cnf 3 2\n1 -2 0\n2 3 0\n");
    }

    #[test]
    fn test_formula_stats() {
        let stats = cnf(vec![vec![1, -2, 3], vec![2, 3], vec![-1]]).stats();
        assert_eq!(stats.num_variables, 3);
        assert_eq!(stats.num_clauses, 3);
        assert_eq!(stats.total_literals, 6);
        assert_eq!(stats.max_clause_length, 3);
        assert_eq!(stats.min_clause_length, 1);
        assert!((stats.avg_clause_length - 2.0).abs() < f64::EPSILON);
        assert!((stats.clause_to_variable_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_formula_stats_empty() {
        let stats = Cnf::default().stats();
        assert_eq!(stats.num_clauses, 0);
        assert_eq!(stats.max_clause_length, 0);
        assert!(stats.clause_to_variable_ratio.abs() < f64::EPSILON);
    }
}
