//! Partial assignments of truth values to variables.

use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};

/// A partial map from variables to booleans.
///
/// Only assigned variables are stored, so the size of an assignment follows
/// how many variables it holds and not how large their numbers are. Cloning
/// it is how the search takes a value copy before branching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: FxHashMap<Variable, bool>,
}

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `var` the value `value`.
    ///
    /// A variable keeps a single value along one search path; re-assigning
    /// it a different value is a caller bug.
    pub fn set(&mut self, var: Variable, value: bool) {
        let previous = self.values.insert(var, value);
        debug_assert!(
            previous.is_none_or(|v| v == value),
            "variable {var} reassigned"
        );
    }

    /// Makes `lit` true.
    pub fn assign(&mut self, lit: Literal) {
        self.set(lit.variable(), lit.polarity());
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.values.get(&var).copied()
    }

    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| b == lit.polarity())
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.values.contains_key(&var)
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assigned variables in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .map(|(&var, &value)| (var, value))
            .sorted_unstable_by_key(|&(var, _)| var)
    }

    /// The model as signed DIMACS literals, one per assigned variable.
    #[must_use]
    pub fn to_dimacs_model(&self) -> Vec<i32> {
        self.iter()
            .map(|(var, value)| Literal::of(var, value).to_i32())
            .collect()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs_model().iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut a = Assignment::new();
        assert!(a.is_empty());
        a.set(1, true);
        a.set(3, false);
        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), None);
        assert_eq!(a.var_value(3), Some(false));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_large_variable_numbers() {
        let mut a = Assignment::default();
        assert_eq!(a.var_value(2_000_000_000), None);
        a.set(2_000_000_000, true);
        a.set(7, false);
        assert!(a.is_assigned(2_000_000_000));
        assert_eq!(a.len(), 2);
        assert_eq!(a.to_dimacs_model(), vec![-7, 2_000_000_000]);
    }

    #[test]
    fn test_literal_value() {
        let mut a = Assignment::new();
        a.assign(Literal::try_from(-2).unwrap());
        assert_eq!(a.literal_value(Literal::try_from(-2).unwrap()), Some(true));
        assert_eq!(a.literal_value(Literal::try_from(2).unwrap()), Some(false));
        assert_eq!(a.literal_value(Literal::try_from(1).unwrap()), None);
    }

    #[test]
    fn test_same_value_twice_counts_once() {
        let mut a = Assignment::new();
        a.set(1, true);
        a.set(1, true);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_model() {
        let mut a = Assignment::new();
        a.set(4, false);
        a.set(2, true);
        assert_eq!(a.to_dimacs_model(), vec![2, -4]);
        assert_eq!(a.to_string(), "2 -4");
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![(2, true), (4, false)]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = Assignment::new();
        a.set(1, true);
        a.set(9, false);
        let mut b = Assignment::new();
        b.set(9, false);
        b.set(1, true);
        assert_eq!(a, b);
    }
}
