#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Choosing the next branching variable.
//!
//! Both strategies here are fixed deterministic rules. Whatever they pick,
//! the search still tries `true` first and `false` second.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Variable;
use std::fmt::{self, Display};
use std::str::FromStr;

pub trait VariableSelection: Default {
    /// An unassigned variable referenced by `cnf`, or `None` if there is none.
    fn pick(&self, cnf: &Cnf, assignment: &Assignment) -> Option<Variable>;
}

/// The first unassigned variable met scanning clauses, then literals, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstUnassigned;

impl VariableSelection for FirstUnassigned {
    fn pick(&self, cnf: &Cnf, assignment: &Assignment) -> Option<Variable> {
        cnf.iter()
            .flat_map(|c| c.iter())
            .map(|l| l.variable())
            .find(|&v| !assignment.is_assigned(v))
    }
}

/// The smallest unassigned variable still referenced by the formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowestIndex;

impl VariableSelection for LowestIndex {
    fn pick(&self, cnf: &Cnf, assignment: &Assignment) -> Option<Variable> {
        cnf.iter()
            .flat_map(|c| c.iter())
            .map(|l| l.variable())
            .filter(|&v| !assignment.is_assigned(v))
            .min()
    }
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VariableSelectionType {
    #[default]
    First,
    Lowest,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Lowest => write!(f, "lowest"),
        }
    }
}

impl FromStr for VariableSelectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "lowest" => Ok(Self::Lowest),
            _ => Err(format!("Unknown variable selection: {s}")),
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
    fn test_first_unassigned_scan_order() {
        let f = cnf(vec![vec![5, -3], vec![1, 2]]);
        let mut a = Assignment::new();
        assert_eq!(FirstUnassigned.pick(&f, &a), Some(5));
        a.set(5, true);
        assert_eq!(FirstUnassigned.pick(&f, &a), Some(3));
    }

    #[test]
    fn test_lowest_index() {
        let f = cnf(vec![vec![5, -3], vec![4, 2]]);
        let mut a = Assignment::new();
        assert_eq!(LowestIndex.pick(&f, &a), Some(2));
        a.set(2, false);
        assert_eq!(LowestIndex.pick(&f, &a), Some(3));
    }

    #[test]
    fn test_nothing_left() {
        let f = cnf(vec![vec![1]]);
        let mut a = Assignment::new();
        a.set(1, true);
        assert_eq!(FirstUnassigned.pick(&f, &a), None);
        assert_eq!(LowestIndex.pick(&Cnf::default(), &a), None);
    }

    #[test]
    fn test_parse_type() {
        assert_eq!("First".parse(), Ok(VariableSelectionType::First));
        assert_eq!("lowest".parse(), Ok(VariableSelectionType::Lowest));
        assert!("activity".parse::<VariableSelectionType>().is_err());
    }
}
