use crate::sat::assignment::Assignment;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Literal storage for a clause. Most clauses in practice are short.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// A disjunction of literals, kept in input order.
///
/// An empty clause is the constant `false`. Duplicate literals and
/// tautologies are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    pub literals: LiteralStorage,
}

impl Clause {
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    /// A clause holding both `l` and `¬l` is always true.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.iter().any(|&lit| self.contains(lit.negated()))
    }

    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.iter()
            .any(|&lit| assignment.literal_value(lit) == Some(true))
    }

    /// A copy of the clause with every occurrence of `lit` removed.
    #[must_use]
    pub fn without(&self, lit: Literal) -> Self {
        Self {
            literals: self.iter().copied().filter(|&l| l != lit).collect(),
        }
    }

    #[must_use]
    pub fn to_i32s(&self) -> Vec<i32> {
        self.iter().map(|l| l.to_i32()).collect()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl TryFrom<&[i32]> for Clause {
    type Error = SolverError;

    fn try_from(literals: &[i32]) -> Result<Self> {
        literals
            .iter()
            .enumerate()
            .map(|(position, &l)| {
                Literal::try_from(l).map_err(|e| match e {
                    SolverError::ZeroLiteral { .. } => SolverError::ZeroLiteral {
                        clause: 0,
                        position,
                    },
                    other => other,
                })
            })
            .collect::<Result<LiteralStorage>>()
            .map(|literals| Self { literals })
    }
}

impl TryFrom<Vec<i32>> for Clause {
    type Error = SolverError;

    fn try_from(literals: Vec<i32>) -> Result<Self> {
        Self::try_from(literals.as_slice())
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{} 0", self.iter().join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        Clause::try_from(lits).unwrap()
    }

    fn lit(l: i32) -> Literal {
        Literal::try_from(l).unwrap()
    }

    #[test]
    fn test_new() {
        let c = clause(&[1, 2, 3]);
        assert_eq!(c.len(), 3);
        assert!(!c.is_unit());
        assert!(clause(&[4]).is_unit());
        assert!(clause(&[]).is_empty());
    }

    #[test]
    fn test_iter() {
        let c = clause(&[1, -2, 3]);
        let mut iter = c.iter();
        assert_eq!(iter.next(), Some(&lit(1)));
        assert_eq!(iter.next(), Some(&lit(-2)));
        assert_eq!(iter.next(), Some(&lit(3)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_zero_position_reported() {
        let err = Clause::try_from(vec![1, 0, 2]).unwrap_err();
        assert!(matches!(
            err,
            SolverError::ZeroLiteral { position: 1, .. }
        ));
    }

    #[test]
    fn test_tautology() {
        assert!(clause(&[1, 2, -1]).is_tautology());
        assert!(!clause(&[1, 2, 1]).is_tautology());
    }

    #[test]
    fn test_without_keeps_order() {
        let c = clause(&[3, -1, 2, -1]);
        assert_eq!(c.without(lit(-1)).to_i32s(), vec![3, 2]);
    }

    #[test]
    fn test_satisfied_by() {
        let mut a = Assignment::new();
        let c = clause(&[1, -2]);
        assert!(!c.is_satisfied_by(&a));
        a.set(2, true);
        assert!(!c.is_satisfied_by(&a));
        a.set(1, true);
        assert!(c.is_satisfied_by(&a));
    }

    #[test]
    fn test_display() {
        assert_eq!(clause(&[1, -2]).to_string(), "1 -2 0");
        assert_eq!(clause(&[]).to_string(), "0");
    }
}
