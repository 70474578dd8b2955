//! Formula clean-up passes that run before, and independently of, the search.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::log::targets::PREPROCESSING as LOG_PREPROCESSING;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::Debug;
use std::sync::Arc;

pub trait Preprocessor {
    fn preprocess(&self, cnf: &[Clause]) -> Vec<Clause>;
}

#[derive(Clone, Default)]
pub struct PreprocessorChain {
    preprocessors: Vec<Arc<dyn Preprocessor>>,
}

impl Debug for PreprocessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreprocessorChain")
            .field("len", &self.preprocessors.len())
            .finish()
    }
}

impl PreprocessorChain {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
        }
    }

    /// Tautologies out, literals deduplicated and sorted, duplicate clauses out.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .add_preprocessor(TautologyElimination)
            .add_preprocessor(DuplicateLiteralElimination)
            .add_preprocessor(DuplicateClauseElimination)
    }

    #[must_use]
    pub fn add_preprocessor<P: Preprocessor + 'static>(self, preprocessor: P) -> Self {
        let mut preprocessors = self.preprocessors;
        preprocessors.push(Arc::new(preprocessor));
        Self { preprocessors }
    }

    /// Runs the chain over a whole formula.
    #[must_use]
    pub fn apply(&self, cnf: &Cnf) -> Cnf {
        let clauses = self.preprocess(&cnf.clauses);
        log::debug!(
            target: LOG_PREPROCESSING,
            "{} clauses reduced to {}",
            cnf.len(),
            clauses.len()
        );
        Cnf::from_clauses(clauses)
    }
}

impl Preprocessor for PreprocessorChain {
    fn preprocess(&self, cnf: &[Clause]) -> Vec<Clause> {
        self.preprocessors
            .iter()
            .fold(Vec::from(cnf), |cnf, preprocessor| {
                preprocessor.preprocess(&cnf)
            })
    }
}

/// Drops clauses that contain a literal and its negation.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct TautologyElimination;

impl Preprocessor for TautologyElimination {
    fn preprocess(&self, cnf: &[Clause]) -> Vec<Clause> {
        cnf.iter()
            .filter(|clause| !clause.is_tautology())
            .cloned()
            .collect()
    }
}

/// Removes repeated literals inside each clause, leaving them sorted by
/// signed value.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct DuplicateLiteralElimination;

impl Preprocessor for DuplicateLiteralElimination {
    fn preprocess(&self, cnf: &[Clause]) -> Vec<Clause> {
        cnf.iter()
            .map(|clause| {
                clause
                    .iter()
                    .copied()
                    .sorted_unstable_by_key(|l| l.to_i32())
                    .dedup()
                    .collect()
            })
            .collect()
    }
}

/// Keeps the first copy of clauses that are literally equal.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct DuplicateClauseElimination;

impl Preprocessor for DuplicateClauseElimination {
    fn preprocess(&self, cnf: &[Clause]) -> Vec<Clause> {
        let mut seen: FxHashSet<&Clause> = FxHashSet::default();
        cnf.iter()
            .filter(|&clause| seen.insert(clause))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(v: Vec<Vec<i32>>) -> Vec<Clause> {
        Cnf::try_from(v).unwrap().clauses
    }

    fn ints(cs: &[Clause]) -> Vec<Vec<i32>> {
        cs.iter().map(Clause::to_i32s).collect()
    }

    #[test]
    fn test_tautology_elimination() {
        let out = TautologyElimination.preprocess(&clauses(vec![vec![1, -1], vec![1, 2]]));
        assert_eq!(ints(&out), vec![vec![1, 2]]);
    }

    #[test]
    fn test_duplicate_literals() {
        let out = DuplicateLiteralElimination.preprocess(&clauses(vec![vec![3, 1, 3, -2]]));
        assert_eq!(ints(&out), vec![vec![-2, 1, 3]]);
    }

    #[test]
    fn test_duplicate_clauses() {
        let out = DuplicateClauseElimination.preprocess(&clauses(vec![vec![1, 2], vec![2, 3], vec![1, 2]]));
        assert_eq!(ints(&out), vec![vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn test_standard_chain() {
        let cnf = Cnf::try_from(vec![vec![1, -1], vec![1, 2], vec![2, 1, 1], vec![2, 3]]).unwrap();
        let simplified = PreprocessorChain::standard().apply(&cnf);
        assert_eq!(simplified.to_vecs(), vec![vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let cnf = Cnf::try_from(vec![vec![2, 1], vec![1, -1]]).unwrap();
        assert_eq!(PreprocessorChain::new().apply(&cnf), cnf);
    }
}
