#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The decision log.
//!
//! Every value the search gives a variable is appended here together with
//! why it was given. The log is only read to derive statistics; the search
//! never consults it to decide anything.

use crate::sat::literal::Variable;
use core::ops::Index;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    /// Forced by a unit clause.
    UnitPropagation,
    /// The variable occurred with a single polarity.
    PureLiteral,
    /// First polarity tried at a choice point.
    Branch,
    /// Second polarity, tried after the first one failed.
    Backtrack,
}

impl Reason {
    pub const ALL: [Self; 4] = [
        Self::UnitPropagation,
        Self::PureLiteral,
        Self::Branch,
        Self::Backtrack,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnitPropagation => "unit_propagation",
            Self::PureLiteral => "pure_literal",
            Self::Branch => "branch",
            Self::Backtrack => "backtrack",
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub struct Step {
    pub variable: Variable,
    pub value: bool,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    t: Vec<Step>,
}

impl Index<usize> for Trail {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl Trail {
    #[must_use]
    pub const fn new() -> Self {
        Self { t: Vec::new() }
    }

    pub fn push(&mut self, variable: Variable, value: bool, reason: Reason) {
        self.t.push(Step {
            variable,
            value,
            reason,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.t.iter()
    }

    /// Number of steps logged with `reason`.
    #[must_use]
    pub fn count(&self, reason: Reason) -> usize {
        self.iter().filter(|s| s.reason == reason).count()
    }

    pub fn clear(&mut self) {
        self.t.clear();
    }
}
