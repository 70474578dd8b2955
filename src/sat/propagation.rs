#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The two deterministic simplification passes run before every decision:
//! unit propagation to a fixpoint, then one round of pure literal
//! elimination.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Variable;
use crate::sat::log::targets::{PROPAGATION as LOG_PROPAGATION, PURE as LOG_PURE};
use crate::sat::trail::{Reason, Trail};
use rustc_hash::FxHashMap;

/// Where unit propagation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Propagation {
    /// No unit clause is left. Carries the simplified formula.
    Settled(Cnf),
    /// Every clause was satisfied.
    Satisfied,
    /// A variable was forced both ways, or a clause lost its last literal.
    Conflict,
}

/// Assigns the literal of the first unit clause and simplifies, until no
/// unit clause remains.
///
/// The formula is checked for emptiness and for an empty clause after every
/// simplification, not only once the loop ends.
pub fn unit_propagate(mut cnf: Cnf, assignment: &mut Assignment, trail: &mut Trail) -> Propagation {
    while let Some(lit) = cnf.find_unit() {
        let (var, value) = (lit.variable(), lit.polarity());

        match assignment.var_value(var) {
            Some(current) if current != value => {
                log::trace!(target: LOG_PROPAGATION, "Conflict on {var}: forced {value}, holds {current}");
                return Propagation::Conflict;
            }
            Some(_) => {}
            None => {
                log::trace!(target: LOG_PROPAGATION, "Unit {lit}");
                assignment.set(var, value);
                trail.push(var, value, Reason::UnitPropagation);
            }
        }

        cnf = cnf.simplify(var, value);

        if cnf.is_empty() {
            return Propagation::Satisfied;
        }
        if cnf.has_empty_clause() {
            log::trace!(target: LOG_PROPAGATION, "Empty clause after {lit}");
            return Propagation::Conflict;
        }
    }

    Propagation::Settled(cnf)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occurrence {
    Positive,
    Negative,
    Mixed,
}

impl Occurrence {
    const fn of(polarity: bool) -> Self {
        if polarity {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    const fn merge(self, polarity: bool) -> Self {
        match (self, polarity) {
            (Self::Positive, true) | (Self::Negative, false) => self,
            _ => Self::Mixed,
        }
    }
}

/// Variables occurring with one polarity only, paired with that polarity,
/// in order of first occurrence.
#[must_use]
pub fn find_pure_literals(cnf: &Cnf) -> Vec<(Variable, bool)> {
    let mut seen: FxHashMap<Variable, Occurrence> = FxHashMap::default();
    let mut order = Vec::new();

    for &lit in cnf.iter().flat_map(|c| c.iter()) {
        let var = lit.variable();
        seen.entry(var)
            .and_modify(|occ| *occ = occ.merge(lit.polarity()))
            .or_insert_with(|| {
                order.push(var);
                Occurrence::of(lit.polarity())
            });
    }

    order
        .into_iter()
        .filter_map(|var| match seen[&var] {
            Occurrence::Positive => Some((var, true)),
            Occurrence::Negative => Some((var, false)),
            Occurrence::Mixed => None,
        })
        .collect()
}

/// Assigns every unassigned pure variable the polarity it occurs with.
///
/// Purity is decided once, on the formula as passed in; the simplifications
/// made by this pass do not change which variables it assigns.
pub fn eliminate_pure_literals(mut cnf: Cnf, assignment: &mut Assignment, trail: &mut Trail) -> Cnf {
    for (var, value) in find_pure_literals(&cnf) {
        if assignment.is_assigned(var) {
            continue;
        }

        log::trace!(target: LOG_PURE, "Pure {var} = {value}");
        assignment.set(var, value);
        trail.push(var, value, Reason::PureLiteral);
        cnf = cnf.simplify(var, value);
    }

    cnf
}
