//! Synthetic formulas: uniform random k-SAT and pigeonhole instances.
//!
//! Pure data producers; nothing here touches the solver.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::Literal;
use fastrand::Rng;

/// Clause-to-variable ratio near the 3-SAT satisfiability threshold.
pub const DEFAULT_3SAT_RATIO: f64 = 4.3;

/// Largest `n` whose pigeonhole variables `1..=n * (n + 1)` fit a literal.
pub const MAX_PIGEONHOLE_HOLES: u32 = 46_340;

/// `num_clauses` clauses of `min(k, num_vars)` distinct variables each, every
/// polarity chosen by a fair coin. The same `seed` always yields the same
/// formula.
///
/// # Errors
///
/// `VariableOutOfRange` if `num_vars` does not fit a signed 32-bit literal.
pub fn random_ksat(num_vars: u32, num_clauses: usize, k: usize, seed: u64) -> Result<Cnf> {
    if num_vars > 0 {
        Literal::new(num_vars, true)?;
    }

    let mut rng = Rng::with_seed(seed);
    let width = k.min(usize::try_from(num_vars).unwrap_or(usize::MAX));

    let clauses = (0..num_clauses)
        .map(|_| {
            rng.choose_multiple(1..=num_vars, width)
                .into_iter()
                .map(|var| Literal::of(var, rng.bool()))
                .collect::<Clause>()
        })
        .collect();

    Ok(Cnf::from_clauses(clauses))
}

/// Random 3-SAT with `floor(num_vars * ratio)` clauses.
///
/// # Errors
///
/// As [`random_ksat`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn random_3sat(num_vars: u32, ratio: f64, seed: u64) -> Result<Cnf> {
    let num_clauses = (f64::from(num_vars) * ratio).floor().max(0.0) as usize;
    random_ksat(num_vars, num_clauses, 3, seed)
}

/// `n + 1` pigeons into `n` holes. Unsatisfiable for every `n >= 1`.
///
/// Pigeon `p` sits in hole `h` when variable `p * n + h + 1` is true.
///
/// # Errors
///
/// `VariableOutOfRange` above [`MAX_PIGEONHOLE_HOLES`] holes.
pub fn pigeonhole(n: u32) -> Result<Cnf> {
    let top = u64::from(n) * (u64::from(n) + 1);
    if n > MAX_PIGEONHOLE_HOLES {
        return Err(SolverError::VariableOutOfRange(top));
    }

    let var = |pigeon: u32, hole: u32| pigeon * n + hole + 1;
    let mut clauses: Vec<Clause> = Vec::new();

    for pigeon in 0..=n {
        clauses.push((0..n).map(|hole| Literal::of(var(pigeon, hole), true)).collect());
    }

    for hole in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                clauses.push(Clause::new([
                    Literal::of(var(p1, hole), false),
                    Literal::of(var(p2, hole), false),
                ]));
            }
        }
    }

    Ok(Cnf::from_clauses(clauses))
}
