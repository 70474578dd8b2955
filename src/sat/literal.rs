#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and signed literals.
//!
//! A literal is stored as a non-zero `i32`: the absolute value is the
//! variable, the sign is the polarity. Using `NonZeroI32` keeps `0` out of
//! every clause by construction and gives `Option<Literal>` a free niche.

use crate::sat::error::{Result, SolverError};
use core::num::NonZeroI32;
use core::ops::{Neg, Not};
use std::fmt::{self, Display};

/// A propositional variable, 1-based.
pub type Variable = u32;

/// A variable together with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(NonZeroI32);

impl Literal {
    /// Builds the literal of `var` with the given polarity.
    ///
    /// # Errors
    ///
    /// Returns `VariableOutOfRange` if `var` is `0` or does not fit a signed
    /// 32-bit literal.
    pub fn new(var: Variable, polarity: bool) -> Result<Self> {
        let value = i32::try_from(var)
            .ok()
            .and_then(NonZeroI32::new)
            .ok_or(SolverError::VariableOutOfRange(u64::from(var)))?;

        Ok(Self(if polarity { value } else { -value }))
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.get().unsigned_abs()
    }

    /// `true` for a positive literal.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.get() > 0
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    #[must_use]
    pub fn negated(self) -> Self {
        Self(-self.0)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0.get()
    }

    /// The literal made true by giving `var` the value `value`.
    ///
    /// Callers pass variables that were read from a literal or checked with
    /// [`Literal::new`] first.
    pub(crate) fn of(var: Variable, value: bool) -> Self {
        debug_assert!(var != 0 && i32::try_from(var).is_ok());
        let magnitude = i32::try_from(var)
            .ok()
            .and_then(NonZeroI32::new)
            .unwrap_or(NonZeroI32::MAX);
        Self(if value { magnitude } else { -magnitude })
    }
}

impl TryFrom<i32> for Literal {
    type Error = SolverError;

    fn try_from(value: i32) -> Result<Self> {
        let lit = NonZeroI32::new(value).ok_or(SolverError::ZeroLiteral {
            clause: 0,
            position: 0,
        })?;
        if lit == NonZeroI32::MIN {
            return Err(SolverError::VariableOutOfRange(u64::from(value.unsigned_abs())));
        }
        Ok(Self(lit))
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.to_i32()
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        let pos = Literal::new(1, true).unwrap();
        let neg = Literal::new(1, false).unwrap();
        assert_eq!(pos.negated(), neg);
        assert_eq!(-neg, pos);
        assert_eq!(!pos, neg);
    }

    #[test]
    fn test_variable_and_polarity() {
        let lit = Literal::try_from(-7).unwrap();
        assert_eq!(lit.variable(), 7);
        assert!(!lit.polarity());
        assert!(lit.is_negated());
        assert_eq!(lit.to_i32(), -7);
        assert_eq!(lit.to_string(), "-7");
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            Literal::try_from(0),
            Err(SolverError::ZeroLiteral { .. })
        ));
        assert!(matches!(
            Literal::new(0, true),
            Err(SolverError::VariableOutOfRange(0))
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(Literal::new(u32::MAX, true).is_err());
        assert!(Literal::try_from(i32::MIN).is_err());
        assert!(Literal::try_from(i32::MAX).is_ok());
    }

    #[test]
    fn test_of() {
        assert_eq!(Literal::of(3, true).to_i32(), 3);
        assert_eq!(Literal::of(3, false).to_i32(), -3);
    }
}
