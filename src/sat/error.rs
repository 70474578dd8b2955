//! Errors raised at the boundary of the solver.
//!
//! Only malformed input is an error. Conflicts and exhausted branches are
//! ordinary search outcomes and never surface here.

use thiserror::Error;

/// The error type for building and reading formulas.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A clause contained the literal `0`.
    #[error("clause {clause} contains a zero literal at position {position}")]
    ZeroLiteral {
        /// Index of the offending clause in the formula.
        clause: usize,
        /// Index of the literal inside the clause.
        position: usize,
    },

    /// A variable index that cannot be represented as a signed literal.
    #[error("variable {0} is out of range")]
    VariableOutOfRange(u64),

    /// Text input that does not match the expected notation.
    #[error("parse error on line {line} at '{token}': {message}")]
    Parse {
        /// 1-based line number of the offending token.
        line: usize,
        /// The token that failed to parse.
        token: String,
        /// What was expected instead.
        message: String,
    },

    /// I/O error while reading or writing a formula.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn parse(line: usize, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            token: token.into(),
            message: message.into(),
        }
    }
}

/// Convenient result alias used across the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SolverError::ZeroLiteral {
            clause: 2,
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "clause 2 contains a zero literal at position 1"
        );

        let err = SolverError::parse(3, "abc", "expected an integer literal");
        assert_eq!(
            err.to_string(),
            "parse error on line 3 at 'abc': expected an integer literal"
        );
    }
}
