//! Human-oriented formula notations.
//!
//! Three textual forms are accepted:
//! - infix: `(1 OR -2) AND (2 OR NOT 3)`; the symbols `∧ ∨ ¬`, `& | ~` and
//!   an `x` prefix on variables (`¬x3`) are understood as well, so the output
//!   of [`to_readable`] reads back in;
//! - nested lists: `[[1, -2], [2, 3]]`;
//! - DIMACS, delegated to [`crate::sat::dimacs`].

use crate::sat::cnf::Cnf;
use crate::sat::dimacs;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::Literal;
use crate::sat::log::targets::PARSE as LOG_PARSE;
use itertools::Itertools;

/// Picks the notation from the shape of `input` and parses it.
///
/// DIMACS is chosen when the text has a `p cnf` line, starts with a `c`
/// comment, or holds nothing but integers. A leading `[` selects the list
/// form; anything else is read as infix.
///
/// # Errors
///
/// `Parse` errors from the chosen notation.
pub fn parse_formula(input: &str) -> Result<Cnf> {
    let text = input.trim();

    if text.contains("p cnf")
        || text.starts_with('c')
        || (!text.is_empty() && text.split_whitespace().all(|t| t.parse::<i32>().is_ok()))
    {
        log::debug!(target: LOG_PARSE, "Reading DIMACS");
        dimacs::parse_str(text)
    } else if text.starts_with('[') {
        log::debug!(target: LOG_PARSE, "Reading nested lists");
        parse_list(text)
    } else {
        log::debug!(target: LOG_PARSE, "Reading infix");
        parse_infix(text)
    }
}

/// Parses `(1 OR -2) AND (2 OR 3)`.
///
/// `TRUE` (or blank input) is the empty formula and `FALSE` the formula with
/// one empty clause.
///
/// # Errors
///
/// `Parse` on a misplaced operator or a token that is not a literal.
pub fn parse_infix(input: &str) -> Result<Cnf> {
    let text = input.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("true") {
        return Ok(Cnf::default());
    }
    if text.eq_ignore_ascii_case("false") {
        return Cnf::try_new([Vec::<i32>::new()]);
    }

    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut negate = false;
    let mut expect_literal = true;
    let mut last_line = 1;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let normalised = normalise_infix(line);

        for token in normalised.split_whitespace() {
            match token.to_ascii_uppercase().as_str() {
                "AND" => {
                    if expect_literal {
                        return Err(SolverError::parse(line_no, token, "expected a literal before AND"));
                    }
                    clauses.push(std::mem::take(&mut current));
                    expect_literal = true;
                }
                "OR" => {
                    if expect_literal {
                        return Err(SolverError::parse(line_no, token, "expected a literal before OR"));
                    }
                    expect_literal = true;
                }
                "NOT" => negate = !negate,
                _ => {
                    if !expect_literal {
                        return Err(SolverError::parse(line_no, token, "expected AND or OR"));
                    }
                    let lit = parse_infix_literal(line_no, token)?;
                    current.push(if negate { -lit } else { lit });
                    negate = false;
                    expect_literal = false;
                }
            }
        }
    }

    if expect_literal {
        return Err(SolverError::parse(last_line, "", "formula ends with an operator"));
    }
    clauses.push(current);

    Cnf::try_new(clauses)
}

fn normalise_infix(line: &str) -> String {
    line.replace(['(', ')'], " ")
        .replace('∧', " AND ")
        .replace('∨', " OR ")
        .replace('¬', " NOT ")
        .replace('&', " AND ")
        .replace('|', " OR ")
        .replace('~', " NOT ")
}

fn parse_infix_literal(line_no: usize, token: &str) -> Result<i32> {
    let (negated, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let digits = body
        .strip_prefix(['x', 'X'])
        .unwrap_or(body);

    let var = digits
        .parse::<u32>()
        .map_err(|_| SolverError::parse(line_no, token, "expected a variable"))?;
    let lit = Literal::new(var, !negated)
        .map_err(|_| SolverError::parse(line_no, token, "variables start at 1"))?;

    Ok(lit.to_i32())
}

/// Parses nested lists of integers, e.g. `[[1, -2], [2, 3]]`.
///
/// # Errors
///
/// `Parse` on unbalanced brackets or a token that is not an integer, and
/// `ZeroLiteral` for a `0` inside a clause.
pub fn parse_list(input: &str) -> Result<Cnf> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut number = String::new();
    let mut depth = 0usize;
    let mut opened = false;
    let mut line_no = 1;

    let flush = |number: &mut String, current: &mut Vec<i32>, line_no: usize| -> Result<()> {
        if number.is_empty() {
            return Ok(());
        }
        let lit = number
            .parse::<i32>()
            .map_err(|_| SolverError::parse(line_no, number.as_str(), "expected an integer literal"))?;
        current.push(lit);
        number.clear();
        Ok(())
    };

    for ch in input.trim().chars() {
        match ch {
            '[' => {
                if opened && depth == 0 {
                    return Err(SolverError::parse(line_no, "[", "text after the closing bracket"));
                }
                depth += 1;
                opened = true;
                if depth > 2 {
                    return Err(SolverError::parse(line_no, "[", "lists nest two levels deep"));
                }
            }
            ']' => {
                flush(&mut number, &mut current, line_no)?;
                match depth {
                    0 => return Err(SolverError::parse(line_no, "]", "unbalanced bracket")),
                    2 => clauses.push(std::mem::take(&mut current)),
                    _ => {}
                }
                depth -= 1;
            }
            '-' | '0'..='9' => {
                if depth != 2 {
                    return Err(SolverError::parse(line_no, ch.to_string(), "literal outside a clause"));
                }
                number.push(ch);
            }
            ',' | ' ' | '\t' | '\r' => flush(&mut number, &mut current, line_no)?,
            '\n' => {
                flush(&mut number, &mut current, line_no)?;
                line_no += 1;
            }
            other => {
                return Err(SolverError::parse(line_no, other.to_string(), "unexpected character"));
            }
        }
    }

    if !opened || depth != 0 {
        return Err(SolverError::parse(line_no, "", "unbalanced bracket"));
    }

    Cnf::try_new(clauses)
}

/// Renders `(x1 ∨ ¬x2) ∧ (x2 ∨ x3)`; `TRUE` for an empty formula and `FALSE`
/// when any clause is empty.
#[must_use]
pub fn to_readable(cnf: &Cnf) -> String {
    if cnf.is_empty() {
        return "TRUE".to_string();
    }
    if cnf.has_empty_clause() {
        return "FALSE".to_string();
    }

    cnf.iter()
        .map(|clause| {
            let lits = clause
                .iter()
                .map(|l| {
                    if l.polarity() {
                        format!("x{}", l.variable())
                    } else {
                        format!("¬x{}", l.variable())
                    }
                })
                .join(" ∨ ");
            format!("({lits})")
        })
        .join(" ∧ ")
}
