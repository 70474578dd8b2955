#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A reader and writer for the DIMACS CNF file format.
//!
//! The format is line oriented:
//! - Comment lines start with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>` announces the size.
//!   The counts are checked against what was read and a mismatch is logged,
//!   but the clauses found are what the formula is built from.
//! - Clauses are whitespace separated integers terminated by `0`. A clause
//!   may span several lines, and a `0` on its own is an empty clause.
//! - An optional `%` line marks the end of data (used by SATLIB instances).

use crate::sat::cnf::Cnf;
use crate::sat::error::{Result, SolverError};
use crate::sat::log::targets::PARSE as LOG_PARSE;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses DIMACS data from any `BufRead` source.
///
/// # Errors
///
/// `Io` if reading fails, `Parse` for a token that is not an integer or a
/// malformed problem line.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut header: Option<(usize, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => {}
            Some(token) if token.starts_with('c') => {}
            Some(&"p") => header = Some(parse_problem_line(line_no, &line)?),
            Some(_) => {
                for token in parts {
                    let lit = token.parse::<i32>().map_err(|e| {
                        SolverError::parse(line_no, token, format!("expected an integer literal: {e}"))
                    })?;

                    if lit == 0 {
                        clauses.push(std::mem::take(&mut current));
                    } else {
                        current.push(lit);
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        log::debug!(target: LOG_PARSE, "Accepting unterminated final clause");
        clauses.push(current);
    }

    let cnf = Cnf::try_new(clauses)?;

    if let Some((vars, count)) = header {
        if vars < cnf.num_vars || count != cnf.len() {
            log::warn!(
                target: LOG_PARSE,
                "Header announces {vars} variables and {count} clauses, read {} and {}",
                cnf.num_vars,
                cnf.len()
            );
        }
    }

    Ok(cnf)
}

fn parse_problem_line(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let parse = |s: &str| {
                s.parse::<usize>()
                    .map_err(|_| SolverError::parse(line_no, s, "expected a count"))
            };
            Ok((parse(vars)?, parse(clauses)?))
        }
        _ => Err(SolverError::parse(
            line_no,
            line.trim(),
            "expected 'p cnf <variables> <clauses>'",
        )),
    }
}

/// Parses a DIMACS string.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf> {
    parse_dimacs(input.as_bytes())
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// `Io` if the file cannot be opened or read, otherwise see [`parse_dimacs`].
pub fn parse_file(file_path: impl AsRef<Path>) -> Result<Cnf> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Renders a formula in DIMACS. An empty formula is `p cnf 0 0`.
#[must_use]
pub fn to_dimacs(cnf: &Cnf) -> String {
    cnf.to_string()
}
