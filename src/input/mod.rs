use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    instance::*,
    solver::{Formula, Instance},
};

mod clause_lines;
mod dimacs;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error")]
    Io(#[from] io::Error),
    #[error("invalid literal on line {line}: {token:?}")]
    InvalidLiteral { line: usize, token: String },
    #[error("clause {clause} contains a zero literal")]
    ZeroLiteral { clause: usize },
    #[error("malformed header")]
    MalformedHeader,
    #[error("not a valid value")]
    InvalidNumber(#[from] num::ParseIntError),
    #[error("expected {expected} clauses, found {found}")]
    MissingClauses { expected: usize, found: usize },
    #[error("input ended inside a clause")]
    UnterminatedClause,
}

type Result<T> = std::result::Result<T, InputError>;

/// The layout of a problem file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// An ignored header line, then one clause per line. There is no terminating zero; every
    /// token is a literal.
    #[default]
    ClauseLines,
    /// DIMACS CNF: `c` comments, a `p cnf <vars> <clauses>` header, clauses terminated by `0`.
    Dimacs,
}

/// How many clauses to read from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClauseCount {
    /// Read exactly this many clauses, and fail if the input holds fewer.
    Declared(usize),
    #[default]
    UntilExhausted,
}

impl ClauseCount {
    fn is_satisfied_by(&self, read: usize) -> bool {
        match *self {
            ClauseCount::Declared(n) => read >= n,
            ClauseCount::UntilExhausted => false,
        }
    }

    fn check(&self, found: usize) -> Result<()> {
        match *self {
            ClauseCount::Declared(expected) if found < expected => {
                Err(InputError::MissingClauses { expected, found })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    pub path: PathBuf,
    pub format: InputFormat,
    pub clause_count: ClauseCount,
}

impl InputConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> InputConfig {
        InputConfig {
            path: path.as_ref().to_path_buf(),
            format: InputFormat::default(),
            clause_count: ClauseCount::default(),
        }
    }

    pub fn with_format(mut self, format: InputFormat) -> InputConfig {
        self.format = format;
        self
    }

    pub fn with_clause_count(mut self, clause_count: ClauseCount) -> InputConfig {
        self.clause_count = clause_count;
        self
    }
}

/// Reads the problem described by `config` from disk.
pub fn parse(config: &InputConfig) -> Result<Instance> {
    let file = File::open(&config.path)?;
    parse_reader(BufReader::new(file), config.format, config.clause_count)
}

pub fn parse_str(
    input: &str,
    format: InputFormat,
    clause_count: ClauseCount,
) -> Result<Instance> {
    parse_reader(input.as_bytes(), format, clause_count)
}

pub fn parse_reader<R: BufRead>(
    reader: R,
    format: InputFormat,
    clause_count: ClauseCount,
) -> Result<Instance> {
    let clauses = match format {
        InputFormat::ClauseLines => clause_lines::read_clauses(reader, clause_count)?,
        InputFormat::Dimacs => dimacs::read_clauses(reader, clause_count)?,
    };
    Ok(Instance::new(Formula::from_clauses(clauses)))
}

/// Builds a formula from signed integer clauses, rejecting zero before it can reach the solver.
pub fn formula_from_signed<C: AsRef<[i64]>>(clauses: &[C]) -> Result<Formula> {
    clauses
        .iter()
        .enumerate()
        .map(|(ix, clause)| {
            clause
                .as_ref()
                .iter()
                .map(|&value| to_literal(value, ix + 1))
                .collect::<Result<Clause>>()
        })
        .collect()
}

/// Decides satisfiability of signed integer clauses.
pub fn solve_clauses<C: AsRef<[i64]>>(clauses: &[C]) -> Result<bool> {
    let formula = formula_from_signed(clauses)?;
    Ok(Instance::new(formula).solve().satisfiable)
}

// In-memory clauses have no lines, so errors point at the clause instead
fn to_literal(value: i64, clause: usize) -> Result<Literal> {
    match value {
        0 => Err(InputError::ZeroLiteral { clause }),
        _ => Literal::from_signed(value).ok_or_else(|| InputError::InvalidLiteral {
            line: clause,
            token: value.to_string(),
        }),
    }
}

fn parse_literal(token: &str, line: usize, clause: usize) -> Result<Literal> {
    let invalid = || InputError::InvalidLiteral {
        line,
        token: token.to_string(),
    };
    match token.parse::<i64>().map_err(|_| invalid())? {
        0 => Err(InputError::ZeroLiteral { clause }),
        value => Literal::from_signed(value).ok_or_else(invalid),
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use crate::input::*;

    #[test]
    fn test_formula_from_signed() {
        let formula = formula_from_signed(&[vec![1, -2], vec![3]]).unwrap();
        assert_eq!(formula.len(), 2);
        assert_eq!(formula.literal_count(), 3);

        let err = formula_from_signed(&[vec![1], vec![2, 0]]).unwrap_err();
        assert!(matches!(err, InputError::ZeroLiteral { clause: 2 }));
    }

    #[test]
    fn test_solve_clauses() {
        assert!(solve_clauses(&[vec![1, 2], vec![-1, 2]]).unwrap());
        assert!(!solve_clauses(&[vec![1], vec![-1]]).unwrap());
        let empty: &[Vec<i64>] = &[];
        assert!(solve_clauses(empty).unwrap());
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "3 clauses").unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "-1 2").unwrap();
        writeln!(file, "-2 3").unwrap();
        file.flush().unwrap();

        let config = InputConfig::new(file.path()).with_clause_count(ClauseCount::Declared(3));
        let instance = parse(&config).unwrap();
        assert_eq!(instance.formula().len(), 3);
        assert!(instance.solve().satisfiable);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = InputConfig::new(dir.path().join("missing.txt"));
        assert!(matches!(parse(&config), Err(InputError::Io(_))));
    }
}
