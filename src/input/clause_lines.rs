use std::io::BufRead;

use log::trace;

use crate::instance::*;

use super::{parse_literal, ClauseCount, Result};

/// Reads one clause per line after a single ignored header line. Blank lines are skipped and
/// do not count towards a declared clause count.
pub(crate) fn read_clauses<R: BufRead>(reader: R, count: ClauseCount) -> Result<Vec<Clause>> {
    let mut lines = reader.lines().enumerate();

    if let Some((_, header)) = lines.next() {
        trace!("header: {:?}", header?);
    }

    let mut cnf: Vec<Clause> = vec![];
    for (ix, line) in lines {
        if count.is_satisfied_by(cnf.len()) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let clause_no = cnf.len() + 1;
        let clause = line
            .split_ascii_whitespace()
            .map(|token| parse_literal(token, ix + 1, clause_no))
            .collect::<Result<Clause>>()?;
        cnf.push(clause);
    }

    count.check(cnf.len())?;
    Ok(cnf)
}
