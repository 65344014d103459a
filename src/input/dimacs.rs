use std::io::BufRead;

use log::{debug, trace};

use crate::instance::*;

use super::{parse_literal, ClauseCount, InputError, Result};

/// A word of input along with the line it came from
type Word = (usize, String);

pub(crate) fn read_clauses<R: BufRead>(reader: R, count: ClauseCount) -> Result<Vec<Clause>> {
    let mut words = reader
        .lines()
        .enumerate()
        // Filter out lines starting with c - these are comments
        .filter(|(_, l)| match l {
            Ok(line) => !line.trim_start().starts_with('c'),
            // Keep errors! We need to terminate ASAP
            _ => true,
        })
        // Some benchmark sets end the clause list with a `%` line
        .take_while(|(_, l)| match l {
            Ok(line) => line.trim() != "%",
            _ => true,
        })
        .flat_map(|(ix, line)| match line {
            Ok(line) => line
                .split_ascii_whitespace()
                .map(|w| Ok((ix + 1, w.to_string())))
                .collect::<Vec<Result<Word>>>(),
            Err(err) => vec![Err(err.into())],
        });

    let header = DimacsHeader::parse(&mut words)?;
    trace!("header: {:?}", header);

    let mut cnf: Vec<Clause> = vec![];
    let mut current_clause: Vec<Literal> = vec![];

    for mb_word in words {
        if count.is_satisfied_by(cnf.len()) {
            break;
        }
        let (line, word) = mb_word?;
        if word == "0" {
            cnf.push(Clause::new(std::mem::take(&mut current_clause)));
            continue;
        }
        current_clause.push(parse_literal(&word, line, cnf.len() + 1)?);
    }

    if !current_clause.is_empty() {
        return Err(InputError::UnterminatedClause);
    }
    count.check(cnf.len())?;
    header.compare(&cnf);
    Ok(cnf)
}

#[derive(Debug, Clone)]
struct DimacsHeader {
    var_count: u64,
    clause_count: u64,
}

impl DimacsHeader {
    fn parse<I>(words: &mut I) -> Result<Self>
    where
        I: Iterator<Item = Result<Word>>,
    {
        let mut next = || match words.next() {
            Some(x) => x.map(|(_, w)| w),
            None => Err(InputError::MalformedHeader),
        };

        let p = next()?;
        let cnf = next()?;
        if p != "p" || cnf != "cnf" {
            return Err(InputError::MalformedHeader);
        }
        let var_count = next()?;
        let clause_count = next()?;
        Ok(Self {
            var_count: var_count.parse::<u64>()?,
            clause_count: clause_count.parse::<u64>()?,
        })
    }

    // The header is advisory. Disagreements are reported, not rejected
    fn compare(&self, cnf: &[Clause]) {
        if cnf.len() as u64 != self.clause_count {
            debug!(
                "header declares {} clauses, read {}",
                self.clause_count,
                cnf.len()
            );
        }
        let highest = cnf
            .iter()
            .flat_map(|cl| cl.literals())
            .map(|lit| lit.var().index())
            .max()
            .unwrap_or(0);
        if highest > self.var_count {
            debug!(
                "header declares {} variables, found x{}",
                self.var_count, highest
            );
        }
    }
}
