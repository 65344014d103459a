use core::fmt;

use fnv::FnvHashSet;
use itertools::Itertools;
use log::trace;

use crate::instance::*;

use super::trail::{Edit, Trail};

/// What a sweep should do with the clause it is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sweep {
    Keep,
    /// Drop the whole clause.
    Remove,
    /// Drop every occurrence of the literal from the clause, keeping the rest.
    Strip(Literal),
}

/// An ordered collection of clauses. Every mutation goes through the trail, so a formula
/// can be rolled back to any open checkpoint.
#[derive(Clone, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
    trail: Trail,
}

impl Formula {
    pub fn new() -> Formula {
        Formula::default()
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Formula {
        Formula {
            clauses,
            trail: Trail::new(),
        }
    }

    /// A fully independent copy of the current clauses. The copy starts without history.
    pub fn duplicate(&self) -> Formula {
        Formula::from_clauses(self.clauses.clone())
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|cl| cl.is_empty())
    }

    /// Total number of literal occurrences across all clauses
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(|cl| cl.len()).sum()
    }

    /// Number of distinct variables mentioned by the clauses
    pub fn variable_count(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|cl| cl.literals())
            .map(|lit| lit.var())
            .collect::<FnvHashSet<_>>()
            .len()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
        self.trail.record(Edit::Appended);
    }

    pub fn prepend(&mut self, clause: Clause) {
        self.clauses.insert(0, clause);
        self.trail.record(Edit::Prepended);
    }

    pub(crate) fn remove_clause(&mut self, index: usize) -> Clause {
        let clause = self.clauses.remove(index);
        if self.trail.is_recording() {
            self.trail.record(Edit::ClauseRemoved {
                index,
                clause: clause.clone(),
            });
        }
        clause
    }

    /// Visits every clause once, in order, applying the returned `Sweep` to it.
    pub(crate) fn sweep<F>(&mut self, mut visit: F)
    where
        F: FnMut(&Clause) -> Sweep,
    {
        let clauses = std::mem::take(&mut self.clauses);
        self.clauses.reserve(clauses.len());

        for mut clause in clauses.into_iter() {
            // Clauses already visited sit before this one, unvisited ones after it, so this
            // is the clause's index at the time of the edit
            let index = self.clauses.len();
            match visit(&clause) {
                Sweep::Keep => self.clauses.push(clause),
                Sweep::Remove => self.trail.record(Edit::ClauseRemoved { index, clause }),
                Sweep::Strip(literal) => {
                    let mut position = 0;
                    while position < clause.len() {
                        if clause.literal_at(position) == literal {
                            clause.remove_at(position);
                            self.trail.record(Edit::LiteralRemoved {
                                index,
                                position,
                                literal,
                            });
                        } else {
                            position += 1;
                        }
                    }
                    self.clauses.push(clause);
                }
            }
        }
    }

    /// Starts recording edits. Everything done from here on is reverted by the matching
    /// `rollback`.
    pub fn checkpoint(&mut self) {
        self.trail.checkpoint();
    }

    /// Reverts every edit made since the innermost open checkpoint. Returns false if no
    /// checkpoint was open.
    pub fn rollback(&mut self) -> bool {
        let edits = match self.trail.unwind() {
            Some(edits) => edits,
            None => return false,
        };
        let mut reverted = 0;
        for edit in edits {
            reverted += 1;
            match edit {
                Edit::Prepended => {
                    self.clauses.remove(0);
                }
                Edit::Appended => {
                    self.clauses.pop();
                }
                Edit::ClauseRemoved { index, clause } => self.clauses.insert(index, clause),
                Edit::LiteralRemoved {
                    index,
                    position,
                    literal,
                } => self.clauses[index].insert_at(position, literal),
            }
        }
        trace!("rolled back {} edits", reverted);
        true
    }

    /// The number of open checkpoints
    pub fn depth(&self) -> usize {
        self.trail.depth()
    }
}

impl From<Vec<Vec<Literal>>> for Formula {
    fn from(cnf: Vec<Vec<Literal>>) -> Self {
        Formula::from_clauses(cnf.into_iter().map(Clause::new).collect())
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Formula::from_clauses(iter.into_iter().collect())
    }
}

impl PartialEq for Formula {
    // History is not part of a formula's value
    fn eq(&self, other: &Self) -> bool {
        self.clauses == other.clauses
    }
}

impl Eq for Formula {}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:?}]", self.clauses.iter().format(", "))
    }
}
