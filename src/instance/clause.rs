use core::fmt;

use itertools::Itertools;

use super::Literal;

/// A disjunction of literals, kept in the order they were given.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(lits: Vec<Literal>) -> Clause {
        Clause { literals: lits }
    }

    pub fn unit(lit: Literal) -> Clause {
        Clause {
            literals: vec![lit],
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn first(&self) -> Option<Literal> {
        self.literals.first().copied()
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub(crate) fn literal_at(&self, position: usize) -> Literal {
        self.literals[position]
    }

    pub(crate) fn remove_at(&mut self, position: usize) -> Literal {
        self.literals.remove(position)
    }

    pub(crate) fn insert_at(&mut self, position: usize, lit: Literal) {
        self.literals.insert(position, lit)
    }

    pub fn into_literals(self) -> Vec<Literal> {
        self.literals
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:?})", self.literals.iter().format(" | "))
    }
}
