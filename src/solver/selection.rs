use crate::instance::*;

use super::formula::Formula;

/// Picks the literal to branch on: the first literal of the first clause with more than one
/// literal. None when every clause has at most one literal.
pub fn select_literal(formula: &Formula) -> Option<Literal> {
    formula
        .iter()
        .find(|cl| cl.len() > 1)
        .and_then(|cl| cl.first())
}
