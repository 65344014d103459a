mod formula;
mod search;
mod selection;
mod trail;
mod unit_propagator;

pub use crate::solver::formula::Formula;
pub use crate::solver::search::*;
pub use crate::solver::selection::select_literal;
pub use crate::solver::unit_propagator::{find_unit_clause, propagate, propagate_to_fixpoint};
