use log::trace;

use crate::instance::*;

use super::formula::{Formula, Sweep};

/// Finds the first unit clause, removes it from the formula and returns its literal.
pub fn find_unit_clause(formula: &mut Formula) -> Option<Literal> {
    let index = formula.iter().position(|cl| cl.is_unit())?;
    formula.remove_clause(index).first()
}

/// Resolves `unit` against every clause: clauses containing it are satisfied and dropped,
/// occurrences of its negation are falsified and dropped from the clauses that hold them.
pub fn propagate(formula: &mut Formula, unit: Literal) {
    let falsified = unit.invert();
    formula.sweep(|clause| {
        if clause.contains(unit) {
            Sweep::Remove
        } else if clause.contains(falsified) {
            Sweep::Strip(falsified)
        } else {
            Sweep::Keep
        }
    });
}

/// Propagates unit clauses until none remain. Returns the number of units propagated.
///
/// Each round removes at least one literal occurrence (the unit clause itself), so this
/// always terminates.
pub fn propagate_to_fixpoint(formula: &mut Formula) -> usize {
    let mut propagated = 0;
    while let Some(unit) = find_unit_clause(formula) {
        trace!("unit: {:?}", unit);
        propagate(formula, unit);
        propagated += 1;
    }
    propagated
}

#[cfg(test)]
mod test {
    use crate::instance::*;
    use crate::solver::formula::test::formula;
    use crate::solver::unit_propagator::*;

    fn lit(x: i64) -> Literal {
        Literal::from_signed(x).unwrap()
    }

    #[test]
    fn test_find_unit_clause_takes_first_unit() {
        let mut f = formula(&[&[1, 2], &[-3], &[4]]);
        assert_eq!(find_unit_clause(&mut f), Some(lit(-3)));
        assert_eq!(f, formula(&[&[1, 2], &[4]]));
        assert_eq!(find_unit_clause(&mut f), Some(lit(4)));
        assert_eq!(find_unit_clause(&mut f), None);
        assert_eq!(f, formula(&[&[1, 2]]));
    }

    #[test]
    fn test_find_unit_clause_ignores_empty_clauses() {
        let mut f = formula(&[&[], &[1, 2]]);
        assert_eq!(find_unit_clause(&mut f), None);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_propagate_removes_satisfied_and_falsified() {
        let mut f = formula(&[&[1, 2], &[-1, 3], &[2, 3], &[-1]]);
        propagate(&mut f, lit(1));
        assert_eq!(f, formula(&[&[3], &[2, 3], &[]]));
    }

    #[test]
    fn test_propagate_drops_clause_with_both_polarities() {
        let mut f = formula(&[&[-1, 1, 2], &[2, -1]]);
        propagate(&mut f, lit(1));
        assert_eq!(f, formula(&[&[2]]));
    }

    #[test]
    fn test_fixpoint_chain() {
        // 1 forces 2 forces 3 forces 4
        let mut f = formula(&[&[1], &[-1, 2], &[-2, 3], &[-3, 4], &[5, 6]]);
        assert_eq!(propagate_to_fixpoint(&mut f), 4);
        assert_eq!(f, formula(&[&[5, 6]]));
    }

    #[test]
    fn test_fixpoint_conflict_leaves_empty_clause() {
        let mut f = formula(&[&[1], &[-1], &[2]]);
        propagate_to_fixpoint(&mut f);
        assert!(f.has_empty_clause());
    }

    #[test]
    fn test_fixpoint_is_idempotent() {
        let mut f = formula(&[&[1], &[-1, 2, 3], &[-2, 4], &[2, -4, 5], &[-5, -1]]);
        propagate_to_fixpoint(&mut f);
        let after_first = f.clone();
        assert_eq!(propagate_to_fixpoint(&mut f), 0);
        assert_eq!(f, after_first);
    }

    #[test]
    fn test_fixpoint_decreases_literal_count() {
        let mut f = formula(&[&[1, 2], &[-2], &[-1, 3, 4]]);
        let before = f.literal_count();
        propagate_to_fixpoint(&mut f);
        assert!(f.literal_count() < before);
    }
}
