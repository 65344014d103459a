use std::fmt;

use log::{debug, info, trace};

use crate::instance::*;

use super::formula::Formula;
use super::selection::select_literal;
use super::unit_propagator::propagate_to_fixpoint;

/// How a search branch gets its own view of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Isolation {
    /// Every search node works on a deep copy of its parent's formula, and the search
    /// recurses on the call stack.
    Duplicate,
    /// One formula is edited in place. Each decision opens a trail checkpoint that is rolled
    /// back when the branch is abandoned, and the search runs off an explicit decision stack.
    #[default]
    Trail,
}

/// Where a node ends up once unit propagation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Sat,
    Unsat,
    Branch(Literal),
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    decision: Literal,
    // Set once the negation of the original decision is being explored
    flipped: bool,
}

impl Frame {
    fn first(decision: Literal) -> Frame {
        Frame {
            decision,
            flipped: false,
        }
    }

    fn alternative(&self) -> Option<Frame> {
        if self.flipped {
            return None;
        }
        Some(Frame {
            decision: self.decision.invert(),
            flipped: true,
        })
    }
}

#[derive(Default)]
struct Search {
    stats: EvaluationStats,
}

impl Search {
    /// Runs propagation on the node's formula and decides whether it is finished.
    fn settle(&mut self, formula: &mut Formula) -> NodeState {
        self.stats.propagations += propagate_to_fixpoint(formula);

        if formula.is_empty() {
            return NodeState::Sat;
        }
        if formula.has_empty_clause() {
            self.stats.conflicts += 1;
            debug!("conflict at {} clauses, backtracking", formula.len());
            return NodeState::Unsat;
        }
        // No units and no empty clauses remain, so every clause left has two or more literals
        match select_literal(formula) {
            Some(literal) => {
                trace!("selected: {:?}", literal);
                NodeState::Branch(literal)
            }
            None => NodeState::Sat,
        }
    }

    fn search_duplicating(&mut self, mut formula: Formula, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);
        match self.settle(&mut formula) {
            NodeState::Sat => true,
            NodeState::Unsat => false,
            NodeState::Branch(literal) => {
                self.branch(&formula, literal, depth)
                    || self.branch(&formula, literal.invert(), depth)
            }
        }
    }

    fn branch(&mut self, formula: &Formula, decision: Literal, depth: usize) -> bool {
        self.stats.decisions += 1;
        let mut derived = formula.duplicate();
        derived.prepend(Clause::unit(decision));
        self.search_duplicating(derived, depth + 1)
    }

    fn search_in_place(&mut self, mut formula: Formula) -> bool {
        let mut frames: Vec<Frame> = vec![];
        let mut next = match self.settle(&mut formula) {
            NodeState::Sat => return true,
            NodeState::Unsat => return false,
            NodeState::Branch(literal) => Frame::first(literal),
        };

        loop {
            self.stats.decisions += 1;
            formula.checkpoint();
            formula.prepend(Clause::unit(next.decision));
            frames.push(next);
            self.stats.max_depth = self.stats.max_depth.max(frames.len());

            next = match self.settle(&mut formula) {
                NodeState::Sat => return true,
                NodeState::Branch(literal) => Frame::first(literal),
                NodeState::Unsat => loop {
                    let frame = match frames.pop() {
                        Some(frame) => frame,
                        None => return false,
                    };
                    formula.rollback();
                    if let Some(alternative) = frame.alternative() {
                        break alternative;
                    }
                },
            };
        }
    }
}

#[derive(Clone, Debug)]
pub struct Instance {
    pub(crate) formula: Formula,
}

impl Instance {
    pub fn new(formula: Formula) -> Instance {
        Instance { formula }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn solve(&self) -> Solution {
        self.solve_with(Isolation::default())
    }

    pub fn solve_with(&self, isolation: Isolation) -> Solution {
        info!(
            "solving {} clauses over {} variables ({:?})",
            self.formula.len(),
            self.formula.variable_count(),
            isolation
        );
        let mut search = Search::default();
        let satisfiable = match isolation {
            Isolation::Duplicate => search.search_duplicating(self.formula.duplicate(), 0),
            Isolation::Trail => search.search_in_place(self.formula.duplicate()),
        };
        info!("satisfiable={} stats={:?}", satisfiable, search.stats);

        Solution {
            satisfiable,
            stats: search.stats,
        }
    }
}

/// Decides the formula with the default isolation strategy.
pub fn solve(formula: &Formula) -> bool {
    Instance::new(formula.duplicate()).solve().satisfiable
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
    pub max_depth: usize,
}

#[derive(Clone)]
pub struct Solution {
    pub satisfiable: bool,
    pub stats: EvaluationStats,
}

impl Solution {
    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.satisfiable {
            write!(f, "satisfiable")?;
        } else {
            write!(f, "no solution found")?;
        }
        write!(f, "; stats={:?}", self.stats)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::solver::formula::test::formula;
    use crate::solver::search::*;

    fn both(cnf: &[&[i64]]) -> (Solution, Solution) {
        let _ = env_logger::builder().is_test(true).try_init();
        let instance = Instance::new(formula(cnf));
        (
            instance.solve_with(Isolation::Duplicate),
            instance.solve_with(Isolation::Trail),
        )
    }

    #[test]
    fn test_single_unit_is_satisfiable() {
        let (dup, trail) = both(&[&[1]]);
        assert!(dup.satisfiable);
        assert!(trail.satisfiable);
        assert_eq!(trail.stats.decisions, 0);
        assert_eq!(trail.stats.propagations, 1);
    }

    #[test]
    fn test_contradicting_units() {
        let (dup, trail) = both(&[&[1], &[-1]]);
        assert!(!dup.satisfiable);
        assert!(!trail.satisfiable);
        assert_eq!(trail.stats.conflicts, 1);
    }

    #[test]
    fn test_branch_on_first_literal() {
        let (dup, trail) = both(&[&[1, 2], &[-1, 2]]);
        assert!(dup.satisfiable);
        assert!(trail.satisfiable);
        // The first branch (1 = true) settles through 2 without a second decision
        assert_eq!(trail.stats.decisions, 1);
        assert_eq!(trail.stats.conflicts, 0);
        assert_eq!(trail.stats.max_depth, 1);
    }

    #[test]
    fn test_conflict_ignores_unrelated_clauses() {
        let (dup, trail) = both(&[&[1], &[-1], &[2]]);
        assert!(!dup.satisfiable);
        assert!(!trail.satisfiable);
    }

    #[test]
    fn test_empty_formula() {
        let (dup, trail) = both(&[]);
        assert!(dup.satisfiable);
        assert!(trail.satisfiable);
        assert_eq!(trail.stats, EvaluationStats::default());
    }

    #[test]
    fn test_empty_clause_is_unsatisfiable() {
        let (dup, trail) = both(&[&[1, 2], &[]]);
        assert!(!dup.satisfiable);
        assert!(!trail.satisfiable);
        assert_eq!(trail.stats.decisions, 0);
    }

    #[test]
    fn test_second_branch_taken_after_conflict() {
        // 1 = true conflicts through 2, so the search must try 1 = false
        let cnf: &[&[i64]] = &[&[1, 3], &[-1, 2], &[-1, -2], &[-3, 4]];
        let (dup, trail) = both(cnf);
        assert!(dup.satisfiable);
        assert!(trail.satisfiable);
        assert_eq!(trail.stats.decisions, 2);
        assert_eq!(trail.stats.conflicts, 1);
        assert_eq!(dup.stats, trail.stats);
    }

    #[test]
    fn test_all_assignments_excluded() {
        let cnf: &[&[i64]] = &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]];
        let (dup, trail) = both(cnf);
        assert!(!dup.satisfiable);
        assert!(!trail.satisfiable);
        assert_eq!(dup.stats, trail.stats);
        assert_eq!(trail.stats.decisions, 2);
        assert_eq!(trail.stats.conflicts, 2);
    }

    #[test]
    fn test_solve_leaves_instance_untouched() {
        let instance = Instance::new(formula(&[&[1, 2], &[-1, 2], &[-2, 3]]));
        let before = instance.formula().clone();
        instance.solve_with(Isolation::Trail);
        instance.solve_with(Isolation::Duplicate);
        assert_eq!(instance.formula(), &before);
    }

    #[test]
    fn test_solve_free_function() {
        assert!(solve(&formula(&[&[1, -2], &[2]])));
        assert!(!solve(&formula(&[&[1], &[-1, 2], &[-2]])));
    }
}
