pub mod input;
pub mod instance;
pub mod solver;

pub use input::{solve_clauses, InputError};
pub use instance::*;
pub use solver::{solve, Formula, Instance, Isolation, Solution};
