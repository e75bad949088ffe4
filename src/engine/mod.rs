//! Components D, E, F: the CNF store, implication graph, conflict analysis, and the CDCL engine
//! that ties them together.

pub mod conflict_analysis;
pub mod constraint_satisfaction_solver;
pub mod fresh_name;
pub mod sat;

pub use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::SolveStatus;
