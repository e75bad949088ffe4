//! Component I: the DPLL(T) orchestrator gluing the SAT engine to the T_UF theory (§4.9).

pub mod orchestrator;
pub mod skeleton;

pub use orchestrator::solve_dpllt;
pub use orchestrator::SmtVerdict;
pub use skeleton::build_skeleton;
pub use skeleton::Skeleton;
