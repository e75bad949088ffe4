//! The crate's two top-level entry points (§6): [`sat::solve_sat`] and [`smt::solve_smt`].

pub mod outputs;
pub mod sat;
pub mod smt;

pub use outputs::Status;
pub use sat::solve_sat;
pub use sat::SatOutcome;
pub use smt::solve_smt;
pub use smt::SmtOutcome;
