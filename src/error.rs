//! The crate's error type (§4.13, §7).
//!
//! Only [`Error::Parse`] and [`Error::UnsupportedFragment`] are expected during normal use.
//! [`Error::Exhausted`] is a recoverable-by-the-caller outcome (resume with the returned partial
//! state), not a bug. [`Error::Internal`] means the solver's own invariants broke and the verdict
//! it was about to return cannot be trusted — never convert one of these into a SAT/UNSAT/UNKNOWN
//! answer.

use thiserror::Error as ThisError;

use crate::basic_types::Model;
use crate::formula::prop::PropFormula;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The input did not conform to the concrete syntax of §6.
    #[error("malformed input at byte {offset}: {message}")]
    Parse { message: String, offset: usize },

    /// A quantifier reached the SMT entry point, which only accepts quantifier-free formulas.
    #[error("unsupported fragment: {0}")]
    UnsupportedFragment(String),

    /// The decision-depth cap was reached before a verdict was found. The caller can resume by
    /// passing `partial_model` and `resumed_formula` back into [`crate::api::sat::solve_sat`].
    #[error("decision depth cap reached without a verdict")]
    Exhausted {
        partial_model: Model,
        resumed_formula: PropFormula,
    },

    /// An internal invariant was violated. This is always a bug in the solver, never a property
    /// of the input; treat it as a crash-worthy report rather than a UNKNOWN verdict.
    #[error("internal invariant violation: {0}")]
    Internal(String),
}
