//! §4.5: the decision-heuristic strategy used by the CDCL engine.

mod dlis;

pub use dlis::Brancher;
pub use dlis::DlisBrancher;
