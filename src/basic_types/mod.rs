//! Small value types shared across the crate: literals and partial models.
//!
//! Larger, component-specific types (clauses, the implication graph, formula trees, terms) live
//! in their own modules ([`crate::engine::sat`], [`crate::formula`]) rather than here, mirroring
//! how the teacher keeps `basic_types` to the handful of types every layer needs.

mod literal;
mod model;

pub use literal::Literal;
pub use model::Model;
