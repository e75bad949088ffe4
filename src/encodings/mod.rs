//! Components B/C: the NNF/CNF rewriter and the Tseitin encoder built on top of it.

pub mod nnf;
pub mod tseitin;

pub use tseitin::tseitin_encode;
pub use tseitin::FlatClause;
pub use tseitin::TseitinEncoding;
