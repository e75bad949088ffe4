//! Components G/H: the T_UF theory solver — union-find over terms and congruence closure.

pub mod congruence_closure;
pub mod union_find;

pub use congruence_closure::CongruenceClosure;
pub use congruence_closure::EqualityAtom;
pub use congruence_closure::Verdict;
pub use union_find::UnionFind;
