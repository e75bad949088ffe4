//! Interning for proposition names, term variables/constants, and function symbols.
//!
//! The data model (§3) calls for proposition names "interned by identity of content": equal
//! strings must collapse to the same handle so that formula equality, hashing, and clause
//! deduplication are all pointer/integer comparisons rather than string comparisons. [`lasso`]
//! gives us exactly this without reaching for a hand-rolled `HashMap<String, u32>`.
//!
//! Unlike a process-global interner, an [`Interner`] is scoped to a single top-level solve (§5:
//! "its lifetime is bounded by a single top-level solve"), so it is threaded explicitly through
//! the parser, encoder, and orchestrator rather than stashed in a `static`.

use lasso::Rodeo;
use lasso::Spur;

/// A handle to an interned name. Cheap to copy, compares by identity, orders by the order the
/// name was first interned (which is irrelevant to solving but gives deterministic iteration).
pub type Symbol = Spur;

/// Owns the string table backing all [`Symbol`]s produced during one solve.
#[derive(Debug, Default)]
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        self.rodeo.get_or_intern(name)
    }

    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rodeo.get(name).is_some()
    }
}
