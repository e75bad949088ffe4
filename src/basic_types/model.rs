use fnv::FnvHashMap;

use crate::interner::Interner;
use crate::interner::Symbol;
use crate::vericore_assert_simple;

/// A partial mapping from proposition name to Boolean (§3: "Model").
///
/// Insertion order is not semantically significant; every lookup is by [`Symbol`]. The only
/// operation that is order-*sensitive* is [`Model::assign`], which asserts the variable was not
/// already assigned — reassignment without an intervening [`Model::unassign`] indicates a bug in
/// the caller (BCP and decision-making should never touch an already-assigned variable).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    assignment: FnvHashMap<Symbol, bool>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: Symbol) -> Option<bool> {
        self.assignment.get(&variable).copied()
    }

    pub fn is_assigned(&self, variable: Symbol) -> bool {
        self.assignment.contains_key(&variable)
    }

    pub fn assign(&mut self, variable: Symbol, value: bool) {
        vericore_assert_simple!(!self.assignment.contains_key(&variable));
        let _ = self.assignment.insert(variable, value);
    }

    pub fn unassign(&mut self, variable: Symbol) {
        let _ = self.assignment.remove(&variable);
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, bool)> + '_ {
        self.assignment.iter().map(|(&k, &v)| (k, v))
    }

    /// Restrict this model to `variables`, discarding assignments to Tseitin-fresh or otherwise
    /// auxiliary names. Used at the SAT/SMT API boundary (§6: "a model over the original
    /// variables only").
    pub fn restricted_to(&self, variables: impl IntoIterator<Item = Symbol>) -> Model {
        let mut restricted = Model::new();
        for variable in variables {
            if let Some(value) = self.get(variable) {
                restricted.assign(variable, value);
            }
        }
        restricted
    }

    pub fn extend(&mut self, other: &Model) {
        for (variable, value) in other.iter() {
            if !self.is_assigned(variable) {
                self.assign(variable, value);
            }
        }
    }

    /// A deterministic, human-readable rendering sorted by proposition name, used by the CLI and
    /// by test assertions.
    pub fn display_sorted(&self, interner: &Interner) -> String {
        let mut entries: Vec<(&str, bool)> = self
            .assignment
            .iter()
            .map(|(&symbol, &value)| (interner.resolve(symbol), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        entries
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<(Symbol, bool)> for Model {
    fn from_iter<I: IntoIterator<Item = (Symbol, bool)>>(iter: I) -> Self {
        let mut model = Model::new();
        for (variable, value) in iter {
            model.assign(variable, value);
        }
        model
    }
}
