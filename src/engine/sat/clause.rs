//! Component D: a single CNF clause (§3 "CNF clause").

use std::collections::HashSet;

use crate::basic_types::Model;
use crate::interner::Symbol;
use crate::vericore_assert_moderate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseStatus {
    Sat,
    Unsat,
    Unknown,
}

/// A disjunction stored as two disjoint literal sets, plus the cache state the CDCL engine reads
/// on every propagation step instead of re-deriving it from scratch.
///
/// `watched` holds at most two variables the clause currently depends on to stay `Unknown`;
/// `recompute` is only called for a clause when one of *its* variables changes (via the clause
/// database's reverse index), so in practice this behaves like the two-watched-literals scheme
/// without needing a separate "which watch moved" bookkeeping pass — the tradeoff is that each
/// touched clause is rescanned in full rather than incrementally.
#[derive(Clone, Debug)]
pub struct Clause {
    pos: HashSet<Symbol>,
    neg: HashSet<Symbol>,
    watched: HashSet<Symbol>,
    implied: Option<(Symbol, bool)>,
    status: ClauseStatus,
}

impl Clause {
    pub fn new(pos: HashSet<Symbol>, neg: HashSet<Symbol>) -> Self {
        let mut clause = Clause {
            pos,
            neg,
            watched: HashSet::new(),
            implied: None,
            status: ClauseStatus::Unknown,
        };
        clause.recompute(&Model::new());
        clause
    }

    pub fn pos(&self) -> &HashSet<Symbol> {
        &self.pos
    }

    pub fn neg(&self) -> &HashSet<Symbol> {
        &self.neg
    }

    pub fn variables(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.pos.iter().chain(self.neg.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, variable: Symbol) -> bool {
        self.pos.contains(&variable) || self.neg.contains(&variable)
    }

    pub fn watched(&self) -> &HashSet<Symbol> {
        &self.watched
    }

    pub fn implied(&self) -> Option<(Symbol, bool)> {
        self.implied
    }

    pub fn status(&self) -> ClauseStatus {
        self.status
    }

    /// Re-derive `status`, `implied` and `watched` from `model` (§3's three clause invariants).
    pub fn recompute(&mut self, model: &Model) {
        let mut unassigned = Vec::new();
        let mut satisfied = false;

        for &variable in &self.pos {
            match model.get(variable) {
                Some(true) => satisfied = true,
                Some(false) => {}
                None => unassigned.push(variable),
            }
        }
        for &variable in &self.neg {
            match model.get(variable) {
                Some(false) => satisfied = true,
                Some(true) => {}
                None => unassigned.push(variable),
            }
        }

        let unassigned_count = unassigned.len();

        if satisfied {
            self.status = ClauseStatus::Sat;
            self.implied = None;
            self.watched = unassigned.into_iter().take(2).collect();
            return;
        }

        self.watched = unassigned.iter().take(2).copied().collect();
        match unassigned_count {
            0 => {
                self.status = ClauseStatus::Unsat;
                self.implied = None;
            }
            1 => {
                self.status = ClauseStatus::Unknown;
                let variable = unassigned[0];
                self.implied = Some((variable, self.pos.contains(&variable)));
            }
            _ => {
                self.status = ClauseStatus::Unknown;
                self.implied = None;
            }
        }

        // §8 invariants 1 and 2: the watched set tracks exactly the unassigned witnesses, and
        // `implied` is set iff exactly one remains and the clause isn't already satisfied.
        vericore_assert_moderate!(self.watched.len() == unassigned_count.min(2));
        vericore_assert_moderate!(self.implied.is_some() == (unassigned_count == 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    fn symbols(interner: &mut Interner, names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|name| interner.intern(name)).collect()
    }

    #[test]
    fn empty_model_leaves_multi_literal_clause_unknown_with_two_watches() {
        let mut interner = Interner::new();
        let vars = symbols(&mut interner, &["p", "q", "r"]);
        let clause = Clause::new(HashSet::from([vars[0], vars[1], vars[2]]), HashSet::new());
        assert_eq!(clause.status(), ClauseStatus::Unknown);
        assert_eq!(clause.implied(), None);
        assert_eq!(clause.watched().len(), 2);
    }

    #[test]
    fn satisfied_positive_literal_marks_clause_sat() {
        let mut interner = Interner::new();
        let vars = symbols(&mut interner, &["p", "q"]);
        let mut clause = Clause::new(HashSet::from([vars[0]]), HashSet::from([vars[1]]));
        let mut model = Model::new();
        model.assign(vars[0], true);
        clause.recompute(&model);
        assert_eq!(clause.status(), ClauseStatus::Sat);
        assert_eq!(clause.implied(), None);
    }

    #[test]
    fn single_unassigned_literal_is_unit_implied() {
        let mut interner = Interner::new();
        let vars = symbols(&mut interner, &["p", "q"]);
        let mut clause = Clause::new(HashSet::from([vars[0]]), HashSet::from([vars[1]]));
        let mut model = Model::new();
        model.assign(vars[1], true);
        clause.recompute(&model);
        assert_eq!(clause.status(), ClauseStatus::Unknown);
        assert_eq!(clause.implied(), Some((vars[0], true)));
    }

    #[test]
    fn all_literals_falsified_is_unsat() {
        let mut interner = Interner::new();
        let vars = symbols(&mut interner, &["p", "q"]);
        let mut clause = Clause::new(HashSet::from([vars[0]]), HashSet::from([vars[1]]));
        let mut model = Model::new();
        model.assign(vars[0], false);
        model.assign(vars[1], true);
        clause.recompute(&model);
        assert_eq!(clause.status(), ClauseStatus::Unsat);
        assert_eq!(clause.implied(), None);
    }
}
