//! Component E: the implication graph (§3 "Implication graph").

use fnv::FnvHashMap;

use super::clause_database::ClauseIndex;
use crate::basic_types::Model;
use crate::interner::Symbol;
use crate::vericore_assert_moderate;
use crate::vericore_assert_simple;

/// Why a variable carries the value it does. `Decided` covers both branching decisions (level
/// ≥1) and the seeded assumptions passed in at level 0 — neither has a causing clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cause {
    Decided,
    Propagated(ClauseIndex),
}

/// Records, for every assigned variable, whether it was decided or inferred, at what decision
/// level, and (if inferred) which clause forced it. `decisions[ℓ-1]` is the single variable
/// decided on entering level `ℓ`; level 0 has no entry there, since its assignments are the
/// seeded assumptions, tracked via `cause` like any other `Decided` variable.
#[derive(Debug, Default)]
pub struct ImplicationGraph {
    level: usize,
    decisions: Vec<Symbol>,
    inferences: Vec<Vec<(Symbol, bool)>>,
    cause: FnvHashMap<Symbol, (Cause, usize)>,
    model: Model,
    conflict_clause: Option<ClauseIndex>,
}

impl ImplicationGraph {
    pub fn new() -> Self {
        ImplicationGraph {
            level: 0,
            decisions: Vec::new(),
            inferences: vec![Vec::new()],
            cause: FnvHashMap::default(),
            model: Model::new(),
            conflict_clause: None,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn cause_of(&self, variable: Symbol) -> Option<(Cause, usize)> {
        self.cause.get(&variable).copied()
    }

    pub fn conflict_clause(&self) -> Option<ClauseIndex> {
        self.conflict_clause
    }

    pub fn set_conflict(&mut self, clause: ClauseIndex) {
        self.conflict_clause = Some(clause);
    }

    pub fn clear_conflict(&mut self) {
        self.conflict_clause = None;
    }

    /// Seed a level-0 assumption: an externally-supplied assignment, not a branching choice.
    pub fn assume(&mut self, variable: Symbol, value: bool) {
        vericore_assert_simple!(self.level == 0);
        self.model.assign(variable, value);
        let _ = self.cause.insert(variable, (Cause::Decided, 0));
        self.inferences[0].push((variable, value));
    }

    /// Open a new decision level with `variable := value` as its branching choice.
    pub fn decide(&mut self, variable: Symbol, value: bool) {
        self.level += 1;
        self.model.assign(variable, value);
        self.decisions.push(variable);
        self.inferences.push(Vec::new());
        let _ = self.cause.insert(variable, (Cause::Decided, self.level));
    }

    /// Record a unit-propagated assignment at the current level, caused by `clause`.
    pub fn infer(&mut self, variable: Symbol, value: bool, clause: ClauseIndex) {
        self.model.assign(variable, value);
        self.inferences[self.level].push((variable, value));
        let _ = self
            .cause
            .insert(variable, (Cause::Propagated(clause), self.level));
    }

    /// Every variable assigned at or above `level`, most-recently-assigned first — the order
    /// conflict analysis walks the graph in (§4.6).
    pub fn assigned_since(&self, level: usize) -> Vec<Symbol> {
        let mut variables = Vec::new();
        for l in (level..=self.level).rev() {
            for &(variable, _) in self.inferences[l].iter().rev() {
                variables.push(variable);
            }
            if l >= 1 {
                if let Some(&decided) = self.decisions.get(l - 1) {
                    variables.push(decided);
                }
            }
        }
        variables
    }

    /// Backjump to `target_level`, unassigning everything above it and truncating the per-level
    /// frames (§3 "Lifecycles": "the implication graph grows with decisions/propagations and
    /// shrinks with backjumps, always preserving entries for levels ≤ current level"). Returns
    /// the unassigned variables so callers (the clause database, the brancher) can react.
    pub fn backjump(&mut self, target_level: usize) -> Vec<Symbol> {
        vericore_assert_simple!(target_level <= self.level);
        let mut unassigned = Vec::new();

        for level in ((target_level + 1)..=self.level).rev() {
            for (variable, _) in self.inferences[level].drain(..).rev() {
                self.model.unassign(variable);
                let _ = self.cause.remove(&variable);
                unassigned.push(variable);
            }
            self.inferences.pop();
            if let Some(variable) = self.decisions.pop() {
                self.model.unassign(variable);
                let _ = self.cause.remove(&variable);
                unassigned.push(variable);
            }
        }

        self.level = target_level;
        self.conflict_clause = None;

        // §8 invariant 4: the model left behind is exactly the union of decisions/inferences at
        // levels ≤ target_level, and `cause` tracks exactly those variables.
        vericore_assert_moderate!(self.inferences.len() == target_level + 1);
        vericore_assert_moderate!(self.decisions.len() == target_level);
        let surviving: usize = self.inferences.iter().map(Vec::len).sum::<usize>() + self.decisions.len();
        vericore_assert_moderate!(self.cause.len() == surviving);
        vericore_assert_moderate!(self.model.len() == surviving);

        unassigned
    }
}
