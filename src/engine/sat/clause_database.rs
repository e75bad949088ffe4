//! Component D: the CNF store (§3 "CNF formula").

use fnv::FnvHashMap;

use super::clause::Clause;
use super::clause::ClauseStatus;
use crate::basic_types::Model;
use crate::formula::connective::Connective;
use crate::formula::prop::PropFormula;
use crate::interner::Symbol;

pub type ClauseIndex = usize;

/// The outcome of folding a new assignment into every clause that mentions it. The engine reads
/// this straight off [`ClauseDatabase::update_with_new_assignment`] instead of re-scanning the
/// whole database for unit/conflicting clauses.
#[derive(Clone, Debug, Default)]
pub struct PropagationResult {
    /// Clauses that became unit as a result of the update, in database order.
    pub newly_implied: Vec<ClauseIndex>,
    /// The first clause found to be falsified, if any.
    pub conflict: Option<ClauseIndex>,
}

/// An ordered list of clauses plus the reverse index `variable -> clauses mentioning it` (§3).
/// Clauses are never removed: Tseitin-encoded clauses and learned clauses share one index space,
/// addressed by stable [`ClauseIndex`] rather than by identity (§9 "Clause identity").
#[derive(Debug, Default)]
pub struct ClauseDatabase {
    clauses: Vec<Clause>,
    containing: FnvHashMap<Symbol, Vec<ClauseIndex>>,
    last_result: PropagationResult,
}

impl ClauseDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn get(&self, index: ClauseIndex) -> &Clause {
        &self.clauses[index]
    }

    pub fn last_result(&self) -> &PropagationResult {
        &self.last_result
    }

    /// Insert `clause`, re-deriving its cache state against `model` (a freshly-learned clause may
    /// arrive after many variables are already assigned). Returns the new clause's index.
    pub fn add_clause(&mut self, mut clause: Clause, model: &Model) -> ClauseIndex {
        clause.recompute(model);
        let index = self.clauses.len();
        for variable in clause.variables().collect::<Vec<_>>() {
            self.containing.entry(variable).or_default().push(index);
        }
        self.clauses.push(clause);
        index
    }

    pub fn clauses_containing(&self, variable: Symbol) -> &[ClauseIndex] {
        self.containing
            .get(&variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recompute every clause mentioning `variable` against `model`, assuming `variable` was just
    /// assigned (or unassigned, on backjump). Returns which clauses became unit and whether any
    /// became falsified.
    pub fn update_with_new_assignment(&mut self, variable: Symbol, model: &Model) -> PropagationResult {
        let mut result = PropagationResult::default();
        let indices = self.containing.get(&variable).cloned().unwrap_or_default();
        for index in indices {
            self.clauses[index].recompute(model);
            match self.clauses[index].status() {
                ClauseStatus::Unsat if result.conflict.is_none() => {
                    result.conflict = Some(index);
                }
                ClauseStatus::Unknown if self.clauses[index].implied().is_some() => {
                    result.newly_implied.push(index);
                }
                _ => {}
            }
        }
        self.last_result = result.clone();
        result
    }

    /// Recompute every clause in the database against `model`. Called once after a backjump,
    /// since many variables become unassigned at once and the touched-clause shortcut used by
    /// [`Self::update_with_new_assignment`] would otherwise need to run once per variable anyway.
    pub fn on_backjump(&mut self, model: &Model) {
        for clause in &mut self.clauses {
            clause.recompute(model);
        }
        self.last_result = PropagationResult::default();
    }

    /// Rebuild the conjunction-of-disjunctions formula this database represents, including every
    /// learned clause (§6: "the extended CNF formula that was actually solved, so callers can
    /// resume with the same learned clauses").
    pub fn to_formula(&self) -> PropFormula {
        self.clauses
            .iter()
            .map(clause_formula)
            .reduce(|acc, next| PropFormula::bin(Connective::And, acc, next))
            .unwrap_or(PropFormula::Const(true))
    }
}

fn clause_formula(clause: &Clause) -> PropFormula {
    let literals = clause
        .pos()
        .iter()
        .map(|&symbol| PropFormula::var(symbol))
        .chain(clause.neg().iter().map(|&symbol| PropFormula::not(PropFormula::var(symbol))));
    literals
        .reduce(|acc, next| PropFormula::bin(Connective::Or, acc, next))
        .unwrap_or(PropFormula::Const(false))
}
