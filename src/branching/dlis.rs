//! §4.5: the DLIS-style decision heuristic (Component 4.5).

use std::cmp::Ordering;
use std::collections::HashSet;

use fnv::FnvHashMap;

use crate::engine::sat::ClauseDatabase;
use crate::engine::sat::ClauseStatus;
use crate::engine::sat::ImplicationGraph;
use crate::interner::Interner;
use crate::interner::Symbol;

/// Chooses the next branching literal. Any type implementing this trait is a drop-in
/// replacement for [`DlisBrancher`] — a VSIDS-style weighted heuristic needs only to satisfy the
/// same contract (§4.5: "acceptable for teaching-scale inputs; a VSIDS-style weighted heuristic
/// is a drop-in replacement with the same interface contract").
pub trait Brancher {
    /// `None` means every `Unknown` clause has been exhausted: there is nothing left to decide.
    fn decide(
        &self,
        database: &ClauseDatabase,
        graph: &ImplicationGraph,
        interner: &Interner,
    ) -> Option<(Symbol, bool)>;
}

#[derive(Debug, Default)]
pub struct DlisBrancher;

impl Brancher for DlisBrancher {
    fn decide(
        &self,
        database: &ClauseDatabase,
        graph: &ImplicationGraph,
        interner: &Interner,
    ) -> Option<(Symbol, bool)> {
        let model = graph.model();

        let mut positive_score: FnvHashMap<Symbol, usize> = FnvHashMap::default();
        let mut negative_score: FnvHashMap<Symbol, usize> = FnvHashMap::default();
        let mut forced_true: HashSet<Symbol> = HashSet::new();
        let mut forced_false: HashSet<Symbol> = HashSet::new();

        for index in 0..database.len() {
            let clause = database.get(index);
            if clause.status() != ClauseStatus::Unknown {
                continue;
            }
            for &variable in clause.pos() {
                if !model.is_assigned(variable) {
                    *positive_score.entry(variable).or_insert(0) += 1;
                }
            }
            for &variable in clause.neg() {
                if !model.is_assigned(variable) {
                    *negative_score.entry(variable).or_insert(0) += 1;
                }
            }
            // A clause that is unit forces its one remaining literal's value; asserting the
            // opposite polarity would falsify it, so that polarity is disqualified (§4.5:
            // "candidates that would drive any clause to UNSAT are disqualified").
            if let Some((variable, value)) = clause.implied() {
                if value {
                    let _ = forced_true.insert(variable);
                } else {
                    let _ = forced_false.insert(variable);
                }
            }
        }

        let candidates: HashSet<Symbol> = positive_score
            .keys()
            .chain(negative_score.keys())
            .copied()
            .collect();

        let mut best: Option<(Symbol, bool, usize)> = None;
        for variable in candidates {
            for polarity in [true, false] {
                let disqualified = if polarity {
                    forced_false.contains(&variable)
                } else {
                    forced_true.contains(&variable)
                };
                if disqualified {
                    continue;
                }
                let score = if polarity {
                    positive_score.get(&variable).copied().unwrap_or(0)
                } else {
                    negative_score.get(&variable).copied().unwrap_or(0)
                };
                if is_better(best, variable, polarity, score, interner) {
                    best = Some((variable, polarity, score));
                }
            }
        }

        best.map(|(variable, polarity, _)| (variable, polarity))
    }
}

fn is_better(
    best: Option<(Symbol, bool, usize)>,
    variable: Symbol,
    polarity: bool,
    score: usize,
    interner: &Interner,
) -> bool {
    let Some((best_variable, best_polarity, best_score)) = best else {
        return true;
    };
    if score != best_score {
        return score > best_score;
    }
    match interner.resolve(variable).cmp(interner.resolve(best_variable)) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => polarity && !best_polarity,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::basic_types::Model;
    use crate::engine::sat::Clause;

    #[test]
    fn picks_the_literal_appearing_in_the_most_unknown_clauses() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let q = interner.intern("q");
        let model = Model::new();

        let mut database = ClauseDatabase::new();
        let _ = database.add_clause(Clause::new(HashSet::from([p]), HashSet::new()), &model);
        let _ = database.add_clause(Clause::new(HashSet::from([p]), HashSet::new()), &model);
        let _ = database.add_clause(Clause::new(HashSet::from([q]), HashSet::new()), &model);

        let graph = ImplicationGraph::new();
        let decision = DlisBrancher.decide(&database, &graph, &interner);
        assert_eq!(decision, Some((p, true)));
    }

    #[test]
    fn disqualifies_the_polarity_a_unit_clause_would_falsify() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let q = interner.intern("q");
        let mut model = Model::new();
        model.assign(q, true);

        let mut database = ClauseDatabase::new();
        // p unit-implied true (¬q ∨ p, with q=true).
        let _ = database.add_clause(Clause::new(HashSet::from([p]), HashSet::from([q])), &model);

        let mut graph = ImplicationGraph::new();
        graph.assume(q, true);
        let decision = DlisBrancher.decide(&database, &graph, &interner);
        assert_eq!(decision, Some((p, true)));
    }

    #[test]
    fn no_candidates_when_every_clause_is_already_decided() {
        let interner = Interner::new();
        let database = ClauseDatabase::new();
        let graph = ImplicationGraph::new();
        assert_eq!(DlisBrancher.decide(&database, &graph, &interner), None);
    }
}
