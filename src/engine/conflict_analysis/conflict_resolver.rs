//! §4.6 "Resolve down to UIP": the operational half of conflict analysis. Repeatedly resolves
//! the working clause against the causing clause of its highest-decision-level variable until
//! exactly one variable from the current decision level remains — which is, by construction, the
//! first UIP (verified independently by [`super::unique_implication_point::first_uip`] under
//! `debug-checks`).

use std::collections::HashSet;

use crate::engine::sat::Cause;
use crate::engine::sat::Clause;
use crate::engine::sat::ClauseDatabase;
use crate::engine::sat::ClauseIndex;
use crate::engine::sat::ImplicationGraph;
use crate::interner::Interner;
use crate::interner::Symbol;
use crate::vericore_assert_moderate;
use crate::vericore_assert_simple;

/// The result of conflict analysis: a clause ready for [`ClauseDatabase::add_clause`] plus the
/// level the implication graph should backjump to (§4.6 "Backjump level").
pub struct LearnedClause {
    pub pos: HashSet<Symbol>,
    pub neg: HashSet<Symbol>,
    pub backjump_level: usize,
}

pub fn analyze_conflict(
    conflict: ClauseIndex,
    graph: &ImplicationGraph,
    database: &ClauseDatabase,
    interner: &Interner,
) -> LearnedClause {
    vericore_assert_simple!(graph.level() >= 1);

    let conflicting = database.get(conflict);
    let mut pos = conflicting.pos().clone();
    let mut neg = conflicting.neg().clone();
    let current_level = graph.level();

    while count_at_level(&pos, &neg, graph, current_level) > 1 {
        let (pivot, antecedent) =
            pick_pivot(&pos, &neg, graph, database, interner).expect(
                "a clause with more than one current-level literal must have a resolvable pivot",
            );
        resolve(&mut pos, &mut neg, pivot, antecedent);
    }

    // §8 invariant 5: the learned clause is unit under the reduced model (exactly one literal at
    // the current decision level survives resolution).
    vericore_assert_moderate!(count_at_level(&pos, &neg, graph, current_level) == 1);
    let backjump_level = second_highest_level(&pos, &neg, graph, current_level);
    LearnedClause {
        pos,
        neg,
        backjump_level,
    }
}

fn count_at_level(
    pos: &HashSet<Symbol>,
    neg: &HashSet<Symbol>,
    graph: &ImplicationGraph,
    level: usize,
) -> usize {
    pos.iter()
        .chain(neg.iter())
        .filter(|&&v| matches!(graph.cause_of(v), Some((_, l)) if l == level))
        .count()
}

/// The variable at the highest decision level among the clause's literals that was itself
/// propagated (a decided/assumed variable has no causing clause to resolve against, and by the
/// time it would be the sole candidate the loop above has already stopped). Ties break on the
/// lexicographically smaller variable name.
fn pick_pivot<'d>(
    pos: &HashSet<Symbol>,
    neg: &HashSet<Symbol>,
    graph: &ImplicationGraph,
    database: &'d ClauseDatabase,
    interner: &Interner,
) -> Option<(Symbol, &'d Clause)> {
    let mut best: Option<(Symbol, usize, ClauseIndex)> = None;
    for &variable in pos.iter().chain(neg.iter()) {
        let Some((Cause::Propagated(clause), level)) = graph.cause_of(variable) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((best_variable, best_level, _)) => {
                level > best_level
                    || (level == best_level
                        && interner.resolve(variable) < interner.resolve(best_variable))
            }
        };
        if better {
            best = Some((variable, level, clause));
        }
    }
    best.map(|(variable, _, clause)| (variable, database.get(clause)))
}

/// Resolve `(pos, neg)` against `antecedent` on `pivot`: drop `pivot` from both sides and union
/// in the antecedent's other literals (§4.6: "the resolvent is `(C ∪ D)` with `x` removed").
fn resolve(pos: &mut HashSet<Symbol>, neg: &mut HashSet<Symbol>, pivot: Symbol, antecedent: &Clause) {
    let _ = pos.remove(&pivot);
    let _ = neg.remove(&pivot);
    for &variable in antecedent.pos() {
        if variable != pivot {
            let _ = pos.insert(variable);
        }
    }
    for &variable in antecedent.neg() {
        if variable != pivot {
            let _ = neg.insert(variable);
        }
    }
}

fn second_highest_level(
    pos: &HashSet<Symbol>,
    neg: &HashSet<Symbol>,
    graph: &ImplicationGraph,
    current_level: usize,
) -> usize {
    let mut levels: Vec<usize> = pos
        .iter()
        .chain(neg.iter())
        .filter_map(|&v| graph.cause_of(v).map(|(_, l)| l))
        .collect();
    levels.sort_unstable();
    levels.dedup();
    vericore_assert_simple!(levels.last().copied() == Some(current_level));
    if levels.len() <= 1 {
        0
    } else {
        levels[levels.len() - 2]
    }
}
