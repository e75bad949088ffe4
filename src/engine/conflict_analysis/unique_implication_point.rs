//! §4.6 "Find UIP": an independent, dominance-based re-derivation of the first UIP, used only to
//! audit [`super::conflict_resolver::analyze_conflict`]'s output under `debug-checks` (§4.12).
//!
//! A variable is a UIP of the current decision level iff every path from that level's decision
//! variable to the conflict passes through it — i.e., it dominates the conflict in the DAG of
//! "this assignment contributed to implying that one". Since causing clauses only ever reference
//! already-assigned variables, the current level's trail order is already a topological order of
//! that DAG, so dominator sets can be computed with one forward pass instead of iterating to a
//! fixed point.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::engine::sat::Cause;
use crate::engine::sat::ClauseDatabase;
use crate::engine::sat::ClauseIndex;
use crate::engine::sat::ImplicationGraph;
use crate::interner::Symbol;

/// The first UIP for the conflict at `graph`'s current level: the dominator of the conflict with
/// the highest trail position (equivalently, the smallest strictly-positive distance to it).
pub fn first_uip(conflict: ClauseIndex, graph: &ImplicationGraph, database: &ClauseDatabase) -> Symbol {
    let level = graph.level();
    let trail = level_trail(graph, level);
    let position: HashMap<Symbol, usize> = trail
        .iter()
        .enumerate()
        .map(|(index, &variable)| (variable, index))
        .collect();

    let mut dominators: Vec<HashSet<Symbol>> = Vec::with_capacity(trail.len());
    for &variable in &trail {
        let preds = predecessors(variable, graph, database, level, &position);
        let mut dom = intersect(&preds, &position, &dominators);
        let _ = dom.insert(variable);
        dominators.push(dom);
    }

    let conflict_clause = database.get(conflict);
    let conflict_preds: Vec<Symbol> = conflict_clause
        .variables()
        .filter(|v| position.contains_key(v))
        .collect();
    let conflict_dominators = intersect(&conflict_preds, &position, &dominators);

    conflict_dominators
        .into_iter()
        .max_by_key(|variable| position[variable])
        .expect("a conflict at decision level >= 1 always has at least the decision variable as a UIP")
}

/// The current level's assignments in trail order: the decision first, then its propagations.
fn level_trail(graph: &ImplicationGraph, level: usize) -> Vec<Symbol> {
    graph.assigned_since(level).into_iter().rev().collect()
}

fn predecessors(
    variable: Symbol,
    graph: &ImplicationGraph,
    database: &ClauseDatabase,
    level: usize,
    position: &HashMap<Symbol, usize>,
) -> Vec<Symbol> {
    match graph.cause_of(variable) {
        Some((Cause::Propagated(clause), l)) if l == level => database
            .get(clause)
            .variables()
            .filter(|&v| v != variable && position.contains_key(&v))
            .collect(),
        _ => Vec::new(),
    }
}

/// The intersection of `dominators[position[p]]` over every `p` in `preds`; empty (not "the
/// universe") when `preds` is empty, matching a root node's dominator set being just itself.
fn intersect(
    preds: &[Symbol],
    position: &HashMap<Symbol, usize>,
    dominators: &[HashSet<Symbol>],
) -> HashSet<Symbol> {
    let mut sets = preds.iter().map(|&p| &dominators[position[&p]]);
    match sets.next() {
        None => HashSet::new(),
        Some(first) => {
            let mut result = first.clone();
            for set in sets {
                result.retain(|variable| set.contains(variable));
            }
            result
        }
    }
}
