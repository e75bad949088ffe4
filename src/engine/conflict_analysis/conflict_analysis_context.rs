//! A small bundle of the references conflict analysis needs, grounded on the teacher's
//! `ConflictAnalysisContext` pattern — here trimmed to the one subsystem this solver actually has.

use super::conflict_resolver::analyze_conflict;
use super::conflict_resolver::LearnedClause;
use super::unique_implication_point::first_uip;
use crate::engine::sat::ClauseDatabase;
use crate::engine::sat::ClauseIndex;
use crate::engine::sat::ImplicationGraph;
use crate::interner::Interner;
use crate::vericore_assert_moderate;

pub struct ConflictAnalysisContext<'a> {
    pub database: &'a ClauseDatabase,
    pub graph: &'a ImplicationGraph,
    pub interner: &'a Interner,
}

impl ConflictAnalysisContext<'_> {
    /// Run First-UIP resolution over `conflict` (§4.6). Under `debug-checks`, cross-checks the
    /// resolver's single current-level literal against the independently-computed dominator-based
    /// first UIP (§8 invariant 5).
    pub fn analyze(&self, conflict: ClauseIndex) -> LearnedClause {
        let learned = analyze_conflict(conflict, self.graph, self.database, self.interner);

        if cfg!(any(test, feature = "debug-checks")) {
            let level = self.graph.level();
            let uip = learned
                .pos
                .iter()
                .chain(learned.neg.iter())
                .find(|&&v| matches!(self.graph.cause_of(v), Some((_, l)) if l == level))
                .copied();
            let audited = first_uip(conflict, self.graph, self.database);
            vericore_assert_moderate!(uip == Some(audited));
        }

        learned
    }
}
