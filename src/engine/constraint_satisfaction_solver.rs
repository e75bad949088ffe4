//! Component F: the CDCL engine (§4.4).

use std::collections::VecDeque;

use log::debug;
use log::trace;

use super::conflict_analysis::ConflictAnalysisContext;
use super::sat::Clause;
use super::sat::ClauseDatabase;
use super::sat::ClauseIndex;
use super::sat::ClauseStatus;
use super::sat::ImplicationGraph;
use crate::basic_types::Model;
use crate::branching::Brancher;
use crate::branching::DlisBrancher;
use crate::encodings::tseitin::FlatClause;
use crate::interner::Interner;
use crate::interner::Symbol;
use crate::vericore_assert_moderate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    Sat,
    Unsat,
    Unknown,
}

/// The decide/propagate/analyze loop over a [`ClauseDatabase`] and [`ImplicationGraph`] (§4.4).
/// Generic over the decision strategy so a VSIDS-style [`Brancher`] can be swapped in without
/// touching the engine (§4.5).
pub struct ConstraintSatisfactionSolver<B: Brancher = DlisBrancher> {
    database: ClauseDatabase,
    graph: ImplicationGraph,
    brancher: B,
    max_decisions: usize,
}

impl ConstraintSatisfactionSolver<DlisBrancher> {
    pub fn new(max_decisions: usize) -> Self {
        Self::with_brancher(DlisBrancher, max_decisions)
    }
}

impl<B: Brancher> ConstraintSatisfactionSolver<B> {
    pub fn with_brancher(brancher: B, max_decisions: usize) -> Self {
        ConstraintSatisfactionSolver {
            database: ClauseDatabase::new(),
            graph: ImplicationGraph::new(),
            brancher,
            max_decisions,
        }
    }

    pub fn database(&self) -> &ClauseDatabase {
        &self.database
    }

    pub fn model(&self) -> &Model {
        self.graph.model()
    }

    /// Seed a level-0 assumption. Must be called before [`Self::add_clause`], so that every
    /// clause's initial cache state already reflects it.
    pub fn assume(&mut self, variable: Symbol, value: bool) {
        self.graph.assume(variable, value);
    }

    pub fn add_clause(&mut self, clause: FlatClause) -> ClauseIndex {
        self.database
            .add_clause(Clause::new(clause.pos, clause.neg), self.graph.model())
    }

    /// Run the engine to a verdict (§4.4). `max_decisions` bounds the decision depth as a safety
    /// cap, not a completeness parameter.
    pub fn solve(&mut self, interner: &Interner) -> SolveStatus {
        let mut pending_conflict = self.initial_bcp();

        loop {
            while let Some(conflict) = pending_conflict {
                if self.graph.level() == 0 {
                    return SolveStatus::Unsat;
                }

                let learned = {
                    let context = ConflictAnalysisContext {
                        database: &self.database,
                        graph: &self.graph,
                        interner,
                    };
                    context.analyze(conflict)
                };

                if learned.pos.is_empty() && learned.neg.is_empty() {
                    return SolveStatus::Unsat;
                }

                debug!(
                    "backjump from level {} to {}",
                    self.graph.level(),
                    learned.backjump_level
                );
                let _ = self.graph.backjump(learned.backjump_level);
                self.database.on_backjump(self.graph.model());

                let index = self
                    .database
                    .add_clause(Clause::new(learned.pos, learned.neg), self.graph.model());
                debug!("learned clause #{index}");

                let (variable, value) = self.database.get(index).implied().expect(
                    "resolution guarantees the learned clause is unit under the reduced model",
                );
                // §8 invariant 3: the causing clause was unit, with this exact literal, at the
                // moment of inference.
                vericore_assert_moderate!(self.database.get(index).implied() == Some((variable, value)));
                self.graph.infer(variable, value, index);
                pending_conflict = self.drain(VecDeque::from([variable]));
            }

            if self.graph.level() >= self.max_decisions {
                return SolveStatus::Unknown;
            }

            let Some((variable, value)) = self.brancher.decide(&self.database, &self.graph, interner)
            else {
                return SolveStatus::Sat;
            };

            debug!(
                "decide {}={value} at level {}",
                interner.resolve(variable),
                self.graph.level() + 1
            );
            self.graph.decide(variable, value);
            pending_conflict = self.drain(VecDeque::from([variable]));
        }
    }

    /// Rescans the whole database, not just the touched-since-last-call clauses: `solve` calls
    /// this on every invocation, including a resumed one where a caller (the DPLL(T)
    /// orchestrator, §4.9) has just added a clause against an *unchanged* model, e.g. a T-conflict
    /// blocking clause built to negate the model `solve` just returned `Sat` for. Such a clause
    /// is already `ClauseStatus::Unsat` the moment it's added, with no new assignment ever
    /// touching it to trigger `update_with_new_assignment`'s own conflict detection — so this
    /// pass must catch it here, or the engine keeps handing back the same stale `Sat` forever.
    fn initial_bcp(&mut self) -> Option<ClauseIndex> {
        let mut worklist = VecDeque::new();
        for index in 0..self.database.len() {
            let clause = self.database.get(index);
            match clause.status() {
                ClauseStatus::Unsat => return Some(index),
                ClauseStatus::Unknown => {
                    if let Some((variable, value)) = clause.implied() {
                        if !self.graph.model().is_assigned(variable) {
                            trace!("initial unit clause #{index} implies a literal");
                            vericore_assert_moderate!(clause.status() == ClauseStatus::Unknown);
                            self.graph.infer(variable, value, index);
                            worklist.push_back(variable);
                        }
                    }
                }
                ClauseStatus::Sat => {}
            }
        }
        self.drain(worklist)
    }

    /// The BCP fixed point (§4.4): keep folding newly-touched variables into every clause that
    /// mentions them until no clause becomes unit, or one is falsified.
    fn drain(&mut self, mut worklist: VecDeque<Symbol>) -> Option<ClauseIndex> {
        while let Some(variable) = worklist.pop_front() {
            let result = self
                .database
                .update_with_new_assignment(variable, self.graph.model());
            if let Some(conflict) = result.conflict {
                return Some(conflict);
            }
            for clause_index in result.newly_implied {
                let clause = self.database.get(clause_index);
                if clause.status() != ClauseStatus::Unknown {
                    continue;
                }
                if let Some((inferred_variable, value)) = clause.implied() {
                    if !self.graph.model().is_assigned(inferred_variable) {
                        trace!("propagate via clause #{clause_index}");
                        vericore_assert_moderate!(clause.status() == ClauseStatus::Unknown);
                        self.graph.infer(inferred_variable, value, clause_index);
                        worklist.push_back(inferred_variable);
                    }
                }
            }
        }
        None
    }
}
