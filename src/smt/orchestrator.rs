//! §4.9: the DPLL(T) loop tying the CDCL engine to the T_UF theory solver.

use std::collections::HashSet;

use log::debug;

use super::skeleton::Skeleton;
use crate::encodings::tseitin::tseitin_encode;
use crate::encodings::tseitin::FlatClause;
use crate::engine::fresh_name::FreshNameGenerator;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SolveStatus;
use crate::formula::prop::PropFormula;
use crate::formula::term::Term;
use crate::interner::Interner;
use crate::interner::Symbol;
use crate::theory::CongruenceClosure;
use crate::theory::EqualityAtom;
use crate::theory::Verdict as TheoryVerdict;

#[derive(Clone, Debug)]
pub enum SmtVerdict {
    Sat(Vec<(EqualityAtom, bool)>),
    Unsat,
    /// The engine's decision cap was reached with no further T-propagation possible (§7
    /// "Exhaustion"). `extended_formula` is the skeleton's CNF as actually solved, including every
    /// learned/T-lemma clause, for resumption through the SAT entry point.
    Unknown {
        extended_formula: PropFormula,
    },
}

/// Run the orchestrator loop of §4.9 to a verdict.
///
/// 1. Run the SAT engine on the skeleton.
/// 2. UNSAT is final.
/// 3. A complete SAT model is lifted to the atom level and checked for T-consistency; an
///    inconsistency yields a T-conflict clause fed back to the engine.
/// 4. A partial (capped) SAT model is checked the same way, but a consistent partial model drives
///    T-propagation instead of a verdict: every atom the theory now determines becomes a new unit
///    clause, and the engine resumes from where it left off.
pub fn solve_dpllt(
    skeleton: &Skeleton,
    subterms: &[Term],
    max_decisions: usize,
    generator: &mut FreshNameGenerator,
    interner: &mut Interner,
) -> SmtVerdict {
    let mut engine = ConstraintSatisfactionSolver::new(max_decisions);
    let encoding = tseitin_encode(&skeleton.formula, generator, interner);
    for clause in encoding.clauses {
        engine.add_clause(clause);
    }

    loop {
        let status = engine.solve(interner);
        if status == SolveStatus::Unsat {
            return SmtVerdict::Unsat;
        }

        let assignment: Vec<Option<bool>> = skeleton
            .propositions
            .iter()
            .map(|&proposition| engine.model().get(proposition))
            .collect();

        let mut closure = CongruenceClosure::new(subterms);
        match closure.check(&skeleton.atoms, &assignment) {
            TheoryVerdict::Conflict => {
                debug!("T-conflict over the current atom-model, restarting with a learned clause");
                engine.add_clause(conflict_clause(skeleton, &assignment));
            }
            TheoryVerdict::Consistent { propagated } => {
                if status == SolveStatus::Sat {
                    return SmtVerdict::Sat(atom_model(skeleton, &assignment));
                }
                if propagated.is_empty() {
                    return SmtVerdict::Unknown {
                        extended_formula: engine.database().to_formula(),
                    };
                }
                for (index, value) in propagated {
                    debug!("T-propagation determines atom #{index}={value}");
                    engine.add_clause(unit_clause(skeleton.propositions[index], value));
                }
            }
        }
    }
}

/// A disjunction that flips the sign of every currently-assigned atom (§4.9 step 3: "a disjunction
/// that flips the sign of every atom in the current atom-model").
fn conflict_clause(skeleton: &Skeleton, assignment: &[Option<bool>]) -> FlatClause {
    let mut pos = HashSet::new();
    let mut neg = HashSet::new();
    for (&proposition, value) in skeleton.propositions.iter().zip(assignment) {
        match value {
            Some(true) => {
                neg.insert(proposition);
            }
            Some(false) => {
                pos.insert(proposition);
            }
            None => {}
        }
    }
    FlatClause { pos, neg }
}

fn unit_clause(proposition: Symbol, value: bool) -> FlatClause {
    let mut pos = HashSet::new();
    let mut neg = HashSet::new();
    if value {
        pos.insert(proposition);
    } else {
        neg.insert(proposition);
    }
    FlatClause { pos, neg }
}

fn atom_model(skeleton: &Skeleton, assignment: &[Option<bool>]) -> Vec<(EqualityAtom, bool)> {
    skeleton
        .atoms
        .iter()
        .zip(assignment)
        .filter_map(|(atom, value)| value.map(|value| (atom.clone(), value)))
        .collect()
}
