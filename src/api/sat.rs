//! The top-level SAT entry point (§6).

use crate::basic_types::Model;
use crate::encodings::tseitin::tseitin_encode;
use crate::encodings::tseitin::FlatClause;
use crate::engine::fresh_name::FreshNameGenerator;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SolveStatus;
use crate::error::Error;
use crate::formula::prop::PropFormula;
use crate::interner::Interner;

use super::outputs::Status;

pub struct SatOutcome {
    pub status: Status,
    /// The model restricted to the variables of the formula the caller passed in — Tseitin's
    /// fresh gate names never leak across the API boundary (§6).
    pub model: Model,
    /// The extended CNF formula actually solved, including every learned clause, so a caller can
    /// resume with the same learned clauses by passing this back in as `formula`.
    pub extended_formula: PropFormula,
}

/// Solve `formula` (§6: "a propositional formula and optional partial model and optional
/// additional conflict clause"). A decision-cap exhaustion returns `Error::Exhausted` rather than
/// a verdict; resume by calling this again with the returned `partial_model` and
/// `resumed_formula`.
pub fn solve_sat(
    formula: &PropFormula,
    partial_model: Option<&Model>,
    additional_conflict_clause: Option<FlatClause>,
    max_decisions: usize,
    interner: &mut Interner,
) -> Result<SatOutcome, Error> {
    let original_variables = formula.variables();
    let mut generator = FreshNameGenerator::new("g_");
    let mut engine = ConstraintSatisfactionSolver::new(max_decisions);

    if let Some(seed) = partial_model {
        for (variable, value) in seed.iter() {
            engine.assume(variable, value);
        }
    }

    let encoding = tseitin_encode(formula, &mut generator, interner);
    for clause in encoding.clauses {
        engine.add_clause(clause);
    }
    if let Some(clause) = additional_conflict_clause {
        engine.add_clause(clause);
    }

    match engine.solve(interner) {
        SolveStatus::Sat => Ok(SatOutcome {
            status: Status::Sat,
            model: engine.model().restricted_to(original_variables),
            extended_formula: engine.database().to_formula(),
        }),
        SolveStatus::Unsat => Ok(SatOutcome {
            status: Status::Unsat,
            model: Model::new(),
            extended_formula: engine.database().to_formula(),
        }),
        SolveStatus::Unknown => Err(Error::Exhausted {
            partial_model: engine.model().clone(),
            resumed_formula: engine.database().to_formula(),
        }),
    }
}
