//! The top-level SMT entry point (§6).

use crate::basic_types::Model;
use crate::engine::fresh_name::FreshNameGenerator;
use crate::error::Error;
use crate::formula::fo::FoFormula;
use crate::interner::Interner;
use crate::smt::build_skeleton;
use crate::smt::solve_dpllt;
use crate::smt::SmtVerdict;
use crate::theory::EqualityAtom;

use super::outputs::Status;

pub struct SmtOutcome {
    pub status: Status,
    /// Non-empty only when `status` is [`Status::Sat`]: every equality atom of the input formula
    /// paired with the Boolean the model assigns it (§6: "a mapping from equality atoms to
    /// Booleans that satisfies both the Boolean structure and T_UF").
    pub atom_model: Vec<(EqualityAtom, bool)>,
}

/// Solve a quantifier-free first-order `formula` (§6). Rejects any formula containing a
/// quantifier with `Error::UnsupportedFragment` before any solving work begins (§4.10).
pub fn solve_smt(formula: &FoFormula, max_decisions: usize, interner: &mut Interner) -> Result<SmtOutcome, Error> {
    if !formula.is_quantifier_free() {
        return Err(Error::UnsupportedFragment(
            "the SMT core only accepts quantifier-free formulas".to_string(),
        ));
    }

    let mut generator = FreshNameGenerator::new("s_");
    let skeleton = build_skeleton(formula, &mut generator, interner);
    let subterms = formula.subterms();

    match solve_dpllt(&skeleton, &subterms, max_decisions, &mut generator, interner) {
        SmtVerdict::Sat(atom_model) => Ok(SmtOutcome {
            status: Status::Sat,
            atom_model,
        }),
        SmtVerdict::Unsat => Ok(SmtOutcome {
            status: Status::Unsat,
            atom_model: Vec::new(),
        }),
        SmtVerdict::Unknown { extended_formula } => Err(Error::Exhausted {
            partial_model: Model::new(),
            resumed_formula: extended_formula,
        }),
    }
}
