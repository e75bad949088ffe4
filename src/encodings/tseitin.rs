//! Component C: the Tseitin encoder (§4.2).
//!
//! Ports `tseitin_transformation`/`give_representation_to_sub_formulae` from the original
//! source's `sat_solver.py`, but iterates the formula's closure directly instead of relying on a
//! dict's insertion order, and normalizes (tautology elimination, literal-set deduplication)
//! inline rather than in a separate `preprocess` pass, since the CNF store (§4.3) represents a
//! clause as `pos`/`neg` sets to begin with.

use std::collections::HashMap;
use std::collections::HashSet;

use super::nnf::to_cnf;
use crate::engine::fresh_name::FreshNameGenerator;
use crate::formula::connective::Connective;
use crate::formula::prop::PropFormula;
use crate::interner::Interner;
use crate::interner::Symbol;

/// A clause as the data model describes it (§3): disjoint positive/negative literal sets. The
/// empty clause (`pos` and `neg` both empty) denotes ⊥.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatClause {
    pub pos: HashSet<Symbol>,
    pub neg: HashSet<Symbol>,
}

impl FlatClause {
    pub fn is_tautological(&self) -> bool {
        self.pos.intersection(&self.neg).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.pos.len() + self.neg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The result of Tseitin-encoding a formula: the flattened, tautology-free clause list plus the
/// proposition naming the original formula's root (unit-asserted as clause 0, per §4.2 step 1).
pub struct TseitinEncoding {
    pub clauses: Vec<FlatClause>,
    pub root: Symbol,
}

/// Compile `formula` into an equisatisfiable CNF (§4.2). `generator` and `interner` are threaded
/// through rather than global, per §5/§9.
pub fn tseitin_encode(
    formula: &PropFormula,
    generator: &mut FreshNameGenerator,
    interner: &mut Interner,
) -> TseitinEncoding {
    let representations = name_subformulas(formula, generator, interner);
    let root = match &representations[formula] {
        PropFormula::Var(symbol) => *symbol,
        PropFormula::Const(_) => {
            // A constant root has no variable to unit-assert; synthesize one bound to the
            // constant so the rest of the pipeline can stay uniform.
            let symbol = generator.fresh(interner);
            let mut clauses = Vec::new();
            bind(
                &PropFormula::var(symbol),
                &representations[formula],
                &mut clauses,
            );
            return finish(clauses, symbol);
        }
        other => unreachable!("representation of a formula must be a literal, got {other:?}"),
    };

    let mut clauses = Vec::new();
    for subformula in formula.closure() {
        if subformula.is_literal() {
            continue;
        }
        let rep = representations[&subformula].clone();
        let rebuilt = match &subformula {
            PropFormula::Bin(connective, left, right) => PropFormula::bin(
                *connective,
                representations[left.as_ref()].clone(),
                representations[right.as_ref()].clone(),
            ),
            PropFormula::Not(inner) => PropFormula::not(representations[inner.as_ref()].clone()),
            _ => unreachable!("literals are skipped above"),
        };
        bind(&rep, &rebuilt, &mut clauses);
    }

    finish(clauses, root)
}

fn finish(mut clauses: Vec<FlatClause>, root: Symbol) -> TseitinEncoding {
    clauses.push(FlatClause {
        pos: HashSet::from([root]),
        neg: HashSet::new(),
    });
    let clauses = normalize(clauses);
    TseitinEncoding { clauses, root }
}

/// Emit the CNF clauses for `rep <-> rebuilt` (§4.2 step 2), by building the iff formula,
/// rewriting it to CNF (§4.1), and flattening. `to_cnf` folds away constants (see
/// [`super::nnf::fold_constants`]), so the only way a bare `Const` reaches here is as the whole
/// binding's result: `Const(true)` needs no clauses, `Const(false)` forces the empty clause.
fn bind(rep: &PropFormula, rebuilt: &PropFormula, clauses: &mut Vec<FlatClause>) {
    let binding = PropFormula::bin(Connective::Iff, rep.clone(), rebuilt.clone());
    match to_cnf(&binding) {
        PropFormula::Const(true) => {}
        PropFormula::Const(false) => clauses.push(FlatClause::default()),
        cnf => flatten_cnf(&cnf, clauses),
    }
}

/// Walk a CNF-shaped formula (an `∧` of `∨`s of literals, or a bare literal/clause) and append
/// one [`FlatClause`] per top-level conjunct.
fn flatten_cnf(formula: &PropFormula, clauses: &mut Vec<FlatClause>) {
    if let PropFormula::Bin(Connective::And, left, right) = formula {
        flatten_cnf(left, clauses);
        flatten_cnf(right, clauses);
        return;
    }
    clauses.push(flatten_clause(formula));
}

fn flatten_clause(formula: &PropFormula) -> FlatClause {
    let mut clause = FlatClause::default();
    flatten_clause_into(formula, &mut clause);
    clause
}

fn flatten_clause_into(formula: &PropFormula, clause: &mut FlatClause) {
    match formula {
        PropFormula::Bin(Connective::Or, left, right) => {
            flatten_clause_into(left, clause);
            flatten_clause_into(right, clause);
        }
        PropFormula::Var(symbol) => {
            let _ = clause.pos.insert(*symbol);
        }
        PropFormula::Not(inner) => match inner.as_ref() {
            PropFormula::Var(symbol) => {
                let _ = clause.neg.insert(*symbol);
            }
            other => unreachable!("CNF literal expected, found {other:?}"),
        },
        other => unreachable!("CNF clause expected, found {other:?}"),
    }
}

/// Drop tautological clauses and deduplicate literals within each clause (§4.2 "Normalization").
/// Deduplication is implicit in `FlatClause` storing sets rather than lists.
fn normalize(clauses: Vec<FlatClause>) -> Vec<FlatClause> {
    clauses
        .into_iter()
        .filter(|clause| !clause.is_tautological())
        .collect()
}

/// Allocate a fresh proposition for every non-literal subformula in `formula`'s closure; literal
/// subformulas map to themselves (§4.2).
fn name_subformulas(
    formula: &PropFormula,
    generator: &mut FreshNameGenerator,
    interner: &mut Interner,
) -> HashMap<PropFormula, PropFormula> {
    let mut representations = HashMap::new();
    for subformula in formula.closure() {
        let rep = if subformula.is_literal() {
            subformula.clone()
        } else {
            PropFormula::var(generator.fresh(interner))
        };
        let _ = representations.insert(subformula, rep);
    }
    representations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_satisfy(clauses: &[FlatClause], assignment: &HashMap<Symbol, bool>) -> bool {
        clauses.iter().all(|clause| {
            clause.pos.iter().any(|s| assignment[s])
                || clause.neg.iter().any(|s| !assignment[s])
        })
    }

    /// Brute-force every assignment of `vars` and check the encoding is satisfiable under exactly
    /// the assignments (restricted to `vars`) that satisfy `formula` (equisatisfiability, §8).
    /// `interner` must already contain `formula`'s variables; it's reused (not recreated) so that
    /// `vars`'s symbols still refer to the same variables inside `formula`.
    fn check_equisatisfiable(interner: &mut Interner, formula: &PropFormula, vars: &[Symbol]) {
        let mut generator = FreshNameGenerator::new("g");
        let encoding = tseitin_encode(formula, &mut generator, interner);
        let fresh: Vec<Symbol> = encoding
            .clauses
            .iter()
            .flat_map(|c| c.pos.iter().chain(c.neg.iter()).copied())
            .filter(|s| !vars.contains(s))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut formula_satisfiable = false;
        let mut encoding_satisfiable = false;
        for mask in 0..(1u32 << vars.len()) {
            let eval = |symbol: Symbol| {
                let index = vars.iter().position(|&v| v == symbol).unwrap();
                (mask >> index) & 1 == 1
            };
            if formula.evaluate(&eval) {
                formula_satisfiable = true;
            }
            for fresh_mask in 0..(1u32 << fresh.len()) {
                let mut assignment: HashMap<Symbol, bool> =
                    vars.iter().map(|&v| (v, eval(v))).collect();
                for (index, &symbol) in fresh.iter().enumerate() {
                    let _ = assignment.insert(symbol, (fresh_mask >> index) & 1 == 1);
                }
                if assignment[&encoding.root] && all_satisfy(&encoding.clauses, &assignment) {
                    encoding_satisfiable = true;
                }
            }
        }
        assert_eq!(formula_satisfiable, encoding_satisfiable);
    }

    #[test]
    fn encoding_of_iff_is_equisatisfiable() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let q = interner.intern("q");
        let formula = PropFormula::bin(Connective::Iff, PropFormula::var(p), PropFormula::var(q));
        check_equisatisfiable(&mut interner, &formula, &[p, q]);
    }

    #[test]
    fn encoding_of_unsatisfiable_formula_has_no_model() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let formula = PropFormula::bin(
            Connective::And,
            PropFormula::var(p),
            PropFormula::not(PropFormula::var(p)),
        );
        check_equisatisfiable(&mut interner, &formula, &[p]);
    }

    #[test]
    fn root_clause_is_unit_asserted() {
        let mut interner = Interner::new();
        let mut generator = FreshNameGenerator::new("g");
        let p = interner.intern("p");
        let formula = PropFormula::var(p);
        let encoding = tseitin_encode(&formula, &mut generator, &mut interner);
        assert!(encoding
            .clauses
            .iter()
            .any(|c| c.pos == HashSet::from([encoding.root]) && c.neg.is_empty()));
    }
}
