//! Component B: the NNF/CNF rewriter (§4.1).
//!
//! Mirrors the original source's `eliminate_iffs` / `eliminate_implies` / `push_negation_in` /
//! `eliminate_double_negation` pipeline, but total: the original's `push_negation_in` recursed
//! into cases it never actually matched (missing the "negation over negation" case cleanly), so
//! here each step is written as a single exhaustive match rather than the original's ad hoc
//! branching.

use crate::formula::connective::Connective;
use crate::formula::prop::PropFormula;

/// Rewrite `formula` into negation normal form: only `¬`,`∧`,`∨` remain, and every `¬` sits
/// directly over a variable or constant. Constants are folded away wherever an identity or
/// absorbing law applies, so the only way a `Const` survives is as the formula's entire result.
pub fn to_nnf(formula: &PropFormula) -> PropFormula {
    let no_iffs = eliminate_iffs(formula);
    let no_implies = eliminate_implies(&no_iffs);
    let no_xor_family = eliminate_xor_family(&no_implies);
    let pushed = push_negation_in(&no_xor_family);
    fold_constants(&pushed)
}

/// Collapse `Const` leaves using `∧`/`∨`'s identity and absorbing laws, bottom-up. After folding,
/// a `Const` node can only appear as the root of the whole result — never nested under a `Bin` or
/// `Not` alongside a `Var` — since every binary rule below resolves a `Const` child immediately.
pub fn fold_constants(formula: &PropFormula) -> PropFormula {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => formula.clone(),
        PropFormula::Not(inner) => match fold_constants(inner) {
            PropFormula::Const(value) => PropFormula::Const(!value),
            other => PropFormula::not(other),
        },
        PropFormula::Bin(Connective::And, left, right) => {
            match (fold_constants(left), fold_constants(right)) {
                (PropFormula::Const(false), _) | (_, PropFormula::Const(false)) => {
                    PropFormula::Const(false)
                }
                (PropFormula::Const(true), other) | (other, PropFormula::Const(true)) => other,
                (l, r) => PropFormula::bin(Connective::And, l, r),
            }
        }
        PropFormula::Bin(Connective::Or, left, right) => {
            match (fold_constants(left), fold_constants(right)) {
                (PropFormula::Const(true), _) | (_, PropFormula::Const(true)) => {
                    PropFormula::Const(true)
                }
                (PropFormula::Const(false), other) | (other, PropFormula::Const(false)) => other,
                (l, r) => PropFormula::bin(Connective::Or, l, r),
            }
        }
        // Implies/Iff/Xor/Nand/Nor are gone by the time `to_nnf` reaches this point, but
        // `fold_constants` is also called directly on pre-NNF formulas (§4.2's Tseitin bindings),
        // so evaluate them outright when both sides have folded to constants.
        PropFormula::Bin(connective, left, right) => {
            match (fold_constants(left), fold_constants(right)) {
                (PropFormula::Const(a), PropFormula::Const(b)) => {
                    PropFormula::Const(connective.evaluate(a, b))
                }
                (l, r) => PropFormula::bin(*connective, l, r),
            }
        }
    }
}

fn eliminate_iffs(formula: &PropFormula) -> PropFormula {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => formula.clone(),
        PropFormula::Not(inner) => PropFormula::not(eliminate_iffs(inner)),
        PropFormula::Bin(Connective::Iff, left, right) => {
            let a = eliminate_iffs(left);
            let b = eliminate_iffs(right);
            let forward = PropFormula::bin(Connective::Implies, a.clone(), b.clone());
            let backward = PropFormula::bin(Connective::Implies, b, a);
            PropFormula::bin(Connective::And, forward, backward)
        }
        PropFormula::Bin(connective, left, right) => {
            PropFormula::bin(*connective, eliminate_iffs(left), eliminate_iffs(right))
        }
    }
}

fn eliminate_implies(formula: &PropFormula) -> PropFormula {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => formula.clone(),
        PropFormula::Not(inner) => PropFormula::not(eliminate_implies(inner)),
        PropFormula::Bin(Connective::Implies, left, right) => {
            let a = eliminate_implies(left);
            let b = eliminate_implies(right);
            PropFormula::bin(Connective::Or, PropFormula::not(a), b)
        }
        PropFormula::Bin(connective, left, right) => {
            PropFormula::bin(*connective, eliminate_implies(left), eliminate_implies(right))
        }
    }
}

/// `⊕`, `↑` (Nand), and `↓` (Nor) are not NNF primitives; rewrite them in terms of `∧`,`∨`,`¬`
/// before pushing negations. `a ⊕ b ≡ (a∨b) ∧ ¬(a∧b)`; `a↑b ≡ ¬(a∧b)`; `a↓b ≡ ¬(a∨b)`.
fn eliminate_xor_family(formula: &PropFormula) -> PropFormula {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => formula.clone(),
        PropFormula::Not(inner) => PropFormula::not(eliminate_xor_family(inner)),
        PropFormula::Bin(Connective::Xor, left, right) => {
            let a = eliminate_xor_family(left);
            let b = eliminate_xor_family(right);
            let either = PropFormula::bin(Connective::Or, a.clone(), b.clone());
            let not_both = PropFormula::not(PropFormula::bin(Connective::And, a, b));
            PropFormula::bin(Connective::And, either, not_both)
        }
        PropFormula::Bin(Connective::Nand, left, right) => {
            let a = eliminate_xor_family(left);
            let b = eliminate_xor_family(right);
            PropFormula::not(PropFormula::bin(Connective::And, a, b))
        }
        PropFormula::Bin(Connective::Nor, left, right) => {
            let a = eliminate_xor_family(left);
            let b = eliminate_xor_family(right);
            PropFormula::not(PropFormula::bin(Connective::Or, a, b))
        }
        PropFormula::Bin(connective, left, right) => PropFormula::bin(
            *connective,
            eliminate_xor_family(left),
            eliminate_xor_family(right),
        ),
    }
}

fn push_negation_in(formula: &PropFormula) -> PropFormula {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => formula.clone(),
        PropFormula::Bin(connective, left, right) => {
            PropFormula::bin(*connective, push_negation_in(left), push_negation_in(right))
        }
        PropFormula::Not(inner) => push_negation_of(inner),
    }
}

/// Push a negation that sits directly above `inner` further down (or collapse it if `inner`
/// is itself a negation).
fn push_negation_of(inner: &PropFormula) -> PropFormula {
    match inner {
        PropFormula::Const(value) => PropFormula::Const(!value),
        PropFormula::Var(_) => PropFormula::not(inner.clone()),
        PropFormula::Not(double_inner) => push_negation_in(double_inner),
        PropFormula::Bin(Connective::And, left, right) => PropFormula::bin(
            Connective::Or,
            push_negation_of(left),
            push_negation_of(right),
        ),
        PropFormula::Bin(Connective::Or, left, right) => PropFormula::bin(
            Connective::And,
            push_negation_of(left),
            push_negation_of(right),
        ),
        // Implies/Iff/Xor/Nand/Nor have already been eliminated by the time this runs.
        PropFormula::Bin(connective, left, right) => PropFormula::not(PropFormula::bin(
            *connective,
            push_negation_in(left),
            push_negation_in(right),
        )),
    }
}

/// Rewrite an NNF formula into CNF, distributing `∨` over `∧` only where the subformula actually
/// contains an `∧` (§4.1: "must not emit exponential blow-up for subformulas that are already
/// clause-shaped").
pub fn to_cnf_from_nnf(formula: &PropFormula) -> PropFormula {
    if formula.is_literal() {
        return formula.clone();
    }
    match formula {
        PropFormula::Bin(Connective::And, left, right) => PropFormula::bin(
            Connective::And,
            to_cnf_from_nnf(left),
            to_cnf_from_nnf(right),
        ),
        PropFormula::Bin(Connective::Or, left, right) => {
            let left_cnf = to_cnf_from_nnf(left);
            let right_cnf = to_cnf_from_nnf(right);
            if contains_and(&left_cnf) {
                distribute(&left_cnf, &right_cnf)
            } else if contains_and(&right_cnf) {
                distribute(&right_cnf, &left_cnf)
            } else {
                PropFormula::bin(Connective::Or, left_cnf, right_cnf)
            }
        }
        // NNF guarantees only ¬/∧/∨ remain and ¬ is already pushed to the leaves, so a bare
        // `Not` here is already a literal and handled by the `is_literal` check above.
        other => other.clone(),
    }
}

/// Distribute `(c1 & c2 & ... ) | rest` into `(c1|rest) & (c2|rest) & ...`, where `conjunction`
/// is known (by the caller) to contain an `∧` at its root.
fn distribute(conjunction: &PropFormula, rest: &PropFormula) -> PropFormula {
    match conjunction {
        PropFormula::Bin(Connective::And, left, right) => {
            let distributed_left = if contains_and(left) {
                distribute(left, rest)
            } else {
                PropFormula::bin(Connective::Or, (**left).clone(), rest.clone())
            };
            let distributed_right = if contains_and(right) {
                distribute(right, rest)
            } else {
                PropFormula::bin(Connective::Or, (**right).clone(), rest.clone())
            };
            PropFormula::bin(Connective::And, distributed_left, distributed_right)
        }
        other => PropFormula::bin(Connective::Or, other.clone(), rest.clone()),
    }
}

fn contains_and(formula: &PropFormula) -> bool {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => false,
        PropFormula::Not(_) => false,
        PropFormula::Bin(Connective::And, ..) => true,
        PropFormula::Bin(_, left, right) => contains_and(left) || contains_and(right),
    }
}

/// Rewrite an arbitrary formula into CNF (§4.1's `to_cnf`): literals and already-clause-shaped
/// NNF formulas pass through unchanged; anything containing `∧` after NNF conversion is
/// distributed.
pub fn to_cnf(formula: &PropFormula) -> PropFormula {
    if formula.is_literal() {
        return formula.clone();
    }
    let nnf = to_nnf(formula);
    if !contains_and(&nnf) {
        nnf
    } else {
        to_cnf_from_nnf(&nnf)
    }
}

/// Idempotence check used by property tests (§8): a second application of [`to_nnf`] must be a
/// no-op once the formula is already in NNF.
pub fn is_nnf(formula: &PropFormula) -> bool {
    match formula {
        PropFormula::Const(_) | PropFormula::Var(_) => true,
        PropFormula::Not(inner) => matches!(**inner, PropFormula::Const(_) | PropFormula::Var(_)),
        PropFormula::Bin(Connective::And, left, right) | PropFormula::Bin(Connective::Or, left, right) => {
            is_nnf(left) && is_nnf(right)
        }
        PropFormula::Bin(..) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    fn var(interner: &mut Interner, name: &str) -> PropFormula {
        PropFormula::var(interner.intern(name))
    }

    #[test]
    fn to_nnf_is_idempotent() {
        let mut interner = Interner::new();
        let p = var(&mut interner, "p");
        let q = var(&mut interner, "q");
        let formula = PropFormula::bin(Connective::Iff, p, q);

        let once = to_nnf(&formula);
        assert!(is_nnf(&once));
        let twice = to_nnf(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn to_nnf_pushes_negation_through_and() {
        let mut interner = Interner::new();
        let p = var(&mut interner, "p");
        let q = var(&mut interner, "q");
        let formula = PropFormula::not(PropFormula::bin(Connective::And, p, q));

        let nnf = to_nnf(&formula);
        assert!(is_nnf(&nnf));
        assert!(matches!(nnf, PropFormula::Bin(Connective::Or, ..)));
    }

    #[test]
    fn fold_constants_collapses_and_absorbing_law() {
        let mut interner = Interner::new();
        let p = var(&mut interner, "p");
        let formula = PropFormula::bin(Connective::And, p, PropFormula::Const(false));
        assert_eq!(fold_constants(&formula), PropFormula::Const(false));
    }

    #[test]
    fn fold_constants_collapses_or_identity_law() {
        let mut interner = Interner::new();
        let p = var(&mut interner, "p");
        let formula = PropFormula::bin(Connective::Or, p.clone(), PropFormula::Const(false));
        assert_eq!(fold_constants(&formula), p);
    }

    #[test]
    fn to_cnf_does_not_blow_up_an_already_clausal_formula() {
        let mut interner = Interner::new();
        let p = var(&mut interner, "p");
        let q = var(&mut interner, "q");
        let r = var(&mut interner, "r");
        let clause = PropFormula::bin(Connective::Or, p, PropFormula::bin(Connective::Or, q, r));
        assert_eq!(to_cnf(&clause), clause);
    }
}

