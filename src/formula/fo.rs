use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use super::term::Term;
use crate::interner::Interner;

/// The binary connectives of the first-order surface (§6): a proper subset of
/// [`super::connective::Connective`], since ↔/⊕/↑/↓ are not part of the FO concrete syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FoConnective {
    And,
    Or,
    Implies,
}

impl fmt::Display for FoConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            FoConnective::And => "&",
            FoConnective::Or => "|",
            FoConnective::Implies => "->",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// A first-order formula tree (§3: "First-order formula").
///
/// Quantifiers are representable (so the parser can accept the full surface syntax of §6
/// without special-casing), but [`FoFormula::is_quantifier_free`] is checked at the SMT entry
/// point (§4.10, §7: "Unsupported fragment") before any solving work begins — the SMT core never
/// sees a formula containing [`FoFormula::Quantifier`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FoFormula {
    Equals(Term, Term),
    Not(Rc<FoFormula>),
    Bin(FoConnective, Rc<FoFormula>, Rc<FoFormula>),
    Quantified(Quantifier, lasso::Spur, Rc<FoFormula>),
}

impl FoFormula {
    pub fn not(formula: FoFormula) -> Self {
        FoFormula::Not(Rc::new(formula))
    }

    pub fn bin(connective: FoConnective, left: FoFormula, right: FoFormula) -> Self {
        FoFormula::Bin(connective, Rc::new(left), Rc::new(right))
    }

    pub fn is_quantifier_free(&self) -> bool {
        match self {
            FoFormula::Equals(..) => true,
            FoFormula::Not(inner) => inner.is_quantifier_free(),
            FoFormula::Bin(_, left, right) => left.is_quantifier_free() && right.is_quantifier_free(),
            FoFormula::Quantified(..) => false,
        }
    }

    /// Every equality atom `t1 = t2` occurring in the formula, each appearing once (§4.9's
    /// orchestrator seeds the propositional skeleton's atom map from exactly this set).
    pub fn equalities(&self) -> Vec<(Term, Term)> {
        let mut atoms = Vec::new();
        let mut seen = HashSet::new();
        collect_equalities(self, &mut seen, &mut atoms);
        atoms
    }

    /// Every subterm occurring anywhere in the formula (§4.8: "the complete set of subterms of
    /// the original formula").
    pub fn subterms(&self) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for (left, right) in self.equalities() {
            for term in left.subterms().into_iter().chain(right.subterms()) {
                if seen.insert(term.clone()) {
                    order.push(term);
                }
            }
        }
        order
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> FoFormulaDisplay<'a> {
        FoFormulaDisplay {
            formula: self,
            interner,
        }
    }
}

fn collect_equalities(formula: &FoFormula, seen: &mut HashSet<(Term, Term)>, atoms: &mut Vec<(Term, Term)>) {
    match formula {
        FoFormula::Equals(left, right) => {
            let key = (left.clone(), right.clone());
            if seen.insert(key.clone()) {
                atoms.push(key);
            }
        }
        FoFormula::Not(inner) => collect_equalities(inner, seen, atoms),
        FoFormula::Bin(_, left, right) => {
            collect_equalities(left, seen, atoms);
            collect_equalities(right, seen, atoms);
        }
        FoFormula::Quantified(_, _, inner) => collect_equalities(inner, seen, atoms),
    }
}

pub struct FoFormulaDisplay<'a> {
    formula: &'a FoFormula,
    interner: &'a Interner,
}

impl fmt::Display for FoFormulaDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fo(self.formula, self.interner, f)
    }
}

fn fmt_fo(formula: &FoFormula, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match formula {
        FoFormula::Equals(left, right) => {
            write!(f, "{}={}", left.display(interner), right.display(interner))
        }
        FoFormula::Not(inner) => {
            write!(f, "~")?;
            fmt_fo(inner, interner, f)
        }
        FoFormula::Bin(connective, left, right) => {
            write!(f, "(")?;
            fmt_fo(left, interner, f)?;
            write!(f, "{connective}")?;
            fmt_fo(right, interner, f)?;
            write!(f, ")")
        }
        FoFormula::Quantified(quantifier, variable, inner) => {
            let q = match quantifier {
                Quantifier::Forall => "A",
                Quantifier::Exists => "E",
            };
            write!(f, "{q}[{}]", interner.resolve(*variable))?;
            fmt_fo(inner, interner, f)
        }
    }
}
