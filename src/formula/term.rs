use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::interner::Interner;
use crate::interner::Symbol;

/// A first-order term (§3: "Term (first-order)").
///
/// Two terms are equal iff they are structurally identical, which — as with [`super::prop::PropFormula`]
/// — falls out of `Rc`'s structural `PartialEq`/`Hash` for free.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Const(Symbol),
    Var(Symbol),
    Func(Symbol, Rc<[Term]>),
}

impl Term {
    pub fn func(symbol: Symbol, args: Vec<Term>) -> Self {
        Term::Func(symbol, args.into())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Term::Func(..))
    }

    /// Every syntactic subterm of `self`, including `self`, each appearing once (§4.7: "seeded
    /// from all subterms in a formula").
    pub fn subterms(&self) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        subterms_helper(self, &mut seen, &mut order);
        order
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

fn subterms_helper(term: &Term, seen: &mut HashSet<Term>, order: &mut Vec<Term>) {
    if seen.contains(term) {
        return;
    }
    if let Term::Func(_, args) = term {
        for arg in args.iter() {
            subterms_helper(arg, seen, order);
        }
    }
    seen.insert(term.clone());
    order.push(term.clone());
}

pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_term(self.term, self.interner, f)
    }
}

fn fmt_term(term: &Term, interner: &Interner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match term {
        Term::Const(symbol) | Term::Var(symbol) => write!(f, "{}", interner.resolve(*symbol)),
        Term::Func(symbol, args) => {
            write!(f, "{}(", interner.resolve(*symbol))?;
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    write!(f, ",")?;
                }
                fmt_term(arg, interner, f)?;
            }
            write!(f, ")")
        }
    }
}
