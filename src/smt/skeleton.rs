//! §4.9 step 1: the propositional skeleton of a quantifier-free first-order formula.

use std::collections::HashMap;

use crate::engine::fresh_name::FreshNameGenerator;
use crate::formula::connective::Connective;
use crate::formula::fo::FoConnective;
use crate::formula::fo::FoFormula;
use crate::formula::prop::PropFormula;
use crate::formula::term::Term;
use crate::interner::Interner;
use crate::interner::Symbol;
use crate::theory::EqualityAtom;

/// The skeleton formula plus the bidirectional `atom <-> proposition` map (§4.9: "memoizing so
/// identical atoms share a proposition. Keep a bidirectional atom<->proposition map").
pub struct Skeleton {
    pub formula: PropFormula,
    pub atoms: Vec<EqualityAtom>,
    pub propositions: Vec<Symbol>,
}

pub fn build_skeleton(
    formula: &FoFormula,
    generator: &mut FreshNameGenerator,
    interner: &mut Interner,
) -> Skeleton {
    let mut atoms = Vec::new();
    let mut propositions = Vec::new();
    let mut memo: HashMap<(Term, Term), usize> = HashMap::new();

    let skeleton_formula = walk(formula, generator, interner, &mut atoms, &mut propositions, &mut memo);

    Skeleton {
        formula: skeleton_formula,
        atoms,
        propositions,
    }
}

fn walk(
    formula: &FoFormula,
    generator: &mut FreshNameGenerator,
    interner: &mut Interner,
    atoms: &mut Vec<EqualityAtom>,
    propositions: &mut Vec<Symbol>,
    memo: &mut HashMap<(Term, Term), usize>,
) -> PropFormula {
    match formula {
        FoFormula::Equals(left, right) => {
            let key = (left.clone(), right.clone());
            let index = *memo.entry(key).or_insert_with(|| {
                let proposition = generator.fresh(interner);
                atoms.push(EqualityAtom {
                    left: left.clone(),
                    right: right.clone(),
                });
                propositions.push(proposition);
                atoms.len() - 1
            });
            PropFormula::var(propositions[index])
        }
        FoFormula::Not(inner) => {
            PropFormula::not(walk(inner, generator, interner, atoms, propositions, memo))
        }
        FoFormula::Bin(connective, left, right) => PropFormula::bin(
            map_connective(*connective),
            walk(left, generator, interner, atoms, propositions, memo),
            walk(right, generator, interner, atoms, propositions, memo),
        ),
        FoFormula::Quantified(..) => {
            unreachable!("the SMT entry point rejects quantifiers before building a skeleton")
        }
    }
}

fn map_connective(connective: FoConnective) -> Connective {
    match connective {
        FoConnective::And => Connective::And,
        FoConnective::Or => Connective::Or,
        FoConnective::Implies => Connective::Implies,
    }
}
