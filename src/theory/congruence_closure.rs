//! §4.8: congruence closure over T_UF.

use super::union_find::UnionFind;
use crate::formula::term::Term;

/// One equality atom's two sides, independent of what the propositional layer currently believes
/// about it (§4.8 "Inputs").
#[derive(Clone, Debug)]
pub struct EqualityAtom {
    pub left: Term,
    pub right: Term,
}

#[derive(Clone, Debug)]
pub enum Verdict {
    /// T-consistent. `propagated` holds `(atom_index, value)` pairs for every previously
    /// unassigned atom the congruence rule now determines (§4.8 "T-propagation").
    Consistent { propagated: Vec<(usize, bool)> },
    /// A false-assigned equality's two sides share a congruence-closure root.
    Conflict,
}

/// A union-find forest over every subterm of the formula, plus the congruence rule iterated to a
/// fixed point (§9: correcting the original source's non-iterating version, required for
/// soundness per §8 scenario 5).
#[derive(Debug)]
pub struct CongruenceClosure {
    forest: UnionFind,
    function_ids: Vec<usize>,
}

impl CongruenceClosure {
    pub fn new(subterms: &[Term]) -> Self {
        let mut forest = UnionFind::new();
        let mut function_ids = Vec::new();
        for term in subterms {
            let id = forest.make_set(term.clone());
            if term.is_function() {
                function_ids.push(id);
            }
        }
        CongruenceClosure {
            forest,
            function_ids,
        }
    }

    /// Union every atom assigned true, saturate the congruence rule, then check every atom
    /// assigned false for a root collision; when consistent, also compute T-propagated atoms.
    pub fn check(&mut self, atoms: &[EqualityAtom], assignment: &[Option<bool>]) -> Verdict {
        for (atom, value) in atoms.iter().zip(assignment) {
            if *value == Some(true) {
                let left = self.id_of(&atom.left);
                let right = self.id_of(&atom.right);
                let _ = self.forest.union(left, right);
            }
        }
        self.saturate_congruence();

        for (atom, value) in atoms.iter().zip(assignment) {
            if *value == Some(false) {
                let left = self.id_of(&atom.left);
                let right = self.id_of(&atom.right);
                if self.forest.same_set(left, right) {
                    return Verdict::Conflict;
                }
            }
        }

        Verdict::Consistent {
            propagated: self.propagate(atoms, assignment),
        }
    }

    fn propagate(&mut self, atoms: &[EqualityAtom], assignment: &[Option<bool>]) -> Vec<(usize, bool)> {
        let mut propagated = Vec::new();
        for (index, (atom, value)) in atoms.iter().zip(assignment).enumerate() {
            if value.is_some() {
                continue;
            }
            let left = self.id_of(&atom.left);
            let right = self.id_of(&atom.right);
            if self.forest.same_set(left, right) {
                propagated.push((index, true));
                continue;
            }
            if self.coincides_with_a_false_equality(left, right, atoms, assignment) {
                propagated.push((index, false));
            }
        }
        propagated
    }

    /// Does `(left, right)` coincide by root with the two (possibly swapped) sides of some
    /// already-false equality, forcing `(left, right)` false as well (§4.8)?
    fn coincides_with_a_false_equality(
        &mut self,
        left: usize,
        right: usize,
        atoms: &[EqualityAtom],
        assignment: &[Option<bool>],
    ) -> bool {
        for (other, value) in atoms.iter().zip(assignment) {
            if *value != Some(false) {
                continue;
            }
            let other_left = self.id_of(&other.left);
            let other_right = self.id_of(&other.right);
            let same_order = self.forest.same_set(left, other_left) && self.forest.same_set(right, other_right);
            let swapped = self.forest.same_set(left, other_right) && self.forest.same_set(right, other_left);
            if same_order || swapped {
                return true;
            }
        }
        false
    }

    fn saturate_congruence(&mut self) {
        loop {
            let mut changed = false;
            for i in 0..self.function_ids.len() {
                for j in (i + 1)..self.function_ids.len() {
                    let a = self.function_ids[i];
                    let b = self.function_ids[j];
                    if self.forest.same_set(a, b) {
                        continue;
                    }
                    if self.congruent(a, b) && self.forest.union(a, b) {
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
    }

    fn congruent(&mut self, a: usize, b: usize) -> bool {
        let (symbol_a, args_a) = match self.forest.term_of(a) {
            Term::Func(symbol, args) => (*symbol, args.clone()),
            _ => return false,
        };
        let (symbol_b, args_b) = match self.forest.term_of(b) {
            Term::Func(symbol, args) => (*symbol, args.clone()),
            _ => return false,
        };
        if symbol_a != symbol_b || args_a.len() != args_b.len() {
            return false;
        }
        args_a.iter().zip(args_b.iter()).all(|(x, y)| {
            let x = self.id_of(x);
            let y = self.id_of(y);
            self.forest.same_set(x, y)
        })
    }

    fn id_of(&mut self, term: &Term) -> usize {
        self.forest
            .id_of(term)
            .unwrap_or_else(|| self.forest.make_set(term.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    #[test]
    fn congruence_propagates_equal_function_applications() {
        let mut interner = Interner::new();
        let a = Term::Var(interner.intern("a"));
        let b = Term::Var(interner.intern("b"));
        let f = interner.intern("f");
        let fa = Term::func(f, vec![a.clone()]);
        let fb = Term::func(f, vec![b.clone()]);

        let subterms = vec![a.clone(), b.clone(), fa.clone(), fb.clone()];
        let mut closure = CongruenceClosure::new(&subterms);

        let atoms = vec![
            EqualityAtom { left: a, right: b },
            EqualityAtom { left: fa, right: fb },
        ];
        // a=b asserted true, f(a)=f(b) left undetermined: congruence must propagate it to true.
        let verdict = closure.check(&atoms, &[Some(true), None]);
        match verdict {
            Verdict::Consistent { propagated } => assert_eq!(propagated, vec![(1, true)]),
            Verdict::Conflict => panic!("expected consistency with a propagation"),
        }
    }

    /// §8 scenario 6: `g(a)=c` forces `f(g(a))=f(c)`, so asserting that equality false is a
    /// T-conflict regardless of any other disjunct.
    #[test]
    fn false_equality_contradicting_congruence_is_a_conflict() {
        let mut interner = Interner::new();
        let a = Term::Var(interner.intern("a"));
        let c = Term::Var(interner.intern("c"));
        let g = interner.intern("g");
        let f = interner.intern("f");
        let ga = Term::func(g, vec![a.clone()]);
        let fga = Term::func(f, vec![ga.clone()]);
        let fc = Term::func(f, vec![c.clone()]);

        let subterms = vec![a, c.clone(), ga.clone(), fga.clone(), fc.clone()];
        let mut closure = CongruenceClosure::new(&subterms);

        let atoms = vec![
            EqualityAtom { left: ga, right: c },
            EqualityAtom { left: fga, right: fc },
        ];
        let verdict = closure.check(&atoms, &[Some(true), Some(false)]);
        assert!(matches!(verdict, Verdict::Conflict));
    }

    /// §8 scenario 5: `f^3(a)=a` and `f^5(a)=a` together force `f(a)=a` by congruence, so
    /// asserting `f(a)=a` false is a conflict only reachable by iterating the congruence rule to
    /// a fixed point (a single pass over function pairs does not suffice).
    #[test]
    fn conflict_requires_iterating_congruence_to_a_fixed_point() {
        let mut interner = Interner::new();
        let a = Term::Var(interner.intern("a"));
        let f = interner.intern("f");
        let f1 = Term::func(f, vec![a.clone()]);
        let f2 = Term::func(f, vec![f1.clone()]);
        let f3 = Term::func(f, vec![f2.clone()]);
        let f4 = Term::func(f, vec![f3.clone()]);
        let f5 = Term::func(f, vec![f4.clone()]);

        let subterms = vec![a.clone(), f1.clone(), f2, f3.clone(), f4, f5.clone()];
        let mut closure = CongruenceClosure::new(&subterms);

        let atoms = vec![
            EqualityAtom { left: f3, right: a.clone() },
            EqualityAtom { left: f5, right: a.clone() },
            EqualityAtom { left: f1, right: a },
        ];
        let verdict = closure.check(&atoms, &[Some(true), Some(true), Some(false)]);
        assert!(matches!(verdict, Verdict::Conflict));
    }
}
