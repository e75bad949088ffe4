//! §4.7: union-find over terms.

use std::collections::HashMap;

use crate::formula::term::Term;

struct Node {
    parent: usize,
    size: usize,
}

/// A path-compressed, union-by-size disjoint-set forest keyed by term identity, scoped to one
/// congruence-closure check (§5: "scoped to one theory check and discarded").
#[derive(Debug, Default)]
pub struct UnionFind {
    index: HashMap<Term, usize>,
    terms: Vec<Term>,
    nodes: Vec<Node>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("parent", &self.parent)
            .field("size", &self.size)
            .finish()
    }
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one node per term, if not already present (§4.7: "`parent` self-initially, `size=1`").
    pub fn make_set(&mut self, term: Term) -> usize {
        if let Some(&id) = self.index.get(&term) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: id,
            size: 1,
        });
        self.terms.push(term.clone());
        let _ = self.index.insert(term, id);
        id
    }

    pub fn id_of(&self, term: &Term) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term_of(&self, id: usize) -> &Term {
        &self.terms[id]
    }

    /// The root of `id`'s tree, with path compression.
    pub fn find(&mut self, id: usize) -> usize {
        if self.nodes[id].parent != id {
            let root = self.find(self.nodes[id].parent);
            self.nodes[id].parent = root;
        }
        self.nodes[id].parent
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Attach the smaller tree under the larger, summing sizes (§4.7: "union-by-size"). Returns
    /// `true` if the union actually merged two distinct trees.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let (smaller, larger) = if self.nodes[root_a].size < self.nodes[root_b].size {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.nodes[smaller].parent = larger;
        self.nodes[larger].size += self.nodes[smaller].size;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::Interner;

    fn term(interner: &mut Interner, name: &str) -> Term {
        Term::Var(interner.intern(name))
    }

    #[test]
    fn fresh_sets_are_distinct() {
        let mut interner = Interner::new();
        let mut uf = UnionFind::new();
        let a = uf.make_set(term(&mut interner, "a"));
        let b = uf.make_set(term(&mut interner, "b"));
        assert!(!uf.same_set(a, b));
    }

    #[test]
    fn union_merges_sets_and_is_idempotent() {
        let mut interner = Interner::new();
        let mut uf = UnionFind::new();
        let a = uf.make_set(term(&mut interner, "a"));
        let b = uf.make_set(term(&mut interner, "b"));
        assert!(uf.union(a, b));
        assert!(uf.same_set(a, b));
        assert!(!uf.union(a, b));
    }

    #[test]
    fn make_set_is_idempotent_for_the_same_term() {
        let mut interner = Interner::new();
        let mut uf = UnionFind::new();
        let t = term(&mut interner, "a");
        let first = uf.make_set(t.clone());
        let second = uf.make_set(t);
        assert_eq!(first, second);
    }

    #[test]
    fn union_is_transitive_through_a_shared_root() {
        let mut interner = Interner::new();
        let mut uf = UnionFind::new();
        let a = uf.make_set(term(&mut interner, "a"));
        let b = uf.make_set(term(&mut interner, "b"));
        let c = uf.make_set(term(&mut interner, "c"));
        let _ = uf.union(a, b);
        let _ = uf.union(b, c);
        assert!(uf.same_set(a, c));
    }
}
