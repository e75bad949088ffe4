use std::fmt;

/// The binary propositional connectives accepted by the formula surface (§1, §6).
///
/// `Nand`/`Nor` are Sheffer-stroke-family connectives (`-&`/`-|` in the concrete syntax, ↑/↓ in
/// the spec's notation); they are eliminated during NNF rewriting ([`crate::encodings::nnf`])
/// rather than carried through to CNF, since none of `∧`,`∨`,`¬` is a Nand/Nor primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
    Xor,
    Nand,
    Nor,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Implies => "->",
            Connective::Iff => "<->",
            Connective::Xor => "+",
            Connective::Nand => "-&",
            Connective::Nor => "-|",
        }
    }

    pub fn evaluate(self, left: bool, right: bool) -> bool {
        match self {
            Connective::And => left && right,
            Connective::Or => left || right,
            Connective::Implies => !left || right,
            Connective::Iff => left == right,
            Connective::Xor => left != right,
            Connective::Nand => !(left && right),
            Connective::Nor => !(left || right),
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
