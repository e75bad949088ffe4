//! Token definitions for the propositional and first-order surface syntaxes of §6.
//!
//! Two separate `logos` token enums rather than one shared enum: the propositional surface's `T`
//! and `F` constants would otherwise collide with the first-order surface's function-symbol
//! letter range (`f`-`t`), and keeping the grammars lexically independent avoids that entirely.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum PropToken<'src> {
    #[token("T")]
    True,
    #[token("F")]
    False,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("~")]
    Tilde,
    #[token("<->")]
    Iff,
    #[token("->")]
    Implies,
    #[token("-&")]
    Nand,
    #[token("-|")]
    Nor,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("+")]
    Xor,
    #[regex(r"[a-z]+[0-9]*")]
    Var(&'src str),
}

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum FoToken<'src> {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token("~")]
    Tilde,
    #[token("->")]
    Implies,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("A")]
    Forall,
    #[token("E")]
    Exists,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident(&'src str),
}
