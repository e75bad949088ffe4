//! Recursive-descent parser for the propositional surface syntax (§6, §4.10).
//!
//! The surface requires every binary subformula to be fully parenthesized, so there is no
//! precedence table to maintain: a formula is either an atom, a `~`-prefixed formula, or
//! `(` formula connective formula `)`.

use logos::Logos;

use super::lexer::PropToken;
use crate::error::Error;
use crate::formula::connective::Connective;
use crate::formula::prop::PropFormula;
use crate::interner::Interner;

pub fn parse_propositional(source: &str, interner: &mut Interner) -> Result<PropFormula, Error> {
    let mut lexer = PropToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let token = result.map_err(|_| Error::Parse {
            message: format!("unrecognized token {:?}", lexer.slice()),
            offset: lexer.span().start,
        })?;
        tokens.push((token, lexer.span().start));
    }

    let mut parser = Parser {
        tokens,
        position: 0,
        interner,
    };
    let formula = parser.parse_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

struct Parser<'src, 'interner> {
    tokens: Vec<(PropToken<'src>, usize)>,
    position: usize,
    interner: &'interner mut Interner,
}

impl<'src> Parser<'src, '_> {
    fn peek(&self) -> Option<&PropToken<'src>> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .map(|(_, o)| *o)
            .unwrap_or(usize::MAX)
    }

    fn advance(&mut self) -> Option<PropToken<'src>> {
        let token = self.tokens.get(self.position).map(|(t, _)| t.clone());
        self.position += 1;
        token
    }

    fn expect_end(&self) -> Result<(), Error> {
        if self.position != self.tokens.len() {
            return Err(Error::Parse {
                message: "trailing input after formula".to_string(),
                offset: self.offset(),
            });
        }
        Ok(())
    }

    fn parse_formula(&mut self) -> Result<PropFormula, Error> {
        match self.peek() {
            Some(PropToken::True) => {
                let _ = self.advance();
                Ok(PropFormula::Const(true))
            }
            Some(PropToken::False) => {
                let _ = self.advance();
                Ok(PropFormula::Const(false))
            }
            Some(PropToken::Var(name)) => {
                let name = name.to_string();
                let _ = self.advance();
                Ok(PropFormula::var(self.interner.intern(&name)))
            }
            Some(PropToken::Tilde) => {
                let _ = self.advance();
                let inner = self.parse_formula()?;
                Ok(PropFormula::not(inner))
            }
            Some(PropToken::LParen) => {
                let _ = self.advance();
                let left = self.parse_formula()?;
                let connective = self.parse_connective()?;
                let right = self.parse_formula()?;
                self.expect(PropToken::RParen)?;
                Ok(PropFormula::bin(connective, left, right))
            }
            other => Err(Error::Parse {
                message: format!("expected a formula, found {other:?}"),
                offset: self.offset(),
            }),
        }
    }

    fn parse_connective(&mut self) -> Result<Connective, Error> {
        let connective = match self.peek() {
            Some(PropToken::And) => Connective::And,
            Some(PropToken::Or) => Connective::Or,
            Some(PropToken::Implies) => Connective::Implies,
            Some(PropToken::Iff) => Connective::Iff,
            Some(PropToken::Xor) => Connective::Xor,
            Some(PropToken::Nand) => Connective::Nand,
            Some(PropToken::Nor) => Connective::Nor,
            other => {
                return Err(Error::Parse {
                    message: format!("expected a binary connective, found {other:?}"),
                    offset: self.offset(),
                })
            }
        };
        let _ = self.advance();
        Ok(connective)
    }

    fn expect(&mut self, expected: PropToken<'src>) -> Result<(), Error> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            other => Err(Error::Parse {
                message: format!("expected {expected:?}, found {other:?}"),
                offset: self.offset(),
            }),
        }
    }
}
