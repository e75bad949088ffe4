//! Recursive-descent parser for the first-order surface syntax (§6, §4.10).
//!
//! Term/variable/constant classification is done by lookahead rather than by lexical class: an
//! identifier immediately followed by `(` is a function application; otherwise it is classified
//! by its first character, per §6's informal ranges (`u`-`z` variables, `f`-`t` functions,
//! digits/`a`-`d`/`_` constants). This keeps the lexer itself a single `Ident` pattern.

use logos::Logos;

use super::lexer::FoToken;
use crate::error::Error;
use crate::formula::fo::FoConnective;
use crate::formula::fo::FoFormula;
use crate::formula::fo::Quantifier;
use crate::formula::term::Term;
use crate::interner::Interner;

pub fn parse_first_order(source: &str, interner: &mut Interner) -> Result<FoFormula, Error> {
    let mut lexer = FoToken::lexer(source);
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
    tokens: Vec<(FoToken<'src>, usize)>,
    position: usize,
    interner: &'interner mut Interner,
}

impl<'src> Parser<'src, '_> {
    fn peek(&self) -> Option<&FoToken<'src>> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .map(|(_, o)| *o)
            .unwrap_or(usize::MAX)
    }

    fn advance(&mut self) -> Option<FoToken<'src>> {
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

    fn expect(&mut self, expected: FoToken<'src>) -> Result<(), Error> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            other => Err(Error::Parse {
                message: format!("expected {expected:?}, found {other:?}"),
                offset: self.offset(),
            }),
        }
    }

    fn parse_formula(&mut self) -> Result<FoFormula, Error> {
        match self.peek() {
            Some(FoToken::Tilde) => {
                let _ = self.advance();
                let inner = self.parse_formula()?;
                Ok(FoFormula::not(inner))
            }
            Some(FoToken::Forall) | Some(FoToken::Exists) => {
                let quantifier = if matches!(self.peek(), Some(FoToken::Forall)) {
                    Quantifier::Forall
                } else {
                    Quantifier::Exists
                };
                let _ = self.advance();
                self.expect(FoToken::LBracket)?;
                let variable = self.parse_ident()?;
                self.expect(FoToken::RBracket)?;
                let body = self.parse_formula()?;
                Ok(FoFormula::Quantified(
                    quantifier,
                    self.interner.intern(&variable),
                    std::rc::Rc::new(body),
                ))
            }
            Some(FoToken::LParen) => {
                let _ = self.advance();
                let left = self.parse_formula()?;
                let connective = self.parse_connective()?;
                let right = self.parse_formula()?;
                self.expect(FoToken::RParen)?;
                Ok(FoFormula::bin(connective, left, right))
            }
            _ => {
                let left = self.parse_term()?;
                self.expect(FoToken::Equals)?;
                let right = self.parse_term()?;
                Ok(FoFormula::Equals(left, right))
            }
        }
    }

    fn parse_connective(&mut self) -> Result<FoConnective, Error> {
        let connective = match self.peek() {
            Some(FoToken::And) => FoConnective::And,
            Some(FoToken::Or) => FoConnective::Or,
            Some(FoToken::Implies) => FoConnective::Implies,
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

    fn parse_ident(&mut self) -> Result<String, Error> {
        match self.advance() {
            Some(FoToken::Ident(name)) => Ok(name.to_string()),
            other => Err(Error::Parse {
                message: format!("expected an identifier, found {other:?}"),
                offset: self.offset(),
            }),
        }
    }

    fn parse_term(&mut self) -> Result<Term, Error> {
        let name = self.parse_ident()?;

        if matches!(self.peek(), Some(FoToken::LParen)) {
            let _ = self.advance();
            let mut args = vec![self.parse_term()?];
            while matches!(self.peek(), Some(FoToken::Comma)) {
                let _ = self.advance();
                args.push(self.parse_term()?);
            }
            self.expect(FoToken::RParen)?;
            return Ok(Term::func(self.interner.intern(&name), args));
        }

        let symbol = self.interner.intern(&name);
        let first_char = name.chars().next().unwrap_or('_');
        if ('u'..='z').contains(&first_char) {
            Ok(Term::Var(symbol))
        } else {
            Ok(Term::Const(symbol))
        }
    }
}
