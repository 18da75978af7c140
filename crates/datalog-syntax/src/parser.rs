//! Recursive-descent parser for Datalog programs.
//!
//! Grammar:
//!
//! ```text
//! program   → 'Schemes' ':' scheme+  'Facts' ':' fact*
//!             'Rules'   ':' rule*    'Queries' ':' query+  EOF
//! scheme    → ID '(' ID (',' ID)* ')'
//! fact      → ID '(' STRING (',' STRING)* ')' '.'
//! rule      → headPredicate ':-' predicate (',' predicate)* '.'
//! query     → predicate '?'
//! headPredicate → ID '(' ID (',' ID)* ')'
//! predicate → ID '(' parameter (',' parameter)* ')'
//! parameter → STRING | ID
//! ```

use thiserror::Error;

use crate::ast::{DatalogProgram, Parameter, Predicate, Rule};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// The token that broke the parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unexpected token {token}")]
pub struct ParseError {
    token: Token,
}

impl ParseError {
    /// The offending token.
    pub fn token(&self) -> &Token {
        &self.token
    }
}

/// Scans and parses a complete Datalog program from source text.
pub fn parse_program(source: &str) -> Result<DatalogProgram, ParseError> {
    Parser::new(Scanner::scan(source)).parse()
}

/// Recursive-descent parser over a scanned token stream.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Creates a parser over a token stream ending in [`TokenKind::Eof`].
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut parser = Self {
            tokens,
            position: 0,
        };
        parser.skip_trivia();
        parser
    }

    /// Parses the whole program.
    pub fn parse(mut self) -> Result<DatalogProgram, ParseError> {
        let mut program = DatalogProgram::default();

        self.expect(TokenKind::Schemes)?;
        self.expect(TokenKind::Colon)?;
        program.add_scheme(self.scheme()?);
        while self.peek() != TokenKind::Facts {
            program.add_scheme(self.scheme()?);
        }

        self.expect(TokenKind::Facts)?;
        self.expect(TokenKind::Colon)?;
        while self.peek() != TokenKind::Rules {
            program.add_fact(self.fact()?);
        }

        self.expect(TokenKind::Rules)?;
        self.expect(TokenKind::Colon)?;
        while self.peek() != TokenKind::Queries {
            program.add_rule(self.rule()?);
        }

        self.expect(TokenKind::Queries)?;
        self.expect(TokenKind::Colon)?;
        program.add_query(self.query()?);
        while self.peek() != TokenKind::Eof {
            program.add_query(self.query()?);
        }

        self.expect(TokenKind::Eof)?;
        Ok(program)
    }

    /// `ID '(' ID (',' ID)* ')'`
    fn scheme(&mut self) -> Result<Predicate, ParseError> {
        let name = self.expect(TokenKind::Id)?.value;
        self.expect(TokenKind::LeftParen)?;
        let mut parameters = vec![Parameter::new(self.expect(TokenKind::Id)?.value)];
        while self.peek() != TokenKind::RightParen {
            self.expect(TokenKind::Comma)?;
            parameters.push(Parameter::new(self.expect(TokenKind::Id)?.value));
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Predicate::new(name, parameters))
    }

    /// `ID '(' STRING (',' STRING)* ')' '.'`
    fn fact(&mut self) -> Result<Predicate, ParseError> {
        let name = self.expect(TokenKind::Id)?.value;
        self.expect(TokenKind::LeftParen)?;
        let mut parameters = vec![Parameter::new(self.expect(TokenKind::String)?.value)];
        while self.peek() != TokenKind::RightParen {
            self.expect(TokenKind::Comma)?;
            parameters.push(Parameter::new(self.expect(TokenKind::String)?.value));
        }
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Period)?;
        Ok(Predicate::new(name, parameters))
    }

    /// `headPredicate ':-' predicate (',' predicate)* '.'`
    fn rule(&mut self) -> Result<Rule, ParseError> {
        let head = self.scheme()?;
        self.expect(TokenKind::ColonDash)?;
        let mut body = vec![self.predicate()?];
        while self.peek() != TokenKind::Period {
            self.expect(TokenKind::Comma)?;
            body.push(self.predicate()?);
        }
        self.expect(TokenKind::Period)?;
        Ok(Rule::new(head, body))
    }

    /// `predicate '?'`
    fn query(&mut self) -> Result<Predicate, ParseError> {
        let predicate = self.predicate()?;
        self.expect(TokenKind::QMark)?;
        Ok(predicate)
    }

    /// `ID '(' parameter (',' parameter)* ')'`
    fn predicate(&mut self) -> Result<Predicate, ParseError> {
        let name = self.expect(TokenKind::Id)?.value;
        self.expect(TokenKind::LeftParen)?;
        let mut parameters = vec![self.parameter()?];
        while self.peek() != TokenKind::RightParen {
            self.expect(TokenKind::Comma)?;
            parameters.push(self.parameter()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Predicate::new(name, parameters))
    }

    /// `STRING | ID`
    fn parameter(&mut self) -> Result<Parameter, ParseError> {
        if self.peek() == TokenKind::String {
            Ok(Parameter::new(self.expect(TokenKind::String)?.value))
        } else {
            Ok(Parameter::new(self.expect(TokenKind::Id)?.value))
        }
    }

    /// The kind of the current token.
    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.position)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Consumes the current token if it has the expected kind.
    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", 1));
        if token.kind == expected {
            self.position += 1;
            self.skip_trivia();
            Ok(token)
        } else {
            Err(ParseError { token })
        }
    }

    /// Skips comments and undefined tokens.
    fn skip_trivia(&mut self) {
        while self.peek().is_trivia() {
            self.position += 1;
        }
    }
}
