//! Scanner for the Datalog surface language.
//!
//! The scanner converts source text into a stream of tokens. It never
//! fails: unterminated strings and stray characters become [`TokenKind::Undefined`]
//! tokens, which the parser skips or reports.

use crate::token::{Token, TokenKind};

/// Scanner for Datalog source code.
pub struct Scanner<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current line number (1-based).
    line: u32,
}

impl<'src> Scanner<'src> {
    /// Creates a new scanner for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
        }
    }

    /// Tokenizes the whole source, ending with an [`TokenKind::Eof`] token.
    pub fn scan(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, "", line);
        };

        match c {
            ',' => self.single(TokenKind::Comma),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '?' => self.single(TokenKind::QMark),
            '.' => self.single(TokenKind::Period),
            '+' => self.single(TokenKind::Add),
            '*' => self.single(TokenKind::Multiply),
            ':' => {
                self.advance();
                if self.peek() == Some('-') {
                    self.advance();
                    Token::new(TokenKind::ColonDash, ":-", line)
                } else {
                    Token::new(TokenKind::Colon, ":", line)
                }
            }
            '\'' => self.scan_string(),
            '#' => self.scan_comment(),
            c if c.is_ascii_alphabetic() => self.scan_identifier(),
            c => {
                self.advance();
                Token::new(TokenKind::Undefined, c.to_string(), line)
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.rest = &self.rest[c.len_utf8()..];
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consumes one character and builds a token from it.
    fn single(&mut self, kind: TokenKind) -> Token {
        let line = self.line;
        let c = self.peek().unwrap_or_default();
        self.advance();
        Token::new(kind, c.to_string(), line)
    }

    /// Scans a single-quoted string literal.
    ///
    /// The token value keeps the surrounding quotes; evaluation relies on
    /// this to keep literals disjoint from variable names. A string that
    /// reaches end of input unterminated becomes an `Undefined` token and a
    /// warning on stderr, reported at the line the string started on.
    fn scan_string(&mut self) -> Token {
        let start = self.rest;
        let start_line = self.line;
        self.advance();
        while let Some(c) = self.peek() {
            if c == '\'' {
                self.advance();
                let text = &start[..start.len() - self.rest.len()];
                return Token::new(TokenKind::String, text, start_line);
            }
            self.advance();
        }
        eprintln!("Warning: Unterminated string starting on line {start_line}");
        Token::new(TokenKind::Undefined, start, start_line)
    }

    /// Scans a `#` line comment (the newline is not part of the token).
    fn scan_comment(&mut self) -> Token {
        let start = self.rest;
        let line = self.line;
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        let text = &start[..start.len() - self.rest.len()];
        Token::new(TokenKind::Comment, text, line)
    }

    /// Scans an identifier or section keyword.
    fn scan_identifier(&mut self) -> Token {
        let start = self.rest;
        let line = self.line;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let text = &start[..start.len() - self.rest.len()];
        let kind = match text {
            "Queries" => TokenKind::Queries,
            "Rules" => TokenKind::Rules,
            "Schemes" => TokenKind::Schemes,
            "Facts" => TokenKind::Facts,
            _ => TokenKind::Id,
        };
        Token::new(kind, text, line)
    }
}
