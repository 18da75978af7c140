//! Scanner, AST, and parser for the Datalog surface language.
//!
//! This crate turns Datalog source text into a [`DatalogProgram`] for the
//! evaluator. The language has four sections: schemas, ground facts,
//! rules, and queries.
//!
//! # Example
//!
//! ```
//! use datalog_syntax::parse_program;
//!
//! let source = r"
//! Schemes:
//!   snap(S,N)
//! Facts:
//!   snap('1','a').
//! Rules:
//! Queries:
//!   snap('1',N)?
//! ";
//!
//! let program = parse_program(source).unwrap();
//! assert_eq!(program.schemes.len(), 1);
//! assert_eq!(program.facts.len(), 1);
//! assert_eq!(program.queries[0].to_string(), "snap('1',N)");
//! ```

pub mod ast;
pub mod scanner;
pub mod token;

mod parser;

pub use ast::{DatalogProgram, Parameter, Predicate, Rule};
pub use parser::{ParseError, Parser, parse_program};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
