//! Bottom-up evaluation engine for Datalog programs.
//!
//! This crate takes a parsed [`datalog_syntax::DatalogProgram`] and runs
//! it to a fixed point: schemas become empty relations, facts populate
//! them, rules are applied naïvely until quiescent, and queries are
//! answered against the result. All of it is built on a small relational
//! algebra over [`Relation`].
//!
//! # Example
//!
//! ```
//! use datalog_eval::Interpreter;
//! use datalog_syntax::parse_program;
//!
//! let source = r"
//! Schemes:
//!   e(X,Y)
//!   tc(X,Y)
//! Facts:
//!   e('1','2').
//!   e('2','3').
//! Rules:
//!   tc(X,Y) :- e(X,Y).
//!   tc(X,Y) :- e(X,Z),tc(Z,Y).
//! Queries:
//!   tc('1',W)?
//! ";
//!
//! let program = parse_program(source).unwrap();
//! let mut interpreter = Interpreter::new(program);
//! let mut out = Vec::new();
//! interpreter.interpret(&mut out).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("tc('1',W)? Yes(2)"));
//! assert_eq!(interpreter.database().relation("tc").unwrap().size(), 3);
//! ```

mod database;
mod graph;
mod interpreter;
mod relation;

pub use database::Database;
pub use graph::{Graph, make_dependency_graph};
pub use interpreter::Interpreter;
pub use relation::{Relation, Scheme, Tuple, format_tuple};
