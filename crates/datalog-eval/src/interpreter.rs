//! The interpreter: schema and fact loading, rule-driven fixed point, and
//! query answering.
//!
//! Rules and queries both reduce to the same relational-algebra pipeline:
//! a query becomes selects (literals and repeated variables) followed by a
//! project/rename onto its distinct variables; a rule joins its body
//! answers and rewrites the result onto the head relation's declared
//! scheme.

use std::collections::HashMap;
use std::io::{self, Write};

use datalog_syntax::{DatalogProgram, Predicate, Rule};

use crate::database::Database;
use crate::relation::{Relation, Scheme};

/// Evaluates a parsed program against an owned database.
#[derive(Debug)]
pub struct Interpreter {
    program: DatalogProgram,
    database: Database,
}

impl Interpreter {
    /// Creates an interpreter for a parsed program with an empty database.
    pub fn new(program: DatalogProgram) -> Self {
        Self {
            program,
            database: Database::new(),
        }
    }

    /// The current database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Runs the full pipeline: schemas, facts, rules to fixed point, then
    /// queries. All contract output goes to `out`; diagnostics to stderr.
    pub fn interpret(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.evaluate_schemes();
        self.evaluate_facts();
        self.evaluate_rules(out)?;
        self.evaluate_queries(out)
    }

    /// Creates one empty relation per schema declaration.
    pub fn evaluate_schemes(&mut self) {
        for scheme in &self.program.schemes {
            let attributes: Scheme = scheme
                .parameters()
                .iter()
                .map(|p| p.value().to_string())
                .collect();
            self.database
                .add_relation(scheme.name(), Relation::new(scheme.name(), attributes));
        }
    }

    /// Loads every ground fact into its relation.
    pub fn evaluate_facts(&mut self) {
        for fact in &self.program.facts {
            let values = fact
                .parameters()
                .iter()
                .map(|p| p.value().to_string())
                .collect();
            self.database.relation_mut(fact.name()).add_tuple(values);
        }
    }

    /// Applies all rules in program order until a pass adds no tuples,
    /// logging each rule's newly derived tuples per pass.
    ///
    /// Rules later in a pass see tuples added earlier in the same pass;
    /// this changes the per-pass log but not the fixed point. The reported
    /// pass count includes the final pass that derived nothing.
    pub fn evaluate_rules(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Rule Evaluation")?;
        let mut passes = 0u32;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for rule in &self.program.rules {
                let result = evaluate_rule(&mut self.database, rule);
                let head = self.database.relation_mut(rule.head().name());
                let fresh = result.difference(head);
                let before = head.size();
                head.union_with(&result);
                if head.size() > before {
                    changed = true;
                }
                writeln!(out, "{}", trim_trailing_period(&rule.to_string()))?;
                write!(out, "{fresh}")?;
            }
        }
        writeln!(
            out,
            "\nSchemes populated after {passes} passes through the Rules."
        )
    }

    /// Answers each query against the fixed-point database.
    pub fn evaluate_queries(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "\nQuery Evaluation")?;
        for query in &self.program.queries {
            let result = evaluate_query(&mut self.database, query);
            if result.is_empty() {
                writeln!(out, "{query}? No")?;
            } else {
                writeln!(out, "{query}? Yes({})", result.size())?;
                write!(out, "{result}")?;
            }
        }
        Ok(())
    }

    /// Answers a single predicate against the current database.
    pub fn evaluate_query(&mut self, query: &Predicate) -> Relation {
        evaluate_query(&mut self.database, query)
    }
}

/// Computes a predicate's answer relation.
///
/// Walks the parameters left to right: a literal selects on its column, a
/// repeated variable selects on equality with its first column, and each
/// new variable contributes a column to the final project/rename. The
/// answer scheme is the predicate's distinct variables in first-occurrence
/// order, which is what lets body answers natural-join by variable name.
fn evaluate_query(database: &mut Database, query: &Predicate) -> Relation {
    let mut relation = database.relation_mut(query.name()).clone();
    let mut project_indices = Vec::new();
    let mut rename_attributes = Scheme::new();
    let mut variable_columns: HashMap<&str, usize> = HashMap::new();

    for (index, param) in query.parameters().iter().enumerate() {
        if param.is_literal() {
            relation = relation.select_literal(index, param.value());
        } else if let Some(&first) = variable_columns.get(param.value()) {
            relation = relation.select_equal(first, index);
        } else {
            variable_columns.insert(param.value(), index);
            project_indices.push(index);
            rename_attributes.push(param.value().to_string());
        }
    }

    relation.project(&project_indices).rename(rename_attributes)
}

/// Evaluates one rule into a relation shaped like the head's declared
/// scheme. The caller unions the result into the head relation.
fn evaluate_rule(database: &mut Database, rule: &Rule) -> Relation {
    let intermediates: Vec<Relation> = rule
        .body()
        .iter()
        .map(|predicate| evaluate_query(database, predicate))
        .collect();
    let joined = intermediates
        .into_iter()
        .reduce(|acc, next| acc.join(&next))
        .unwrap_or_default();

    let head = database.relation_mut(rule.head().name());
    let target_scheme = head.scheme().clone();
    if target_scheme.len() != rule.head().arity() {
        eprintln!("Mismatch in number of attributes between rule head and target scheme.");
    }

    let mut indices = Vec::new();
    let mut attributes = Scheme::new();
    for (position, param) in rule.head().parameters().iter().enumerate() {
        let variable = param.value();
        let column = joined.scheme().iter().position(|a| a == variable);
        match (column, target_scheme.get(position)) {
            (Some(index), Some(attribute)) => {
                indices.push(index);
                attributes.push(attribute.clone());
            }
            (None, _) => eprintln!("Attribute not found during rule evaluation: {variable}"),
            // Arity mismatch was already reported; drop the extra column.
            (_, None) => {}
        }
    }

    joined.project(&indices).rename(attributes)
}

/// Strips the trailing period from a rule's textual form.
fn trim_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}
