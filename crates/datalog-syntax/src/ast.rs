//! Abstract syntax for Datalog programs.
//!
//! The `Display` impls here are load-bearing: the interpreter's textual
//! output renders rules and queries through them, so the forms must stay
//! exactly `name(p1,p2,…)` and `head :- body1,body2.` with no extra spaces.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// One predicate parameter: a quoted string literal or a variable name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    value: String,
}

impl Parameter {
    /// Creates a parameter from its source text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The source text of this parameter (literals keep their quotes).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if this parameter is a quoted string literal.
    pub fn is_literal(&self) -> bool {
        self.value.starts_with('\'')
    }

    /// Returns true if this parameter is a variable name.
    pub fn is_variable(&self) -> bool {
        !self.is_literal()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A predicate (atom): a relation name applied to a list of parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    name: String,
    parameters: Vec<Parameter>,
}

impl Predicate {
    /// Creates a predicate with the given name and parameters.
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// The relation name this predicate refers to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameters, in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The number of parameters.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.iter().join(","))
    }
}

/// A rule: a head predicate derived from a non-empty body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    head: Predicate,
    body: Vec<Predicate>,
}

impl Rule {
    /// Creates a rule from a head and its body predicates.
    pub fn new(head: Predicate, body: Vec<Predicate>) -> Self {
        Self { head, body }
    }

    /// The head predicate (all parameters are variables).
    pub fn head(&self) -> &Predicate {
        &self.head
    }

    /// The body predicates, in program order.
    pub fn body(&self) -> &[Predicate] {
        &self.body
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- {}.", self.head, self.body.iter().join(","))
    }
}

/// A fully parsed Datalog program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatalogProgram {
    /// Relation schemas; parameters are attribute names.
    pub schemes: Vec<Predicate>,
    /// Ground facts; parameters are all quoted literals.
    pub facts: Vec<Predicate>,
    /// Deductive rules.
    pub rules: Vec<Rule>,
    /// Queries to answer after the fixed point.
    pub queries: Vec<Predicate>,
    /// Every value appearing in a fact, sorted.
    pub domain: BTreeSet<String>,
}

impl DatalogProgram {
    /// Adds a schema declaration.
    pub fn add_scheme(&mut self, scheme: Predicate) {
        self.schemes.push(scheme);
    }

    /// Adds a ground fact and folds its values into the domain.
    pub fn add_fact(&mut self, fact: Predicate) {
        for param in fact.parameters() {
            self.domain.insert(param.value().to_string());
        }
        self.facts.push(fact);
    }

    /// Adds a rule.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Adds a query.
    pub fn add_query(&mut self, query: Predicate) {
        self.queries.push(query);
    }
}

impl fmt::Display for DatalogProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schemes({}):", self.schemes.len())?;
        for scheme in &self.schemes {
            writeln!(f, "  {scheme}")?;
        }
        writeln!(f, "Facts({}):", self.facts.len())?;
        for fact in &self.facts {
            writeln!(f, "  {fact}.")?;
        }
        writeln!(f, "Rules({}):", self.rules.len())?;
        for rule in &self.rules {
            writeln!(f, "  {rule}")?;
        }
        writeln!(f, "Queries({}):", self.queries.len())?;
        for query in &self.queries {
            writeln!(f, "  {query}?")?;
        }
        writeln!(f, "Domain({}):", self.domain.len())?;
        for value in &self.domain {
            writeln!(f, "  {value}")?;
        }
        Ok(())
    }
}
