//! Rule dependency graph.
//!
//! An edge `i → j` means some body atom of rule `i` names the head
//! predicate of rule `j`. The graph is informational: callers may use it
//! for evaluation ordering, but the fixed-point driver does not consult it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use datalog_syntax::Rule;
use itertools::Itertools;

/// A directed graph over rule indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<usize, BTreeSet<usize>>,
}

impl Graph {
    /// Creates a graph with `size` nodes and no edges.
    pub fn new(size: usize) -> Self {
        Self {
            nodes: (0..size).map(|id| (id, BTreeSet::new())).collect(),
        }
    }

    /// Adds the edge `from → to`.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.nodes.entry(from).or_default().insert(to);
    }

    /// The number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The ascending successor set of a node.
    pub fn successors(&self, id: usize) -> Option<&BTreeSet<usize>> {
        self.nodes.get(&id)
    }
}

impl fmt::Display for Graph {
    /// One line per node: `R<i>:R<j0>,R<j1>,…` with ascending adjacency.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, successors) in &self.nodes {
            writeln!(
                f,
                "R{id}:{}",
                successors.iter().map(|to| format!("R{to}")).join(",")
            )?;
        }
        Ok(())
    }
}

/// Builds the rule-to-rule dependency graph for a rule list.
pub fn make_dependency_graph(rules: &[Rule]) -> Graph {
    let mut graph = Graph::new(rules.len());
    for (from, rule) in rules.iter().enumerate() {
        for body in rule.body() {
            for (to, candidate) in rules.iter().enumerate() {
                if body.name() == candidate.head().name() {
                    graph.add_edge(from, to);
                }
            }
        }
    }
    graph
}
