//! Relation storage and the relational algebra the evaluator is built on.
//!
//! A relation is a named, schemed set of tuples. The five algebra
//! operations (two selects, project, rename, natural join) each return a
//! fresh relation and never mutate the receiver; only [`Relation::union_with`]
//! mutates, and only the fixed-point driver calls it.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// An attribute list naming a relation's columns, in order.
pub type Scheme = Vec<String>;

/// A row: one value per attribute of the enclosing relation's scheme.
///
/// Values are opaque strings. Fact literals keep their surrounding single
/// quotes, so a literal `'x'` can never collide with a variable `x`.
pub type Tuple = Vec<String>;

/// A named set of tuples with a fixed scheme.
///
/// Tuples are kept in a [`BTreeSet`], so iteration is always in ascending
/// lexicographic order and duplicates collapse on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relation {
    name: String,
    scheme: Scheme,
    tuples: BTreeSet<Tuple>,
}

impl Relation {
    /// Creates an empty relation with the given name and scheme.
    pub fn new(name: impl Into<String>, scheme: Scheme) -> Self {
        Self {
            name: name.into(),
            scheme,
            tuples: BTreeSet::new(),
        }
    }

    /// The relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scheme naming this relation's columns.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// The number of tuples.
    pub fn size(&self) -> usize {
        self.tuples.len()
    }

    /// Returns true if the relation holds no tuples.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Iterates over tuples in ascending lexicographic order.
    pub fn tuples(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    /// Inserts a tuple. Duplicates collapse silently.
    pub fn add_tuple(&mut self, tuple: Tuple) {
        self.tuples.insert(tuple);
    }

    /// Retains the tuples whose `index`-th value equals `value`.
    pub fn select_literal(&self, index: usize, value: &str) -> Relation {
        let mut result = Relation::new(&self.name, self.scheme.clone());
        for tuple in &self.tuples {
            if tuple.get(index).is_some_and(|v| v == value) {
                result.add_tuple(tuple.clone());
            }
        }
        result
    }

    /// Retains the tuples whose values at `first` and `second` agree.
    pub fn select_equal(&self, first: usize, second: usize) -> Relation {
        let mut result = Relation::new(&self.name, self.scheme.clone());
        for tuple in &self.tuples {
            if let (Some(a), Some(b)) = (tuple.get(first), tuple.get(second))
                && a == b
            {
                result.add_tuple(tuple.clone());
            }
        }
        result
    }

    /// Keeps the listed columns, in the listed order.
    ///
    /// Indices may repeat. An out-of-range index is a diagnostic on stderr
    /// and the column is skipped; evaluation continues with the rest.
    pub fn project(&self, indices: &[usize]) -> Relation {
        let mut scheme = Scheme::new();
        for &index in indices {
            match self.scheme.get(index) {
                Some(attribute) => scheme.push(attribute.clone()),
                None => eprintln!("Index out of bounds in project(): {index}"),
            }
        }
        let mut result = Relation::new(&self.name, scheme);
        for tuple in &self.tuples {
            let projected = indices
                .iter()
                .filter_map(|&index| tuple.get(index).cloned())
                .collect();
            result.add_tuple(projected);
        }
        result
    }

    /// Replaces the scheme positionally; tuples are untouched.
    pub fn rename(&self, attributes: Scheme) -> Relation {
        let mut result = Relation::new(&self.name, attributes);
        for tuple in &self.tuples {
            result.add_tuple(tuple.clone());
        }
        result
    }

    /// Natural join on all shared attribute names.
    ///
    /// The result scheme is this relation's scheme followed by the other's
    /// attributes that are not already present, in first-occurrence order.
    /// A tuple pair combines only if every shared attribute agrees.
    pub fn join(&self, other: &Relation) -> Relation {
        let mut scheme = self.scheme.clone();
        for attribute in &other.scheme {
            if !scheme.contains(attribute) {
                scheme.push(attribute.clone());
            }
        }

        let mut result = Relation::new(&self.name, scheme);
        for left in &self.tuples {
            for right in &other.tuples {
                let mut combined = left.clone();
                let mut joinable = true;
                for (index, attribute) in other.scheme.iter().enumerate() {
                    if let Some(shared) = self.scheme.iter().position(|a| a == attribute) {
                        match (left.get(shared), right.get(index)) {
                            (Some(a), Some(b)) if a == b => {}
                            _ => {
                                joinable = false;
                                break;
                            }
                        }
                    } else {
                        match right.get(index) {
                            Some(value) => combined.push(value.clone()),
                            None => {
                                eprintln!("Index out of bounds in join: {index}");
                                joinable = false;
                            }
                        }
                    }
                }
                if joinable {
                    result.add_tuple(combined);
                }
            }
        }
        result
    }

    /// Adds every tuple of `other` to this relation (pure set union).
    pub fn union_with(&mut self, other: &Relation) {
        for tuple in &other.tuples {
            self.tuples.insert(tuple.clone());
        }
    }

    /// The tuples of this relation that are absent from `other`.
    ///
    /// Keeps this relation's scheme; used by the fixed-point driver to log
    /// newly derived tuples.
    pub fn difference(&self, other: &Relation) -> Relation {
        let mut result = Relation::new(&self.name, self.scheme.clone());
        for tuple in self.tuples.difference(&other.tuples) {
            result.add_tuple(tuple.clone());
        }
        result
    }
}

/// Renders a tuple as `k1='v1', k2='v2', …` against a scheme, stripping
/// the stored quotes from each value.
pub fn format_tuple(scheme: &Scheme, tuple: &Tuple) -> String {
    scheme
        .iter()
        .zip(tuple)
        .map(|(attribute, value)| format!("{attribute}='{}'", strip_quotes(value)))
        .join(", ")
}

/// Strips surrounding single quotes, if both are present.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

impl fmt::Display for Relation {
    /// One line per tuple, two-space indented, in lexicographic order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tuple in &self.tuples {
            writeln!(f, "  {}", format_tuple(&self.scheme, tuple))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(attributes: &[&str]) -> Scheme {
        attributes.iter().map(ToString::to_string).collect()
    }

    fn tuple(values: &[&str]) -> Tuple {
        values.iter().map(ToString::to_string).collect()
    }

    fn sample() -> Relation {
        let mut rel = Relation::new("snap", scheme(&["S", "N"]));
        rel.add_tuple(tuple(&["'1'", "'a'"]));
        rel.add_tuple(tuple(&["'2'", "'b'"]));
        rel.add_tuple(tuple(&["'3'", "'a'"]));
        rel
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut rel = sample();
        rel.add_tuple(tuple(&["'1'", "'a'"]));
        assert_eq!(rel.size(), 3);
    }

    #[test]
    fn test_select_literal() {
        let rel = sample().select_literal(1, "'a'");
        assert_eq!(rel.size(), 2);
        assert_eq!(rel.scheme(), &scheme(&["S", "N"]));
    }

    #[test]
    fn test_select_literal_idempotent() {
        let once = sample().select_literal(1, "'a'");
        assert_eq!(once.select_literal(1, "'a'"), once);
    }

    #[test]
    fn test_select_equal() {
        let mut rel = Relation::new("r", scheme(&["A", "B"]));
        rel.add_tuple(tuple(&["'x'", "'x'"]));
        rel.add_tuple(tuple(&["'x'", "'y'"]));
        let selected = rel.select_equal(0, 1);
        assert_eq!(selected.size(), 1);
        assert!(selected.tuples().any(|t| t == &tuple(&["'x'", "'x'"])));
    }

    #[test]
    fn test_select_equal_same_index_is_identity_filter() {
        let rel = sample();
        assert_eq!(rel.select_equal(0, 0), rel);
    }

    #[test]
    fn test_project_reorders_and_repeats() {
        let projected = sample().project(&[1, 0, 1]);
        assert_eq!(projected.scheme(), &scheme(&["N", "S", "N"]));
        assert!(
            projected
                .tuples()
                .any(|t| t == &tuple(&["'a'", "'1'", "'a'"]))
        );
    }

    #[test]
    fn test_project_identity() {
        let rel = sample();
        assert_eq!(rel.project(&[0, 1]), rel);
    }

    #[test]
    fn test_project_collapses_duplicates() {
        // Two tuples share N='a'; projecting to N alone collapses them.
        let projected = sample().project(&[1]);
        assert_eq!(projected.size(), 2);
    }

    #[test]
    fn test_rename_identity() {
        let rel = sample();
        assert_eq!(rel.rename(scheme(&["S", "N"])), rel);
    }

    #[test]
    fn test_rename_is_pure_metadata() {
        let renamed = sample().rename(scheme(&["X", "Y"]));
        assert_eq!(renamed.scheme(), &scheme(&["X", "Y"]));
        assert_eq!(renamed.size(), 3);
    }

    #[test]
    fn test_join_on_shared_attribute() {
        let mut left = Relation::new("e", scheme(&["X", "Z"]));
        left.add_tuple(tuple(&["'1'", "'2'"]));
        left.add_tuple(tuple(&["'2'", "'3'"]));
        let mut right = Relation::new("tc", scheme(&["Z", "Y"]));
        right.add_tuple(tuple(&["'2'", "'3'"]));
        right.add_tuple(tuple(&["'3'", "'4'"]));

        let joined = left.join(&right);
        assert_eq!(joined.scheme(), &scheme(&["X", "Z", "Y"]));
        assert_eq!(joined.size(), 2);
        assert!(joined.tuples().any(|t| t == &tuple(&["'1'", "'2'", "'3'"])));
        assert!(joined.tuples().any(|t| t == &tuple(&["'2'", "'3'", "'4'"])));
    }

    #[test]
    fn test_join_disjoint_schemes_is_cross_product() {
        let mut left = Relation::new("a", scheme(&["A"]));
        left.add_tuple(tuple(&["'1'"]));
        left.add_tuple(tuple(&["'2'"]));
        let mut right = Relation::new("b", scheme(&["B"]));
        right.add_tuple(tuple(&["'x'"]));
        right.add_tuple(tuple(&["'y'"]));
        assert_eq!(left.join(&right).size(), 4);
    }

    #[test]
    fn test_self_join_is_identity() {
        let rel = sample();
        assert_eq!(rel.join(&rel), rel);
    }

    #[test]
    fn test_join_commutes_up_to_column_order() {
        let mut left = Relation::new("e", scheme(&["X", "Z"]));
        left.add_tuple(tuple(&["'1'", "'2'"]));
        left.add_tuple(tuple(&["'2'", "'3'"]));
        let mut right = Relation::new("tc", scheme(&["Z", "Y"]));
        right.add_tuple(tuple(&["'2'", "'3'"]));

        let forward = left.join(&right);
        let backward = right.join(&left);
        assert_eq!(forward.size(), backward.size());

        // Realign backward's columns to forward's scheme and compare.
        let order: Vec<usize> = forward
            .scheme()
            .iter()
            .map(|a| backward.scheme().iter().position(|b| b == a).unwrap())
            .collect();
        let realigned = backward.project(&order).rename(forward.scheme().clone());
        assert_eq!(realigned, forward);
    }

    #[test]
    fn test_union_with_is_set_union() {
        let mut rel = sample();
        let mut more = Relation::new("snap", scheme(&["S", "N"]));
        more.add_tuple(tuple(&["'1'", "'a'"]));
        more.add_tuple(tuple(&["'4'", "'d'"]));
        rel.union_with(&more);
        assert_eq!(rel.size(), 4);
    }

    #[test]
    fn test_difference() {
        let rel = sample();
        let known = sample().select_literal(1, "'a'");
        let fresh = rel.difference(&known);
        assert_eq!(fresh.size(), 1);
        assert!(fresh.tuples().any(|t| t == &tuple(&["'2'", "'b'"])));
    }

    #[test]
    fn test_display_strips_quotes_and_sorts() {
        let rel = sample().select_literal(1, "'a'");
        assert_eq!(rel.to_string(), "  S='1', N='a'\n  S='3', N='a'\n");
    }

    #[test]
    fn test_display_empty_scheme_tuple() {
        // A true ground query leaves one empty tuple under an empty scheme;
        // its rendering is a bare indented line.
        let empty = sample().project(&[]);
        assert_eq!(empty.size(), 1);
        assert_eq!(empty.to_string(), "  \n");
    }

    #[test]
    fn test_project_out_of_range_skips_column() {
        let projected = sample().project(&[0, 7]);
        assert_eq!(projected.scheme(), &scheme(&["S"]));
        assert_eq!(projected.size(), 3);
    }
}
