//! Ordered constraint collections

use crate::diff::{diff, Edit, EditKind};
use crate::errors::ModelError;
use crate::model::constraint::Constraint;
use serde::Deserialize;

/// Whether a set builder enforces ordering by derived key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Keep insertion order as is
    #[default]
    Preserve,
    /// Reject sets that are not in non-decreasing `group:name:suggestedVersion` order
    Strict,
}

/// An ordered, immutable list of constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// The set with no constraints
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::default()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Concatenate `self` then `other`, keeping duplicates
    pub fn union(&self, other: &ConstraintSet) -> ConstraintSet {
        let mut constraints = Vec::with_capacity(self.len() + other.len());
        constraints.extend_from_slice(&self.constraints);
        constraints.extend_from_slice(&other.constraints);
        ConstraintSet { constraints }
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ConstraintSet {
    type Item = Constraint;
    type IntoIter = std::vec::IntoIter<Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.into_iter()
    }
}

/// Accumulates constraints in arrival order
#[derive(Debug, Clone, Default)]
pub struct ConstraintSetBuilder {
    constraints: Vec<Constraint>,
}

impl ConstraintSetBuilder {
    pub fn add(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Finalize the set
    ///
    /// Under [`SortPolicy::Strict`] the arrival order is compared to the
    /// stable sort by [`Constraint::coordinate`]; equal keys are allowed.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unsorted`] with a positional report of the removals and
    /// insertions that would sort the input.
    pub fn build(self, policy: SortPolicy) -> Result<ConstraintSet, ModelError> {
        if policy == SortPolicy::Strict {
            check_sorted(&self.constraints)?;
        }
        Ok(ConstraintSet {
            constraints: self.constraints,
        })
    }
}

fn check_sorted(constraints: &[Constraint]) -> Result<(), ModelError> {
    let keys: Vec<String> = constraints.iter().map(Constraint::coordinate).collect();
    if keys.windows(2).all(|pair| pair[0] <= pair[1]) {
        return Ok(());
    }

    let mut order: Vec<usize> = (0..constraints.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    let sorted: Vec<&Constraint> = order.iter().map(|&i| &constraints[i]).collect();
    let sorted_keys: Vec<&str> = order.iter().map(|&i| keys[i].as_str()).collect();
    let input_keys: Vec<&str> = keys.iter().map(String::as_str).collect();

    let script = diff(&input_keys, &sorted_keys, |a, b| a == b);
    let original: Vec<&Constraint> = constraints.iter().collect();
    let report = script
        .edits()
        .iter()
        .map(|edit| describe_edit(edit, &original, &sorted))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ModelError::Unsorted { report })
}

fn describe_edit(edit: &Edit, original: &[&Constraint], sorted: &[&Constraint]) -> String {
    let verb = match edit.kind {
        EditKind::Delete => "Remove",
        EditKind::Insert => "Insert",
    };
    let noun = if edit.len() == 1 {
        "constraint"
    } else {
        "constraints"
    };
    let position = edit.position();
    let mut out = if edit.len() == 1 {
        format!("  - {} {} at position {}:", verb, noun, position)
    } else {
        format!(
            "  - {} {} at position {} through {}:",
            verb,
            noun,
            position,
            position + edit.len() - 1
        )
    };
    for constraint in edit.items(original, sorted) {
        out.push_str("\n    - ");
        out.push_str(&constraint.compact_notation());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::constraint::constraint_from_fields;

    fn c(group: &str, name: &str, version: &str) -> Constraint {
        constraint_from_fields(group, name, version, Vec::<String>::new(), "reason").unwrap()
    }

    fn build(items: Vec<Constraint>, policy: SortPolicy) -> Result<ConstraintSet, ModelError> {
        let mut builder = ConstraintSet::builder();
        for item in items {
            builder.add(item);
        }
        builder.build(policy)
    }

    #[test]
    fn test_preserve_keeps_arrival_order() {
        let set = build(vec![c("b", "b", "1"), c("a", "a", "1")], SortPolicy::Preserve).unwrap();
        assert_eq!(set.constraints()[0].group(), "b");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_strict_accepts_sorted_input() {
        let set = build(
            vec![c("a", "a", "1"), c("a", "a", "2"), c("a", "b", "1")],
            SortPolicy::Strict,
        )
        .unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_strict_accepts_equal_keys() {
        assert!(build(vec![c("a", "a", "1"), c("a", "a", "1")], SortPolicy::Strict).is_ok());
    }

    #[test]
    fn test_strict_rejects_swap_with_positions() {
        let err = build(
            vec![c("a", "a", "2"), c("a", "a", "1"), c("a", "b", "1")],
            SortPolicy::Strict,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with(
            "Constraints were not sorted by group:name:suggestedVersion in lexicographical order:"
        ));
        assert!(message.contains("  - Remove constraint at position 0:"));
        assert!(message.contains("  - Insert constraint at position 2:"));
        assert!(message.contains(r#"    - {"group":"a", "name":"a", "suggestedVersion":"2"}"#));
    }

    #[test]
    fn test_strict_reports_runs_with_through() {
        let err = build(
            vec![
                c("z", "z", "1"),
                c("y", "y", "1"),
                c("a", "a", "1"),
                c("b", "b", "1"),
            ],
            SortPolicy::Strict,
        )
        .unwrap_err();
        assert!(err.to_string().contains("constraints at position 0 through 1:"));
    }

    #[test]
    fn test_union_concatenates() {
        let left = build(vec![c("b", "b", "1")], SortPolicy::Preserve).unwrap();
        let right = build(vec![c("a", "a", "1"), c("b", "b", "1")], SortPolicy::Preserve).unwrap();

        let union = left.union(&right);
        let coords: Vec<String> = union.iter().map(Constraint::coordinate).collect();
        assert_eq!(coords, vec!["b:b:1", "a:a:1", "b:b:1"]);
        assert_eq!(ConstraintSet::empty().union(&left), left);
    }
}
