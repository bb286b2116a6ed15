//! Projection of flat dotted field names into a nested output record.
//!
//! Each field name is split on `.`; every segment but the last names a
//! record, the last holds the field's value. Fields sharing a prefix merge
//! into the same record. The normalizer knows nothing about particular
//! names: `metadata` and `spec` are just path segments.
//!
//! # Examples
//!
//! ```
//! use formkit_core::*;
//!
//! let form = FormState::from_definitions([
//!     ("spec.runtime", ValidationPolicy::optional(), FieldValue::text("golang")),
//!     ("spec.description", ValidationPolicy::optional(), FieldValue::text("hi")),
//! ])
//! .unwrap();
//!
//! let record = normalize(&form);
//! assert_eq!(
//!     record.to_json(),
//!     serde_json::json!({ "spec": { "runtime": "golang", "description": "hi" } })
//! );
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{FieldValue, FormState};

/// A node in the output record tree.
///
/// Serializes untagged: a leaf as its value, a record as an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputNode {
    /// A field value at the end of a path.
    Leaf(FieldValue),
    /// Named children sharing a path prefix.
    Record(BTreeMap<String, OutputNode>),
}

impl OutputNode {
    /// Follows a dotted path from this node.
    ///
    /// ```
    /// use formkit_core::*;
    ///
    /// let form = FormState::from_definitions([(
    ///     "metadata.name",
    ///     ValidationPolicy::optional(),
    ///     FieldValue::text("resize"),
    /// )])
    /// .unwrap();
    ///
    /// let record = form.normalize();
    /// assert_eq!(
    ///     record.get("metadata.name"),
    ///     Some(&OutputNode::Leaf(FieldValue::text("resize")))
    /// );
    /// assert!(record.get("metadata").unwrap().as_record().is_some());
    /// assert!(record.get("spec").is_none());
    /// ```
    pub fn get(&self, path: &str) -> Option<&OutputNode> {
        path.split('.').try_fold(self, |node, segment| match node {
            Self::Record(children) => children.get(segment),
            Self::Leaf(_) => None,
        })
    }

    /// Children, if this is a record.
    pub fn as_record(&self) -> Option<&BTreeMap<String, OutputNode>> {
        match self {
            Self::Record(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    /// Value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&FieldValue> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Record(_) => None,
        }
    }

    /// Converts the tree into a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(FieldValue::Absent) => Value::Null,
            Self::Leaf(FieldValue::Text(text)) => Value::String(text.clone()),
            Self::Leaf(FieldValue::Multi(members)) => {
                Value::Array(members.iter().cloned().map(Value::String).collect())
            }
            Self::Record(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, node)| (key.clone(), node.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Builds the nested output record for `state`.
///
/// Pure and idempotent: the state is not modified, and two calls on the same
/// state produce equal trees. Multi-values are kept as sequences.
pub fn normalize(state: &FormState) -> OutputNode {
    let mut root = BTreeMap::new();
    for field in state.fields() {
        insert_path(&mut root, field.name(), field.value().clone());
    }
    debug!(fields = state.len(), "Normalized form");
    OutputNode::Record(root)
}

fn insert_path(root: &mut BTreeMap<String, OutputNode>, path: &str, value: FieldValue) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), OutputNode::Leaf(value));
            return;
        }
        let node = current
            .entry(segment.to_string())
            .or_insert_with(|| OutputNode::Record(BTreeMap::new()));
        current = match node {
            OutputNode::Record(children) => children,
            // FormState rejects names that are prefixes of other names.
            OutputNode::Leaf(_) => return,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeEvent, ValidationPolicy};

    fn form(fields: &[(&str, FieldValue)]) -> FormState {
        FormState::from_definitions(
            fields
                .iter()
                .map(|(name, value)| (*name, ValidationPolicy::optional(), value.clone())),
        )
        .unwrap()
    }

    #[test]
    fn test_shared_prefix_merges() {
        let state = form(&[
            ("spec.runtime", FieldValue::text("golang")),
            ("spec.description", FieldValue::text("hi")),
        ]);
        let record = normalize(&state);
        let spec = record.get("spec").unwrap().as_record().unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(
            record.to_json(),
            serde_json::json!({ "spec": { "runtime": "golang", "description": "hi" } })
        );
    }

    #[test]
    fn test_any_depth() {
        let state = form(&[
            ("name", FieldValue::text("top")),
            ("a.b.c.d", FieldValue::text("deep")),
            ("a.b.e", FieldValue::Absent),
        ]);
        assert_eq!(
            normalize(&state).to_json(),
            serde_json::json!({
                "name": "top",
                "a": { "b": { "c": { "d": "deep" }, "e": null } }
            })
        );
    }

    #[test]
    fn test_multi_values_stay_sequences() {
        let state = form(&[
            ("metadata.categories", FieldValue::multi(["process", "collect"])),
            ("spec.permissions", FieldValue::multi(Vec::<String>::new())),
        ]);
        assert_eq!(
            normalize(&state).to_json(),
            serde_json::json!({
                "metadata": { "categories": ["process", "collect"] },
                "spec": { "permissions": [] }
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent_and_pure() {
        let state = form(&[
            ("spec.runtime", FieldValue::text("golang")),
            ("metadata.categories", FieldValue::multi(["collect"])),
        ]);
        let before = state.clone();
        assert_eq!(normalize(&state), normalize(&state));
        assert_eq!(state, before);
    }

    #[test]
    fn test_reflects_latest_changes() {
        let state = form(&[("spec.runtime", FieldValue::text("golang"))])
            .apply_change(ChangeEvent::new("spec.runtime", true, "java".into()))
            .unwrap();
        assert_eq!(
            state.normalize().get("spec.runtime").and_then(OutputNode::as_leaf),
            Some(&FieldValue::text("java"))
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let state = form(&[
            ("spec.runtime", FieldValue::text("golang")),
            ("spec.permissions", FieldValue::multi(["read"])),
        ]);
        let record = normalize(&state);
        assert_eq!(serde_json::to_value(&record).unwrap(), record.to_json());
    }

    #[test]
    fn test_empty_form_normalizes_to_empty_record() {
        let state = FormState::default();
        assert_eq!(normalize(&state).to_json(), serde_json::json!({}));
    }
}
