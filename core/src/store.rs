//! Form state store and change reduction.
//!
//! [`FormState`] maps dotted field names to [`FieldState`]s. Widgets report
//! edits as [`ChangeEvent`]s; [`FormState::apply_change`] is a pure reducer
//! returning the next state, and [`FormState::dispatch`] applies an event in
//! place. Both replace exactly one field. Untouched fields are shared
//! between the old and new state through `Arc`.
//!
//! Updates to one form are serialized by `&mut self`; a form shared across
//! threads must sit behind a `Mutex` so read-modify-write cycles don't
//! interleave.
//!
//! # Examples
//!
//! ```
//! use formkit_core::*;
//!
//! let form = FormState::from_definitions([
//!     ("metadata.categories", ValidationPolicy::required(), FieldValue::multi(Vec::<String>::new())),
//!     ("spec.runtime", ValidationPolicy::optional(), FieldValue::text("golang")),
//! ])
//! .unwrap();
//! assert!(!form.is_form_valid());
//!
//! let form = form
//!     .apply_change(ChangeEvent::new("metadata.categories", true, FieldValue::multi(["collect"])))
//!     .unwrap();
//! assert!(form.is_form_valid());
//!
//! let err = form
//!     .apply_change(ChangeEvent::new("spec.memory", true, FieldValue::text("128")))
//!     .unwrap_err();
//! assert_eq!(err, FormError::UnknownField("spec.memory".into()));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    FieldState, FieldValue, OutputNode, ValidationPolicy, create_field, normalize, validate,
};

/// Structural misuse of a form.
///
/// Merely invalid input is never an error; these variants describe calls
/// the form cannot honor at all. A rejected change leaves the state as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A change targeted a field the form was not built with.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// Two fields were declared with the same name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),
    /// Field name is empty or contains an empty path segment.
    #[error("invalid field name: '{0}'")]
    InvalidFieldName(String),
    /// One field's path is a prefix of another's, so it would have to be
    /// both a value and a record in the output.
    #[error("field '{leaf}' conflicts with nested field '{nested}'")]
    PathConflict {
        /// The shorter path.
        leaf: String,
        /// The field nested beneath it.
        nested: String,
    },
}

/// A widget-reported value change.
///
/// `is_valid` is the widget's own verdict, computed with the field's policy.
/// The store re-runs the validator and keeps its own result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Dotted name of the field that changed.
    pub field: String,
    /// Validity as computed by the reporting widget.
    pub is_valid: bool,
    /// The new value.
    pub value: FieldValue,
}

impl ChangeEvent {
    /// Creates an event with an explicit validity flag.
    pub fn new(field: impl Into<String>, is_valid: bool, value: FieldValue) -> Self {
        Self {
            field: field.into(),
            is_valid,
            value,
        }
    }

    /// Creates an event whose validity is computed with `policy`.
    pub fn validated(
        field: impl Into<String>,
        policy: &ValidationPolicy,
        value: FieldValue,
    ) -> Self {
        let is_valid = validate(policy, &value);
        Self::new(field, is_valid, value)
    }
}

/// Keyed table of field states.
///
/// Field order is the declaration order and only matters for iteration
/// (rendering); lookup, validity and normalization ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<Arc<FieldState>>,
    index: HashMap<String, usize>,
}

impl FormState {
    /// Builds a form from already-created fields.
    ///
    /// # Errors
    ///
    /// - [`FormError::InvalidFieldName`] for an empty name or a name with an
    ///   empty segment (`"spec..runtime"`).
    /// - [`FormError::DuplicateField`] if two fields share a name.
    /// - [`FormError::PathConflict`] if one name is a path prefix of another
    ///   (`"spec"` and `"spec.runtime"`).
    pub fn new(fields: impl IntoIterator<Item = FieldState>) -> Result<Self, FormError> {
        let mut state = Self::default();

        for field in fields {
            let name = field.name();
            if name.split('.').any(str::is_empty) {
                return Err(FormError::InvalidFieldName(name.to_string()));
            }
            if state.index.contains_key(name) {
                return Err(FormError::DuplicateField(name.to_string()));
            }
            state.index.insert(name.to_string(), state.fields.len());
            state.fields.push(Arc::new(field));
        }

        state.check_path_conflicts()?;
        Ok(state)
    }

    /// Builds a form from `(name, policy, default)` triples via
    /// [`create_field`].
    pub fn from_definitions<N>(
        definitions: impl IntoIterator<Item = (N, ValidationPolicy, FieldValue)>,
    ) -> Result<Self, FormError>
    where
        N: Into<String>,
    {
        Self::new(
            definitions
                .into_iter()
                .map(|(name, policy, default)| create_field(name, policy, default)),
        )
    }

    fn check_path_conflicts(&self) -> Result<(), FormError> {
        let names: HashSet<&str> = self.index.keys().map(String::as_str).collect();
        for field in &self.fields {
            let name = field.name();
            for (pos, _) in name.match_indices('.') {
                let prefix = &name[..pos];
                if names.contains(prefix) {
                    return Err(FormError::PathConflict {
                        leaf: prefix.to_string(),
                        nested: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.index.get(name).map(|&idx| self.fields[idx].as_ref())
    }

    /// Returns `true` if the form has a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.iter().map(Arc::as_ref)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the next state with `event` applied.
    ///
    /// Only the targeted field changes; every other entry is the same
    /// shared allocation as in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if the event names a field the
    /// form does not have.
    pub fn apply_change(&self, event: ChangeEvent) -> Result<Self, FormError> {
        let mut next = self.clone();
        next.dispatch(event)?;
        Ok(next)
    }

    /// Applies `event` in place.
    ///
    /// The validity stored is the validator's verdict for the new value. A
    /// widget-reported flag that disagrees is logged and overridden.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] without touching the state if the
    /// field does not exist.
    pub fn dispatch(&mut self, event: ChangeEvent) -> Result<(), FormError> {
        let Some(&idx) = self.index.get(&event.field) else {
            return Err(FormError::UnknownField(event.field));
        };

        let updated = self.fields[idx].with_value(event.value);
        if updated.is_valid() != event.is_valid {
            warn!(
                field = updated.name(),
                reported = event.is_valid,
                computed = updated.is_valid(),
                "Reported validity disagrees with field policy"
            );
        }
        debug!(
            field = updated.name(),
            is_valid = updated.is_valid(),
            "Applied change"
        );

        self.fields[idx] = Arc::new(updated);
        Ok(())
    }

    /// Conjunction of every field's validity, recomputed on each call.
    pub fn is_form_valid(&self) -> bool {
        self.fields.iter().all(|field| field.is_valid())
    }

    /// Names of fields that are currently invalid, in declaration order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| !field.is_valid())
            .map(|field| field.name())
            .collect()
    }

    /// Projects the form into its nested output record.
    ///
    /// See [`normalize`].
    pub fn normalize(&self) -> OutputNode {
        normalize(self)
    }

    #[cfg(test)]
    fn shares_field_with(&self, other: &Self, name: &str) -> bool {
        match (self.index.get(name), other.index.get(name)) {
            (Some(&a), Some(&b)) => Arc::ptr_eq(&self.fields[a], &other.fields[b]),
            _ => false,
        }
    }
}
