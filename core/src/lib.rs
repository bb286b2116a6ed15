//! Form state and validation engine.
//!
//! This crate holds the rules for turning a flat list of named fields into a
//! structured form submission:
//!
//! - [`ValidationRule`] / [`ValidationPolicy`]: labeled regex rules and the
//!   per-field policy (rules plus a `required` flag).
//! - [`create_field`] / [`FieldState`]: a field's initial state, with
//!   validity computed from its default value.
//! - [`validate`]: the single pass/fail decision for a policy and value;
//!   [`check_rules`] reports each rule separately.
//! - [`FormState`]: the keyed field table. [`ChangeEvent`]s are reduced into
//!   new states with [`FormState::apply_change`], and
//!   [`FormState::is_form_valid`] aggregates validity.
//! - [`normalize`]: projects dotted field names into a nested
//!   [`OutputNode`] tree.
//!
//! Rendering is not part of this crate; widgets talk to it only through
//! [`ChangeEvent`].
//!
//! # Example
//!
//! ```
//! use formkit_core::*;
//!
//! let mut form = FormState::from_definitions([
//!     (
//!         "metadata.name",
//!         ValidationPolicy::required().with_rules(function_name_rules()),
//!         FieldValue::text(""),
//!     ),
//!     ("spec.runtime", ValidationPolicy::optional(), FieldValue::text("golang")),
//! ])
//! .unwrap();
//! assert!(!form.is_form_valid());
//!
//! let policy = form.get("metadata.name").unwrap().policy().clone();
//! form.dispatch(ChangeEvent::validated("metadata.name", &policy, "thumbnailer".into()))
//!     .unwrap();
//! assert!(form.is_form_valid());
//!
//! assert_eq!(
//!     form.normalize().to_json(),
//!     serde_json::json!({
//!         "metadata": { "name": "thumbnailer" },
//!         "spec": { "runtime": "golang" }
//!     })
//! );
//! ```

mod field;
mod normalize;
mod rule;
mod store;
mod validate;

pub use field::{FieldState, FieldValue, create_field};
pub use normalize::{OutputNode, normalize};
pub use rule::{
    RuleError, ValidationPolicy, ValidationRule, function_name_rules, service_name_rules,
};
pub use store::{ChangeEvent, FormError, FormState};
pub use validate::{RuleCheck, check_rules, validate};
