//! Field validation.
//!
//! [`validate`] is the single pass/fail decision used everywhere: by the
//! field factory for initial state, by the store on every change, and by
//! widget adapters before they report a change. Invalid input is an ordinary
//! `false`, never an error.
//!
//! # Examples
//!
//! ```
//! use formkit_core::*;
//!
//! let policy = ValidationPolicy::required()
//!     .with_rules(vec![ValidationRule::new("lowercase", "^[a-z0-9-]*$").unwrap()]);
//!
//! assert!(!validate(&policy, &FieldValue::text("")));
//! assert!(validate(&policy, &FieldValue::text("my-func")));
//! assert!(!validate(&policy, &FieldValue::text("My-Func")));
//! ```

use serde::Serialize;

use crate::{FieldValue, ValidationPolicy, ValidationRule};

/// Decides whether `value` satisfies `policy`.
///
/// Emptiness is checked before any rule: a rule list paired with an empty
/// value fails even when every pattern would match the empty string. For a
/// multi-value every member must satisfy every rule.
pub fn validate(policy: &ValidationPolicy, value: &FieldValue) -> bool {
    if value.is_empty() {
        return !policy.required && policy.rules.is_none();
    }

    match &policy.rules {
        Some(rules) => satisfies_all(rules, value),
        None => true,
    }
}

fn satisfies_all(rules: &[ValidationRule], value: &FieldValue) -> bool {
    value
        .members()
        .all(|member| rules.iter().all(|rule| rule.matches(member)))
}

/// Outcome of a single rule for a candidate value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCheck {
    /// Label of the rule that was checked.
    pub label: String,
    /// Whether the value satisfied the rule.
    pub passed: bool,
}

/// Checks each rule individually, in order.
///
/// Used to render a per-rule pass/fail list next to a text input. An empty
/// value fails every rule, matching [`validate`].
///
/// # Examples
///
/// ```
/// use formkit_core::*;
///
/// let checks = check_rules(&service_name_rules(), &FieldValue::text("api-"));
/// let failed: Vec<&str> = checks
///     .iter()
///     .filter(|c| !c.passed)
///     .map(|c| c.label.as_str())
///     .collect();
/// assert_eq!(failed, vec!["Must end with: a-z, 0-9"]);
/// ```
pub fn check_rules(rules: &[ValidationRule], value: &FieldValue) -> Vec<RuleCheck> {
    let empty = value.is_empty();
    rules
        .iter()
        .map(|rule| RuleCheck {
            label: rule.label().to_string(),
            passed: !empty && value.members().all(|member| rule.matches(member)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_field, function_name_rules};

    fn policies() -> Vec<ValidationPolicy> {
        let rules = vec![ValidationRule::new("lowercase", "^[a-z0-9-]*$").unwrap()];
        vec![
            ValidationPolicy::optional(),
            ValidationPolicy::required(),
            ValidationPolicy::optional().with_rules(rules.clone()),
            ValidationPolicy::required().with_rules(rules),
            ValidationPolicy::required().with_rules(Vec::new()),
        ]
    }

    fn values() -> Vec<FieldValue> {
        vec![
            FieldValue::Absent,
            FieldValue::text(""),
            FieldValue::text("my-func"),
            FieldValue::text("My-Func"),
            FieldValue::multi(Vec::<String>::new()),
            FieldValue::multi(["read", "write"]),
            FieldValue::multi(["read", "Write"]),
        ]
    }

    #[test]
    fn test_factory_and_validator_agree() {
        for policy in policies() {
            for value in values() {
                let field = create_field("f", policy.clone(), value.clone());
                assert_eq!(
                    validate(&policy, &value),
                    field.is_valid(),
                    "policy {policy:?} value {value:?}"
                );
            }
        }
    }

    #[test]
    fn test_empty_string_fails_vacuous_rules() {
        let policy = ValidationPolicy::optional()
            .with_rules(vec![ValidationRule::new("anything", ".*").unwrap()]);
        assert!(!validate(&policy, &FieldValue::text("")));
        assert!(validate(&policy, &FieldValue::text("x")));
    }

    #[test]
    fn test_empty_rule_list_still_requires_a_value() {
        let policy = ValidationPolicy::optional().with_rules(Vec::new());
        assert!(!validate(&policy, &FieldValue::Absent));
        assert!(validate(&policy, &FieldValue::text("x")));
    }

    #[test]
    fn test_multi_value_members_checked_individually() {
        let policy = ValidationPolicy::required()
            .with_rules(vec![ValidationRule::new("lowercase", "^[a-z]+$").unwrap()]);
        assert!(validate(&policy, &FieldValue::multi(["read", "write"])));
        assert!(!validate(&policy, &FieldValue::multi(["read", "Write"])));
    }

    #[test]
    fn test_check_rules_reports_each_rule() {
        let checks = check_rules(&function_name_rules(), &FieldValue::text("My-func"));
        assert_eq!(checks.len(), 3);
        assert!(!checks[0].passed);
        assert!(!checks[1].passed);
        assert!(checks[2].passed);
        assert_eq!(checks[2].label, "Max length: 56");
    }

    #[test]
    fn test_check_rules_empty_value_fails_all() {
        let checks = check_rules(&function_name_rules(), &FieldValue::text(""));
        assert!(checks.iter().all(|c| !c.passed));
    }
}
