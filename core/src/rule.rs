//! Pattern-based validation rules and field policies.
//!
//! A [`ValidationRule`] pairs a descriptive label with a compiled regular
//! expression. Patterns are compiled once, when the rule is built or
//! deserialized, so a malformed pattern is reported as a configuration error
//! instead of surfacing on the first keystroke.
//!
//! # Examples
//!
//! ```
//! use formkit_core::{ValidationPolicy, ValidationRule};
//!
//! let rule = ValidationRule::new("Valid characters: a-z, 0-9, -", "^[a-z0-9-]*$").unwrap();
//! assert!(rule.matches("my-func"));
//! assert!(!rule.matches("My-Func"));
//!
//! let policy = ValidationPolicy::required().with_rules(vec![rule]);
//! assert!(policy.required);
//! assert_eq!(policy.rules().len(), 1);
//!
//! // Malformed patterns fail at definition time
//! assert!(ValidationRule::new("broken", "([a-z]").is_err());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}' for rule '{label}': {message}")]
    InvalidPattern {
        /// Label of the offending rule.
        label: String,
        /// The raw pattern text.
        pattern: String,
        /// Compiler diagnostic from the regex engine.
        message: String,
    },
}

/// A labeled regular-expression rule.
///
/// The label is purely descriptive (shown next to a pass/fail indicator);
/// only the pattern takes part in validation. Matching uses
/// [`Regex::is_match`], an unanchored search: rules that must cover the whole
/// value anchor themselves with `^` and `$`.
///
/// Serializes as `{ "label": ..., "pattern": ... }`; deserializing compiles
/// the pattern and rejects malformed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct ValidationRule {
    label: String,
    pattern: Regex,
}

#[derive(Serialize, Deserialize)]
struct RawRule {
    label: String,
    pattern: String,
}

impl ValidationRule {
    /// Compiles `pattern` into a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the pattern does not compile.
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self, RuleError> {
        let label = label.into();
        match Regex::new(pattern) {
            Ok(pattern) => Ok(Self { label, pattern }),
            Err(err) => Err(RuleError::InvalidPattern {
                label,
                pattern: pattern.to_string(),
                message: err.to_string(),
            }),
        }
    }

    /// Builds a list of rules from `(label, pattern)` pairs, stopping at the
    /// first malformed pattern.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Vec<Self>, RuleError> {
        pairs
            .iter()
            .map(|(label, pattern)| Self::new(*label, pattern))
            .collect()
    }

    /// Descriptive label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Source text of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns `true` if the pattern matches anywhere in `value`.
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

impl PartialEq for ValidationRule {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.pattern() == other.pattern()
    }
}

impl Eq for ValidationRule {}

impl TryFrom<RawRule> for ValidationRule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        Self::new(raw.label, &raw.pattern)
    }
}

impl From<ValidationRule> for RawRule {
    fn from(rule: ValidationRule) -> Self {
        Self {
            pattern: rule.pattern().to_string(),
            label: rule.label,
        }
    }
}

/// Validation policy attached to a field.
///
/// A required field with an empty value is never valid. When `rules` is
/// present the value must also be non-empty and satisfy every rule; a field
/// with neither rules nor `required` accepts anything, including nothing.
///
/// # Examples
///
/// ```
/// use formkit_core::ValidationPolicy;
///
/// let policy = ValidationPolicy::default();
/// assert!(!policy.required);
/// assert!(policy.rules.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Ordered rules; `None` means the value is not pattern-checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<ValidationRule>>,
    /// Whether an empty value is rejected.
    #[serde(default)]
    pub required: bool,
}

impl ValidationPolicy {
    /// A policy that accepts empty values and checks no rules.
    pub fn optional() -> Self {
        Self::default()
    }

    /// A policy that rejects empty values.
    pub fn required() -> Self {
        Self {
            rules: None,
            required: true,
        }
    }

    /// Attaches a rule list.
    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Rules as a slice (empty when none are configured).
    pub fn rules(&self) -> &[ValidationRule] {
        self.rules.as_deref().unwrap_or_default()
    }
}

const FUNCTION_NAME_RULES: &[(&str, &str)] = &[
    ("Valid characters: a-z, 0-9, -", "^[a-z0-9-]*$"),
    (
        "Must begin and end with a-z, 0-9",
        "^(?:[a-z0-9].*[a-z0-9]|^[a-z0-9])$",
    ),
    ("Max length: 56", "^.{0,56}$"),
];

const SERVICE_NAME_RULES: &[(&str, &str)] = &[
    ("Valid characters: a-z, 0-9, -", "^[a-z0-9-]*$"),
    ("Must begin with: a-z", "^[a-z]"),
    ("Must end with: a-z, 0-9", "[a-z0-9]$"),
    ("Max length: 53", "^.{0,53}$"),
];

fn builtin(pairs: &[(&str, &str)]) -> Vec<ValidationRule> {
    ValidationRule::from_pairs(pairs).expect("static regex must compile")
}

/// Naming rules for function identifiers.
///
/// ```
/// use formkit_core::{function_name_rules, validate, FieldValue, ValidationPolicy};
///
/// let policy = ValidationPolicy::required().with_rules(function_name_rules());
/// assert!(validate(&policy, &FieldValue::text("resize-images")));
/// assert!(!validate(&policy, &FieldValue::text("-resize")));
/// ```
pub fn function_name_rules() -> Vec<ValidationRule> {
    builtin(FUNCTION_NAME_RULES)
}

/// Naming rules for service identifiers.
pub fn service_name_rules() -> Vec<ValidationRule> {
    builtin(SERVICE_NAME_RULES)
}
