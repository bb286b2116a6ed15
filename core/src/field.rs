//! Field values and per-field state.
//!
//! A [`FieldState`] is created once per field by [`create_field`] and only
//! ever replaced by a new state with a fresh value; its validity is always
//! the validator's verdict for the value it holds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ValidationPolicy, validate};

/// The value held by a form field.
///
/// Text inputs and pickers hold a scalar [`Text`](FieldValue::Text);
/// checkbox groups hold a [`Multi`](FieldValue::Multi) set whose members keep
/// the order in which they were first checked. Serializes untagged as
/// `null`, a string, or an array.
///
/// # Examples
///
/// ```
/// use formkit_core::FieldValue;
///
/// assert!(FieldValue::Absent.is_empty());
/// assert!(FieldValue::text("").is_empty());
/// assert!(FieldValue::multi(Vec::<String>::new()).is_empty());
///
/// let perms = FieldValue::multi(["read", "write", "read"]);
/// assert_eq!(perms.as_multi().unwrap(), ["read", "write"]);
///
/// let toggled = perms.toggled("read");
/// assert_eq!(toggled.as_multi().unwrap(), ["write"]);
/// assert_eq!(toggled.toggled("read").as_multi().unwrap(), ["write", "read"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value at all.
    #[default]
    Absent,
    /// A scalar string value.
    Text(String),
    /// A duplicate-free set of selected members.
    Multi(Vec<String>),
}

impl FieldValue {
    /// Creates a scalar value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a multi-value, dropping repeated members.
    pub fn multi<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for member in members {
            let member = member.into();
            if !set.contains(&member) {
                set.push(member);
            }
        }
        Self::Multi(set)
    }

    /// Returns `true` for an absent value, an empty string, or an empty set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.is_empty(),
            Self::Multi(members) => members.is_empty(),
        }
    }

    /// The scalar value, if this is [`Text`](FieldValue::Text).
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The member list, if this is [`Multi`](FieldValue::Multi).
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Multi(members) => Some(members),
            _ => None,
        }
    }

    /// Iterates the string members validation rules are tested against.
    ///
    /// A scalar yields itself, a set yields each member, and an absent value
    /// yields nothing.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        let (scalar, set): (Option<&str>, &[String]) = match self {
            Self::Absent => (None, &[]),
            Self::Text(text) => (Some(text.as_str()), &[]),
            Self::Multi(members) => (None, members.as_slice()),
        };
        scalar.into_iter().chain(set.iter().map(String::as_str))
    }

    /// Returns `true` if `member` is one of the values.
    pub fn contains(&self, member: &str) -> bool {
        self.members().any(|m| m == member)
    }

    /// Returns a set with `member` added if missing or removed if present.
    ///
    /// Toggling the same member twice restores the original membership. An
    /// empty text value counts as an empty set; members of a set are kept
    /// as they are, including `""`.
    pub fn toggled(&self, member: &str) -> Self {
        let mut set: Vec<String> = match self {
            Self::Absent => Vec::new(),
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![text.clone()],
            Self::Multi(members) => members.clone(),
        };
        match set.iter().position(|m| m == member) {
            Some(pos) => {
                set.remove(pos);
            }
            None => set.push(member.to_string()),
        }
        Self::Multi(set)
    }

    fn deduplicated(self) -> Self {
        match self {
            Self::Multi(members) => Self::multi(members),
            other => other,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(members: Vec<String>) -> Self {
        Self::multi(members)
    }
}

/// State of one named field.
///
/// Fields are private so the validity flag can never drift from the value:
/// the only way to get a new value in is [`FieldState::with_value`], which
/// re-runs the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    name: String,
    policy: ValidationPolicy,
    value: FieldValue,
    is_valid: bool,
}

impl FieldState {
    /// Same as [`create_field`].
    pub fn new(name: impl Into<String>, policy: ValidationPolicy, value: FieldValue) -> Self {
        let value = value.deduplicated();
        let is_valid = validate(&policy, &value);
        Self {
            name: name.into(),
            policy,
            value,
            is_valid,
        }
    }

    /// Dotted field path (e.g. `"spec.runtime"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The policy this field is validated with.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Current value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Validator verdict for [`value`](FieldState::value).
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns a copy of this field holding `value`, revalidated.
    pub fn with_value(&self, value: FieldValue) -> Self {
        Self::new(self.name.clone(), self.policy.clone(), value)
    }
}

/// Builds a field's initial state, computing validity from `default`.
///
/// - required with an empty default → invalid;
/// - rules present → valid only if the default is non-empty and every rule
///   matches;
/// - otherwise valid.
///
/// # Examples
///
/// ```
/// use formkit_core::*;
///
/// let rules = vec![ValidationRule::new("lowercase", "^[a-z0-9-]*$").unwrap()];
/// let name = create_field(
///     "metadata.name",
///     ValidationPolicy::required().with_rules(rules),
///     FieldValue::text(""),
/// );
/// assert!(!name.is_valid());
///
/// let description = create_field(
///     "spec.description",
///     ValidationPolicy::optional(),
///     FieldValue::text(""),
/// );
/// assert!(description.is_valid());
/// ```
pub fn create_field(
    name: impl Into<String>,
    policy: ValidationPolicy,
    default: FieldValue,
) -> FieldState {
    let field = FieldState::new(name, policy, default);
    debug!(
        field = field.name(),
        required = field.policy().required,
        rules = field.policy().rules().len(),
        is_valid = field.is_valid(),
        "Created field"
    );
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationRule;

    fn lowercase_rules() -> Vec<ValidationRule> {
        vec![ValidationRule::new("lowercase", "^[a-z0-9-]*$").unwrap()]
    }

    #[test]
    fn test_required_empty_default_is_invalid() {
        for default in [
            FieldValue::Absent,
            FieldValue::text(""),
            FieldValue::multi(Vec::<String>::new()),
        ] {
            let field = create_field("f", ValidationPolicy::required(), default);
            assert!(!field.is_valid());
        }
    }

    #[test]
    fn test_optional_without_rules_accepts_anything() {
        for default in [
            FieldValue::Absent,
            FieldValue::text(""),
            FieldValue::text("Anything At All"),
            FieldValue::multi(["a"]),
        ] {
            let field = create_field("f", ValidationPolicy::optional(), default);
            assert!(field.is_valid());
        }
    }

    #[test]
    fn test_rules_with_empty_default_fail_even_if_not_required() {
        let field = create_field(
            "f",
            ValidationPolicy::optional().with_rules(lowercase_rules()),
            FieldValue::text(""),
        );
        assert!(!field.is_valid());
    }

    #[test]
    fn test_rules_checked_against_default() {
        let policy = ValidationPolicy::required().with_rules(lowercase_rules());
        assert!(create_field("f", policy.clone(), "my-func".into()).is_valid());
        assert!(!create_field("f", policy, "My-Func".into()).is_valid());
    }

    #[test]
    fn test_multi_default_is_deduplicated() {
        let field = FieldState::new(
            "spec.permissions",
            ValidationPolicy::required(),
            FieldValue::Multi(vec!["read".into(), "read".into()]),
        );
        assert_eq!(field.value(), &FieldValue::multi(["read"]));
        assert!(field.is_valid());
    }

    #[test]
    fn test_with_value_revalidates() {
        let field = create_field(
            "categories",
            ValidationPolicy::required(),
            FieldValue::multi(Vec::<String>::new()),
        );
        assert!(!field.is_valid());

        let checked = field.with_value(field.value().toggled("collect"));
        assert!(checked.is_valid());
        assert_eq!(checked.name(), "categories");

        let unchecked = checked.with_value(checked.value().toggled("collect"));
        assert_eq!(unchecked, field);
    }

    #[test]
    fn test_toggle_on_absent_starts_a_set() {
        assert_eq!(FieldValue::Absent.toggled("x"), FieldValue::multi(["x"]));
    }

    #[test]
    fn test_field_value_serde_shapes() {
        assert_eq!(
            serde_json::to_value(FieldValue::Absent).unwrap(),
            serde_json::Value::Null
        );
        let text: FieldValue = serde_json::from_str(r#""golang""#).unwrap();
        assert_eq!(text, FieldValue::text("golang"));
        let multi: FieldValue = serde_json::from_str(r#"["read", "write"]"#).unwrap();
        assert_eq!(multi, FieldValue::multi(["read", "write"]));
        let absent: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(absent, FieldValue::Absent);
    }

    #[test]
    fn test_toggle_empty_member_twice_restores_set() {
        let start = FieldValue::multi(Vec::<String>::new());
        let once = start.toggled("");
        assert_eq!(once, FieldValue::multi([""]));
        assert_eq!(once.toggled(""), start);

        let perms = FieldValue::multi(["", "read"]);
        assert_eq!(perms.toggled("read"), FieldValue::multi([""]));
    }

    #[test]
    fn test_toggle_empty_text_starts_empty_set() {
        assert_eq!(FieldValue::text("").toggled("read"), FieldValue::multi(["read"]));
        assert_eq!(FieldValue::Absent.toggled("read"), FieldValue::multi(["read"]));
    }
}
