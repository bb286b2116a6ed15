//! Text input adapters.
//!
//! [`TextInput`] is the validated single-line input: it tracks whether the
//! user has typed yet, shows an overall pass/fail indicator, and keeps a
//! dropdown listing each rule with its own result. [`TextArea`] is plain
//! free text.

use formkit_core::{
    ChangeEvent, FieldValue, RuleCheck, ValidationPolicy, check_rules, validate,
};

use crate::Dropdown;

/// Overall indicator next to a validated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Nothing typed yet.
    Hidden,
    /// Current text passes the policy.
    Valid,
    /// Current text fails the policy.
    Invalid,
}

/// Validated single-line text input.
///
/// # Examples
///
/// ```
/// use formkit_core::{ValidationPolicy, function_name_rules};
/// use formkit_widgets::{Indicator, TextInput};
///
/// let mut input = TextInput::new(
///     "metadata.name",
///     "Function Name:",
///     ValidationPolicy::required().with_rules(function_name_rules()),
/// );
/// assert_eq!(input.indicator(), Indicator::Hidden);
///
/// let event = input.input("My-Func");
/// assert!(!event.is_valid);
/// assert_eq!(input.indicator(), Indicator::Invalid);
/// assert!(!input.rule_checks()[0].passed);
///
/// assert!(input.input("my-func").is_valid);
/// assert_eq!(input.indicator(), Indicator::Valid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    name: String,
    label: String,
    policy: ValidationPolicy,
    value: String,
    dirty: bool,
    is_valid: bool,
    rules: Dropdown<RuleCheck>,
}

impl TextInput {
    /// Creates an empty, untouched input.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            policy,
            value: String::new(),
            dirty: false,
            is_valid: false,
            rules: Dropdown::default(),
        }
    }

    /// Pre-fills the input without marking it dirty.
    pub fn with_default(mut self, text: impl Into<String>) -> Self {
        self.value = text.into();
        self.is_valid = validate(&self.policy, &FieldValue::text(self.value.clone()));
        self
    }

    /// Field this input reports to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caption shown above the input.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` once the user has typed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the text and reports the change.
    pub fn input(&mut self, text: impl Into<String>) -> ChangeEvent {
        self.dirty = true;
        self.value = text.into();

        let value = FieldValue::text(self.value.clone());
        self.rules.set_items(check_rules(self.policy.rules(), &value));

        let event = ChangeEvent::validated(self.name.clone(), &self.policy, value);
        self.is_valid = event.is_valid;
        event
    }

    pub(crate) fn sync(&mut self, value: &FieldValue) {
        self.input(value.as_text().unwrap_or_default());
    }

    /// Pass/fail indicator; hidden until the first keystroke.
    pub fn indicator(&self) -> Indicator {
        match (self.dirty, self.is_valid) {
            (false, _) => Indicator::Hidden,
            (true, true) => Indicator::Valid,
            (true, false) => Indicator::Invalid,
        }
    }

    /// Per-rule results for the current text, empty until the first
    /// keystroke.
    pub fn rule_checks(&self) -> &[RuleCheck] {
        self.rules.items()
    }

    /// Dropdown listing the rule results.
    pub fn rules_dropdown(&mut self) -> &mut Dropdown<RuleCheck> {
        &mut self.rules
    }
}

/// Multi-line free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    name: String,
    policy: ValidationPolicy,
    value: String,
}

impl TextArea {
    /// Creates a text area holding `default`.
    pub fn new(
        name: impl Into<String>,
        policy: ValidationPolicy,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            policy,
            value: default.into(),
        }
    }

    /// Field this text area reports to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text and reports the change.
    pub fn input(&mut self, text: impl Into<String>) -> ChangeEvent {
        self.value = text.into();
        ChangeEvent::validated(
            self.name.clone(),
            &self.policy,
            FieldValue::text(self.value.clone()),
        )
    }

    pub(crate) fn sync(&mut self, value: &FieldValue) {
        self.value = value.as_text().unwrap_or_default().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::service_name_rules;

    fn service_input() -> TextInput {
        TextInput::new(
            "spec.serviceName",
            "Service Name:",
            ValidationPolicy::required().with_rules(service_name_rules()),
        )
    }

    #[test]
    fn test_untouched_input_hides_indicator() {
        let input = service_input();
        assert!(!input.is_dirty());
        assert_eq!(input.indicator(), Indicator::Hidden);
        assert!(input.rule_checks().is_empty());
        assert_eq!(input.label(), "Service Name:");
    }

    #[test]
    fn test_default_text_keeps_input_clean() {
        let input = service_input().with_default("api");
        assert_eq!(input.value(), "api");
        assert!(!input.is_dirty());
        assert_eq!(input.indicator(), Indicator::Hidden);
    }

    #[test]
    fn test_rule_checks_follow_each_keystroke() {
        let mut input = service_input();
        input.input("api-");
        let failed: Vec<&str> = input
            .rule_checks()
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(failed, vec!["Must end with: a-z, 0-9"]);

        input.input("api-gateway");
        assert!(input.rule_checks().iter().all(|c| c.passed));
        assert_eq!(input.indicator(), Indicator::Valid);
    }

    #[test]
    fn test_clearing_input_is_invalid() {
        let mut input = service_input();
        input.input("api");
        let event = input.input("");
        assert!(!event.is_valid);
        assert_eq!(input.indicator(), Indicator::Invalid);
        assert!(input.rule_checks().iter().all(|c| !c.passed));
    }

    #[test]
    fn test_rules_dropdown_lists_checks_when_open() {
        let mut input = service_input();
        input.input("x");
        let dropdown = input.rules_dropdown();
        assert!(dropdown.visible_items().is_empty());
        dropdown.toggle();
        assert_eq!(dropdown.visible_items().len(), 4);
    }

    #[test]
    fn test_text_area_reports_policy_validity() {
        let mut area = TextArea::new("spec.description", ValidationPolicy::optional(), "");
        let event = area.input("");
        assert!(event.is_valid);
        assert_eq!(event.field, "spec.description");
        assert_eq!(
            area.input("resizes uploads").value,
            FieldValue::text("resizes uploads")
        );
        assert_eq!(area.value(), "resizes uploads");
    }
}
