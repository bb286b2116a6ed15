//! Declarative form definitions.
//!
//! A [`FormDefinition`] lists the fields of a form together with the widget
//! that edits each one. Definitions load from YAML or JSON and turn into a
//! [`FormSession`] ready to take user actions.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! title: Create New Form
//! fields:
//!   - name: metadata.name
//!     label: "Function Name:"
//!     widget: text
//!     required: true
//!     rules:
//!       - label: "Valid characters: a-z, 0-9, -"
//!         pattern: "^[a-z0-9-]*$"
//!     default: ""
//!   - name: spec.runtime
//!     label: "Runtime:"
//!     widget: select
//!     options:
//!       - { label: Go, value: golang }
//!       - { label: Java, value: java }
//!     default: golang
//!   - name: spec.permissions
//!     widget: checkbox
//!     required: true
//!     options:
//!       - { label: Read files, value: read }
//!     default: [read]
//! ```

use std::path::Path;

use formkit_core::{FieldValue, FormState, ValidationPolicy, ValidationRule, create_field};
use formkit_widgets::{
    CheckboxGroup, FormSession, Select, SelectOption, TextArea, TextInput, Widget, WidgetKind,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document;
use crate::error::{ConfigError, Result};

/// One field of a form and the widget that edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Dotted field path.
    pub name: String,
    /// Caption shown next to the widget (defaults to the name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Widget used to edit the field.
    pub widget: WidgetKind,
    /// Whether an empty value is rejected.
    #[serde(default)]
    pub required: bool,
    /// Pattern rules the value must satisfy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<ValidationRule>>,
    /// Options for select and checkbox widgets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Initial value.
    #[serde(default)]
    pub default: FieldValue,
}

impl FieldDefinition {
    /// Validation policy built from `required` and `rules`.
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            rules: self.rules.clone(),
            required: self.required,
        }
    }

    /// Caption, falling back to the field name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Starting value; checkbox groups without a default start empty.
    pub fn initial_value(&self) -> FieldValue {
        match (&self.default, self.widget) {
            (FieldValue::Absent, WidgetKind::Checkbox) => FieldValue::multi(Vec::<String>::new()),
            (value, _) => value.clone(),
        }
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    fn check(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(ConfigError::InvalidDefinition(format!(
                "field '{}': {reason}",
                self.name
            )))
        };

        match self.widget {
            WidgetKind::Text | WidgetKind::Textarea => {
                if !self.options.is_empty() {
                    return invalid("text widgets take no options");
                }
                if matches!(self.default, FieldValue::Multi(_)) {
                    return invalid("text widgets need a string default");
                }
            }
            WidgetKind::Select => {
                if self.options.is_empty() {
                    return invalid("select needs at least one option");
                }
                match &self.default {
                    FieldValue::Multi(_) => return invalid("select needs a single default"),
                    FieldValue::Text(value) if !self.has_option(value) => {
                        return invalid("select default is not one of its options");
                    }
                    _ => {}
                }
            }
            WidgetKind::Checkbox => {
                if self.options.is_empty() {
                    return invalid("checkbox group needs at least one option");
                }
                if matches!(self.default, FieldValue::Text(_)) {
                    return invalid("checkbox group needs a list default");
                }
                if self.default.members().any(|member| !self.has_option(member)) {
                    return invalid("checkbox default contains an unknown option");
                }
            }
        }
        Ok(())
    }

    fn widget(&self) -> Widget {
        let policy = self.policy();
        let default_text = self.default.as_text().unwrap_or_default();
        match self.widget {
            WidgetKind::Text => Widget::Text(
                TextInput::new(self.name.clone(), self.label(), policy).with_default(default_text),
            ),
            WidgetKind::Textarea => {
                Widget::Textarea(TextArea::new(self.name.clone(), policy, default_text))
            }
            WidgetKind::Select => Widget::Select(Select::new(
                self.name.clone(),
                self.label(),
                self.options.clone(),
                policy,
                self.default.as_text().map(String::from),
            )),
            WidgetKind::Checkbox => Widget::Checkbox(CheckboxGroup::new(
                self.name.clone(),
                self.options.clone(),
                policy,
                self.initial_value(),
            )),
        }
    }
}

/// A complete form description.
///
/// # Examples
///
/// ```
/// use formkit_config::FormDefinition;
///
/// let definition: FormDefinition = serde_yaml::from_str(r#"
/// version: "1.0"
/// title: Feedback
/// fields:
///   - name: comment.body
///     widget: textarea
///   - name: comment.topics
///     widget: checkbox
///     required: true
///     options:
///       - { label: Bug, value: bug }
///       - { label: Idea, value: idea }
/// "#).unwrap();
///
/// definition.validate().unwrap();
/// let session = definition.build_session().unwrap();
/// assert!(!session.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Definition format version (e.g. `"1.0"`).
    pub version: String,
    /// Heading shown above the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fields in display order.
    pub fields: Vec<FieldDefinition>,
}

impl FormDefinition {
    /// Loads a definition from a YAML (`.yml`/`.yaml`) or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) /
    /// [`JsonError`](ConfigError::JsonError) if parsing fails, including
    /// rules whose pattern does not compile.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let definition: Self = document::load(path)?;
        debug!(
            path = %path.display(),
            fields = definition.fields.len(),
            "Loaded form definition"
        );
        Ok(definition)
    }

    /// Saves the definition as YAML or JSON, chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        document::save(self, path.as_ref())
    }

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks widget/option consistency.
    ///
    /// Name uniqueness and path conflicts are checked when the form state
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDefinition`](ConfigError::InvalidDefinition) naming
    /// the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::InvalidDefinition(
                "version cannot be empty".to_string(),
            ));
        }
        for field in &self.fields {
            field.check()?;
        }
        Ok(())
    }

    /// Seeds a form state from the field defaults.
    pub fn build_state(&self) -> Result<FormState> {
        let fields = self
            .fields
            .iter()
            .map(|field| create_field(field.name.clone(), field.policy(), field.initial_value()));
        Ok(FormState::new(fields)?)
    }

    /// Validates the definition and builds a session with one widget per
    /// field.
    pub fn build_session(&self) -> Result<FormSession> {
        self.validate()?;
        let state = self.build_state()?;
        let widgets = self.fields.iter().map(FieldDefinition::widget).collect();
        Ok(FormSession::new(state, widgets)?)
    }
}
