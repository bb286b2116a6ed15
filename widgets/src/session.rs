//! Form sessions: a form state plus the widgets bound to its fields.
//!
//! A [`FormSession`] routes user [`Action`]s to the widget bound to the
//! targeted field, feeds the widget's [`ChangeEvent`] into the
//! [`FormState`], and gates submission on form validity, the same way a
//! disabled submit button would.
//!
//! # Examples
//!
//! ```
//! use formkit_core::{FieldValue, FormState, ValidationPolicy};
//! use formkit_widgets::{Action, CheckboxGroup, FormSession, Outcome, SelectOption, Widget};
//!
//! let state = FormState::from_definitions([(
//!     "metadata.categories",
//!     ValidationPolicy::required(),
//!     FieldValue::multi(Vec::<String>::new()),
//! )])
//! .unwrap();
//! let group = CheckboxGroup::new(
//!     "metadata.categories",
//!     vec![SelectOption::new("Data Collection", "collect")],
//!     ValidationPolicy::required(),
//!     FieldValue::multi(Vec::<String>::new()),
//! );
//! let mut session = FormSession::new(state, vec![Widget::Checkbox(group)]).unwrap();
//! assert!(session.submit().is_err());
//!
//! session.perform(Action::toggle("metadata.categories", "collect")).unwrap();
//! match session.perform(Action::Submit).unwrap() {
//!     Outcome::Submitted(record) => assert_eq!(
//!         record.to_json(),
//!         serde_json::json!({ "metadata": { "categories": ["collect"] } })
//!     ),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use std::fmt;

use formkit_core::{ChangeEvent, FieldValue, FormError, FormState, OutputNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::{CheckboxGroup, Select, TextArea, TextInput};

/// Kind of widget bound to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Validated single-line input.
    Text,
    /// Free multi-line text.
    Textarea,
    /// Single-select dropdown.
    Select,
    /// Multi-value checkbox group.
    Checkbox,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        };
        f.write_str(name)
    }
}

/// Any of the widget adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Validated text input.
    Text(TextInput),
    /// Free text area.
    Textarea(TextArea),
    /// Single-select picker.
    Select(Select),
    /// Checkbox group.
    Checkbox(CheckboxGroup),
}

impl Widget {
    /// Field the widget reports to.
    pub fn name(&self) -> &str {
        match self {
            Self::Text(w) => w.name(),
            Self::Textarea(w) => w.name(),
            Self::Select(w) => w.name(),
            Self::Checkbox(w) => w.name(),
        }
    }

    /// Kind of this widget.
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Text(_) => WidgetKind::Text,
            Self::Textarea(_) => WidgetKind::Textarea,
            Self::Select(_) => WidgetKind::Select,
            Self::Checkbox(_) => WidgetKind::Checkbox,
        }
    }

    fn sync(&mut self, value: &FieldValue) {
        match self {
            Self::Text(w) => w.sync(value),
            Self::Textarea(w) => w.sync(value),
            Self::Select(w) => w.sync(value),
            Self::Checkbox(w) => w.sync(value),
        }
    }
}

/// A user interaction.
///
/// Serialized with an `action` tag, e.g.
/// `{ "action": "toggle", "field": "spec.permissions", "value": "write" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Replace the text of a text input or text area.
    Input {
        /// Target field.
        field: String,
        /// New text.
        text: String,
    },
    /// Flip one checkbox of a checkbox group.
    Toggle {
        /// Target field.
        field: String,
        /// Option value to flip.
        value: String,
    },
    /// Pick an option of a select.
    Select {
        /// Target field.
        field: String,
        /// Option value to pick.
        value: String,
    },
    /// Submit the form.
    Submit,
}

impl Action {
    /// Builds an [`Action::Input`].
    pub fn input(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Input {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Builds an [`Action::Toggle`].
    pub fn toggle(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Toggle {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds an [`Action::Select`].
    pub fn select(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Select {
            field: field.into(),
            value: value.into(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Input { .. } => "input",
            Self::Toggle { .. } => "toggle",
            Self::Select { .. } => "select",
            Self::Submit => "submit",
        }
    }
}

/// Result of performing an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A field changed.
    Changed {
        /// The field that changed.
        field: String,
        /// Its validity after the change.
        field_valid: bool,
        /// Whole-form validity after the change.
        form_valid: bool,
    },
    /// The form was submitted and produced this record.
    Submitted(OutputNode),
}

/// A form state together with its widgets.
#[derive(Debug, Clone)]
pub struct FormSession {
    state: FormState,
    widgets: Vec<Widget>,
}

impl FormSession {
    /// Binds `widgets` to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Form`] wrapping [`FormError::UnknownField`] if
    /// a widget targets a field the form does not have, or
    /// [`FormError::DuplicateField`] if two widgets target the same field.
    pub fn new(state: FormState, widgets: Vec<Widget>) -> Result<Self> {
        for (pos, widget) in widgets.iter().enumerate() {
            let name = widget.name();
            if !state.contains(name) {
                return Err(FormError::UnknownField(name.to_string()).into());
            }
            if widgets[..pos].iter().any(|other| other.name() == name) {
                return Err(FormError::DuplicateField(name.to_string()).into());
            }
        }
        Ok(Self { state, widgets })
    }

    /// Current form state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Widgets in declaration order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Widget bound to `field`.
    pub fn widget(&self, field: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name() == field)
    }

    /// Whether the submit control would be enabled.
    pub fn is_valid(&self) -> bool {
        self.state.is_form_valid()
    }

    /// Feeds a change event straight into the form state, then updates the
    /// bound widget to the stored value so later actions start from it.
    pub fn apply(&mut self, event: ChangeEvent) -> Result<()> {
        let field = event.field.clone();
        self.state.dispatch(event)?;
        if let Some(stored) = self.state.get(&field) {
            let value = stored.value().clone();
            if let Some(widget) = self.widgets.iter_mut().find(|w| w.name() == field) {
                widget.sync(&value);
            }
        }
        Ok(())
    }

    /// Routes `action` to its widget and applies the resulting change.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownWidget`] if no widget is bound to the field.
    /// - [`SessionError::WrongWidget`] if the widget cannot take the action.
    /// - [`SessionError::UnknownOption`] for a value outside the options.
    /// - [`SessionError::FormInvalid`] when submitting an invalid form.
    pub fn perform(&mut self, action: Action) -> Result<Outcome> {
        let action_name = action.name();
        let (field, event) = match action {
            Action::Submit => return self.submit().map(Outcome::Submitted),
            Action::Input { field, text } => {
                let event = match self.widget_mut(&field)? {
                    Widget::Text(input) => input.input(text),
                    Widget::Textarea(area) => area.input(text),
                    other => return Err(wrong_widget(&field, other, action_name)),
                };
                (field, event)
            }
            Action::Toggle { field, value } => {
                let event = match self.widget_mut(&field)? {
                    Widget::Checkbox(group) => group.toggle(&value)?,
                    other => return Err(wrong_widget(&field, other, action_name)),
                };
                (field, event)
            }
            Action::Select { field, value } => {
                let event = match self.widget_mut(&field)? {
                    Widget::Select(select) => select.select(&value)?,
                    other => return Err(wrong_widget(&field, other, action_name)),
                };
                (field, event)
            }
        };

        self.state.dispatch(event)?;
        let field_valid = self.state.get(&field).is_some_and(|f| f.is_valid());
        let form_valid = self.state.is_form_valid();
        debug!(
            action = action_name,
            field = %field,
            field_valid,
            form_valid,
            "Performed action"
        );
        Ok(Outcome::Changed {
            field,
            field_valid,
            form_valid,
        })
    }

    /// Produces the output record if every field is valid.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FormInvalid`] listing the invalid fields.
    pub fn submit(&self) -> Result<OutputNode> {
        if !self.state.is_form_valid() {
            let invalid: Vec<String> = self
                .state
                .invalid_fields()
                .into_iter()
                .map(String::from)
                .collect();
            return Err(SessionError::FormInvalid { invalid });
        }
        info!(fields = self.state.len(), "Submitting form");
        Ok(self.state.normalize())
    }

    fn widget_mut(&mut self, field: &str) -> Result<&mut Widget> {
        self.widgets
            .iter_mut()
            .find(|w| w.name() == field)
            .ok_or_else(|| SessionError::UnknownWidget(field.to_string()))
    }
}

fn wrong_widget(field: &str, widget: &Widget, action: &'static str) -> SessionError {
    SessionError::WrongWidget {
        field: field.to_string(),
        kind: widget.kind(),
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{FieldValue, ValidationPolicy, function_name_rules};

    use crate::SelectOption;

    fn session() -> FormSession {
        let name_policy = ValidationPolicy::required().with_rules(function_name_rules());
        let state = FormState::from_definitions([
            ("metadata.name", name_policy.clone(), FieldValue::text("")),
            (
                "spec.permissions",
                ValidationPolicy::required(),
                FieldValue::multi(["read"]),
            ),
            (
                "spec.runtime",
                ValidationPolicy::optional(),
                FieldValue::text("golang"),
            ),
        ])
        .unwrap();
        let widgets = vec![
            Widget::Text(TextInput::new("metadata.name", "Function Name:", name_policy)),
            Widget::Checkbox(CheckboxGroup::new(
                "spec.permissions",
                vec![
                    SelectOption::new("Read files", "read"),
                    SelectOption::new("Write files", "write"),
                ],
                ValidationPolicy::required(),
                FieldValue::multi(["read"]),
            )),
            Widget::Select(Select::new(
                "spec.runtime",
                "Runtime:",
                vec![
                    SelectOption::new("Go", "golang"),
                    SelectOption::new("Java", "java"),
                ],
                ValidationPolicy::optional(),
                Some("golang".to_string()),
            )),
        ];
        FormSession::new(state, widgets).unwrap()
    }

    #[test]
    fn test_actions_route_to_widgets() {
        let mut session = session();
        assert!(!session.is_valid());

        let outcome = session
            .perform(Action::input("metadata.name", "resize"))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Changed {
                field: "metadata.name".to_string(),
                field_valid: true,
                form_valid: true,
            }
        );

        session
            .perform(Action::select("spec.runtime", "java"))
            .unwrap();
        session
            .perform(Action::toggle("spec.permissions", "write"))
            .unwrap();

        let record = session.submit().unwrap();
        assert_eq!(
            record.to_json(),
            serde_json::json!({
                "metadata": { "name": "resize" },
                "spec": { "permissions": ["read", "write"], "runtime": "java" }
            })
        );
    }

    #[test]
    fn test_submit_rejected_while_invalid() {
        let mut session = session();
        let err = session.perform(Action::Submit).unwrap_err();
        assert_eq!(
            err,
            SessionError::FormInvalid {
                invalid: vec!["metadata.name".to_string()]
            }
        );

        session
            .perform(Action::input("metadata.name", "ok"))
            .unwrap();
        session
            .perform(Action::toggle("spec.permissions", "read"))
            .unwrap();
        assert!(!session.is_valid());
        assert!(matches!(
            session.submit(),
            Err(SessionError::FormInvalid { invalid }) if invalid == vec!["spec.permissions"]
        ));
    }

    #[test]
    fn test_wrong_widget_for_action() {
        let mut session = session();
        let err = session
            .perform(Action::toggle("metadata.name", "x"))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongWidget {
                field: "metadata.name".to_string(),
                kind: WidgetKind::Text,
                action: "toggle",
            }
        );
    }

    #[test]
    fn test_unknown_widget() {
        let mut session = session();
        let err = session
            .perform(Action::input("spec.memory", "128"))
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownWidget("spec.memory".to_string()));
    }

    #[test]
    fn test_widget_for_unknown_field_rejected() {
        let state = FormState::from_definitions([(
            "spec.runtime",
            ValidationPolicy::optional(),
            FieldValue::Absent,
        )])
        .unwrap();
        let widgets = vec![Widget::Textarea(TextArea::new(
            "spec.description",
            ValidationPolicy::optional(),
            "",
        ))];
        let err = FormSession::new(state, widgets).unwrap_err();
        assert_eq!(
            err,
            SessionError::Form(FormError::UnknownField("spec.description".to_string()))
        );
    }

    #[test]
    fn test_direct_event_application() {
        let mut session = session();
        session
            .apply(ChangeEvent::new("metadata.name", true, "direct".into()))
            .unwrap();
        assert!(session.is_valid());
        let err = session
            .apply(ChangeEvent::new("nope", true, FieldValue::Absent))
            .unwrap_err();
        assert_eq!(err, SessionError::Form(FormError::UnknownField("nope".into())));
    }

    #[test]
    fn test_applied_value_carries_into_next_action() {
        let mut session = session();
        session
            .apply(ChangeEvent::new(
                "spec.permissions",
                true,
                FieldValue::multi(["read", "write"]),
            ))
            .unwrap();
        session
            .perform(Action::toggle("spec.permissions", "read"))
            .unwrap();
        assert_eq!(
            session.state().get("spec.permissions").unwrap().value(),
            &FieldValue::multi(["write"])
        );

        session
            .apply(ChangeEvent::new("spec.runtime", true, "java".into()))
            .unwrap();
        let Some(Widget::Select(runtime)) = session.widget("spec.runtime") else {
            panic!("runtime should be a select");
        };
        assert_eq!(runtime.selected(), Some("java"));

        session
            .apply(ChangeEvent::new("metadata.name", true, "applied".into()))
            .unwrap();
        let Some(Widget::Text(name)) = session.widget("metadata.name") else {
            panic!("name should be a text input");
        };
        assert_eq!(name.value(), "applied");
        assert!(session.is_valid());
    }

    #[test]
    fn test_action_deserializes_from_tagged_json() {
        let action: Action = serde_json::from_str(
            r#"{"action": "toggle", "field": "spec.permissions", "value": "write"}"#,
        )
        .unwrap();
        assert_eq!(action, Action::toggle("spec.permissions", "write"));

        let submit: Action = serde_json::from_str(r#"{"action": "submit"}"#).unwrap();
        assert_eq!(submit, Action::Submit);
    }

    #[test]
    fn test_widget_kind_display() {
        assert_eq!(WidgetKind::Textarea.to_string(), "textarea");
        assert_eq!(session().widget("spec.runtime").unwrap().kind(), WidgetKind::Select);
    }
}
