//! Single-select picker adapter.

use formkit_core::{ChangeEvent, FieldValue, ValidationPolicy};

use crate::error::{Result, SessionError};
use crate::{Dropdown, SelectOption};

/// A dropdown picker holding exactly one of its options.
///
/// # Examples
///
/// ```
/// use formkit_core::ValidationPolicy;
/// use formkit_widgets::{Select, SelectOption};
///
/// let mut runtime = Select::new(
///     "spec.runtime",
///     "Runtime:",
///     vec![SelectOption::new("Go", "golang"), SelectOption::new("Java", "java")],
///     ValidationPolicy::optional(),
///     Some("golang".into()),
/// );
/// assert_eq!(runtime.selected_label(), Some("Go"));
///
/// let event = runtime.select("java").unwrap();
/// assert_eq!(event.value.as_text(), Some("java"));
/// assert_eq!(runtime.selected_label(), Some("Java"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    name: String,
    label: String,
    policy: ValidationPolicy,
    selected: Option<String>,
    dropdown: Dropdown<SelectOption>,
}

impl Select {
    /// Creates a picker with `default` selected.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        policy: ValidationPolicy,
        default: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            policy,
            selected: default,
            dropdown: Dropdown::new(options),
        }
    }

    /// Field this picker reports to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caption shown above the picker.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Offered options.
    pub fn options(&self) -> &[SelectOption] {
        self.dropdown.items()
    }

    /// Currently selected value.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label of the selected option, shown in the closed picker.
    pub fn selected_label(&self) -> Option<&str> {
        let selected = self.selected.as_deref()?;
        self.options()
            .iter()
            .find(|option| option.value == selected)
            .map(|option| option.label.as_str())
    }

    /// The option list.
    pub fn dropdown(&mut self) -> &mut Dropdown<SelectOption> {
        &mut self.dropdown
    }

    /// Selects the option whose value is `value`, closing the list.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownOption`] if no option has that value.
    pub fn select(&mut self, value: &str) -> Result<ChangeEvent> {
        if !self.options().iter().any(|option| option.value == value) {
            return Err(SessionError::UnknownOption {
                field: self.name.clone(),
                value: value.to_string(),
            });
        }
        self.dropdown.close();
        self.selected = Some(value.to_string());
        Ok(self.event())
    }

    /// Selects the `index`-th visible option of the open list.
    ///
    /// Returns `None` when the list is closed or the index is out of range.
    pub fn choose(&mut self, index: usize) -> Option<ChangeEvent> {
        let value = self.dropdown.choose(index)?.value.clone();
        self.selected = Some(value);
        Some(self.event())
    }

    pub(crate) fn sync(&mut self, value: &FieldValue) {
        self.selected = value.as_text().map(String::from);
    }

    fn event(&self) -> ChangeEvent {
        let value = self
            .selected
            .clone()
            .map_or(FieldValue::Absent, FieldValue::Text);
        ChangeEvent::validated(self.name.clone(), &self.policy, value)
    }
}
