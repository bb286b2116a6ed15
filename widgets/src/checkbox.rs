//! Checkbox group adapter.

use formkit_core::{ChangeEvent, FieldValue, ValidationPolicy};

use crate::error::{Result, SessionError};
use crate::SelectOption;

/// A group of checkboxes backing one multi-value field.
///
/// Checked values form a duplicate-free set ordered by when each was first
/// checked. Every toggle reports the whole set.
///
/// # Examples
///
/// ```
/// use formkit_core::{FieldValue, ValidationPolicy};
/// use formkit_widgets::{CheckboxGroup, SelectOption};
///
/// let mut group = CheckboxGroup::new(
///     "spec.permissions",
///     vec![SelectOption::new("Read files", "read"), SelectOption::new("Write files", "write")],
///     ValidationPolicy::required(),
///     FieldValue::multi(["read"]),
/// );
///
/// let event = group.toggle("read").unwrap();
/// assert!(!event.is_valid);
/// assert_eq!(event.value, FieldValue::multi(Vec::<String>::new()));
///
/// let event = group.toggle("write").unwrap();
/// assert!(event.is_valid);
/// assert!(group.is_checked("write"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    name: String,
    options: Vec<SelectOption>,
    policy: ValidationPolicy,
    checked: FieldValue,
}

impl CheckboxGroup {
    /// Creates a group with `default` pre-checked.
    pub fn new(
        name: impl Into<String>,
        options: Vec<SelectOption>,
        policy: ValidationPolicy,
        default: FieldValue,
    ) -> Self {
        let checked = FieldValue::multi(default.members().map(String::from));
        Self {
            name: name.into(),
            options,
            policy,
            checked,
        }
    }

    /// Field this group reports to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offered options.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Currently checked values.
    pub fn checked(&self) -> &[String] {
        self.checked.as_multi().unwrap_or_default()
    }

    /// Returns `true` if `value` is checked.
    pub fn is_checked(&self, value: &str) -> bool {
        self.checked.contains(value)
    }

    /// Checks `value` if unchecked, unchecks it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownOption`] if `value` is not one of the
    /// group's options; the checked set is left alone.
    pub fn toggle(&mut self, value: &str) -> Result<ChangeEvent> {
        if !self.options.iter().any(|option| option.value == value) {
            return Err(SessionError::UnknownOption {
                field: self.name.clone(),
                value: value.to_string(),
            });
        }

        self.checked = self.checked.toggled(value);
        Ok(ChangeEvent::validated(
            self.name.clone(),
            &self.policy,
            self.checked.clone(),
        ))
    }

    /// Replaces the checked set with a value applied from outside the group.
    pub(crate) fn sync(&mut self, value: &FieldValue) {
        self.checked = FieldValue::multi(value.members().map(String::from));
    }
}
