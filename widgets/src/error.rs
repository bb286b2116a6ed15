//! Error types for widget and session operations.

use formkit_core::FormError;
use thiserror::Error;

use crate::WidgetKind;

/// Errors raised while routing user actions through a form session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The underlying form rejected the change.
    #[error(transparent)]
    Form(#[from] FormError),

    /// No widget is bound to the named field.
    #[error("no widget for field: {0}")]
    UnknownWidget(String),

    /// A checkbox or select was given a value outside its option list.
    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption {
        /// Field the action targeted.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// The action does not apply to the widget bound to the field.
    #[error("field '{field}' is a {kind} widget and does not accept '{action}'")]
    WrongWidget {
        /// Field the action targeted.
        field: String,
        /// Kind of widget bound to the field.
        kind: WidgetKind,
        /// Name of the rejected action.
        action: &'static str,
    },

    /// Submit was attempted while at least one field is invalid.
    #[error("form is invalid: {}", invalid.join(", "))]
    FormInvalid {
        /// Names of the invalid fields.
        invalid: Vec<String>,
    },
}

/// Convenience alias for results with [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
