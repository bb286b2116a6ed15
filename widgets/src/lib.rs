//! Headless form widgets and form sessions.
//!
//! The widgets here carry only their own interaction state (open/closed,
//! dirty, checked set) and report every value change as a
//! [`ChangeEvent`](formkit_core::ChangeEvent) computed with the field's
//! validation policy. Rendering is left to the embedding UI.
//!
//! - [`Dropdown`]: open/closed, searchable item list.
//! - [`CheckboxGroup`]: multi-value field.
//! - [`TextInput`]: validated text with per-rule results; [`TextArea`] for
//!   free text.
//! - [`Select`]: single-select picker.
//! - [`FormSession`]: binds widgets to a
//!   [`FormState`](formkit_core::FormState), routes [`Action`]s and gates
//!   submission.

mod checkbox;
mod dropdown;
mod error;
mod select;
mod session;
mod text;

pub use checkbox::CheckboxGroup;
pub use dropdown::{Dropdown, Labeled, SelectOption};
pub use error::{Result, SessionError};
pub use select::Select;
pub use session::{Action, FormSession, Outcome, Widget, WidgetKind};
pub use text::{Indicator, TextArea, TextInput};
