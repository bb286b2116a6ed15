//! Form definitions, action scripts and built-in presets.
//!
//! Forms are described declaratively in YAML or JSON and turned into a
//! [`FormSession`](formkit_widgets::FormSession) ready to take user actions.
//!
//! # Quick start
//!
//! ```no_run
//! use formkit_config::{ActionScript, FormDefinition};
//!
//! let definition = FormDefinition::load("forms/function.yaml").unwrap();
//! let mut session = definition.build_session().unwrap();
//!
//! let script = ActionScript::load("forms/fill.yaml").unwrap();
//! let outcomes = script.run(&mut session).unwrap();
//! println!("{} actions performed", outcomes.len());
//! ```

mod definition;
mod document;
mod error;
pub mod presets;
mod script;

pub use definition::{FieldDefinition, FormDefinition};
pub use error::{ConfigError, Result};
pub use script::ActionScript;
