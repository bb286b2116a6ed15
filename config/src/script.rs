//! Scripted user actions.
//!
//! An action script replays a sequence of [`Action`]s against a
//! [`FormSession`], e.g.
//!
//! ```yaml
//! actions:
//!   - { action: input, field: metadata.name, text: my-function }
//!   - { action: select, field: spec.runtime, value: python:3.9 }
//!   - { action: toggle, field: spec.permissions, value: write }
//!   - { action: submit }
//! ```

use std::path::Path;

use formkit_widgets::{Action, FormSession, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document;
use crate::error::Result;

/// An ordered list of actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionScript {
    /// Actions in the order they are performed.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl ActionScript {
    /// Creates a script from `actions`.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Loads a script from a YAML (`.yml`/`.yaml`) or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let script: Self = document::load(path)?;
        debug!(
            path = %path.display(),
            actions = script.actions.len(),
            "Loaded action script"
        );
        Ok(script)
    }

    /// Saves the script as YAML or JSON, chosen by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        document::save(self, path.as_ref())
    }

    /// Performs every action in order and collects the outcomes.
    ///
    /// Stops at the first rejected action; the session keeps the changes
    /// made by the actions before it.
    pub fn run(&self, session: &mut FormSession) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(self.actions.len());
        for (step, action) in self.actions.iter().enumerate() {
            match session.perform(action.clone()) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(step = step + 1, error = %err, "Action rejected");
                    return Err(err.into());
                }
            }
        }
        Ok(outcomes)
    }
}
