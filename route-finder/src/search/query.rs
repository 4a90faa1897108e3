//! Per-field query state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::matches;
use crate::domain::{Location, LocationId};

use super::error::SelectError;

/// One of the two input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Origin,
    Destination,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Origin => "origin",
            Field::Destination => "destination",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user typed in one field, and what it currently resolves to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    raw_text: String,
    candidates: Vec<Location>,
    resolved: Option<Location>,
    /// Set after an explicit selection, reset on the next edit
    results_hidden: bool,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// All candidates for the current text, in catalog order.
    pub fn candidates(&self) -> &[Location] {
        &self.candidates
    }

    /// Candidates to display: empty while hidden after a selection.
    pub fn visible_candidates(&self) -> &[Location] {
        if self.results_hidden {
            &[]
        } else {
            &self.candidates
        }
    }

    pub fn resolved(&self) -> Option<&Location> {
        self.resolved.as_ref()
    }

    pub fn results_hidden(&self) -> bool {
        self.results_hidden
    }

    /// The location a search would use: the resolved one, or else the
    /// first candidate.
    pub fn endpoint(&self) -> Option<&Location> {
        self.resolved.as_ref().or_else(|| self.candidates.first())
    }

    /// Replace the text and recompute candidates.
    ///
    /// Any resolution is dropped only if the text actually changed, so
    /// re-sending the same text keeps an explicit selection.
    pub fn set_text(&mut self, text: impl Into<String>, locations: &[Location]) {
        let text = text.into();
        if text != self.raw_text {
            self.raw_text = text;
            self.resolved = None;
            self.results_hidden = false;
        }
        self.candidates = matches(locations, &self.raw_text);
    }

    /// Explicitly pick one of the current candidates.
    ///
    /// The field text becomes the location's name and the candidate list is
    /// hidden until the text is edited again.
    pub fn select(
        &mut self,
        field: Field,
        id: &LocationId,
        locations: &[Location],
    ) -> Result<(), SelectError> {
        let chosen = self
            .candidates
            .iter()
            .find(|l| l.id() == id)
            .cloned()
            .ok_or_else(|| SelectError::NotACandidate {
                field,
                id: id.clone(),
            })?;

        self.raw_text = chosen.display_name().to_string();
        self.candidates = matches(locations, &self.raw_text);
        self.resolved = Some(chosen);
        self.results_hidden = true;
        Ok(())
    }

    /// Record `location` as resolved without touching the text.
    pub(super) fn resolve(&mut self, location: Location) {
        self.resolved = Some(location);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
