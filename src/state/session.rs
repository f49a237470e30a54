//! Per-user session value

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flow::{Field, Step};

/// Which answer is awaited and what has been collected so far.
///
/// The default value is the idle session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub expected: Option<Step>,
    pub answers: BTreeMap<Field, String>,
}

impl Session {
    /// Fresh session waiting for `step`
    pub fn awaiting(step: Step) -> Self {
        Self {
            expected: Some(step),
            answers: BTreeMap::new(),
        }
    }

    pub fn set_expected(&mut self, step: Option<Step>) {
        self.expected = step;
    }

    /// Store an answer, replacing any previous value for the field
    pub fn record_answer(&mut self, field: Field, value: impl Into<String>) {
        self.answers.insert(field, value.into());
    }

    pub fn answer(&self, field: Field) -> Option<&str> {
        self.answers.get(&field).map(String::as_str)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.expected.is_none()
    }
}
