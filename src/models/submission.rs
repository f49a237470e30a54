//! Submission record model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flow::Field;
use crate::utils::errors::{IntakeError, Result};

const NOT_AVAILABLE: &str = "N/A";

/// One completed inquiry, written once per finished flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub profile: String,
    pub submitter_name: String,
    pub submitter_handle: String,
    pub category: Option<String>,
    pub project_description: Option<String>,
    pub meeting_context: Option<String>,
    pub contact_info: Option<String>,
    pub timeline: Option<String>,
}

/// The Telegram user who completed a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    /// Used to greet the user
    pub first_name: String,
    /// "first last", or `N/A`
    pub display_name: String,
    /// Username without `@`, or `N/A`
    pub handle: String,
}

impl Submitter {
    pub fn from_parts(first_name: &str, last_name: Option<&str>, username: Option<&str>) -> Self {
        let full = format!("{} {}", first_name, last_name.unwrap_or("")).trim().to_string();
        let display_name = if full.is_empty() { NOT_AVAILABLE.to_string() } else { full };
        let handle = username
            .filter(|u| !u.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        Self {
            first_name: first_name.trim().to_string(),
            display_name,
            handle,
        }
    }
}

impl SubmissionRecord {
    /// Build a record from collected answers.
    ///
    /// Every field in `required` must have an answer; fields outside it are
    /// stored as `None` even when present.
    pub fn assemble(
        answers: &BTreeMap<Field, String>,
        required: &[Field],
        submitter: &Submitter,
        profile: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self> {
        if let Some(missing) = required.iter().find(|f| !answers.contains_key(*f)) {
            return Err(IntakeError::MissingAnswer(*missing));
        }

        let take = |field: Field| -> Option<String> {
            if required.contains(&field) {
                answers.get(&field).cloned()
            } else {
                None
            }
        };

        Ok(Self {
            id: Uuid::new_v4(),
            submitted_at,
            profile: profile.to_string(),
            submitter_name: submitter.display_name.clone(),
            submitter_handle: submitter.handle.clone(),
            category: take(Field::Category),
            project_description: take(Field::ProjectDescription),
            meeting_context: take(Field::MeetingContext),
            contact_info: take(Field::ContactInfo),
            timeline: take(Field::Timeline),
        })
    }

    /// Value stored for `field`
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Category => self.category.as_deref(),
            Field::ProjectDescription => self.project_description.as_deref(),
            Field::MeetingContext => self.meeting_context.as_deref(),
            Field::ContactInfo => self.contact_info.as_deref(),
            Field::Timeline => self.timeline.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn answers() -> BTreeMap<Field, String> {
        Field::ALL
            .iter()
            .map(|f| (*f, format!("answer for {}", f)))
            .collect()
    }

    #[test]
    fn test_submitter_display_name() {
        let full = Submitter::from_parts("Ada", Some("Lovelace"), Some("ada"));
        assert_eq!(full.display_name, "Ada Lovelace");
        assert_eq!(full.handle, "ada");

        let first_only = Submitter::from_parts("Ada", None, None);
        assert_eq!(first_only.display_name, "Ada");
        assert_eq!(first_only.handle, "N/A");

        let blank = Submitter::from_parts(" ", Some(""), Some(""));
        assert_eq!(blank.display_name, "N/A");
        assert_eq!(blank.handle, "N/A");
    }

    #[test]
    fn test_assemble_all_fields() {
        let submitter = Submitter::from_parts("Ada", None, Some("ada"));
        let record = SubmissionRecord::assemble(&answers(), &Field::ALL, &submitter, "netherbot", Utc::now()).unwrap();

        for field in Field::ALL {
            assert_eq!(record.field(field), Some(format!("answer for {}", field).as_str()));
        }
        assert_eq!(record.profile, "netherbot");
        assert_eq!(record.submitter_handle, "ada");
    }

    #[test]
    fn test_assemble_missing_field() {
        let mut partial = answers();
        partial.remove(&Field::ContactInfo);
        let submitter = Submitter::from_parts("Ada", None, None);

        assert_matches!(
            SubmissionRecord::assemble(&partial, &Field::ALL, &submitter, "netherbot", Utc::now()),
            Err(IntakeError::MissingAnswer(Field::ContactInfo))
        );
    }

    #[test]
    fn test_uncollected_fields_are_null() {
        let submitter = Submitter::from_parts("Ada", None, None);
        let required = [Field::ProjectDescription, Field::Timeline];
        let record = SubmissionRecord::assemble(&answers(), &required, &submitter, "short", Utc::now()).unwrap();

        assert!(record.category.is_none());
        assert!(record.meeting_context.is_none());
        assert!(record.timeline.is_some());
    }
}
