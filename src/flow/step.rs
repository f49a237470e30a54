//! Flow steps and collected fields
//!
//! `Step` is the program counter of a user's flow and `Field` names the
//! answers it collects. The transition table lives in [`next_after`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A collected answer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Category,
    ProjectDescription,
    MeetingContext,
    ContactInfo,
    Timeline,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Category,
        Field::ProjectDescription,
        Field::MeetingContext,
        Field::ContactInfo,
        Field::Timeline,
    ];

    /// Stable snake_case key used in profiles and storage
    pub fn key(self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::ProjectDescription => "project_description",
            Field::MeetingContext => "meeting_context",
            Field::ContactInfo => "contact_info",
            Field::Timeline => "timeline",
        }
    }

    /// Human label used in summaries
    pub fn label(self) -> &'static str {
        match self {
            Field::Category => "Service Area",
            Field::ProjectDescription => "Project Details",
            Field::MeetingContext => "Where We Met",
            Field::ContactInfo => "Contact Information",
            Field::Timeline => "Timeline",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which input a session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AwaitCategory,
    AwaitProjectDescription,
    AwaitMeetingContext,
    AwaitContactInfo,
    AwaitTimeline,
    /// Multiple-choice fork; accepts only the profile's literal tokens
    AwaitChoice,
}

impl Step {
    /// The step that collects `field`
    pub fn awaiting(field: Field) -> Step {
        match field {
            Field::Category => Step::AwaitCategory,
            Field::ProjectDescription => Step::AwaitProjectDescription,
            Field::MeetingContext => Step::AwaitMeetingContext,
            Field::ContactInfo => Step::AwaitContactInfo,
            Field::Timeline => Step::AwaitTimeline,
        }
    }

    /// The field this step collects, if any
    pub fn field(self) -> Option<Field> {
        match self {
            Step::AwaitCategory => Some(Field::Category),
            Step::AwaitProjectDescription => Some(Field::ProjectDescription),
            Step::AwaitMeetingContext => Some(Field::MeetingContext),
            Step::AwaitContactInfo => Some(Field::ContactInfo),
            Step::AwaitTimeline => Some(Field::Timeline),
            Step::AwaitChoice => None,
        }
    }
}

/// What happens once an answer has been recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Prompt for the next question
    Ask(Field),
    /// All questions answered; build and store the record
    Submit,
}

/// Transition after `answered` for a question sequence.
///
/// The category answer always leads into the first question. Returns `None`
/// when `answered` is not part of the sequence.
pub fn next_after(questions: &[Field], answered: Field) -> Option<Transition> {
    if answered == Field::Category {
        return Some(match questions.first() {
            Some(first) => Transition::Ask(*first),
            None => Transition::Submit,
        });
    }

    let position = questions.iter().position(|f| *f == answered)?;
    Some(match questions.get(position + 1) {
        Some(next) => Transition::Ask(*next),
        None => Transition::Submit,
    })
}
