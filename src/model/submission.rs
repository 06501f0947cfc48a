//! Submission: the frozen payload handed to the sink when a survey completes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SurveyState;

/// A completed survey, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: Timestamp,
    pub answers: SurveyState,
}

impl Submission {
    /// Freeze `answers` into a new submission stamped with the current time.
    pub fn new(answers: SurveyState) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Timestamp::now(),
            answers,
        }
    }

    /// First eight characters of the id, for display.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}
