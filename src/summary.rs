//! The confirmation message shown after a survey is submitted.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{SurveyState, catalog};

/// Shown while the summary message is pending.
pub const ANALYZING: &str = "Analyzing your feedback...";

const RESPONSES: [&str; 5] = [
    "Based on your feedback, we're prioritizing fresh ingredient rotation at your favorite \
     stations and adjusting portion sizes during peak hours. Your input helps us serve better \
     meals faster!",
    "Thanks for the detailed feedback! We're already working on improving line wait times and \
     enhancing the cleanliness standards you mentioned. Keep the suggestions coming!",
    "Your feedback is gold! We're implementing your suggestions about menu variety and will be \
     rolling out some new options based on your preferences. Stay tuned for updates!",
    "We love hearing from students like you! Your insights about service speed and food \
     quality are driving our next improvements. Thanks for helping us level up!",
    "Amazing feedback! We're taking your comments about dietary options and station \
     organization seriously. Expect to see positive changes very soon!",
];

/// Build the summary message for a set of answers, picking a canned response with `rng`.
pub fn analyze<R: Rng + ?Sized>(answers: &SurveyState, rng: &mut R) -> String {
    let label = catalog::satisfaction_label(answers.satisfaction);
    let response = RESPONSES.choose(rng).copied().unwrap_or(RESPONSES[0]);
    format!("You rated us {label}. {response}")
}
