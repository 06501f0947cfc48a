//! Core data model for Tastecheck.
//!
//! These types describe one survey session: the answers being collected,
//! the option catalogue they draw from, and the submission they freeze into.

pub mod catalog;
mod submission;
mod survey;
mod theme;

pub use submission::Submission;
pub use survey::{Dropdown, MAX_RATING, MIN_RATING, SurveyState, TextField, TimeOfVisit};
pub use theme::Theme;
