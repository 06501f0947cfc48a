//! Screen rendering and input handling.

mod survey;

pub use survey::SurveyScreen;
