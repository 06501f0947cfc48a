//! Full-screen terminal front end for the survey.

mod app;
mod palette;
mod screens;

pub use app::run;
