//! Output formatting for CLI display.

use crate::model::{Submission, catalog};

/// One-line summary of a stored submission.
pub(super) fn format_submission_line(submission: &Submission) -> String {
    let answers = &submission.answers;
    let when = submission.submitted_at.strftime("%Y-%m-%d %H:%M");
    let visit = answers
        .time_of_visit
        .map_or("?", |t| t.label());
    let stations = format_tokens(catalog::STATIONS, answers.stations.iter());
    let branch = match answers.has_time {
        Some(true) => "optional",
        Some(false) => "hurry",
        None => "unfinished",
    };
    format!(
        "{}  {when}  {}/5 {:<11}  {visit:<10}  [{branch}]  {stations}",
        submission.short_id(),
        answers.satisfaction,
        catalog::satisfaction_label(answers.satisfaction),
    )
}

/// Comma-separated display labels for a set of tokens.
fn format_tokens<'a>(
    tokens: &[catalog::Token],
    values: impl Iterator<Item = &'a String>,
) -> String {
    let labels: Vec<&str> = values.map(|v| catalog::label_for(tokens, v)).collect();
    if labels.is_empty() {
        "-".to_string()
    } else {
        labels.join(", ")
    }
}
