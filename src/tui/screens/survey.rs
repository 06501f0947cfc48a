//! Survey screen: renders the stepper one panel at a time and maps keys onto it.
//!
//! Each panel is a list of focusable rows. Arrow keys move focus, Enter or
//! space activates the focused row, and typed characters go into a focused
//! text field. Tab is the forward control, Esc the back control.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Gauge, Padding, Paragraph},
};
use tracing::debug;

use crate::delay::Delayed;
use crate::model::catalog::{self, Token};
use crate::model::{Dropdown, MAX_RATING, Submission, TextField, TimeOfVisit};
use crate::stepper::{LAST_STEP, Phase, Stepper};
use crate::summary;
use crate::tui::palette::Palette;

/// Which surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Welcome,
    Step(usize),
    Optional,
    Confirmation,
}

/// A focusable row within a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Start,
    TimeOfVisit(TimeOfVisit),
    Station(&'static Token),
    NailedIt(&'static Token),
    DietaryNeeds(bool),
    Text(TextField),
    Satisfaction,
    TimeBranch(bool),
    LineWait,
    Cleanliness,
    VisitFrequency,
    TriedNew(bool),
    Submit,
    BackToSteps,
    StartOver,
}

impl Row {
    /// Heading shown above the first row of each question.
    fn heading(self) -> &'static str {
        match self {
            Self::Start | Self::StartOver | Self::Submit | Self::BackToSteps => "",
            Self::TimeOfVisit(_) => "When did you drop by?",
            Self::Station(_) => "Which stations did you hit? (pick all that apply)",
            Self::NailedIt(_) => "What nailed it? (pick all that apply)",
            Self::DietaryNeeds(_) => "Any dietary needs?",
            Self::Text(TextField::DietaryHandling) => "How well did we handle them?",
            Self::Satisfaction => "How was it overall?",
            Self::TimeBranch(_) => "Got another minute?",
            Self::Text(TextField::Improvements) => "What could we do better?",
            Self::LineWait => "How long did you wait in line?",
            Self::Cleanliness => "How clean was the dining area?",
            Self::VisitFrequency => "How often do you eat with us?",
            Self::TriedNew(_) => "Did you try something new today?",
            Self::Text(TextField::NewItem) => "What did you try?",
            Self::Text(TextField::Wishlist) => "What should we add to the menu?",
            Self::Text(TextField::FavoriteDish) => "Your all-time favorite dish?",
            Self::Text(TextField::Email) => "Email (optional, for menu updates)",
        }
    }
}

pub struct SurveyScreen {
    stepper: Stepper,
    focus: usize,
    panel: Panel,
    analysis: Option<Delayed<String>>,
    analysis_delay: Duration,
}

impl SurveyScreen {
    pub fn new(analysis_delay: Duration) -> Self {
        Self {
            stepper: Stepper::new(),
            focus: 0,
            panel: Panel::Welcome,
            analysis: None,
            analysis_delay,
        }
    }

    #[cfg(test)]
    fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    /// Whether a bare `q` should quit rather than be typed.
    pub fn accepts_quit(&self) -> bool {
        matches!(self.panel, Panel::Welcome | Panel::Confirmation)
    }

    pub fn move_up(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.focus + 1 < self.rows().len() {
            self.focus += 1;
        }
    }

    /// Handle a typed character. Space activates non-text rows.
    pub fn on_char(&mut self, c: char) -> Option<Submission> {
        match self.focused() {
            Some(Row::Text(field)) => {
                self.stepper.edit_text(field, |text| text.push(c));
                None
            }
            Some(row) if c == ' ' => self.activate(row),
            _ => None,
        }
    }

    pub fn on_backspace(&mut self) {
        if let Some(Row::Text(field)) = self.focused() {
            self.stepper.edit_text(field, |text| {
                text.pop();
            });
        }
    }

    /// Handle Enter. Returns the submission when this completes the survey.
    pub fn on_enter(&mut self) -> Option<Submission> {
        match self.focused()? {
            Row::Text(_) => {
                self.move_down();
                None
            }
            row => self.activate(row),
        }
    }

    /// Decrease a rating or step a dropdown backwards.
    pub fn on_left(&mut self) {
        self.adjust(false);
    }

    /// Increase a rating or step a dropdown forwards.
    pub fn on_right(&mut self) {
        self.adjust(true);
    }

    /// The forward control. At the last step it sends the survey as-is.
    pub fn on_next(&mut self) -> Option<Submission> {
        let submission = if self.stepper.step() == LAST_STEP {
            self.stepper.choose_time_branch(false)
        } else {
            self.stepper.advance();
            None
        };
        self.sync();
        submission
    }

    /// The back control. From the optional questions it returns to step 5.
    pub fn on_back(&mut self) {
        match self.panel {
            Panel::Optional => {
                self.stepper.return_from_optional();
            }
            Panel::Step(_) => {
                self.stepper.retreat();
            }
            Panel::Welcome | Panel::Confirmation => {}
        }
        self.sync();
    }

    /// How long the event loop may sleep before something on screen changes.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.analysis
            .as_ref()
            .and_then(|a| a.remaining_at(now))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Text for the confirmation panel, or `None` if no submission is pending.
    pub fn analysis_text(&self, now: Instant) -> Option<&str> {
        let analysis = self.analysis.as_ref()?;
        Some(
            analysis
                .ready_at(now)
                .map_or(summary::ANALYZING, String::as_str),
        )
    }

    fn focused(&self) -> Option<Row> {
        self.rows().get(self.focus).copied()
    }

    fn activate(&mut self, row: Row) -> Option<Submission> {
        let mut submission = None;
        match row {
            Row::Start => {
                self.stepper.advance();
            }
            Row::TimeOfVisit(time) => self.stepper.select_time_of_visit(time),
            Row::Station(token) => {
                self.stepper.toggle_station(token.value);
            }
            Row::NailedIt(token) => {
                self.stepper.toggle_what_nailed_it(token.value);
            }
            Row::DietaryNeeds(needs) => self.stepper.set_dietary_needs(needs),
            Row::TimeBranch(has_time) => submission = self.stepper.choose_time_branch(has_time),
            Row::LineWait | Row::VisitFrequency => self.adjust(true),
            Row::TriedNew(tried) => self.stepper.set_tried_new(tried),
            Row::Submit => submission = self.stepper.submit(),
            Row::BackToSteps => {
                self.stepper.return_from_optional();
            }
            Row::StartOver => self.start_over(),
            Row::Text(_) | Row::Satisfaction | Row::Cleanliness => {}
        }
        self.sync();
        submission
    }

    fn adjust(&mut self, up: bool) {
        let answers = self.stepper.answers();
        match self.focused() {
            Some(Row::Satisfaction) => {
                let value = step_rating(answers.satisfaction, up);
                self.stepper.set_satisfaction(value);
            }
            Some(Row::Cleanliness) => {
                let value = step_rating(answers.cleanliness, up);
                self.stepper.set_cleanliness(value);
            }
            Some(Row::LineWait) => {
                let next = cycle(catalog::LINE_WAIT, answers.dropdown(Dropdown::LineWait), up);
                self.stepper.set_dropdown(Dropdown::LineWait, next);
            }
            Some(Row::VisitFrequency) => {
                let current = answers.dropdown(Dropdown::VisitFrequency);
                let next = cycle(catalog::VISIT_FREQUENCY, current, up);
                self.stepper.set_dropdown(Dropdown::VisitFrequency, next);
            }
            _ => {}
        }
    }

    fn start_over(&mut self) {
        if let Some(mut analysis) = self.analysis.take() {
            analysis.cancel();
        }
        self.stepper.reset();
    }

    /// Reconcile screen state with the stepper after a change.
    fn sync(&mut self) {
        let panel = self.current_panel();
        if panel != self.panel {
            debug!(from = ?self.panel, to = ?panel, "panel changed");
            self.panel = panel;
            self.focus = 0;
        }
        if let Some(submission) = self.stepper.submitted()
            && self.analysis.is_none()
        {
            let message = summary::analyze(&submission.answers, &mut rand::thread_rng());
            self.analysis = Some(Delayed::new(message, self.analysis_delay));
        }
        let last = self.rows().len().saturating_sub(1);
        self.focus = self.focus.min(last);
    }

    fn current_panel(&self) -> Panel {
        match self.stepper.phase() {
            Phase::Submitted(_) => Panel::Confirmation,
            Phase::Optional => Panel::Optional,
            Phase::Stepping if self.stepper.is_welcome() => Panel::Welcome,
            Phase::Stepping => Panel::Step(self.stepper.step()),
        }
    }

    fn rows(&self) -> Vec<Row> {
        let answers = self.stepper.answers();
        match self.panel {
            Panel::Welcome => vec![Row::Start],
            Panel::Step(1) => TimeOfVisit::ALL.into_iter().map(Row::TimeOfVisit).collect(),
            Panel::Step(2) => catalog::STATIONS.iter().map(Row::Station).collect(),
            Panel::Step(3) => catalog::WHAT_NAILED_IT.iter().map(Row::NailedIt).collect(),
            Panel::Step(4) => {
                let mut rows = vec![Row::DietaryNeeds(true), Row::DietaryNeeds(false)];
                if answers.dietary_needs == Some(true) {
                    rows.push(Row::Text(TextField::DietaryHandling));
                }
                rows
            }
            Panel::Step(_) => vec![
                Row::Satisfaction,
                Row::TimeBranch(false),
                Row::TimeBranch(true),
            ],
            Panel::Optional => {
                let mut rows = vec![
                    Row::Text(TextField::Improvements),
                    Row::LineWait,
                    Row::Cleanliness,
                    Row::VisitFrequency,
                    Row::TriedNew(true),
                    Row::TriedNew(false),
                ];
                if answers.tried_new == Some(true) {
                    rows.push(Row::Text(TextField::NewItem));
                }
                rows.extend([
                    Row::Text(TextField::Wishlist),
                    Row::Text(TextField::FavoriteDish),
                    Row::Text(TextField::Email),
                    Row::Submit,
                    Row::BackToSteps,
                ]);
                rows
            }
            Panel::Confirmation => vec![Row::StartOver],
        }
    }

    /// Display text for a row, without focus decoration.
    fn row_text(&self, row: Row) -> String {
        let answers = self.stepper.answers();
        match row {
            Row::Start => "Start the survey".to_string(),
            Row::TimeOfVisit(time) => {
                radio(answers.time_of_visit == Some(time), time.label())
            }
            Row::Station(token) => checkbox(answers.stations.contains(token.value), token.label),
            Row::NailedIt(token) => {
                checkbox(answers.what_nailed_it.contains(token.value), token.label)
            }
            Row::DietaryNeeds(needs) => radio(answers.dietary_needs == Some(needs), yes_no(needs)),
            Row::TriedNew(tried) => radio(answers.tried_new == Some(tried), yes_no(tried)),
            Row::TimeBranch(false) => radio(
                answers.has_time == Some(false),
                "I'm in a hurry, send it now",
            ),
            Row::TimeBranch(true) => radio(
                answers.has_time == Some(true),
                "Sure, ask me a few more",
            ),
            Row::Text(field) => answers.text(field).to_string(),
            Row::Satisfaction => format!(
                "‹ {} ›  {}",
                answers.satisfaction,
                catalog::satisfaction_label(answers.satisfaction)
            ),
            Row::Cleanliness => format!("‹ {} ›", stars(answers.cleanliness)),
            Row::LineWait => {
                dropdown_text(catalog::LINE_WAIT, answers.dropdown(Dropdown::LineWait))
            }
            Row::VisitFrequency => dropdown_text(
                catalog::VISIT_FREQUENCY,
                answers.dropdown(Dropdown::VisitFrequency),
            ),
            Row::Submit => "✈ Send Feedback".to_string(),
            Row::BackToSteps => "← Back to step 5".to_string(),
            Row::StartOver => "Start over".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame, palette: &Palette) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Length(1), // progress
            Constraint::Min(0),    // content
            Constraint::Length(1), // nav
            Constraint::Length(1), // help
        ])
        .split(area);

        // Header: step counter or panel title.
        let title = match self.panel {
            Panel::Welcome | Panel::Step(_) => self.stepper.step_counter(),
            Panel::Optional => "A few more questions".to_string(),
            Panel::Confirmation => "Thanks for the feedback!".to_string(),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Tastecheck  ", palette.muted),
            Span::styled(title, palette.highlight),
        ]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(header, chunks[0]);

        // Progress only on the numbered panels.
        if let (Panel::Step(_), Some(ratio)) = (self.panel, self.stepper.progress()) {
            let gauge = Gauge::default()
                .gauge_style(palette.gauge)
                .ratio(ratio)
                .label(format!("{:.0}%", ratio * 100.0))
                .block(Block::default().padding(Padding::new(2, 2, 0, 0)));
            frame.render_widget(gauge, chunks[1]);
        }

        // Content.
        let content_block = Block::default().padding(Padding::new(2, 2, 1, 0));
        let visible = content_block.inner(chunks[2]).height as usize;
        let (lines, focus_line) = self.content_lines(palette);
        let offset = focus_line.map_or(0, |i| (i + 1).saturating_sub(visible));
        let lines: Vec<Line> = lines.into_iter().skip(offset).collect();
        frame.render_widget(Paragraph::new(lines).block(content_block), chunks[2]);

        // Nav controls on the numbered panels.
        if let Panel::Step(_) = self.panel {
            let nav = self.stepper.nav();
            let style_for = |enabled: bool| {
                if enabled {
                    palette.highlight
                } else {
                    palette.disabled
                }
            };
            let line = Line::from(vec![
                Span::styled("  ← Back", style_for(nav.back_enabled)),
                Span::styled("    ", palette.muted),
                Span::styled(nav.next_label, style_for(nav.next_enabled)),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[3]);
        }

        let help = match self.panel {
            Panel::Welcome => " ⏎ start  q quit",
            Panel::Step(_) => " ↑↓ move  ⏎/space select  ←→ adjust  tab next  esc back",
            Panel::Optional => " ↑↓ move  ⏎ select  ←→ adjust  esc back to step 5",
            Panel::Confirmation => " ⏎ start over  q quit",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(help, palette.muted))),
            chunks[4],
        );
    }

    /// Content lines for the current panel, and the index of the focused row's line.
    fn content_lines(&self, palette: &Palette) -> (Vec<Line<'static>>, Option<usize>) {
        let mut lines = Vec::new();
        let mut focus_line = None;

        match self.panel {
            Panel::Welcome => {
                lines.push(Line::from(Span::styled(
                    "Tell us how your meal went. Five quick steps, no sign-up.",
                    palette.normal,
                )));
                lines.push(Line::default());
            }
            Panel::Confirmation => {
                let text = self.analysis_text(Instant::now()).unwrap_or_default();
                lines.push(Line::from(Span::styled(text.to_string(), palette.normal)));
                lines.push(Line::default());
            }
            Panel::Step(_) | Panel::Optional => {}
        }

        let mut heading = "";
        for (i, row) in self.rows().into_iter().enumerate() {
            if row.heading() != heading {
                heading = row.heading();
                if !lines.is_empty() {
                    lines.push(Line::default());
                }
                if !heading.is_empty() {
                    lines.push(Line::from(Span::styled(heading, palette.muted)));
                }
            }

            let focused = i == self.focus;
            if focused {
                focus_line = Some(lines.len());
            }
            let style = if focused {
                palette.highlight
            } else if self.is_chosen(row) {
                palette.selected
            } else {
                palette.normal
            };
            let pointer = if focused { "› " } else { "  " };
            let mut spans = vec![
                Span::styled(pointer, style),
                Span::styled(self.row_text(row), style),
            ];
            if focused && matches!(row, Row::Text(_)) {
                spans.push(Span::styled("█", palette.muted));
            }
            lines.push(Line::from(spans));
        }

        (lines, focus_line)
    }

    /// Whether a choice row is currently selected.
    fn is_chosen(&self, row: Row) -> bool {
        let answers = self.stepper.answers();
        match row {
            Row::TimeOfVisit(time) => answers.time_of_visit == Some(time),
            Row::Station(token) => answers.stations.contains(token.value),
            Row::NailedIt(token) => answers.what_nailed_it.contains(token.value),
            Row::DietaryNeeds(needs) => answers.dietary_needs == Some(needs),
            Row::TriedNew(tried) => answers.tried_new == Some(tried),
            Row::TimeBranch(has_time) => answers.has_time == Some(has_time),
            _ => false,
        }
    }
}

fn step_rating(value: u8, up: bool) -> u8 {
    if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    }
}

fn cycle(tokens: &[Token], current: &str, forward: bool) -> &'static str {
    if forward {
        catalog::cycle_next(tokens, current)
    } else {
        catalog::cycle_prev(tokens, current)
    }
}

fn radio(selected: bool, label: &str) -> String {
    let mark = if selected { "(•)" } else { "( )" };
    format!("{mark} {label}")
}

fn checkbox(selected: bool, label: &str) -> String {
    let mark = if selected { "[x]" } else { "[ ]" };
    format!("{mark} {label}")
}

fn yes_no(answer: bool) -> &'static str {
    if answer { "Yes" } else { "No" }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    let empty = usize::from(MAX_RATING) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

fn dropdown_text(tokens: &[Token], value: &str) -> String {
    if value.is_empty() {
        "‹ choose ›".to_string()
    } else {
        format!("‹ {} ›", catalog::label_for(tokens, value))
    }
}
