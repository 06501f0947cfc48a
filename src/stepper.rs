//! Survey stepper: a linear wizard over six steps with an optional branch.
//!
//! Step 0 is the welcome view; steps 1..=5 are the numbered feedback panels.
//! Forward navigation from a step is gated on that step's validator. From
//! step 5 the respondent either submits straight away ("in a hurry") or opens
//! the optional questions, which submit from their own panel.
//!
//! The stepper owns its [`SurveyState`] outright. Every mutation goes through
//! a method here so the record's invariants hold at all times.

use tracing::{debug, info};

use crate::model::{
    Dropdown, MAX_RATING, MIN_RATING, Submission, SurveyState, TextField, TimeOfVisit,
};

/// Number of steps, welcome included.
pub const TOTAL_STEPS: usize = 6;

/// Index of the final numbered step.
pub const LAST_STEP: usize = TOTAL_STEPS - 1;

/// Label on the forward control for steps before the last.
pub const NEXT_LABEL: &str = "Next →";

/// Label on the forward control at the final step.
pub const SUBMIT_LABEL: &str = "Send Feedback • Upgrade My Next Meal";

/// Which surface the stepper is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// The welcome view (step 0) or one of the numbered panels.
    Stepping,

    /// The optional-questions surface. The step stays pinned at 5.
    Optional,

    /// A submission is awaiting acknowledgement.
    ///
    /// Boxed to keep variant sizes balanced.
    Submitted(Box<Submission>),
}

/// Forward/back control state for the numbered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nav {
    pub back_enabled: bool,
    pub next_enabled: bool,
    pub next_label: &'static str,
}

type Validator = fn(&SurveyState) -> bool;

/// Per-step validators, indexed by step.
const VALIDATORS: [Validator; TOTAL_STEPS] = [
    |_| true,
    |s| s.time_of_visit.is_some(),
    |s| !s.stations.is_empty(),
    |s| !s.what_nailed_it.is_empty(),
    |s| s.dietary_needs.is_some(),
    |_| true,
];

/// Whether `state` satisfies the validator for `step`.
///
/// Steps outside the wizard have no requirements.
pub fn validate(state: &SurveyState, step: usize) -> bool {
    VALIDATORS.get(step).is_none_or(|check| check(state))
}

/// The survey wizard controller.
#[derive(Debug, Clone)]
pub struct Stepper {
    state: SurveyState,
    phase: Phase,
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stepper {
    pub fn new() -> Self {
        Self {
            state: SurveyState::default(),
            phase: Phase::Stepping,
        }
    }

    pub fn answers(&self) -> &SurveyState {
        &self.state
    }

    pub fn step(&self) -> usize {
        self.state.step
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the welcome view is showing.
    pub fn is_welcome(&self) -> bool {
        self.phase == Phase::Stepping && self.state.step == 0
    }

    /// The pending submission, if one awaits acknowledgement.
    pub fn submitted(&self) -> Option<&Submission> {
        match &self.phase {
            Phase::Submitted(submission) => Some(submission),
            _ => None,
        }
    }

    /// Whether the current step's validator passes.
    pub fn is_valid(&self) -> bool {
        validate(&self.state, self.state.step)
    }

    // ── Navigation ──

    /// Move forward one step. Returns whether the step changed.
    ///
    /// Refused when the current step fails validation, at the last step,
    /// and outside the numbered view.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Stepping || self.state.step >= LAST_STEP || !self.is_valid() {
            debug!(step = self.state.step, valid = self.is_valid(), "advance refused");
            return false;
        }
        self.state.step += 1;
        debug!(step = self.state.step, "advanced");
        true
    }

    /// Move back one step. Returns whether the step changed.
    pub fn retreat(&mut self) -> bool {
        if self.phase != Phase::Stepping || self.state.step == 0 {
            return false;
        }
        self.state.step -= 1;
        debug!(step = self.state.step, "retreated");
        true
    }

    /// Answer "got another minute?" at step 5.
    ///
    /// `false` drops any optional answers, submits immediately and returns the
    /// submission. `true` opens the optional questions. Ignored anywhere but
    /// the numbered view at step 5.
    pub fn choose_time_branch(&mut self, has_time: bool) -> Option<Submission> {
        if self.phase != Phase::Stepping || self.state.step != LAST_STEP {
            return None;
        }
        self.state.has_time = Some(has_time);
        if has_time {
            debug!("opened optional questions");
            self.phase = Phase::Optional;
            None
        } else {
            self.state.clear_optional_answers();
            Some(self.freeze())
        }
    }

    /// Leave the optional questions for the step 5 panel. Answers are kept.
    pub fn return_from_optional(&mut self) -> bool {
        if self.phase != Phase::Optional {
            return false;
        }
        self.phase = Phase::Stepping;
        self.state.step = LAST_STEP;
        debug!("returned from optional questions");
        true
    }

    /// Submit from the optional questions.
    ///
    /// Accepted only in [`Phase::Optional`]. The hurry path submits through
    /// [`Self::choose_time_branch`]. Either way the stepper then waits in
    /// [`Phase::Submitted`] until [`Self::reset`].
    pub fn submit(&mut self) -> Option<Submission> {
        if self.phase != Phase::Optional {
            return None;
        }
        Some(self.freeze())
    }

    fn freeze(&mut self) -> Submission {
        let submission = Submission::new(self.state.clone());
        info!(
            id = %submission.id,
            satisfaction = submission.answers.satisfaction,
            has_time = ?submission.answers.has_time,
            optional_answers = submission.answers.has_optional_answers(),
            "survey submitted"
        );
        self.phase = Phase::Submitted(Box::new(submission.clone()));
        submission
    }

    /// Discard all answers and return to the welcome view.
    pub fn reset(&mut self) {
        debug!("stepper reset");
        *self = Self::new();
    }

    // ── Step 1 & 4: single choice ──

    pub fn select_time_of_visit(&mut self, time: TimeOfVisit) {
        self.state.time_of_visit = Some(time);
    }

    /// Answer the dietary-needs question. "No" clears the follow-up text.
    pub fn set_dietary_needs(&mut self, needs: bool) {
        self.state.dietary_needs = Some(needs);
        if !needs {
            self.state.dietary_handling.clear();
        }
    }

    // ── Steps 2 & 3: multi-select ──

    /// Flip a station token's membership. Returns whether it is now selected.
    pub fn toggle_station(&mut self, token: &str) -> bool {
        toggle(&mut self.state.stations, token)
    }

    /// Flip a "what nailed it" token's membership. Returns whether it is now selected.
    pub fn toggle_what_nailed_it(&mut self, token: &str) -> bool {
        toggle(&mut self.state.what_nailed_it, token)
    }

    // ── Step 5 ──

    /// Set the overall rating, clamped to 1–5.
    pub fn set_satisfaction(&mut self, value: u8) {
        self.state.satisfaction = value.clamp(MIN_RATING, MAX_RATING);
    }

    // ── Optional branch ──

    /// Whether optional answers may be recorded.
    fn optional_open(&self) -> bool {
        self.state.has_time == Some(true)
    }

    /// Set the cleanliness rating, clamped to 1–5. Ignored outside the optional branch.
    pub fn set_cleanliness(&mut self, value: u8) {
        if self.optional_open() {
            self.state.cleanliness = value.clamp(MIN_RATING, MAX_RATING);
        }
    }

    /// Answer "tried something new?". "No" clears the follow-up text.
    pub fn set_tried_new(&mut self, tried: bool) {
        if !self.optional_open() {
            return;
        }
        self.state.tried_new = Some(tried);
        if !tried {
            self.state.new_item.clear();
        }
    }

    /// Set a dropdown answer. Ignored outside the optional branch.
    pub fn set_dropdown(&mut self, dropdown: Dropdown, token: &str) {
        if self.optional_open() {
            *self.state.dropdown_mut(dropdown) = token.to_string();
        }
    }

    /// Whether a text field is currently accepting input.
    ///
    /// Follow-up fields only accept input once their "yes" is chosen, and
    /// optional fields only once the optional branch is open.
    pub fn text_enabled(&self, field: TextField) -> bool {
        if field.is_optional() && !self.optional_open() {
            return false;
        }
        match field {
            TextField::DietaryHandling => self.state.dietary_needs == Some(true),
            TextField::NewItem => self.state.tried_new == Some(true),
            _ => true,
        }
    }

    /// Edit a text field in place. Returns whether the edit was accepted.
    pub fn edit_text(&mut self, field: TextField, edit: impl FnOnce(&mut String)) -> bool {
        if !self.text_enabled(field) {
            return false;
        }
        edit(self.state.text_mut(field));
        true
    }

    // ── Presentation ──

    /// Completion ratio for the progress indicator, or `None` on the welcome view.
    ///
    /// Step 1 is 0.0 and step 5 is 1.0.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> Option<f64> {
        let step = self.state.step;
        if step == 0 {
            return None;
        }
        let ratio = (step - 1) as f64 / (TOTAL_STEPS - 2) as f64;
        Some(ratio.clamp(0.0, 1.0))
    }

    /// Step counter text: "Welcome" or "Step N of 5".
    pub fn step_counter(&self) -> String {
        match self.state.step {
            0 => "Welcome".to_string(),
            n => format!("Step {n} of {LAST_STEP}"),
        }
    }

    /// Forward/back control state for the numbered view.
    pub fn nav(&self) -> Nav {
        let step = self.state.step;
        let stepping = self.phase == Phase::Stepping;
        Nav {
            back_enabled: stepping && step > 0,
            next_enabled: stepping && self.is_valid(),
            next_label: if step == LAST_STEP {
                SUBMIT_LABEL
            } else {
                NEXT_LABEL
            },
        }
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, token: &str) -> bool {
    if set.remove(token) {
        false
    } else {
        set.insert(token.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    fn set_text(stepper: &mut Stepper, field: TextField, value: &str) -> bool {
        stepper.edit_text(field, |text| {
            text.clear();
            text.push_str(value);
        })
    }

    /// A stepper advanced to `step` with every earlier step answered.
    fn at_step(step: usize) -> Stepper {
        let mut stepper = Stepper::new();
        stepper.select_time_of_visit(TimeOfVisit::Lunch);
        stepper.toggle_station("grill");
        stepper.toggle_what_nailed_it("taste");
        stepper.set_dietary_needs(false);
        while stepper.step() < step {
            assert!(stepper.advance());
        }
        stepper
    }

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn starts_on_welcome() {
        let stepper = Stepper::new();
        assert!(stepper.is_welcome());
        assert_eq!(stepper.step_counter(), "Welcome");
        assert_eq!(stepper.progress(), None);
        assert!(!stepper.nav().back_enabled);
        assert!(stepper.nav().next_enabled);
    }

    #[test]
    fn time_of_visit_gates_step_one() {
        let mut stepper = Stepper::new();
        assert!(stepper.advance());
        assert_eq!(stepper.step(), 1);
        assert!(!stepper.is_valid());
        assert!(!stepper.nav().next_enabled);

        assert!(!stepper.advance());
        assert_eq!(stepper.step(), 1);

        stepper.select_time_of_visit(TimeOfVisit::Dinner);
        assert!(stepper.nav().next_enabled);
        assert!(stepper.advance());
        assert_eq!(stepper.step(), 2);
    }

    #[test]
    fn each_gated_step_refuses_until_answered() {
        let mut stepper = Stepper::new();
        stepper.advance();

        stepper.select_time_of_visit(TimeOfVisit::Breakfast);
        assert!(stepper.advance());

        assert!(!stepper.advance());
        stepper.toggle_station("deli");
        assert!(stepper.advance());

        assert!(!stepper.advance());
        stepper.toggle_what_nailed_it("speed");
        assert!(stepper.advance());

        assert!(!stepper.advance());
        stepper.set_dietary_needs(true);
        assert!(stepper.advance());
        assert_eq!(stepper.step(), 5);
    }

    #[test]
    fn advance_moves_exactly_one_step_per_call() {
        let mut stepper = at_step(2);
        assert!(stepper.advance());
        assert_eq!(stepper.step(), 3);
    }

    #[test]
    fn advance_is_a_no_op_at_last_step() {
        let mut stepper = at_step(LAST_STEP);
        assert!(stepper.is_valid());
        assert!(!stepper.advance());
        assert_eq!(stepper.step(), LAST_STEP);
        assert_eq!(stepper.nav().next_label, SUBMIT_LABEL);
    }

    #[test]
    fn retreat_returns_to_welcome() {
        let mut stepper = at_step(2);
        assert!(stepper.retreat());
        assert!(stepper.retreat());
        assert!(stepper.is_welcome());
        assert!(!stepper.retreat());
        // Answers survive going back.
        assert_eq!(stepper.answers().stations, set(&["grill"]));
    }

    #[test]
    fn stations_toggle_membership() {
        let mut stepper = Stepper::new();
        stepper.advance();
        stepper.select_time_of_visit(TimeOfVisit::Lunch);
        stepper.advance();
        assert_eq!(stepper.step(), 2);
        assert!(!stepper.is_valid());

        assert!(stepper.toggle_station("A"));
        assert!(stepper.toggle_station("B"));
        assert_eq!(stepper.answers().stations, set(&["A", "B"]));

        assert!(!stepper.toggle_station("A"));
        assert_eq!(stepper.answers().stations, set(&["B"]));
        assert!(stepper.is_valid());
    }

    #[test]
    fn toggling_twice_restores_the_set() {
        let mut stepper = Stepper::new();
        stepper.toggle_what_nailed_it("variety");
        let before = stepper.answers().what_nailed_it.clone();

        stepper.toggle_what_nailed_it("taste");
        stepper.toggle_what_nailed_it("taste");
        assert_eq!(stepper.answers().what_nailed_it, before);

        stepper.toggle_what_nailed_it("variety");
        stepper.toggle_what_nailed_it("variety");
        assert_eq!(stepper.answers().what_nailed_it, before);
    }

    #[test]
    fn dietary_no_clears_handling() {
        let mut stepper = Stepper::new();
        assert!(!set_text(&mut stepper, TextField::DietaryHandling, "ignored"));

        stepper.set_dietary_needs(true);
        assert!(set_text(&mut stepper, TextField::DietaryHandling, "Vegan, handled well"));
        assert_eq!(stepper.answers().dietary_handling, "Vegan, handled well");

        stepper.set_dietary_needs(false);
        assert_eq!(stepper.answers().dietary_handling, "");
        assert_eq!(stepper.answers().dietary_needs, Some(false));
        assert!(!stepper.text_enabled(TextField::DietaryHandling));
    }

    #[test]
    fn tried_new_no_clears_new_item() {
        let mut stepper = at_step(LAST_STEP);
        assert!(stepper.choose_time_branch(true).is_none());

        stepper.set_tried_new(true);
        assert!(set_text(&mut stepper, TextField::NewItem, "Ramen"));
        stepper.set_tried_new(false);
        assert_eq!(stepper.answers().new_item, "");
        assert!(!set_text(&mut stepper, TextField::NewItem, "Ramen"));
    }

    #[test]
    fn ratings_clamp() {
        let mut stepper = at_step(LAST_STEP);
        stepper.set_satisfaction(0);
        assert_eq!(stepper.answers().satisfaction, 1);
        stepper.set_satisfaction(7);
        assert_eq!(stepper.answers().satisfaction, 5);

        stepper.choose_time_branch(true);
        stepper.set_cleanliness(42);
        assert_eq!(stepper.answers().cleanliness, 5);
    }

    #[test]
    fn hurry_submits_without_optional_branch() {
        let mut stepper = at_step(LAST_STEP);
        let submission = stepper.choose_time_branch(false).expect("hurry submits");

        assert_eq!(submission.answers.has_time, Some(false));
        assert!(!submission.answers.has_optional_answers());
        assert!(matches!(stepper.phase(), Phase::Submitted(_)));
        assert_eq!(stepper.submitted().map(|s| s.id), Some(submission.id));
    }

    #[test]
    fn optional_branch_answers_reach_the_payload() {
        let mut stepper = at_step(LAST_STEP);
        assert!(stepper.choose_time_branch(true).is_none());
        assert_eq!(stepper.phase(), &Phase::Optional);
        assert_eq!(stepper.step(), LAST_STEP);

        assert!(set_text(&mut stepper, TextField::FavoriteDish, "Mochi"));
        stepper.set_dropdown(Dropdown::LineWait, "2-to-5");
        let submission = stepper.submit().expect("optional branch submits");

        assert_eq!(submission.answers.favorite_dish, "Mochi");
        assert_eq!(submission.answers.line_wait, "2-to-5");
        assert_eq!(submission.answers.has_time, Some(true));
    }

    #[test]
    fn optional_answers_rejected_before_branch_opens() {
        let mut stepper = at_step(LAST_STEP);
        assert!(!set_text(&mut stepper, TextField::FavoriteDish, "Mochi"));
        stepper.set_cleanliness(5);
        stepper.set_dropdown(Dropdown::VisitFrequency, "daily");
        assert!(!stepper.answers().has_optional_answers());
    }

    #[test]
    fn returning_from_optional_keeps_answers() {
        let mut stepper = at_step(LAST_STEP);
        stepper.choose_time_branch(true);
        set_text(&mut stepper, TextField::Wishlist, "More dumplings");

        assert!(stepper.return_from_optional());
        assert_eq!(stepper.phase(), &Phase::Stepping);
        assert_eq!(stepper.step(), LAST_STEP);
        assert_eq!(stepper.answers().wishlist, "More dumplings");
        assert!(!stepper.return_from_optional());
    }

    #[test]
    fn navigation_is_frozen_in_optional_branch() {
        let mut stepper = at_step(LAST_STEP);
        stepper.choose_time_branch(true);
        assert!(!stepper.retreat());
        assert!(!stepper.advance());
        assert!(!stepper.nav().back_enabled);
    }

    #[test]
    fn time_branch_only_at_last_step() {
        let mut stepper = at_step(3);
        assert!(stepper.choose_time_branch(false).is_none());
        assert_eq!(stepper.answers().has_time, None);
        assert!(stepper.submit().is_none());
    }

    #[test]
    fn hurry_after_optional_round_trip_drops_optional_answers() {
        let mut stepper = at_step(LAST_STEP);
        stepper.choose_time_branch(true);
        set_text(&mut stepper, TextField::FavoriteDish, "Mochi");
        stepper.set_cleanliness(1);
        stepper.set_tried_new(true);
        set_text(&mut stepper, TextField::NewItem, "Bao");
        stepper.return_from_optional();
        assert_eq!(stepper.answers().favorite_dish, "Mochi");

        let submission = stepper.choose_time_branch(false).expect("hurry submits");
        assert_eq!(submission.answers.has_time, Some(false));
        assert!(!submission.answers.has_optional_answers());
        assert_eq!(submission.answers.favorite_dish, "");
        assert!(submission.answers.stations.contains("grill"));
    }

    #[test]
    fn submit_requires_optional_branch() {
        let mut stepper = at_step(LAST_STEP);
        assert!(stepper.submit().is_none());
        assert_eq!(stepper.answers().has_time, None);
        assert_eq!(stepper.phase(), &Phase::Stepping);

        stepper.choose_time_branch(true);
        stepper.return_from_optional();
        assert!(stepper.submit().is_none());
    }

    #[test]
    fn submit_only_once_until_reset() {
        let mut stepper = at_step(LAST_STEP);
        stepper.choose_time_branch(true);
        assert!(stepper.submit().is_some());
        assert!(stepper.submit().is_none());
        assert!(stepper.choose_time_branch(false).is_none());

        stepper.reset();
        assert!(stepper.is_welcome());
        assert_eq!(stepper.answers(), &SurveyState::default());
        assert_eq!(stepper.phase(), &Phase::Stepping);
    }

    #[test]
    fn progress_spans_zero_to_one() {
        let mut stepper = at_step(1);
        assert_eq!(stepper.progress(), Some(0.0));

        let mut last = 0.0;
        while stepper.advance() {
            let p = stepper.progress().unwrap();
            assert!(p >= last);
            last = p;
        }
        assert_eq!(stepper.step(), LAST_STEP);
        assert_eq!(stepper.progress(), Some(1.0));
    }

    #[test]
    fn step_counter_text() {
        let stepper = at_step(3);
        assert_eq!(stepper.step_counter(), "Step 3 of 5");
        assert_eq!(stepper.nav().next_label, NEXT_LABEL);
    }

    #[test]
    fn validators_cover_every_step() {
        let empty = SurveyState::default();
        let expected = [true, false, false, false, false, true];
        for (step, want) in expected.into_iter().enumerate() {
            assert_eq!(validate(&empty, step), want, "step {step}");
        }
        assert!(validate(&empty, 99));
    }
}
