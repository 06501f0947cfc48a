//! Survey answers: the single record one survey session fills in.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default for the 1–5 ratings (satisfaction, cleanliness).
pub const DEFAULT_RATING: u8 = 3;

/// Lowest value a rating can take.
pub const MIN_RATING: u8 = 1;

/// Highest value a rating can take.
pub const MAX_RATING: u8 = 5;

/// Everything collected during one survey session.
///
/// Fields are public for reading; mutation goes through [`crate::stepper::Stepper`],
/// which owns the record and keeps its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyState {
    /// Current position: 0 is the welcome view, 1..=5 are feedback steps.
    pub step: usize,

    pub time_of_visit: Option<TimeOfVisit>,

    /// Station tokens the respondent visited.
    pub stations: BTreeSet<String>,

    /// Tokens for what the respondent liked most.
    pub what_nailed_it: BTreeSet<String>,

    pub dietary_needs: Option<bool>,

    /// Only meaningful when `dietary_needs` is `Some(true)`.
    pub dietary_handling: String,

    /// Overall rating, 1–5.
    pub satisfaction: u8,

    /// Whether the respondent opted into the optional questions.
    pub has_time: Option<bool>,

    // Optional branch.
    pub improvements: String,
    pub line_wait: String,
    /// Cleanliness rating, 1–5.
    pub cleanliness: u8,
    pub visit_frequency: String,
    pub tried_new: Option<bool>,
    /// Only meaningful when `tried_new` is `Some(true)`.
    pub new_item: String,
    pub wishlist: String,
    pub favorite_dish: String,
    /// Not format-checked.
    pub email: String,
}

impl Default for SurveyState {
    fn default() -> Self {
        Self {
            step: 0,
            time_of_visit: None,
            stations: BTreeSet::new(),
            what_nailed_it: BTreeSet::new(),
            dietary_needs: None,
            dietary_handling: String::new(),
            satisfaction: DEFAULT_RATING,
            has_time: None,
            improvements: String::new(),
            line_wait: String::new(),
            cleanliness: DEFAULT_RATING,
            visit_frequency: String::new(),
            tried_new: None,
            new_item: String::new(),
            wishlist: String::new(),
            favorite_dish: String::new(),
            email: String::new(),
        }
    }
}

/// When the respondent came by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfVisit {
    Breakfast,
    Lunch,
    Dinner,
    LateNight,
}

impl TimeOfVisit {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::LateNight];

    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::LateNight => "Late night",
        }
    }
}

impl fmt::Display for TimeOfVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-text fields the respondent can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    DietaryHandling,
    Improvements,
    NewItem,
    Wishlist,
    FavoriteDish,
    Email,
}

impl TextField {
    /// Whether the field belongs to the optional branch.
    pub fn is_optional(self) -> bool {
        !matches!(self, Self::DietaryHandling)
    }
}

/// Fixed-choice fields in the optional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    LineWait,
    VisitFrequency,
}

impl SurveyState {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::DietaryHandling => &self.dietary_handling,
            TextField::Improvements => &self.improvements,
            TextField::NewItem => &self.new_item,
            TextField::Wishlist => &self.wishlist,
            TextField::FavoriteDish => &self.favorite_dish,
            TextField::Email => &self.email,
        }
    }

    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::DietaryHandling => &mut self.dietary_handling,
            TextField::Improvements => &mut self.improvements,
            TextField::NewItem => &mut self.new_item,
            TextField::Wishlist => &mut self.wishlist,
            TextField::FavoriteDish => &mut self.favorite_dish,
            TextField::Email => &mut self.email,
        }
    }

    pub fn dropdown(&self, dropdown: Dropdown) -> &str {
        match dropdown {
            Dropdown::LineWait => &self.line_wait,
            Dropdown::VisitFrequency => &self.visit_frequency,
        }
    }

    pub(crate) fn dropdown_mut(&mut self, dropdown: Dropdown) -> &mut String {
        match dropdown {
            Dropdown::LineWait => &mut self.line_wait,
            Dropdown::VisitFrequency => &mut self.visit_frequency,
        }
    }

    /// Whether any optional-branch answer differs from its default.
    pub fn has_optional_answers(&self) -> bool {
        let defaults = Self::default();
        self.improvements != defaults.improvements
            || self.line_wait != defaults.line_wait
            || self.cleanliness != defaults.cleanliness
            || self.visit_frequency != defaults.visit_frequency
            || self.tried_new != defaults.tried_new
            || self.new_item != defaults.new_item
            || self.wishlist != defaults.wishlist
            || self.favorite_dish != defaults.favorite_dish
            || self.email != defaults.email
    }

    /// Put every optional-branch answer back to its default.
    pub(crate) fn clear_optional_answers(&mut self) {
        let defaults = Self::default();
        self.improvements = defaults.improvements;
        self.line_wait = defaults.line_wait;
        self.cleanliness = defaults.cleanliness;
        self.visit_frequency = defaults.visit_frequency;
        self.tried_new = defaults.tried_new;
        self.new_item = defaults.new_item;
        self.wishlist = defaults.wishlist;
        self.favorite_dish = defaults.favorite_dish;
        self.email = defaults.email;
    }
}
