//! Option catalogue: the tokens each question offers and how they read.

/// A selectable option: stored token and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub value: &'static str,
    pub label: &'static str,
}

const fn token(value: &'static str, label: &'static str) -> Token {
    Token { value, label }
}

pub const STATIONS: &[Token] = &[
    token("grill", "Grill"),
    token("pizza", "Pizza"),
    token("deli", "Deli"),
    token("salad-bar", "Salad bar"),
    token("global", "Global kitchen"),
    token("dessert", "Desserts"),
];

pub const WHAT_NAILED_IT: &[Token] = &[
    token("taste", "Taste"),
    token("portion", "Portion size"),
    token("freshness", "Freshness"),
    token("speed", "Speed of service"),
    token("variety", "Variety"),
    token("staff", "Friendly staff"),
];

pub const LINE_WAIT: &[Token] = &[
    token("under-2", "Under 2 minutes"),
    token("2-to-5", "2–5 minutes"),
    token("5-to-10", "5–10 minutes"),
    token("over-10", "Over 10 minutes"),
];

pub const VISIT_FREQUENCY: &[Token] = &[
    token("daily", "Every day"),
    token("few-times-a-week", "A few times a week"),
    token("weekly", "About once a week"),
    token("rarely", "Rarely"),
];

/// Rating labels for satisfaction values 1–5.
pub const SATISFACTION_LABELS: [&str; 5] = ["Terrible", "Meh", "Okay", "Tasty", "Chef's Kiss"];

/// Look up the display label for a token, falling back to the raw value.
pub fn label_for<'a>(tokens: &[Token], value: &'a str) -> &'a str {
    tokens
        .iter()
        .find(|t| t.value == value)
        .map_or(value, |t| t.label)
}

/// Label for a 1–5 satisfaction value. Out-of-range values are clamped.
pub fn satisfaction_label(value: u8) -> &'static str {
    let index = usize::from(value.clamp(1, 5)) - 1;
    SATISFACTION_LABELS[index]
}

/// The token after `current` in `tokens`, wrapping; the first token when unset.
pub fn cycle_next(tokens: &[Token], current: &str) -> &'static str {
    match tokens.iter().position(|t| t.value == current) {
        Some(i) => tokens[(i + 1) % tokens.len()].value,
        None => tokens[0].value,
    }
}

/// The token before `current` in `tokens`, wrapping; the last token when unset.
pub fn cycle_prev(tokens: &[Token], current: &str) -> &'static str {
    match tokens.iter().position(|t| t.value == current) {
        Some(0) | None => tokens[tokens.len() - 1].value,
        Some(i) => tokens[i - 1].value,
    }
}
