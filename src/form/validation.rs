use std::fmt;
use std::rc::Rc;

use crate::domain::is_well_formed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
    pub level: Level,
}

impl ValidationResult {
    pub fn valid(level: Level) -> Self {
        Self {
            is_valid: true,
            message: None,
            level,
        }
    }

    pub fn invalid(message: Option<String>, level: Level) -> Self {
        Self {
            is_valid: false,
            message,
            level,
        }
    }
}

#[derive(Clone)]
pub enum RuleKind {
    /// Structural phone-number check (see `domain::phone`).
    PhoneNumber,
    NotEmpty,
    /// Arbitrary predicate over the field's text.
    Custom(Rc<dyn Fn(&str) -> bool>),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::PhoneNumber => f.write_str("PhoneNumber"),
            RuleKind::NotEmpty => f.write_str("NotEmpty"),
            RuleKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub kind: RuleKind,
    pub message: Option<String>,
    pub level: Level,
}

impl ValidationRule {
    pub fn phone_number() -> Self {
        Self {
            kind: RuleKind::PhoneNumber,
            message: None,
            level: Level::Error,
        }
    }

    pub fn not_empty() -> Self {
        Self {
            kind: RuleKind::NotEmpty,
            message: None,
            level: Level::Error,
        }
    }

    pub fn custom(check: impl Fn(&str) -> bool + 'static) -> Self {
        Self {
            kind: RuleKind::Custom(Rc::new(check)),
            message: None,
            level: Level::Error,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn passes(&self, text: &str) -> bool {
        match &self.kind {
            RuleKind::PhoneNumber => is_well_formed(text),
            RuleKind::NotEmpty => !text.trim().is_empty(),
            RuleKind::Custom(check) => check(text),
        }
    }
}

/// Runs `rules` in list order against `text`, considering only rules at
/// the requested `level`, and short-circuits on the first failure. Never
/// fails itself: absence of a match is an invalid result, not an error.
pub fn check_validity(text: &str, rules: &[ValidationRule], level: Level) -> ValidationResult {
    for rule in rules.iter().filter(|rule| rule.level == level) {
        if !rule.passes(text) {
            return ValidationResult::invalid(rule.message.clone(), level);
        }
    }
    ValidationResult::valid(level)
}
