use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

use super::validation::{Level, ValidationResult, ValidationRule, check_validity};

/// Horizontal room a field needs beyond its widest content: one cell for
/// the cursor, one trailing gap.
const FIELD_PADDING: u16 = 2;

pub type ValueChanged = Box<dyn FnMut(&str)>;

/// Text, placeholder, and validation state of one sub-field. Instances
/// are owned by the `PhoneField` controller and only mutated through it.
pub struct FieldState {
    text: String,
    placeholder: Option<String>,
    help_text: Option<String>,
    has_been_edited: bool,
    focused: bool,
    rules: Vec<ValidationRule>,
    last_result: Option<ValidationResult>,
    value_changed: Option<ValueChanged>,
}

impl FieldState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            placeholder: None,
            help_text: None,
            has_been_edited: false,
            focused: false,
            rules: Vec::new(),
            last_result: None,
            value_changed: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Programmatic assignment; never marks the field as edited and
    /// never validates.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn set_help_text(&mut self, help_text: Option<String>) {
        self.help_text = help_text;
    }

    pub fn has_been_edited(&self) -> bool {
        self.has_been_edited
    }

    /// Display width the field needs to show its content: the wider of
    /// text and placeholder, since the floating label must fit either.
    pub fn content_width(&self) -> u16 {
        let text_width = UnicodeWidthStr::width(self.text.as_str());
        let placeholder_width = self
            .placeholder
            .as_deref()
            .map(UnicodeWidthStr::width)
            .unwrap_or(0);
        (text_width.max(placeholder_width) as u16).saturating_add(FIELD_PADDING)
    }

    /// Applies one key event to the text buffer. Returns whether the key
    /// edited the field; an accepted edit marks the field edited and
    /// fires the value-changed callback.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let edited = match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                self.text.push(ch);
                true
            }
            KeyCode::Backspace => {
                self.text.pop();
                true
            }
            KeyCode::Delete => {
                self.text.clear();
                true
            }
            _ => false,
        };
        if edited {
            self.after_edit();
        }
        edited
    }

    fn after_edit(&mut self) {
        self.has_been_edited = true;
        if let Some(callback) = self.value_changed.as_mut() {
            callback(&self.text);
        }
    }

    pub fn set_value_changed(&mut self, callback: impl FnMut(&str) + 'static) {
        self.value_changed = Some(Box::new(callback));
    }

    /// Runs the field's own rules at `Error` level and caches the
    /// verdict. Only `last_result` changes; the text never does.
    pub fn validate(&mut self) {
        self.last_result = Some(check_validity(&self.text, &self.rules, Level::Error));
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    pub(crate) fn set_last_result(&mut self, result: ValidationResult) {
        self.last_result = Some(result);
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Vec<ValidationRule>) {
        self.rules = rules;
    }

    /// The primary rule, by contract the rule at list position 0.
    pub fn validation(&self) -> Option<&ValidationRule> {
        self.rules.first()
    }

    /// Replaces the primary rule; `None` removes it. Rules past position
    /// 0 are untouched.
    pub fn set_validation(&mut self, rule: Option<ValidationRule>) {
        match rule {
            Some(rule) => {
                if self.rules.is_empty() {
                    self.rules.push(rule);
                } else {
                    self.rules[0] = rule;
                }
            }
            None => {
                if !self.rules.is_empty() {
                    self.rules.remove(0);
                }
            }
        }
    }

    pub fn can_focus(&self) -> bool {
        true
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn can_blur(&self) -> bool {
        true
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("text", &self.text)
            .field("placeholder", &self.placeholder)
            .field("has_been_edited", &self.has_been_edited)
            .field("focused", &self.focused)
            .field("rules", &self.rules)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}
