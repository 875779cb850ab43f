use crossterm::event::KeyEvent;

use crate::domain::split_number;

use super::field::FieldState;
use super::validation::{Level, ValidationResult, ValidationRule, check_validity};

pub type PrefixHandler = Box<dyn FnMut()>;

/// Construction options for a [`PhoneField`]. `preview` seeds the demo
/// values shown in design-time previews.
#[derive(Debug, Clone, Default)]
pub struct PhoneFieldOptions {
    pub prefix_placeholder: Option<String>,
    pub suffix_placeholder: Option<String>,
    pub help_text: Option<String>,
    pub initial_value: Option<String>,
    pub preview: bool,
}

impl PhoneFieldOptions {
    pub fn with_prefix_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.prefix_placeholder = Some(placeholder.into());
        self
    }

    pub fn with_suffix_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.suffix_placeholder = Some(placeholder.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

/// Composite phone-number field: a prefix sub-field for the calling code
/// and a suffix sub-field for the local number.
///
/// The controller owns both sub-fields and is their only mutation path;
/// the cross-field coupling (prefix changes re-validating the suffix,
/// suffix validity judged against the combined number) breaks if callers
/// mutate sub-field state behind its back, which is why only read access
/// to the sub-fields is exposed.
pub struct PhoneField {
    prefix: FieldState,
    suffix: FieldState,
    rules: Vec<ValidationRule>,
    width_hint: u16,
    prefix_handler: Option<PrefixHandler>,
}

impl PhoneField {
    pub fn new() -> Self {
        Self::with_options(PhoneFieldOptions::default())
    }

    pub fn with_options(options: PhoneFieldOptions) -> Self {
        let mut field = Self {
            prefix: FieldState::new(),
            suffix: FieldState::new(),
            rules: vec![ValidationRule::phone_number()],
            width_hint: 0,
            prefix_handler: None,
        };
        field.set_prefix_placeholder(options.prefix_placeholder);
        field.set_suffix_placeholder(options.suffix_placeholder);
        field.set_help_text(options.help_text);
        if let Some(value) = options.initial_value {
            field.set_text(&value);
        }
        if options.preview {
            field.set_prefix_placeholder(Some("Prefix".to_string()));
            field.set_suffix_placeholder(Some("Phone number".to_string()));
            field.set_text("+32123456");
        }
        field.sync_width_hint();
        field
    }

    /// The combined number, always prefix text followed by suffix text.
    /// Computed, never stored.
    pub fn phone_number(&self) -> String {
        format!("{}{}", self.prefix.text(), self.suffix.text())
    }

    pub fn text(&self) -> String {
        self.phone_number()
    }

    /// Assigns a raw phone string, splitting it on the calling-code
    /// boundary. Absence of either part normalizes to the empty string.
    /// Assignment always succeeds; invalidity is only observable through
    /// [`PhoneField::validate`] and [`PhoneField::is_valid`].
    pub fn set_text(&mut self, raw: &str) {
        let components = split_number(raw);
        match components.prefix {
            Some(code) => self.set_prefix(format!("+{code}")),
            None => self.set_prefix(""),
        }
        self.set_suffix(components.local.unwrap_or_default());
    }

    pub fn value(&self) -> String {
        self.text()
    }

    pub fn set_value(&mut self, raw: &str) {
        self.set_text(raw);
    }

    pub fn prefix(&self) -> &str {
        self.prefix.text()
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix.set_text(prefix);
        self.prefix_text_changed();
    }

    pub fn suffix(&self) -> &str {
        self.suffix.text()
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix.set_text(suffix);
    }

    pub fn prefix_placeholder(&self) -> Option<&str> {
        self.prefix.placeholder()
    }

    pub fn set_prefix_placeholder(&mut self, placeholder: Option<String>) {
        self.prefix.set_placeholder(placeholder);
        self.sync_width_hint();
    }

    pub fn suffix_placeholder(&self) -> Option<&str> {
        self.suffix.placeholder()
    }

    pub fn set_suffix_placeholder(&mut self, placeholder: Option<String>) {
        self.suffix.set_placeholder(placeholder);
    }

    pub fn help_text(&self) -> Option<&str> {
        self.suffix.help_text()
    }

    pub fn set_help_text(&mut self, help_text: Option<String>) {
        self.suffix.set_help_text(help_text);
    }

    /// Replaces the whole rule list with a single phone-number rule
    /// carrying `message`. Destructive: any custom rules attached via
    /// [`PhoneField::set_validations`] are discarded.
    pub fn set_error_text(&mut self, message: impl Into<String>) {
        self.rules = vec![ValidationRule::phone_number().with_message(message)];
    }

    /// The primary rule, by contract the rule at list position 0.
    pub fn validation(&self) -> Option<&ValidationRule> {
        self.rules.first()
    }

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

    pub fn validations(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn set_validations(&mut self, rules: Vec<ValidationRule>) {
        self.rules = rules;
    }

    /// An unedited suffix never reads as invalid, so no error flashes
    /// before the user has touched the field. Once edited, the combined
    /// number is checked against the controller's rules at `Error` level.
    pub fn is_valid(&self) -> bool {
        if !self.suffix.has_been_edited() {
            return true;
        }
        check_validity(&self.phone_number(), &self.rules, Level::Error).is_valid
    }

    /// Re-validates the suffix field. The primary rule's message is read
    /// here, at check time, so error text configured after setup is
    /// honored on the next check.
    pub fn validate(&mut self) {
        let message = self.rules.first().and_then(|rule| rule.message.clone());
        let result = if self.is_valid() {
            ValidationResult::valid(Level::Error)
        } else {
            ValidationResult::invalid(message, Level::Error)
        };
        self.suffix.set_last_result(result);
    }

    /// Routes a key event to the suffix field; the prefix is only ever
    /// set through its action affordance or the setters. An accepted
    /// edit re-validates against whatever prefix currently holds.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.suffix.handle_key(key) {
            return false;
        }
        self.validate();
        true
    }

    pub fn set_value_changed(&mut self, callback: impl FnMut(&str) + 'static) {
        self.suffix.set_value_changed(callback);
    }

    pub fn prefix_handler_attached(&self) -> bool {
        self.prefix_handler.is_some()
    }

    pub fn set_prefix_handler(&mut self, handler: impl FnMut() + 'static) {
        self.prefix_handler = Some(Box::new(handler));
    }

    /// Invoked when the prefix action affordance is activated.
    pub fn trigger_prefix_action(&mut self) {
        if let Some(handler) = self.prefix_handler.as_mut() {
            handler();
        }
    }

    /// Measured width the prefix field currently needs. Recomputed
    /// synchronously on every prefix text or placeholder change.
    pub fn width_hint(&self) -> u16 {
        self.width_hint
    }

    pub fn prefix_field(&self) -> &FieldState {
        &self.prefix
    }

    pub fn suffix_field(&self) -> &FieldState {
        &self.suffix
    }

    pub fn is_editing(&self) -> bool {
        self.suffix.is_focused()
    }

    pub fn can_focus(&self) -> bool {
        self.suffix.can_focus()
    }

    pub fn focus(&mut self) {
        self.suffix.focus();
    }

    pub fn can_blur(&self) -> bool {
        self.suffix.can_blur()
    }

    pub fn blur(&mut self) {
        self.suffix.blur();
    }

    pub fn is_focused(&self) -> bool {
        self.suffix.is_focused()
    }

    fn prefix_text_changed(&mut self) {
        self.sync_width_hint();
        if !self.prefix.text().is_empty() && !self.suffix.text().is_empty() {
            self.validate();
        }
    }

    fn sync_width_hint(&mut self) {
        self.width_hint = self.prefix.content_width();
    }
}

impl Default for PhoneField {
    fn default() -> Self {
        Self::new()
    }
}
