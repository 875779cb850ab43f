use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{PhoneField, PhoneFieldOptions, ValidationRule};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(field: &mut PhoneField, text: &str) {
    for ch in text.chars() {
        assert!(field.handle_key(&key(KeyCode::Char(ch))));
    }
}

#[test]
fn assigning_a_full_number_splits_it() {
    let mut field = PhoneField::new();
    field.set_text("+32123456");
    assert_eq!(field.prefix(), "+32");
    assert_eq!(field.suffix(), "123456");
    assert_eq!(field.phone_number(), "+32123456");
    assert_eq!(field.text(), "+32123456");
}

#[test]
fn assigning_empty_text_clears_both_parts() {
    let mut field = PhoneField::new();
    field.set_text("+32123456");
    field.set_text("");
    assert_eq!(field.prefix(), "");
    assert_eq!(field.suffix(), "");
    assert_eq!(field.phone_number(), "");
}

#[test]
fn bare_plus_is_the_degenerate_empty_case() {
    let mut field = PhoneField::new();
    field.set_text("+");
    assert_eq!(field.prefix(), "");
    assert_eq!(field.suffix(), "");
    assert!(field.is_valid());
}

#[test]
fn unrecognized_prefix_lands_in_the_suffix() {
    let mut field = PhoneField::new();
    field.set_text("0471234567");
    assert_eq!(field.prefix(), "");
    assert_eq!(field.suffix(), "0471234567");
}

#[test]
fn unedited_suffix_is_always_valid() {
    let mut field = PhoneField::new();
    assert!(field.is_valid());

    // Structurally malformed, but assigned programmatically.
    field.set_suffix("abc");
    assert!(field.is_valid());

    field.validate();
    assert!(field.suffix_field().last_result().expect("cached").is_valid);
}

#[test]
fn suffix_edits_validate_against_the_current_prefix() {
    let mut field = PhoneField::new();
    field.set_prefix("+32");

    type_text(&mut field, "123");
    let result = field.suffix_field().last_result().expect("validated");
    assert!(!result.is_valid, "+32123 has too few digits");

    type_text(&mut field, "456");
    let result = field.suffix_field().last_result().expect("validated");
    assert!(result.is_valid, "+32123456 is well-formed");
}

#[test]
fn prefix_change_revalidates_an_edited_suffix() {
    let mut field = PhoneField::new();
    type_text(&mut field, "123456");
    assert!(field.suffix_field().last_result().expect("validated").is_valid);

    // No explicit validate() call: the prefix setter must propagate.
    field.set_prefix("+99999999999");
    let result = field.suffix_field().last_result().expect("revalidated");
    assert!(!result.is_valid, "17 combined digits exceed the maximum");

    field.set_prefix("+32");
    assert!(field.suffix_field().last_result().expect("revalidated").is_valid);
}

#[test]
fn prefix_change_with_empty_suffix_does_not_validate() {
    let mut field = PhoneField::new();
    field.set_prefix("+32");
    assert!(field.suffix_field().last_result().is_none());
}

#[test]
fn error_message_is_read_at_check_time() {
    let mut field = PhoneField::new();
    field.set_error_text("A");

    type_text(&mut field, "x");
    let result = field.suffix_field().last_result().expect("validated");
    assert!(!result.is_valid);
    assert_eq!(result.message.as_deref(), Some("A"));

    field.set_error_text("B");
    field.validate();
    let result = field.suffix_field().last_result().expect("revalidated");
    assert_eq!(result.message.as_deref(), Some("B"));
}

#[test]
fn error_text_discards_attached_custom_rules() {
    let mut field = PhoneField::new();
    field.set_validations(vec![
        ValidationRule::phone_number(),
        ValidationRule::custom(|_| true).with_message("custom"),
    ]);
    field.set_error_text("oops");
    assert_eq!(field.validations().len(), 1);
    assert_eq!(
        field.validation().and_then(|rule| rule.message.as_deref()),
        Some("oops")
    );
}

#[test]
fn controller_primary_rule_aliases_list_head() {
    let mut field = PhoneField::new();
    assert_eq!(field.validations().len(), 1);

    field.set_validation(Some(ValidationRule::custom(|_| false).with_message("always")));
    assert_eq!(field.validations().len(), 1);
    assert_eq!(
        field.validation().and_then(|rule| rule.message.as_deref()),
        Some("always")
    );

    field.set_validation(None);
    assert!(field.validation().is_none());
}

#[test]
fn width_hint_tracks_prefix_content() {
    let mut field = PhoneField::new();
    field.set_prefix("+32");
    assert_eq!(field.width_hint(), 5);

    field.set_prefix("+1");
    assert_eq!(field.width_hint(), 4, "hint reflects the latest text only");

    field.set_prefix_placeholder(Some("Prefix".to_string()));
    assert_eq!(field.width_hint(), 8, "placeholder widens the hint");

    field.set_prefix("+32123456789");
    assert_eq!(field.width_hint(), 14);
}

#[test]
fn focus_is_defined_by_the_suffix_field() {
    let mut field = PhoneField::new();
    assert!(field.can_focus());
    assert!(!field.is_editing());

    field.focus();
    assert!(field.is_editing());
    assert!(field.is_focused());
    assert_eq!(field.is_editing(), field.suffix_field().is_focused());
    assert!(!field.prefix_field().is_focused());

    assert!(field.can_blur());
    assert_eq!(field.can_blur(), field.suffix_field().can_blur());
    field.blur();
    assert!(!field.is_editing());
}

#[test]
fn value_changed_is_forwarded_to_the_suffix() {
    let mut field = PhoneField::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    field.set_value_changed(move |text| sink.borrow_mut().push(text.to_string()));

    type_text(&mut field, "12");
    assert_eq!(*seen.borrow(), vec!["1".to_string(), "12".to_string()]);
}

#[test]
fn prefix_action_invokes_the_handler() {
    let mut field = PhoneField::new();
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    assert!(!field.prefix_handler_attached());
    field.set_prefix_handler(move || counter.set(counter.get() + 1));
    assert!(field.prefix_handler_attached());

    field.trigger_prefix_action();
    field.trigger_prefix_action();
    assert_eq!(count.get(), 2);
}

#[test]
fn options_seed_the_field() {
    let field = PhoneField::with_options(
        PhoneFieldOptions::default()
            .with_prefix_placeholder("Code")
            .with_suffix_placeholder("Number")
            .with_help_text("Including country code")
            .with_initial_value("+32123456"),
    );
    assert_eq!(field.prefix_placeholder(), Some("Code"));
    assert_eq!(field.suffix_placeholder(), Some("Number"));
    assert_eq!(field.help_text(), Some("Including country code"));
    assert_eq!(field.prefix(), "+32");
    assert_eq!(field.suffix(), "123456");
    assert!(!field.suffix_field().has_been_edited());
    assert!(field.is_valid());
}

#[test]
fn preview_mode_seeds_demo_values() {
    let field = PhoneField::with_options(PhoneFieldOptions::default().with_preview(true));
    assert_eq!(field.prefix_placeholder(), Some("Prefix"));
    assert_eq!(field.suffix_placeholder(), Some("Phone number"));
    assert_eq!(field.phone_number(), "+32123456");
    assert_eq!(field.width_hint(), 8, "placeholder is wider than +32");
}

#[test]
fn non_editing_keys_are_ignored() {
    let mut field = PhoneField::new();
    assert!(!field.handle_key(&key(KeyCode::Tab)));
    assert!(!field.handle_key(&KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL
    )));
    assert!(field.suffix_field().last_result().is_none());
}
