#![deny(rust_2018_idioms)]

mod domain;
mod form;
mod presentation;


pub use domain::{InvalidPhoneNumber, PhoneComponents, PhoneNumber, split_number};
pub use form::{
    FieldState, Level, PhoneField, PhoneFieldOptions, PrefixHandler, RuleKind, ValidationResult,
    ValidationRule, ValueChanged, check_validity,
};
pub use presentation::render_phone_field;

pub mod prelude {
    pub use super::{
        Level, PhoneField, PhoneFieldOptions, PhoneNumber, ValidationResult, ValidationRule,
        render_phone_field, split_number,
    };
}
