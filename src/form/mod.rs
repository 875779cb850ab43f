mod controller;
mod field;
mod validation;

pub use controller::{PhoneField, PhoneFieldOptions, PrefixHandler};
pub use field::{FieldState, ValueChanged};
pub use validation::{Level, RuleKind, ValidationResult, ValidationRule, check_validity};
