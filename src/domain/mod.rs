mod phone;

pub use phone::{InvalidPhoneNumber, PhoneComponents, PhoneNumber, split_number};

pub(crate) use phone::is_well_formed;
