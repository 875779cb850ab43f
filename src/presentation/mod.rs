mod widget;

pub use widget::render_phone_field;
