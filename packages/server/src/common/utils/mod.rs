pub mod json_fields;
pub mod validation;

pub use json_fields::{
    finite_number, first_present, lenient_text, number_from_value, number_or_numeric_string,
    sanitize_number, text_from_value,
};
pub use validation::{is_valid_email, required_text};
