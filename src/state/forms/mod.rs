//! Form domain layer
//!
//! Field values, focus handling and the validation schema for the
//! onboarding form.

mod field;
mod form_state;
pub mod validation;

pub use field::{FieldName, FormField};
pub use form_state::{OnboardingForm, SUBMIT_BUTTON_INDEX};
pub use validation::{validate_all, validate_field, ValidationErrors};
