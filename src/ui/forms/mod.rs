//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `onboarding_form`: The onboarding form card

mod field_renderer;
mod onboarding_form;

pub use onboarding_form::draw as draw_onboarding_form;
