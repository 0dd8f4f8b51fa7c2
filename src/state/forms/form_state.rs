//! Onboarding form state and focus handling

use super::field::{FieldName, FormField};
use crate::state::ProfileDetails;

/// Focus index of the Submit button, after the four inputs
pub const SUBMIT_BUTTON_INDEX: usize = 4;

/// The onboarding form: four inputs plus the Submit button
#[derive(Debug, Clone)]
pub struct OnboardingForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub phone: FormField,
    pub corporation_number: FormField,
    pub active_field_index: usize,
}

impl OnboardingForm {
    pub fn new() -> Self {
        Self {
            first_name: FormField::new(FieldName::FirstName),
            last_name: FormField::new(FieldName::LastName),
            phone: FormField::new(FieldName::Phone),
            corporation_number: FormField::new(FieldName::CorporationNumber),
            active_field_index: 0,
        }
    }

    /// Inputs plus the Submit button
    pub fn field_count(&self) -> usize {
        SUBMIT_BUTTON_INDEX + 1
    }

    /// The focused input, or `None` when the Submit button has focus
    pub fn active_field(&self) -> Option<FieldName> {
        FieldName::from_index(self.active_field_index)
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == SUBMIT_BUTTON_INDEX
    }

    pub fn is_active(&self, name: FieldName) -> bool {
        self.active_field_index == name.index()
    }

    /// Move focus to `index`, returning the input that lost focus (if any)
    pub fn focus(&mut self, index: usize) -> Option<FieldName> {
        let index = index.min(SUBMIT_BUTTON_INDEX);
        if index == self.active_field_index {
            return None;
        }
        let blurred = self.active_field();
        self.active_field_index = index;
        blurred
    }

    /// Move focus forward (wraps around), returning the blurred input
    pub fn next_field(&mut self) -> Option<FieldName> {
        let next = (self.active_field_index + 1) % self.field_count();
        self.focus(next)
    }

    /// Move focus backward (wraps around), returning the blurred input
    pub fn prev_field(&mut self) -> Option<FieldName> {
        let prev = if self.active_field_index == 0 {
            self.field_count() - 1
        } else {
            self.active_field_index - 1
        };
        self.focus(prev)
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        match name {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Phone => &self.phone,
            FieldName::CorporationNumber => &self.corporation_number,
        }
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut FormField {
        match name {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Phone => &mut self.phone,
            FieldName::CorporationNumber => &mut self.corporation_number,
        }
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        let name = self.active_field()?;
        Some(self.field_mut(name))
    }

    /// Snapshot of the current values as a submission payload
    pub fn values(&self) -> ProfileDetails {
        ProfileDetails {
            first_name: self.first_name.value.clone(),
            last_name: self.last_name.value.clone(),
            phone: self.phone.value.clone(),
            corporation_number: self.corporation_number.value.clone(),
        }
    }
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self::new()
    }
}
