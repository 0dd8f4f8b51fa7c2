//! Profile payload and Vault API result types

use serde::{Deserialize, Serialize};

use super::forms::FieldName;

/// Values collected by the onboarding form, sent as the submission body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub corporation_number: String,
}

impl ProfileDetails {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Phone => &self.phone,
            FieldName::CorporationNumber => &self.corporation_number,
        }
    }
}

/// Response of `GET /corporation-number/{number}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporationNumberCheck {
    /// A body without `valid` counts as a rejection
    #[serde(default)]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CorporationNumberCheck {
    /// Result used when the lookup itself failed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            corporation_number: None,
            message: Some(message.into()),
        }
    }
}

/// Body of a rejected `POST /profile-details`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}
