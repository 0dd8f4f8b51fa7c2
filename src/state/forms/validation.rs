//! Validation schema for the onboarding form
//!
//! Static rules are declared per field and evaluated in order, first failure
//! wins. The corporation number additionally needs a remote check, which is
//! only attempted once its static rules pass.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::field::FieldName;
use crate::service::VaultServiceTrait;
use crate::state::ProfileDetails;

pub const REQUIRED_MESSAGE: &str = "Field is required";
pub const FIRST_NAME_TOO_LONG: &str = "First name should be shorter than 50 characters";
pub const LAST_NAME_TOO_LONG: &str = "Last name should be shorter than 50 characters";
pub const INCORRECT_PHONE: &str = "Incorrect phone number";
pub const INCORRECT_CORPORATION_NUMBER_LENGTH: &str = "Incorrect Corporation Number length";
/// Shown when the service rejects a number without saying why
pub const CORPORATION_NUMBER_REJECTED: &str = "Corporation number is not valid";

pub const MAX_NAME_LENGTH: usize = 50;
pub const CORPORATION_NUMBER_LENGTH: usize = 9;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+1[0-9]{10}$").expect("phone pattern is valid"));

/// Named patterns usable in a [`Rule::Matches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `+1` followed by exactly ten digits
    NorthAmericanPhone,
}

impl Pattern {
    fn regex(&self) -> &'static Regex {
        match self {
            Self::NorthAmericanPhone => &PHONE_PATTERN,
        }
    }
}

/// A single static rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty after trimming
    Required,
    MaxLength(usize, &'static str),
    ExactLength(usize, &'static str),
    Matches(Pattern, &'static str),
}

impl Rule {
    /// Returns the rule's message when `value` violates it
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let ok = match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::MaxLength(max, _) => value.chars().count() <= *max,
            Rule::ExactLength(len, _) => value.chars().count() == *len,
            Rule::Matches(pattern, _) => pattern.regex().is_match(value),
        };
        if ok {
            None
        } else {
            Some(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required => REQUIRED_MESSAGE,
            Rule::MaxLength(_, msg) | Rule::ExactLength(_, msg) | Rule::Matches(_, msg) => *msg,
        }
    }
}

const FIRST_NAME_RULES: &[Rule] = &[
    Rule::Required,
    Rule::MaxLength(MAX_NAME_LENGTH, FIRST_NAME_TOO_LONG),
];
const LAST_NAME_RULES: &[Rule] = &[
    Rule::Required,
    Rule::MaxLength(MAX_NAME_LENGTH, LAST_NAME_TOO_LONG),
];
const PHONE_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Matches(Pattern::NorthAmericanPhone, INCORRECT_PHONE),
];
const CORPORATION_NUMBER_RULES: &[Rule] = &[
    Rule::Required,
    Rule::ExactLength(CORPORATION_NUMBER_LENGTH, INCORRECT_CORPORATION_NUMBER_LENGTH),
];

/// Static rules for a field, in evaluation order
pub fn rules_for(field: FieldName) -> &'static [Rule] {
    match field {
        FieldName::FirstName => FIRST_NAME_RULES,
        FieldName::LastName => LAST_NAME_RULES,
        FieldName::Phone => PHONE_RULES,
        FieldName::CorporationNumber => CORPORATION_NUMBER_RULES,
    }
}

/// Whether the field also needs a remote check after its static rules pass
pub fn has_remote_check(field: FieldName) -> bool {
    matches!(field, FieldName::CorporationNumber)
}

/// Field name to error message; a missing key means the field is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldName) {
        self.0.remove(&field);
    }

    /// Insert or clear the field's error
    pub fn set(&mut self, field: FieldName, error: Option<String>) {
        match error {
            Some(message) => self.insert(field, message),
            None => self.remove(field),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Run the static rules of one field
pub fn validate_field(field: FieldName, value: &str) -> Option<String> {
    rules_for(field)
        .iter()
        .find_map(|rule| rule.check(value))
        .map(str::to_string)
}

/// Run the static rules of every field
pub fn validate_static(values: &ProfileDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in FieldName::ALL {
        errors.set(field, validate_field(field, values.get(field)));
    }
    errors
}

/// Ask the service whether the corporation number is acceptable
///
/// Only call this once the static rules pass. Lookup failures come back from
/// the service as rejections carrying the failure text, so they surface as a
/// field error like any other rejection.
pub async fn validate_corporation_number_remote(
    service: &dyn VaultServiceTrait,
    value: &str,
) -> Option<String> {
    let check = service.check_corporation_number(value).await;
    if check.valid {
        return None;
    }
    tracing::debug!(
        "Corporation number {value} rejected: {:?}",
        check.message.as_deref()
    );
    Some(
        check
            .message
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| CORPORATION_NUMBER_REJECTED.to_string()),
    )
}

/// Validate every field, calling the remote check only for a corporation
/// number that already passed its static rules
pub async fn validate_all(
    service: &dyn VaultServiceTrait,
    values: &ProfileDetails,
) -> ValidationErrors {
    let mut errors = validate_static(values);
    for field in FieldName::ALL {
        if !has_remote_check(field) || errors.contains(field) {
            continue;
        }
        let remote = validate_corporation_number_remote(service, values.get(field)).await;
        errors.set(field, remote);
    }
    errors
}
