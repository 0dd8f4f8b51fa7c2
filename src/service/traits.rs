//! Trait abstraction for the Vault API to enable mocking in tests

use crate::state::{CorporationNumberCheck, ProfileDetails, SubmitFailure};
use async_trait::async_trait;

/// Operations the onboarding form needs from the Vault API.
///
/// Neither operation returns an error: failures are folded into the result
/// so callers can render them like any other rejection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VaultServiceTrait: Send + Sync {
    /// Look up a corporation number
    async fn check_corporation_number(&self, number: &str) -> CorporationNumberCheck;

    /// Submit the profile; `None` means it was accepted
    async fn submit_profile(&self, profile: &ProfileDetails) -> Option<SubmitFailure>;
}
