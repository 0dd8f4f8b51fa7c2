//! HTTP client for the Vault onboarding API
//!
//! Every call is a single attempt with no retry and no timeout. Transport and
//! decoding failures are turned into result values carrying the error text,
//! so the form can display them like any other rejection.

use async_trait::async_trait;
use reqwest::Url;

use super::error::ServiceError;
use super::traits::VaultServiceTrait;
use crate::state::{CorporationNumberCheck, ProfileDetails, SubmitFailure};

/// Default Vault API address
pub const DEFAULT_BASE_URL: &str = "https://fe-hometask-api.dev.vault.tryvault.com";

/// Client for the Vault onboarding endpoints
#[derive(Debug, Clone)]
pub struct VaultClient {
    base_url: Url,
    client: reqwest::Client,
}

impl VaultClient {
    /// Create a client against `base_url` (http or https)
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let parsed = Url::parse(base_url).map_err(|e| ServiceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("onboarding-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServiceError::ClientBuild)?;

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append path segments (percent-encoded) to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /corporation-number/{number}`; the body is parsed whatever the
    /// status code
    async fn fetch_corporation_number(
        &self,
        number: &str,
    ) -> Result<CorporationNumberCheck, ServiceError> {
        let url = self.endpoint(&["corporation-number", number])?;
        tracing::debug!("Checking corporation number at {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let check: CorporationNumberCheck = response.json().await?;

        tracing::info!(
            "Corporation number {} checked (status: {}, valid: {})",
            number,
            status,
            check.valid
        );
        Ok(check)
    }

    /// `POST /profile-details`; any 2xx is success, otherwise the body is
    /// the failure
    async fn post_profile(
        &self,
        profile: &ProfileDetails,
    ) -> Result<Option<SubmitFailure>, ServiceError> {
        let url = self.endpoint(&["profile-details"])?;
        tracing::debug!("Submitting profile details to {}", url);

        let response = self.client.post(url).json(profile).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::info!("Profile details accepted ({})", status);
            return Ok(None);
        }

        tracing::warn!("Profile details rejected with status {}", status);
        let failure: SubmitFailure = response.json().await?;
        Ok(Some(failure))
    }
}

#[async_trait]
impl VaultServiceTrait for VaultClient {
    async fn check_corporation_number(&self, number: &str) -> CorporationNumberCheck {
        self.fetch_corporation_number(number)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Corporation number lookup failed: {}", e);
                CorporationNumberCheck::failed(e.to_string())
            })
    }

    async fn submit_profile(&self, profile: &ProfileDetails) -> Option<SubmitFailure> {
        self.post_profile(profile).await.unwrap_or_else(|e| {
            tracing::warn!("Profile submission failed: {}", e);
            Some(SubmitFailure::with_message(e.to_string()))
        })
    }
}
