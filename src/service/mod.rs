//! Vault API client module for corporation number checks and profile
//! submission

mod client;
mod error;
mod traits;

pub use client::{VaultClient, DEFAULT_BASE_URL};
pub use traits::VaultServiceTrait;

#[cfg(test)]
pub use traits::MockVaultServiceTrait;
