//! Core notification provider trait.
//!
//! Callers that only need "send this text somewhere" depend on this trait
//! rather than on a concrete provider.

use async_trait::async_trait;

use crate::config::NotifyOptions;
use crate::error::NotifyResult;
use crate::models::NotificationResult;

/// Trait for notification providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends one message, attempting exactly one delivery.
    ///
    /// `options` carries per-call credential overrides; anything left unset
    /// is resolved by the provider.
    async fn send(&self, message: &str, options: &NotifyOptions)
    -> NotifyResult<NotificationResult>;

    /// Provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    async fn validate_config(&self) -> NotifyResult<()> {
        Ok(())
    }
}
