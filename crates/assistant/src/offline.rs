//! A provider for running without a model transport.

use async_trait::async_trait;
use smartdoc_core::error::ProviderError;
use smartdoc_core::provider::{Provider, ProviderRequest, ProviderResponse};

/// Refuses every completion with [`ProviderError::NotConfigured`].
///
/// Lets the CLI build prompts and context windows offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

#[async_trait]
impl Provider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured(
            "no model transport is configured".into(),
        ))
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(false)
    }
}
