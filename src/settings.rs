//! Settings provider seam.
//!
//! The engine never owns rule persistence; it talks to whatever store the
//! host wires in through this contract. Every method is fallible - a
//! provider outage at load time degrades to the all-disabled default
//! rather than failing the page.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::rules::RuleConfig;

/// Contract for the external configuration store.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Fetch the current rule configuration.
    async fn get_config(&self) -> Result<RuleConfig>;

    /// Persist a full replacement configuration.
    async fn set_config(&self, config: RuleConfig) -> Result<()>;

    /// Restore the provider's default configuration.
    async fn reset_config(&self) -> Result<()>;
}

#[async_trait]
impl<T: SettingsProvider + ?Sized> SettingsProvider for std::sync::Arc<T> {
    async fn get_config(&self) -> Result<RuleConfig> {
        (**self).get_config().await
    }

    async fn set_config(&self, config: RuleConfig) -> Result<()> {
        (**self).set_config(config).await
    }

    async fn reset_config(&self) -> Result<()> {
        (**self).reset_config().await
    }
}

/// In-memory provider for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySettings {
    inner: RwLock<RuleConfig>,
}

impl MemorySettings {
    /// Build a provider seeded with `config`.
    #[must_use]
    pub fn new(config: RuleConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }
}

#[async_trait]
impl SettingsProvider for MemorySettings {
    async fn get_config(&self) -> Result<RuleConfig> {
        Ok(self.inner.read().clone())
    }

    async fn set_config(&self, config: RuleConfig) -> Result<()> {
        *self.inner.write() = config;
        Ok(())
    }

    async fn reset_config(&self) -> Result<()> {
        *self.inner.write() = RuleConfig::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FiltersEnabled;

    #[tokio::test]
    async fn test_memory_settings_round_trip() {
        let provider = MemorySettings::default();

        let config = RuleConfig {
            company_blacklist: vec!["Acme".to_string()],
            filters_enabled: FiltersEnabled {
                company_blacklist: true,
                ..FiltersEnabled::default()
            },
            ..RuleConfig::default()
        };
        provider.set_config(config.clone()).await.unwrap();
        assert_eq!(provider.get_config().await.unwrap(), config);

        provider.reset_config().await.unwrap();
        assert_eq!(provider.get_config().await.unwrap(), RuleConfig::default());
    }
}
