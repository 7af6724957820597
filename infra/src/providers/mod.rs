//! Provider adapters
//!
//! One adapter per upstream provider plus the generic passthrough. The set is
//! closed: routes pick an adapter from [`Providers`] by `ProviderId`.

pub mod acchub;
pub mod browser;
pub mod onepva;
pub mod passthrough;

#[cfg(test)]
mod tests;

pub use acchub::{AcchubAdapter, AcchubRoute};
pub use browser::BrowserProfile;
pub use onepva::OnePvaAdapter;
pub use passthrough::PassthroughAdapter;

use dg_core::domain::{ProviderId, ProvisionRequest};
use dg_core::services::ProviderAdapter;
use dg_shared::ProvidersConfig;

use crate::InfrastructureError;

/// Every adapter the gateway serves, built once at startup
#[derive(Debug, Clone)]
pub struct Providers {
    pub acchub_number: AcchubAdapter,
    pub acchub_sms: AcchubAdapter,
    pub onepva: OnePvaAdapter,
    pub passthrough: PassthroughAdapter,
}

impl Providers {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, InfrastructureError> {
        let providers = Self {
            acchub_number: AcchubAdapter::number(config)?,
            acchub_sms: AcchubAdapter::sms(config)?,
            onepva: OnePvaAdapter::from_config(config)?,
            passthrough: PassthroughAdapter::new(),
        };

        tracing::info!(
            acchub_number = providers.acchub_number.endpoint(),
            acchub_sms = providers.acchub_sms.endpoint(),
            onepva = providers.onepva.endpoint(),
            "provider adapters configured"
        );

        Ok(providers)
    }

    /// Adapter serving a canonical provision request
    ///
    /// `None` for the passthrough, which takes its own request type.
    pub fn provision(
        &self,
        provider: ProviderId,
    ) -> Option<&dyn ProviderAdapter<Request = ProvisionRequest>> {
        match provider {
            ProviderId::AcchubNumber => Some(&self.acchub_number),
            ProviderId::AcchubSms => Some(&self.acchub_sms),
            ProviderId::OnePva => Some(&self.onepva),
            ProviderId::Passthrough => None,
        }
    }
}
