pub mod backend;
pub mod notifier;
pub mod pinning;
pub mod wallet;

pub use backend::HttpBackend;
pub use notifier::{MemoryNotifier, Notification, TracingNotifier};
pub use pinning::PinataClient;
pub use wallet::{ConfiguredWallet, JsonRpcWallet, StaticWallet};

use crate::config::{Config, WalletConfig};
use crate::domain::models::AddressError;

impl WalletConfig {
    /// Builds the configured wallet, if any. An RPC endpoint takes precedence
    /// over a fixed address.
    pub fn provider(
        &self,
        http_client: &reqwest::Client,
    ) -> Result<Option<ConfiguredWallet>, AddressError> {
        if let Some(rpc_url) = &self.rpc_url {
            return Ok(Some(ConfiguredWallet::JsonRpc(JsonRpcWallet::new(
                http_client.clone(),
                rpc_url.clone(),
            ))));
        }
        match &self.address {
            Some(address) => Ok(Some(ConfiguredWallet::Static(StaticWallet::new(
                address.parse()?,
            )))),
            None => Ok(None),
        }
    }
}

/// The HTTP collaborators described by a configuration.
pub struct Adapters {
    pub wallet: Option<ConfiguredWallet>,
    pub backend: HttpBackend,
    pub pinning: PinataClient,
}

impl Adapters {
    pub fn from_config(config: &Config) -> color_eyre::Result<Self> {
        let http_client = config.http.client()?;
        Ok(Self {
            wallet: config.wallet.provider(&http_client)?,
            backend: HttpBackend::new(http_client.clone(), config.backend.base_url.clone()),
            pinning: PinataClient::new(http_client, &config.pinning),
        })
    }
}
