use std::{collections::HashMap, time::Duration};

use config::{Config as ConfigLib, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "https://backendpramanik.onrender.com";
pub const DEFAULT_RECEIVER: &str = "0x21fF6FcC89e8ed65318059527d390FaF6aC5830a";
pub const DEFAULT_PINNING_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub pinning: PinningConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Receiver whose issued documents are fetched on mount.
    /// Independent of the connected wallet address.
    pub receiver: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinningConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub secret_api_key: Option<SecretString>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of a wallet node answering `eth_requestAccounts`.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Fixed signer address, used when no RPC endpoint is configured.
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    /// Builds the shared HTTP client used by every adapter.
    pub fn client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent("pramanik-client/0.1.0");
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources(None)
    }

    pub fn load_with_sources(
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigLib::builder()
            .set_default("backend.base_url", DEFAULT_BACKEND_URL)?
            .set_default("backend.receiver", DEFAULT_RECEIVER)?
            .set_default("pinning.endpoint", DEFAULT_PINNING_ENDPOINT)?
            .add_source(File::with_name("config/settings").required(false));

        // Explicit overrides replace the APP_* environment entirely
        if let Some(vars) = env_vars {
            for (key, value) in vars {
                builder = builder.set_override(&key, value)?;
            }
        } else {
            // e.g. APP_BACKEND__RECEIVER, APP_PINNING__SECRET_API_KEY, APP_WALLET__RPC_URL
            builder = builder.add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        builder.build()?.try_deserialize()
    }
}
