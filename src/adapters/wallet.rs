use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    models::WalletAddress,
    ports::{WalletError, WalletProvider},
};

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
const ACCOUNTS: &str = "eth_accounts";

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Vec<Value>,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Wallet reached over JSON-RPC, e.g. a local signer node.
///
/// The first account returned by `eth_accounts` is the active signer.
#[derive(Debug)]
pub struct JsonRpcWallet {
    http_client: Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    pub fn new(http_client: Client, rpc_url: impl Into<String>) -> Self {
        Self {
            http_client,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str) -> Result<T, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params: Vec::new(),
        };
        debug!("Wallet RPC {} -> {}", method, self.rpc_url);

        let response: RpcResponse<T> = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(WalletError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response.result.ok_or(WalletError::NoAccounts)
    }

    async fn accounts(&self, method: &str) -> Result<Vec<WalletAddress>, WalletError> {
        let raw: Vec<String> = self.call(method).await?;
        raw.into_iter()
            .map(|address| address.parse().map_err(WalletError::from))
            .collect()
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        self.accounts(REQUEST_ACCOUNTS).await
    }

    async fn signer_address(&self) -> Result<WalletAddress, WalletError> {
        self.accounts(ACCOUNTS)
            .await?
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccounts)
    }
}

/// A wallet with one fixed, pre-approved account.
#[derive(Debug, Clone)]
pub struct StaticWallet {
    address: WalletAddress,
}

impl StaticWallet {
    pub fn new(address: WalletAddress) -> Self {
        Self { address }
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        Ok(vec![self.address.clone()])
    }

    async fn signer_address(&self) -> Result<WalletAddress, WalletError> {
        Ok(self.address.clone())
    }
}

/// Either wallet flavour, chosen from configuration.
#[derive(Debug)]
pub enum ConfiguredWallet {
    JsonRpc(JsonRpcWallet),
    Static(StaticWallet),
}

#[async_trait]
impl WalletProvider for ConfiguredWallet {
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        match self {
            ConfiguredWallet::JsonRpc(wallet) => wallet.request_accounts().await,
            ConfiguredWallet::Static(wallet) => wallet.request_accounts().await,
        }
    }

    async fn signer_address(&self) -> Result<WalletAddress, WalletError> {
        match self {
            ConfiguredWallet::JsonRpc(wallet) => wallet.signer_address().await,
            ConfiguredWallet::Static(wallet) => wallet.signer_address().await,
        }
    }
}
