//! Ports (interfaces) to the collaborators the request form depends on.
//! Concrete HTTP implementations live in `crate::adapters`.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::models::{IssuedDocument, StagedFile, SubmissionPayload, WalletAddress};

/// Errors raised by a wallet provider
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Wallet returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet exposed no accounts")]
    NoAccounts,

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(#[from] super::models::AddressError),
}

/// Errors raised by the document backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {0}")]
    Status(StatusCode),
}

/// Errors raised by the pinning service
#[derive(Debug, thiserror::Error)]
pub enum PinningError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pinning service returned status {0}")]
    Status(StatusCode),

    #[error("Pinning credentials are not configured")]
    MissingCredentials,

    #[error("Pinning response is missing the content identifier")]
    MissingCid,
}

/// Browser-wallet style account access.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Asks the wallet to expose its accounts to this client.
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError>;

    /// Address of the active signer.
    async fn signer_address(&self) -> Result<WalletAddress, WalletError>;
}

/// Backend REST service holding issued documents and document requests.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn issued_documents(&self, receiver: &str) -> Result<Vec<IssuedDocument>, BackendError>;

    /// Posts a document request and returns the backend's JSON reply.
    async fn request_document(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<serde_json::Value, BackendError>;
}

/// Content-addressed storage accepting file uploads.
#[async_trait]
pub trait PinningService: Send + Sync {
    /// Uploads the file and returns its content identifier.
    async fn pin_file(&self, file: &StagedFile) -> Result<String, PinningError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// User-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NotificationLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}
