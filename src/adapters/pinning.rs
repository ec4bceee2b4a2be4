use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    config::PinningConfig,
    domain::{
        models::StagedFile,
        ports::{PinningError, PinningService},
    },
};

const API_KEY_HEADER: &str = "pinata_api_key";
const SECRET_API_KEY_HEADER: &str = "pinata_secret_api_key";

/// Reply of `pinFileToIPFS`. Only the content identifier is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PinResponse {
    #[serde(default)]
    pub ipfs_hash: Option<String>,
}

/// Uploads files to a Pinata-compatible pinning endpoint.
///
/// Credentials are only checked when a file is pinned, so a client built
/// without keys fails every upload rather than failing construction.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http_client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    secret_api_key: Option<SecretString>,
}

impl PinataClient {
    pub fn new(http_client: Client, config: &PinningConfig) -> Self {
        Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            secret_api_key: config.secret_api_key.clone(),
        }
    }
}

#[async_trait]
impl PinningService for PinataClient {
    async fn pin_file(&self, file: &StagedFile) -> Result<String, PinningError> {
        let (Some(api_key), Some(secret_api_key)) = (&self.api_key, &self.secret_api_key) else {
            return Err(PinningError::MissingCredentials);
        };

        debug!(
            "Pinning {} ({} bytes) via {}",
            file.file_name,
            file.bytes.len(),
            self.endpoint
        );

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .header(SECRET_API_KEY_HEADER, secret_api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PinningError::Status(response.status()));
        }

        let pinned: PinResponse = response.json().await?;
        let cid = pinned
            .ipfs_hash
            .filter(|hash| !hash.is_empty())
            .ok_or(PinningError::MissingCid)?;

        info!("Pinned {} as {}", file.file_name, cid);
        Ok(cid)
    }
}
