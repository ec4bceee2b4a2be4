use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{
    models::{IssuedDocument, SubmissionPayload},
    ports::{BackendError, DocumentBackend},
};

const ISSUED_DOCUMENTS_PATH: &str = "/user/getIssuedDocuments";
const REQUEST_DOCUMENT_PATH: &str = "/user/requestDocument";

#[derive(Serialize)]
struct IssuedDocumentsQuery<'a> {
    receiver: &'a str,
}

/// JSON-over-HTTP client for the document backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, BackendError> {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn issued_documents(&self, receiver: &str) -> Result<Vec<IssuedDocument>, BackendError> {
        let response = self
            .post_json(ISSUED_DOCUMENTS_PATH, &IssuedDocumentsQuery { receiver })
            .await?;
        let documents: Vec<IssuedDocument> = response.json().await?;

        info!(
            "Fetched {} issued documents for {}",
            documents.len(),
            receiver
        );
        Ok(documents)
    }

    async fn request_document(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<serde_json::Value, BackendError> {
        let response = self.post_json(REQUEST_DOCUMENT_PATH, payload).await?;
        Ok(response.json().await?)
    }
}
