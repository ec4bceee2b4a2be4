//! The document request form: wallet connection, issued-document lookup,
//! supporting-document resolution, staged uploads and the final submission.
//!
//! Every network call is awaited in sequence, never concurrently.

mod errors;
pub mod view;

pub use errors::{SelectionError, StageError, SubmitError};
pub use view::{BoardSelectView, FieldStatus, FieldView, FormView, SubmitButtonView};

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{error, info, instrument, warn};

use crate::domain::{
    Board, DocumentType, IssuedDocument, RequestStatus, RequiredCidMap, StagedFile,
    SubmissionPayload, WalletAddress,
    ports::{DocumentBackend, Notifier, PinningService, WalletProvider},
};

pub const WALLET_UNAVAILABLE: &str = "No wallet provider is available.";
pub const WALLET_FAILED: &str = "Failed to connect wallet.";
pub const WALLET_REQUIRED: &str = "Please connect your wallet before submitting the request.";
pub const SUBMIT_SUCCEEDED: &str = "Request submitted successfully!";
pub const SUBMIT_FAILED: &str = "Failed to submit request. Please try again.";

/// Clears the in-flight flag when dropped, including when a submit future is abandoned.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RequestForm<W, B, P, N> {
    wallet: Option<W>,
    backend: B,
    pinning: P,
    notifier: N,
    receiver: String,

    wallet_address: Option<WalletAddress>,
    documents: Vec<IssuedDocument>,
    selected: Option<DocumentType>,
    board: Option<Board>,
    required: RequiredCidMap,
    staged: Vec<(String, StagedFile)>,
    additional_info: String,
    uploading: Arc<AtomicBool>,
}

impl<W, B, P, N> RequestForm<W, B, P, N>
where
    W: WalletProvider,
    B: DocumentBackend,
    P: PinningService,
    N: Notifier,
{
    /// Creates an empty form. `wallet` is `None` when no wallet provider is present.
    ///
    /// `receiver` is the identifier whose issued documents are fetched on mount.
    pub fn new(
        wallet: Option<W>,
        backend: B,
        pinning: P,
        notifier: N,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            wallet,
            backend,
            pinning,
            notifier,
            receiver: receiver.into(),
            wallet_address: None,
            documents: Vec::new(),
            selected: None,
            board: None,
            required: RequiredCidMap::default(),
            staged: Vec::new(),
            additional_info: String::new(),
            uploading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Connects the wallet, then fetches issued documents.
    pub async fn mount(&mut self) {
        self.connect_wallet().await;
        self.fetch_documents().await;
    }

    #[instrument(skip(self))]
    pub async fn connect_wallet(&mut self) {
        let Some(wallet) = &self.wallet else {
            self.notifier.error(WALLET_UNAVAILABLE);
            return;
        };

        let result = async {
            wallet.request_accounts().await?;
            wallet.signer_address().await
        }
        .await;

        match result {
            Ok(address) => {
                info!("Connected wallet address: {}", address);
                self.wallet_address = Some(address);
            }
            Err(e) => {
                error!("Error connecting wallet: {e}");
                self.notifier.error(WALLET_FAILED);
            }
        }
    }

    /// Replaces the issued document list. Failures are logged and leave the list empty.
    #[instrument(skip(self), fields(receiver = %self.receiver))]
    pub async fn fetch_documents(&mut self) {
        match self.backend.issued_documents(&self.receiver).await {
            Ok(documents) => self.documents = documents,
            Err(e) => {
                error!("Error fetching documents: {e}");
                self.documents.clear();
            }
        }
    }

    pub fn wallet_address(&self) -> Option<&WalletAddress> {
        self.wallet_address.as_ref()
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn documents(&self) -> &[IssuedDocument] {
        &self.documents
    }

    pub fn selected(&self) -> Option<DocumentType> {
        self.selected
    }

    pub fn board(&self) -> Option<Board> {
        self.board
    }

    pub fn required_cids(&self) -> &RequiredCidMap {
        &self.required
    }

    pub fn staged_file(&self, field: &str) -> Option<&StagedFile> {
        self.staged
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, file)| file)
    }

    pub fn staged_files(&self) -> impl Iterator<Item = (&str, &StagedFile)> {
        self.staged.iter().map(|(name, file)| (name.as_str(), file))
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::Acquire)
    }

    /// Selects a document type and rebuilds the required identifier map from
    /// the fetched documents. `None` clears the selection.
    pub fn select_document_type(&mut self, doc_type: Option<DocumentType>) {
        self.selected = doc_type;
        self.board = None;

        match doc_type {
            Some(doc_type) => {
                self.required = RequiredCidMap::resolve(doc_type, &self.documents);
                let required = &self.required;
                self.staged.retain(|(field, _)| required.is_unresolved(field));
                info!(
                    "Selected {} with {} of {} fields auto-filled",
                    doc_type,
                    required.len() - required.unresolved().count(),
                    required.len()
                );
            }
            None => {
                self.required.clear();
                self.staged.clear();
            }
        }
    }

    /// Selects by catalog name. An empty name clears the selection.
    pub fn select_document_type_by_name(&mut self, name: &str) -> Result<(), SelectionError> {
        let doc_type = match name {
            "" => None,
            name => Some(name.parse::<DocumentType>()?),
        };
        self.select_document_type(doc_type);
        Ok(())
    }

    pub fn select_board(&mut self, board: Board) -> Result<(), SelectionError> {
        match self.selected {
            Some(doc_type) if doc_type.requires_board() => {
                info!("Selected board: {}", board);
                self.board = Some(board);
                Ok(())
            }
            other => Err(SelectionError::BoardNotApplicable(other)),
        }
    }

    pub fn select_board_by_name(&mut self, name: &str) -> Result<(), SelectionError> {
        self.select_board(name.parse::<Board>()?)
    }

    pub fn set_additional_info(&mut self, text: impl Into<String>) {
        self.additional_info = text.into();
    }

    /// Stages a file for an unresolved required field. Nothing is uploaded until [`submit`].
    ///
    /// [`submit`]: Self::submit
    pub fn stage_file(&mut self, field: &str, file: StagedFile) -> Result<(), StageError> {
        let doc_type = self.selected.ok_or(StageError::NoDocumentType)?;
        if !self.required.contains(field) {
            return Err(StageError::NotRequired {
                field: field.to_string(),
                doc_type,
            });
        }
        if !self.required.is_unresolved(field) {
            return Err(StageError::AlreadyResolved(field.to_string()));
        }
        if !file.has_accepted_extension() {
            return Err(StageError::UnsupportedFileType(file.file_name));
        }

        match self.staged.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = file,
            None => self.staged.push((field.to_string(), file)),
        }
        Ok(())
    }

    pub fn clear_staged_file(&mut self, field: &str) -> Option<StagedFile> {
        let index = self.staged.iter().position(|(name, _)| name == field)?;
        Some(self.staged.remove(index).1)
    }

    /// Uploads staged files one at a time, then posts the request.
    ///
    /// The first failed upload aborts the submission; identifiers obtained
    /// before it are discarded. On success the selection, staged files and
    /// identifier map are cleared.
    #[instrument(skip(self), fields(doctype = ?self.selected))]
    pub async fn submit(&mut self) -> Result<serde_json::Value, SubmitError> {
        let Some(receiver) = self.wallet_address.clone() else {
            self.notifier.error(WALLET_REQUIRED);
            return Err(SubmitError::WalletNotConnected);
        };
        let _in_flight =
            InFlight::acquire(&self.uploading).ok_or(SubmitError::AlreadySubmitting)?;

        let mut cids = self.required.clone();
        for (field, file) in &self.staged {
            if !cids.is_unresolved(field) {
                continue;
            }
            self.notifier.info(&format!("Uploading {field} to IPFS..."));
            match self.pinning.pin_file(file).await {
                Ok(cid) => {
                    cids.set(field, cid);
                    self.notifier
                        .success(&format!("{field} uploaded successfully!"));
                }
                Err(source) => {
                    error!("Error uploading {field}: {source}");
                    self.notifier.error(&format!("Failed to upload {field}"));
                    return Err(SubmitError::Upload {
                        field: field.clone(),
                        source,
                    });
                }
            }
        }

        let payload = self.payload(&cids, &receiver);
        if cids.unresolved().next().is_some() {
            warn!(
                "Submitting with unresolved fields: {:?}",
                cids.unresolved().collect::<Vec<_>>()
            );
        }

        match self.backend.request_document(&payload).await {
            Ok(reply) => {
                self.notifier.success(SUBMIT_SUCCEEDED);
                info!("Request data: {reply}");
                self.selected = None;
                self.board = None;
                self.staged.clear();
                self.required.clear();
                Ok(reply)
            }
            Err(source) => {
                error!("Error submitting request: {source}");
                self.notifier.error(SUBMIT_FAILED);
                Err(SubmitError::Request(source))
            }
        }
    }

    fn payload(&self, cids: &RequiredCidMap, receiver: &WalletAddress) -> SubmissionPayload {
        SubmissionPayload {
            doctype: self
                .selected
                .map(|doc_type| doc_type.as_str().to_string())
                .unwrap_or_default(),
            issuing_authority: self
                .selected
                .map(|doc_type| doc_type.issuing_authority().to_string())
                .unwrap_or_default(),
            message: self.additional_info.clone(),
            cid: cids.joined_cids(),
            receiver: receiver.to_string(),
            status: RequestStatus::Pending,
        }
    }
}
