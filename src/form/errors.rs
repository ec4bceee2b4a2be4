use crate::domain::{
    DocumentType,
    catalog::{UnknownBoard, UnknownDocumentType},
    ports::{BackendError, PinningError},
};

/// Why a submission did not reach the backend, or failed there.
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("No wallet address is connected")]
    WalletNotConnected,

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Failed to upload {field}: {source}")]
    Upload {
        field: String,
        #[source]
        source: PinningError,
    },

    #[error("Document request failed: {0}")]
    Request(#[source] BackendError),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StageError {
    #[error("No document type is selected")]
    NoDocumentType,

    #[error("{field} is not required for {doc_type}")]
    NotRequired {
        field: String,
        doc_type: DocumentType,
    },

    #[error("{0} is already resolved from an issued document")]
    AlreadyResolved(String),

    #[error("Unsupported file type: {0} (expected .pdf, .jpg, .jpeg or .png)")]
    UnsupportedFileType(String),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error(transparent)]
    UnknownDocumentType(#[from] UnknownDocumentType),

    #[error(transparent)]
    UnknownBoard(#[from] UnknownBoard),

    #[error("A board can only be chosen for a Migration Certificate (selected: {0:?})")]
    BoardNotApplicable(Option<DocumentType>),
}
