pub mod catalog;
pub mod models;
pub mod ports;
pub mod resolution;

pub use catalog::{Board, DocumentType};
pub use models::{IssuedDocument, RequestStatus, StagedFile, SubmissionPayload, WalletAddress};
pub use resolution::RequiredCidMap;
