//! Snapshot of what the form shows, independent of any UI toolkit.

use std::fmt;

use super::RequestForm;
use crate::domain::{
    Board, DocumentType,
    ports::{DocumentBackend, Notifier, PinningService, WalletProvider},
};

pub const CONNECTING_LABEL: &str = "Connecting...";
pub const SUBMIT_LABEL: &str = "Submit Request";
pub const UPLOADING_LABEL: &str = "Uploading Files...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub wallet_label: String,
    pub document_types: Vec<DocumentType>,
    pub selected: Option<DocumentType>,
    pub issuing_authority: Option<&'static str>,
    /// Only present for document types that ask for a board.
    pub board_select: Option<BoardSelectView>,
    pub fields: Vec<FieldView>,
    pub additional_info: String,
    pub submit: SubmitButtonView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSelectView {
    pub options: Vec<Board>,
    pub selected: Option<Board>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub status: FieldStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    AutoFilled { cid: String },
    UploadRequired { staged_file: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

impl<W, B, P, N> RequestForm<W, B, P, N>
where
    W: WalletProvider,
    B: DocumentBackend,
    P: PinningService,
    N: Notifier,
{
    pub fn view(&self) -> FormView {
        let wallet_label = match self.wallet_address() {
            Some(address) => format!("Wallet Connected: {}", address.short()),
            None => CONNECTING_LABEL.to_string(),
        };

        let selected = self.selected();
        let board_select = selected
            .filter(DocumentType::requires_board)
            .map(|_| BoardSelectView {
                options: Board::ALL.to_vec(),
                selected: self.board(),
            });

        let fields = match selected {
            Some(doc_type) => doc_type
                .required_fields()
                .iter()
                .map(|field| {
                    let status = match self.required_cids().cid(field) {
                        Some(cid) => FieldStatus::AutoFilled {
                            cid: cid.to_string(),
                        },
                        None => FieldStatus::UploadRequired {
                            staged_file: self.staged_file(field).map(|f| f.file_name.clone()),
                        },
                    };
                    FieldView {
                        label: field.to_string(),
                        status,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let uploading = self.is_uploading();
        FormView {
            wallet_label,
            document_types: DocumentType::ALL.to_vec(),
            selected,
            issuing_authority: selected.map(|doc_type| doc_type.issuing_authority()),
            board_select,
            fields,
            additional_info: self.additional_info().to_string(),
            submit: SubmitButtonView {
                label: if uploading { UPLOADING_LABEL } else { SUBMIT_LABEL },
                disabled: uploading,
            },
        }
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Request a Document")?;
        writeln!(f, "[{}]", self.wallet_label)?;

        match self.selected {
            Some(doc_type) => writeln!(f, "Document Type: {doc_type}")?,
            None => writeln!(f, "Document Type: --Select Document--")?,
        }
        if let Some(authority) = self.issuing_authority {
            writeln!(f, "Issuing Authority: {authority}")?;
        }
        if let Some(board) = &self.board_select {
            let choice = board
                .selected
                .map(|b| b.as_str())
                .unwrap_or("--Select Board--");
            writeln!(f, "Board: {choice}")?;
        }

        for field in &self.fields {
            match &field.status {
                FieldStatus::AutoFilled { cid } => {
                    writeln!(f, "  {} (Auto-filled) IPFS CID: {cid}", field.label)?
                }
                FieldStatus::UploadRequired { staged_file } => {
                    write!(f, "  {} (Upload Required)", field.label)?;
                    match staged_file {
                        Some(name) => writeln!(f, " File selected: {name}")?,
                        None => writeln!(f)?,
                    }
                }
            }
        }

        if !self.additional_info.is_empty() {
            writeln!(f, "Additional Information: {}", self.additional_info)?;
        }
        write!(
            f,
            "[{}{}]",
            self.submit.label,
            if self.submit.disabled { " (disabled)" } else { "" }
        )
    }
}
