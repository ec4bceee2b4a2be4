use super::{catalog::DocumentType, models::IssuedDocument};

/// Required field label mapped to its content identifier, in declaration order.
///
/// A field is unresolved (`None`) when no issued document carries its exact
/// label, or the matching document has an empty identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredCidMap {
    entries: Vec<(String, Option<String>)>,
}

impl RequiredCidMap {
    /// Resolves every required field of `doc_type` against the issued documents.
    /// The first document whose label equals the field name wins.
    pub fn resolve(doc_type: DocumentType, documents: &[IssuedDocument]) -> Self {
        let entries = doc_type
            .required_fields()
            .iter()
            .map(|field| {
                let cid = documents
                    .iter()
                    .find(|doc| doc.message == *field)
                    .and_then(|doc| non_empty(doc.cid.clone()));
                (field.to_string(), cid)
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    /// `None` if the field is absent or unresolved.
    pub fn cid(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, cid)| cid.as_deref())
    }

    pub fn is_unresolved(&self, field: &str) -> bool {
        self.entries
            .iter()
            .any(|(name, cid)| name == field && cid.is_none())
    }

    /// Records an identifier for an existing field. Returns false if the field
    /// is unknown. An empty identifier leaves the field unresolved.
    pub fn set(&mut self, field: &str, cid: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = non_empty(cid.into());
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, cid)| (name.as_str(), cid.as_deref()))
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, cid)| cid.is_none())
            .map(|(name, _)| name)
    }

    /// Resolved identifiers in field order, joined with ", ".
    pub fn joined_cids(&self) -> String {
        self.iter()
            .filter_map(|(_, cid)| cid)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn non_empty(cid: String) -> Option<String> {
    (!cid.is_empty()).then_some(cid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(message: &str, cid: &str) -> IssuedDocument {
        IssuedDocument {
            message: message.to_string(),
            cid: cid.to_string(),
        }
    }

    #[test]
    fn test_key_set_matches_required_fields_for_every_type() {
        let documents = vec![doc("Birth Certificate", "QmBirth"), doc("Admit Card", "QmAdmit")];

        for doc_type in DocumentType::ALL {
            let map = RequiredCidMap::resolve(doc_type, &documents);
            let fields: Vec<_> = map.fields().collect();
            assert_eq!(fields, doc_type.required_fields(), "{doc_type}");
        }
    }

    #[test]
    fn test_exact_match_resolves_cid() {
        let documents = vec![doc("Birth Certificate", "QmBirth")];
        let map = RequiredCidMap::resolve(DocumentType::MigrationCertificate, &documents);

        assert_eq!(map.cid("Birth Certificate"), Some("QmBirth"));
        assert_eq!(map.cid("XII Marksheet"), None);
        assert!(map.is_unresolved("XII Marksheet"));
        assert!(!map.is_unresolved("Birth Certificate"));
    }

    #[test]
    fn test_match_is_case_sensitive_and_not_partial() {
        let documents = vec![
            doc("birth certificate", "QmLower"),
            doc("Birth Certificate (copy)", "QmCopy"),
            doc("Birth", "QmShort"),
        ];
        let map = RequiredCidMap::resolve(DocumentType::Passport, &documents);

        assert_eq!(map.len(), 1);
        assert_eq!(map.cid("Birth Certificate"), None);
    }

    #[test]
    fn test_first_matching_document_wins() {
        let documents = vec![
            doc("Salary Slip", "QmFirst"),
            doc("Salary Slip", "QmSecond"),
        ];
        let map = RequiredCidMap::resolve(DocumentType::IncomeCertificate, &documents);
        assert_eq!(map.cid("Salary Slip"), Some("QmFirst"));
    }

    #[test]
    fn test_joined_cids_follow_declaration_order() {
        let documents = vec![doc("Proof of Residence", "QmHome"), doc("Birth Certificate", "QmBirth")];
        let map = RequiredCidMap::resolve(DocumentType::DomicileCertificate, &documents);
        assert_eq!(map.joined_cids(), "QmBirth, QmHome");
    }

    #[test]
    fn test_set_only_updates_known_fields() {
        let mut map = RequiredCidMap::resolve(DocumentType::DeathCertificate, &[]);
        assert_eq!(map.unresolved().count(), 2);

        assert!(map.set("Death Report", "QmReport"));
        assert!(!map.set("Salary Slip", "QmSlip"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.joined_cids(), "QmReport");
        assert_eq!(map.unresolved().collect::<Vec<_>>(), vec!["Birth Certificate"]);
    }

    #[test]
    fn test_empty_cid_counts_as_unresolved() {
        let documents = vec![doc("Birth Certificate", ""), doc("XII Marksheet", "QmMarks")];
        let mut map = RequiredCidMap::resolve(DocumentType::MigrationCertificate, &documents);

        assert!(map.contains("Birth Certificate"));
        assert!(map.is_unresolved("Birth Certificate"));
        assert_eq!(map.cid("Birth Certificate"), None);
        assert_eq!(map.joined_cids(), "QmMarks");

        assert!(map.set("XII Marksheet", ""));
        assert!(map.is_unresolved("XII Marksheet"));
        assert_eq!(map.joined_cids(), "");
    }
}
