//! Curated reference table of skin conditions.
//!
//! Loaded once at startup (bundled JSON or an override file), validated
//! against the classifier's label set, then shared read-only by every
//! request. Array order in the source file is the table's natural order,
//! which the related-condition resolver relies on.

pub mod related;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use thiserror::Error;

use crate::models::{DiseaseRecord, DiseaseSummary};

/// Bundled table shipped with the binary.
const BUNDLED_TABLE: &str = include_str!("../../resources/diseases.json");

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Reference table is empty")]
    Empty,

    #[error("Duplicate disease name: {0}")]
    DuplicateName(String),

    #[error("Detectable disease {0} must not list related conditions")]
    DetectableWithRelated(String),

    #[error("Informational disease {0} has no related conditions")]
    MissingRelated(String),

    #[error("Disease {disease} is related to unknown disease {target}")]
    DanglingRelated { disease: String, target: String },

    #[error("Class label {0} has no detectable record")]
    LabelWithoutRecord(String),

    #[error("Detectable disease {0} is not a class label")]
    RecordWithoutLabel(String),
}

/// Immutable, ordered disease table with a case-folded name index.
#[derive(Debug)]
pub struct ReferenceTable {
    records: Vec<DiseaseRecord>,
    by_lower_name: HashMap<String, usize>,
}

impl ReferenceTable {
    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json("bundled diseases.json", BUNDLED_TABLE)
    }

    /// Load a table from a JSON file (array of records).
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
        Self::from_json(&path.display().to_string(), &json)
    }

    pub fn from_json(source: &str, json: &str) -> Result<Self, ReferenceError> {
        let records: Vec<DiseaseRecord> = serde_json::from_str(json)
            .map_err(|e| ReferenceError::Parse(source.to_string(), e.to_string()))?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<DiseaseRecord>) -> Result<Self, ReferenceError> {
        if records.is_empty() {
            return Err(ReferenceError::Empty);
        }

        let mut by_lower_name = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_lower_name
                .insert(record.name.to_lowercase(), idx)
                .is_some()
            {
                return Err(ReferenceError::DuplicateName(record.name.clone()));
            }
        }

        Ok(Self {
            records,
            by_lower_name,
        })
    }

    /// Check the table's internal references and its agreement with the
    /// classifier's label set. Startup refuses to serve on any violation.
    pub fn validate(&self, labels: &[&str]) -> Result<(), ReferenceError> {
        for record in &self.records {
            if record.detectable && !record.related_to.is_empty() {
                return Err(ReferenceError::DetectableWithRelated(record.name.clone()));
            }
            if !record.detectable && record.related_to.is_empty() {
                return Err(ReferenceError::MissingRelated(record.name.clone()));
            }
            for target in &record.related_to {
                match self.get_exact(target) {
                    None => {
                        return Err(ReferenceError::DanglingRelated {
                            disease: record.name.clone(),
                            target: target.clone(),
                        })
                    }
                    // Never surfaced: predictions only carry detectable labels.
                    Some(other) if !other.detectable => {
                        tracing::warn!(
                            disease = %record.name,
                            related = %target,
                            "Related condition points at a non-detectable record"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        for label in labels {
            match self.get_exact(label) {
                Some(record) if record.detectable => {}
                _ => return Err(ReferenceError::LabelWithoutRecord(label.to_string())),
            }
        }
        for record in self.records.iter().filter(|r| r.detectable) {
            if !labels.contains(&record.name.as_str()) {
                return Err(ReferenceError::RecordWithoutLabel(record.name.clone()));
            }
        }

        Ok(())
    }

    /// Case-insensitive exact lookup.
    pub fn lookup(&self, name: &str) -> Option<&DiseaseRecord> {
        self.by_lower_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.records[idx])
    }

    /// Case-sensitive lookup, used for label and relation matching.
    pub fn get_exact(&self, name: &str) -> Option<&DiseaseRecord> {
        self.lookup(name).filter(|r| r.name == name)
    }

    /// All records in table order.
    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn detectable_count(&self) -> usize {
        self.records.iter().filter(|r| r.detectable).count()
    }

    /// Summaries ordered detectable-first, then by category, then by name.
    pub fn sorted_summaries(&self) -> Vec<DiseaseSummary> {
        let mut summaries: Vec<DiseaseSummary> =
            self.records.iter().map(DiseaseRecord::summary).collect();
        summaries.sort_by(|a, b| {
            b.detectable
                .cmp(&a.detectable)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.name.cmp(&b.name))
        });
        summaries
    }

    /// Distinct category names, ascending.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::labels::CLASS_LABELS;
    use crate::models::Severity;

    fn record(name: &str, category: &str, detectable: bool, related: &[&str]) -> DiseaseRecord {
        DiseaseRecord {
            name: name.into(),
            category: category.into(),
            description: format!("{name} description"),
            symptoms: vec![],
            causes: vec![],
            recommendation: String::new(),
            severity: Severity::Moderate,
            contagious: false,
            detectable,
            related_to: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn bundled_table_loads_and_validates() {
        let table = ReferenceTable::bundled().unwrap();
        assert_eq!(table.len(), 18);
        assert_eq!(table.detectable_count(), 8);
        table.validate(&CLASS_LABELS).unwrap();
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = ReferenceTable::bundled().unwrap();
        let upper = table.lookup("CELLULITIS").unwrap();
        let title = table.lookup("Cellulitis").unwrap();
        assert_eq!(upper.name, title.name);
        assert_eq!(table.lookup("athlete's foot").unwrap().name, "Athlete's Foot");
        assert!(table.lookup("unknownname").is_none());
    }

    #[test]
    fn get_exact_respects_case() {
        let table = ReferenceTable::bundled().unwrap();
        assert!(table.get_exact("Impetigo").is_some());
        assert!(table.get_exact("impetigo").is_none());
    }

    #[test]
    fn every_related_name_resolves() {
        let table = ReferenceTable::bundled().unwrap();
        for record in table.records() {
            for target in &record.related_to {
                assert!(
                    table.lookup(target).is_some(),
                    "{} -> {} does not resolve",
                    record.name,
                    target
                );
            }
        }
    }

    #[test]
    fn listing_puts_detectable_first() {
        let table = ReferenceTable::bundled().unwrap();
        let summaries = table.sorted_summaries();
        let first_informational = summaries.iter().position(|s| !s.detectable).unwrap();
        assert!(summaries[..first_informational].iter().all(|s| s.detectable));
        assert!(summaries[first_informational..].iter().all(|s| !s.detectable));
    }

    #[test]
    fn listing_orders_by_category_then_name() {
        let table = ReferenceTable::from_records(vec![
            record("Zeta", "Alpha", false, &["Beta"]),
            record("Beta", "Zulu", true, &[]),
            record("Alpha", "Zulu", true, &[]),
            record("Gamma", "Alpha", true, &[]),
        ])
        .unwrap();
        let names: Vec<String> = table
            .sorted_summaries()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn listing_descriptions_are_truncated() {
        let table = ReferenceTable::bundled().unwrap();
        for summary in table.sorted_summaries() {
            assert!(summary.description.chars().count() <= 203);
            assert!(summary.description.ends_with("..."));
        }
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let table = ReferenceTable::bundled().unwrap();
        let categories = table.categories();
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(categories, sorted);
        assert!(categories.contains(&"Fungal Infections".to_string()));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ReferenceTable::from_records(vec![
            record("Ringworm", "Fungal", true, &[]),
            record("RINGWORM", "Fungal", true, &[]),
        ]);
        assert!(matches!(result, Err(ReferenceError::DuplicateName(_))));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            ReferenceTable::from_records(vec![]),
            Err(ReferenceError::Empty)
        ));
    }

    #[test]
    fn dangling_relation_fails_validation() {
        let table = ReferenceTable::from_records(vec![
            record("Ringworm", "Fungal", true, &[]),
            record("Jock Itch", "Fungal", false, &["Athlete's Foot"]),
        ])
        .unwrap();
        let err = table.validate(&["Ringworm"]).unwrap_err();
        assert!(matches!(err, ReferenceError::DanglingRelated { .. }));
    }

    #[test]
    fn relation_to_informational_record_is_tolerated() {
        let table = ReferenceTable::from_records(vec![
            record("Ringworm", "Fungal", true, &[]),
            record("Eczema", "Inflammatory", false, &["Ringworm"]),
            record("Psoriasis", "Autoimmune", false, &["Ringworm", "Eczema"]),
        ])
        .unwrap();
        table.validate(&["Ringworm"]).unwrap();
    }

    #[test]
    fn label_set_mismatch_fails_validation() {
        let table = ReferenceTable::from_records(vec![
            record("Ringworm", "Fungal", true, &[]),
            record("Shingles", "Viral", true, &[]),
        ])
        .unwrap();
        assert!(matches!(
            table.validate(&["Ringworm"]),
            Err(ReferenceError::RecordWithoutLabel(_))
        ));
        assert!(matches!(
            table.validate(&["Ringworm", "Shingles", "Chickenpox"]),
            Err(ReferenceError::LabelWithoutRecord(_))
        ));
    }

    #[test]
    fn detectable_with_relations_fails_validation() {
        let table = ReferenceTable::from_records(vec![
            record("Ringworm", "Fungal", true, &["Ringworm"]),
        ])
        .unwrap();
        assert!(matches!(
            table.validate(&["Ringworm"]),
            Err(ReferenceError::DetectableWithRelated(_))
        ));
    }

    #[test]
    fn load_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diseases.json");
        let records = vec![record("Ringworm", "Fungal", true, &[])];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let table = ReferenceTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.lookup("ringworm").is_some());
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ReferenceTable::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ReferenceError::Load(_, _))));

        let bad = ReferenceTable::from_json("inline", "{\"not\": \"an array\"}");
        assert!(matches!(bad, Err(ReferenceError::Parse(_, _))));
    }
}
