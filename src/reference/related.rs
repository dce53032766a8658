use crate::models::RelatedCondition;

use super::ReferenceTable;

/// At most this many related conditions accompany a prediction.
pub const MAX_RELATED: usize = 3;

impl ReferenceTable {
    /// Informational conditions hand-linked to `label`, first found first,
    /// in table order. No ranking beyond that.
    pub fn related_conditions(&self, label: &str) -> Vec<RelatedCondition> {
        self.records()
            .iter()
            .filter(|record| record.is_related_to(label))
            .take(MAX_RELATED)
            .map(|record| record.related_view())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiseaseRecord, Severity};

    fn informational(name: &str, related: &[&str]) -> DiseaseRecord {
        DiseaseRecord {
            name: name.into(),
            category: "Inflammatory Conditions".into(),
            description: "d".repeat(300),
            symptoms: vec![],
            causes: vec![],
            recommendation: String::new(),
            severity: Severity::Mild,
            contagious: false,
            detectable: false,
            related_to: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn impetigo_resolves_to_informational_records() {
        let table = ReferenceTable::bundled().unwrap();
        let related = table.related_conditions("Impetigo");
        assert!(!related.is_empty());
        assert!(related.len() <= MAX_RELATED);
        for condition in &related {
            let record = table.lookup(&condition.name).unwrap();
            assert!(!record.detectable);
            assert!(record.related_to.iter().any(|r| r == "Impetigo"));
        }
    }

    #[test]
    fn impetigo_follows_table_order() {
        let table = ReferenceTable::bundled().unwrap();
        let names: Vec<String> = table
            .related_conditions("Impetigo")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Acne", "Eczema", "Rosacea"]);
    }

    #[test]
    fn results_are_capped_at_three() {
        let table = ReferenceTable::from_records(vec![
            informational("A", &["Ringworm"]),
            informational("B", &["Ringworm"]),
            informational("C", &["Ringworm"]),
            informational("D", &["Ringworm"]),
        ])
        .unwrap();
        let names: Vec<String> = table
            .related_conditions("Ringworm")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn descriptions_are_truncated_to_150_chars() {
        let table = ReferenceTable::from_records(vec![informational("A", &["Ringworm"])]).unwrap();
        let related = table.related_conditions("Ringworm");
        assert_eq!(related[0].description.chars().count(), 153);
    }

    #[test]
    fn unrelated_label_yields_nothing() {
        let table = ReferenceTable::bundled().unwrap();
        assert!(table.related_conditions("Not A Disease").is_empty());
    }
}
