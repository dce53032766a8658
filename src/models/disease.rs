use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// Characters of description kept in the `/diseases` listing.
pub const SUMMARY_DESCRIPTION_CHARS: usize = 200;
/// Characters of description kept for related conditions.
pub const RELATED_DESCRIPTION_CHARS: usize = 150;
pub const ELLIPSIS: &str = "...";

/// One condition in the reference table.
///
/// `related_to` is only populated for informational (non-detectable) records
/// and names the detectable conditions they are commonly confused with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub category: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub recommendation: String,
    pub severity: Severity,
    pub contagious: bool,
    pub detectable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_to: Vec<String>,
}

impl DiseaseRecord {
    pub fn is_related_to(&self, label: &str) -> bool {
        !self.detectable && self.related_to.iter().any(|r| r == label)
    }

    pub fn summary(&self) -> DiseaseSummary {
        DiseaseSummary {
            name: self.name.clone(),
            category: self.category.clone(),
            severity: self.severity,
            contagious: self.contagious,
            detectable: self.detectable,
            description: truncate_with_ellipsis(&self.description, SUMMARY_DESCRIPTION_CHARS),
        }
    }

    pub fn related_view(&self) -> RelatedCondition {
        RelatedCondition {
            name: self.name.clone(),
            category: self.category.clone(),
            description: truncate_with_ellipsis(&self.description, RELATED_DESCRIPTION_CHARS),
        }
    }
}

/// Listing projection used by `GET /diseases`.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseSummary {
    pub name: String,
    pub category: String,
    pub severity: Severity,
    pub contagious: bool,
    pub detectable: bool,
    pub description: String,
}

/// Informational condition shown next to a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedCondition {
    pub name: String,
    pub category: String,
    pub description: String,
}

/// Keep the first `max_chars` characters and always append the ellipsis,
/// matching what clients already render.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}
