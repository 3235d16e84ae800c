use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type PhotoId = i64;

/// Everything a single report generation reads. Never mutated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub inspection: Inspection,
    pub vessel: Vessel,
    #[serde(default)]
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub inspector: Option<Person>,
    #[serde(default)]
    pub reviewer: Option<Person>,
    #[serde(default, rename = "findingsSummary", alias = "findings_summary")]
    pub findings_summary: Option<FindingsSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    pub id: i64,
    #[serde(default)]
    pub report_number: Option<String>,
    #[serde(default)]
    pub dosh_registration: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub inspection_date: Option<NaiveDate>,
    #[serde(default)]
    pub vessel_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub tag_no: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vessel_type: Option<String>,
    #[serde(default)]
    pub plant_unit: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub design_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub finding_number: Option<String>,
    #[serde(default)]
    pub photo_ids: BTreeSet<PhotoId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Critical")]
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub photo_id: PhotoId,
    /// File name under `<uploadsRoot>/photos/`
    pub name: String,
    /// Group key; photos sharing it are rendered in one section
    #[serde(default)]
    pub tag_number: Option<String>,
    #[serde(default)]
    pub sequence_no: Option<i32>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Curated narrative maintained separately from the per-observation findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsSummary {
    #[serde(default)]
    pub initial_inspection: Option<String>,
    #[serde(default)]
    pub post_inspection: Option<String>,
    #[serde(default)]
    pub external_findings: Vec<SummaryItem>,
    #[serde(default)]
    pub internal_findings: Vec<SummaryItem>,
    #[serde(default)]
    pub ndt_testings: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<SummaryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub text: String,
}

impl ReportBundle {
    /// A photo is linked when at least one observation references it.
    pub fn is_photo_linked(&self, photo_id: PhotoId) -> bool {
        self.observations
            .iter()
            .any(|o| o.photo_ids.contains(&photo_id))
    }

    /// First observation, in bundle order, that references the photo
    pub fn observation_for_photo(&self, photo_id: PhotoId) -> Option<&Observation> {
        self.observations
            .iter()
            .find(|o| o.photo_ids.contains(&photo_id))
    }

    /// Inspection date, falling back to the record's creation date
    pub fn report_date(&self) -> Option<NaiveDate> {
        self.inspection
            .inspection_date
            .or_else(|| self.inspection.created_at.map(|ts| ts.date_naive()))
    }

    pub fn inspector_name(&self) -> Option<&str> {
        self.inspector.as_ref().map(|p| p.name.as_str())
    }

    pub fn reviewer_name(&self) -> Option<&str> {
        self.reviewer.as_ref().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"{
            "inspection": {
                "id": 42,
                "report_number": "PLANT3/VI/V-101/TA2025",
                "created_at": "2025-03-10T08:30:00Z",
                "inspection_date": "2025-03-14"
            },
            "vessel": { "tag_no": "V-101", "description": "Knock-out drum" },
            "observations": [
                { "description": "1.1 Paint peeling", "photo_ids": [7, 3], "severity": "high" },
                { "description": "General note", "photo_ids": [3] }
            ],
            "photos": [
                { "photo_id": 3, "name": "a.jpg", "tag_number": "1" },
                { "photo_id": 9, "name": "b.jpg" }
            ],
            "inspector": { "name": "Aminah Yusof", "email": "aminah@example.com" },
            "reviewer": null,
            "findingsSummary": {
                "external_findings": [{ "text": "Coating damage" }]
            }
        }"#
    }

    #[test]
    fn test_bundle_deserializes_caller_json() {
        let bundle: ReportBundle = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(bundle.inspection.id, 42);
        assert_eq!(bundle.vessel.tag_no, "V-101");
        assert_eq!(bundle.observations.len(), 2);
        assert_eq!(bundle.observations[0].severity, Some(Severity::High));
        assert!(bundle.reviewer.is_none());
        let summary = bundle.findings_summary.unwrap();
        assert_eq!(summary.external_findings.len(), 1);
        assert!(summary.internal_findings.is_empty());
    }

    #[test]
    fn test_linked_photos() {
        let bundle: ReportBundle = serde_json::from_str(sample_json()).unwrap();
        assert!(bundle.is_photo_linked(3));
        assert!(bundle.is_photo_linked(7));
        assert!(!bundle.is_photo_linked(9));
    }

    #[test]
    fn test_observation_for_photo_returns_first_match() {
        let bundle: ReportBundle = serde_json::from_str(sample_json()).unwrap();
        let obs = bundle.observation_for_photo(3).unwrap();
        assert_eq!(obs.description, "1.1 Paint peeling");
        assert!(bundle.observation_for_photo(9).is_none());
    }

    #[test]
    fn test_report_date_prefers_inspection_date() {
        let mut bundle: ReportBundle = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(
            bundle.report_date(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );

        bundle.inspection.inspection_date = None;
        assert_eq!(
            bundle.report_date(),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
    }
}
