//! Numbered finding extraction from free-text observations
//!
//! Inspectors write several findings into one observation, numbered
//! `1.1`, `1.2`, `2.1` and so on. The recommendation field is numbered the
//! same way but independently: a finding's recommendation is whatever the
//! recommendation text holds under the same number, which may be nothing.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::Observation;
use serde::Serialize;

/// Keywords placing a finding on the outside of the vessel
pub const EXTERNAL_KEYWORDS: &[&str] = &[
    "external",
    "exterior",
    "shell surface",
    "outer",
    "outside",
    "shell",
    "coating",
    "paint",
    "insulation",
];

/// Keywords placing a finding on the inside of the vessel
pub const INTERNAL_KEYWORDS: &[&str] = &[
    "internal",
    "interior",
    "inner",
    "inside",
    "through-wall",
    "manhole",
    "nozzle",
    "dish head",
    "bottom",
    "weld seam",
];

lazy_static! {
    /// Finding number token, ASCII digits only. Not anchored to line starts.
    static ref FINDING_NUMBER_PATTERN: Regex = Regex::new(r"[0-9]+\.[0-9]+").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    External,
    Internal,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::External => "External",
            Section::Internal => "Internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// `<int>.<int>` when parsed, otherwise the observation's own number (if any)
    pub finding_number: Option<String>,
    pub text: String,
    pub recommendation: String,
    pub section: Section,
}

/// A numbered span: the token and the text up to the next token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedSegment<'a> {
    pub number: &'a str,
    pub text: &'a str,
}

/// Split text into numbered segments. Each segment runs from the end of one
/// number token to the start of the next (or end of input), across line
/// breaks. Text before the first token is discarded.
pub fn numbered_segments(text: &str) -> Vec<NumberedSegment<'_>> {
    let tokens: Vec<_> = FINDING_NUMBER_PATTERN.find_iter(text).collect();

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let end = tokens.get(i + 1).map_or(text.len(), |next| next.start());
            NumberedSegment {
                number: token.as_str(),
                text: text[token.end()..end].trim(),
            }
        })
        .collect()
}

/// Classify finding text. External only when an external keyword is present
/// and no internal keyword is; everything else is internal.
pub fn detect_section(text: &str) -> Section {
    let lower = text.to_lowercase();
    let has_external = EXTERNAL_KEYWORDS.iter().any(|k| lower.contains(k));
    let has_internal = INTERNAL_KEYWORDS.iter().any(|k| lower.contains(k));

    if has_external && !has_internal {
        Section::External
    } else {
        Section::Internal
    }
}

/// Recommendation text filed under `number`, or empty when there is none
fn recommendation_for(recommendation: &str, number: &str) -> String {
    numbered_segments(recommendation)
        .into_iter()
        .find(|segment| segment.number == number)
        .map(|segment| segment.text.to_string())
        .unwrap_or_default()
}

/// Extract findings in document order. Never empty: without any numbered
/// token the whole observation becomes a single finding.
pub fn parse_findings(observation: &Observation) -> Vec<Finding> {
    let description = observation.description.as_str();
    let recommendation = observation.recommendation.as_deref().unwrap_or("");

    let segments = numbered_segments(description);
    if segments.is_empty() {
        return vec![Finding {
            finding_number: observation
                .finding_number
                .clone()
                .filter(|n| !n.trim().is_empty()),
            text: description.to_string(),
            recommendation: recommendation.to_string(),
            section: detect_section(description),
        }];
    }

    segments
        .into_iter()
        .map(|segment| Finding {
            finding_number: Some(segment.number.to_string()),
            text: segment.text.to_string(),
            recommendation: recommendation_for(recommendation, segment.number),
            section: detect_section(segment.text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn observation(description: &str, recommendation: Option<&str>) -> Observation {
        Observation {
            description: description.to_string(),
            recommendation: recommendation.map(str::to_string),
            severity: None,
            finding_number: None,
            photo_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_two_findings_with_paired_recommendations() {
        let obs = observation(
            "1.1 Corrosion on external shell. 1.2 Pitting observed internally near nozzle.",
            Some("1.1 Repaint. 1.2 Monitor."),
        );

        let findings = parse_findings(&obs);
        assert_eq!(
            findings,
            vec![
                Finding {
                    finding_number: Some("1.1".into()),
                    text: "Corrosion on external shell.".into(),
                    recommendation: "Repaint.".into(),
                    section: Section::External,
                },
                Finding {
                    finding_number: Some("1.2".into()),
                    text: "Pitting observed internally near nozzle.".into(),
                    recommendation: "Monitor.".into(),
                    section: Section::Internal,
                },
            ]
        );
    }

    #[test]
    fn test_numbers_kept_in_document_order() {
        let obs = observation("2.1 Last first\n1.1 Then this\n1.2 And this", None);
        let numbers: Vec<_> = parse_findings(&obs)
            .into_iter()
            .map(|f| f.finding_number.unwrap())
            .collect();
        assert_eq!(numbers, vec!["2.1", "1.1", "1.2"]);
    }

    #[test]
    fn test_three_findings_exactly() {
        let obs = observation("1.1 a\n1.2 b\n2.1 c", None);
        let findings = parse_findings(&obs);
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[2].finding_number.as_deref(), Some("2.1"));
        assert_eq!(findings[2].text, "c");
    }

    #[test]
    fn test_multiline_text_runs_to_next_token() {
        let obs = observation(
            "1.1 Scale deposits on shell\nextending to the saddle.\n1.2 Gasket worn",
            None,
        );
        let findings = parse_findings(&obs);
        assert_eq!(
            findings[0].text,
            "Scale deposits on shell\nextending to the saddle."
        );
    }

    #[test]
    fn test_mid_line_numbers_still_split() {
        let obs = observation("1.1 Wall loss of 2.5 mm measured", None);
        let findings = parse_findings(&obs);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].text, "Wall loss of");
        assert_eq!(findings[1].finding_number.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_recommendation_numbering_is_independent() {
        let obs = observation(
            "1.1 Coating breakdown\n1.2 Nozzle erosion",
            Some("1.2 Build up by welding"),
        );
        let findings = parse_findings(&obs);
        assert_eq!(findings[0].recommendation, "");
        assert_eq!(findings[1].recommendation, "Build up by welding");
    }

    #[test]
    fn test_fallback_without_numbers() {
        let mut obs = observation("General surface rust", Some("Clean and repaint"));
        obs.finding_number = Some("3".into());

        let findings = parse_findings(&obs);
        assert_eq!(
            findings,
            vec![Finding {
                finding_number: Some("3".into()),
                text: "General surface rust".into(),
                recommendation: "Clean and repaint".into(),
                section: Section::Internal,
            }]
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_finding_numbers() {
        let obs = observation("\u{661}.\u{662} rust on shell", None);
        let findings = parse_findings(&obs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_number, None);
        assert_eq!(findings[0].text, "\u{661}.\u{662} rust on shell");
    }

    #[test]
    fn test_fallback_is_stable() {
        let obs = observation("Paint blistering on outer surface", None);
        let first = parse_findings(&obs);
        let second = parse_findings(&obs);
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first[0].section, Section::External);
        assert_eq!(first[0].finding_number, None);
    }

    #[test]
    fn test_empty_description_yields_one_finding() {
        let obs = observation("", None);
        let findings = parse_findings(&obs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "");
    }

    #[test]
    fn test_detect_section_external_only() {
        assert_eq!(
            detect_section("Corrosion on the external shell surface"),
            Section::External
        );
    }

    #[test]
    fn test_detect_section_internal_wins_ties() {
        assert_eq!(
            detect_section("External coating damage near the manhole"),
            Section::Internal
        );
    }

    #[test]
    fn test_detect_section_defaults_to_internal() {
        assert_eq!(detect_section("Minor pitting observed"), Section::Internal);
    }

    #[test]
    fn test_detect_section_is_case_insensitive() {
        assert_eq!(detect_section("INSULATION DAMAGED"), Section::External);
    }
}
