//! Fixed report wording and naming conventions
//!
//! The titles and the condition paragraph are compliance text and must be
//! reproduced exactly.

use chrono::{Datelike, NaiveDate};
use report_types::ReportBundle;

pub const CAMPAIGN_TITLE: &str = "MAJOR TURNAROUND 2025";
pub const REPORT_TITLE: &str = "PRESSURE VESSEL INSPECTION REPORT";
pub const SUMMARY_SUBTITLE: &str = "FINDINGS, NDTs & RECOMMENDATIONS";
pub const PHOTOS_SUBTITLE: &str = "PHOTOS REPORT";

pub const CONDITION_LABEL: &str = "Condition:";
pub const CONDITION_TEXT: &str = "The vessel was opened, isolated, drained, depressurised, \
cleaned and gas freed prior to inspection. Visual inspection was carried out on all \
accessible internal surfaces including the shell, dish heads, nozzles, manhole, weld \
seams and internal attachments, followed by inspection of the external surfaces, \
supports, insulation and coating. Inspection was performed in accordance with the \
Factories and Machinery (Special Scheme of Inspection) (Risk-Based Inspection) \
Regulations and the approved written scheme of examination.";

pub const PHOTO_NOT_FOUND: &str = "[Photo not found]";

pub const REPORT_FILENAME_PREFIX: &str = "Visual Inspection Report_";

/// NDT wording used when the findings summary has none, chosen by tag prefix
pub fn default_ndt_text(tag_no: &str) -> String {
    let tag = tag_no.trim();
    let upper = tag.to_uppercase();
    if upper.starts_with("V-") {
        format!(
            "Ultrasonic thickness measurement (UTTM) was carried out on the shell and \
             dish heads of vessel {}. Readings were found satisfactory with no significant \
             wall loss detected.",
            tag
        )
    } else if upper.starts_with("R-") {
        format!(
            "Ultrasonic thickness measurement (UTTM) was carried out on the shell, dish \
             heads and nozzles of reactor {}. Readings were found satisfactory with no \
             significant wall loss detected.",
            tag
        )
    } else {
        format!(
            "Ultrasonic thickness measurement (UTTM) was carried out on equipment {}. \
             Readings were found satisfactory.",
            tag
        )
    }
}

/// `PLANT<plant>/VI/<tag>/TA<year>`
pub fn format_report_number(plant_identifier: &str, tag_no: &str, year: i32) -> String {
    format!("PLANT{}/VI/{}/TA{}", plant_identifier, tag_no.trim(), year)
}

/// Report number carried by the bundle, or one built from the vessel's
/// plant unit and the report year
pub fn report_number(bundle: &ReportBundle, today: NaiveDate) -> String {
    if let Some(number) = bundle
        .inspection
        .report_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        return number.to_string();
    }

    let plant = bundle
        .vessel
        .plant_unit
        .as_deref()
        .map(plant_identifier)
        .unwrap_or_default();
    let year = bundle.report_date().unwrap_or(today).year();
    format_report_number(&plant, &bundle.vessel.tag_no, year)
}

/// "Plant 3" / "PLANT-3" / "3" all identify plant `3`
fn plant_identifier(plant_unit: &str) -> String {
    let trimmed = plant_unit.trim();
    let without_prefix = match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("plant") => &trimmed[5..],
        _ => trimmed,
    };
    without_prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// `Visual Inspection Report_<tag>.pdf`, with path separators in the tag
/// replaced so the name stays a single path component
pub fn report_filename(tag_no: &str) -> String {
    let safe_tag: String = tag_no
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}{}.pdf", REPORT_FILENAME_PREFIX, safe_tag)
}

/// Public URL of a stored report
pub fn report_url(public_prefix: &str, filename: &str) -> String {
    format!("{}/{}", public_prefix.trim_end_matches('/'), filename)
}

/// Dates print as `14/03/2025`; unknown dates as `-`
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
