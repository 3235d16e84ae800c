//! Findings summary page: condition, findings, NDT, recommendations and the
//! signature block

use report_types::{ReportBundle, SummaryItem};
use tracing::debug;

use crate::boilerplate::{default_ndt_text, CONDITION_LABEL, CONDITION_TEXT, SUMMARY_SUBTITLE};
use crate::canvas::{Canvas, PageCursor};
use crate::findings::{parse_findings, Section};
use crate::layout::Rect;
use crate::pagination::signature_needs_break;
use crate::text::{truncate_to_width, Font};

use super::flow::{self, BODY_SIZE};
use super::header::draw_header;
use super::ReportContext;

const SECTION_GAP: f32 = 8.0;
const SIGNATURE_ROW_RATIO: f32 = 0.55;
const COMMENT_COLUMN_RATIO: f32 = 0.6;

/// Finding and recommendation lists shown on the summary page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryContent {
    pub initial_inspection: Option<String>,
    pub post_inspection: Option<String>,
    pub external: Vec<String>,
    pub internal: Vec<String>,
    pub ndt: String,
    pub recommendations: Vec<String>,
}

impl SummaryContent {
    /// Take the lists from the findings summary when present, otherwise
    /// derive them from the observations
    pub fn from_bundle(bundle: &ReportBundle) -> Self {
        let ndt_text = bundle
            .findings_summary
            .as_ref()
            .and_then(|s| non_empty(s.ndt_testings.as_deref()))
            .unwrap_or_else(|| default_ndt_text(&bundle.vessel.tag_no));

        match &bundle.findings_summary {
            Some(summary) => Self {
                initial_inspection: non_empty(summary.initial_inspection.as_deref()),
                post_inspection: non_empty(summary.post_inspection.as_deref()),
                external: item_texts(&summary.external_findings),
                internal: item_texts(&summary.internal_findings),
                ndt: ndt_text,
                recommendations: item_texts(&summary.recommendations),
            },
            None => {
                let mut content = Self {
                    ndt: ndt_text,
                    ..Self::default()
                };
                for finding in bundle.observations.iter().flat_map(parse_findings) {
                    let text = finding.text.trim();
                    if !text.is_empty() {
                        match finding.section {
                            Section::External => content.external.push(text.to_string()),
                            Section::Internal => content.internal.push(text.to_string()),
                        }
                    }
                    let recommendation = finding.recommendation.trim();
                    if !recommendation.is_empty() {
                        content.recommendations.push(recommendation.to_string());
                    }
                }
                debug!(
                    external = content.external.len(),
                    internal = content.internal.len(),
                    "Summary derived from observations"
                );
                content
            }
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn item_texts(items: &[SummaryItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.text.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lay out the summary page (and its continuation pages, if the text runs
/// long). Returns the cursor below the signature block.
pub fn draw_summary(canvas: &mut Canvas, ctx: &ReportContext<'_>) -> PageCursor {
    let content = SummaryContent::from_bundle(ctx.bundle);
    let x = canvas.geometry().margin;
    let width = canvas.geometry().content_width();

    let cursor = canvas.new_page();
    let cursor = draw_header(canvas, cursor, ctx, SUMMARY_SUBTITLE);

    let cursor = flow::label(canvas, cursor, x, CONDITION_LABEL);
    let mut cursor = flow::paragraph(
        canvas,
        cursor,
        x,
        width,
        CONDITION_TEXT,
        Font::Regular,
        BODY_SIZE,
    )
    .advance(SECTION_GAP);

    cursor = flow::section_heading(canvas, cursor, "FINDINGS");
    for (label, text) in [
        ("Initial Inspection:", &content.initial_inspection),
        ("Post Inspection:", &content.post_inspection),
    ] {
        if let Some(text) = text {
            cursor = flow::label(canvas, cursor, x, label);
            cursor = flow::paragraph(canvas, cursor, x, width, text, Font::Regular, BODY_SIZE)
                .advance(SECTION_GAP / 2.0);
        }
    }
    for (prefix, label, items) in [
        (1, "External Findings:", &content.external),
        (2, "Internal Findings:", &content.internal),
    ] {
        if items.is_empty() {
            continue;
        }
        cursor = flow::label(canvas, cursor, x, label);
        for (i, item) in items.iter().enumerate() {
            let number = format!("{}.{}", prefix, i + 1);
            cursor = flow::numbered_item(canvas, cursor, x, width, &number, item);
        }
        cursor = cursor.advance(SECTION_GAP / 2.0);
    }
    cursor = cursor.advance(SECTION_GAP / 2.0);

    cursor = flow::section_heading(canvas, cursor, "NON-DESTRUCTIVE TESTINGS");
    cursor = flow::paragraph(canvas, cursor, x, width, &content.ndt, Font::Regular, BODY_SIZE)
        .advance(SECTION_GAP);

    if !content.recommendations.is_empty() {
        cursor = flow::section_heading(canvas, cursor, "RECOMMENDATIONS");
        for (i, item) in content.recommendations.iter().enumerate() {
            let number = format!("{}.", i + 1);
            cursor = flow::numbered_item(canvas, cursor, x, width, &number, item);
        }
        cursor = cursor.advance(SECTION_GAP);
    }

    draw_signature_block(canvas, cursor, ctx)
}

/// Signature block anchored to the bottom margin of the current page, or of
/// a fresh page when the content already reaches past the anchor
fn draw_signature_block(
    canvas: &mut Canvas,
    cursor: PageCursor,
    ctx: &ReportContext<'_>,
) -> PageCursor {
    let geometry = *canvas.geometry();
    let height = ctx.layout.signature_block_height;

    let cursor = if signature_needs_break(cursor.y, &geometry, height) {
        debug!(y = cursor.y, "Signature block moved to a new page");
        canvas.new_page()
    } else {
        cursor
    };

    let top = geometry.height - geometry.bottom_margin - height;
    let cursor = cursor.at(top);
    let x = geometry.margin;
    let width = geometry.content_width();

    let sign_height = height * SIGNATURE_ROW_RATIO;
    let box_width = width / 3.0;
    let signers = [
        ("Inspected by:", ctx.bundle.inspector_name()),
        ("Reviewed by:", ctx.bundle.reviewer_name()),
        ("Approved by:", None),
    ];
    for (i, (title, name)) in signers.iter().enumerate() {
        let cell = Rect::new(x + i as f32 * box_width, top, box_width, sign_height);
        canvas.stroke_rect(cursor, cell);
        let text_x = cell.x + 6.0;
        let inner = cell.width - 12.0;
        canvas.text(cursor.at(top + 6.0), text_x, *title, Font::Bold, 8.0);
        let name_line = format!("Name: {}", name.unwrap_or(""));
        canvas.text(
            cursor.at(top + 22.0),
            text_x,
            truncate_to_width(&name_line, Font::Regular, 8.0, inner),
            Font::Regular,
            8.0,
        );
        canvas.text(cursor.at(top + 40.0), text_x, "Signature:", Font::Regular, 8.0);
        canvas.text(cursor.at(top + 58.0), text_x, "Date:", Font::Regular, 8.0);
    }

    let row_top = top + sign_height;
    let row_height = height - sign_height;
    let comment = Rect::new(x, row_top, width * COMMENT_COLUMN_RATIO, row_height);
    let action = Rect::new(comment.right(), row_top, width - comment.width, row_height);
    canvas.stroke_rect(cursor, comment);
    canvas.stroke_rect(cursor, action);
    canvas.text(
        cursor.at(row_top + 6.0),
        comment.x + 6.0,
        "Comments by DOSH Officer:",
        Font::Bold,
        8.0,
    );
    canvas.text(
        cursor.at(row_top + 6.0),
        action.x + 6.0,
        "Action Taken:",
        Font::Bold,
        8.0,
    );

    cursor.at(top + height)
}
