//! Report header repeated at the top of every section start page

use crate::boilerplate::{CAMPAIGN_TITLE, REPORT_TITLE};
use crate::canvas::{Canvas, PageCursor};
use crate::layout::Rect;
use crate::text::{text_width, truncate_to_width, Font};

use super::ReportContext;

const TITLE_ROW_HEIGHT: f32 = 54.0;
const DETAIL_ROW_HEIGHT: f32 = 34.0;
const TITLE_COLUMN_RATIO: f32 = 0.6;
const CELL_PADDING: f32 = 6.0;
const GAP_AFTER: f32 = 12.0;

pub const HEADER_HEIGHT: f32 = TITLE_ROW_HEIGHT + DETAIL_ROW_HEIGHT + GAP_AFTER;

/// Draw the title block and the vessel details table; returns the cursor
/// just below it
pub fn draw_header(
    canvas: &mut Canvas,
    cursor: PageCursor,
    ctx: &ReportContext<'_>,
    subtitle: &str,
) -> PageCursor {
    let x = canvas.geometry().margin;
    let width = canvas.geometry().content_width();
    let top = cursor.y;

    let title_cell = Rect::new(x, top, width * TITLE_COLUMN_RATIO, TITLE_ROW_HEIGHT);
    let meta_cell = Rect::new(
        title_cell.right(),
        top,
        width - title_cell.width,
        TITLE_ROW_HEIGHT,
    );
    canvas.stroke_rect(cursor, title_cell);
    canvas.stroke_rect(cursor, meta_cell);

    for (offset, line, font, size) in [
        (8.0, CAMPAIGN_TITLE, Font::Bold, 11.0),
        (22.0, REPORT_TITLE, Font::Bold, 11.0),
        (37.0, subtitle, Font::Regular, 9.0),
    ] {
        let line = truncate_to_width(line, font, size, title_cell.width - 2.0 * CELL_PADDING);
        let line_x = title_cell.x + (title_cell.width - text_width(&line, font, size)) / 2.0;
        canvas.text(cursor.at(top + offset), line_x, line, font, size);
    }

    let bundle = ctx.bundle;
    let meta_width = meta_cell.width - 2.0 * CELL_PADDING;
    let dosh = bundle
        .inspection
        .dosh_registration
        .as_deref()
        .unwrap_or("-");
    for (offset, line) in [
        (8.0, format!("Report No.: {}", ctx.report_number)),
        (22.0, format!("Date: {}", ctx.report_date)),
        (36.0, format!("DOSH Reg. No.: {}", dosh)),
    ] {
        let line = truncate_to_width(&line, Font::Regular, 8.0, meta_width);
        canvas.text(
            cursor.at(top + offset),
            meta_cell.x + CELL_PADDING,
            line,
            Font::Regular,
            8.0,
        );
    }

    let vessel = &bundle.vessel;
    let description = vessel
        .description
        .as_deref()
        .or(vessel.vessel_type.as_deref())
        .unwrap_or("-");
    let details = [
        ("Equipment Tag No.", vessel.tag_no.as_str()),
        ("Description", description),
        ("Plant / Unit", vessel.plant_unit.as_deref().unwrap_or("-")),
        ("Location", vessel.location.as_deref().unwrap_or("-")),
    ];

    let row_top = top + TITLE_ROW_HEIGHT;
    let cell_width = width / details.len() as f32;
    for (i, (label, value)) in details.iter().enumerate() {
        let cell = Rect::new(x + i as f32 * cell_width, row_top, cell_width, DETAIL_ROW_HEIGHT);
        canvas.stroke_rect(cursor, cell);
        canvas.text(
            cursor.at(row_top + 5.0),
            cell.x + CELL_PADDING,
            *label,
            Font::Bold,
            7.0,
        );
        let value = truncate_to_width(value, Font::Regular, 8.0, cell.width - 2.0 * CELL_PADDING);
        canvas.text(
            cursor.at(row_top + 17.0),
            cell.x + CELL_PADDING,
            value,
            Font::Regular,
            8.0,
        );
    }

    cursor.at(top + HEADER_HEIGHT)
}
