//! Photo report pages: up to three photo groups per page, each with its
//! finding text beside the photos

use report_types::Photo;
use tracing::{debug, warn};

use crate::boilerplate::{PHOTOS_SUBTITLE, PHOTO_NOT_FOUND};
use crate::canvas::{Canvas, Color, PageCursor};
use crate::findings::parse_findings;
use crate::layout::{plan_layout, PlacedRect, Rect};
use crate::pagination::{group_linked_photos, paginate, PhotoGroup};
use crate::photos::PhotoSource;
use crate::text::{text_width, truncate_to_width, wrap_text, Font};

use super::header::draw_header;
use super::ReportContext;

const SECTION_GAP: f32 = 8.0;
const PHOTO_COLUMN_RATIO: f32 = 0.58;
const COLUMN_PADDING: f32 = 8.0;
const TEXT_SIZE: f32 = 8.0;
const LABEL_SIZE: f32 = 7.0;
const LABEL_BOX_HEIGHT: f32 = 12.0;

/// Append the photo pages. Draws nothing when no photo is linked to an
/// observation. Returns the number of pages added.
pub fn draw_photo_pages(
    canvas: &mut Canvas,
    ctx: &ReportContext<'_>,
    source: &dyn PhotoSource,
) -> usize {
    let groups = group_linked_photos(ctx.bundle, ctx.layout.photo.max_photos);
    if groups.is_empty() {
        debug!("No linked photos, photo pages skipped");
        return 0;
    }

    let plan = paginate(&groups, ctx.layout.groups_per_page);
    debug!(
        groups = groups.len(),
        pages = plan.page_count(),
        "Photo pages planned"
    );

    let geometry = *canvas.geometry();
    let slots = ctx.layout.groups_per_page.max(1) as f32;
    for page_groups in plan.pages() {
        let cursor = canvas.new_page();
        let cursor = draw_header(canvas, cursor, ctx, PHOTOS_SUBTITLE);

        let footer_y = geometry.height - ctx.layout.footer_offset;
        let area_top = cursor.y;
        let area_bottom = footer_y - SECTION_GAP;
        let section_height = (area_bottom - area_top - SECTION_GAP * (slots - 1.0)) / slots;

        for (i, group) in page_groups.iter().enumerate() {
            let section = Rect::new(
                geometry.margin,
                area_top + i as f32 * (section_height + SECTION_GAP),
                geometry.content_width(),
                section_height,
            );
            draw_group_section(canvas, cursor, section, group, ctx, source);
        }

        draw_footer(canvas, cursor.at(footer_y), ctx);
    }

    plan.page_count()
}

fn draw_group_section(
    canvas: &mut Canvas,
    cursor: PageCursor,
    section: Rect,
    group: &PhotoGroup<'_>,
    ctx: &ReportContext<'_>,
    source: &dyn PhotoSource,
) {
    canvas.stroke_rect(cursor, section);

    let photo_column = Rect::new(
        section.x,
        section.y,
        section.width * PHOTO_COLUMN_RATIO,
        section.height,
    );
    canvas.line(
        cursor,
        (photo_column.right(), section.y),
        (photo_column.right(), section.bottom()),
    );
    canvas.text(
        cursor.at(section.y + 6.0),
        section.x + ctx.layout.photo.padding_left,
        format!("Photo {}", group.label),
        Font::Bold,
        TEXT_SIZE,
    );

    let placed = plan_layout(group.photos.len(), photo_column, &group.label, &ctx.layout.photo);
    for (slot, photo) in placed.iter().zip(group.photos.iter()) {
        draw_photo(canvas, cursor, slot, photo, source);
        draw_label_box(canvas, cursor, slot);
    }

    let text_column = Rect::new(
        photo_column.right() + COLUMN_PADDING,
        section.y + COLUMN_PADDING,
        section.width - photo_column.width - 2.0 * COLUMN_PADDING,
        section.height - 2.0 * COLUMN_PADDING,
    );
    let lines = group_text_lines(group, &placed, ctx, text_column.width);
    draw_text_column(canvas, cursor, text_column, lines);
}

fn draw_photo(
    canvas: &mut Canvas,
    cursor: PageCursor,
    slot: &PlacedRect,
    photo: &Photo,
    source: &dyn PhotoSource,
) {
    match source.load(photo) {
        Ok(image) => {
            let fitted = slot.rect.fit(image.width as f32, image.height as f32);
            let id = canvas.add_image(image);
            canvas.image(cursor, id, fitted);
        }
        Err(e) => {
            warn!(
                photo_id = photo.photo_id,
                name = %photo.name,
                error = %e,
                "Photo replaced with placeholder"
            );
            canvas.fill_rect(cursor, slot.rect, Color::LIGHT_GRAY);
            canvas.stroke_rect(cursor, slot.rect);
            let width = text_width(PHOTO_NOT_FOUND, Font::Regular, TEXT_SIZE);
            canvas.text(
                cursor.at(slot.rect.y + (slot.rect.height - TEXT_SIZE) / 2.0),
                slot.rect.x + ((slot.rect.width - width) / 2.0).max(0.0),
                PHOTO_NOT_FOUND,
                Font::Regular,
                TEXT_SIZE,
            );
        }
    }
}

/// White box holding the photo's label at the slot's top-left corner
fn draw_label_box(canvas: &mut Canvas, cursor: PageCursor, slot: &PlacedRect) {
    let width = (text_width(&slot.label, Font::Bold, LABEL_SIZE) + 8.0).min(slot.rect.width);
    let label_box = Rect::new(slot.rect.x, slot.rect.y, width, LABEL_BOX_HEIGHT);
    canvas.fill_rect(cursor, label_box, Color::WHITE);
    canvas.stroke_rect(cursor, label_box);
    canvas.text(
        cursor.at(label_box.y + 2.5),
        label_box.x + 4.0,
        slot.label.as_str(),
        Font::Bold,
        LABEL_SIZE,
    );
}

/// Finding, recommendation, severity and captions for a group, already
/// wrapped to `width`. Text comes from the observation linked to the
/// group's first photo.
fn group_text_lines(
    group: &PhotoGroup<'_>,
    placed: &[PlacedRect],
    ctx: &ReportContext<'_>,
    width: f32,
) -> Vec<(Font, String)> {
    let mut lines = Vec::new();
    let push_wrapped = |lines: &mut Vec<(Font, String)>, font: Font, text: &str| {
        for line in wrap_text(text, font, TEXT_SIZE, width) {
            lines.push((font, line));
        }
    };

    let observation = group
        .photos
        .first()
        .and_then(|photo| ctx.bundle.observation_for_photo(photo.photo_id));

    if let Some(observation) = observation {
        for finding in parse_findings(observation) {
            let heading = match &finding.finding_number {
                Some(number) => format!("Finding {}", number),
                None => "Finding".to_string(),
            };
            push_wrapped(&mut lines, Font::Bold, &heading);
            push_wrapped(&mut lines, Font::Regular, &finding.text);

            push_wrapped(&mut lines, Font::Bold, "Recommendation");
            let recommendation = finding.recommendation.trim();
            push_wrapped(
                &mut lines,
                Font::Regular,
                if recommendation.is_empty() { "-" } else { recommendation },
            );
        }
        if let Some(severity) = observation.severity {
            push_wrapped(
                &mut lines,
                Font::Bold,
                &format!("Severity: {}", severity.label()),
            );
        }
    }

    for (slot, photo) in placed.iter().zip(group.photos.iter()) {
        if let Some(caption) = photo.caption.as_deref().map(str::trim) {
            if !caption.is_empty() {
                push_wrapped(
                    &mut lines,
                    Font::Regular,
                    &format!("{}: {}", slot.label, caption),
                );
            }
        }
    }

    lines
}

/// Draw as many lines as fit; the last visible line ends in an ellipsis
/// when some are cut
fn draw_text_column(
    canvas: &mut Canvas,
    cursor: PageCursor,
    column: Rect,
    lines: Vec<(Font, String)>,
) {
    let step = TEXT_SIZE * 1.3;
    let capacity = ((column.height / step).floor() as usize).max(1);
    let truncated = lines.len() > capacity;
    let total = lines.len().min(capacity);

    for (i, (font, line)) in lines.into_iter().take(total).enumerate() {
        let line = if truncated && i + 1 == total {
            truncate_to_width(&format!("{} ...", line), font, TEXT_SIZE, column.width)
        } else {
            line
        };
        canvas.text(
            cursor.at(column.y + i as f32 * step),
            column.x,
            line,
            font,
            TEXT_SIZE,
        );
    }
}

/// Inspector name and report date at the foot of a photo page
fn draw_footer(canvas: &mut Canvas, cursor: PageCursor, ctx: &ReportContext<'_>) {
    let x = canvas.geometry().margin;
    let right = x + canvas.geometry().content_width();
    canvas.line(cursor, (x, cursor.y - 4.0), (right, cursor.y - 4.0));

    let inspector = format!(
        "Inspected by: {}",
        ctx.bundle.inspector_name().unwrap_or("-")
    );
    canvas.text(cursor, x, inspector, Font::Regular, TEXT_SIZE);

    let date = format!("Date: {}", ctx.report_date);
    let width = text_width(&date, Font::Regular, TEXT_SIZE);
    canvas.text(cursor, right - width, date, Font::Regular, TEXT_SIZE);
}
