//! Flowing text that breaks onto new pages at the bottom margin

use crate::canvas::{Canvas, Color, PageCursor};
use crate::layout::Rect;
use crate::text::{text_width, wrap_text, Font};

pub const BODY_SIZE: f32 = 9.0;
pub const LINE_SPACING: f32 = 1.3;
const HEADING_HEIGHT: f32 = 16.0;
const NUMBER_INDENT: f32 = 26.0;

pub fn line_height(size: f32) -> f32 {
    size * LINE_SPACING
}

/// Start a new page unless `needed` points still fit above the bottom margin
pub fn ensure_space(canvas: &mut Canvas, cursor: PageCursor, needed: f32) -> PageCursor {
    if cursor.y + needed > canvas.geometry().content_bottom() {
        canvas.new_page()
    } else {
        cursor
    }
}

pub fn paragraph(
    canvas: &mut Canvas,
    cursor: PageCursor,
    x: f32,
    width: f32,
    text: &str,
    font: Font,
    size: f32,
) -> PageCursor {
    let step = line_height(size);
    let mut cursor = cursor;
    for line in wrap_text(text, font, size, width) {
        cursor = ensure_space(canvas, cursor, step);
        if !line.is_empty() {
            canvas.text(cursor, x, line, font, size);
        }
        cursor = cursor.advance(step);
    }
    cursor
}

/// Shaded bar with a bold title. Keeps at least one body line with it.
pub fn section_heading(canvas: &mut Canvas, cursor: PageCursor, title: &str) -> PageCursor {
    let margin = canvas.geometry().margin;
    let width = canvas.geometry().content_width();
    let cursor = ensure_space(canvas, cursor, HEADING_HEIGHT + line_height(BODY_SIZE) + 6.0);

    canvas.fill_rect(
        cursor,
        Rect::new(margin, cursor.y, width, HEADING_HEIGHT),
        Color::LIGHT_GRAY,
    );
    canvas.text(cursor, margin + 6.0, title, Font::Bold, 10.0);
    cursor.advance(HEADING_HEIGHT + 6.0)
}

/// Bold label on its own line, kept together with the line after it
pub fn label(canvas: &mut Canvas, cursor: PageCursor, x: f32, text: &str) -> PageCursor {
    let step = line_height(BODY_SIZE);
    let cursor = ensure_space(canvas, cursor, step * 2.0);
    canvas.text(cursor, x, text, Font::Bold, BODY_SIZE);
    cursor.advance(step)
}

/// `number` in a hanging column, text wrapped beside it
pub fn numbered_item(
    canvas: &mut Canvas,
    cursor: PageCursor,
    x: f32,
    width: f32,
    number: &str,
    text: &str,
) -> PageCursor {
    let step = line_height(BODY_SIZE);
    let indent = NUMBER_INDENT.max(text_width(number, Font::Regular, BODY_SIZE) + 6.0);
    let lines = wrap_text(text, Font::Regular, BODY_SIZE, width - indent);

    let mut cursor = ensure_space(canvas, cursor, step);
    canvas.text(cursor, x, number, Font::Regular, BODY_SIZE);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            cursor = ensure_space(canvas, cursor, step);
        }
        if !line.is_empty() {
            canvas.text(cursor, x + indent, line.as_str(), Font::Regular, BODY_SIZE);
        }
        cursor = cursor.advance(step);
    }
    if lines.is_empty() {
        cursor = cursor.advance(step);
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageGeometry;

    #[test]
    fn test_paragraph_breaks_at_bottom_margin() {
        let mut canvas = Canvas::new(PageGeometry::default());
        let cursor = canvas.new_page();
        let near_bottom = cursor.at(canvas.geometry().content_bottom() - 5.0);

        let end = paragraph(
            &mut canvas,
            near_bottom,
            40.0,
            500.0,
            "one\ntwo",
            Font::Regular,
            BODY_SIZE,
        );

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(end.page, 1);
        assert_eq!(canvas.pages()[1].texts().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_numbered_item_hangs_text() {
        let mut canvas = Canvas::new(PageGeometry::default());
        let cursor = canvas.new_page();
        let end = numbered_item(&mut canvas, cursor, 40.0, 400.0, "1.1", "Coating damage");
        assert_eq!(end.y, cursor.y + line_height(BODY_SIZE));
        assert_eq!(
            canvas.pages()[0].texts().collect::<Vec<_>>(),
            vec!["1.1", "Coating damage"]
        );
    }

    #[test]
    fn test_heading_moves_to_next_page_when_orphaned() {
        let mut canvas = Canvas::new(PageGeometry::default());
        let cursor = canvas.new_page();
        let low = cursor.at(canvas.geometry().content_bottom() - 20.0);
        let end = section_heading(&mut canvas, low, "RECOMMENDATIONS");
        assert_eq!(end.page, 1);
    }
}
