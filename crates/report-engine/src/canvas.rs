//! Page canvas: an ordered list of pages, each an ordered list of draw ops
//!
//! Layout code writes here instead of a PDF stream so it can be inspected
//! without serializing. Coordinates are top-left origin, in points; the PDF
//! writer flips them.

use std::sync::Arc;

use crate::config::PageGeometry;
use crate::layout::Rect;
use crate::text::Font;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);
    pub const LIGHT_GRAY: Color = Color::gray(0.9);
    pub const MID_GRAY: Color = Color::gray(0.55);

    pub const fn gray(level: f32) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Decoded 8-bit RGB pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Single line of text; `y` is the top of the line box
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        size: f32,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        line_width: f32,
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        line_width: f32,
        color: Color,
    },
    Image {
        id: ImageId,
        rect: Rect,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Where the next content goes: page index and vertical offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub page: usize,
    pub y: f32,
}

impl PageCursor {
    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    pub fn at(self, y: f32) -> Self {
        Self { y, ..self }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    geometry: PageGeometry,
    pages: Vec<Page>,
    images: Vec<Arc<ImageData>>,
}

impl Canvas {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Append a blank page; the cursor starts at the top margin
    pub fn new_page(&mut self) -> PageCursor {
        self.pages.push(Page::default());
        PageCursor {
            page: self.pages.len() - 1,
            y: self.geometry.margin,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn images(&self) -> &[Arc<ImageData>] {
        &self.images
    }

    pub fn add_image(&mut self, image: Arc<ImageData>) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn push(&mut self, cursor: PageCursor, op: DrawOp) {
        if let Some(page) = self.pages.get_mut(cursor.page) {
            page.ops.push(op);
        }
    }

    pub fn text(
        &mut self,
        cursor: PageCursor,
        x: f32,
        text: impl Into<String>,
        font: Font,
        size: f32,
    ) {
        self.push(
            cursor,
            DrawOp::Text {
                x,
                y: cursor.y,
                text: text.into(),
                font,
                size,
                color: Color::BLACK,
            },
        );
    }

    pub fn stroke_rect(&mut self, cursor: PageCursor, rect: Rect) {
        self.push(
            cursor,
            DrawOp::StrokeRect {
                rect,
                line_width: 0.75,
                color: Color::BLACK,
            },
        );
    }

    pub fn fill_rect(&mut self, cursor: PageCursor, rect: Rect, color: Color) {
        self.push(cursor, DrawOp::FillRect { rect, color });
    }

    pub fn line(&mut self, cursor: PageCursor, from: (f32, f32), to: (f32, f32)) {
        self.push(
            cursor,
            DrawOp::Line {
                from,
                to,
                line_width: 0.75,
                color: Color::BLACK,
            },
        );
    }

    pub fn image(&mut self, cursor: PageCursor, id: ImageId, rect: Rect) {
        self.push(cursor, DrawOp::Image { id, rect });
    }
}
