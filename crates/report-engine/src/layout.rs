//! Photo placement inside a section's photo column
//!
//! Coordinates are top-left origin, in points. Placement depends only on
//! the photo count and the box, so every group of the same size looks the
//! same across the report.

use serde::Serialize;

pub const PHOTO_PADDING_LEFT: f32 = 10.0;
pub const PHOTO_PADDING_RIGHT: f32 = 10.0;
pub const PHOTO_PADDING_TOP: f32 = 20.0;
pub const PHOTO_PADDING_BOTTOM: f32 = 10.0;
pub const PHOTO_GUTTER: f32 = 8.0;
/// Width of the lone bottom photo in a group of three, relative to the available width
pub const BOTTOM_PHOTO_WIDTH_RATIO: f32 = 0.6;
pub const MAX_PHOTOS_PER_GROUP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the interiors intersect; shared edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Largest rectangle with the given aspect ratio, centered inside `self`
    pub fn fit(&self, content_width: f32, content_height: f32) -> Rect {
        if content_width <= 0.0 || content_height <= 0.0 {
            return *self;
        }
        let scale = (self.width / content_width).min(self.height / content_height);
        let width = content_width * scale;
        let height = content_height * scale;
        Rect::new(
            self.x + (self.width - width) / 2.0,
            self.y + (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// A photo slot with its group-relative label, e.g. `3.2`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRect {
    pub rect: Rect,
    pub label: String,
}

/// Padding, gutter and cap for photo placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSpacing {
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub gutter: f32,
    pub bottom_width_ratio: f32,
    pub max_photos: usize,
}

impl Default for PhotoSpacing {
    fn default() -> Self {
        Self {
            padding_left: PHOTO_PADDING_LEFT,
            padding_right: PHOTO_PADDING_RIGHT,
            padding_top: PHOTO_PADDING_TOP,
            padding_bottom: PHOTO_PADDING_BOTTOM,
            gutter: PHOTO_GUTTER,
            bottom_width_ratio: BOTTOM_PHOTO_WIDTH_RATIO,
            max_photos: MAX_PHOTOS_PER_GROUP,
        }
    }
}

impl PhotoSpacing {
    /// The part of `area` photos may occupy
    pub fn inner(&self, area: Rect) -> Rect {
        Rect::new(
            area.x + self.padding_left,
            area.y + self.padding_top,
            area.width - self.padding_left - self.padding_right,
            area.height - self.padding_top - self.padding_bottom,
        )
    }
}

/// Place `photo_count` photos inside `area`. Counts above the cap place only
/// the first four; zero places nothing.
pub fn plan_layout(
    photo_count: usize,
    area: Rect,
    group_label: &str,
    spacing: &PhotoSpacing,
) -> Vec<PlacedRect> {
    let inner = spacing.inner(area);
    let gutter = spacing.gutter;
    let half_width = (inner.width - gutter) / 2.0;
    let half_height = (inner.height - gutter) / 2.0;

    let rects = match photo_count.min(spacing.max_photos) {
        0 => vec![],
        1 => vec![inner],
        2 => vec![
            Rect::new(inner.x, inner.y, half_width, inner.height),
            Rect::new(inner.x + half_width + gutter, inner.y, half_width, inner.height),
        ],
        3 => {
            let bottom_width = inner.width * spacing.bottom_width_ratio;
            vec![
                Rect::new(inner.x, inner.y, half_width, half_height),
                Rect::new(inner.x + half_width + gutter, inner.y, half_width, half_height),
                Rect::new(
                    inner.x + (inner.width - bottom_width) / 2.0,
                    inner.y + half_height + gutter,
                    bottom_width,
                    half_height,
                ),
            ]
        }
        _ => vec![
            Rect::new(inner.x, inner.y, half_width, half_height),
            Rect::new(inner.x + half_width + gutter, inner.y, half_width, half_height),
            Rect::new(inner.x, inner.y + half_height + gutter, half_width, half_height),
            Rect::new(
                inner.x + half_width + gutter,
                inner.y + half_height + gutter,
                half_width,
                half_height,
            ),
        ],
    };

    rects
        .into_iter()
        .enumerate()
        .map(|(i, rect)| PlacedRect {
            rect,
            label: format!("{}.{}", group_label, i + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn area() -> Rect {
        Rect::new(100.0, 200.0, 300.0, 230.0)
    }

    fn rects(count: usize) -> Vec<Rect> {
        plan_layout(count, area(), "1", &PhotoSpacing::default())
            .into_iter()
            .map(|p| p.rect)
            .collect()
    }

    #[test]
    fn test_single_photo_fills_available_area() {
        assert_eq!(rects(1), vec![Rect::new(110.0, 220.0, 280.0, 200.0)]);
    }

    #[test]
    fn test_two_photos_side_by_side() {
        assert_eq!(
            rects(2),
            vec![
                Rect::new(110.0, 220.0, 136.0, 200.0),
                Rect::new(254.0, 220.0, 136.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_three_photos_center_the_bottom_one() {
        let placed = rects(3);
        assert_eq!(placed[0], Rect::new(110.0, 220.0, 136.0, 96.0));
        assert_eq!(placed[1], Rect::new(254.0, 220.0, 136.0, 96.0));
        // 60% of 280 = 168, offset (280 - 168) / 2 = 56 from the left padding
        assert_eq!(placed[2], Rect::new(166.0, 324.0, 168.0, 96.0));
        assert_eq!(placed[0].width, placed[1].width);
        assert_eq!(placed[2].height, placed[0].height);
    }

    #[test]
    fn test_four_photos_grid() {
        assert_eq!(
            rects(4),
            vec![
                Rect::new(110.0, 220.0, 136.0, 96.0),
                Rect::new(254.0, 220.0, 136.0, 96.0),
                Rect::new(110.0, 324.0, 136.0, 96.0),
                Rect::new(254.0, 324.0, 136.0, 96.0),
            ]
        );
    }

    #[test]
    fn test_extra_photos_are_not_placed() {
        assert_eq!(rects(7), rects(4));
        assert!(rects(0).is_empty());
    }

    #[test]
    fn test_labels_are_group_relative() {
        let labels: Vec<_> = plan_layout(3, area(), "5", &PhotoSpacing::default())
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["5.1", "5.2", "5.3"]);
    }

    #[test]
    fn test_placements_do_not_overlap() {
        for count in 1..=4 {
            let placed = rects(count);
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(!a.overlaps(b), "{count} photos: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let slot = Rect::new(0.0, 0.0, 200.0, 100.0);
        let fitted = slot.fit(400.0, 400.0);
        assert_eq!(fitted, Rect::new(50.0, 0.0, 100.0, 100.0));
    }
}
