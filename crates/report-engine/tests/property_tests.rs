//! Property-based tests for the finding parser, photo layout and pagination

use std::collections::BTreeSet;

use proptest::prelude::*;
use report_engine::findings::numbered_segments;
use report_engine::layout::PhotoSpacing;
use report_engine::{paginate, parse_findings, plan_layout, Rect};
use report_types::Observation;

// ============================================================================
// Test Helpers
// ============================================================================

/// Tolerance for f32 edge arithmetic
const EPSILON: f32 = 1e-3;

fn within(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x - EPSILON
        && inner.y >= outer.y - EPSILON
        && inner.right() <= outer.right() + EPSILON
        && inner.bottom() <= outer.bottom() + EPSILON
}

fn observation(description: String, recommendation: Option<String>) -> Observation {
    Observation {
        description,
        recommendation,
        severity: None,
        finding_number: None,
        photo_ids: BTreeSet::new(),
    }
}

/// Free text with no `<digits>.<digits>` token anywhere
fn unnumbered_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ,;:!?\n-]{0,120}"
}

// ============================================================================
// Finding Parser
// ============================================================================

proptest! {
    #[test]
    fn proptest_unnumbered_text_yields_one_stable_finding(
        description in unnumbered_text(),
        recommendation in proptest::option::of(unnumbered_text()),
    ) {
        let obs = observation(description, recommendation);
        let first = parse_findings(&obs);
        let second = parse_findings(&obs);

        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first[0].text, &obs.description);
    }

    #[test]
    fn proptest_numbers_preserved_in_document_order(
        numbers in proptest::collection::vec((1u32..20, 1u32..20), 1..8),
        filler in "[a-z ]{1,20}",
    ) {
        let description: String = numbers
            .iter()
            .map(|(major, minor)| format!("{}.{} {} ", major, minor, filler))
            .collect();
        let findings = parse_findings(&observation(description.clone(), None));

        let expected: Vec<String> = numbers
            .iter()
            .map(|(major, minor)| format!("{}.{}", major, minor))
            .collect();
        let actual: Vec<String> = findings
            .iter()
            .filter_map(|f| f.finding_number.clone())
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(findings.len(), numbered_segments(&description).len());
    }
}

// ============================================================================
// Layout Planner
// ============================================================================

proptest! {
    #[test]
    fn proptest_layout_stays_inside_padding_without_overlap(
        count in 1usize..=4,
        x in 0.0f32..500.0,
        y in 0.0f32..500.0,
        width in 100.0f32..600.0,
        height in 100.0f32..600.0,
    ) {
        let spacing = PhotoSpacing::default();
        let area = Rect::new(x, y, width, height);
        let inner = spacing.inner(area);
        let placed = plan_layout(count, area, "1", &spacing);

        prop_assert_eq!(placed.len(), count);
        for (i, a) in placed.iter().enumerate() {
            prop_assert!(a.rect.width > 0.0 && a.rect.height > 0.0);
            prop_assert!(within(&inner, &a.rect), "{:?} outside {:?}", a.rect, inner);
            for b in &placed[i + 1..] {
                prop_assert!(!a.rect.overlaps(&b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn proptest_layout_caps_photo_count(count in 0usize..50) {
        let placed = plan_layout(
            count,
            Rect::new(0.0, 0.0, 300.0, 200.0),
            "2",
            &PhotoSpacing::default(),
        );
        prop_assert_eq!(placed.len(), count.min(4));
    }
}

// ============================================================================
// Pagination Planner
// ============================================================================

proptest! {
    #[test]
    fn proptest_pagination_is_exact(items in proptest::collection::vec(any::<u16>(), 0..40)) {
        let plan = paginate(&items, 3);

        prop_assert_eq!(plan.page_count(), items.len().div_ceil(3));
        if let Some((last, full)) = plan.pages().split_last() {
            prop_assert!(full.iter().all(|page| page.len() == 3));
            prop_assert!(!last.is_empty() && last.len() <= 3);
        }

        let rejoined: Vec<u16> = plan.pages().iter().flat_map(|p| p.iter().copied()).collect();
        prop_assert_eq!(rejoined, items);
    }
}
