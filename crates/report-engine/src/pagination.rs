//! Photo grouping and page partitioning

use std::collections::{BTreeMap, BTreeSet};

use report_types::{Photo, ReportBundle};

use crate::config::PageGeometry;

/// Grouping and sort key for photo groups. Photos group by their trimmed
/// tag text; tags that parse as integers sort first by value (text breaks
/// ties), then other tags, then the single ungrouped bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    Numeric(u64, String),
    Text(String),
    Ungrouped,
}

impl GroupKey {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            None | Some("") => GroupKey::Ungrouped,
            Some(tag) => match tag.parse::<u64>() {
                Ok(n) => GroupKey::Numeric(n, tag.to_string()),
                Err(_) => GroupKey::Text(tag.to_string()),
            },
        }
    }

    /// Label text for a tagged group
    fn tag(&self) -> Option<&str> {
        match self {
            GroupKey::Numeric(_, tag) | GroupKey::Text(tag) => Some(tag),
            GroupKey::Ungrouped => None,
        }
    }
}

/// Linked photos sharing a tag number, rendered together in one section
#[derive(Debug, Clone)]
pub struct PhotoGroup<'a> {
    pub key: GroupKey,
    /// Prefix for photo labels (`<label>.<n>`)
    pub label: String,
    pub photos: Vec<&'a Photo>,
}

/// Group the bundle's linked photos. Unlinked photos are left out, photos
/// within a group follow `sequence_no` (then input order), and each group
/// keeps at most `max_photos`.
pub fn group_linked_photos(bundle: &ReportBundle, max_photos: usize) -> Vec<PhotoGroup<'_>> {
    let mut buckets: BTreeMap<GroupKey, Vec<&Photo>> = BTreeMap::new();
    for photo in bundle
        .photos
        .iter()
        .filter(|p| bundle.is_photo_linked(p.photo_id))
    {
        buckets
            .entry(GroupKey::from_tag(photo.tag_number.as_deref()))
            .or_default()
            .push(photo);
    }

    let tags: BTreeSet<String> = buckets
        .keys()
        .filter_map(GroupKey::tag)
        .map(str::to_string)
        .collect();

    buckets
        .into_iter()
        .enumerate()
        .map(|(position, (key, mut photos))| {
            photos.sort_by_key(|p| (p.sequence_no.is_none(), p.sequence_no));
            photos.truncate(max_photos);
            let label = match key.tag() {
                Some(tag) => tag.to_string(),
                None => ungrouped_label(position + 1, &tags),
            };
            PhotoGroup { key, label, photos }
        })
        .collect()
}

/// First position-based label, counting up from `position`, that no tagged
/// group already uses
fn ungrouped_label(position: usize, tags: &BTreeSet<String>) -> String {
    (position..)
        .map(|n| n.to_string())
        .find(|label| !tags.contains(label))
        .unwrap_or_default()
}

/// Items partitioned into fixed-size pages, in their original order
#[derive(Debug, Clone)]
pub struct PagePlan<'a, T> {
    pages: Vec<&'a [T]>,
}

impl<'a, T> PagePlan<'a, T> {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[&'a [T]] {
        &self.pages
    }
}

/// Split items into pages of `per_page`; only the last page may be short.
/// Each page starts fresh, whatever room the previous one had left.
pub fn paginate<T>(items: &[T], per_page: usize) -> PagePlan<'_, T> {
    PagePlan {
        pages: items.chunks(per_page.max(1)).collect(),
    }
}

/// Whether the signature block must move to a new page: true when the
/// cursor is already below the block's anchor position.
pub fn signature_needs_break(cursor_y: f32, page: &PageGeometry, block_height: f32) -> bool {
    cursor_y > page.height - page.bottom_margin - block_height
}
