//! Pressure vessel inspection report generation
//!
//! Turns a [`report_types::ReportBundle`] into a paginated PDF:
//! - `findings`: numbered findings and recommendations from observation text
//! - `layout` / `pagination`: photo placement and page planning
//! - `render`: summary page and photo pages drawn on a [`canvas::Canvas`]
//! - `pdf`: canvas serialization with lopdf
//! - `storage`: async write of the finished report (feature `storage`)

pub mod boilerplate;
pub mod canvas;
pub mod config;
pub mod error;
pub mod findings;
pub mod layout;
pub mod pagination;
pub mod pdf;
pub mod photos;
pub mod render;
#[cfg(feature = "storage")]
pub mod storage;
pub mod text;

pub use config::{LayoutConfig, ReportConfig};
pub use error::ReportError;
pub use findings::{parse_findings, Finding, Section};
pub use layout::{plan_layout, PlacedRect, Rect};
pub use pagination::{group_linked_photos, paginate, PagePlan, PhotoGroup};
pub use photos::{DiskPhotoSource, PhotoSource};
pub use render::{layout_report, render_report, render_report_on, RenderedReport};
#[cfg(feature = "storage")]
pub use storage::{generate_report, GeneratedReport};

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, ReportError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
