//! Report generation configuration
//!
//! Storage locations and image handling are read from TOML. Page geometry
//! and photo placement are fixed report policy: they live in
//! [`LayoutConfig`] as named constants so tests can assert exact placement,
//! and are never read from the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::layout::PhotoSpacing;

/// A4 portrait, in points
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const PAGE_MARGIN: f32 = 40.0;
pub const BOTTOM_MARGIN: f32 = 40.0;

/// Photo groups rendered per photo page
pub const GROUPS_PER_PAGE: usize = 3;

/// The signature block is never split across pages
pub const SIGNATURE_BLOCK_HEIGHT: f32 = 150.0;

/// Footer baseline distance from the bottom edge of photo pages
pub const FOOTER_OFFSET: f32 = 70.0;

/// Top-level configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(skip)]
    pub layout: LayoutConfig,
}

impl ReportConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string. Every field has a default,
    /// so an empty document is valid.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.storage.uploads_root.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "storage.uploads_root must not be empty".into(),
            ));
        }
        if !self.storage.public_prefix.starts_with('/') {
            return Err(ReportError::InvalidConfig(format!(
                "storage.public_prefix must be an absolute path, got '{}'",
                self.storage.public_prefix
            )));
        }
        if self.images.max_edge_px == 0 {
            return Err(ReportError::InvalidConfig(
                "images.max_edge_px must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Directory photos are read from: `<uploadsRoot>/photos`
    pub fn photos_dir(&self) -> PathBuf {
        self.storage.uploads_root.join("photos")
    }

    /// Directory generated reports are written to: `<uploadsRoot>/reports`
    pub fn reports_dir(&self) -> PathBuf {
        self.storage.uploads_root.join("reports")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of the uploads tree (default: `uploads`)
    #[serde(default = "default_uploads_root")]
    pub uploads_root: PathBuf,
    /// URL prefix under which reports are served (default: `/uploads/reports`)
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_root: default_uploads_root(),
            public_prefix: default_public_prefix(),
        }
    }
}

fn default_uploads_root() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_public_prefix() -> String {
    "/uploads/reports".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Photos larger than this on either edge are downscaled before embedding
    #[serde(default = "default_max_edge_px")]
    pub max_edge_px: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_edge_px: default_max_edge_px(),
        }
    }
}

fn default_max_edge_px() -> u32 {
    1600
}

/// Page geometry in points, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub bottom_margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin: PAGE_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a line of content may reach
    pub fn content_bottom(&self) -> f32 {
        self.height - self.bottom_margin
    }
}

/// Fixed layout policy
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page: PageGeometry,
    pub photo: PhotoSpacing,
    pub groups_per_page: usize,
    pub signature_block_height: f32,
    pub footer_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            photo: PhotoSpacing::default(),
            groups_per_page: GROUPS_PER_PAGE,
            signature_block_height: SIGNATURE_BLOCK_HEIGHT,
            footer_offset: FOOTER_OFFSET,
        }
    }
}
