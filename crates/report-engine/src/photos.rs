//! Photo loading
//!
//! The renderer asks a [`PhotoSource`] for each placed photo. A failure is
//! never fatal to the report; the caller draws a placeholder instead.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use report_types::Photo;

use crate::canvas::ImageData;
use crate::error::ReportError;

pub trait PhotoSource: Send + Sync {
    fn load(&self, photo: &Photo) -> Result<Arc<ImageData>, ReportError>;
}

/// Reads `<uploadsRoot>/photos/<photo.name>` from disk
#[derive(Debug, Clone)]
pub struct DiskPhotoSource {
    photos_dir: PathBuf,
    max_edge_px: u32,
}

impl DiskPhotoSource {
    pub fn new(photos_dir: impl Into<PathBuf>, max_edge_px: u32) -> Self {
        Self {
            photos_dir: photos_dir.into(),
            max_edge_px,
        }
    }

    /// Resolve a stored file name, refusing anything that could leave the
    /// photos directory
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ReportError> {
        let relative = Path::new(name);
        let is_plain_name = !name.is_empty()
            && relative.components().count() == 1
            && matches!(relative.components().next(), Some(Component::Normal(_)));
        if !is_plain_name {
            return Err(ReportError::PathSecurityViolation(format!(
                "photo name '{}' is not a plain file name",
                name
            )));
        }
        Ok(self.photos_dir.join(relative))
    }
}

impl PhotoSource for DiskPhotoSource {
    fn load(&self, photo: &Photo) -> Result<Arc<ImageData>, ReportError> {
        let path = self.resolve(&photo.name)?;
        if !path.is_file() {
            return Err(ReportError::PhotoUnavailable(path.display().to_string()));
        }
        let decoded = image::open(&path)
            .map_err(|e| ReportError::ImageDecode(photo.name.clone(), e.to_string()))?;
        Ok(Arc::new(to_image_data(decoded, self.max_edge_px)))
    }
}

/// Downscale to `max_edge_px` if needed and flatten to RGB8
pub fn to_image_data(image: DynamicImage, max_edge_px: u32) -> ImageData {
    let image = if image.width() > max_edge_px || image.height() > max_edge_px {
        image.thumbnail(max_edge_px, max_edge_px)
    } else {
        image
    };
    let rgb = image.to_rgb8();
    ImageData {
        width: rgb.width(),
        height: rgb.height(),
        rgb: rgb.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn photo(name: &str) -> Photo {
        Photo {
            photo_id: 1,
            name: name.to_string(),
            tag_number: None,
            sequence_no: None,
            caption: None,
        }
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let source = DiskPhotoSource::new("/srv/uploads/photos", 1600);
        assert!(source.resolve("../secrets.txt").is_err());
        assert!(source.resolve("nested/a.jpg").is_err());
        assert!(source.resolve("/etc/passwd").is_err());
        assert!(source.resolve("").is_err());
        assert_eq!(
            source.resolve("a.jpg").unwrap(),
            PathBuf::from("/srv/uploads/photos/a.jpg")
        );
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = DiskPhotoSource::new(dir.path(), 1600);
        let err = source.load(&photo("absent.jpg")).unwrap_err();
        assert!(matches!(err, ReportError::PhotoUnavailable(_)));
    }

    #[test]
    fn test_corrupt_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();
        let source = DiskPhotoSource::new(dir.path(), 1600);
        let err = source.load(&photo("broken.jpg")).unwrap_err();
        assert!(matches!(err, ReportError::ImageDecode(..)));
    }

    #[test]
    fn test_loads_and_downscales_png() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(400, 200, Rgb([200, 10, 10]))
            .save(dir.path().join("shell.png"))
            .unwrap();

        let source = DiskPhotoSource::new(dir.path(), 100);
        let data = source.load(&photo("shell.png")).unwrap();
        assert_eq!((data.width, data.height), (100, 50));
        assert_eq!(data.rgb.len(), 100 * 50 * 3);
    }
}
