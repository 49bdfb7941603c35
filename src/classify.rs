//! Image relevance check.
//!
//! The allow-list is deliberately small: these are the formats the gallery
//! page can display inline in any browser without transcoding. The match is
//! case-sensitive — `photo.JPG` is not a gallery entry, matching how the
//! slideshow directory is curated.

use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Whether a path names a relevant image asset.
///
/// Pure extension check; the file need not exist. Paths without an extension
/// are never images.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}
