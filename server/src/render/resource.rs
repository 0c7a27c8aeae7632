//! Resource layout helpers
//!
//! URL normalization, the image/other split and the image grid column table.

use crate::config::PASSTHROUGH_RESOURCE_PREFIXES;
use crate::database::Resource;

/// Public URL for a stored resource path.
///
/// Absolute URLs and API paths pass through; anything else is served by
/// the resource file endpoint.
pub fn public_url(id: i64, filepath: &str) -> String {
    if PASSTHROUGH_RESOURCE_PREFIXES
        .iter()
        .any(|prefix| filepath.starts_with(prefix))
    {
        filepath.to_string()
    } else {
        format!("/api/v1/resource/{}/file", id)
    }
}

pub fn is_image(resource: &Resource) -> bool {
    resource
        .mime_type
        .as_deref()
        .is_some_and(|t| t.starts_with("image/"))
}

/// Split resources into (images, others), preserving order
pub fn partition(resources: &[Resource]) -> (Vec<&Resource>, Vec<&Resource>) {
    resources.iter().partition(|r| is_image(r))
}

/// Grid column count for a number of images: 1→1, 2→2, 3→3, 4→2, otherwise 3
pub fn grid_columns(image_count: usize) -> usize {
    match image_count {
        1 => 1,
        2 | 4 => 2,
        _ => 3,
    }
}

/// Human size label in KB with one decimal, `None` for zero-byte rows
pub fn size_label(size: i64) -> Option<String> {
    (size > 0).then(|| format!("{:.1} KB", size as f64 / 1024.0))
}
