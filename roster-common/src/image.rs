//! Image URL construction from opaque image references

use crate::model::ImageRef;

/// Sanity image CDN host
pub const SANITY_IMAGE_CDN: &str = "https://cdn.sanity.io/images";

/// Requested rendition of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageParams {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl ImageParams {
    /// Member card portrait
    pub const MEMBER_CARD: ImageParams = ImageParams {
        width: 850,
        height: 850,
        quality: 50,
    };

    /// Year banner background
    pub const BANNER: ImageParams = ImageParams {
        width: 1500,
        height: 1000,
        quality: 55,
    };
}

/// Turns an image reference into a renderable URL
///
/// Implementations must be deterministic. `None` means the reference cannot
/// be rendered; callers show a placeholder instead.
pub trait ImageUrlBuilder: Send + Sync {
    fn url(&self, image: &ImageRef, params: ImageParams) -> Option<String>;
}

/// URL builder for Sanity asset references (`image-<id>-<w>x<h>-<ext>`)
#[derive(Debug, Clone)]
pub struct SanityImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl SanityImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Split an asset reference into (`<id>-<w>x<h>`, `<ext>`)
    fn parse_asset_ref(reference: &str) -> Option<(&str, &str)> {
        let rest = reference.strip_prefix("image-")?;
        let (id_and_dims, ext) = rest.rsplit_once('-')?;
        let (id, dims) = id_and_dims.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;

        let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
            return None;
        }
        Some((id_and_dims, ext))
    }
}

impl ImageUrlBuilder for SanityImageUrlBuilder {
    fn url(&self, image: &ImageRef, params: ImageParams) -> Option<String> {
        let (file, ext) = Self::parse_asset_ref(image.asset_ref()?)?;
        Some(format!(
            "{}/{}/{}/{}.{}?w={}&h={}&q={}",
            SANITY_IMAGE_CDN,
            self.project_id,
            self.dataset,
            file,
            ext,
            params.width,
            params.height,
            params.quality
        ))
    }
}
