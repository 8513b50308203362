//! Icon images and fonts, loaded once at startup

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use hud::{FontWeight, Icon};
use image::RgbaImage;
use tracing::{info, warn};

/// Font file names relative to the asset directory
pub fn font_file(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Regular => "fonts/opensans_regular.ttf",
        FontWeight::SemiBold => "fonts/opensans_semibold.ttf",
        FontWeight::Bold => "fonts/opensans_bold.ttf",
    }
}

/// Loaded icons and fonts
///
/// A missing or unreadable asset is logged once here; the element that needs
/// it is then silently left out of every frame.
#[derive(Default)]
pub struct AssetStore {
    root: PathBuf,
    icons: HashMap<Icon, RgbaImage>,
    fonts: HashMap<FontWeight, FontVec>,
}

impl AssetStore {
    /// Store with no assets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every known icon and font under `root`
    pub fn load(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut store = Self {
            root: root.clone(),
            ..Default::default()
        };

        for icon in Icon::ALL {
            let path = root.join("img").join(icon.file_name());
            match image::open(&path) {
                Ok(img) => {
                    store.icons.insert(icon, img.to_rgba8());
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to load icon"),
            }
        }

        for weight in [FontWeight::Regular, FontWeight::SemiBold, FontWeight::Bold] {
            let path = root.join(font_file(weight));
            let loaded = std::fs::read(&path)
                .map_err(|e| e.to_string())
                .and_then(|bytes| FontVec::try_from_vec(bytes).map_err(|e| e.to_string()));
            match loaded {
                Ok(font) => {
                    store.fonts.insert(weight, font);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to load font"),
            }
        }

        info!(
            root = %store.root.display(),
            icons = store.icons.len(),
            fonts = store.fonts.len(),
            "Assets loaded"
        );
        store
    }

    pub fn with_icon(mut self, icon: Icon, img: RgbaImage) -> Self {
        self.icons.insert(icon, img);
        self
    }

    pub fn with_font(mut self, weight: FontWeight, font: FontVec) -> Self {
        self.fonts.insert(weight, font);
        self
    }

    pub fn icon(&self, icon: Icon) -> Option<&RgbaImage> {
        self.icons.get(&icon)
    }

    /// Font for a weight, falling back to any loaded weight
    pub fn font(&self, weight: FontWeight) -> Option<&FontVec> {
        self.fonts
            .get(&weight)
            .or_else(|| self.fonts.get(&FontWeight::Regular))
            .or_else(|| self.fonts.values().next())
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_missing_directory_loads_nothing() {
        let store = AssetStore::load("/nonexistent/onroad-assets");
        assert_eq!(store.icon_count(), 0);
        assert_eq!(store.font_count(), 0);
        assert!(store.icon(Icon::Brake).is_none());
        assert!(store.font(FontWeight::Bold).is_none());
    }

    #[test]
    fn test_icon_lookup() {
        let store =
            AssetStore::empty().with_icon(Icon::Brake, RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        assert_eq!(store.icon(Icon::Brake).map(|i| i.dimensions()), Some((2, 2)));
        assert!(store.icon(Icon::Nda).is_none());
    }

    #[test]
    fn test_font_paths() {
        assert_eq!(font_file(FontWeight::Bold), "fonts/opensans_bold.ttf");
        assert_ne!(font_file(FontWeight::Regular), font_file(FontWeight::SemiBold));
    }
}
