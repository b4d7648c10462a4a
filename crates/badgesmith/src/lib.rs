#![forbid(unsafe_code)]

//! `badgesmith` renders two-segment "shield" badges (icon, label, value) as self-contained SVG.
//!
//! Layout uses a fixed glyph-width table instead of real font metrics, so output is
//! byte-identical across platforms. See [`render::render_badge`] for the core contract.
//!
//! # Features
//!
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub mod config;
pub mod icon;

pub use badgesmith_render::model::{BadgeGeometry, BadgeLayout, BadgeRequest};
pub use badgesmith_render::theme::{THEMES, Theme, resolve_theme, theme_names};
pub use config::BadgeConfig;
pub use icon::Icon;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read icon {path:?}: {source}")]
    IconRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid badge config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod render {
    use crate::config::BadgeConfig;
    use crate::icon::Icon;
    use badgesmith_render::model::{BadgeGeometry, BadgeLayout, BadgeRequest};
    use badgesmith_render::theme::lookup_theme;

    pub use badgesmith_render::svg::{escape_xml, render_badge_svg, render_layouted_badge_svg};
    pub use badgesmith_render::text::{GlyphTableTextMeasurer, TextMeasurer, TextStyle};
    pub use badgesmith_render::{LayoutOptions, layout_badge, render_badge};

    #[cfg(feature = "raster")]
    pub mod raster;

    /// Bundles an icon, a theme and layout options for repeated badge rendering.
    ///
    /// All work is CPU-bound and performs no I/O; a renderer can be shared across threads.
    #[derive(Debug, Clone)]
    pub struct BadgeRenderer {
        pub layout: LayoutOptions,
        pub theme: String,
        pub icon: Icon,
    }

    impl Default for BadgeRenderer {
        fn default() -> Self {
            Self {
                layout: LayoutOptions::default(),
                theme: crate::config::DEFAULT_THEME.to_string(),
                icon: Icon::default(),
            }
        }
    }

    impl BadgeRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Builds a renderer from config, loading the icon file when one is configured.
        pub fn from_config(config: &BadgeConfig) -> crate::Result<Self> {
            let icon = match config.icon.as_ref() {
                Some(path) => Icon::from_path(path)?,
                None => Icon::default(),
            };
            Ok(Self::new()
                .with_theme(config.theme())
                .with_geometry(config.geometry.clone())
                .with_icon(icon))
        }

        pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
            self.theme = theme.into();
            self
        }

        pub fn with_icon(mut self, icon: Icon) -> Self {
            self.icon = icon;
            self
        }

        pub fn with_geometry(mut self, geometry: BadgeGeometry) -> Self {
            self.layout.geometry = geometry;
            self
        }

        pub fn request(&self, label: &str, value: &str) -> BadgeRequest {
            self.request_with_theme(label, value, &self.theme)
        }

        pub fn request_with_theme(&self, label: &str, value: &str, theme: &str) -> BadgeRequest {
            if lookup_theme(theme).is_none() {
                tracing::debug!(theme, "unknown badge theme; using default");
            }
            BadgeRequest::new(label, value, theme, self.icon.data.as_str())
                .with_icon_mime(self.icon.mime.as_str())
        }

        pub fn layout(&self, label: &str, value: &str) -> BadgeLayout {
            layout_badge(&self.request(label, value), &self.layout)
        }

        pub fn render_svg(&self, label: &str, value: &str) -> String {
            render_badge_svg(&self.request(label, value), &self.layout)
        }

        pub fn render_svg_with_theme(&self, label: &str, value: &str, theme: &str) -> String {
            render_badge_svg(&self.request_with_theme(label, value, theme), &self.layout)
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            label: &str,
            value: &str,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg(label, value), options)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg(
            &self,
            label: &str,
            value: &str,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg(label, value), options)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf(
            &self,
            label: &str,
            value: &str,
            options: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg(label, value), options)
        }
    }
}
