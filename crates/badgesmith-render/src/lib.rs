#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for two-segment "shield" badges.
//!
//! Rendering is a pure function of its inputs: the theme and glyph tables are immutable statics,
//! no I/O is performed, and every input (empty text, unknown theme, malformed icon payload)
//! produces a best-effort badge instead of an error.

pub mod layout;
pub mod model;
pub mod svg;
pub mod text;
pub mod theme;

use crate::model::{BadgeGeometry, BadgeLayout, BadgeRequest};
use crate::text::{GlyphTableTextMeasurer, TextMeasurer};
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub geometry: BadgeGeometry,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(GlyphTableTextMeasurer),
            geometry: BadgeGeometry::default(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

pub fn layout_badge(request: &BadgeRequest, options: &LayoutOptions) -> BadgeLayout {
    layout::layout_badge_with(request, &options.geometry, options.text_measurer.as_ref())
}

/// Renders a badge with the default glyph metrics and geometry.
///
/// `theme` is matched case-insensitively and falls back to `default`; `icon_data` is a base64
/// SVG payload embedded as a `data:` URI.
pub fn render_badge(label: &str, value: &str, theme: &str, icon_data: &str) -> String {
    let request = BadgeRequest::new(label, value, theme, icon_data);
    svg::render_badge_svg(&request, &LayoutOptions::default())
}
