use crate::theme::Theme;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON_MIME: &str = "image/svg+xml";

/// Inputs for a single badge.
///
/// Missing fields deserialize to empty text, the `default` theme and an SVG icon mime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BadgeRequest {
    pub label: String,
    pub value: String,
    pub theme: String,
    /// Base64 payload embedded verbatim into a `data:` URI.
    pub icon_data: String,
    pub icon_mime: String,
}

impl Default for BadgeRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            value: String::new(),
            theme: "default".to_string(),
            icon_data: String::new(),
            icon_mime: DEFAULT_ICON_MIME.to_string(),
        }
    }
}

impl BadgeRequest {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        theme: impl Into<String>,
        icon_data: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            theme: theme.into(),
            icon_data: icon_data.into(),
            ..Default::default()
        }
    }

    pub fn with_icon_mime(mut self, mime: impl Into<String>) -> Self {
        self.icon_mime = mime.into();
        self
    }
}

/// Fixed badge geometry. The defaults describe a 24px tall badge with a 16px icon and 12px text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BadgeGeometry {
    pub icon_size: f64,
    pub icon_padding: f64,
    pub text_padding: f64,
    /// Text baseline; vertically centers a 12px font inside the default height.
    pub text_y: f64,
    pub font_size: f64,
    pub font_family: String,
    pub height: f64,
    pub corner_radius: f64,
}

impl Default for BadgeGeometry {
    fn default() -> Self {
        Self {
            icon_size: 16.0,
            icon_padding: 4.0,
            text_padding: 8.0,
            text_y: 16.0,
            font_size: 12.0,
            font_family: "Verdana,DejaVu Sans,sans-serif".to_string(),
            height: 24.0,
            corner_radius: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconBox {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// One padded text segment. `x` is the text start, not the segment's left edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub text_width: f64,
    pub width: f64,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeLayout {
    pub theme: Theme,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub icon: IconBox,
    pub label: TextSegment,
    pub value: TextSegment,
    pub text_y: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl BadgeLayout {
    /// Accessible title text (`"<label>: <value>"`), unescaped.
    pub fn title(&self) -> String {
        format!("{}: {}", self.label.text, self.value.text)
    }
}
