use crate::model::{BadgeGeometry, BadgeLayout, BadgeRequest, IconBox, TextSegment};
use crate::text::{TextMeasurer, TextStyle};
use crate::theme::resolve_theme;

fn measure_segment(
    text: &str,
    geometry: &BadgeGeometry,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
    x: f64,
) -> TextSegment {
    let text_width = measurer.measure(text, style).width.max(0.0);
    TextSegment {
        text: text.to_string(),
        text_width,
        width: text_width + geometry.text_padding * 2.0,
        x,
    }
}

/// Computes badge geometry left to right: icon block, label segment, value segment.
pub fn layout_badge_with(
    request: &BadgeRequest,
    geometry: &BadgeGeometry,
    measurer: &dyn TextMeasurer,
) -> BadgeLayout {
    let theme = *resolve_theme(&request.theme);
    let style = TextStyle {
        font_family: Some(geometry.font_family.clone()),
        font_size: geometry.font_size,
        font_weight: None,
    };

    let label_x = geometry.icon_size + geometry.icon_padding + geometry.text_padding;
    let label = measure_segment(request.label.trim(), geometry, &style, measurer, label_x);

    let value_x = label.x + label.width;
    let value = measure_segment(request.value.trim(), geometry, &style, measurer, value_x);

    BadgeLayout {
        theme,
        width: value.x + value.width,
        height: geometry.height,
        corner_radius: geometry.corner_radius,
        icon: IconBox {
            x: geometry.icon_padding,
            y: geometry.icon_padding,
            size: geometry.icon_size,
        },
        label,
        value,
        text_y: geometry.text_y,
        font_size: geometry.font_size,
        font_family: geometry.font_family.clone(),
    }
}
