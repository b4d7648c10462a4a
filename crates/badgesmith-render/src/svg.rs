use crate::LayoutOptions;
use crate::layout::layout_badge_with;
use crate::model::{BadgeLayout, BadgeRequest, DEFAULT_ICON_MIME};
use ryu_js::Buffer;
use std::fmt::Write as _;

/// Escapes the five XML special characters using their named entities.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds the `data:` URI for an icon. The payload is not validated.
pub fn icon_data_uri(mime: &str, base64_data: &str) -> String {
    let mime = mime.trim();
    let mime = if mime.is_empty() {
        DEFAULT_ICON_MIME
    } else {
        mime
    };
    format!("data:{mime};base64,{base64_data}")
}

// JS `Number#toString` formatting: `123` rather than `123.0`.
fn fmt(v: f64) -> String {
    let mut b = Buffer::new();
    b.format(v).to_string()
}

pub fn render_badge_svg(request: &BadgeRequest, options: &LayoutOptions) -> String {
    let layout = layout_badge_with(request, &options.geometry, options.text_measurer.as_ref());
    render_layouted_badge_svg(&layout, &request.icon_mime, &request.icon_data)
}

/// Emits the badge document for an already computed layout.
///
/// The element order and whitespace are stable; output for a given layout is byte-identical
/// across runs.
pub fn render_layouted_badge_svg(
    layout: &BadgeLayout,
    icon_mime: &str,
    icon_data: &str,
) -> String {
    let width = fmt(layout.width);
    let height = fmt(layout.height);
    let font_family = escape_xml(&layout.font_family);
    let font_size = fmt(layout.font_size);
    let text_y = fmt(layout.text_y);
    let fill = escape_xml(layout.theme.text);

    let mut out = String::with_capacity(768 + icon_data.len());
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" role="img">"#
    );
    let _ = writeln!(&mut out, "  <title>{}</title>", escape_xml(&layout.title()));
    out.push_str("  \n");
    let _ = writeln!(
        &mut out,
        r#"  <rect width="{width}" height="{height}" rx="{}" fill="{}"/>"#,
        fmt(layout.corner_radius),
        escape_xml(layout.theme.background),
    );
    out.push_str("  \n");
    let _ = writeln!(
        &mut out,
        r#"  <image x="{}" y="{}" width="{size}" height="{size}" xlink:href="{}"/>"#,
        fmt(layout.icon.x),
        fmt(layout.icon.y),
        escape_xml(&icon_data_uri(icon_mime, icon_data)),
        size = fmt(layout.icon.size),
    );
    out.push_str("  \n");
    for segment in [&layout.label, &layout.value] {
        let _ = writeln!(
            &mut out,
            r#"  <text x="{}" y="{text_y}" fill="{fill}" font-family="{font_family}" font-size="{font_size}">{}</text>"#,
            fmt(segment.x),
            escape_xml(&segment.text),
        );
    }
    out.push_str("</svg>");
    out
}
