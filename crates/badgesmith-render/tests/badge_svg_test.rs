use badgesmith_render::model::BadgeRequest;
use badgesmith_render::svg::render_badge_svg;
use badgesmith_render::{LayoutOptions, layout_badge, render_badge};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

fn child<'a, 'input>(
    root: roxmltree::Node<'a, 'input>,
    name: &str,
) -> roxmltree::Node<'a, 'input> {
    root.children()
        .find(|n| n.has_tag_name(name))
        .unwrap_or_else(|| panic!("missing <{name}>"))
}

fn texts<'a, 'input>(root: roxmltree::Node<'a, 'input>) -> Vec<roxmltree::Node<'a, 'input>> {
    root.children().filter(|n| n.has_tag_name("text")).collect()
}

#[test]
fn build_passing_matches_golden() {
    let svg = render_badge("build", "passing", "default", "");
    let expected = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="123" height="24" role="img">"#,
        "\n  <title>build: passing</title>\n  \n",
        r##"  <rect width="123" height="24" rx="4" fill="#4695EB"/>"##,
        "\n  \n",
        r#"  <image x="4" y="4" width="16" height="16" xlink:href="data:image/svg+xml;base64,"/>"#,
        "\n  \n",
        r##"  <text x="28" y="16" fill="#ffffff" font-family="Verdana,DejaVu Sans,sans-serif" font-size="12">build</text>"##,
        "\n",
        r##"  <text x="68" y="16" fill="#ffffff" font-family="Verdana,DejaVu Sans,sans-serif" font-size="12">passing</text>"##,
        "\n</svg>",
    );
    assert_eq!(svg, expected);
}

#[test]
fn output_is_well_formed_with_expected_structure() {
    let svg = render_badge("coverage", "98%", "dark", "PHN2Zy8+");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    let root = doc.root_element();
    assert!(root.has_tag_name("svg"));
    assert_eq!(root.attribute("role"), Some("img"));
    assert_eq!(root.attribute("height"), Some("24"));

    assert_eq!(child(root, "title").text(), Some("coverage: 98%"));

    let rect = child(root, "rect");
    assert_eq!(rect.attribute("fill"), Some("#0D1C2C"));
    assert_eq!(rect.attribute("width"), root.attribute("width"));

    let image = child(root, "image");
    assert_eq!(
        image.attribute((XLINK_NS, "href")),
        Some("data:image/svg+xml;base64,PHN2Zy8+")
    );

    let texts = texts(root);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].text(), Some("coverage"));
    assert_eq!(texts[1].text(), Some("98%"));
    for t in &texts {
        assert_eq!(t.attribute("fill"), Some("#e0e0e0"));
        assert_eq!(t.attribute("font-size"), Some("12"));
    }
}

#[test]
fn empty_inputs_render_minimal_badge() {
    let svg = render_badge("", "", "ai", "");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    let root = doc.root_element();
    assert_eq!(root.attribute("width"), Some("60"));
    assert_eq!(child(root, "rect").attribute("fill"), Some("#9b51e0"));
    let texts = texts(root);
    assert_eq!(texts[0].attribute("x"), Some("28"));
    assert_eq!(texts[1].attribute("x"), Some("44"));
    assert_eq!(texts[0].attribute("fill"), Some("#fff"));
}

#[test]
fn special_characters_are_escaped() {
    let svg = render_badge("a&b", "<v>", "native", "");
    assert!(svg.contains(">a&amp;b</text>"));
    assert!(svg.contains(">&lt;v&gt;</text>"));
    assert!(svg.contains("<title>a&amp;b: &lt;v&gt;</title>"));
    assert!(!svg.contains("<v>"));

    let svg = render_badge(r#"say "hi""#, "it's", "native", "");
    assert!(svg.contains("say &quot;hi&quot;"));
    assert!(svg.contains("it&apos;s"));

    let doc = roxmltree::Document::parse(&svg).expect("escaped output stays well-formed");
    let texts = texts(doc.root_element());
    assert_eq!(texts[0].text(), Some(r#"say "hi""#));
}

#[test]
fn markup_injection_does_not_add_elements() {
    let svg = render_badge("</text><script>alert(1)</script>", "x", "default", "");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert!(doc.descendants().all(|n| !n.has_tag_name("script")));
}

#[test]
fn unknown_theme_renders_like_default() {
    assert_eq!(
        render_badge("LABEL", "value", "unknowntheme", ""),
        render_badge("LABEL", "value", "default", "")
    );
    assert_eq!(
        render_badge("x", "y", "purple", "abc"),
        render_badge("x", "y", "default", "abc")
    );
}

#[test]
fn theme_key_is_case_insensitive() {
    assert_eq!(
        render_badge("x", "y", "DARK", ""),
        render_badge("x", "y", "dark", "")
    );
}

#[test]
fn padded_theme_key_falls_back_to_default() {
    let padded = render_badge("a", "b", " dark ", "");
    assert_eq!(padded, render_badge("a", "b", "default", ""));
    assert!(padded.contains(r##"fill="#4695EB""##));
    assert!(!padded.contains("#0D1C2C"));
}

#[test]
fn rendering_is_deterministic() {
    let a = render_badge("Built with", "badgesmith 🚀", "native", "QUJD");
    let b = render_badge("Built with", "badgesmith 🚀", "native", "QUJD");
    assert_eq!(a, b);
}

#[test]
fn request_api_matches_convenience_function() {
    let request = BadgeRequest::new("build", "passing", "Native", "QUJD");
    let svg = render_badge_svg(&request, &LayoutOptions::default());
    assert_eq!(svg, render_badge("build", "passing", "Native", "QUJD"));

    let png = request.clone().with_icon_mime("image/png");
    let svg = render_badge_svg(&png, &LayoutOptions::default());
    assert!(svg.contains(r#"xlink:href="data:image/png;base64,QUJD""#));
}

#[test]
fn layout_serializes_to_json() {
    let layout = layout_badge(
        &BadgeRequest::new("build", "passing", "dark", ""),
        &LayoutOptions::default(),
    );
    let json = serde_json::to_value(&layout).expect("json");
    assert_eq!(json["width"], 123.0);
    assert_eq!(json["theme"]["name"], "dark");
    assert_eq!(json["label"]["x"], 28.0);
    assert_eq!(json["value"]["text"], "passing");
}

#[test]
fn request_deserializes_with_defaults() {
    let request: BadgeRequest = serde_json::from_str(r#"{"label":"build"}"#).expect("json");
    assert_eq!(request.label, "build");
    assert_eq!(request.value, "");
    assert_eq!(request.theme, "default");
    assert_eq!(request.icon_mime, "image/svg+xml");
}
