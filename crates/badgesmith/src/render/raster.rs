#![forbid(unsafe_code)]

use crate::render::{LayoutOptions, render_badge_svg};
use badgesmith_render::model::BadgeRequest;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

impl RasterOptions {
    pub fn from_config(config: &crate::BadgeConfig) -> Self {
        let defaults = Self::default();
        Self {
            scale: config
                .scale
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(defaults.scale),
            background: config.background.clone(),
            jpeg_quality: config
                .jpeg_quality
                .map(|q| q.clamp(1, 100))
                .unwrap_or(defaults.jpeg_quality),
        }
    }
}

pub fn render_png_sync(
    request: &BadgeRequest,
    layout_options: &LayoutOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_png(&render_badge_svg(request, layout_options), raster)
}

pub fn render_jpeg_sync(
    request: &BadgeRequest,
    layout_options: &LayoutOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_jpeg(&render_badge_svg(request, layout_options), raster)
}

pub fn render_pdf_sync(
    request: &BadgeRequest,
    layout_options: &LayoutOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_pdf(&render_badge_svg(request, layout_options), raster)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque background fill means alpha is always 255 and can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst[0] = src[0];
        dst[1] = src[1];
        dst[2] = src[2];
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

/// Converts to a single-page PDF sized to the badge; `scale` multiplies the page size in points.
pub fn svg_to_pdf(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FALLBACK_FONT_FAMILY.to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // One SVG px is one point at 72 dpi; lowering the dpi enlarges the page.
    let page = svg2pdf::PageOptions {
        dpi: 72.0 / options.scale,
    };
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|_| RasterError::PdfConvert)
}

// Badges ask for Verdana first; system selection may vary, this only covers hosts without it.
const FALLBACK_FONT_FAMILY: &str = "DejaVu Sans";

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = FALLBACK_FONT_FAMILY.to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Badge SVGs carry explicit width/height and no viewBox, so the tree size is the badge size.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::TRANSPARENT),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    // `#rgb`/`#rgba` expand to `#rrggbb`/`#rrggbbaa`; a missing alpha is opaque.
    let hex = s.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let full = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 | 8 => hex.to_string(),
        _ => return None,
    };
    let v = u32::from_str_radix(&full, 16).ok()?;
    let (rgb, a) = if full.len() == 6 { (v, 0xff) } else { (v >> 8, v & 0xff) };
    Some(tiny_skia::Color::from_rgba8(
        (rgb >> 16) as u8,
        (rgb >> 8) as u8,
        rgb as u8,
        a as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::Icon;
    use crate::render::BadgeRenderer;

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        // IHDR starts right after the 8-byte signature + 8-byte chunk header.
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        (w, h)
    }

    #[test]
    fn badge_png_matches_layout_size() {
        let renderer = BadgeRenderer::new();
        let bytes = renderer
            .render_png("build", "passing", &RasterOptions::default())
            .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(png_size(&bytes), (123, 24));
    }

    #[test]
    fn scale_multiplies_pixel_size() {
        let renderer = BadgeRenderer::new().with_icon(Icon::empty());
        let options = RasterOptions {
            scale: 2.0,
            ..Default::default()
        };
        let bytes = renderer.render_png("", "", &options).unwrap();
        assert_eq!(png_size(&bytes), (120, 48));
    }

    #[test]
    fn jpeg_requires_opaque_background() {
        let renderer = BadgeRenderer::new();
        let options = RasterOptions {
            background: Some("transparent".to_string()),
            ..Default::default()
        };
        let err = renderer.render_jpeg("a", "b", &options).unwrap_err();
        assert!(matches!(err, RasterError::JpegOpaqueBackgroundRequired));

        let options = RasterOptions {
            background: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let err = renderer.render_jpeg("a", "b", &options).unwrap_err();
        assert!(matches!(err, RasterError::JpegBackground));
    }

    #[test]
    fn jpeg_and_pdf_signatures() {
        let renderer = BadgeRenderer::new();
        let jpg = renderer
            .render_jpeg("a", "b", &RasterOptions::default())
            .unwrap();
        assert!(jpg.starts_with(&[0xFF, 0xD8, 0xFF]));
        let pdf = renderer.render_pdf("a", "b", &RasterOptions::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn malformed_svg_is_reported() {
        let err = svg_to_png("<svg", &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::SvgParse));
    }

    #[test]
    fn pdf_page_follows_scale() {
        let renderer = BadgeRenderer::new().with_icon(Icon::empty());
        let scaled = RasterOptions {
            scale: 2.0,
            ..Default::default()
        };
        let one = renderer
            .render_pdf("build", "passing", &RasterOptions::default())
            .unwrap();
        let two = renderer.render_pdf("build", "passing", &scaled).unwrap();
        assert!(two.starts_with(b"%PDF-"));
        assert_ne!(one, two);
    }

    #[test]
    fn parses_css_hex_colors() {
        let c = parse_tiny_skia_color("#4695EB").unwrap().to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0x46, 0x95, 0xEB, 0xFF));
        let c = parse_tiny_skia_color("#9b51e080").unwrap().to_color_u8();
        assert_eq!((c.red(), c.alpha()), (0x9b, 0x80));
        let c = parse_tiny_skia_color("#fff").unwrap().to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0xff, 0xff, 0xff, 0xff));
        let c = parse_tiny_skia_color("#f008").unwrap().to_color_u8();
        assert_eq!((c.red(), c.green(), c.alpha()), (0xff, 0x00, 0x88));
        assert!(parse_tiny_skia_color("#12345").is_none());
        assert!(parse_tiny_skia_color("#+12").is_none());
        assert_eq!(parse_tiny_skia_color("transparent").unwrap().alpha(), 0.0);
    }

    #[test]
    fn raster_options_from_config_clamps_values() {
        let cfg = crate::BadgeConfig {
            scale: Some(-1.0),
            jpeg_quality: Some(0),
            ..Default::default()
        };
        let opts = RasterOptions::from_config(&cfg);
        assert_eq!(opts.scale, 1.0);
        assert_eq!(opts.jpeg_quality, 1);
    }
}
