//! PNG, JPG and PDF output, converted from the SVG serialization of a [`Canvas`].

use arcplot_render::{Canvas, SvgRenderOptions};

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
    /// Output pixels per SVG pixel.
    pub scale: f32,
    /// Fill painted below the drawing; JPG falls back to white.
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

pub fn render_png(canvas: &Canvas, svg: &SvgRenderOptions, raster: &RasterOptions) -> Result<Vec<u8>> {
    svg_to_png(&canvas.to_svg(svg), raster)
}

pub fn render_jpeg(
    canvas: &Canvas,
    svg: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    svg_to_jpeg(&canvas.to_svg(svg), raster)
}

pub fn render_pdf(canvas: &Canvas, svg: &SvgRenderOptions) -> Result<Vec<u8>> {
    svg_to_pdf(&canvas.to_svg(svg))
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

    // The background is opaque, so every alpha byte is 255 and can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "DejaVu Sans".to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

/// Width and height of the root `viewBox="minX minY w h"`, without validating the document.
fn parse_svg_viewbox(svg: &str) -> Option<(f32, f32)> {
    let i = svg.find("viewBox=\"")?;
    let rest = &svg[i + "viewBox=\"".len()..];
    let end = rest.find('"')?;
    let mut it = rest[..end].split_whitespace();
    let _min_x = it.next()?.parse::<f32>().ok()?;
    let _min_y = it.next()?.parse::<f32>().ok()?;
    let width = it.next()?.parse::<f32>().ok()?;
    let height = it.next()?.parse::<f32>().ok()?;
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    // Labels ask for `sans-serif`; pin the fallback so output does not depend on fontconfig.
    opt.font_family = "DejaVu Sans".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // usvg applies the root viewBox transform itself; only the output size is taken from it.
    let (width, height) = parse_svg_viewbox(svg).unwrap_or_else(|| {
        let size = tree.size();
        (size.width(), size.height())
    });

    let width_px = (width * scale).ceil().max(1.0) as u32;
    let height_px = (height * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width_px, height_px, "svg rasterized");
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" | "none" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        3 => (hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?, 255),
        4 => (
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            hex1(bytes[3])?,
        ),
        6 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        ),
        8 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        ),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcplot_graphlib::{AttrGraph, GraphOptions};
    use arcplot_render::{ChordOptions, render_chord_diagram};

    fn small_canvas() -> Canvas {
        let g = AttrGraph::from_adjacency_matrix(
            &[[1.0, 1.0], [2.0, 0.0]],
            GraphOptions::directed(),
        )
        .unwrap();
        let opts = ChordOptions {
            plot_size: 2.0,
            ..ChordOptions::default()
        };
        render_chord_diagram(&g, &opts).unwrap()
    }

    #[test]
    fn png_has_signature_and_canvas_size() {
        let bytes = render_png(
            &small_canvas(),
            &SvgRenderOptions::default(),
            &RasterOptions::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        // IHDR width and height, big-endian, right after the chunk header.
        let w = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let h = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!((w, h), (200, 200));
    }

    #[test]
    fn jpeg_has_signature() {
        let bytes = render_jpeg(
            &small_canvas(),
            &SvgRenderOptions::default(),
            &RasterOptions::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(&[0xff, 0xd8, 0xff]));
    }

    #[test]
    fn jpeg_rejects_translucent_background() {
        let opts = RasterOptions {
            background: Some("#ffffff80".to_string()),
            ..RasterOptions::default()
        };
        let err = svg_to_jpeg("<svg/>", &opts).unwrap_err();
        assert!(matches!(err, RasterError::JpegOpaqueBackgroundRequired));
    }

    #[test]
    fn pdf_has_signature() {
        let bytes = render_pdf(&small_canvas(), &SvgRenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn colors_parse_like_css_hex() {
        let c = parse_tiny_skia_color("#1f78b4").unwrap();
        assert_eq!(c.to_color_u8().red(), 0x1f);
        assert_eq!(c.to_color_u8().blue(), 0xb4);
        assert!(parse_tiny_skia_color("#12").is_none());
        assert!(parse_tiny_skia_color("pink").is_none());
    }

    #[test]
    fn viewbox_parse_needs_positive_size() {
        assert_eq!(
            parse_svg_viewbox(r#"<svg viewBox="0 0 20 10">"#),
            Some((20.0, 10.0))
        );
        assert_eq!(parse_svg_viewbox(r#"<svg viewBox="0 0 0 10">"#), None);
        assert_eq!(parse_svg_viewbox("<svg>"), None);
    }
}
