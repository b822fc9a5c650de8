#![forbid(unsafe_code)]

//! `arcplot` draws weighted graphs as static diagrams in which self-loops stay visible and the
//! two directions of a reverse edge pair never overlap.
//!
//! The work is split across three crates re-exported here:
//! - [`graphlib`]: the ordered graph container and adjacency-matrix constructors
//! - [`layout`]: circular, Kamada-Kawai and spring layouts
//! - the drawing routines and [`Canvas`] (from `arcplot-render`, re-exported at the root)
//!
//! # Features
//!
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

use std::path::Path;

pub use arcplot_graphlib as graphlib;
pub use arcplot_layout as layout;
pub use arcplot_render::*;

pub use arcplot_graphlib::{AttrGraph, Attrs, EdgeKey, GraphOptions, weighted};

#[cfg(feature = "raster")]
pub mod raster;

/// Output formats understood by [`save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl ImageFormat {
    /// Format for a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("unknown image format: {s}"))
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("cannot infer image format from {path}")]
    UnknownFormat { path: String },
    #[error("{format} output requires the `raster` feature")]
    RasterDisabled { format: ImageFormat },
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] raster::RasterError),
}

#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub svg: SvgRenderOptions,
    #[cfg(feature = "raster")]
    pub raster: raster::RasterOptions,
}

/// Serializes `canvas` in `format`.
pub fn encode(
    canvas: &Canvas,
    format: ImageFormat,
    options: &SaveOptions,
) -> std::result::Result<Vec<u8>, SaveError> {
    let svg = canvas.to_svg(&options.svg);
    match format {
        ImageFormat::Svg => Ok(svg.into_bytes()),
        #[cfg(feature = "raster")]
        ImageFormat::Png => Ok(raster::svg_to_png(&svg, &options.raster)?),
        #[cfg(feature = "raster")]
        ImageFormat::Jpeg => Ok(raster::svg_to_jpeg(&svg, &options.raster)?),
        #[cfg(feature = "raster")]
        ImageFormat::Pdf => Ok(raster::svg_to_pdf(&svg)?),
        #[cfg(not(feature = "raster"))]
        other => Err(SaveError::RasterDisabled { format: other }),
    }
}

/// Writes `canvas` to `path`, choosing the format from the file extension.
pub fn save(
    canvas: &Canvas,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> std::result::Result<ImageFormat, SaveError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| SaveError::UnknownFormat {
        path: path.display().to_string(),
    })?;
    let bytes = encode(canvas, format, options)?;
    std::fs::write(path, &bytes).map_err(|source| SaveError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), %format, bytes = bytes.len(), "image saved");
    Ok(format)
}

/// Converts an arbitrary string into a conservative SVG `id` token, so several diagrams can be
/// inlined into one page without their internal ids colliding.
///
/// Unsupported characters become `-`, runs of `-` collapse, and ids that do not start with an
/// ASCII letter get an `a-` prefix.
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "a-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }

    if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        out.insert_str(0, "a-");
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "a" {
        return "a-untitled".to_string();
    }
    out.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_follow_extensions() {
        assert_eq!(ImageFormat::from_extension("SVG"), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_path(Path::new("out/plot.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_path(Path::new("plot")), None);
        assert_eq!("pdf".parse::<ImageFormat>(), Ok(ImageFormat::Pdf));
        assert!("gif".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn sanitize_svg_id_is_conservative() {
        assert_eq!(sanitize_svg_id("  "), "a-untitled");
        assert_eq!(sanitize_svg_id("cells network"), "cells-network");
        assert_eq!(sanitize_svg_id("1 graph"), "a-1-graph");
        assert_eq!(sanitize_svg_id("a//b"), "a-b");
        assert_eq!(sanitize_svg_id("---"), "a-untitled");
    }

    #[test]
    fn svg_encoding_needs_no_feature() {
        let canvas = Canvas::default();
        let bytes = encode(&canvas, ImageFormat::Svg, &SaveOptions::default()).unwrap();
        assert!(bytes.starts_with(b"<svg"));
    }

    #[cfg(not(feature = "raster"))]
    #[test]
    fn raster_formats_need_the_feature() {
        let err = encode(&Canvas::default(), ImageFormat::Png, &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SaveError::RasterDisabled {
                format: ImageFormat::Png
            }
        ));
    }
}
