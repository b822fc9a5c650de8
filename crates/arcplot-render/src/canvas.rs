//! The drawing context every routine draws into.
//!
//! A [`Canvas`] is a display list in data coordinates plus figure-level settings (size, title,
//! axis limits). Nothing is rasterized or laid out until [`Canvas::to_svg`]; patch geometry
//! that depends on the final pixel mapping (arc curvature, end trimming, arrow heads) is
//! resolved there.

use crate::path::BezierPath;
use crate::svg::{SvgRenderOptions, render_svg};
use crate::{Point, Vector};
use arcplot_graphlib::EdgeKey;
use euclid::vec2;

/// Typographic points per inch; all stroke widths and sizes are in points.
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone)]
pub struct Canvas {
    width_in: f64,
    height_in: f64,
    dpi: f64,
    title: Option<String>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    items: Vec<Item>,
}

impl Default for Canvas {
    /// A 10 x 10 inch figure at 100 dpi.
    fn default() -> Self {
        Self::square(10.0)
    }
}

impl Canvas {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi: 100.0,
            title: None,
            xlim: None,
            ylim: None,
            items: Vec::new(),
        }
    }

    pub fn square(size_in: f64) -> Self {
        Self::new(size_in, size_in)
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn width_px(&self) -> f64 {
        self.width_in * self.dpi
    }

    pub fn height_px(&self) -> f64 {
        self.height_in * self.dpi
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn push(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn arrows(&self) -> impl Iterator<Item = &ArrowPatch> {
        self.items.iter().filter_map(|i| match i {
            Item::Arrow(a) => Some(a),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.items.iter().filter_map(|i| match i {
            Item::Marker(m) => Some(m),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextLabel> {
        self.items.iter().filter_map(|i| match i {
            Item::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Bounding box `(min, max)` of everything drawn, control points included; `None` for an
    /// empty canvas. Text is not included.
    pub fn data_bounds(&self) -> Option<(Point, Point)> {
        let mut it = self.items.iter().flat_map(Item::anchor_points);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    pub fn to_svg(&self, options: &SvgRenderOptions) -> String {
        render_svg(self, options)
    }

    /// Points to pixels at this canvas' dpi.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / POINTS_PER_INCH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Arrow(ArrowPatch),
    Marker(Marker),
    Text(TextLabel),
}

impl Item {
    fn anchor_points(&self) -> Vec<Point> {
        match self {
            Item::Arrow(a) => match &a.geometry {
                ArrowGeometry::Path(p) => p.vertices(),
                ArrowGeometry::Arc3 { from, to, .. } => vec![*from, *to],
            },
            Item::Marker(m) => vec![m.center],
            Item::Text(_) => Vec::new(),
        }
    }
}

/// How an arrow's centerline is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowGeometry {
    /// An explicit path in data coordinates.
    Path(BezierPath),
    /// A quadratic arc between two data points. The control point sits at the chord midpoint,
    /// offset perpendicular to the chord by `rad` times the chord length (measured on screen).
    /// Positive `rad` bends the arc to the right of the direction of travel.
    Arc3 { from: Point, to: Point, rad: f64 },
}

/// Filled `-|>` head; sizes in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub length: f64,
    pub half_width: f64,
}

impl ArrowHead {
    /// Head proportions of a `-|>` arrow style for a given mutation scale.
    pub fn from_mutation_scale(scale: f64) -> Self {
        Self {
            length: 0.4 * scale,
            half_width: 0.2 * scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowPatch {
    /// The graph edge this patch renders, when drawn by the edge routines.
    pub edge: Option<EdgeKey>,
    pub geometry: ArrowGeometry,
    pub color: String,
    pub alpha: f64,
    /// Stroke width in points.
    pub line_width: f64,
    pub head: Option<ArrowHead>,
    /// Distance in points trimmed off the start / end of the centerline.
    pub shrink_a: f64,
    pub shrink_b: f64,
}

impl ArrowPatch {
    pub fn is_self_loop(&self) -> bool {
        self.edge.as_ref().is_some_and(EdgeKey::is_self_loop)
    }

    /// Arc radius for `Arc3` patches.
    pub fn arc_radius(&self) -> Option<f64> {
        match self.geometry {
            ArrowGeometry::Arc3 { rad, .. } => Some(rad),
            ArrowGeometry::Path(_) => None,
        }
    }
}

/// Circular node marker. `size` is the marker area in square points.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub node: String,
    pub center: Point,
    pub size: f64,
    pub color: String,
    pub alpha: f64,
}

impl Marker {
    pub fn radius_pt(&self) -> f64 {
        self.size.max(0.0).sqrt() / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub node: Option<String>,
    pub anchor: Point,
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
    pub font_family: String,
    /// Offset from the anchor, in points.
    pub offset: Vector,
}

impl TextLabel {
    pub fn new(anchor: Point, text: impl Into<String>) -> Self {
        Self {
            node: None,
            anchor,
            text: text.into(),
            font_size: 12.0,
            color: "black".to_string(),
            bold: false,
            font_family: "sans-serif".to_string(),
            offset: vec2(0.0, 0.0),
        }
    }
}
