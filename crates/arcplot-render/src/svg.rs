//! SVG serialization of a [`Canvas`].
//!
//! The figure holds a single set of axes: the plot area spans
//! `[0.125, 0.9] x [0.11, 0.88]` of the figure, data limits are either explicit or derived from
//! the drawn content with a 5% margin, and items are stacked edges < nodes < labels regardless
//! of the order they were drawn in. Arc curvature, end trimming and arrow heads are computed
//! here in pixel space, so they do not depend on the aspect ratio of the data.

use crate::canvas::{ArrowGeometry, ArrowPatch, Canvas, Item, Marker, TextLabel};
use crate::path::BezierPath;
use crate::{Point, Vector};
use euclid::{point2, vec2};
use std::fmt::Write as _;

const AXES_LEFT: f64 = 0.125;
const AXES_RIGHT: f64 = 0.9;
const AXES_BOTTOM: f64 = 0.11;
const AXES_TOP: f64 = 0.88;
const AUTO_MARGIN: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Figure background; `None` leaves it transparent.
    pub background: Option<String>,
    /// Draws the axes frame.
    pub frame: bool,
    /// Prefix for element ids, so several diagrams can share one HTML page.
    pub diagram_id: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            background: Some("white".to_string()),
            frame: true,
            diagram_id: "arcplot".to_string(),
        }
    }
}

/// Maps data coordinates to SVG pixels (y grows downwards).
#[derive(Debug, Clone, Copy)]
struct View {
    xlim: (f64, f64),
    ylim: (f64, f64),
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl View {
    fn new(canvas: &Canvas) -> Self {
        let (w, h) = (canvas.width_px(), canvas.height_px());
        let bounds = canvas.data_bounds();
        let xlim = canvas
            .xlim()
            .unwrap_or_else(|| auto_limits(bounds.map(|(lo, hi)| (lo.x, hi.x))));
        let ylim = canvas
            .ylim()
            .unwrap_or_else(|| auto_limits(bounds.map(|(lo, hi)| (lo.y, hi.y))));
        Self {
            xlim,
            ylim,
            left: AXES_LEFT * w,
            right: AXES_RIGHT * w,
            top: (1.0 - AXES_TOP) * h,
            bottom: (1.0 - AXES_BOTTOM) * h,
        }
    }

    fn to_px(&self, p: Point) -> Point {
        let fx = fraction(p.x, self.xlim);
        let fy = fraction(p.y, self.ylim);
        point2(
            self.left + fx * (self.right - self.left),
            self.bottom - fy * (self.bottom - self.top),
        )
    }
}

fn fraction(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span == 0.0 { 0.5 } else { (v - lo) / span }
}

fn auto_limits(range: Option<(f64, f64)>) -> (f64, f64) {
    let Some((lo, hi)) = range else {
        return (0.0, 1.0);
    };
    let span = hi - lo;
    if span <= 0.0 {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * AUTO_MARGIN };
        return (lo - pad, hi + pad);
    }
    (lo - span * AUTO_MARGIN, hi + span * AUTO_MARGIN)
}

/// Serializes `canvas` as a standalone SVG document.
pub fn render_svg(canvas: &Canvas, options: &SvgRenderOptions) -> String {
    let (w, h) = (canvas.width_px(), canvas.height_px());
    let view = View::new(canvas);
    let id = escape_xml(&options.diagram_id);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(w),
        h = fmt(h),
    );
    let _ = write!(
        out,
        r#"<defs><clipPath id="{id}-axes"><rect x="{x}" y="{y}" width="{cw}" height="{ch}"/></clipPath></defs>"#,
        x = fmt(view.left),
        y = fmt(view.top),
        cw = fmt(view.right - view.left),
        ch = fmt(view.bottom - view.top),
    );
    if let Some(bg) = &options.background {
        let _ = write!(
            out,
            r#"<rect class="background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            fmt(w),
            fmt(h),
            escape_xml(bg)
        );
    }

    let _ = write!(out, r#"<g class="plot" clip-path="url(#{id}-axes)">"#);
    let mut items: Vec<&Item> = canvas.items().iter().collect();
    items.sort_by_key(|item| z_order(item));
    for item in items {
        match item {
            Item::Arrow(a) => write_arrow(&mut out, canvas, &view, a),
            Item::Marker(m) => write_marker(&mut out, canvas, &view, m),
            Item::Text(t) => write_text(&mut out, canvas, &view, t),
        }
    }
    out.push_str("</g>");

    if options.frame {
        let _ = write!(
            out,
            r##"<rect class="frame" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000000" stroke-width="{}"/>"##,
            fmt(view.left),
            fmt(view.top),
            fmt(view.right - view.left),
            fmt(view.bottom - view.top),
            fmt(canvas.pt_to_px(0.8)),
        );
    }

    if let Some(title) = canvas.title() {
        let _ = write!(
            out,
            r#"<text class="title" x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="{}">{}</text>"#,
            fmt(0.5 * (view.left + view.right)),
            fmt(view.top - canvas.pt_to_px(6.0)),
            fmt(canvas.pt_to_px(14.4)),
            escape_xml(title)
        );
    }

    out.push_str("</svg>");
    tracing::debug!(
        items = canvas.items().len(),
        width = w,
        height = h,
        "svg rendered"
    );
    out
}

fn z_order(item: &Item) -> u8 {
    match item {
        Item::Arrow(_) => 1,
        Item::Marker(_) => 2,
        Item::Text(_) => 3,
    }
}

/// Centerline of an arrow in pixel space, before trimming.
fn arrow_centerline(view: &View, arrow: &ArrowPatch) -> BezierPath {
    match &arrow.geometry {
        ArrowGeometry::Path(path) => path.map_points(|p| view.to_px(p)),
        ArrowGeometry::Arc3 { from, to, rad } => {
            let a = view.to_px(*from);
            let b = view.to_px(*to);
            let mid = a.lerp(b, 0.5);
            let d = b - a;
            // Screen y points down, so the bend `rad * (dy, -dx)` flips its y terms.
            let ctrl = mid + vec2(-rad * d.y, rad * d.x);
            BezierPath::new(a).quad_to(ctrl, b)
        }
    }
}

/// Writes one arrow group. Ends that sit inside their marker disk are drawn untrimmed.
fn write_arrow(out: &mut String, canvas: &Canvas, view: &View, arrow: &ArrowPatch) {
    let centerline = arrow_centerline(view, arrow);
    let body = centerline.shrunk(
        canvas.pt_to_px(arrow.shrink_a),
        canvas.pt_to_px(arrow.shrink_b),
    );

    let class = match arrow.geometry {
        ArrowGeometry::Path(_) => "self-loop",
        ArrowGeometry::Arc3 { .. } => "edge",
    };
    let _ = write!(out, r#"<g class="{class}""#);
    if let Some(edge) = &arrow.edge {
        let _ = write!(
            out,
            r#" data-source="{}" data-target="{}""#,
            escape_xml(&edge.v),
            escape_xml(&edge.w)
        );
    }
    let color = escape_xml(&arrow.color);
    let _ = write!(
        out,
        r#" opacity="{}"><path d="{}" fill="none" stroke="{color}" stroke-width="{}"/>"#,
        fmt(arrow.alpha),
        body.to_svg_d(fmt),
        fmt(canvas.pt_to_px(arrow.line_width)),
    );

    if let (Some(head), Some(dir), Some(tip)) = (arrow.head, body.end_direction(), body.end()) {
        let poly = head_polygon(
            tip,
            dir,
            canvas.pt_to_px(head.length),
            canvas.pt_to_px(head.half_width),
        );
        let points = poly
            .iter()
            .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            out,
            r#"<polygon class="arrow-head" points="{points}" fill="{color}" stroke="{color}" stroke-width="{}"/>"#,
            fmt(canvas.pt_to_px(arrow.line_width)),
        );
    }
    out.push_str("</g>");
}

/// Triangle of a `-|>` head whose tip sits on `tip`, pointing along `dir`.
fn head_polygon(tip: Point, dir: Vector, length: f64, half_width: f64) -> [Point; 3] {
    let base = tip - dir * length;
    let normal = vec2(-dir.y, dir.x) * half_width;
    [tip, base + normal, base - normal]
}

fn write_marker(out: &mut String, canvas: &Canvas, view: &View, marker: &Marker) {
    let c = view.to_px(marker.center);
    let _ = write!(
        out,
        r#"<circle class="node" data-id="{}" cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
        escape_xml(&marker.node),
        fmt(c.x),
        fmt(c.y),
        fmt(canvas.pt_to_px(marker.radius_pt())),
        escape_xml(&marker.color),
        fmt(marker.alpha),
    );
}

fn write_text(out: &mut String, canvas: &Canvas, view: &View, text: &TextLabel) {
    let anchor = view.to_px(text.anchor);
    // Offsets are given y-up like data coordinates.
    let x = anchor.x + canvas.pt_to_px(text.offset.x);
    let y = anchor.y - canvas.pt_to_px(text.offset.y);
    let _ = write!(out, r#"<text class="label""#);
    if let Some(node) = &text.node {
        let _ = write!(out, r#" data-id="{}""#, escape_xml(node));
    }
    let _ = write!(
        out,
        r#" x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" fill="{}""#,
        fmt(x),
        fmt(y),
        escape_xml(&text.font_family),
        fmt(canvas.pt_to_px(text.font_size)),
        escape_xml(&text.color),
    );
    if text.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    let _ = write!(out, ">{}</text>", escape_xml(&text.text));
}

/// Shortest decimal form with at most three fractional digits.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
