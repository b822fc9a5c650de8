//! Bezier paths in the spirit of PostScript path codes: a `MoveTo` followed by line, quadratic
//! and cubic segments.
//!
//! Paths are stored in whatever space they were built in (data coordinates for patches added
//! to a [`Canvas`](crate::Canvas)); the SVG writer maps them to pixels and trims their ends.

use crate::{Point, Vector};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic segment: one control point, then the end point.
    Curve3(Point, Point),
    /// Cubic segment: two control points, then the end point.
    Curve4(Point, Point, Point),
}

impl PathCommand {
    fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::Curve3(_, p) => p,
            PathCommand::Curve4(_, _, p) => p,
        }
    }

    fn map(&self, f: &impl Fn(Point) -> Point) -> PathCommand {
        match *self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(f(p)),
            PathCommand::Curve3(c, p) => PathCommand::Curve3(f(c), f(p)),
            PathCommand::Curve4(c1, c2, p) => PathCommand::Curve4(f(c1), f(c2), f(p)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierPath {
    commands: Vec<PathCommand>,
}

impl BezierPath {
    pub fn new(start: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start)],
        }
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn quad_to(mut self, ctrl: Point, p: Point) -> Self {
        self.commands.push(PathCommand::Curve3(ctrl, p));
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, p: Point) -> Self {
        self.commands.push(PathCommand::Curve4(c1, c2, p));
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }

    /// Every vertex, control points included, in command order.
    pub fn vertices(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.commands.len() * 3);
        for c in &self.commands {
            match *c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => out.push(p),
                PathCommand::Curve3(a, p) => out.extend([a, p]),
                PathCommand::Curve4(a, b, p) => out.extend([a, b, p]),
            }
        }
        out
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> BezierPath {
        BezierPath {
            commands: self.commands.iter().map(|c| c.map(&f)).collect(),
        }
    }

    /// Unit tangent at the end of the path, pointing in the direction of travel.
    pub fn end_direction(&self) -> Option<Vector> {
        let segment = self.last_segment()?;
        segment.end_direction()
    }

    /// Removes `from_start` (resp. `from_end`) of straight-line distance around the first
    /// (resp. last) point, cutting through the first (resp. last) segment. Returns `None` when
    /// nothing would be left to draw.
    pub fn trimmed(&self, from_start: f64, from_end: f64) -> Option<BezierPath> {
        let mut segments = self.segments();
        if segments.is_empty() {
            return None;
        }

        if from_start > 0.0 {
            let first = segments[0];
            let origin = first.point_at(0.0);
            let t = first.exit_param(origin, from_start, false)?;
            segments[0] = first.split(t).1;
        }
        if from_end > 0.0 {
            let last_ix = segments.len() - 1;
            let last = segments[last_ix];
            let target = last.point_at(1.0);
            let t = last.exit_param(target, from_end, true)?;
            segments[last_ix] = last.split(t).0;
        }

        let mut out = BezierPath::new(segments[0].start());
        for s in &segments {
            out.commands.push(s.to_command());
        }
        Some(out)
    }

    /// Trims each end like [`BezierPath::trimmed`], except that an end whose disk swallows
    /// the whole segment is kept untrimmed. The other end is still trimmed.
    pub fn shrunk(&self, from_start: f64, from_end: f64) -> BezierPath {
        let head = self
            .trimmed(from_start, 0.0)
            .unwrap_or_else(|| self.clone());
        head.trimmed(0.0, from_end).unwrap_or(head)
    }

    /// SVG `d` attribute.
    pub fn to_svg_d(&self, fmt: impl Fn(f64) -> String) -> String {
        let mut out = String::new();
        for c in &self.commands {
            match *c {
                PathCommand::MoveTo(p) => {
                    let _ = write!(out, "M{},{}", fmt(p.x), fmt(p.y));
                }
                PathCommand::LineTo(p) => {
                    let _ = write!(out, "L{},{}", fmt(p.x), fmt(p.y));
                }
                PathCommand::Curve3(a, p) => {
                    let _ = write!(out, "Q{},{},{},{}", fmt(a.x), fmt(a.y), fmt(p.x), fmt(p.y));
                }
                PathCommand::Curve4(a, b, p) => {
                    let _ = write!(
                        out,
                        "C{},{},{},{},{},{}",
                        fmt(a.x),
                        fmt(a.y),
                        fmt(b.x),
                        fmt(b.y),
                        fmt(p.x),
                        fmt(p.y)
                    );
                }
            }
        }
        out
    }

    fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::new();
        let mut cur: Option<Point> = None;
        for c in &self.commands {
            match *c {
                PathCommand::MoveTo(p) => cur = Some(p),
                PathCommand::LineTo(p) => {
                    if let Some(s) = cur {
                        out.push(Segment::Line(s, p));
                    }
                    cur = Some(p);
                }
                PathCommand::Curve3(a, p) => {
                    if let Some(s) = cur {
                        out.push(Segment::Quad(s, a, p));
                    }
                    cur = Some(p);
                }
                PathCommand::Curve4(a, b, p) => {
                    if let Some(s) = cur {
                        out.push(Segment::Cubic(s, a, b, p));
                    }
                    cur = Some(p);
                }
            }
        }
        out
    }

    fn last_segment(&self) -> Option<Segment> {
        self.segments().pop()
    }
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Line(Point, Point),
    Quad(Point, Point, Point),
    Cubic(Point, Point, Point, Point),
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}

impl Segment {
    fn start(&self) -> Point {
        match *self {
            Segment::Line(a, _) | Segment::Quad(a, _, _) | Segment::Cubic(a, _, _, _) => a,
        }
    }

    fn to_command(self) -> PathCommand {
        match self {
            Segment::Line(_, b) => PathCommand::LineTo(b),
            Segment::Quad(_, c, b) => PathCommand::Curve3(c, b),
            Segment::Cubic(_, c1, c2, b) => PathCommand::Curve4(c1, c2, b),
        }
    }

    fn point_at(&self, t: f64) -> Point {
        match *self {
            Segment::Line(a, b) => lerp(a, b, t),
            Segment::Quad(a, c, b) => lerp(lerp(a, c, t), lerp(c, b, t), t),
            Segment::Cubic(a, c1, c2, b) => {
                let ab = lerp(a, c1, t);
                let bc = lerp(c1, c2, t);
                let cd = lerp(c2, b, t);
                lerp(lerp(ab, bc, t), lerp(bc, cd, t), t)
            }
        }
    }

    /// de Casteljau split at `t`.
    fn split(&self, t: f64) -> (Segment, Segment) {
        match *self {
            Segment::Line(a, b) => {
                let m = lerp(a, b, t);
                (Segment::Line(a, m), Segment::Line(m, b))
            }
            Segment::Quad(a, c, b) => {
                let ac = lerp(a, c, t);
                let cb = lerp(c, b, t);
                let m = lerp(ac, cb, t);
                (Segment::Quad(a, ac, m), Segment::Quad(m, cb, b))
            }
            Segment::Cubic(a, c1, c2, b) => {
                let ab = lerp(a, c1, t);
                let bc = lerp(c1, c2, t);
                let cd = lerp(c2, b, t);
                let abc = lerp(ab, bc, t);
                let bcd = lerp(bc, cd, t);
                let m = lerp(abc, bcd, t);
                (Segment::Cubic(a, ab, abc, m), Segment::Cubic(m, bcd, cd, b))
            }
        }
    }

    fn end_direction(&self) -> Option<Vector> {
        // Degenerate control points fall back to the next one out.
        let candidates: Vec<(Point, Point)> = match *self {
            Segment::Line(a, b) => vec![(a, b)],
            Segment::Quad(a, c, b) => vec![(c, b), (a, b)],
            Segment::Cubic(a, c1, c2, b) => vec![(c2, b), (c1, b), (a, b)],
        };
        candidates.into_iter().find_map(|(from, to)| {
            let d = to - from;
            let len = d.length();
            (len > 1e-12).then(|| d / len)
        })
    }

    /// Parameter where the segment leaves the disk of `radius` around `center`, searched from
    /// the start (or from the end when `from_end`). `None` when the whole segment stays inside.
    fn exit_param(&self, center: Point, radius: f64, from_end: bool) -> Option<f64> {
        let inside = |t: f64| (self.point_at(t) - center).length() < radius;
        const SAMPLES: usize = 64;

        // First sample outside the disk, walking away from the anchored end.
        let mut prev = if from_end { 1.0 } else { 0.0 };
        let mut outside = None;
        for i in 1..=SAMPLES {
            let f = i as f64 / SAMPLES as f64;
            let t = if from_end { 1.0 - f } else { f };
            if !inside(t) {
                outside = Some(t);
                break;
            }
            prev = t;
        }
        let (mut lo, mut hi) = (prev, outside?);

        for _ in 0..48 {
            let mid = 0.5 * (lo + hi);
            if inside(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(hi)
    }
}
