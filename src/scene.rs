use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Horizontal alignment of a text node relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical placement of a text node relative to its `y` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

/// A circular arc of constant radius. Angles are clock angles in radians:
/// 0 at 12 o'clock, increasing clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl ArcSpan {
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn start_point(&self) -> (f32, f32) {
        clock_point(self.cx, self.cy, self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> (f32, f32) {
        clock_point(self.cx, self.cy, self.radius, self.end_angle)
    }

    /// SVG path data. A full turn is split in two half turns since an SVG arc
    /// whose endpoints coincide draws nothing.
    pub fn path_data(&self) -> String {
        let (sx, sy) = self.start_point();
        let (ex, ey) = self.end_point();
        let r = self.radius;

        if self.sweep() >= TAU - 1e-4 {
            let (mx, my) = clock_point(self.cx, self.cy, r, self.start_angle + PI);
            return format!(
                "M{:.2},{:.2}A{:.2},{:.2} 0 1 1 {:.2},{:.2}A{:.2},{:.2} 0 1 1 {:.2},{:.2}",
                sx, sy, r, r, mx, my, r, r, sx, sy
            );
        }

        let large_arc = if self.sweep() > PI { 1 } else { 0 };
        format!(
            "M{:.2},{:.2}A{:.2},{:.2} 0 {} 1 {:.2},{:.2}",
            sx, sy, r, r, large_arc, ex, ey
        )
    }
}

/// One draw instruction with every coordinate already resolved to absolute scene units.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        stroke_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke_width: f32,
    },
    Arc {
        span: ArcSpan,
        stroke_width: f32,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        font_size: f32,
        anchor: TextAnchor,
        baseline: Baseline,
    },
}

impl Primitive {
    pub fn line(from: (f32, f32), to: (f32, f32), stroke_width: f32) -> Self {
        Primitive::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            stroke_width,
        }
    }
}

/// The ordered output of one render pass. Later primitives paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32, TextAnchor, f32)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text {
                x,
                y,
                content,
                font_size,
                anchor,
                ..
            } => Some((content.as_str(), *x, *y, *anchor, *font_size)),
            _ => None,
        })
    }
}

/// Converts a clock angle (0 at 12 o'clock, clockwise) to a point on a circle.
pub fn clock_point(cx: f32, cy: f32, radius: f32, clock_angle: f32) -> (f32, f32) {
    polar_point(cx, cy, radius, clock_angle - FRAC_PI_2)
}

/// Point at `radius` along a screen angle (0 at 3 o'clock, y axis pointing down).
pub fn polar_point(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}
