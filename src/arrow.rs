use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use crate::layout::MapLayout;
use crate::record::{Feature, Orientation};
use crate::scene::{polar_point, ArcSpan, Primitive, Scene};

/// Arrowhead length along the tangent, in scene units. Like the circle gap this stays
/// fixed regardless of the scale factor, so arrows keep a constant visual weight.
pub const ARROW_SIZE: f32 = 12.0;
const ARROW_BASE_RATIO: f32 = 0.4;
const ARROW_BASE_WIDENING: f32 = 1.5;
const ARC_STROKE: f32 = 3.0;
const ARROW_STROKE: f32 = 2.25;

/// Distance from the arc end point to each arrowhead base point. The end cap on the
/// other end is twice this long so both ends read equally wide.
pub const ARROW_BASE_OFFSET: f32 = ARROW_SIZE * ARROW_BASE_RATIO * ARROW_BASE_WIDENING;

/// Clock angle (radians, 0 at 12 o'clock, clockwise) of a base-pair position.
pub fn position_angle(position: i64, length: u64) -> f32 {
    position as f32 / length as f32 * TAU
}

/// Angle consumed by the arrowhead when laid along an arc of `arc_radius`.
pub fn arrow_angle_delta(arc_radius: f32) -> f32 {
    ARROW_SIZE / (arc_radius * TAU) * TAU
}

/// Resolved geometry of one feature's arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureArrow {
    pub orientation: Orientation,
    /// Arc shortened on the decorated end to leave room for the arrowhead.
    pub arc: ArcSpan,
    /// Arc end point the arrowhead grows from.
    pub arc_point: (f32, f32),
    pub tip: (f32, f32),
    pub base: [(f32, f32); 2],
    /// Radial end cap on the undecorated end.
    pub cap: [(f32, f32); 2],
}

impl FeatureArrow {
    pub fn build(feature: &Feature, length: u64, layout: &MapLayout) -> Self {
        let radius = layout.inner_radius;
        let (cx, cy) = (layout.center_x, layout.center_y);
        let start = position_angle(feature.start, length);
        let stop = position_angle(feature.stop, length);
        let delta = arrow_angle_delta(radius);

        let (arc_start, mut arc_end) = match feature.orientation {
            Orientation::Sense => (start, stop - delta),
            Orientation::Antisense => (start + delta, stop),
        };
        if arc_end <= arc_start {
            arc_end += TAU;
        }

        let (decorated, undecorated, turn) = match feature.orientation {
            Orientation::Sense => (arc_end, arc_start, FRAC_PI_2),
            Orientation::Antisense => (arc_start, arc_end, -FRAC_PI_2),
        };

        let arrow_angle = decorated - FRAC_PI_2;
        let arc_point = polar_point(cx, cy, radius, arrow_angle);
        let tangent = arrow_angle + turn;
        let tip = polar_point(arc_point.0, arc_point.1, ARROW_SIZE, tangent);
        let base = [
            polar_point(arc_point.0, arc_point.1, ARROW_BASE_OFFSET, tangent - FRAC_PI_3),
            polar_point(arc_point.0, arc_point.1, ARROW_BASE_OFFSET, tangent + FRAC_PI_3),
        ];

        let cap_angle = undecorated - FRAC_PI_2;
        let cap_center = polar_point(cx, cy, radius, cap_angle);
        let cap = [
            polar_point(cap_center.0, cap_center.1, ARROW_BASE_OFFSET, cap_angle),
            polar_point(cap_center.0, cap_center.1, -ARROW_BASE_OFFSET, cap_angle),
        ];

        Self {
            orientation: feature.orientation,
            arc: ArcSpan {
                cx,
                cy,
                radius,
                start_angle: arc_start,
                end_angle: arc_end,
            },
            arc_point,
            tip,
            base,
            cap,
        }
    }

    /// Appends arc, arrowhead strokes and end cap, in that order.
    pub fn emit(&self, scene: &mut Scene) {
        scene.push(Primitive::Arc {
            span: self.arc,
            stroke_width: ARC_STROKE,
        });
        scene.push(Primitive::line(self.base[0], self.tip, ARROW_STROKE));
        scene.push(Primitive::line(self.base[1], self.tip, ARROW_STROKE));
        scene.push(Primitive::line(self.arc_point, self.tip, ARROW_STROKE));
        scene.push(Primitive::line(self.cap[0], self.cap[1], ARROW_STROKE));
    }
}

pub fn draw_feature_arrow(
    scene: &mut Scene,
    feature: &Feature,
    length: u64,
    layout: &MapLayout,
) {
    FeatureArrow::build(feature, length, layout).emit(scene);
}
