use std::f32::consts::FRAC_PI_2;

use log::debug;

use crate::fonts::TextMeasure;
use crate::layout::MapLayout;
use crate::record::Feature;
use crate::scene::{polar_point, Baseline, Primitive, Scene, TextAnchor};

/// Distances below are given at the reference size and multiplied by the scale factor.
const LABEL_OFFSET: f32 = 80.0;
const DOGLEG_OFFSET: f32 = 50.0;
const TEXT_PADDING: f32 = 5.0;
const BASE_FONT_SIZE: f32 = 24.0;
const CONNECTOR_STROKE: f32 = 2.25;

/// Which label column a feature is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    /// Right of the circle, text growing rightward.
    Right,
    /// Left of the circle, text growing leftward.
    Left,
}

impl LabelSide {
    /// Clock degrees in `[0, 180)` go right, everything else (180 included) goes left.
    /// Negative midpoints are brought up by one turn first; 360 and beyond stay left.
    pub fn for_clock_degrees(degrees: f64) -> Self {
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        if (0.0..180.0).contains(&degrees) {
            LabelSide::Right
        } else {
            LabelSide::Left
        }
    }

    pub fn anchor(&self) -> TextAnchor {
        match self {
            LabelSide::Right => TextAnchor::Start,
            LabelSide::Left => TextAnchor::End,
        }
    }
}

/// First feature name with the largest character count, or `""` without features.
pub fn longest_name(features: &[Feature]) -> &str {
    features.iter().fold("", |longest, feature| {
        if feature.name.chars().count() > longest.chars().count() {
            feature.name.as_str()
        } else {
            longest
        }
    })
}

/// Horizontal room between a label column and the nearer edge of the effective box.
pub fn available_label_space(layout: &MapLayout) -> f32 {
    let reach = layout.outer_radius + layout.scaled(LABEL_OFFSET);
    let left = layout.center_x - reach - layout.offset_x;
    let right = layout.right_edge() - layout.center_x - reach;
    left.min(right)
}

/// Font size shared by every feature label. Shrinks uniformly so the longest name
/// fits its column; never grows past the base size.
pub fn label_font_size<M: TextMeasure>(
    features: &[Feature],
    layout: &MapLayout,
    measure: &mut M,
) -> f32 {
    let base = layout.scaled(BASE_FONT_SIZE);
    let longest = longest_name(features);
    let estimated = measure.text_width(longest, base);
    let available = available_label_space(layout);

    let font_size = if estimated > available {
        (base * available / estimated).max(0.0)
    } else {
        base
    };

    debug!(
        "Label font: longest {:?} ~{:.2} wide, {:.2} available, size {:.2}",
        longest, estimated, available, font_size
    );
    font_size
}

/// Clock angle of a feature's midpoint in degrees. A `stop` before `start` is read as
/// wrapping through the origin. Summed in `i128` so no `i64` coordinates can overflow.
pub fn midpoint_degrees(feature: &Feature, length: u64) -> f64 {
    let length = i128::from(length);
    let start = i128::from(feature.start);
    let stop = if feature.stop < feature.start {
        i128::from(feature.stop) + length
    } else {
        i128::from(feature.stop)
    };
    (start + stop) as f64 * 180.0 / length as f64
}

/// Resolved dogleg connector and text position for one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub side: LabelSide,
    /// Point on the feature ring at the span midpoint.
    pub arc_mid: (f32, f32),
    /// End of the radial segment.
    pub elbow: (f32, f32),
    /// End of the horizontal segment, on the label column.
    pub column: (f32, f32),
    pub text: (f32, f32),
}

impl LabelPlacement {
    pub fn place(feature: &Feature, length: u64, layout: &MapLayout) -> Self {
        let degrees = midpoint_degrees(feature, length);
        let side = LabelSide::for_clock_degrees(degrees);
        let mid_angle = (degrees as f32).to_radians() - FRAC_PI_2;
        let (cx, cy) = (layout.center_x, layout.center_y);

        let reach = layout.outer_radius + layout.scaled(LABEL_OFFSET);
        let (column_x, padding) = match side {
            LabelSide::Right => (cx + reach, layout.scaled(TEXT_PADDING)),
            LabelSide::Left => (cx - reach, -layout.scaled(TEXT_PADDING)),
        };

        let arc_mid = polar_point(cx, cy, layout.inner_radius, mid_angle);
        let elbow = polar_point(
            cx,
            cy,
            layout.outer_radius + layout.scaled(DOGLEG_OFFSET),
            mid_angle,
        );

        Self {
            side,
            arc_mid,
            elbow,
            column: (column_x, elbow.1),
            text: (column_x + padding, elbow.1),
        }
    }

    /// Appends both connector segments, then the text.
    pub fn emit(&self, scene: &mut Scene, name: &str, font_size: f32) {
        scene.push(Primitive::line(self.arc_mid, self.elbow, CONNECTOR_STROKE));
        scene.push(Primitive::line(self.elbow, self.column, CONNECTOR_STROKE));
        scene.push(Primitive::Text {
            x: self.text.0,
            y: self.text.1,
            content: name.to_string(),
            font_size,
            anchor: self.side.anchor(),
            baseline: Baseline::Middle,
        });
    }
}

pub fn draw_feature_label(
    scene: &mut Scene,
    feature: &Feature,
    length: u64,
    layout: &MapLayout,
    font_size: f32,
) {
    LabelPlacement::place(feature, length, layout).emit(scene, &feature.name, font_size);
}
