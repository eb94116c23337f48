use std::f32::consts::{FRAC_PI_2, TAU};

use crate::layout::MapLayout;
use crate::scene::{polar_point, Baseline, Primitive, Scene, TextAnchor};

pub const TICK_INTERVAL: u64 = 100;
const CIRCLE_STROKE: f32 = 3.0;
const TICK_STROKE: f32 = 1.5;
const TITLE_FONT_SIZE: f32 = 24.0;
const TITLE_OFFSET: f32 = 20.0;

/// Number of ticks drawn for a sequence: one every [`TICK_INTERVAL`] bp starting at 0.
pub fn tick_count(length: u64) -> u64 {
    length / TICK_INTERVAL
}

/// Draws both backbone circles, the tick ring between them, and the name and length
/// captions at the center.
pub fn draw_backbone(scene: &mut Scene, layout: &MapLayout, name: &str, length: u64) {
    for r in [layout.outer_radius, layout.outer_radius2] {
        scene.push(Primitive::Circle {
            cx: layout.center_x,
            cy: layout.center_y,
            r,
            stroke_width: CIRCLE_STROKE,
        });
    }

    for i in 0..tick_count(length) {
        let fraction = (i * TICK_INTERVAL) as f32 / length as f32;
        let angle = fraction * TAU - FRAC_PI_2;
        let inner = polar_point(layout.center_x, layout.center_y, layout.outer_radius, angle);
        let outer = polar_point(layout.center_x, layout.center_y, layout.outer_radius2, angle);
        scene.push(Primitive::line(inner, outer, TICK_STROKE));
    }

    let font_size = layout.scaled(TITLE_FONT_SIZE);
    scene.push(Primitive::Text {
        x: layout.center_x,
        y: layout.center_y + layout.scaled(TITLE_OFFSET),
        content: name.to_string(),
        font_size,
        anchor: TextAnchor::Middle,
        baseline: Baseline::Alphabetic,
    });
    scene.push(Primitive::Text {
        x: layout.center_x,
        y: layout.center_y - layout.scaled(TITLE_OFFSET),
        content: format!("{} bp", length),
        font_size,
        anchor: TextAnchor::Middle,
        baseline: Baseline::Alphabetic,
    });
}
