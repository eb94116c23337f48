pub mod arrow;
pub mod backbone;
pub mod error;
pub mod export;
pub mod fonts;
pub mod labels;
pub mod layout;
pub mod record;
pub mod scene;
pub mod style;
pub mod svg;

use log::warn;

use crate::fonts::{CharWidthEstimate, TextMeasure};
use crate::layout::MapLayout;
use crate::record::SequenceRecord;
use crate::scene::Scene;

pub use crate::error::{PlasmapError, Result};
pub use crate::record::{Feature, Orientation};
pub use crate::style::MapStyle;

/// Renders a circular map of `record` into `width` x `height`.
///
/// The result depends only on the arguments: rendering twice yields equal scenes.
/// Non-positive bounds produce an empty scene. Features are drawn in input order, each as
/// its arrow followed by its label, after the backbone.
pub fn render<M: TextMeasure>(
    record: &SequenceRecord,
    width: f32,
    height: f32,
    measure: &mut M,
) -> Scene {
    let Some(layout) = MapLayout::solve(width, height) else {
        return Scene::empty(width, height);
    };

    let mut scene = Scene::empty(width, height);
    backbone::draw_backbone(&mut scene, &layout, &record.name, record.length);

    if record.length == 0 {
        if !record.features.is_empty() {
            warn!(
                "Sequence '{}' has length 0; skipping {} feature(s)",
                record.name,
                record.features.len()
            );
        }
        return scene;
    }

    let font_size = labels::label_font_size(&record.features, &layout, measure);

    for feature in &record.features {
        if feature.is_degenerate(record.length) {
            warn!(
                "Feature '{}' ({}..{}) does not fit a non-wrapping span of a {} bp sequence",
                feature.name, feature.start, feature.stop, record.length
            );
        }
        arrow::draw_feature_arrow(&mut scene, feature, record.length, &layout);
        labels::draw_feature_label(&mut scene, feature, record.length, &layout, font_size);
    }

    scene
}

/// [`render`] with labels measured by the character-count estimate.
pub fn render_default(record: &SequenceRecord, width: f32, height: f32) -> Scene {
    render(record, width, height, &mut CharWidthEstimate)
}
