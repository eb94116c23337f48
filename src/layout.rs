use log::debug;

/// Width:height ratio the diagram is fitted into.
pub const TARGET_ASPECT_RATIO: f32 = 3.0;
/// Size at which `scale_factor == 1`.
pub const REFERENCE_SIZE: f32 = 800.0;
/// Feature arcs sit at this fraction of the short side.
pub const INNER_RADIUS_FRACTION: f32 = 0.30;
/// Radial gap between the feature ring and the first backbone circle, and between the two
/// backbone circles. Fixed in scene units, not multiplied by the scale factor.
pub const CIRCLE_GAP: f32 = 15.0;

/// Geometry shared by every drawer for a single render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLayout {
    pub width: f32,
    pub height: f32,
    pub effective_width: f32,
    pub effective_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_factor: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub outer_radius2: f32,
}

impl MapLayout {
    /// Fits a 3:1 box centered inside `width` x `height`. Returns `None` when either bound
    /// is not strictly positive, in which case nothing is drawn.
    pub fn solve(width: f32, height: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) {
            debug!("Skipping layout for non-positive bounds {}x{}", width, height);
            return None;
        }

        let (effective_width, effective_height) = if width / height > TARGET_ASPECT_RATIO {
            (height * TARGET_ASPECT_RATIO, height)
        } else {
            (width, width / TARGET_ASPECT_RATIO)
        };

        let offset_x = (width - effective_width) / 2.0;
        let offset_y = (height - effective_height) / 2.0;
        let short_side = effective_width.min(effective_height);
        let scale_factor = short_side / REFERENCE_SIZE;

        let inner_radius = short_side * INNER_RADIUS_FRACTION;
        let outer_radius = inner_radius + CIRCLE_GAP;

        let layout = Self {
            width,
            height,
            effective_width,
            effective_height,
            offset_x,
            offset_y,
            scale_factor,
            center_x: offset_x + effective_width / 2.0,
            center_y: offset_y + effective_height / 2.0,
            inner_radius,
            outer_radius,
            outer_radius2: outer_radius + CIRCLE_GAP,
        };

        debug!(
            "Layout: effective {:.2}x{:.2}, scale {:.4}, center ({:.2}, {:.2}), radii {:.2}/{:.2}/{:.2}",
            layout.effective_width,
            layout.effective_height,
            layout.scale_factor,
            layout.center_x,
            layout.center_y,
            layout.inner_radius,
            layout.outer_radius,
            layout.outer_radius2,
        );

        Some(layout)
    }

    /// Scales a layout-proportional distance given at the reference size.
    pub fn scaled(&self, value: f32) -> f32 {
        value * self.scale_factor
    }

    pub fn right_edge(&self) -> f32 {
        self.offset_x + self.effective_width
    }
}

#[cfg(test)]
mod tests {
    use super::MapLayout;

    #[test]
    fn wide_bounds_are_limited_by_height() {
        let layout = MapLayout::solve(2000.0, 400.0).expect("layout");
        assert_eq!(layout.effective_height, 400.0);
        assert_eq!(layout.effective_width, 1200.0);
        assert_eq!(layout.offset_x, 400.0);
        assert_eq!(layout.offset_y, 0.0);
        assert_eq!(layout.center_x, 1000.0);
        assert_eq!(layout.center_y, 200.0);
    }

    #[test]
    fn tall_bounds_are_limited_by_width() {
        let layout = MapLayout::solve(900.0, 900.0).expect("layout");
        assert_eq!(layout.effective_width, 900.0);
        assert_eq!(layout.effective_height, 300.0);
        assert_eq!(layout.offset_y, 300.0);
        assert_eq!(layout.center_y, 450.0);
    }

    #[test]
    fn radii_and_scale_follow_short_side() {
        let layout = MapLayout::solve(2400.0, 800.0).expect("layout");
        assert!((layout.scale_factor - 1.0).abs() < 1e-6);
        assert!((layout.inner_radius - 240.0).abs() < 1e-4);
        assert!((layout.outer_radius - 255.0).abs() < 1e-4);
        assert!((layout.outer_radius2 - 270.0).abs() < 1e-4);
    }

    #[test]
    fn circle_gap_is_not_scaled() {
        let small = MapLayout::solve(600.0, 200.0).expect("layout");
        assert!((small.outer_radius - small.inner_radius - 15.0).abs() < 1e-4);
        assert!((small.outer_radius2 - small.outer_radius - 15.0).abs() < 1e-4);
    }

    #[test]
    fn non_positive_bounds_yield_no_layout() {
        assert!(MapLayout::solve(0.0, 100.0).is_none());
        assert!(MapLayout::solve(100.0, -1.0).is_none());
        assert!(MapLayout::solve(f32::NAN, 100.0).is_none());
    }
}
