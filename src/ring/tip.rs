//! Rounded tip cap drawn over the end of the progress arc.

use tiny_skia::{FillRule, Mask, PathBuilder, Point, Stroke, Transform};

use super::{
    config::RingConfig,
    geometry::{sanitize_progress, RingGeometry},
};
use crate::render::Canvas;

/// Wrapped lap fraction at which the cap appears.
pub const TIP_VISIBILITY_THRESHOLD: f32 = 0.95;

/// Progress look-ahead used to find the direction of travel (0.75% of a lap).
pub const SHADOW_SAMPLE_DELTA: f32 = 0.0075;

/// Border drawn around the cap to hide the seam with the arc's round cap.
const SEAM_BORDER_WIDTH: f32 = 1.0;

/// Number of stacked discs approximating the shadow blur.
const SHADOW_STEPS: usize = 4;

/// Shadow spread beyond the cap, relative to the thickness.
const SHADOW_SPREAD: f32 = 0.2;

/// Target opacity of the cap for a progress value: 0 or 1.
///
/// Hidden at zero and for the first 95% of the first lap. From then on the
/// stroke is (nearly) a full circle and only the cap shows where the current
/// lap ends, so it stays visible.
pub fn tip_opacity(progress: f32) -> f32 {
    let progress = sanitize_progress(progress);
    if progress >= 1.0 || progress.fract() >= TIP_VISIBILITY_THRESHOLD {
        1.0
    } else {
        0.0
    }
}

/// Offset of the shadow from the tip: the vector from the tip to a point
/// slightly further along the arc.
pub fn shadow_offset(geometry: &RingGeometry) -> Point {
    let ahead = geometry.point_at(geometry.progress + SHADOW_SAMPLE_DELTA);
    Point::from_xy(ahead.x - geometry.tip.x, ahead.y - geometry.tip.y)
}

/// Clip mask covering the annulus of the ring, in device space.
pub fn annulus_mask(canvas: &Canvas, geometry: &RingGeometry, transform: Transform) -> Option<Mask> {
    let path = geometry.donut_path()?;
    let mut mask = Mask::new(canvas.width(), canvas.height())?;
    mask.fill_path(&path, FillRule::Winding, true, transform);
    Some(mask)
}

/// Draws the shadow, seam border and disc of the tip cap.
pub struct TipCap<'a> {
    geometry: &'a RingGeometry,
    config: &'a RingConfig,
}

impl<'a> TipCap<'a> {
    pub fn new(geometry: &'a RingGeometry, config: &'a RingConfig) -> Self {
        Self {
            geometry,
            config,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas, transform: Transform, opacity: f32) {
        if opacity.is_nan() || opacity <= 0.0 || self.geometry.thickness <= 0.0 {
            return;
        }
        let Some(mask) = annulus_mask(canvas, self.geometry, transform) else {
            return;
        };

        let tip = self.geometry.tip;
        let cap_radius = self.geometry.thickness / 2.0;
        let tip_color = self.config.effective_tip_color().scale_alpha(opacity);

        if let Some(shadow) = self.config.tip_shadow_color {
            let offset = shadow_offset(self.geometry);
            let spread = self.geometry.thickness * SHADOW_SPREAD;
            // Outermost disc first; the overlap builds up a soft falloff
            let step_color = shadow.scale_alpha(opacity / SHADOW_STEPS as f32);
            for step in (0..SHADOW_STEPS).rev() {
                let r = cap_radius + spread * step as f32 / (SHADOW_STEPS - 1) as f32;
                canvas.fill_circle(
                    tip.x + offset.x,
                    tip.y + offset.y,
                    r,
                    step_color,
                    transform,
                    Some(&mask),
                );
            }
        }

        if let Some(disc) = PathBuilder::from_circle(tip.x, tip.y, cap_radius) {
            let border = Stroke {
                width: SEAM_BORDER_WIDTH,
                ..Default::default()
            };
            canvas.stroke_path(&disc, tip_color, &border, transform, Some(&mask));
            canvas.fill_path(&disc, tip_color, transform, Some(&mask));
        }
    }
}
