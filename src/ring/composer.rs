//! Layer composition for a single ring.

use tiny_skia::{FillRule, Mask, Rect, Stroke, Transform};

use super::{
    Layers,
    animation::RingAnimator,
    binding::ProgressBinding,
    config::RingConfig,
    geometry::{RingGeometry, circle_path},
    overlay::{Overlay, OverlayFrame},
    tip::{TipCap, tip_opacity},
};
use crate::render::{Canvas, MAX_CANVAS_SIDE, SweepGradient};

/// An activity ring: configuration plus optional overlay content.
///
/// Every render is a pure function of the configuration and the progress
/// passed in; nothing is cached between frames.
pub struct ActivityRing<O = ()> {
    config: RingConfig,
    overlay: O,
}

impl ActivityRing<()> {
    pub fn new(config: RingConfig) -> Self {
        Self {
            config: config.sanitized(),
            overlay: (),
        }
    }
}

impl Default for ActivityRing<()> {
    fn default() -> Self {
        Self::new(RingConfig::default())
    }
}

impl<O: Overlay> ActivityRing<O> {
    /// Replaces the overlay content.
    pub fn overlay<P: Overlay>(self, overlay: P) -> ActivityRing<P> {
        ActivityRing {
            config: self.config,
            overlay,
        }
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Size in ring units. Always square.
    pub fn size(&self) -> (f32, f32) {
        let side = self.config.side();
        (side, side)
    }

    /// Canvas side in pixels at a given scale.
    pub fn pixel_size(&self, scale: f32) -> u32 {
        let side = self.config.side();
        ((side * sanitize_scale(scale, side)).ceil() as u32).min(MAX_CANVAS_SIDE)
    }

    /// Layers a frame at `progress` would draw, with the tip at `tip_alpha` opacity.
    pub fn layers(&self, progress: f32, tip_alpha: f32) -> Layers {
        let geometry = RingGeometry::new(&self.config, progress);
        let mut layers = Layers::empty();
        layers.set(Layers::TRACK, self.config.background_color.is_some());
        layers.set(Layers::OUTLINE, self.config.outline_color.is_some());
        layers.set(Layers::ARC, geometry.trim > 0.0);
        let tip_visible = tip_alpha > 0.0;
        layers.set(Layers::TIP, tip_visible);
        layers.set(Layers::TIP_SHADOW, tip_visible && self.config.tip_shadow_color.is_some());
        layers.set(Layers::OVERLAY, !self.overlay.is_empty());
        layers
    }

    /// Renders a frame at scale 1.
    pub fn render(&self, progress: f32) -> Canvas {
        self.render_scaled(progress, 1.0)
    }

    /// Renders a frame with every dimension multiplied by `scale`.
    pub fn render_scaled(&self, progress: f32, scale: f32) -> Canvas {
        let side = self.pixel_size(scale);
        let mut canvas = Canvas::new(side, side);
        self.draw(&mut canvas, 0.0, 0.0, progress, scale);
        canvas
    }

    /// Renders the current value of a shared progress binding.
    pub fn render_bound(&self, binding: &ProgressBinding, scale: f32) -> Canvas {
        self.render_scaled(binding.get(), scale)
    }

    /// Renders the animated state of `animator`.
    pub fn render_frame(&self, animator: &RingAnimator, scale: f32) -> Canvas {
        let side = self.pixel_size(scale);
        let mut canvas = Canvas::new(side, side);
        self.compose(
            &mut canvas,
            0.0,
            0.0,
            animator.progress(),
            animator.tip_opacity(),
            scale,
        );
        canvas
    }

    /// Composes the ring into an existing canvas with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut Canvas, x: f32, y: f32, progress: f32, scale: f32) {
        self.compose(canvas, x, y, progress, tip_opacity(progress), scale);
    }

    fn compose(&self, canvas: &mut Canvas, x: f32, y: f32, progress: f32, tip_alpha: f32, scale: f32) {
        if !progress.is_finite() || progress < 0.0 {
            log::warn!("progress {progress} is not a non-negative number, drawing as 0");
        }
        let config = &self.config;
        let scale = sanitize_scale(scale, config.side());
        let geometry = RingGeometry::new(config, progress);
        let transform = Transform::from_scale(scale, scale).post_translate(x, y);

        log::debug!(
            "ring frame: progress {:.4}, trim {:.4}, angle {:.2}, tip ({:.2}, {:.2}), opacity {:.2}",
            geometry.progress,
            geometry.trim,
            geometry.angle_degrees,
            geometry.tip.x,
            geometry.tip.y,
            tip_alpha
        );

        if let Some(track) = config.background_color {
            if let Some(path) = geometry.donut_path() {
                canvas.fill_path(&path, track, transform, None);
            }
        }

        if let Some(outline) = config.outline_color {
            let offset = (config.thickness - config.outline_thickness) / 2.0;
            let stroke = Stroke {
                width: config.outline_thickness,
                ..Default::default()
            };
            for r in [config.radius + offset, config.radius - offset] {
                if r <= 0.0 {
                    continue;
                }
                if let Some(path) = circle_path(geometry.center, r) {
                    canvas.stroke_path(&path, outline, &stroke, transform, None);
                }
            }
        }

        if let Some(shape) = geometry.arc_shape() {
            if let Some(mut mask) = Mask::new(canvas.width(), canvas.height()) {
                mask.fill_path(&shape, FillRule::Winding, true, transform);
                let gradient = SweepGradient {
                    cx: x + geometry.center.x * scale,
                    cy: y + geometry.center.y * scale,
                    from: config.color,
                    to: config.effective_tip_color(),
                    end: geometry.gradient_end(),
                };
                gradient.fill_masked(canvas, &mask);
            }
        }

        TipCap::new(&geometry, config).draw(canvas, transform, tip_alpha);

        let side = geometry.side * scale;
        if let Some(bounds) = Rect::from_xywh(x, y, side, side) {
            let frame = OverlayFrame::new(
                bounds,
                geometry.inner_radius * scale,
                scale,
                config.color,
                geometry.progress,
            );
            self.overlay.draw(canvas, &frame);
        }
    }
}

/// Invalid scales draw at 1. Large ones are capped so a ring of `side`
/// units fits a canvas of `MAX_CANVAS_SIDE` pixels.
fn sanitize_scale(scale: f32, side: f32) -> f32 {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let max = MAX_CANVAS_SIDE as f32 / side;
    if scale > max {
        log::warn!("scale {scale} too large for a {side} unit ring, using {max}");
        max
    } else {
        scale
    }
}
