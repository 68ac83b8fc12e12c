//! Content drawn on top of the ring.

use tiny_skia::Rect;

use super::geometry::sanitize_progress;
use crate::render::{Canvas, Font, Rgba};

/// Label height relative to the ring's inner diameter.
const LABEL_SIZE_RATIO: f32 = 0.45;

/// What an overlay gets to know about the ring it sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    /// Ring bounds in canvas pixels.
    pub bounds: Rect,
    /// Inner radius in canvas pixels.
    pub inner_radius: f32,
    /// Device pixels per ring unit.
    pub scale: f32,
    /// Ring color, for overlays that want to match it.
    pub color: Rgba,
    progress: f32,
}

impl OverlayFrame {
    pub(crate) fn new(bounds: Rect, inner_radius: f32, scale: f32, color: Rgba, progress: f32) -> Self {
        Self {
            bounds,
            inner_radius,
            scale,
            color,
            progress,
        }
    }

    /// The progress currently displayed by the ring (read-only).
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.bounds.x() + self.bounds.width() / 2.0,
            self.bounds.y() + self.bounds.height() / 2.0,
        )
    }
}

/// Caller-supplied content layered above the ring.
pub trait Overlay {
    fn draw(&self, canvas: &mut Canvas, frame: &OverlayFrame);

    /// True when the overlay never draws anything.
    fn is_empty(&self) -> bool {
        false
    }
}

/// No overlay.
impl Overlay for () {
    fn draw(&self, _canvas: &mut Canvas, _frame: &OverlayFrame) {}

    fn is_empty(&self) -> bool {
        true
    }
}

impl<F> Overlay for F
where
    F: Fn(&mut Canvas, &OverlayFrame),
{
    fn draw(&self, canvas: &mut Canvas, frame: &OverlayFrame) {
        self(canvas, frame)
    }
}

/// Integer percentage of a progress value, truncated toward zero.
///
/// `0.734` gives `"73%"` and `0.999` gives `"99%"`. Negative and
/// non-finite progress reads `"0%"`.
pub fn format_percentage(progress: f32) -> String {
    let percent = (sanitize_progress(progress) * 100.0) as i64;
    format!("{percent}%")
}

/// Percentage text centered in the ring.
pub struct PercentageLabel {
    font: Font,
    color: Option<Rgba>,
}

impl PercentageLabel {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            color: None,
        }
    }

    /// Overrides the text color (defaults to the ring color).
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

impl Overlay for PercentageLabel {
    fn draw(&self, canvas: &mut Canvas, frame: &OverlayFrame) {
        let text = format_percentage(frame.progress());
        let px = (frame.inner_radius * 2.0 * LABEL_SIZE_RATIO).max(6.0 * frame.scale);
        let font = self.font.with_size(px);

        let label = font
            .render(&text)
            .with_color(self.color.unwrap_or(frame.color))
            .finish();
        let (cx, cy) = frame.center();
        let x = (cx - label.width() as f32 / 2.0).round() as i32;
        let y = (cy - label.height() as f32 / 2.0).round() as i32;
        canvas.draw_canvas(&label, x, y);
    }
}
