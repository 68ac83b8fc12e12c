//! Angular (sweep) gradient fill.
//!
//! tiny-skia only ships linear and radial shaders, so the sweep is evaluated
//! per pixel into a scratch pixmap and composited through a coverage mask.

use std::f32::consts::TAU;

use tiny_skia::{ColorU8, Mask, Pixmap};

use super::{Canvas, Rgba};

/// A gradient interpolated around a center point.
///
/// Angles are measured clockwise from 12 o'clock as a fraction of a turn.
/// `from` is used at fraction 0 and `to` at `end`. Past `end` the color
/// snaps to whichever endpoint is angularly closer, so a round cap just
/// before 12 o'clock keeps the start color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGradient {
    pub cx: f32,
    pub cy: f32,
    pub from: Rgba,
    pub to: Rgba,
    pub end: f32,
}

impl SweepGradient {
    /// Color at a turn fraction in `[0, 1)`.
    pub fn color_at(&self, fraction: f32) -> Rgba {
        if self.from == self.to || self.end <= 0.0 {
            return self.from;
        }
        if fraction > self.end {
            return if fraction > (self.end + 1.0) / 2.0 { self.from } else { self.to };
        }
        self.from.lerp(self.to, fraction / self.end)
    }

    /// Color for a device-space point.
    pub fn color_at_point(&self, x: f32, y: f32) -> Rgba {
        self.color_at(turn_fraction(x - self.cx, y - self.cy))
    }

    /// Paints the gradient onto `canvas` wherever `mask` has coverage.
    pub fn fill_masked(&self, canvas: &mut Canvas, mask: &Mask) {
        let (width, height) = (canvas.width(), canvas.height());
        let Some(mut layer) = Pixmap::new(width, height) else {
            return;
        };
        let coverage = mask.data();
        let pixels = layer.pixels_mut();

        for y in 0..height {
            for x in 0..width {
                let idx = (y * width + x) as usize;
                if coverage.get(idx).copied().unwrap_or(0) == 0 {
                    continue;
                }
                let c = self.color_at_point(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(pix) = pixels.get_mut(idx) {
                    *pix = ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply();
                }
            }
        }

        canvas.draw_pixmap(layer.as_ref(), 0, 0, Some(mask));
    }
}

/// Clockwise turn fraction of a vector measured from straight up (screen space, y down).
pub(crate) fn turn_fraction(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let angle = dx.atan2(-dy);
    let fraction = angle.rem_euclid(TAU) / TAU;
    // rem_euclid can round up to exactly TAU
    if fraction >= 1.0 { 0.0 } else { fraction }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rgb;

    #[test]
    fn turn_fraction_quadrants() {
        assert!((turn_fraction(0.0, -1.0) - 0.0).abs() < 1e-6);
        assert!((turn_fraction(1.0, 0.0) - 0.25).abs() < 1e-6);
        assert!((turn_fraction(0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((turn_fraction(-1.0, 0.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn color_past_end_snaps_to_nearest_endpoint() {
        let g = SweepGradient {
            cx: 0.0,
            cy: 0.0,
            from: rgb(0, 0, 0),
            to: rgb(100, 100, 100),
            end: 0.5,
        };
        assert_eq!(g.color_at(0.0), rgb(0, 0, 0));
        assert_eq!(g.color_at(0.25), rgb(50, 50, 50));
        assert_eq!(g.color_at(0.6), rgb(100, 100, 100));
        assert_eq!(g.color_at(0.9), rgb(0, 0, 0));
    }

    #[test]
    fn equal_endpoints_are_solid() {
        let c = rgb(0, 122, 255);
        let g = SweepGradient {
            cx: 0.0,
            cy: 0.0,
            from: c,
            to: c,
            end: 0.3,
        };
        for i in 0..10 {
            assert_eq!(g.color_at(i as f32 / 10.0), c);
        }
    }
}
