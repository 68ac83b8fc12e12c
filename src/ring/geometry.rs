//! Ring geometry: radii, angles and tip positions derived from a config and a
//! progress value.
//!
//! All coordinates are ring-local: the ring's bounding square starts at the
//! origin, the y axis points down and angles grow clockwise. Zero progress sits
//! at 12 o'clock.

use tiny_skia::{Path, PathBuilder, Point};

use super::config::RingConfig;

/// Largest sweep covered by a single cubic segment.
const MAX_SEGMENT_DEGREES: f32 = 90.0;

/// Replaces non-finite and negative progress with 0.
pub fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_finite() && progress > 0.0 {
        progress
    } else {
        0.0
    }
}

/// Fraction of the circle stroked by the arc, always within `0..=1`.
pub fn trim_fraction(progress: f32) -> f32 {
    sanitize_progress(progress).min(1.0)
}

/// Fractional part of the current lap, in `[0, 1)`.
pub fn wrapped_fraction(progress: f32) -> f32 {
    sanitize_progress(progress).fract()
}

/// Unwrapped progress angle in degrees, with zero progress at 12 o'clock (-90°).
pub fn progress_angle_degrees(progress: f32) -> f32 {
    360.0 * sanitize_progress(progress) - 90.0
}

/// Everything needed to draw one frame of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub radius: f32,
    pub thickness: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub side: f32,
    pub progress: f32,
    pub trim: f32,
    pub wrapped: f32,
    pub angle_degrees: f32,
    pub tip: Point,
}

impl RingGeometry {
    pub fn new(config: &RingConfig, progress: f32) -> Self {
        let radius = config.radius;
        let thickness = config.thickness;
        let half = thickness / 2.0;
        let side = 2.0 * radius + thickness;
        let center = Point::from_xy(side / 2.0, side / 2.0);
        let progress = sanitize_progress(progress);

        let mut geometry = Self {
            center,
            radius,
            thickness,
            outer_radius: radius + half,
            inner_radius: (radius - half).max(0.0),
            side,
            progress,
            trim: trim_fraction(progress),
            wrapped: wrapped_fraction(progress),
            angle_degrees: progress_angle_degrees(progress),
            tip: center,
        };
        geometry.tip = geometry.point_at(progress);
        geometry
    }

    /// Point on the arc centerline for a given (unwrapped) progress.
    pub fn point_at(&self, progress: f32) -> Point {
        let theta = progress_angle_degrees(progress).to_radians();
        Point::from_xy(
            self.center.x + self.radius * theta.cos(),
            self.center.y + self.radius * theta.sin(),
        )
    }

    /// Sweep gradient end as a turn fraction. An exact lap boundary past zero
    /// maps to the full circle instead of collapsing to nothing.
    pub fn gradient_end(&self) -> f32 {
        if self.progress > 0.0 && self.wrapped == 0.0 {
            1.0
        } else {
            self.wrapped
        }
    }

    /// Fillable outline of the visible arc: the stroked band with round caps,
    /// or the whole annulus once the trim reaches a full circle. `None` when
    /// nothing should be drawn.
    pub fn arc_shape(&self) -> Option<Path> {
        if self.trim <= 0.0 || self.thickness <= 0.0 {
            return None;
        }
        if self.trim >= 1.0 {
            return self.donut_path();
        }

        let sweep = 360.0 * self.trim;
        let cap = self.thickness / 2.0;
        let mut pb = PathBuilder::new();

        // Band between the two radii, clockwise
        append_arc(&mut pb, self.center, self.outer_radius, -90.0, sweep, false);
        if self.inner_radius > 0.0 {
            append_arc(&mut pb, self.center, self.inner_radius, sweep - 90.0, -sweep, true);
        } else {
            pb.line_to(self.center.x, self.center.y);
        }
        pb.close();

        // Round caps at both ends of the centerline
        for end in [self.point_at(0.0), self.tip] {
            append_arc(&mut pb, end, cap, -90.0, 360.0, false);
            pb.close();
        }
        pb.finish()
    }

    /// Annulus between the outer and inner radius, as a fillable path.
    pub fn donut_path(&self) -> Option<Path> {
        donut_path(self.center, self.outer_radius, self.inner_radius)
    }
}

/// Closed clockwise circle starting at 12 o'clock.
pub fn circle_path(center: Point, radius: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    append_arc(&mut pb, center, radius, -90.0, 360.0, false);
    pb.close();
    pb.finish()
}

/// Outer circle clockwise, inner circle counter-clockwise, so a winding fill
/// leaves the hole empty. A zero inner radius degrades to a plain disc.
pub fn donut_path(center: Point, outer: f32, inner: f32) -> Option<Path> {
    if outer <= 0.0 {
        return None;
    }
    let mut pb = PathBuilder::new();
    append_arc(&mut pb, center, outer, -90.0, 360.0, false);
    pb.close();
    if inner > 0.0 {
        append_arc(&mut pb, center, inner, -90.0, -360.0, false);
        pb.close();
    }
    pb.finish()
}

/// Appends a circular arc as cubic segments. Negative sweeps wind
/// counter-clockwise. With `connect` the arc joins the current contour with a
/// line instead of starting a new one.
fn append_arc(
    pb: &mut PathBuilder,
    center: Point,
    radius: f32,
    start_degrees: f32,
    sweep_degrees: f32,
    connect: bool,
) {
    if radius.is_nan() || radius <= 0.0 || !sweep_degrees.is_finite() || sweep_degrees == 0.0 {
        return;
    }
    let segments = (sweep_degrees.abs() / MAX_SEGMENT_DEGREES).ceil().max(1.0) as usize;
    let step = (sweep_degrees / segments as f32).to_radians();
    // Cubic handle length for a circular segment of `step` radians
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let at = |theta: f32| (center.x + radius * theta.cos(), center.y + radius * theta.sin());

    let mut theta = start_degrees.to_radians();
    let (x0, y0) = at(theta);
    if connect {
        pb.line_to(x0, y0);
    } else {
        pb.move_to(x0, y0);
    }

    for _ in 0..segments {
        let next = theta + step;
        let (sx, sy) = at(theta);
        let (ex, ey) = at(next);
        // Control points sit along the tangents at both ends
        let (c1x, c1y) = (sx - k * radius * theta.sin(), sy + k * radius * theta.cos());
        let (c2x, c2y) = (ex + k * radius * next.sin(), ey - k * radius * next.cos());
        pb.cubic_to(c1x, c1y, c2x, c2y, ex, ey);
        theta = next;
    }
}
