//! activity-ring - Render animated activity ring progress indicators.
//!
//! A ring is a thick circular arc that sweeps with a progress value, where
//! `1.0` is one full lap. Values past `1.0` keep the stroke full and move the
//! rounded tip cap around a further lap. Frames render into a software canvas
//! that can be written out as PNG or handed to any display surface.

pub mod error;
pub mod render;
pub mod ring;

pub use error::{Error, FontError};
pub use render::{Canvas, Font, MAX_CANVAS_SIDE, Rgba, SweepGradient};
pub use ring::animation::{EaseOut, RingAnimator, Tween};
pub use ring::binding::ProgressBinding;
pub use ring::composer::ActivityRing;
pub use ring::config::{RingBuilder, RingConfig};
pub use ring::geometry::{RingGeometry, progress_angle_degrees, sanitize_progress, trim_fraction, wrapped_fraction};
pub use ring::overlay::{Overlay, OverlayFrame, PercentageLabel, format_percentage};
pub use ring::tip::{SHADOW_SAMPLE_DELTA, TIP_VISIBILITY_THRESHOLD, shadow_offset, tip_opacity};
pub use ring::{Layers, PALETTE_DARK, PALETTE_LIGHT, Palette, detect_palette};

/// Creates a new ring configuration builder with the default light colors.
///
/// # Example
///
/// ```
/// use activity_ring::{ring, ActivityRing, Rgba};
///
/// let config = ring()
///     .radius(40.0)
///     .thickness(12.0)
///     .tip_color(Some(Rgba::rgb(255, 45, 85)))
///     .build();
/// let canvas = ActivityRing::new(config).render(0.73);
/// assert_eq!(canvas.width(), 92);
/// ```
pub fn ring() -> RingBuilder {
    RingBuilder::new()
}

/// Creates a ring with a centered percentage label.
pub fn percentage_ring(config: RingConfig, font: Font) -> ActivityRing<PercentageLabel> {
    ActivityRing::new(config).overlay(PercentageLabel::new(font))
}
