//! Ring configuration and its builder.

use super::{Palette, PALETTE_LIGHT};
use crate::render::Rgba;

pub const DEFAULT_RADIUS: f32 = 30.0;
pub const DEFAULT_THICKNESS: f32 = 10.0;
pub const DEFAULT_OUTLINE_THICKNESS: f32 = 1.0;

/// Upper bound for radius and thickness, keeps the canvas allocatable.
pub const MAX_EXTENT: f32 = 4096.0;

/// Static appearance of a ring. Progress is supplied separately on each render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub radius: f32,
    pub thickness: f32,
    pub color: Rgba,
    pub tip_color: Option<Rgba>,
    pub background_color: Option<Rgba>,
    pub outline_color: Option<Rgba>,
    pub outline_thickness: f32,
    pub tip_shadow_color: Option<Rgba>,
}

impl RingConfig {
    pub fn builder() -> RingBuilder {
        RingBuilder::new()
    }

    /// Tip color, falling back to the arc color.
    pub fn effective_tip_color(&self) -> Rgba {
        self.tip_color.unwrap_or(self.color)
    }

    /// Side length of the square the ring occupies at scale 1.
    pub fn side(&self) -> f32 {
        2.0 * self.radius + self.thickness
    }

    /// Returns a copy with every numeric field brought into range.
    pub fn sanitized(mut self) -> Self {
        self.radius = sanitize_extent(self.radius, DEFAULT_RADIUS, "radius");
        self.thickness = sanitize_extent(self.thickness, DEFAULT_THICKNESS, "thickness");
        if !self.outline_thickness.is_finite() || self.outline_thickness < 0.0 {
            log::warn!(
                "outline thickness {} out of range, using {DEFAULT_OUTLINE_THICKNESS}",
                self.outline_thickness
            );
            self.outline_thickness = DEFAULT_OUTLINE_THICKNESS;
        }
        self.outline_thickness = self.outline_thickness.min(self.thickness);
        self
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        RingBuilder::new().build()
    }
}

fn sanitize_extent(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_EXTENT)
    } else {
        log::warn!("{name} {value} is not a positive number, using {fallback}");
        fallback
    }
}

/// Ring configuration builder.
pub struct RingBuilder {
    config: RingConfig,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::with_palette(&PALETTE_LIGHT)
    }

    /// Starts from the default colors of a palette.
    pub fn with_palette(palette: &Palette) -> Self {
        Self {
            config: RingConfig {
                radius: DEFAULT_RADIUS,
                thickness: DEFAULT_THICKNESS,
                color: palette.accent,
                tip_color: None,
                background_color: Some(palette.track),
                outline_color: Some(palette.outline),
                outline_thickness: DEFAULT_OUTLINE_THICKNESS,
                tip_shadow_color: Some(palette.tip_shadow),
            },
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.config.radius = radius;
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.config.thickness = thickness;
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.config.color = color;
        self
    }

    pub fn tip_color(mut self, color: Option<Rgba>) -> Self {
        self.config.tip_color = color;
        self
    }

    pub fn background_color(mut self, color: Option<Rgba>) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn outline_color(mut self, color: Option<Rgba>) -> Self {
        self.config.outline_color = color;
        self
    }

    pub fn outline_thickness(mut self, thickness: f32) -> Self {
        self.config.outline_thickness = thickness;
        self
    }

    pub fn tip_shadow_color(mut self, color: Option<Rgba>) -> Self {
        self.config.tip_shadow_color = color;
        self
    }

    pub fn build(self) -> RingConfig {
        self.config.sanitized()
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::rgb;

    #[test]
    fn defaults() {
        let c = RingConfig::default();
        assert_eq!(c.radius, 30.0);
        assert_eq!(c.thickness, 10.0);
        assert_eq!(c.outline_thickness, 1.0);
        assert_eq!(c.tip_color, None);
        assert_eq!(c.color, PALETTE_LIGHT.accent);
        assert_eq!(c.background_color, Some(PALETTE_LIGHT.track));
        assert_eq!(c.outline_color, Some(PALETTE_LIGHT.outline));
        assert_eq!(c.tip_shadow_color, Some(Rgba::new(0, 0, 0, 77)));
    }

    #[test]
    fn tip_color_falls_back_to_color() {
        let c = RingConfig::builder().color(rgb(255, 0, 0)).build();
        assert_eq!(c.effective_tip_color(), rgb(255, 0, 0));

        let c = RingConfig::builder()
            .color(rgb(255, 0, 0))
            .tip_color(Some(rgb(0, 255, 0)))
            .build();
        assert_eq!(c.effective_tip_color(), rgb(0, 255, 0));
    }

    #[test]
    fn invalid_extents_fall_back() {
        let c = RingConfig::builder()
            .radius(f32::NAN)
            .thickness(-4.0)
            .outline_thickness(f32::INFINITY)
            .build();
        assert_eq!(c.radius, DEFAULT_RADIUS);
        assert_eq!(c.thickness, DEFAULT_THICKNESS);
        assert_eq!(c.outline_thickness, DEFAULT_OUTLINE_THICKNESS);
    }

    #[test]
    fn extents_are_capped() {
        let c = RingConfig::builder()
            .radius(1e9)
            .thickness(4.0)
            .outline_thickness(9.0)
            .build();
        assert_eq!(c.radius, MAX_EXTENT);
        assert_eq!(c.outline_thickness, 4.0);
    }

    #[test]
    fn side_is_diameter_plus_thickness() {
        let c = RingConfig::builder().radius(12.5).thickness(5.0).build();
        assert_eq!(c.side(), 30.0);
    }
}
