mod gradient;
mod text;

use std::path::Path as FsPath;

pub use gradient::SweepGradient;
pub use text::{Font, TextRenderer};
use tiny_skia::{Color, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, PixmapRef, Stroke, Transform};

use crate::error::Error;

/// Largest canvas side in pixels.
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// A canvas backed by a tiny-skia Pixmap, premultiplied RGBA.
pub struct Canvas {
    pub(crate) pixmap: Pixmap,
}

impl Canvas {
    /// Creates a transparent canvas. Dimensions are clamped to
    /// `1..=MAX_CANVAS_SIDE`.
    pub fn new(width: u32, height: u32) -> Self {
        let clamp = |v: u32, name: &str| {
            if v > MAX_CANVAS_SIDE {
                log::warn!("canvas {name} {v} exceeds {MAX_CANVAS_SIDE}, clamping");
            }
            v.clamp(1, MAX_CANVAS_SIDE)
        };
        let (width, height) = (clamp(width, "width"), clamp(height, "height"));
        Self {
            // Clamped dimensions always fit a pixmap
            pixmap: Pixmap::new(width, height).expect("canvas dimensions are clamped"),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills the entire canvas with a color.
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(color.into());
    }

    /// Fills a circle with a color, optionally clipped by a mask.
    pub fn fill_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
        transform: Transform,
        mask: Option<&Mask>,
    ) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.fill_path(&path, color, transform, mask);
        }
    }

    /// Fills a path with a solid color.
    pub fn fill_path(&mut self, path: &Path, color: Rgba, transform: Transform, mask: Option<&Mask>) {
        if color.a == 0 {
            return;
        }
        let paint = solid_paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, transform, mask);
    }

    /// Strokes a path with a solid color.
    pub fn stroke_path(
        &mut self,
        path: &Path,
        color: Rgba,
        stroke: &Stroke,
        transform: Transform,
        mask: Option<&Mask>,
    ) {
        if color.a == 0 || stroke.width <= 0.0 {
            return;
        }
        let paint = solid_paint(color);
        self.pixmap
            .stroke_path(path, &paint, stroke, transform, mask);
    }

    /// Draws another canvas onto this one at the given position.
    pub fn draw_canvas(&mut self, other: &Canvas, x: i32, y: i32) {
        self.draw_pixmap(other.pixmap.as_ref(), x, y, None);
    }

    /// Draws a pixmap onto this canvas at the given position.
    pub(crate) fn draw_pixmap(&mut self, src: PixmapRef, x: i32, y: i32, mask: Option<&Mask>) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src,
            &tiny_skia::PixmapPaint::default(),
            Transform::identity(),
            mask,
        );
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Returns the (demultiplied) color at a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Encodes the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::Png(e.to_string()))
    }

    /// Writes the canvas to a PNG file.
    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<(), Error> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn solid_paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.into());
    paint.anti_alias = true;
    paint
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: 255,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a,
            ..self
        }
    }

    /// Multiplies the alpha channel by `factor` (clamped to 0..=1).
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 0.0 };
        self.with_alpha((self.a as f32 * factor).round() as u8)
    }

    /// Linear interpolation between two colors, `t` clamped to 0..=1.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Rgba> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
                    Some(v * 17)
                };
                Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Convenience function to create an RGB color.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    Rgba::rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Rgba::parse_hex("#fff"), Some(rgb(255, 255, 255)));
        assert_eq!(Rgba::parse_hex("007aff"), Some(rgb(0, 122, 255)));
        assert_eq!(Rgba::parse_hex("#0000004d"), Some(Rgba::new(0, 0, 0, 77)));
        assert_eq!(Rgba::parse_hex("#12345"), None);
        assert_eq!(Rgba::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = rgb(0, 0, 0);
        let b = rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), rgb(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn scale_alpha_clamps() {
        let c = Rgba::new(10, 20, 30, 200);
        assert_eq!(c.scale_alpha(0.5).a, 100);
        assert_eq!(c.scale_alpha(2.0).a, 200);
        assert_eq!(c.scale_alpha(f32::NAN).a, 0);
    }

    #[test]
    fn zero_sized_canvas_is_bumped() {
        let canvas = Canvas::new(0, 0);
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }

    #[test]
    fn fill_circle_paints_center_only() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(10.0, 10.0, 5.0, rgb(255, 0, 0), Transform::identity(), None);
        assert_eq!(canvas.pixel(10, 10), Some(rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(0, 0).map(|c| c.a), Some(0));
    }

    #[test]
    fn oversized_canvas_is_clamped() {
        let canvas = Canvas::new(u32::MAX, 10);
        assert_eq!((canvas.width(), canvas.height()), (MAX_CANVAS_SIDE, 10));
    }

    #[test]
    fn fill_covers_every_pixel() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill(rgb(1, 2, 3));
        assert!(canvas.data().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
    }
}
