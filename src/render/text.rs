use std::path::{Path, PathBuf};

use ab_glyph::{point, Font as _, FontArc, Glyph, OutlinedGlyph, PxScaleFont, ScaleFont};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use super::{rgb, Canvas, Rgba};
use crate::error::{Error, FontError};

const BASE_FONT_SIZE: f32 = 18.0;

/// File names tried, in order, when looking for a system font.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "Cantarell-Regular.otf",
    "Cantarell-Regular.ttf",
    "DejaVuSans.ttf",
    "NotoSans-Regular.ttf",
    "LiberationSans-Regular.ttf",
    "Roboto-Regular.ttf",
    "FreeSans.ttf",
];

const MAX_SEARCH_DEPTH: usize = 4;

#[derive(Clone)]
pub struct Font {
    font: PxScaleFont<FontArc>,
}

impl Font {
    /// Loads a font from raw TTF/OTF bytes at the default size.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let inner = FontArc::try_from_vec(data)?;
        Ok(Self {
            font: inner.into_scaled(BASE_FONT_SIZE),
        })
    }

    /// Loads a font file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Searches the usual font directories for a known sans-serif face.
    pub fn system() -> Result<Self, Error> {
        for dir in font_dirs() {
            for name in SYSTEM_FONT_CANDIDATES {
                if let Some(path) = find_file(&dir, name, MAX_SEARCH_DEPTH) {
                    match Self::from_file(&path) {
                        Ok(font) => {
                            log::debug!("using system font {}", path.display());
                            return Ok(font);
                        }
                        Err(e) => log::warn!("skipping font {}: {e}", path.display()),
                    }
                }
            }
        }
        log::warn!("no system font found in any font directory");
        Err(FontError::NotFound.into())
    }

    /// Returns a copy of this font rendering at `px` pixels.
    pub fn with_size(&self, px: f32) -> Self {
        let px = if px.is_finite() && px > 0.0 { px } else { BASE_FONT_SIZE };
        Self {
            font: self.font.font.clone().into_scaled(px),
        }
    }

    /// Returns a renderer for the given text.
    pub fn render<'a>(&'a self, text: &'a str) -> TextRenderer<'a> {
        TextRenderer {
            font: self,
            text,
            color: rgb(255, 255, 255),
        }
    }
}

fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        dirs.push(dir);
    }
    if let Some(dir) = dirs::data_dir() {
        dirs.push(dir.join("fonts"));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join(".fonts"));
    }
    dirs.push(PathBuf::from("/usr/share/fonts"));
    dirs.push(PathBuf::from("/usr/local/share/fonts"));
    dirs
}

fn find_file(dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }
    if depth == 0 {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .find_map(|p| find_file(&p, name, depth - 1))
}

pub struct TextRenderer<'a> {
    font: &'a Font,
    text: &'a str,
    color: Rgba,
}

impl<'a> TextRenderer<'a> {
    pub fn with_color(self, color: Rgba) -> Self {
        Self {
            color,
            ..self
        }
    }

    /// Renders the text and returns a Canvas tightly containing it.
    pub fn finish(self) -> Canvas {
        let glyphs = self.layout();

        let Some(bounds) = glyph_bounds(&glyphs) else {
            return Canvas::new(1, 1);
        };

        // One pixel of padding on every side so anti-aliased edges survive
        let width = (bounds.width().ceil() as u32 + 2).max(1);
        let height = (bounds.height().ceil() as u32 + 2).max(1);

        let Some(mut pixmap) = Pixmap::new(width, height) else {
            return Canvas::new(1, 1);
        };
        let pixels = pixmap.pixels_mut();

        let base_x = -bounds.min.x.floor() as i32 + 1;
        let base_y = -bounds.min.y.floor() as i32 + 1;

        for g in glyphs {
            let gb = g.px_bounds();
            let gx = gb.min.x.floor() as i32 + base_x;
            let gy = gb.min.y.floor() as i32 + base_y;

            g.draw(|x, y, coverage| {
                let px = gx + x as i32;
                let py = gy + y as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let idx = (py as u32 * width + px as u32) as usize;
                if let Some(pix) = pixels.get_mut(idx) {
                    *pix = blend_over(*pix, self.color, coverage);
                }
            });
        }

        Canvas {
            pixmap,
        }
    }

    /// Lays out glyphs line by line with kerning.
    fn layout(&self) -> Vec<OutlinedGlyph> {
        let font = &self.font.font;
        let mut glyphs: Vec<Glyph> = Vec::new();

        let mut y: f32 = 0.0;
        for line in self.text.lines() {
            let mut x: f32 = 0.0;
            let mut last = None;

            for c in line.chars() {
                let mut glyph = font.scaled_glyph(c);
                if let Some(last) = last {
                    x += font.kern(last, glyph.id);
                }
                // Round positions to pixel boundaries for crisp text
                glyph.position = point(x.round(), y.round());
                last = Some(glyph.id);
                x += font.h_advance(glyph.id);
                glyphs.push(glyph);
            }
            y += font.height() + font.line_gap();
        }

        glyphs
            .into_iter()
            .filter_map(|g| font.outline_glyph(g))
            .collect()
    }
}

fn glyph_bounds(glyphs: &[OutlinedGlyph]) -> Option<ab_glyph::Rect> {
    glyphs.iter().map(|g| g.px_bounds()).reduce(|mut sum, next| {
        sum.min.x = sum.min.x.min(next.min.x);
        sum.min.y = sum.min.y.min(next.min.y);
        sum.max.x = sum.max.x.max(next.max.x);
        sum.max.y = sum.max.y.max(next.max.y);
        sum
    })
}

/// SrcOver of a solid color at `coverage` onto a premultiplied pixel.
fn blend_over(dst: PremultipliedColorU8, color: Rgba, coverage: f32) -> PremultipliedColorU8 {
    let a = (coverage.clamp(0.0, 1.0) * color.a as f32).round() as u32;
    if a == 0 {
        return dst;
    }
    let premul = |c: u8| c as u32 * a / 255;
    let inv_a = 255 - a;
    let over = |src: u32, d: u8| (src + d as u32 * inv_a / 255).min(255) as u8;

    let out_a = over(a, dst.alpha());
    // Premultiplied channels never exceed alpha
    let out_r = over(premul(color.r), dst.red()).min(out_a);
    let out_g = over(premul(color.g), dst.green()).min(out_a);
    let out_b = over(premul(color.b), dst.blue()).min(out_a);

    PremultipliedColorU8::from_rgba(out_r, out_g, out_b, out_a).unwrap_or(dst)
}
