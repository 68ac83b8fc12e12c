//! The activity ring widget and its parts.

pub(crate) mod animation;
pub(crate) mod binding;
pub(crate) mod composer;
pub(crate) mod config;
pub(crate) mod geometry;
pub(crate) mod overlay;
pub(crate) mod tip;

use bitflags::bitflags;

use crate::render::{Rgba, rgb};

/// Default colors for a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Rgba,
    pub track: Rgba,
    pub outline: Rgba,
    pub tip_shadow: Rgba,
    pub label: Rgba,
}

/// Light palette.
pub static PALETTE_LIGHT: Palette = Palette {
    accent: rgb(0, 122, 255),
    track: rgb(229, 229, 234),
    outline: rgb(142, 142, 147),
    tip_shadow: Rgba::new(0, 0, 0, 77),
    label: rgb(30, 30, 30),
};

/// Dark palette.
pub static PALETTE_DARK: Palette = Palette {
    accent: rgb(10, 132, 255),
    track: rgb(58, 58, 60),
    outline: rgb(99, 99, 102),
    tip_shadow: Rgba::new(0, 0, 0, 128),
    label: rgb(230, 230, 230),
};

/// Detect the current system theme.
/// Returns the light palette if detection fails.
pub fn detect_palette() -> &'static Palette {
    if let Ok(theme) = std::env::var("GTK_THEME") {
        if theme.to_lowercase().contains("dark") {
            return &PALETTE_DARK;
        }
        return &PALETTE_LIGHT;
    }

    if let Ok(output) = std::process::Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
    {
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.contains("dark") {
            log::debug!("gsettings reports a dark color scheme");
            return &PALETTE_DARK;
        }
    }

    &PALETTE_LIGHT
}

bitflags! {
    /// Layers drawn for one frame, back to front.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Layers: u8 {
        const TRACK      = 0x01;
        const OUTLINE    = 0x02;
        const ARC        = 0x04;
        const TIP_SHADOW = 0x08;
        const TIP        = 0x10;
        const OVERLAY    = 0x20;
    }
}
