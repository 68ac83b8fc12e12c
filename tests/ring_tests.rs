//! Integration tests rendering rings through the public API.

use activity_ring::{
    ActivityRing, Canvas, Layers, MAX_CANVAS_SIDE, OverlayFrame, ProgressBinding, RingAnimator, RingConfig,
    RingGeometry, Rgba, format_percentage, ring, tip_opacity, trim_fraction,
};

const RED: Rgba = Rgba::rgb(255, 0, 0);
const GREEN: Rgba = Rgba::rgb(0, 255, 0);

/// Radius 30, thickness 10: a 70px square centered on (35, 35).
fn bare() -> activity_ring::RingBuilder {
    ring()
        .color(RED)
        .background_color(None)
        .outline_color(None)
        .tip_shadow_color(None)
}

fn alpha(canvas: &Canvas, x: u32, y: u32) -> u8 {
    canvas.pixel(x, y).map(|c| c.a).unwrap_or(0)
}

// ==================== Derived values ====================

#[test]
fn test_trim_clamp() {
    for p in [-10.0, -1.0, -0.001, f32::NAN, f32::NEG_INFINITY] {
        assert_eq!(trim_fraction(p), 0.0, "progress {p}");
    }
    for p in [1.0, 1.001, 1.5, 42.0] {
        assert_eq!(trim_fraction(p), 1.0, "progress {p}");
    }
}

#[test]
fn test_tip_suppression() {
    assert_eq!(tip_opacity(0.0), 0.0);
    for p in [0.1, 0.5, 0.94] {
        assert_eq!(tip_opacity(p), 0.0, "progress {p}");
    }
    for p in [0.95, 0.99, 1.0, 1.2] {
        assert_eq!(tip_opacity(p), 1.0, "progress {p}");
    }
}

#[test]
fn test_percentage_text() {
    assert_eq!(format_percentage(0.734), "73%");
    assert_eq!(format_percentage(1.0), "100%");
    assert_eq!(format_percentage(0.999), "99%");
    assert_eq!(format_percentage(-0.5), "0%");
}

#[test]
fn test_size_invariant() {
    for (radius, thickness) in [(30.0, 10.0), (12.0, 3.0), (50.0, 100.0), (7.5, 1.0)] {
        let ring = ActivityRing::new(ring().radius(radius).thickness(thickness).build());
        let (w, h) = ring.size();
        assert_eq!(w, 2.0 * radius + thickness);
        assert_eq!(w, h);

        let canvas = ring.render(0.4);
        assert_eq!(canvas.width(), canvas.height());
        assert_eq!(canvas.width(), (2.0 * radius + thickness).ceil() as u32);
    }
}

#[test]
fn test_degenerate_thickness() {
    let config = ring().radius(20.0).thickness(40.0).build();
    let g = RingGeometry::new(&config, 0.3);
    assert_eq!(g.inner_radius, 0.0);
    assert_eq!(g.outer_radius, 40.0);

    // Renders a filled disc interior instead of failing
    let canvas = ActivityRing::new(config).render(1.0);
    assert_eq!(canvas.width(), 80);
    assert_eq!(alpha(&canvas, 40, 40), 255);
}

// ==================== Rendered frames ====================

#[test]
fn test_unwrapped_tip_renders_same_position() {
    let config = bare().tip_color(Some(GREEN)).build();
    let first = RingGeometry::new(&config, 0.25);
    let second = RingGeometry::new(&config, 1.25);
    assert!((first.tip.x - second.tip.x).abs() < 1e-3);
    assert!((first.tip.y - second.tip.y).abs() < 1e-3);

    let ring = ActivityRing::new(config);
    let quarter = ring.render(0.25);
    let lap_and_quarter = ring.render(1.25);

    // 6 o'clock: empty for a quarter arc, covered once the stroke is full
    assert_eq!(alpha(&quarter, 35, 65), 0);
    assert_eq!(alpha(&lap_and_quarter, 35, 65), 255);

    // The second lap shows the cap at 3 o'clock in the tip color
    assert_eq!(lap_and_quarter.pixel(65, 35), Some(GREEN));
}

#[test]
fn test_color_fallback_is_solid() {
    let canvas = ActivityRing::new(bare().build()).render(0.9);
    // Near the start and near the end of the arc
    assert_eq!(canvas.pixel(50, 9), Some(RED));
    assert_eq!(canvas.pixel(9, 20), Some(RED));
}

#[test]
fn test_gradient_tracks_tip_color() {
    let canvas = ActivityRing::new(bare().tip_color(Some(GREEN)).build()).render(0.9);
    let start = canvas.pixel(50, 9).unwrap();
    let end = canvas.pixel(9, 20).unwrap();
    assert!(start.r > start.g, "start {start:?}");
    assert!(end.g > end.r, "end {end:?}");
}

#[test]
fn test_tip_cap_hidden_early_and_shown_late() {
    let config = bare().tip_color(Some(GREEN)).build();
    let ring = ActivityRing::new(config);

    assert!(!ring.layers(0.5, tip_opacity(0.5)).contains(Layers::TIP));
    assert!(ring.layers(0.97, tip_opacity(0.97)).contains(Layers::TIP));

    let g = RingGeometry::new(&config, 0.97);
    let canvas = ring.render(0.97);
    assert_eq!(canvas.pixel(g.tip.x as u32, g.tip.y as u32), Some(GREEN));
}

#[test]
fn test_optional_layers_are_omitted() {
    let canvas = ActivityRing::new(bare().build()).render(0.25);
    // Only the arc: the bottom of the ring and the center are transparent
    assert_eq!(alpha(&canvas, 35, 65), 0);
    assert_eq!(alpha(&canvas, 35, 35), 0);
    assert_eq!(alpha(&canvas, 5, 35), 0);
}

#[test]
fn test_track_and_outline_are_drawn() {
    let config = ring()
        .color(RED)
        .background_color(Some(Rgba::rgb(0, 0, 255)))
        .outline_color(Some(Rgba::rgb(255, 255, 255)))
        .outline_thickness(1.0)
        .build();
    let canvas = ActivityRing::new(config).render(0.0);
    // Track mid band at 6 o'clock
    assert_eq!(canvas.pixel(35, 65), Some(Rgba::rgb(0, 0, 255)));
    // Outer guide circle at radius 34.5 crosses the pixel row 69
    let outline = canvas.pixel(35, 69).unwrap();
    assert!(outline.r > 128 && outline.g > 128, "outline {outline:?}");
}

#[test]
fn test_tip_shadow_is_clipped_to_annulus() {
    let config = ring()
        .color(RED)
        .background_color(None)
        .outline_color(None)
        .tip_shadow_color(Some(Rgba::new(0, 0, 0, 255)))
        .build();
    let canvas = ActivityRing::new(config).render(0.97);
    // Nothing outside the outer radius or inside the inner radius
    assert_eq!(alpha(&canvas, 35, 35), 0);
    assert_eq!(alpha(&canvas, 0, 0), 0);
    assert_eq!(alpha(&canvas, 69, 0), 0);
}

#[test]
fn test_hidpi_scale_doubles_pixels() {
    let ring = ActivityRing::new(bare().build());
    let canvas = ring.render_scaled(0.25, 2.0);
    assert_eq!(canvas.width(), 140);
    assert_eq!(canvas.pixel(112, 28), Some(RED));
    assert_eq!(alpha(&canvas, 70, 130), 0);
}

#[test]
fn test_extreme_scale_is_capped() {
    let ring = ActivityRing::default();
    let canvas = ring.render_scaled(0.5, 1e9);
    assert_eq!(canvas.width(), MAX_CANVAS_SIDE);
    assert_eq!(canvas.width(), canvas.height());
}

// ==================== Overlay, binding and animation ====================

#[test]
fn test_overlay_draws_last() {
    let ring = ActivityRing::new(bare().build()).overlay(|canvas: &mut Canvas, frame: &OverlayFrame| {
        let (cx, cy) = frame.center();
        canvas.fill_circle(cx, cy, 3.0, GREEN, Default::default(), None);
    });
    let canvas = ring.render(0.5);
    assert_eq!(canvas.pixel(35, 35), Some(GREEN));
}

#[test]
fn test_binding_reads_latest_value() {
    let binding = ProgressBinding::new(0.0);
    let ring = ActivityRing::new(bare().build());

    let empty = ring.render_bound(&binding, 1.0);
    assert_eq!(alpha(&empty, 56, 14), 0);

    binding.clone().set(0.25);
    let quarter = ring.render_bound(&binding, 1.0);
    assert_eq!(quarter.pixel(56, 14), Some(RED));
}

#[test]
fn test_animated_frames_approach_target() {
    let ring = ActivityRing::new(bare().build());
    let mut animator = RingAnimator::new(0.0);
    animator.set_target(0.5);

    animator.tick();
    let early = ring.render_frame(&animator, 1.0);
    while !animator.is_settled() {
        animator.tick();
    }
    let settled = ring.render_frame(&animator, 1.0);

    // 5 o'clock is covered only once the arc has grown
    assert_eq!(alpha(&early, 53, 53), 0);
    assert_eq!(settled.pixel(53, 53), Some(RED));
    assert_eq!(settled.data(), ring.render(0.5).data());
}

#[test]
fn test_default_config_values() {
    let config = RingConfig::default();
    assert_eq!(config.radius, 30.0);
    assert_eq!(config.thickness, 10.0);
    assert_eq!(config.outline_thickness, 1.0);
    assert_eq!(config.tip_shadow_color, Some(Rgba::new(0, 0, 0, 77)));
}

#[test]
fn test_png_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ring.png");
    ActivityRing::default().render(0.6).save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
