//! Ease-out interpolation of the ring's animatable properties.
//!
//! The host owns the frame loop and calls [`RingAnimator::tick`] once per
//! frame; nothing here keeps time on its own.

use super::{geometry::sanitize_progress, tip::tip_opacity};

/// Distance below which a tween snaps onto its target.
pub const SETTLE_EPSILON: f32 = 1e-4;

/// Fraction of the remaining distance covered per frame by default.
pub const DEFAULT_EASE_FACTOR: f32 = 0.2;

/// Share of the distance left once a duration-based ease has elapsed.
const DURATION_RESIDUAL: f32 = 0.01;

/// Exponential ease-out: each tick covers a fixed share of what remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EaseOut {
    factor: f32,
}

impl EaseOut {
    pub fn new(factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { DEFAULT_EASE_FACTOR };
        Self {
            factor,
        }
    }

    /// Factor for frames of `frame_secs` such that the animation has covered
    /// 99% of the distance after `duration_secs`.
    pub fn for_frame(frame_secs: f32, duration_secs: f32) -> Self {
        if !(frame_secs > 0.0 && duration_secs > 0.0) {
            return Self::new(1.0);
        }
        Self::new(1.0 - DURATION_RESIDUAL.powf(frame_secs / duration_secs))
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }
}

impl Default for EaseOut {
    fn default() -> Self {
        Self::new(DEFAULT_EASE_FACTOR)
    }
}

/// A value moving toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub current: f32,
    pub target: f32,
}

impl Tween {
    pub fn settled(value: f32) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    /// Changes the target; the current value carries on from where it is.
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    pub fn tick(&mut self, ease: EaseOut) {
        self.current += (self.target - self.current) * ease.factor();
        if (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// Animated progress and tip opacity for one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingAnimator {
    progress: Tween,
    tip_opacity: Tween,
    ease: EaseOut,
}

impl RingAnimator {
    pub fn new(progress: f32) -> Self {
        let progress = sanitize_progress(progress);
        Self {
            progress: Tween::settled(progress),
            tip_opacity: Tween::settled(tip_opacity(progress)),
            ease: EaseOut::default(),
        }
    }

    pub fn with_ease(mut self, ease: EaseOut) -> Self {
        self.ease = ease;
        self
    }

    /// Retargets the in-flight animation.
    pub fn set_target(&mut self, progress: f32) {
        self.progress.retarget(sanitize_progress(progress));
    }

    pub fn target(&self) -> f32 {
        self.progress.target
    }

    /// Advances one frame.
    pub fn tick(&mut self) {
        self.progress.tick(self.ease);
        // The cap fades relative to what is on screen, not to the target
        self.tip_opacity.retarget(tip_opacity(self.progress.current));
        self.tip_opacity.tick(self.ease);
        log::trace!(
            "ring frame: progress {:.4} -> {:.4}, tip opacity {:.3}",
            self.progress.current,
            self.progress.target,
            self.tip_opacity.current
        );
    }

    pub fn progress(&self) -> f32 {
        self.progress.current
    }

    pub fn tip_opacity(&self) -> f32 {
        self.tip_opacity.current
    }

    pub fn is_settled(&self) -> bool {
        self.progress.is_settled() && self.tip_opacity.is_settled()
    }
}
