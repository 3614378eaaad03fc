//! Scroll-driven margin controller.
//!
//! The controller keeps a top margin that shrinks by one step whenever the
//! page scrolls down and grows by one step whenever it scrolls up, never
//! leaving `[min_margin_top, max_margin_top]`.  A step that would cross a
//! bound is rejected outright, so the margin only lands on a bound when a
//! step hits it exactly.

use thiserror::Error;

use super::target::StyleTarget;

/// Viewports narrower than this (in logical pixels) never activate a
/// controller.
pub const MIN_VIEWPORT_WIDTH: u32 = 1008;

// ───────────────────────────────────────── config ────────────

/// Rejected margin configurations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_margin_top ({min}) is greater than max_margin_top ({max})")]
    InvertedBounds { min: i32, max: i32 },
    #[error("init_margin_top ({init}) lies outside [{min}, {max}]")]
    InitOutOfBounds { init: i32, min: i32, max: i32 },
    #[error("update_steps_in_px must be positive, got {0}")]
    NonPositiveStep(i32),
}

/// Validated, immutable controller configuration (all values in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginConfig {
    min_margin_top: i32,
    max_margin_top: i32,
    init_margin_top: i32,
    update_steps_in_px: i32,
}

impl MarginConfig {
    /// Build a config, enforcing `min <= init <= max` and `step > 0`.
    pub fn new(min: i32, max: i32, init: i32, step: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        if init < min || init > max {
            return Err(ConfigError::InitOutOfBounds { init, min, max });
        }
        if step <= 0 {
            return Err(ConfigError::NonPositiveStep(step));
        }
        Ok(Self {
            min_margin_top: min,
            max_margin_top: max,
            init_margin_top: init,
            update_steps_in_px: step,
        })
    }

    pub fn min_margin_top(&self) -> i32 {
        self.min_margin_top
    }

    pub fn max_margin_top(&self) -> i32 {
        self.max_margin_top
    }

    pub fn init_margin_top(&self) -> i32 {
        self.init_margin_top
    }

    pub fn update_steps_in_px(&self) -> i32 {
        self.update_steps_in_px
    }
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            min_margin_top: 0,
            max_margin_top: 200,
            init_margin_top: 100,
            update_steps_in_px: 20,
        }
    }
}

// ───────────────────────────────────────── controller ────────

/// Direction of the last observed scroll movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

/// Owns the current margin and last-seen scroll offset, and writes the
/// margin to its target after every scroll sample.
#[derive(Debug)]
pub struct ScrollMarginController<T> {
    config: MarginConfig,
    target: T,
    current_margin: i32,
    /// `None` until the first sample arrives.
    current_scroll: Option<u32>,
}

impl<T: StyleTarget> ScrollMarginController<T> {
    /// Activate a controller for `target`.
    ///
    /// Returns `None` (and leaves the target untouched) when the viewport is
    /// narrower than `min_viewport_width`.  Otherwise the initial margin is
    /// applied immediately.
    pub fn activate(
        config: MarginConfig,
        target: T,
        viewport_width: u32,
        min_viewport_width: u32,
    ) -> Option<Self> {
        if viewport_width < min_viewport_width {
            tracing::debug!(
                viewport_width,
                min_viewport_width,
                "viewport too narrow; margin controller stays inert"
            );
            return None;
        }

        let mut controller = Self {
            config,
            target,
            current_margin: config.init_margin_top,
            current_scroll: None,
        };
        controller.apply();
        Some(controller)
    }

    /// Feed the latest absolute vertical scroll offset.
    pub fn on_scroll(&mut self, latest_scroll_y: u32) {
        let direction = match self.current_scroll {
            None => {
                // First sample only seeds the position.
                self.current_scroll = Some(latest_scroll_y);
                None
            }
            Some(prev) if latest_scroll_y > prev => Some(Direction::Down),
            Some(prev) if latest_scroll_y < prev => Some(Direction::Up),
            Some(_) => None,
        };

        if let Some(direction) = direction {
            self.current_scroll = Some(latest_scroll_y);
            self.step(direction);
        }

        self.apply();
    }

    pub fn margin(&self) -> i32 {
        self.current_margin
    }

    pub fn last_scroll(&self) -> Option<u32> {
        self.current_scroll
    }

    pub fn config(&self) -> &MarginConfig {
        &self.config
    }

    fn step(&mut self, direction: Direction) {
        let step = self.config.update_steps_in_px;
        let candidate = match direction {
            Direction::Down => self
                .current_margin
                .checked_sub(step)
                .filter(|&m| m >= self.config.min_margin_top),
            Direction::Up => self
                .current_margin
                .checked_add(step)
                .filter(|&m| m <= self.config.max_margin_top),
        };
        if let Some(margin) = candidate {
            self.current_margin = margin;
        }
    }

    fn apply(&mut self) {
        self.target.set_margin_top(self.current_margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::testing::RecordingTarget;

    fn example_config() -> MarginConfig {
        MarginConfig::new(0, 200, 100, 20).unwrap()
    }

    fn active(target: &RecordingTarget) -> ScrollMarginController<RecordingTarget> {
        ScrollMarginController::activate(example_config(), target.clone(), 1200, MIN_VIEWPORT_WIDTH)
            .expect("wide viewport activates")
    }

    #[test]
    fn config_rejects_inverted_bounds() {
        assert_eq!(
            MarginConfig::new(10, 5, 7, 1),
            Err(ConfigError::InvertedBounds { min: 10, max: 5 })
        );
    }

    #[test]
    fn config_rejects_init_outside_bounds() {
        assert_eq!(
            MarginConfig::new(0, 100, 150, 10),
            Err(ConfigError::InitOutOfBounds { init: 150, min: 0, max: 100 })
        );
        assert!(MarginConfig::new(0, 100, -1, 10).is_err());
    }

    #[test]
    fn config_rejects_non_positive_step() {
        assert_eq!(MarginConfig::new(0, 100, 50, 0), Err(ConfigError::NonPositiveStep(0)));
        assert_eq!(MarginConfig::new(0, 100, 50, -5), Err(ConfigError::NonPositiveStep(-5)));
    }

    #[test]
    fn config_accepts_degenerate_range() {
        let cfg = MarginConfig::new(30, 30, 30, 5).unwrap();
        assert_eq!(cfg.min_margin_top(), cfg.max_margin_top());
    }

    #[test]
    fn activation_applies_initial_margin() {
        let target = RecordingTarget::default();
        let c = active(&target);
        assert_eq!(c.margin(), 100);
        assert_eq!(target.writes(), vec![100]);
    }

    #[test]
    fn narrow_viewport_is_inert() {
        let target = RecordingTarget::default();
        let c = ScrollMarginController::activate(example_config(), target.clone(), 1007, MIN_VIEWPORT_WIDTH);
        assert!(c.is_none());
        assert!(target.writes().is_empty());
    }

    #[test]
    fn exact_threshold_activates() {
        let target = RecordingTarget::default();
        let c = ScrollMarginController::activate(example_config(), target.clone(), 1008, MIN_VIEWPORT_WIDTH);
        assert!(c.is_some());
    }

    #[test]
    fn first_sample_only_seeds() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(50);
        assert_eq!(c.margin(), 100);
        assert_eq!(c.last_scroll(), Some(50));
        assert_eq!(target.writes(), vec![100, 100]);
    }

    #[test]
    fn first_sample_at_zero_seeds_too() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(0);
        assert_eq!(c.last_scroll(), Some(0));
        c.on_scroll(30);
        assert_eq!(c.margin(), 80);
    }

    #[test]
    fn walkthrough_down_then_up() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(50);
        c.on_scroll(80);
        assert_eq!(c.margin(), 80);
        c.on_scroll(40);
        assert_eq!(c.margin(), 100);
        assert_eq!(target.last(), Some(100));
    }

    #[test]
    fn floor_rejects_further_steps() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(1);
        for y in 2..=6 {
            c.on_scroll(y);
        }
        assert_eq!(c.margin(), 0);
        c.on_scroll(7);
        assert_eq!(c.margin(), 0);
        assert_eq!(target.last(), Some(0));
    }

    #[test]
    fn ceiling_rejects_further_steps() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(1000);
        for y in (995..1000).rev() {
            c.on_scroll(y);
        }
        assert_eq!(c.margin(), 200);
        c.on_scroll(900);
        assert_eq!(c.margin(), 200);
    }

    #[test]
    fn rejection_does_not_saturate_to_bound() {
        let cfg = MarginConfig::new(0, 50, 30, 20).unwrap();
        let target = RecordingTarget::default();
        let mut c = ScrollMarginController::activate(cfg, target, 2000, MIN_VIEWPORT_WIDTH).unwrap();
        c.on_scroll(10);
        c.on_scroll(20);
        assert_eq!(c.margin(), 10);
        // 10 - 20 < 0: rejected, not snapped to 0.
        c.on_scroll(30);
        assert_eq!(c.margin(), 10);
        c.on_scroll(20);
        c.on_scroll(10);
        assert_eq!(c.margin(), 50);
        // 50 + 20 > 50: rejected.
        c.on_scroll(5);
        assert_eq!(c.margin(), 50);
    }

    #[test]
    fn rejected_step_still_tracks_scroll() {
        let cfg = MarginConfig::new(0, 200, 0, 20).unwrap();
        let mut c = ScrollMarginController::activate(cfg, RecordingTarget::default(), 2000, MIN_VIEWPORT_WIDTH).unwrap();
        c.on_scroll(100);
        c.on_scroll(300);
        assert_eq!(c.margin(), 0);
        assert_eq!(c.last_scroll(), Some(300));
        c.on_scroll(250);
        assert_eq!(c.margin(), 20);
    }

    #[test]
    fn equal_samples_do_not_move_margin() {
        let target = RecordingTarget::default();
        let mut c = active(&target);
        c.on_scroll(10);
        c.on_scroll(60);
        let before = c.margin();
        c.on_scroll(60);
        assert_eq!(c.margin(), before);
    }

    #[test]
    fn margin_stays_within_bounds_for_arbitrary_sequences() {
        let cfg = MarginConfig::new(-40, 130, 10, 17).unwrap();
        let mut c = ScrollMarginController::activate(cfg, RecordingTarget::default(), 1920, MIN_VIEWPORT_WIDTH).unwrap();

        // Small LCG so the sequence is reproducible.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..5_000 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let y = ((seed >> 33) % 4_000) as u32;
            let before = c.margin();
            c.on_scroll(y);
            let after = c.margin();
            assert!((-40..=130).contains(&after), "margin {after} escaped bounds");
            let delta = after - before;
            assert!(delta == 0 || delta == 17 || delta == -17, "unexpected delta {delta}");
        }
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let cfg = MarginConfig::new(i32::MIN, i32::MAX, i32::MIN + 1, i32::MAX).unwrap();
        let mut c = ScrollMarginController::activate(cfg, RecordingTarget::default(), 1920, MIN_VIEWPORT_WIDTH).unwrap();
        c.on_scroll(10);
        c.on_scroll(20);
        assert_eq!(c.margin(), i32::MIN + 1);
        c.on_scroll(0);
        assert_eq!(c.margin(), i32::MIN + 1 + i32::MAX);
        c.on_scroll(u32::MAX);
        assert_eq!(c.margin(), -i32::MAX);
        c.on_scroll(0);
        assert_eq!(c.margin(), 0);
    }
}
