//! Shot meter state machine
//!
//! Each actor owns a `ShotMeter`. It is ticked once per frame with the charge
//! button sample and whether the actor currently holds the ball, and reports
//! at most one `MeterSignal` back to the controller.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::input::ButtonSample;

/// Meter lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeterState {
    #[default]
    Idle,
    /// Button held, fill accumulating
    Charging,
    /// Post-release display lock showing the achieved fill
    Frozen,
}

/// What a re-press during the Frozen display does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrozenRepress {
    /// Cooldown runs to completion regardless of input
    #[default]
    Ignore,
    /// Holding the button resumes charging; releasing fires again
    Recharge,
}

/// Per-actor meter tuning
#[derive(Component, Debug, Clone, Copy)]
pub struct ShotMeterConfig {
    pub charge_speed: f32,
    pub min_value: f32,
    pub max_value: f32,
    pub display_duration: f32,
    pub yellow_height: f32,
    pub green_height: f32,
    pub window_offset: f32,
    pub frozen_repress: FrozenRepress,
}

impl Default for ShotMeterConfig {
    fn default() -> Self {
        Self {
            charge_speed: CHARGE_SPEED,
            min_value: METER_MIN,
            max_value: METER_MAX,
            display_duration: METER_DISPLAY_TIME,
            yellow_height: YELLOW_HEIGHT,
            green_height: GREEN_HEIGHT,
            window_offset: WINDOW_OFFSET,
            frozen_repress: FrozenRepress::Ignore,
        }
    }
}

impl ShotMeterConfig {
    /// Map a raw fill value into [0, 1] over the configured range
    pub fn normalize(&self, fill: f32) -> f32 {
        let span = self.max_value - self.min_value;
        if span <= 0.0 {
            return 0.0;
        }
        ((fill - self.min_value) / span).clamp(0.0, 1.0)
    }
}

/// One accuracy window, in fractions of the meter track height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccuracyWindow {
    pub height: f32,
    /// Vertical offset of the window center from the track midpoint
    pub offset: f32,
}

impl AccuracyWindow {
    /// Whether a normalized fill lies inside this window
    pub fn contains(&self, normalized_fill: f32) -> bool {
        let center = 0.5 + self.offset;
        let half = self.height / 2.0;
        normalized_fill >= center - half && normalized_fill <= center + half
    }
}

/// Yellow ("good") and green ("great") windows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccuracyWindows {
    pub yellow: AccuracyWindow,
    pub green: AccuracyWindow,
}

impl AccuracyWindows {
    pub fn from_config(config: &ShotMeterConfig) -> Self {
        let offset = config.window_offset / 2.0;
        Self {
            yellow: AccuracyWindow {
                height: config.yellow_height,
                offset,
            },
            green: AccuracyWindow {
                height: config.green_height,
                offset,
            },
        }
    }

    /// Recenter both windows, keeping their heights
    pub fn reset(&mut self) {
        self.yellow.offset = 0.0;
        self.green.offset = 0.0;
    }

    pub fn grade(&self, normalized_fill: f32) -> ShotGrade {
        if self.green.contains(normalized_fill) {
            ShotGrade::Great
        } else if self.yellow.contains(normalized_fill) {
            ShotGrade::Good
        } else {
            ShotGrade::Miss
        }
    }
}

/// Accuracy tier the released fill landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotGrade {
    Great,
    Good,
    Miss,
}

/// Per-tick input to the meter
#[derive(Debug, Clone, Copy, Default)]
pub struct MeterInput {
    pub button: ButtonSample,
    pub holds_ball: bool,
}

/// Notable transitions reported to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterSignal {
    ChargeStarted,
    /// The shot should fire now
    Release { fill: f32, grade: ShotGrade },
    /// Charge abandoned without a release
    Cancelled,
    /// Display finished, meter back to Idle
    Hidden,
}

/// Per-actor shot meter
#[derive(Component, Debug, Clone, Default)]
pub struct ShotMeter {
    pub state: MeterState,
    pub fill: f32,
    /// Seconds left in the Frozen display
    pub cooldown: f32,
    pub visible: bool,
    pub windows: AccuracyWindows,
    /// Re-press accumulating during Frozen (only with `FrozenRepress::Recharge`)
    pub recharging: bool,
}

impl ShotMeter {
    pub fn new(config: &ShotMeterConfig) -> Self {
        Self {
            fill: config.min_value,
            windows: AccuracyWindows::from_config(config),
            ..default()
        }
    }

    /// Movement is locked while charging or displaying a shot
    pub fn locks_movement(&self) -> bool {
        matches!(self.state, MeterState::Charging | MeterState::Frozen)
    }

    /// Advance the meter by one tick
    pub fn tick(&mut self, config: &ShotMeterConfig, input: MeterInput, dt: f32) -> Option<MeterSignal> {
        let button = input.button;
        match self.state {
            MeterState::Idle => {
                if input.holds_ball && button.held {
                    self.start_charge(config);
                    self.accumulate(config, dt);
                    return Some(MeterSignal::ChargeStarted);
                }
                None
            }
            MeterState::Charging => {
                if !input.holds_ball {
                    return self.count_down(config, input, dt);
                }
                if button.held {
                    self.accumulate(config, dt);
                    None
                } else if button.just_released {
                    Some(self.release(config))
                } else {
                    self.reset(config);
                    Some(MeterSignal::Cancelled)
                }
            }
            MeterState::Frozen => {
                if input.holds_ball && config.frozen_repress == FrozenRepress::Recharge {
                    if button.held {
                        self.recharging = true;
                        self.visible = true;
                        self.accumulate(config, dt);
                        return None;
                    }
                    if button.just_released && self.recharging {
                        return Some(self.release(config));
                    }
                }
                self.count_down(config, input, dt)
            }
        }
    }

    fn start_charge(&mut self, config: &ShotMeterConfig) {
        // Windows are only laid out when the meter isn't already on screen
        if !self.visible {
            self.windows = AccuracyWindows::from_config(config);
        }
        self.state = MeterState::Charging;
        self.visible = true;
        self.fill = config.min_value;
        self.cooldown = 0.0;
        self.recharging = false;
    }

    fn accumulate(&mut self, config: &ShotMeterConfig, dt: f32) {
        self.fill = (self.fill + config.charge_speed * dt).clamp(config.min_value, config.max_value);
    }

    fn release(&mut self, config: &ShotMeterConfig) -> MeterSignal {
        self.state = MeterState::Frozen;
        self.cooldown = config.display_duration;
        self.recharging = false;
        let grade = self.windows.grade(config.normalize(self.fill));
        MeterSignal::Release {
            fill: self.fill,
            grade,
        }
    }

    fn count_down(&mut self, config: &ShotMeterConfig, input: MeterInput, dt: f32) -> Option<MeterSignal> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        // The holder keeps the display up by holding the button; anyone else times out
        let held_open = input.holds_ball && input.button.held && self.state == MeterState::Frozen;
        if self.cooldown <= 0.0 && !held_open {
            self.reset(config);
            return Some(MeterSignal::Hidden);
        }
        None
    }

    fn reset(&mut self, config: &ShotMeterConfig) {
        self.state = MeterState::Idle;
        self.fill = config.min_value;
        self.cooldown = 0.0;
        self.visible = false;
        self.recharging = false;
        self.windows.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn held() -> ButtonSample {
        ButtonSample {
            held: true,
            just_pressed: false,
            just_released: false,
        }
    }

    fn released() -> ButtonSample {
        ButtonSample {
            held: false,
            just_pressed: false,
            just_released: true,
        }
    }

    fn up() -> ButtonSample {
        ButtonSample::default()
    }

    fn holder(button: ButtonSample) -> MeterInput {
        MeterInput {
            button,
            holds_ball: true,
        }
    }

    fn charge_for(meter: &mut ShotMeter, config: &ShotMeterConfig, seconds: f32) {
        let frames = (seconds / DT).round() as usize;
        for _ in 0..frames {
            meter.tick(config, holder(held()), DT);
        }
    }

    #[test]
    fn test_idle_ignores_press_without_ball() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        let signal = meter.tick(
            &config,
            MeterInput {
                button: held(),
                holds_ball: false,
            },
            DT,
        );
        assert_eq!(signal, None);
        assert_eq!(meter.state, MeterState::Idle);
        assert!(!meter.visible);
    }

    #[test]
    fn test_full_second_charge_clamps_at_max() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        assert_eq!(meter.tick(&config, holder(held()), DT), Some(MeterSignal::ChargeStarted));
        charge_for(&mut meter, &config, 1.0);
        assert_eq!(meter.state, MeterState::Charging);
        assert_eq!(meter.fill, 1.0);
    }

    #[test]
    fn test_fill_never_decreases_while_charging() {
        let config = ShotMeterConfig {
            charge_speed: 0.7,
            ..default()
        };
        let mut meter = ShotMeter::new(&config);
        let mut last = meter.fill;
        for _ in 0..200 {
            meter.tick(&config, holder(held()), DT);
            assert!(meter.fill >= last);
            assert!(meter.fill >= config.min_value && meter.fill <= config.max_value);
            last = meter.fill;
        }
    }

    #[test]
    fn test_release_fires_once_and_freezes() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.5);
        let fill_before = meter.fill;

        let signal = meter.tick(&config, holder(released()), DT);
        assert!(matches!(signal, Some(MeterSignal::Release { .. })));
        assert_eq!(meter.state, MeterState::Frozen);
        assert_eq!(meter.fill, fill_before);
        assert_eq!(meter.cooldown, config.display_duration);

        // Next tick: button up, still frozen, no second release
        let signal = meter.tick(&config, holder(up()), DT);
        assert_eq!(signal, None);
        assert_eq!(meter.state, MeterState::Frozen);
        assert_eq!(meter.fill, fill_before);
    }

    #[test]
    fn test_frozen_returns_to_idle_after_display() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.3);
        meter.tick(&config, holder(released()), DT);

        let mut hidden = false;
        for _ in 0..40 {
            // After the shot the actor no longer holds the ball
            if meter.tick(&config, MeterInput::default(), DT) == Some(MeterSignal::Hidden) {
                hidden = true;
                break;
            }
        }
        assert!(hidden);
        assert_eq!(meter.state, MeterState::Idle);
        assert_eq!(meter.fill, config.min_value);
        assert!(!meter.visible);
        assert_eq!(meter.windows.yellow.offset, 0.0);
    }

    #[test]
    fn test_charge_cancelled_without_release_edge() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.2);
        let signal = meter.tick(&config, holder(up()), DT);
        assert_eq!(signal, Some(MeterSignal::Cancelled));
        assert_eq!(meter.state, MeterState::Idle);
        assert_eq!(meter.fill, config.min_value);
        assert!(!meter.visible);
    }

    #[test]
    fn test_losing_ball_while_charging_hides_meter() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.2);
        let signal = meter.tick(
            &config,
            MeterInput {
                button: held(),
                holds_ball: false,
            },
            DT,
        );
        assert_eq!(signal, Some(MeterSignal::Hidden));
        assert_eq!(meter.state, MeterState::Idle);
    }

    #[test]
    fn test_repress_ignored_by_default() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.3);
        meter.tick(&config, holder(released()), DT);
        let frozen_fill = meter.fill;

        for _ in 0..10 {
            assert_eq!(meter.tick(&config, holder(held()), DT), None);
        }
        assert_eq!(meter.fill, frozen_fill);
        assert_eq!(meter.tick(&config, holder(released()), DT), None);
        assert_eq!(meter.state, MeterState::Frozen);
    }

    #[test]
    fn test_held_button_keeps_display_past_cooldown() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.3);
        meter.tick(&config, holder(released()), DT);

        for _ in 0..60 {
            meter.tick(&config, holder(held()), DT);
        }
        assert_eq!(meter.state, MeterState::Frozen);
        assert_eq!(meter.cooldown, 0.0);

        assert_eq!(meter.tick(&config, holder(released()), DT), Some(MeterSignal::Hidden));
        assert_eq!(meter.state, MeterState::Idle);
    }

    #[test]
    fn test_held_button_after_losing_ball_times_out() {
        let config = ShotMeterConfig::default();
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.3);
        meter.tick(&config, holder(released()), DT);

        // The shot took the ball; the button stays down
        let not_holder = MeterInput {
            button: held(),
            holds_ball: false,
        };
        let mut hidden_after = None;
        for frame in 0..600 {
            if meter.tick(&config, not_holder, DT) == Some(MeterSignal::Hidden) {
                hidden_after = Some(frame);
                break;
            }
        }
        let frames = hidden_after.unwrap();
        assert!(frames <= 31, "hidden after {} frames", frames);
        assert_eq!(meter.state, MeterState::Idle);
        assert!(!meter.locks_movement());

        // Still held without the ball: no new charge
        assert_eq!(meter.tick(&config, not_holder, DT), None);
        assert_eq!(meter.state, MeterState::Idle);
    }

    #[test]
    fn test_repress_recharges_and_fires_again() {
        let config = ShotMeterConfig {
            frozen_repress: FrozenRepress::Recharge,
            ..default()
        };
        let mut meter = ShotMeter::new(&config);
        charge_for(&mut meter, &config, 0.3);
        meter.tick(&config, holder(released()), DT);
        let first_fill = meter.fill;

        for _ in 0..6 {
            assert_eq!(meter.tick(&config, holder(held()), DT), None);
        }
        assert!(meter.fill > first_fill);
        assert_eq!(meter.state, MeterState::Frozen);

        let signal = meter.tick(&config, holder(released()), DT);
        assert!(matches!(signal, Some(MeterSignal::Release { .. })));
        assert_eq!(meter.cooldown, config.display_duration);
    }

    #[test]
    fn test_windows_follow_config() {
        let config = ShotMeterConfig {
            window_offset: 0.4,
            ..default()
        };
        let mut meter = ShotMeter::new(&config);
        meter.windows.reset();
        meter.tick(&config, holder(held()), DT);
        assert_eq!(meter.windows.yellow.height, config.yellow_height);
        assert_eq!(meter.windows.green.height, config.green_height);
        assert!((meter.windows.green.offset - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_grade_tiers() {
        let windows = AccuracyWindows::from_config(&ShotMeterConfig::default());
        assert_eq!(windows.grade(0.5), ShotGrade::Great);
        assert_eq!(windows.grade(0.35), ShotGrade::Good);
        assert_eq!(windows.grade(0.95), ShotGrade::Miss);
    }
}
