use bevy::prelude::*;
use constants::time_of_day::{
    AUTO_ADVANCE_FRAME_INTERVAL, AUTO_ADVANCE_HOURS_PER_SEC, AUTO_ADVANCE_MIN_CHANGE,
    AUTO_ADVANCE_MIN_ELAPSED_SECS, HOURS_PER_DAY, INITIAL_CYCLE_SPEED, INITIAL_TIME_OF_DAY,
    LABEL_DAY_START, LABEL_EVENING_START, LABEL_MORNING_START, LABEL_NIGHT_START, PRESET_DAY,
    PRESET_EVENING, PRESET_MORNING, PRESET_NIGHT,
};
use serde::{Deserialize, Serialize};

/// Wrap any hour value into `[0, 24)`.
pub fn normalize_hours(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs.
    if wrapped >= HOURS_PER_DAY { 0.0 } else { wrapped }
}

/// Shortest distance between two hours on the 24h circle.
pub fn circular_distance(a: f32, b: f32) -> f32 {
    let direct = (a - b).abs() % HOURS_PER_DAY;
    direct.min(HOURS_PER_DAY - direct)
}

/// Single source of truth for the scene's time of day.
#[derive(Resource, Debug, Clone)]
pub struct EnvironmentClock {
    time_of_day: f32,
    cycle_speed: f32,
    frames_since_check: u32,
    accumulated_secs: f32,
}

impl Default for EnvironmentClock {
    fn default() -> Self {
        Self::new(INITIAL_TIME_OF_DAY, INITIAL_CYCLE_SPEED)
    }
}

impl EnvironmentClock {
    pub fn new(time_of_day: f32, cycle_speed: f32) -> Self {
        let mut clock = Self {
            time_of_day: 0.0,
            cycle_speed: 0.0,
            frames_since_check: 0,
            accumulated_secs: 0.0,
        };
        clock.set(time_of_day);
        clock.set_cycle_speed(cycle_speed);
        clock
    }

    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    pub fn cycle_speed(&self) -> f32 {
        self.cycle_speed
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.cycle_speed > 0.0
    }

    /// Manually set the time. Returns the normalised value.
    pub fn set(&mut self, value: f32) -> f32 {
        self.time_of_day = normalize_hours(value);
        self.time_of_day
    }

    pub fn set_cycle_speed(&mut self, speed: f32) -> f32 {
        self.cycle_speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        if self.cycle_speed == 0.0 {
            self.frames_since_check = 0;
            self.accumulated_secs = 0.0;
        }
        self.cycle_speed
    }

    /// Feed one frame of elapsed time. Returns the new hour when a change is published.
    ///
    /// Elapsed time keeps accumulating across skipped frames and across
    /// checks whose change was too small to publish, so low speeds still
    /// progress instead of stalling.
    pub fn advance(&mut self, delta_secs: f32) -> Option<f32> {
        if self.cycle_speed <= 0.0 {
            return None;
        }

        self.frames_since_check += 1;
        self.accumulated_secs += delta_secs.max(0.0);

        if self.frames_since_check < AUTO_ADVANCE_FRAME_INTERVAL {
            return None;
        }
        self.frames_since_check = 0;

        if self.accumulated_secs <= AUTO_ADVANCE_MIN_ELAPSED_SECS {
            return None;
        }

        let step = self.accumulated_secs * self.cycle_speed * AUTO_ADVANCE_HOURS_PER_SEC;
        let candidate = normalize_hours(self.time_of_day + step);
        if circular_distance(candidate, self.time_of_day) <= AUTO_ADVANCE_MIN_CHANGE {
            return None;
        }

        self.time_of_day = candidate;
        self.accumulated_secs = 0.0;
        Some(candidate)
    }
}

/// Named shortcuts offered next to the time slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreset {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimePreset {
    pub const ALL: [TimePreset; 4] = [Self::Morning, Self::Day, Self::Evening, Self::Night];

    pub fn hour(self) -> f32 {
        match self {
            Self::Morning => PRESET_MORNING,
            Self::Day => PRESET_DAY,
            Self::Evening => PRESET_EVENING,
            Self::Night => PRESET_NIGHT,
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "morning" => Some(Self::Morning),
            "day" => Some(Self::Day),
            "evening" => Some(Self::Evening),
            "night" => Some(Self::Night),
            _ => None,
        }
    }
}

/// Coarse phase shown next to the clock readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Morning,
    Day,
    Evening,
    Night,
}

impl DayPhase {
    pub fn at(hours: f32) -> Self {
        let h = normalize_hours(hours);
        if (LABEL_MORNING_START..LABEL_DAY_START).contains(&h) {
            Self::Morning
        } else if (LABEL_DAY_START..LABEL_EVENING_START).contains(&h) {
            Self::Day
        } else if (LABEL_EVENING_START..LABEL_NIGHT_START).contains(&h) {
            Self::Evening
        } else {
            Self::Night
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Day => "Day",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }
}

/// Sun icon between dawn and the start of evening, moon otherwise.
pub fn is_sun_visible(hours: f32) -> bool {
    (LABEL_MORNING_START..LABEL_EVENING_START).contains(&normalize_hours(hours))
}

/// `HH:MM` readout, minutes truncated.
pub fn format_clock(hours: f32) -> String {
    let h = normalize_hours(hours);
    let whole = h.floor();
    let minutes = ((h - whole) * 60.0).floor().min(59.0);
    format!("{:02}:{:02}", whole as u32, minutes as u32)
}

/// Fired whenever the published time of day changes.
#[derive(Event, Debug, Clone, Copy)]
pub struct TimeOfDayChanged {
    pub hours: f32,
    pub auto_advanced: bool,
}

pub fn advance_clock_system(
    time: Res<Time>,
    mut clock: ResMut<EnvironmentClock>,
    mut changes: EventWriter<TimeOfDayChanged>,
) {
    if let Some(hours) = clock.advance(time.delta_secs()) {
        changes.write(TimeOfDayChanged {
            hours,
            auto_advanced: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(clock: &mut EnvironmentClock, frames: u32, dt: f32) -> Vec<f32> {
        (0..frames).filter_map(|_| clock.advance(dt)).collect()
    }

    #[test]
    fn wraps_full_day_to_midnight() {
        let mut clock = EnvironmentClock::default();
        assert_eq!(clock.set(24.0), 0.0);
        assert_eq!(clock.set(0.0), 0.0);
        assert_eq!(clock.set(-1.0), 23.0);
        assert_eq!(clock.set(49.5), 1.5);
    }

    #[test]
    fn tiny_negative_never_reaches_twenty_four() {
        let h = normalize_hours(-1e-9);
        assert!((0.0..24.0).contains(&h));
    }

    #[test]
    fn non_finite_input_resets_to_midnight() {
        assert_eq!(normalize_hours(f32::NAN), 0.0);
        assert_eq!(normalize_hours(f32::INFINITY), 0.0);
    }

    #[test]
    fn session_starts_late_evening_and_manual() {
        let clock = EnvironmentClock::default();
        assert_eq!(clock.time_of_day(), 22.0);
        assert!(!clock.is_auto_advancing());
    }

    #[test]
    fn negative_speed_clamps_to_manual() {
        let mut clock = EnvironmentClock::default();
        assert_eq!(clock.set_cycle_speed(-0.4), 0.0);
        assert!(!clock.is_auto_advancing());
    }

    #[test]
    fn manual_mode_never_advances() {
        let mut clock = EnvironmentClock::new(8.0, 0.0);
        assert!(run_frames(&mut clock, 600, 1.0 / 60.0).is_empty());
        assert_eq!(clock.time_of_day(), 8.0);
    }

    #[test]
    fn auto_advance_checks_every_tenth_frame() {
        let mut clock = EnvironmentClock::new(8.0, 1.0);
        // 0.06s per frame: the first check at frame 10 sees 0.6s accumulated.
        for _ in 0..9 {
            assert!(clock.advance(0.06).is_none());
        }
        let published = clock.advance(0.06).expect("tenth frame publishes");
        assert!((published - (8.0 + 0.6 * 5.0)).abs() < 1e-4);
    }

    #[test]
    fn auto_advance_waits_for_half_a_second() {
        let mut clock = EnvironmentClock::new(8.0, 1.0);
        // 10 frames at 1/60s is only ~0.17s.
        assert!(run_frames(&mut clock, 10, 1.0 / 60.0).is_empty());
        // By frame 40 roughly 0.67s has accumulated.
        let published = run_frames(&mut clock, 30, 1.0 / 60.0);
        assert_eq!(published.len(), 1);
    }

    #[test]
    fn slow_speed_accumulates_instead_of_stalling() {
        let mut clock = EnvironmentClock::new(12.0, 0.01);
        // Each 0.6s check would only move 0.03h; the clock must still move eventually.
        let published = run_frames(&mut clock, 600, 1.0 / 60.0);
        assert!(!published.is_empty());
        assert!(clock.time_of_day() > 12.0);
    }

    #[test]
    fn auto_advance_wraps_past_midnight() {
        let mut clock = EnvironmentClock::new(23.5, 1.0);
        let published = run_frames(&mut clock, 10, 0.1);
        assert_eq!(published.len(), 1);
        assert!((published[0] - 4.5).abs() < 1e-4);
    }

    #[test]
    fn circular_distance_crosses_midnight() {
        assert!((circular_distance(23.95, 0.05) - 0.1).abs() < 1e-4);
        assert!((circular_distance(6.0, 18.0) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn presets_map_to_fixed_hours() {
        assert_eq!(TimePreset::Morning.hour(), 7.0);
        assert_eq!(TimePreset::Day.hour(), 13.0);
        assert_eq!(TimePreset::Evening.hour(), 19.0);
        assert_eq!(TimePreset::Night.hour(), 23.0);
        assert_eq!(TimePreset::from_string("EVENING"), Some(TimePreset::Evening));
        assert_eq!(TimePreset::from_string("noon"), None);
    }

    #[test]
    fn phase_labels_follow_display_bands() {
        assert_eq!(DayPhase::at(4.9), DayPhase::Night);
        assert_eq!(DayPhase::at(5.0), DayPhase::Morning);
        assert_eq!(DayPhase::at(10.0), DayPhase::Day);
        assert_eq!(DayPhase::at(17.0), DayPhase::Evening);
        assert_eq!(DayPhase::at(21.0), DayPhase::Night);
        assert!(is_sun_visible(12.0));
        assert!(!is_sun_visible(17.5));
    }

    #[test]
    fn clock_readout_is_zero_padded() {
        assert_eq!(format_clock(22.0), "22:00");
        assert_eq!(format_clock(7.5), "07:30");
        assert_eq!(format_clock(0.999), "00:59");
    }

    #[test]
    fn system_advances_clock_from_frame_time() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(EnvironmentClock::new(10.0, 1.0))
            .add_event::<TimeOfDayChanged>()
            .add_systems(Update, advance_clock_system);

        for _ in 0..10 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(std::time::Duration::from_millis(100));
            app.update();
        }

        let clock = app.world().resource::<EnvironmentClock>();
        assert!((clock.time_of_day() - 15.0).abs() < 1e-3);
    }
}
