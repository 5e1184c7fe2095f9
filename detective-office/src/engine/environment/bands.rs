use bevy::prelude::*;
use constants::time_of_day::{
    DAWN_START, DAY_START, DUSK_END, DUSK_START, EVENING_START, MORNING_START,
};

use super::clock::normalize_hours;

/// Convert a `0xRRGGBB` constant into a colour.
pub fn srgba_hex(hex: u32) -> Srgba {
    Srgba::rgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// True when `hours` lies in `[start, end)`, wrapping past midnight when `start > end`.
pub fn within(hours: f32, start: f32, end: f32) -> bool {
    let h = normalize_hours(hours);
    if start <= end {
        h >= start && h < end
    } else {
        h >= start || h < end
    }
}

/// Interpolated lighting bands. Dawn and Dusk exist so every interpolated
/// property is continuous around the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingBand {
    Dawn,
    Morning,
    Day,
    Evening,
    Dusk,
    Night,
}

impl LightingBand {
    /// Band containing `hours` and the progress through it in `[0, 1)`.
    pub fn at(hours: f32) -> (Self, f32) {
        let h = normalize_hours(hours);
        let progress = |start: f32, end: f32| ((h - start) / (end - start)).clamp(0.0, 1.0);

        if (DAWN_START..MORNING_START).contains(&h) {
            (Self::Dawn, progress(DAWN_START, MORNING_START))
        } else if (MORNING_START..DAY_START).contains(&h) {
            (Self::Morning, progress(MORNING_START, DAY_START))
        } else if (DAY_START..EVENING_START).contains(&h) {
            (Self::Day, progress(DAY_START, EVENING_START))
        } else if (EVENING_START..DUSK_START).contains(&h) {
            (Self::Evening, progress(EVENING_START, DUSK_START))
        } else if (DUSK_START..DUSK_END).contains(&h) {
            (Self::Dusk, progress(DUSK_START, DUSK_END))
        } else {
            (Self::Night, 0.0)
        }
    }
}

// Step buckets. These are intentionally discontinuous, each property keeps
// its own edges.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainBucket {
    Night,
    Morning,
    Evening,
    Day,
}

impl RainBucket {
    pub fn at(hours: f32) -> Self {
        if within(hours, 22.0, 6.0) {
            Self::Night
        } else if within(hours, 6.0, 10.0) {
            Self::Morning
        } else if within(hours, 16.0, 22.0) {
            Self::Evening
        } else {
            Self::Day
        }
    }
}

/// Shared by the room palette, lamp, window tint, city windows and soundscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorBucket {
    Night,
    Warm,
    Day,
}

impl InteriorBucket {
    pub fn at(hours: f32) -> Self {
        if within(hours, 18.0, 6.0) {
            Self::Night
        } else if within(hours, 6.0, 9.0) || within(hours, 16.0, 18.0) {
            Self::Warm
        } else {
            Self::Day
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityBucket {
    Night,
    Evening,
    Morning,
    Day,
}

impl CityBucket {
    pub fn at(hours: f32) -> Self {
        if within(hours, 18.0, 6.0) {
            Self::Night
        } else if within(hours, 16.0, 18.0) {
            Self::Evening
        } else if within(hours, 6.0, 8.0) {
            Self::Morning
        } else {
            Self::Day
        }
    }
}

/// Window light strength through the office window.
pub fn window_light_level(hours: f32) -> f32 {
    if within(hours, 10.0, 16.0) {
        3.0
    } else if within(hours, 7.0, 10.0) || within(hours, 16.0, 19.0) {
        2.0
    } else if within(hours, 19.0, 21.0) {
        1.0
    } else {
        0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundscapeBucket {
    Night,
    Morning,
    Day,
}

impl SoundscapeBucket {
    pub fn at(hours: f32) -> Self {
        if within(hours, 18.0, 6.0) {
            Self::Night
        } else if within(hours, 6.0, 10.0) {
            Self::Morning
        } else {
            Self::Day
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion_splits_channels() {
        let c = srgba_hex(0xff8000);
        assert_eq!(c.red, 1.0);
        assert!((c.green - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.blue, 0.0);
        assert_eq!(c.alpha, 1.0);
    }

    #[test]
    fn wrapping_windows_cover_midnight() {
        assert!(within(23.0, 22.0, 6.0));
        assert!(within(0.0, 22.0, 6.0));
        assert!(!within(6.0, 22.0, 6.0));
        assert!(within(6.0, 6.0, 10.0));
        assert!(!within(10.0, 6.0, 10.0));
    }

    #[test]
    fn lighting_band_edges() {
        assert_eq!(LightingBand::at(3.99).0, LightingBand::Night);
        assert_eq!(LightingBand::at(4.0).0, LightingBand::Dawn);
        assert_eq!(LightingBand::at(5.0), (LightingBand::Morning, 0.0));
        assert_eq!(LightingBand::at(7.5), (LightingBand::Morning, 0.5));
        assert_eq!(LightingBand::at(10.0).0, LightingBand::Day);
        assert_eq!(LightingBand::at(17.0).0, LightingBand::Evening);
        assert_eq!(LightingBand::at(21.5), (LightingBand::Dusk, 0.5));
        assert_eq!(LightingBand::at(22.0).0, LightingBand::Night);
    }

    #[test]
    fn buckets_use_their_own_edges() {
        assert_eq!(RainBucket::at(21.9), RainBucket::Evening);
        assert_eq!(RainBucket::at(22.0), RainBucket::Night);
        assert_eq!(InteriorBucket::at(17.0), InteriorBucket::Warm);
        assert_eq!(InteriorBucket::at(18.0), InteriorBucket::Night);
        assert_eq!(InteriorBucket::at(12.0), InteriorBucket::Day);
        assert_eq!(CityBucket::at(7.0), CityBucket::Morning);
        assert_eq!(CityBucket::at(8.0), CityBucket::Day);
        assert_eq!(SoundscapeBucket::at(9.9), SoundscapeBucket::Morning);
        assert_eq!(SoundscapeBucket::at(5.9), SoundscapeBucket::Night);
    }

    #[test]
    fn window_light_steps() {
        assert_eq!(window_light_level(12.0), 3.0);
        assert_eq!(window_light_level(8.0), 2.0);
        assert_eq!(window_light_level(17.0), 2.0);
        assert_eq!(window_light_level(20.0), 1.0);
        assert_eq!(window_light_level(2.0), 0.5);
    }
}
