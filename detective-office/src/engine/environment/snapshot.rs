use bevy::color::Mix;
use bevy::prelude::*;
use constants::palette::{
    AMBIENT_DAY, AMBIENT_NIGHT, CITY_DAY, CITY_EVENING, CITY_MORNING, CITY_NIGHT, FOG_DAY,
    FOG_EVENING_SLOPE, FOG_EVENING_START, FOG_MORNING, FOG_NIGHT, RAIN_DAY, RAIN_EVENING,
    RAIN_NIGHT, ROOM_DAY, ROOM_NIGHT, ROOM_WARM, SUN_DAY, SUN_EVENING, SUN_MORNING, SUN_NIGHT,
    WINDOW_LIGHT_DAY, WINDOW_LIGHT_NIGHT,
};
use constants::time_of_day::{
    AMBIENT_INTENSITY_DAY, AMBIENT_INTENSITY_NIGHT, BACKGROUND_FACTOR_EVENING_END,
    BACKGROUND_FACTOR_NIGHT, FOG_DENSITY_DAY, FOG_DENSITY_MORNING_START, FOG_DENSITY_NIGHT,
    HOURS_PER_DAY, INITIAL_TIME_OF_DAY, SUN_DEPTH, SUN_INTENSITY_DAY, SUN_INTENSITY_EVENING_END,
    SUN_INTENSITY_MORNING_START, SUN_INTENSITY_NIGHT, SUN_MIN_HEIGHT, SUN_ORBIT_RADIUS,
    SUN_RISE_HOUR,
};
use constants::weather::{
    RAIN_INTENSITY_DAY, RAIN_INTENSITY_EVENING, RAIN_INTENSITY_MORNING, RAIN_INTENSITY_NIGHT,
    RAIN_OPACITY_SCALE,
};

use super::bands::{
    CityBucket, InteriorBucket, LightingBand, RainBucket, srgba_hex, window_light_level, within,
};
use super::clock::{EnvironmentClock, normalize_hours};

/// Lamp strength per interior bucket.
fn lamp_level(bucket: InteriorBucket) -> f32 {
    match bucket {
        InteriorBucket::Night => 4.0,
        InteriorBucket::Warm => 3.0,
        InteriorBucket::Day => 2.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityLights {
    pub window_color: Srgba,
    pub window_intensity: f32,
    pub silhouette: Srgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomPalette {
    pub floor: Srgba,
    pub walls: Srgba,
    pub desk: Srgba,
    pub chair: Srgba,
    pub bulletin: Srgba,
    pub cabinet: Srgba,
}

impl RoomPalette {
    fn from_table(table: [u32; 6]) -> Self {
        let [floor, walls, desk, chair, bulletin, cabinet] = table.map(srgba_hex);
        Self {
            floor,
            walls,
            desk,
            chair,
            bulletin,
            cabinet,
        }
    }
}

/// Every time-dependent visual parameter for one instant.
///
/// Pure function of the hour; rebuilt every frame and never stored beyond it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSnapshot {
    pub hours: f32,
    pub sun_position: Vec3,
    pub sun_color: Srgba,
    pub sun_intensity: f32,
    pub ambient_color: Srgba,
    pub ambient_intensity: f32,
    pub fog_color: Srgba,
    pub fog_density: f32,
    pub background_color: Srgba,
    pub rain_intensity: f32,
    pub rain_color: Srgba,
    pub rain_opacity: f32,
    pub window_light_intensity: f32,
    pub window_light_color: Srgba,
    pub lamp_intensity: f32,
    pub city: CityLights,
    pub room_palette: RoomPalette,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self::at(INITIAL_TIME_OF_DAY)
    }
}

impl EnvironmentSnapshot {
    pub fn at(hours: f32) -> Self {
        let hours = normalize_hours(hours);
        let (band, t) = LightingBand::at(hours);

        let fog_color = fog_color(band, t, hours);
        let factor = background_factor(band, t);
        let (ambient_color, ambient_intensity) = ambient(band, t);
        let rain_intensity = rain_intensity(hours);
        let interior = InteriorBucket::at(hours);

        Self {
            hours,
            sun_position: sun_position(hours),
            sun_color: sun_color(band, t),
            sun_intensity: sun_intensity(band, t),
            ambient_color,
            ambient_intensity,
            fog_color,
            fog_density: fog_density(band, t),
            background_color: scale_rgb(fog_color, factor),
            rain_intensity,
            rain_color: rain_color(hours),
            rain_opacity: rain_intensity * RAIN_OPACITY_SCALE,
            window_light_intensity: window_light_level(hours),
            window_light_color: srgba_hex(if interior == InteriorBucket::Night {
                WINDOW_LIGHT_NIGHT
            } else {
                WINDOW_LIGHT_DAY
            }),
            lamp_intensity: lamp_level(interior),
            city: city_lights(hours),
            room_palette: RoomPalette::from_table(match interior {
                InteriorBucket::Night => ROOM_NIGHT,
                InteriorBucket::Warm => ROOM_WARM,
                InteriorBucket::Day => ROOM_DAY,
            }),
        }
    }
}

fn scale_rgb(color: Srgba, factor: f32) -> Srgba {
    Srgba::new(
        color.red * factor,
        color.green * factor,
        color.blue * factor,
        color.alpha,
    )
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn sun_position(hours: f32) -> Vec3 {
    let angle = ((hours - SUN_RISE_HOUR) / HOURS_PER_DAY) * std::f32::consts::TAU;
    Vec3::new(
        angle.cos() * SUN_ORBIT_RADIUS,
        (angle.sin() * SUN_ORBIT_RADIUS).max(SUN_MIN_HEIGHT),
        SUN_DEPTH,
    )
}

fn sun_intensity(band: LightingBand, t: f32) -> f32 {
    match band {
        LightingBand::Night => SUN_INTENSITY_NIGHT,
        LightingBand::Dawn => lerp(SUN_INTENSITY_NIGHT, SUN_INTENSITY_MORNING_START, t),
        LightingBand::Morning => lerp(SUN_INTENSITY_MORNING_START, SUN_INTENSITY_DAY, t),
        LightingBand::Day => SUN_INTENSITY_DAY,
        LightingBand::Evening => lerp(SUN_INTENSITY_DAY, SUN_INTENSITY_EVENING_END, t),
        LightingBand::Dusk => lerp(SUN_INTENSITY_EVENING_END, SUN_INTENSITY_NIGHT, t),
    }
}

fn sun_color(band: LightingBand, t: f32) -> Srgba {
    let (night, morning, day, evening) = (
        srgba_hex(SUN_NIGHT),
        srgba_hex(SUN_MORNING),
        srgba_hex(SUN_DAY),
        srgba_hex(SUN_EVENING),
    );
    match band {
        LightingBand::Night => night,
        LightingBand::Dawn => night.mix(&morning, t),
        LightingBand::Morning => morning.mix(&day, t),
        LightingBand::Day => day,
        LightingBand::Evening => day.mix(&evening, t),
        LightingBand::Dusk => evening.mix(&night, t),
    }
}

fn evening_fog(t: f32) -> Srgba {
    let channel = |i: usize| FOG_EVENING_START[i] + FOG_EVENING_SLOPE[i] * t;
    Srgba::new(channel(0), channel(1), channel(2), 1.0)
}

/// Fog tint. The last hour of morning and of day blend into the next band's
/// starting colour so band edges never pop.
fn fog_color(band: LightingBand, t: f32, hours: f32) -> Srgba {
    let (night, morning, day) = (
        srgba_hex(FOG_NIGHT),
        srgba_hex(FOG_MORNING),
        srgba_hex(FOG_DAY),
    );
    match band {
        LightingBand::Night => night,
        LightingBand::Dawn => night.mix(&morning, t),
        LightingBand::Morning if hours >= 9.0 => morning.mix(&day, hours - 9.0),
        LightingBand::Morning => morning,
        LightingBand::Day if hours >= 16.0 => day.mix(&evening_fog(0.0), hours - 16.0),
        LightingBand::Day => day,
        LightingBand::Evening => evening_fog(t),
        LightingBand::Dusk => evening_fog(1.0).mix(&night, t),
    }
}

fn fog_density(band: LightingBand, t: f32) -> f32 {
    match band {
        LightingBand::Night | LightingBand::Dusk => FOG_DENSITY_NIGHT,
        LightingBand::Dawn => lerp(FOG_DENSITY_NIGHT, FOG_DENSITY_MORNING_START, t),
        LightingBand::Morning => lerp(FOG_DENSITY_MORNING_START, FOG_DENSITY_DAY, t),
        LightingBand::Day => FOG_DENSITY_DAY,
        LightingBand::Evening => lerp(FOG_DENSITY_DAY, FOG_DENSITY_NIGHT, t),
    }
}

fn background_factor(band: LightingBand, t: f32) -> f32 {
    match band {
        LightingBand::Night => BACKGROUND_FACTOR_NIGHT,
        LightingBand::Dawn => lerp(BACKGROUND_FACTOR_NIGHT, 1.0, t),
        LightingBand::Morning | LightingBand::Day => 1.0,
        LightingBand::Evening => lerp(1.0, BACKGROUND_FACTOR_EVENING_END, t),
        LightingBand::Dusk => lerp(BACKGROUND_FACTOR_EVENING_END, BACKGROUND_FACTOR_NIGHT, t),
    }
}

fn ambient(band: LightingBand, t: f32) -> (Srgba, f32) {
    let (night, day) = (srgba_hex(AMBIENT_NIGHT), srgba_hex(AMBIENT_DAY));
    match band {
        LightingBand::Night => (night, AMBIENT_INTENSITY_NIGHT),
        LightingBand::Dawn => (
            night.mix(&day, t),
            lerp(AMBIENT_INTENSITY_NIGHT, AMBIENT_INTENSITY_DAY, t),
        ),
        LightingBand::Dusk => (
            day.mix(&night, t),
            lerp(AMBIENT_INTENSITY_DAY, AMBIENT_INTENSITY_NIGHT, t),
        ),
        _ => (day, AMBIENT_INTENSITY_DAY),
    }
}

fn rain_intensity(hours: f32) -> f32 {
    match RainBucket::at(hours) {
        RainBucket::Night => RAIN_INTENSITY_NIGHT,
        RainBucket::Morning => RAIN_INTENSITY_MORNING,
        RainBucket::Evening => RAIN_INTENSITY_EVENING,
        RainBucket::Day => RAIN_INTENSITY_DAY,
    }
}

fn rain_color(hours: f32) -> Srgba {
    srgba_hex(if within(hours, 22.0, 6.0) {
        RAIN_NIGHT
    } else if within(hours, 16.0, 22.0) {
        RAIN_EVENING
    } else {
        RAIN_DAY
    })
}

fn city_lights(hours: f32) -> CityLights {
    let (window, intensity, silhouette) = match CityBucket::at(hours) {
        CityBucket::Night => CITY_NIGHT,
        CityBucket::Evening => CITY_EVENING,
        CityBucket::Morning => CITY_MORNING,
        CityBucket::Day => CITY_DAY,
    };
    CityLights {
        window_color: srgba_hex(window),
        window_intensity: intensity,
        silhouette: srgba_hex(silhouette),
    }
}

/// Rebuild the snapshot from the clock once per frame.
pub fn refresh_environment_snapshot(
    clock: Res<EnvironmentClock>,
    mut snapshot: ResMut<EnvironmentSnapshot>,
) {
    let hours = clock.time_of_day();
    if snapshot.hours != hours {
        *snapshot = EnvironmentSnapshot::at(hours);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn colors_close(a: Srgba, b: Srgba, tolerance: f32) -> bool {
        (a.red - b.red).abs() < tolerance
            && (a.green - b.green).abs() < tolerance
            && (a.blue - b.blue).abs() < tolerance
    }

    fn sweep() -> impl Iterator<Item = f32> {
        (0..2400).map(|i| i as f32 * 0.01)
    }

    #[test]
    fn midday_is_bright_and_clear() {
        let s = EnvironmentSnapshot::at(13.0);
        assert_eq!(s.sun_intensity, 2.0);
        assert_eq!(s.fog_density, 0.01);
        assert_eq!(s.rain_intensity, 0.3);
        assert_eq!(s.fog_color, srgba_hex(FOG_DAY));
    }

    #[test]
    fn late_night_is_dim_and_wet() {
        let s = EnvironmentSnapshot::at(23.0);
        assert_eq!(s.ambient_intensity, 0.5);
        assert_eq!(s.rain_intensity, 1.0);
        assert_eq!(s.window_light_color, srgba_hex(WINDOW_LIGHT_NIGHT));
        assert_eq!(s.lamp_intensity, 4.0);
        assert_eq!(s.city.window_intensity, 0.8);
    }

    #[test]
    fn morning_sun_ramps_up() {
        assert!(close(EnvironmentSnapshot::at(5.0).sun_intensity, 0.5));
        assert!(close(EnvironmentSnapshot::at(7.5).sun_intensity, 1.25));
        assert!(close(EnvironmentSnapshot::at(7.5).fog_density, 0.02));
    }

    #[test]
    fn sun_orbits_and_is_clamped_below_horizon() {
        let noon = EnvironmentSnapshot::at(12.0).sun_position;
        assert!(close(noon.x, 0.0));
        assert!(close(noon.y, 20.0));
        assert_eq!(noon.z, -10.0);

        let midnight = EnvironmentSnapshot::at(0.0).sun_position;
        assert_eq!(midnight.y, -5.0);
    }

    #[test]
    fn background_darkens_at_night() {
        let s = EnvironmentSnapshot::at(2.0);
        let fog = srgba_hex(FOG_NIGHT);
        assert!(close(s.background_color.red, fog.red * 0.3));
        assert!(close(s.background_color.blue, fog.blue * 0.3));
    }

    #[test]
    fn every_hour_is_within_range() {
        for h in sweep() {
            let s = EnvironmentSnapshot::at(h);
            assert!((0.3..=1.0).contains(&s.rain_intensity), "rain at {h}");
            assert!(s.fog_density >= 0.0, "fog at {h}");
            assert!(s.sun_intensity >= 0.0);
            assert!(s.ambient_intensity >= 0.0);
            assert!(s.window_light_intensity >= 0.0);
            assert!(s.lamp_intensity >= 0.0);
            for c in [
                s.sun_color,
                s.ambient_color,
                s.fog_color,
                s.background_color,
                s.rain_color,
            ] {
                for v in [c.red, c.green, c.blue] {
                    assert!((0.0..=1.0).contains(&v), "channel {v} at {h}");
                }
            }
        }
    }

    #[test]
    fn interpolated_properties_are_continuous_at_band_edges() {
        let edges = [4.0, 5.0, 9.0, 10.0, 16.0, 17.0, 21.0, 22.0, 24.0];
        let step = 1e-3;
        for edge in edges {
            let before = EnvironmentSnapshot::at(edge - step);
            let after = EnvironmentSnapshot::at(edge);
            assert!(
                (before.sun_intensity - after.sun_intensity).abs() < 0.01,
                "sun intensity jumps at {edge}"
            );
            assert!(
                (before.fog_density - after.fog_density).abs() < 0.001,
                "fog density jumps at {edge}"
            );
            assert!(
                (before.ambient_intensity - after.ambient_intensity).abs() < 0.01,
                "ambient jumps at {edge}"
            );
            assert!(
                colors_close(before.sun_color, after.sun_color, 0.01),
                "sun colour jumps at {edge}"
            );
            assert!(
                colors_close(before.fog_color, after.fog_color, 0.01),
                "fog colour jumps at {edge}"
            );
            assert!(
                colors_close(before.background_color, after.background_color, 0.01),
                "background jumps at {edge}"
            );
            assert!(
                colors_close(before.ambient_color, after.ambient_color, 0.01),
                "ambient colour jumps at {edge}"
            );
        }
    }

    #[test]
    fn palette_follows_interior_bucket() {
        assert_eq!(
            EnvironmentSnapshot::at(20.0).room_palette.desk,
            srgba_hex(0x5b3513)
        );
        assert_eq!(
            EnvironmentSnapshot::at(7.0).room_palette.desk,
            srgba_hex(0x7b4513)
        );
        assert_eq!(
            EnvironmentSnapshot::at(12.0).room_palette.desk,
            srgba_hex(0x8b5513)
        );
    }

    #[test]
    fn rain_opacity_tracks_intensity() {
        let s = EnvironmentSnapshot::at(8.0);
        assert!(close(s.rain_opacity, 0.7 * 0.3));
        assert_eq!(s.rain_color, srgba_hex(RAIN_DAY));
        assert_eq!(EnvironmentSnapshot::at(18.0).rain_color, srgba_hex(RAIN_EVENING));
    }
}
