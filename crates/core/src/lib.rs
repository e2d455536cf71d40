//! Core units, constants, and shared primitives for the Kepler visualizer workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian constant of gravitation (m³/(kg·s²)).
    pub const G: f64 = 6.674_30e-11;
    /// Mass of the Earth (kg).
    pub const EARTH_MASS_KG: f64 = 5.972e24;
    /// Standard gravitational parameter of the Earth (m³/s²).
    pub const MU_EARTH_M3_S2: f64 = G * EARTH_MASS_KG;
    /// Mean Earth radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Lowest altitude a satellite is allowed to reach (km).
    pub const MIN_SAFE_ALTITUDE_KM: f64 = 160.0;
    /// Smallest periapsis radius accepted for user-entered orbits (km).
    pub const MIN_PERIAPSIS_KM: f64 = EARTH_RADIUS_KM + MIN_SAFE_ALTITUDE_KM;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Wrap an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn normalize_degrees(angle: f64) -> f64 {
        angle.rem_euclid(360.0)
    }
}

/// Animation clock constants and duration formatting.
pub mod time {
    use chrono::TimeDelta;

    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Wall-clock interval between two animation ticks (milliseconds).
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Animation ticks per real second.
    pub const TICKS_PER_SECOND: f64 = 1_000.0 / TICK_INTERVAL_MS as f64;
    /// Simulated seconds covered by one tick at a speed multiplier of 1 h/s.
    pub const SIM_SECONDS_PER_TICK: f64 = SECONDS_PER_HOUR / TICKS_PER_SECOND;
    /// Simulated hours per day, the upper bound of the speed control.
    pub const HOURS_PER_DAY: f64 = 24.0;

    /// Convert weighted ticks into simulated seconds.
    #[inline]
    pub fn ticks_to_seconds(ticks: f64) -> f64 {
        ticks * SIM_SECONDS_PER_TICK
    }

    /// Whole simulated hours elapsed after `ticks` weighted ticks (floored).
    #[inline]
    pub fn ticks_to_whole_hours(ticks: f64) -> u64 {
        (ticks_to_seconds(ticks) / SECONDS_PER_HOUR).floor().max(0.0) as u64
    }

    /// Convert seconds into a `TimeDelta`, truncated to whole milliseconds.
    pub fn seconds_to_delta(seconds: f64) -> TimeDelta {
        let millis = (seconds * 1_000.0).floor();
        TimeDelta::try_milliseconds(millis as i64).unwrap_or(TimeDelta::MAX)
    }

    /// Format a duration as `Hh Mm Ss` with every component floored.
    pub fn format_hms(delta: TimeDelta) -> String {
        let hours = delta.num_hours();
        let minutes = delta.num_minutes() % 60;
        let seconds = delta.num_seconds() % 60;
        format!("{hours}h {minutes}m {seconds}s")
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 2]` math everywhere.
pub mod vector {
    /// Alias for a 2D vector in kilometres or a dimensionless ratio depending on context.
    pub type Vector2 = [f64; 2];

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// Rotate a vector counterclockwise by `angle` radians.
    #[inline]
    pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
        let (sin, cos) = angle.sin_cos();
        [v[0] * cos - v[1] * sin, v[0] * sin + v[1] * cos]
    }
}
