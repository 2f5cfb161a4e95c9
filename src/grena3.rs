//! Grena3 solar position algorithm implementation.
//!
//! This follows the no. 3 algorithm described in Grena, 'Five new algorithms for the computation
//! of sun position from 2010 to 2110', Solar Energy 86 (2012) pp. 1323-1337.
//!
//! The algorithm is designed for the years 2010 to 2110, with a maximum error of 0.01 degrees.
//! It's approximately 10x faster than the SPA algorithm but with reduced accuracy and time range.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::error::check_coordinates;
use crate::math::{
    asin, atan2, cos, degrees_to_radians, normalize_degrees_0_to_360, radians_to_degrees, sin,
    sqrt, tan, wrap_degrees_pm180, PI,
};
use crate::{RefractionCorrection, Result, SolarPosition};
use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Calculate solar position using the Grena3 algorithm.
///
/// This is a simplified algorithm designed for years 2010-2110 with maximum error of 0.01°.
/// It's much faster than SPA but less accurate and has a limited time range.
/// No refraction correction is applied; the apparent zenith equals the true zenith.
///
/// # Arguments
/// * `datetime` - Timezone-aware date and time
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `delta_t` - ΔT in seconds (difference between TT and UT1)
///
/// # Errors
/// Returns error for invalid coordinates (latitude outside ±90°, longitude outside ±180°)
///
/// # Example
/// ```rust
/// use sunpos::grena3;
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2023-06-21T12:00:00-07:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let position = grena3::solar_position(
///     datetime,
///     37.7749,     // San Francisco latitude
///     -122.4194,   // San Francisco longitude
///     69.0,        // deltaT (seconds)
/// ).unwrap();
///
/// println!("Azimuth: {:.3}°", position.azimuth());
/// println!("Elevation: {:.3}°", position.elevation_angle());
/// ```
pub fn solar_position<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    delta_t: f64,
) -> Result<SolarPosition> {
    solar_position_with_refraction(datetime, latitude, longitude, delta_t, None)
}

/// Calculate solar position using the Grena3 algorithm with optional refraction correction.
///
/// # Arguments
/// * `datetime` - Timezone-aware date and time
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `delta_t` - ΔT in seconds (difference between TT and UT1)
/// * `refraction` - Optional atmospheric refraction correction
///
/// # Errors
/// Returns error for invalid coordinates (latitude outside ±90°, longitude outside ±180°)
pub fn solar_position_with_refraction<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    delta_t: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<SolarPosition> {
    check_coordinates(latitude, longitude)?;

    let utc_datetime = datetime.with_timezone(&chrono::Utc);
    let ut_hours = f64::from(utc_datetime.hour())
        + f64::from(utc_datetime.minute()) / 60.0
        + (f64::from(utc_datetime.second()) + f64::from(utc_datetime.nanosecond()) / 1e9) / 3600.0;

    // t: days since the 2060-01-01 reference epoch
    let t = calc_t(&utc_datetime);
    let t_e = t + 1.1574e-5 * delta_t;
    let omega_at_e = 0.0172019715 * t_e;

    // Apparent sun longitude (lambda)
    let lambda = -1.388803
        + 1.720279216e-2 * t_e
        + 3.3366e-2 * sin(omega_at_e - 0.06172)
        + 3.53e-4 * sin(2.0 * omega_at_e - 0.1163);

    // Obliquity of ecliptic (epsilon)
    let epsilon = 4.089567e-1 - 6.19e-9 * t_e;

    let s_lambda = sin(lambda);
    let c_lambda = cos(lambda);
    let s_epsilon = sin(epsilon);
    let c_epsilon = sqrt(1.0 - s_epsilon * s_epsilon);

    // Right ascension (alpha)
    let mut alpha = atan2(s_lambda * c_epsilon, c_lambda);
    if alpha < 0.0 {
        alpha += 2.0 * PI;
    }

    // Declination (delta)
    let delta = asin(s_lambda * s_epsilon);

    // Hour angle (H)
    let mut h = 1.7528311 + 6.300388099 * t + degrees_to_radians(longitude) - alpha;
    h = ((h + PI) % (2.0 * PI)) - PI;
    if h < -PI {
        h += 2.0 * PI;
    }

    // Equation of time: apparent solar time (from the hour angle) minus
    // mean solar time (UT corrected for longitude), in minutes
    let mean_sun_hour_angle = 15.0 * (ut_hours - 12.0) + longitude;
    let eot_minutes = 4.0 * wrap_degrees_pm180(radians_to_degrees(h) - mean_sun_hour_angle);

    // Topocentric coordinates
    let s_phi = sin(degrees_to_radians(latitude));
    let c_phi = sqrt(1.0 - s_phi * s_phi);
    let s_delta = sin(delta);
    let c_delta = sqrt(1.0 - s_delta * s_delta);
    let s_h = sin(h);
    let c_h = cos(h);

    let s_epsilon0 = s_phi * s_delta + c_phi * c_delta * c_h;
    let e_p = asin(s_epsilon0) - 4.26e-5 * sqrt(1.0 - s_epsilon0 * s_epsilon0);
    let gamma = atan2(s_h, c_h * s_phi - s_delta * c_phi / c_delta);

    // Refraction shifts the apparent elevation only, and only above the horizon
    let delta_re = refraction.map_or(0.0, |correction| {
        if e_p > 0.0 {
            let p = correction.pressure();
            let t = correction.temperature();
            (0.08422 * (p / 1000.0)) / ((273.0 + t) * tan(e_p + 0.003138 / (e_p + 0.08919)))
        } else {
            0.0
        }
    });

    let azimuth = normalize_degrees_0_to_360(radians_to_degrees(gamma + PI));
    let zenith = radians_to_degrees(PI / 2.0 - e_p);
    let apparent_zenith = radians_to_degrees(PI / 2.0 - e_p - delta_re);

    SolarPosition::new(azimuth, zenith, apparent_zenith, eot_minutes)
}

/// Calculate the t parameter: days since 0h UT on 2060-01-01, the reference
/// epoch Grena places in the middle of the algorithm's 2010-2110 range.
/// Negative for dates before the epoch.
fn calc_t(utc_datetime: &DateTime<chrono::Utc>) -> f64 {
    let mut m = utc_datetime.month() as i32;
    let mut y = utc_datetime.year();
    let d = utc_datetime.day() as i32;
    let h = f64::from(utc_datetime.hour())
        + f64::from(utc_datetime.minute()) / 60.0
        + f64::from(utc_datetime.second()) / 3600.0;

    if m <= 2 {
        m += 12;
        y -= 1;
    }

    f64::from((365.25 * f64::from(y - 2000)) as i32)
        + f64::from((30.6001 * f64::from(m + 1)) as i32)
        - f64::from((0.01 * f64::from(y)) as i32)
        + f64::from(d)
        + 0.0416667 * h
        - 21958.0
}
