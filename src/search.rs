//! Timestamp search for a target solar angle.
//!
//! Inverts the position calculation: given a bracketing interval, finds the
//! time at which the sun reaches a requested elevation or azimuth. Uses
//! bisection on the SPA position, so the result carries SPA accuracy.

use crate::math::wrap_degrees_pm180;
use crate::time::DeltaT;
use crate::{spa, Error, RefractionCorrection, Result, SolarPosition};
use chrono::{DateTime, TimeZone};

/// The solar coordinate searched for by [`calc_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarAngle {
    /// Elevation angle in degrees. With a refraction correction supplied the
    /// search targets the apparent elevation, otherwise the geometric one.
    Elevation,
    /// Azimuth angle in degrees (0° = North, clockwise).
    Azimuth,
}

/// Find the time at which the sun reaches a target angle.
///
/// Bisects the interval `[lower_bound, upper_bound]` until the remaining
/// uncertainty is at most `tolerance_seconds`. The angle must change sign
/// relative to the target across the interval, which holds for any interval
/// containing exactly one crossing (e.g. a morning window for a rising
/// elevation).
///
/// # Arguments
/// * `lower_bound` - Start of the search interval
/// * `upper_bound` - End of the search interval
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `elevation` - Observer elevation in meters above sea level
/// * `attribute` - Coordinate to match
/// * `target_degrees` - Angle to solve for, in degrees
/// * `delta_t` - ΔT in seconds; `None` estimates it from the date
/// * `refraction` - Optional refraction correction (elevation searches only)
/// * `tolerance_seconds` - Time resolution of the result, in seconds
///
/// # Errors
/// Returns `ComputationError` when the interval is empty or does not
/// bracket the target, and propagates input validation errors.
///
/// # Example
/// ```rust
/// use sunpos::{search, RefractionCorrection};
/// use chrono::{DateTime, Utc};
///
/// let morning_start = "2014-10-10T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
/// let morning_end = "2014-10-10T17:00:00Z".parse::<DateTime<Utc>>().unwrap();
///
/// // When does the sun climb through 24.7° over Tucson?
/// let time = search::calc_time(
///     morning_start,
///     morning_end,
///     32.2,
///     -111.0,
///     700.0,
///     search::SolarAngle::Elevation,
///     24.7,
///     None,
///     Some(RefractionCorrection::standard()),
///     1.0,
/// ).unwrap();
///
/// assert!(time > morning_start && time < morning_end);
/// ```
#[allow(clippy::too_many_arguments)]
#[allow(clippy::needless_pass_by_value)]
pub fn calc_time<Tz: TimeZone>(
    lower_bound: DateTime<Tz>,
    upper_bound: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    attribute: SolarAngle,
    target_degrees: f64,
    delta_t: Option<f64>,
    refraction: Option<RefractionCorrection>,
    tolerance_seconds: f64,
) -> Result<DateTime<Tz>> {
    if upper_bound <= lower_bound {
        return Err(Error::computation_error("search interval is empty"));
    }
    if !(tolerance_seconds.is_finite() && tolerance_seconds > 0.0) {
        return Err(Error::computation_error("tolerance must be positive"));
    }

    let delta_t = match delta_t {
        Some(value) => value,
        None => DeltaT::estimate_from_date_like(lower_bound.clone())?,
    };

    let tz = lower_bound.timezone();
    let mut lo_ms = lower_bound.timestamp_millis();
    let mut hi_ms = upper_bound.timestamp_millis();

    let angle_offset = |datetime: DateTime<Tz>| -> Result<f64> {
        let position = spa::solar_position(
            datetime, latitude, longitude, elevation, delta_t, refraction,
        )?;
        Ok(offset_from_target(&position, attribute, target_degrees, refraction.is_some()))
    };

    let mut f_lo = angle_offset(lower_bound)?;
    let f_hi = angle_offset(upper_bound)?;

    if f_lo == 0.0 {
        return datetime_from_millis(&tz, lo_ms);
    }
    if f_hi == 0.0 {
        return datetime_from_millis(&tz, hi_ms);
    }
    if f_lo * f_hi > 0.0 {
        return Err(Error::computation_error(
            "target angle is not bracketed by the search interval",
        ));
    }

    let tolerance_ms = (tolerance_seconds * 1000.0) as i64;
    while hi_ms - lo_ms > tolerance_ms.max(1) {
        let mid_ms = lo_ms + (hi_ms - lo_ms) / 2;
        let f_mid = angle_offset(datetime_from_millis(&tz, mid_ms)?)?;

        if f_mid == 0.0 {
            return datetime_from_millis(&tz, mid_ms);
        }
        if f_lo * f_mid < 0.0 {
            hi_ms = mid_ms;
        } else {
            lo_ms = mid_ms;
            f_lo = f_mid;
        }
    }

    datetime_from_millis(&tz, lo_ms + (hi_ms - lo_ms) / 2)
}

/// Signed distance of the position from the target angle.
///
/// Azimuth differences are wrapped so a bracket spanning north still has a
/// well-defined sign change.
fn offset_from_target(
    position: &SolarPosition,
    attribute: SolarAngle,
    target_degrees: f64,
    use_apparent: bool,
) -> f64 {
    match attribute {
        SolarAngle::Elevation => {
            let angle = if use_apparent {
                position.apparent_elevation_angle()
            } else {
                position.elevation_angle()
            };
            angle - target_degrees
        }
        SolarAngle::Azimuth => wrap_degrees_pm180(position.azimuth() - target_degrees),
    }
}

fn datetime_from_millis<Tz: TimeZone>(tz: &Tz, millis: i64) -> Result<DateTime<Tz>> {
    tz.timestamp_millis_opt(millis)
        .single()
        .ok_or(Error::computation_error(
            "search time is not representable in the given timezone",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn morning_window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            "2014-10-10T12:00:00Z".parse().unwrap(),
            "2014-10-10T17:00:00Z".parse().unwrap(),
        )
    }

    #[test]
    fn test_calc_time_recovers_elevation() {
        let (lower, upper) = morning_window();

        let time = calc_time(
            lower,
            upper,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            24.7,
            Some(67.0),
            None,
            1.0,
        )
        .unwrap();

        // Evaluate the position at the found time and confirm the angle
        let position =
            spa::solar_position(time, 32.2, -111.0, 700.0, 67.0, None).unwrap();
        assert!((position.elevation_angle() - 24.7).abs() < 0.02);
    }

    #[test]
    fn test_calc_time_recovers_azimuth() {
        let (lower, upper) = morning_window();

        let time = calc_time(
            lower,
            upper,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Azimuth,
            116.3,
            Some(67.0),
            None,
            1.0,
        )
        .unwrap();

        let position =
            spa::solar_position(time, 32.2, -111.0, 700.0, 67.0, None).unwrap();
        assert!((position.azimuth() - 116.3).abs() < 0.02);
    }

    #[test]
    fn test_calc_time_unbracketed_target() {
        let (lower, upper) = morning_window();

        // The sun never reaches 80° elevation over Tucson in October
        let result = calc_time(
            lower,
            upper,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            80.0,
            Some(67.0),
            None,
            1.0,
        );
        assert!(matches!(result, Err(Error::ComputationError { .. })));
    }

    #[test]
    fn test_calc_time_empty_interval() {
        let (lower, upper) = morning_window();

        let result = calc_time(
            upper,
            lower,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            24.7,
            Some(67.0),
            None,
            1.0,
        );
        assert!(matches!(result, Err(Error::ComputationError { .. })));

        let result = calc_time(
            lower,
            lower,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            24.7,
            Some(67.0),
            None,
            1.0,
        );
        assert!(matches!(result, Err(Error::ComputationError { .. })));
    }

    #[test]
    fn test_calc_time_invalid_inputs() {
        let (lower, upper) = morning_window();

        assert!(calc_time(
            lower,
            upper,
            95.0,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            24.7,
            Some(67.0),
            None,
            1.0,
        )
        .is_err());

        assert!(calc_time(
            lower,
            upper,
            32.2,
            -111.0,
            700.0,
            SolarAngle::Elevation,
            24.7,
            Some(67.0),
            None,
            0.0,
        )
        .is_err());
    }
}
