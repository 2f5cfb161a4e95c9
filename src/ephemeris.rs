//! Simplified solar ephemeris after Hughes.
//!
//! Low-precision algorithm based on Hughes, Yallop & Hohenkerk, 'The Equation
//! of Time', Monthly Notices of the Royal Astronomical Society 238 (1989),
//! as adapted for solar energy applications. Solves Kepler's equation for the
//! eccentric anomaly and uses a Greenwich mean sidereal time expression
//! referenced to the 1900 epoch.
//!
//! Accuracy is on the order of 0.05°, adequate for irradiance work but well
//! below [`crate::spa`]. No ΔT input; the algorithm operates directly on UT.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use crate::error::check_coordinates;
use crate::math::{
    asin, atan2, cos, degrees_to_radians, floor, normalize_degrees_0_to_360, powi,
    radians_to_degrees, sin, sqrt, tan, wrap_degrees_pm180,
};
use crate::time::day_of_year;
use crate::{Error, RefractionCorrection, Result, SolarPosition};
#[cfg(feature = "chrono")]
use chrono::{Datelike, TimeZone, Timelike};

/// Annual aberration in degrees (20 arcseconds).
const ABERRATION: f64 = 20.0 / 3600.0;

/// Convergence threshold for the eccentric anomaly iteration, in degrees.
const KEPLER_TOLERANCE: f64 = 1e-4;

const KEPLER_MAX_ITERATIONS: u32 = 25;

/// Calculate solar position using the simplified ephemeris.
///
/// # Arguments
/// * `datetime` - Timezone-aware date and time
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `refraction` - Optional atmospheric refraction correction
///
/// # Errors
/// Returns error for invalid coordinates (latitude outside ±90°, longitude outside ±180°)
///
/// # Example
/// ```rust
/// use sunpos::ephemeris;
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2023-06-21T12:00:00-07:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let position = ephemeris::solar_position(
///     datetime,
///     37.7749,     // San Francisco latitude
///     -122.4194,   // San Francisco longitude
///     None,
/// ).unwrap();
///
/// println!("Azimuth: {:.2}°", position.azimuth());
/// println!("Elevation: {:.2}°", position.elevation_angle());
/// ```
#[cfg(feature = "chrono")]
#[allow(clippy::needless_pass_by_value)]
pub fn solar_position<Tz: TimeZone>(
    datetime: chrono::DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<SolarPosition> {
    let utc = datetime.with_timezone(&chrono::Utc);
    let ut_hours = f64::from(utc.hour())
        + f64::from(utc.minute()) / 60.0
        + (f64::from(utc.second()) + f64::from(utc.nanosecond()) / 1e9) / 3600.0;

    solar_position_from_utc(
        utc.year(),
        utc.month(),
        utc.day(),
        ut_hours,
        latitude,
        longitude,
        refraction,
    )
}

/// Calculate solar position from UTC date components and decimal hours.
///
/// Core implementation without the chrono dependency.
///
/// # Arguments
/// * `year` - Year
/// * `month` - Month (1-12)
/// * `day` - Day of month (1-31)
/// * `ut_hours` - Decimal hours since midnight UT (0.0 to < 24.0)
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `refraction` - Optional atmospheric refraction correction
///
/// # Errors
/// Returns error for invalid coordinates or date components, or if the
/// Kepler iteration fails to converge.
#[allow(clippy::too_many_lines)]
pub fn solar_position_from_utc(
    year: i32,
    month: u32,
    day: u32,
    ut_hours: f64,
    latitude: f64,
    longitude: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<SolarPosition> {
    check_coordinates(latitude, longitude)?;
    if !(0.0..24.0).contains(&ut_hours) {
        return Err(Error::invalid_datetime("hours must be within 0 to 24"));
    }

    let doy = f64::from(day_of_year(year, month, day)?);

    // Days from the 1900 reference epoch to 0h UT of the given date
    let yr = f64::from(year - 1900);
    let yr_begin = 365.0 * yr + floor((yr - 1.0) / 4.0) - 0.5;
    let ezero = yr_begin + doy;
    let t = ezero / 36525.0;

    // Greenwich mean sidereal time at 0h UT, then at the given hour
    let mut gmst0 =
        6.0 / 24.0 + 38.0 / 1440.0 + (45.836 + 8640184.542 * t + 0.0929 * powi(t, 2)) / 86400.0;
    gmst0 = 360.0 * (gmst0 - floor(gmst0));
    let gmst_i = normalize_degrees_0_to_360(gmst0 + 360.0 * (1.0027379093 * ut_hours / 24.0));

    // Local apparent sidereal time
    let loc_ast = normalize_degrees_0_to_360(360.0 + gmst_i + longitude);

    let epoch_date = ezero + ut_hours / 24.0;
    let t1 = epoch_date / 36525.0;

    let obliquity_rad = degrees_to_radians(
        23.452294 - 0.0130125 * t1 - 1.64e-6 * powi(t1, 2) + 5.03e-7 * powi(t1, 3),
    );
    let ml_perigee = 281.22083 + 4.70684e-5 * epoch_date + 0.000453 * powi(t1, 2)
        + 3e-6 * powi(t1, 3);
    let mean_anom = normalize_degrees_0_to_360(
        358.47583 + 0.985600267 * epoch_date - 0.00015 * powi(t1, 2) - 3e-6 * powi(t1, 3),
    );
    let eccen = 0.01675104 - 4.18e-5 * t1 - 1.26e-7 * powi(t1, 2);

    // Kepler's equation, iterated to convergence
    let mut eccen_anom = mean_anom;
    let mut converged = false;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let previous = eccen_anom;
        eccen_anom = mean_anom + radians_to_degrees(eccen) * sin(degrees_to_radians(previous));
        if (eccen_anom - previous).abs() <= KEPLER_TOLERANCE {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(Error::computation_error(
            "eccentric anomaly iteration did not converge",
        ));
    }

    let true_anom = 2.0
        * normalize_degrees_0_to_360(radians_to_degrees(atan2(
            sqrt((1.0 + eccen) / (1.0 - eccen)) * tan(degrees_to_radians(eccen_anom) / 2.0),
            1.0,
        )));

    // Ecliptic longitude, corrected for aberration
    let ec_lon = normalize_degrees_0_to_360(ml_perigee + true_anom) - ABERRATION;
    let ec_lon_rad = degrees_to_radians(ec_lon);

    let dec_rad = asin(sin(obliquity_rad) * sin(ec_lon_rad));
    let rt_ascen = radians_to_degrees(atan2(cos(obliquity_rad) * sin(ec_lon_rad), cos(ec_lon_rad)));

    let hour_angle = wrap_degrees_pm180(loc_ast - rt_ascen);
    let hour_angle_rad = degrees_to_radians(hour_angle);
    let lat_rad = degrees_to_radians(latitude);

    let mut azimuth = radians_to_degrees(atan2(
        -sin(hour_angle_rad),
        cos(lat_rad) * tan(dec_rad) - sin(lat_rad) * cos(hour_angle_rad),
    ));
    if azimuth < 0.0 {
        azimuth += 360.0;
    }

    let elevation = radians_to_degrees(asin(
        cos(lat_rad) * cos(dec_rad) * cos(hour_angle_rad) + sin(lat_rad) * sin(dec_rad),
    ));

    // Equation of time from the apparent/mean solar time identity, in minutes
    let mean_sun_hour_angle = 15.0 * (ut_hours - 12.0) + longitude;
    let eot_minutes = 4.0 * wrap_degrees_pm180(hour_angle - mean_sun_hour_angle);

    let apparent_elevation = refraction.map_or(elevation, |correction| {
        elevation + refraction_degrees(elevation, &correction)
    });

    SolarPosition::new(
        azimuth,
        90.0 - elevation,
        90.0 - apparent_elevation,
        eot_minutes,
    )
}

/// Piecewise refraction correction in degrees for a true elevation.
fn refraction_degrees(elevation: f64, correction: &RefractionCorrection) -> f64 {
    let tan_el = tan(degrees_to_radians(elevation));

    // Correction in arcseconds at standard conditions
    let arcsec = if elevation > 5.0 && elevation <= 85.0 {
        58.1 / tan_el - 0.07 / powi(tan_el, 3) + 8.6e-5 / powi(tan_el, 5)
    } else if elevation > -0.575 && elevation <= 5.0 {
        elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
            + 1735.0
    } else if elevation > -1.0 && elevation <= -0.575 {
        -20.774 / tan_el
    } else {
        0.0
    };

    // Scale for actual temperature and pressure (hPa against 1013.25 standard)
    arcsec * (283.0 / (273.0 + correction.temperature())) * (correction.pressure() / 1013.25)
        / 3600.0
}
