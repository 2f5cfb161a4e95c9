//! Algorithm selection by name.
//!
//! Routes a shared calling convention to one of the implemented algorithms,
//! normalizing the inputs they treat differently (ΔT defaults to the
//! Espenak & Meeus estimate for the date when not supplied).

use crate::time::DeltaT;
use crate::{ephemeris, grena3, spa, Error, RefractionCorrection, Result, SolarPosition};
use chrono::{DateTime, TimeZone};
use core::str::FromStr;

/// Identifier for a solar position algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// NREL SPA (Reda & Andreas 2003), ±0.0003°, years -2000 to 6000
    Nrel,
    /// Grena algorithm no. 3 (2012), ±0.01°, years 2010 to 2110
    Grena3,
    /// Simplified ephemeris after Hughes, ~0.05°
    Ephemeris,
}

impl Method {
    /// Canonical name for this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nrel => "nrel",
            Self::Grena3 => "grena3",
            Self::Ephemeris => "ephemeris",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parses a method name (case-insensitive). `"spa"` is accepted as an
    /// alias for `"nrel"`. Unknown names are an error, never a fallback.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("nrel") || s.eq_ignore_ascii_case("spa") {
            Ok(Self::Nrel)
        } else if s.eq_ignore_ascii_case("grena3") {
            Ok(Self::Grena3)
        } else if s.eq_ignore_ascii_case("ephemeris") {
            Ok(Self::Ephemeris)
        } else {
            Err(Error::UnknownMethod)
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculate solar position with the selected algorithm.
///
/// # Arguments
/// * `method` - Algorithm to use
/// * `datetime` - Timezone-aware date and time
/// * `latitude` - Observer latitude in degrees (-90 to +90)
/// * `longitude` - Observer longitude in degrees (-180 to +180)
/// * `elevation` - Observer elevation in meters (used by SPA only)
/// * `delta_t` - ΔT in seconds; `None` estimates it from the date
/// * `refraction` - Optional atmospheric refraction correction
///
/// # Errors
/// Returns error for invalid coordinates or date components.
///
/// # Example
/// ```rust
/// use sunpos::{get_solar_position, Method, RefractionCorrection};
/// use chrono::{DateTime, Utc};
///
/// let datetime = "2023-06-21T19:00:00Z".parse::<DateTime<Utc>>().unwrap();
/// let method: Method = "nrel".parse().unwrap();
///
/// let position = get_solar_position(
///     method,
///     datetime,
///     37.7749,
///     -122.4194,
///     0.0,
///     None, // estimate ΔT
///     Some(RefractionCorrection::standard()),
/// ).unwrap();
///
/// println!("{}: zenith {:.3}°", method, position.apparent_zenith_angle());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn get_solar_position<Tz: TimeZone>(
    method: Method,
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    delta_t: Option<f64>,
    refraction: Option<RefractionCorrection>,
) -> Result<SolarPosition> {
    let delta_t = match delta_t {
        Some(value) => value,
        None => DeltaT::estimate_from_date_like(datetime.clone())?,
    };

    match method {
        Method::Nrel => {
            spa::solar_position(datetime, latitude, longitude, elevation, delta_t, refraction)
        }
        Method::Grena3 => {
            grena3::solar_position_with_refraction(datetime, latitude, longitude, delta_t, refraction)
        }
        // The simplified ephemeris works directly on UT and takes no ΔT
        Method::Ephemeris => ephemeris::solar_position(datetime, latitude, longitude, refraction),
    }
}

/// Calculate solar positions for a series of timestamps.
///
/// Results are returned in input order. Fails on the first invalid input.
///
/// # Errors
/// Returns error for invalid coordinates or date components.
///
/// # Example
/// ```rust
/// use sunpos::{dispatch, Method};
/// use chrono::{DateTime, Utc};
///
/// let timestamps: Vec<DateTime<Utc>> = [
///     "2023-06-21T06:00:00Z",
///     "2023-06-21T12:00:00Z",
///     "2023-06-21T18:00:00Z",
/// ].iter().map(|s| s.parse().unwrap()).collect();
///
/// let positions = dispatch::get_solar_position_series(
///     Method::Grena3,
///     &timestamps,
///     52.52,   // Berlin
///     13.405,
///     0.0,
///     None,
///     None,
/// ).unwrap();
///
/// assert_eq!(positions.len(), 3);
/// ```
#[cfg(feature = "std")]
pub fn get_solar_position_series<Tz: TimeZone>(
    method: Method,
    timestamps: &[DateTime<Tz>],
    latitude: f64,
    longitude: f64,
    elevation: f64,
    delta_t: Option<f64>,
    refraction: Option<RefractionCorrection>,
) -> Result<Vec<SolarPosition>> {
    timestamps
        .iter()
        .map(|datetime| {
            get_solar_position(
                method,
                datetime.clone(),
                latitude,
                longitude,
                elevation,
                delta_t,
                refraction,
            )
        })
        .collect()
}
