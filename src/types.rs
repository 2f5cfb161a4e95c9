//! Core data types for solar position calculations.

use crate::error::{
    check_azimuth, check_coordinates, check_pressure, check_temperature, check_zenith_angle,
};
use crate::math::{floor, powf};
use crate::{Error, Result};

/// Angular radius of the sun in degrees, used for refraction cutoffs.
pub(crate) const SUN_RADIUS: f64 = 0.26667;

/// Atmospheric refraction at the horizon under standard conditions, in degrees.
pub(crate) const STANDARD_HORIZON_REFRACTION: f64 = 0.5667;

/// Predefined elevation angles for sunrise/sunset calculations.
///
/// Corresponds to different twilight definitions for consistent sunrise, sunset, and twilight calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    /// Standard sunrise/sunset (sun's upper limb touches horizon, accounting for refraction)
    SunriseSunset,
    /// Civil twilight (sun is 6° below horizon)
    CivilTwilight,
    /// Nautical twilight (sun is 12° below horizon)
    NauticalTwilight,
    /// Astronomical twilight (sun is 18° below horizon)
    AstronomicalTwilight,
    /// Custom elevation angle
    Custom(f64),
}

impl Horizon {
    /// Gets the elevation angle in degrees for this horizon definition.
    ///
    /// Negative values indicate the sun is below the horizon.
    #[must_use]
    pub const fn elevation_angle(&self) -> f64 {
        match self {
            Self::SunriseSunset => -0.83337, // Accounts for refraction and sun's radius
            Self::CivilTwilight => -6.0,
            Self::NauticalTwilight => -12.0,
            Self::AstronomicalTwilight => -18.0,
            Self::Custom(angle) => *angle,
        }
    }

    /// Creates a custom horizon with the specified elevation angle.
    ///
    /// # Errors
    /// Returns `InvalidElevationAngle` if elevation is outside -90 to +90 degrees.
    pub fn custom(elevation_degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&elevation_degrees) {
            return Err(Error::invalid_elevation_angle(elevation_degrees));
        }
        Ok(Self::Custom(elevation_degrees))
    }
}

impl Eq for Horizon {}

impl core::hash::Hash for Horizon {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::SunriseSunset => 0.hash(state),
            Self::CivilTwilight => 1.hash(state),
            Self::NauticalTwilight => 2.hash(state),
            Self::AstronomicalTwilight => 3.hash(state),
            Self::Custom(angle) => {
                4.hash(state);
                // Normalize -0.0 and +0.0 so hashing remains consistent with PartialEq
                let normalized = if *angle == 0.0 { 0.0 } else { *angle };
                normalized.to_bits().hash(state);
            }
        }
    }
}

/// An observer position on the Earth's surface.
///
/// Bundles the geographic inputs shared by every algorithm. Altitude is
/// meters above sea level and defaults to zero.
///
/// # Example
/// ```
/// # use sunpos::types::Location;
/// let golden = Location::new(39.742476, -105.1786, 1830.14).unwrap();
/// assert_eq!(golden.latitude(), 39.742476);
/// // Standard-atmosphere pressure at ~1830 m is roughly 812 hPa
/// assert!((golden.standard_pressure() - 812.0).abs() < 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl Location {
    /// Creates a new location from latitude, longitude (degrees) and altitude (meters).
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Creates a sea-level location.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn at_sea_level(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, 0.0)
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the altitude in meters above sea level.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Estimates the atmospheric pressure in hPa at this location's altitude.
    ///
    /// Uses the International Standard Atmosphere relation, so refraction can
    /// be derived from altitude when no measured pressure is available.
    #[must_use]
    pub fn standard_pressure(&self) -> f64 {
        powf((44331.514 - self.altitude) / 11880.516, 1.0 / 0.1902632)
    }
}

/// Atmospheric conditions for refraction correction in solar position calculations.
///
/// Atmospheric refraction bends light rays, causing the apparent sun position to differ
/// from its true geometric position by up to ~0.6° near the horizon. The correction
/// affects only the apparent zenith/elevation; true zenith, azimuth and equation of
/// time are purely geometric.
///
/// # Example
/// ```
/// # use sunpos::types::RefractionCorrection;
/// // Standard atmospheric conditions at sea level
/// let standard = RefractionCorrection::standard();
/// assert_eq!(standard.pressure(), 1013.25);
/// assert_eq!(standard.temperature(), 15.0);
///
/// // Custom conditions for high altitude or different climate
/// let custom = RefractionCorrection::new(820.0, 11.0).unwrap();
/// assert_eq!(custom.pressure(), 820.0);
/// assert_eq!(custom.temperature(), 11.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionCorrection {
    /// Atmospheric pressure in millibars (hPa)
    pressure: f64,
    /// Temperature in degrees Celsius
    temperature: f64,
    /// Refraction at the horizon in degrees
    horizon_refraction: f64,
}

impl RefractionCorrection {
    /// Creates a new refraction correction with the specified atmospheric conditions.
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn new(pressure: f64, temperature: f64) -> Result<Self> {
        Self::with_horizon_refraction(pressure, temperature, STANDARD_HORIZON_REFRACTION)
    }

    /// Creates a refraction correction with an explicit horizon refraction constant.
    ///
    /// The horizon refraction (degrees, typically 0.5667°) sets the elevation below
    /// which no correction is applied.
    ///
    /// # Errors
    /// Returns `InvalidPressure`, `InvalidTemperature` or `InvalidElevationAngle`
    /// for out-of-range values.
    pub fn with_horizon_refraction(
        pressure: f64,
        temperature: f64,
        horizon_refraction: f64,
    ) -> Result<Self> {
        check_pressure(pressure)?;
        check_temperature(temperature)?;
        if !(0.0..=5.0).contains(&horizon_refraction) {
            return Err(Error::invalid_elevation_angle(horizon_refraction));
        }
        Ok(Self {
            pressure,
            temperature,
            horizon_refraction,
        })
    }

    /// Creates refraction correction using standard atmospheric conditions.
    ///
    /// Uses standard sea-level conditions:
    /// - Pressure: 1013.25 millibars (standard atmosphere)
    /// - Temperature: 15.0°C (59°F)
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pressure: 1013.25,
            temperature: 15.0,
            horizon_refraction: STANDARD_HORIZON_REFRACTION,
        }
    }

    /// Creates a refraction correction for a location's altitude.
    ///
    /// Pressure is taken from the standard atmosphere at the location's altitude.
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn for_location(location: &Location, temperature: f64) -> Result<Self> {
        Self::new(location.standard_pressure(), temperature)
    }

    /// Gets the atmospheric pressure in millibars.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Gets the temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Gets the horizon refraction constant in degrees.
    #[must_use]
    pub const fn horizon_refraction(&self) -> f64 {
        self.horizon_refraction
    }

    /// Elevation angle below which the correction is not applied.
    pub(crate) fn elevation_threshold(&self) -> f64 {
        -(SUN_RADIUS + self.horizon_refraction)
    }
}

/// Solar position in topocentric coordinates.
///
/// Represents the sun's position as seen from a specific point on Earth's surface,
/// with and without atmospheric refraction, plus the equation of time. Uses the
/// standard astronomical coordinate system where:
/// - Azimuth: 0° = North, measured clockwise to 360°
/// - Zenith angle: 0° = directly overhead (zenith), 90° = horizon, 180° = nadir
/// - Elevation angle: 90° = directly overhead, 0° = horizon, -90° = nadir
///
/// When no refraction correction is requested, the apparent angles equal the
/// true geometric angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Azimuth angle in degrees (0° to 360°, 0° = North, increasing clockwise)
    azimuth: f64,
    /// True (geometric) zenith angle in degrees (0° to 180°)
    zenith_angle: f64,
    /// Refraction-corrected zenith angle in degrees (0° to 180°)
    apparent_zenith_angle: f64,
    /// Equation of time in minutes (apparent minus mean solar time)
    equation_of_time: f64,
}

impl SolarPosition {
    /// Creates a new solar position record.
    ///
    /// # Errors
    /// Returns error if any angle is outside its valid range or not finite.
    ///
    /// # Example
    /// ```
    /// # use sunpos::types::SolarPosition;
    /// let position = SolarPosition::new(194.34, 50.128, 50.112, 14.64).unwrap();
    /// assert_eq!(position.azimuth(), 194.34);
    /// assert!((position.elevation_angle() - 39.872).abs() < 1e-9);
    /// assert!((position.apparent_elevation_angle() - 39.888).abs() < 1e-9);
    /// ```
    pub fn new(
        azimuth: f64,
        zenith_angle: f64,
        apparent_zenith_angle: f64,
        equation_of_time: f64,
    ) -> Result<Self> {
        let normalized_azimuth = check_azimuth(azimuth)?;
        let validated_zenith = check_zenith_angle(zenith_angle)?;
        let validated_apparent = check_zenith_angle(apparent_zenith_angle)?;
        if !equation_of_time.is_finite() {
            return Err(Error::computation_error("equation of time is not finite"));
        }

        Ok(Self {
            azimuth: normalized_azimuth,
            zenith_angle: validated_zenith,
            apparent_zenith_angle: validated_apparent,
            equation_of_time,
        })
    }

    /// Creates a record without refraction correction (apparent equals true).
    ///
    /// # Errors
    /// Returns error if any angle is outside its valid range or not finite.
    pub fn without_refraction(
        azimuth: f64,
        zenith_angle: f64,
        equation_of_time: f64,
    ) -> Result<Self> {
        Self::new(azimuth, zenith_angle, zenith_angle, equation_of_time)
    }

    /// Gets the azimuth angle in degrees (0° to 360°, 0° = North, increasing clockwise).
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the true (geometric) zenith angle in degrees.
    #[must_use]
    pub const fn zenith_angle(&self) -> f64 {
        self.zenith_angle
    }

    /// Gets the refraction-corrected zenith angle in degrees.
    #[must_use]
    pub const fn apparent_zenith_angle(&self) -> f64 {
        self.apparent_zenith_angle
    }

    /// Gets the true elevation angle in degrees (90° - zenith).
    #[must_use]
    pub fn elevation_angle(&self) -> f64 {
        90.0 - self.zenith_angle
    }

    /// Gets the refraction-corrected elevation angle in degrees.
    #[must_use]
    pub fn apparent_elevation_angle(&self) -> f64 {
        90.0 - self.apparent_zenith_angle
    }

    /// Gets the equation of time in minutes (apparent minus mean solar time).
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }

    /// Checks if the sun is above the horizon (geometric elevation angle > 0°).
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.elevation_angle() > 0.0
    }

    /// Checks if the sun is at or below the horizon (geometric elevation angle ≤ 0°).
    #[must_use]
    pub fn is_sun_down(&self) -> bool {
        self.elevation_angle() <= 0.0
    }
}

/// Hours since midnight UTC that can extend beyond a single day.
///
/// Used for sunrise/sunset times without the chrono dependency.
/// Values represent hours since midnight UTC (0 UT) for the calculation date:
/// - Negative values indicate the previous day
/// - 0.0 to < 24.0 indicates the current day
/// - ≥ 24.0 indicates the next day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursUtc(f64);

impl HoursUtc {
    /// Creates a new `HoursUtc` from hours since midnight UTC.
    ///
    /// Values can be negative (previous day) or ≥ 24.0 (next day).
    #[must_use]
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    /// Gets the raw hours value.
    ///
    /// Can be negative (previous day) or ≥ 24.0 (next day).
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.0
    }

    /// Gets the day offset and normalized hours (0.0 to < 24.0).
    ///
    /// # Returns
    /// Tuple of (`day_offset`, `hours_in_day`) where:
    /// - `day_offset`: whole days offset from the calculation date (negative = previous days, positive = following days)
    /// - `hours_in_day`: 0.0 to < 24.0
    ///
    /// # Example
    /// ```
    /// # use sunpos::types::HoursUtc;
    /// let time = HoursUtc::from_hours(25.5);
    /// let (day_offset, hours) = time.day_and_hours();
    /// assert_eq!(day_offset, 1);
    /// assert!((hours - 1.5).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn day_and_hours(&self) -> (i32, f64) {
        let hours = self.0;
        if !hours.is_finite() {
            return (0, hours);
        }

        let mut day_offset_raw = floor(hours / 24.0);
        let mut normalized_hours = hours - day_offset_raw * 24.0;

        if normalized_hours < 0.0 {
            normalized_hours += 24.0;
            day_offset_raw -= 1.0;
        } else if normalized_hours >= 24.0 {
            normalized_hours -= 24.0;
            day_offset_raw += 1.0;
        }

        let day_offset = if day_offset_raw >= f64::from(i32::MAX) {
            i32::MAX
        } else if day_offset_raw <= f64::from(i32::MIN) {
            i32::MIN
        } else {
            day_offset_raw as i32
        };

        (day_offset, normalized_hours)
    }
}

/// Result of sunrise/sunset calculations for a given day.
///
/// Solar events can vary significantly based on location and time of year,
/// especially at extreme latitudes where polar days and nights occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SunriseResult<T = ()> {
    /// Regular day with distinct sunrise, transit (noon), and sunset times
    RegularDay {
        /// Time of sunrise
        sunrise: T,
        /// Time of solar transit (when sun crosses meridian, solar noon)
        transit: T,
        /// Time of sunset
        sunset: T,
    },
    /// Polar day - sun remains above the specified horizon all day
    AllDay {
        /// Time of solar transit (closest approach to zenith)
        transit: T,
    },
    /// Polar night - sun remains below the specified horizon all day
    AllNight {
        /// Time of solar transit (when sun is highest, though still below horizon)
        transit: T,
    },
}

impl<T> SunriseResult<T> {
    /// Gets the transit time (solar noon) for any sunrise result.
    pub const fn transit(&self) -> &T {
        match self {
            Self::RegularDay { transit, .. }
            | Self::AllDay { transit }
            | Self::AllNight { transit } => transit,
        }
    }

    /// Checks if this represents a regular day with sunrise and sunset.
    pub const fn is_regular_day(&self) -> bool {
        matches!(self, Self::RegularDay { .. })
    }

    /// Checks if this represents a polar day (sun never sets).
    pub const fn is_polar_day(&self) -> bool {
        matches!(self, Self::AllDay { .. })
    }

    /// Checks if this represents a polar night (sun never rises).
    pub const fn is_polar_night(&self) -> bool {
        matches!(self, Self::AllNight { .. })
    }

    /// Gets sunrise time if this is a regular day.
    pub const fn sunrise(&self) -> Option<&T> {
        if let Self::RegularDay { sunrise, .. } = self {
            Some(sunrise)
        } else {
            None
        }
    }

    /// Gets sunset time if this is a regular day.
    pub const fn sunset(&self) -> Option<&T> {
        if let Self::RegularDay { sunset, .. } = self {
            Some(sunset)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_elevation_angles() {
        assert_eq!(Horizon::SunriseSunset.elevation_angle(), -0.83337);
        assert_eq!(Horizon::CivilTwilight.elevation_angle(), -6.0);
        assert_eq!(Horizon::NauticalTwilight.elevation_angle(), -12.0);
        assert_eq!(Horizon::AstronomicalTwilight.elevation_angle(), -18.0);

        let custom = Horizon::custom(-3.0).unwrap();
        assert_eq!(custom.elevation_angle(), -3.0);

        assert!(Horizon::custom(-95.0).is_err());
        assert!(Horizon::custom(95.0).is_err());
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_horizon_hash_normalizes_zero_sign() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Horizon::Custom(0.0));
        set.insert(Horizon::Custom(-0.0));

        assert_eq!(set.len(), 1, "hashing should treat +0.0 and -0.0 equally");
    }

    #[test]
    fn test_location_validation() {
        assert!(Location::new(39.742476, -105.1786, 1830.14).is_ok());
        assert!(Location::at_sea_level(0.0, 0.0).is_ok());

        assert!(Location::new(95.0, 0.0, 0.0).is_err());
        assert!(Location::new(0.0, 185.0, 0.0).is_err());
    }

    #[test]
    fn test_location_standard_pressure() {
        let sea_level = Location::at_sea_level(0.0, 0.0).unwrap();
        assert!((sea_level.standard_pressure() - 1013.25).abs() < 0.5);

        // Pressure decreases with altitude
        let golden = Location::new(39.742476, -105.1786, 1830.14).unwrap();
        assert!(golden.standard_pressure() < 850.0);
        assert!(golden.standard_pressure() > 750.0);
    }

    #[test]
    fn test_solar_position_creation() {
        let pos = SolarPosition::new(180.0, 45.0, 44.99, 3.5).unwrap();
        assert_eq!(pos.azimuth(), 180.0);
        assert_eq!(pos.zenith_angle(), 45.0);
        assert_eq!(pos.apparent_zenith_angle(), 44.99);
        assert_eq!(pos.elevation_angle(), 45.0);
        assert_eq!(pos.equation_of_time(), 3.5);
        assert!(pos.is_sun_up());
        assert!(!pos.is_sun_down());

        // Azimuth normalization
        let pos = SolarPosition::without_refraction(-90.0, 90.0, 0.0).unwrap();
        assert_eq!(pos.azimuth(), 270.0);
        assert_eq!(pos.elevation_angle(), 0.0);
        assert_eq!(pos.apparent_zenith_angle(), pos.zenith_angle());

        // Validation
        assert!(SolarPosition::new(0.0, -1.0, 0.0, 0.0).is_err());
        assert!(SolarPosition::new(0.0, 0.0, 181.0, 0.0).is_err());
        assert!(SolarPosition::new(0.0, 0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_solar_position_sun_state() {
        let above_horizon = SolarPosition::without_refraction(180.0, 30.0, 0.0).unwrap();
        assert!(above_horizon.is_sun_up());
        assert!(!above_horizon.is_sun_down());

        let on_horizon = SolarPosition::without_refraction(180.0, 90.0, 0.0).unwrap();
        assert!(!on_horizon.is_sun_up());
        assert!(on_horizon.is_sun_down());

        let below_horizon = SolarPosition::without_refraction(180.0, 120.0, 0.0).unwrap();
        assert!(below_horizon.is_sun_down());
    }

    #[test]
    fn test_refraction_correction() {
        let standard = RefractionCorrection::standard();
        assert_eq!(standard.pressure(), 1013.25);
        assert_eq!(standard.temperature(), 15.0);
        assert_eq!(standard.horizon_refraction(), 0.5667);
        assert!((standard.elevation_threshold() - -0.83337).abs() < 1e-9);

        let custom = RefractionCorrection::new(1000.0, 20.0).unwrap();
        assert_eq!(custom.pressure(), 1000.0);
        assert_eq!(custom.temperature(), 20.0);

        let explicit = RefractionCorrection::with_horizon_refraction(1000.0, 20.0, 0.6).unwrap();
        assert_eq!(explicit.horizon_refraction(), 0.6);

        // Validation
        assert!(RefractionCorrection::new(-1.0, 15.0).is_err());
        assert!(RefractionCorrection::new(1013.25, -300.0).is_err());
        assert!(RefractionCorrection::new(3000.0, 15.0).is_err());
        assert!(RefractionCorrection::with_horizon_refraction(1013.25, 15.0, -0.1).is_err());
    }

    #[test]
    fn test_refraction_for_location() {
        let golden = Location::new(39.742476, -105.1786, 1830.14).unwrap();
        let refraction = RefractionCorrection::for_location(&golden, 11.0).unwrap();
        assert!((refraction.pressure() - golden.standard_pressure()).abs() < 1e-12);
        assert_eq!(refraction.temperature(), 11.0);
    }

    #[test]
    fn test_hours_utc() {
        let (offset, hours) = HoursUtc::from_hours(6.5).day_and_hours();
        assert_eq!(offset, 0);
        assert!((hours - 6.5).abs() < 1e-10);

        let (offset, hours) = HoursUtc::from_hours(-0.5).day_and_hours();
        assert_eq!(offset, -1);
        assert!((hours - 23.5).abs() < 1e-10);

        let (offset, hours) = HoursUtc::from_hours(24.5).day_and_hours();
        assert_eq!(offset, 1);
        assert!((hours - 0.5).abs() < 1e-10);
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_sunrise_result_regular_day() {
        use chrono::{DateTime, Utc};

        let sunrise = "2023-06-21T05:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let transit = "2023-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let sunset = "2023-06-21T18:30:00Z".parse::<DateTime<Utc>>().unwrap();

        let result = SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        };

        assert!(result.is_regular_day());
        assert!(!result.is_polar_day());
        assert!(!result.is_polar_night());
        assert_eq!(result.transit(), &transit);
        assert_eq!(result.sunrise(), Some(&sunrise));
        assert_eq!(result.sunset(), Some(&sunset));
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_sunrise_result_polar_cases() {
        use chrono::{DateTime, Utc};

        let transit = "2023-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let all_day = SunriseResult::AllDay { transit };
        assert!(all_day.is_polar_day());
        assert_eq!(all_day.sunrise(), None);
        assert_eq!(all_day.sunset(), None);

        let all_night = SunriseResult::AllNight { transit };
        assert!(all_night.is_polar_night());
        assert_eq!(all_night.transit(), &transit);
    }
}
