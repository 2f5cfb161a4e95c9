//! # Solar Position Suite
//!
//! Solar position numerics: zenith, azimuth, elevation, equation of time, sunrise/sunset
//! and earth-sun distance, with several interchangeable algorithms behind one calling
//! convention.
//!
//! Three algorithms are provided:
//! - **SPA** (Solar Position Algorithm): NREL's authoritative algorithm (±0.0003°, years -2000 to 6000)
//! - **Grena3**: Simplified algorithm (±0.01°, years 2010-2110, ~10x faster)
//! - **Ephemeris**: Low-precision ephemeris after Hughes (~0.05°), as used in irradiance modelling
//!
//! All three return the same [`SolarPosition`] record: azimuth, true and
//! refraction-corrected zenith, and the equation of time. Algorithms can be selected
//! at runtime by name through [`get_solar_position`], and [`search::calc_time`]
//! inverts the calculation to find the time of a given solar angle. An estimator
//! for Delta T (ΔT) based on the work of F. Espenak & J. Meeus is included.
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions (usually faster than `libm`)
//! - `chrono` (default): Enable `DateTime<Tz>` based convenience API, dispatch and search
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono (most convenient)
//! sunpos = "0.1"
//!
//! # Minimal std (no chrono, smallest dependency tree)
//! sunpos = { version = "0.1", default-features = false, features = ["std"] }
//!
//! # Minimal no_std (pure numeric API)
//! sunpos = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## References
//!
//! - Reda, I.; Andreas, A. (2003). Solar position algorithm for solar radiation applications.
//!   Solar Energy, 76(5), 577-589. DOI: <http://dx.doi.org/10.1016/j.solener.2003.12.003>
//! - Grena, R. (2012). Five new algorithms for the computation of sun position from 2010 to 2110.
//!   Solar Energy, 86(5), 1323-1337. DOI: <http://dx.doi.org/10.1016/j.solener.2012.01.024>
//! - Hughes, D. W.; Yallop, B. D.; Hohenkerk, C. Y. (1989). The Equation of Time.
//!   Monthly Notices of the Royal Astronomical Society, 238, 1529-1535.
//!
//! ## Quick Start
//!
//! ### Solar Position (with chrono)
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use sunpos::{get_solar_position, Method, RefractionCorrection};
//! use chrono::{DateTime, FixedOffset};
//!
//! // Calculate sun position for Vienna at noon
//! let datetime = "2026-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let position = get_solar_position(
//!     "nrel".parse::<Method>().unwrap(),
//!     datetime,
//!     48.21,   // Vienna latitude
//!     16.37,   // Vienna longitude
//!     190.0,   // elevation (meters)
//!     None,    // estimate ΔT from the date
//!     Some(RefractionCorrection::standard())
//! ).unwrap();
//!
//! println!("Azimuth: {:.3}°", position.azimuth());
//! println!("Apparent elevation: {:.3}°", position.apparent_elevation_angle());
//! println!("Equation of time: {:.2} min", position.equation_of_time());
//! # }
//! ```
//!
//! ### Solar Position (numeric API, no chrono)
//! ```rust
//! use sunpos::{spa, time::JulianDate, RefractionCorrection};
//!
//! // Julian date from UTC components (2026-06-21 12:00:00 UTC + 69s ΔT)
//! let jd = JulianDate::from_utc(2026, 6, 21, 12, 0, 0.0, 69.0).unwrap();
//!
//! // Works in both std and no_std
//! let position = spa::solar_position_from_julian(
//!     jd,
//!     48.21,
//!     16.37,
//!     190.0,
//!     Some(RefractionCorrection::standard())
//! ).unwrap();
//!
//! println!("Azimuth: {:.3}°", position.azimuth());
//! ```
//!
//! ### Sunrise and Sunset (requires chrono)
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use sunpos::{spa, Horizon, time::DeltaT};
//! use chrono::{DateTime, FixedOffset};
//!
//! let date = "2026-06-21T00:00:00-07:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let result = spa::sunrise_sunset_for_horizon(
//!     date,
//!     37.7749,  // San Francisco latitude
//!     -122.4194, // San Francisco longitude
//!     DeltaT::estimate_from_date_like(date).unwrap(),
//!     Horizon::SunriseSunset
//! ).unwrap();
//!
//! match result {
//!     sunpos::SunriseResult::RegularDay { sunrise, transit, sunset } => {
//!         println!("Sunrise: {}", sunrise);
//!         println!("Solar noon: {}", transit);
//!         println!("Sunset: {}", sunset);
//!     }
//!     _ => println!("No sunrise/sunset (polar day/night)"),
//! }
//! # }
//! ```
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Zenith angle**: 0° = directly overhead (zenith), 90° = horizon (0° to 180°)
//! - **Elevation angle**: 0° = horizon, 90° = directly overhead (-90° to +90°)

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
#[cfg(feature = "chrono")]
pub use crate::dispatch::{get_solar_position, Method};
#[cfg(feature = "chrono")]
pub use crate::search::{calc_time, SolarAngle};
#[cfg(feature = "chrono")]
pub use crate::spa::spa_time_dependent_parts;
pub use crate::spa::{spa_with_time_dependent_parts, SpaTimeDependent};
pub use crate::types::{
    Horizon, HoursUtc, Location, RefractionCorrection, SolarPosition, SunriseResult,
};

// Algorithm modules
pub mod ephemeris;
#[cfg(feature = "chrono")]
pub mod grena3;
pub mod spa;

// Selection and search
#[cfg(feature = "chrono")]
pub mod dispatch;
#[cfg(feature = "chrono")]
pub mod search;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
