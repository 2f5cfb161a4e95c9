//! Validate the SPA implementation against the published NREL example case.
//!
//! Reda & Andreas (2003) work through one fully-specified observation:
//! Golden, Colorado on 2003-10-17 at 12:30:30 local (MST, UTC-7). The paper
//! lists the expected outputs to six decimal places, which pins down every
//! intermediate step of the algorithm at once.

use chrono::{DateTime, Utc};
use sunpos::{spa, Location, RefractionCorrection};

const LATITUDE: f64 = 39.742476;
const LONGITUDE: f64 = -105.1786;
const ELEVATION: f64 = 1830.14;
const DELTA_T: f64 = 67.0;

fn golden_datetime() -> DateTime<Utc> {
    "2003-10-17T19:30:30Z".parse().unwrap()
}

#[test]
fn test_golden_reference_case() {
    let position = spa::solar_position(
        golden_datetime(),
        LATITUDE,
        LONGITUDE,
        ELEVATION,
        DELTA_T,
        Some(RefractionCorrection::new(820.0, 11.0).unwrap()),
    )
    .unwrap();

    println!(
        "Golden, CO 2003-10-17T19:30:30Z: azimuth {:.6}°, zenith {:.6}°, apparent zenith {:.6}°, EoT {:.5} min",
        position.azimuth(),
        position.zenith_angle(),
        position.apparent_zenith_angle(),
        position.equation_of_time()
    );

    assert!(
        (position.apparent_zenith_angle() - 50.111622).abs() < 1e-4,
        "apparent zenith {:.6}° should be 50.111622°",
        position.apparent_zenith_angle()
    );
    assert!(
        (position.zenith_angle() - 50.12795).abs() < 1e-4,
        "true zenith {:.6}° should be 50.12795°",
        position.zenith_angle()
    );
    assert!(
        (position.azimuth() - 194.340241).abs() < 1e-4,
        "azimuth {:.6}° should be 194.340241°",
        position.azimuth()
    );
    assert!(
        (position.elevation_angle() - 39.872046).abs() < 1e-4,
        "elevation {:.6}° should be 39.872046°",
        position.elevation_angle()
    );
    assert!(
        (position.apparent_elevation_angle() - 39.888378).abs() < 1e-4,
        "apparent elevation {:.6}° should be 39.888378°",
        position.apparent_elevation_angle()
    );
    assert!(
        (position.equation_of_time() - 14.64151).abs() < 1e-3,
        "equation of time {:.5} min should be 14.64151 min",
        position.equation_of_time()
    );
}

#[test]
fn test_pressure_only_shifts_apparent_angles() {
    // At 900 hPa the refraction is weaker; true angles must not move
    let baseline = spa::solar_position(
        golden_datetime(),
        LATITUDE,
        LONGITUDE,
        ELEVATION,
        DELTA_T,
        Some(RefractionCorrection::new(820.0, 11.0).unwrap()),
    )
    .unwrap();
    let at_900 = spa::solar_position(
        golden_datetime(),
        LATITUDE,
        LONGITUDE,
        ELEVATION,
        DELTA_T,
        Some(RefractionCorrection::new(900.0, 11.0).unwrap()),
    )
    .unwrap();

    assert!((at_900.apparent_elevation_angle() - 39.88997).abs() < 1e-4);
    assert!((at_900.apparent_zenith_angle() - 50.11003).abs() < 1e-4);

    assert_eq!(baseline.zenith_angle(), at_900.zenith_angle());
    assert_eq!(baseline.azimuth(), at_900.azimuth());
    assert_eq!(baseline.equation_of_time(), at_900.equation_of_time());
}

#[test]
fn test_location_pressure_from_altitude() {
    // Deriving pressure from a 2000 m standard atmosphere instead of a
    // measured barometer changes only the refraction term
    let location = Location::new(LATITUDE, LONGITUDE, 2000.0).unwrap();
    let refraction = RefractionCorrection::for_location(&location, 11.0).unwrap();

    let position = spa::solar_position(
        golden_datetime(),
        location.latitude(),
        location.longitude(),
        location.altitude(),
        DELTA_T,
        Some(refraction),
    )
    .unwrap();

    println!(
        "2000 m standard atmosphere: {:.3} hPa, apparent elevation {:.6}°",
        location.standard_pressure(),
        position.apparent_elevation_angle()
    );

    assert!((position.apparent_elevation_angle() - 39.88788).abs() < 1e-4);
    assert!((position.apparent_zenith_angle() - 50.11212).abs() < 1e-4);
}
