//! Validate the earth-sun distance against NREL SPA reference values.

use chrono::{DateTime, Utc};
use sunpos::spa;

#[test]
fn validate_against_nrel_reference_data() {
    // NREL SPA reference output, deltaT=64
    let test_cases = [
        // Format: (datetime, expected distance in AU)
        ("2015-01-02T07:00:00Z", 0.983289204601),
        ("2015-08-02T07:00:00Z", 1.01486146446),
    ];

    for (datetime_str, expected_au) in test_cases {
        let datetime = datetime_str.parse::<DateTime<Utc>>().unwrap();
        let distance = spa::earth_sun_distance(datetime, 64.0).unwrap();

        println!(
            "{}: {:.9} AU (expected {:.9} AU)",
            datetime_str, distance, expected_au
        );

        assert!(
            (distance - expected_au).abs() < 1e-4,
            "distance {:.9} AU deviates from reference {:.9} AU for {}",
            distance,
            expected_au,
            datetime_str
        );
    }
}

#[test]
fn test_perihelion_aphelion_ordering() {
    let january = "2023-01-04T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let july = "2023-07-04T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

    let near = spa::earth_sun_distance(january, 69.0).unwrap();
    let far = spa::earth_sun_distance(july, 69.0).unwrap();

    // Orbital eccentricity keeps the distance within about 1.7% of 1 AU
    assert!(near > 0.98 && near < 0.99, "perihelion distance {near}");
    assert!(far > 1.01 && far < 1.02, "aphelion distance {far}");
    assert!(near < far);
}
