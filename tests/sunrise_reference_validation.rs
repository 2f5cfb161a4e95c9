//! Validate sunrise/transit/sunset times against USNO reference data.

use chrono::{DateTime, FixedOffset, Utc};
use sunpos::{spa, time::DeltaT, Horizon, SunriseResult};

/// Absolute difference between two timestamps in seconds.
fn time_difference_seconds<Tz: chrono::TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> i64 {
    (a.timestamp() - b.timestamp()).abs()
}

#[test]
fn validate_against_usno_reference_data() {
    // USNO reference times for the equatorial Atlantic point (0°, -35°)
    let test_cases = [
        // Format: (date, expected_sunrise, expected_sunset)
        (
            "1996-07-05T00:00:00Z",
            "1996-07-05T07:08:15Z",
            "1996-07-05T17:01:04Z",
        ),
        (
            "2004-12-04T00:00:00Z",
            "2004-12-04T04:38:57Z",
            "2004-12-04T19:02:02Z",
        ),
    ];
    const TOLERANCE_SECONDS: i64 = 60;

    for (date_str, expected_sunrise, expected_sunset) in test_cases {
        let date = date_str.parse::<DateTime<Utc>>().unwrap();
        let delta_t = DeltaT::estimate_from_date_like(date).unwrap();

        let result =
            spa::sunrise_sunset_for_horizon(date, 0.0, -35.0, delta_t, Horizon::SunriseSunset)
                .unwrap();

        let SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        } = result
        else {
            panic!("expected a regular day at the equator for {}", date_str);
        };

        let expected_sunrise = expected_sunrise.parse::<DateTime<Utc>>().unwrap();
        let expected_sunset = expected_sunset.parse::<DateTime<Utc>>().unwrap();

        println!(
            "{}: sunrise {} (expected {}), transit {}, sunset {} (expected {})",
            date_str, sunrise, expected_sunrise, transit, sunset, expected_sunset
        );

        assert!(
            time_difference_seconds(&sunrise, &expected_sunrise) <= TOLERANCE_SECONDS,
            "sunrise for {} differs by more than {} s",
            date_str,
            TOLERANCE_SECONDS
        );
        assert!(
            time_difference_seconds(&sunset, &expected_sunset) <= TOLERANCE_SECONDS,
            "sunset for {} differs by more than {} s",
            date_str,
            TOLERANCE_SECONDS
        );
        assert!(
            sunrise < transit && transit < sunset,
            "times must be ordered for {}",
            date_str
        );
    }
}

#[test]
fn test_golden_colorado_local_times() {
    // Golden, CO (39°, -105°) in local standard time (UTC-7)
    let mst = FixedOffset::west_opt(7 * 3600).unwrap();
    let test_cases = [
        (
            "2015-01-02T00:00:00-07:00",
            "2015-01-02T07:19:02-07:00",
            "2015-01-02T16:49:10-07:00",
        ),
        (
            "2015-08-02T00:00:00-07:00",
            "2015-08-02T05:01:26-07:00",
            "2015-08-02T19:11:31-07:00",
        ),
    ];

    for (date_str, expected_sunrise, expected_sunset) in test_cases {
        let date = date_str.parse::<DateTime<FixedOffset>>().unwrap();

        let result = spa::sunrise_sunset_for_horizon(
            date,
            39.0,
            -105.0,
            64.0,
            Horizon::SunriseSunset,
        )
        .unwrap();

        let SunriseResult::RegularDay {
            sunrise, sunset, ..
        } = result
        else {
            panic!("expected a regular day in Colorado for {}", date_str);
        };

        let expected_sunrise = expected_sunrise
            .parse::<DateTime<FixedOffset>>()
            .unwrap()
            .with_timezone(&mst);
        let expected_sunset = expected_sunset
            .parse::<DateTime<FixedOffset>>()
            .unwrap()
            .with_timezone(&mst);

        assert!(
            time_difference_seconds(&sunrise, &expected_sunrise) <= 60,
            "sunrise for {}: got {}, expected {}",
            date_str,
            sunrise,
            expected_sunrise
        );
        assert!(
            time_difference_seconds(&sunset, &expected_sunset) <= 60,
            "sunset for {}: got {}, expected {}",
            date_str,
            sunset,
            expected_sunset
        );
    }
}

#[test]
fn test_twilight_horizons_nest() {
    // Each deeper twilight horizon starts earlier and ends later
    let date = "2023-09-21T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let horizons = [
        Horizon::SunriseSunset,
        Horizon::CivilTwilight,
        Horizon::NauticalTwilight,
        Horizon::AstronomicalTwilight,
    ];

    let mut previous: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
    for horizon in horizons {
        let result =
            spa::sunrise_sunset_for_horizon(date, 48.21, 16.37, 69.0, horizon).unwrap();
        let SunriseResult::RegularDay {
            sunrise, sunset, ..
        } = result
        else {
            panic!("expected a regular day in Vienna at the equinox");
        };

        if let Some((prev_rise, prev_set)) = previous {
            assert!(sunrise < prev_rise, "start must move earlier: {:?}", horizon);
            assert!(sunset > prev_set, "end must move later: {:?}", horizon);
        }
        previous = Some((sunrise, sunset));
    }
}

#[test]
fn test_polar_day_and_night() {
    // Longyearbyen, Svalbard
    let midsummer = "2023-06-21T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let midwinter = "2023-12-21T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

    let summer =
        spa::sunrise_sunset_for_horizon(midsummer, 78.22, 15.65, 69.0, Horizon::SunriseSunset)
            .unwrap();
    assert!(summer.is_polar_day(), "midsummer above the arctic circle");

    let winter =
        spa::sunrise_sunset_for_horizon(midwinter, 78.22, 15.65, 69.0, Horizon::SunriseSunset)
            .unwrap();
    assert!(winter.is_polar_night(), "midwinter above the arctic circle");

    // The transit is reported even without a sunrise
    assert!(summer.transit().date_naive() == midsummer.date_naive());
}
