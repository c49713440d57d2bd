//! Nearest-station query tests: empty set, singleton, tie-break,
//! offline fallback synthesis.

use shelter_core::{
    geo::{Coordinate, StaticPoint},
    proximity::{fallback_stations, nearest_to},
};

fn chennai() -> Coordinate {
    Coordinate::new(13.0827, 80.2707)
}

#[test]
fn empty_candidate_set_returns_none() {
    assert!(nearest_to(&chennai(), &[]).is_none());
}

#[test]
fn singleton_candidate_is_returned_with_its_distance() {
    let station = StaticPoint::new("Central", Coordinate::new(13.09, 80.28));
    let candidates = vec![station.clone()];

    let result = nearest_to(&chennai(), &candidates).expect("one candidate must win");
    assert_eq!(result.point, &station);

    let expected = chennai().distance_to(&station.position);
    assert!(
        (result.distance_m - expected).abs() < 1e-9,
        "Distance mismatch: {} vs {expected}", result.distance_m
    );
}

#[test]
fn closest_of_several_candidates_wins() {
    let candidates = vec![
        StaticPoint::new("Far", Coordinate::new(13.20, 80.40)),
        StaticPoint::new("Near", Coordinate::new(13.0830, 80.2710)),
        StaticPoint::new("Mid", Coordinate::new(13.10, 80.30)),
    ];

    let result = nearest_to(&chennai(), &candidates).unwrap();
    assert_eq!(result.point.label, "Near");
}

#[test]
fn tie_break_keeps_the_first_candidate() {
    // Two stations mirrored across the query latitude: identical
    // distances, so ordering must decide.
    let query = Coordinate::new(13.0, 80.0);
    let candidates = vec![
        StaticPoint::new("First", Coordinate::new(13.01, 80.0)),
        StaticPoint::new("Second", Coordinate::new(12.99, 80.0)),
    ];

    let d1 = query.distance_to(&candidates[0].position);
    let d2 = query.distance_to(&candidates[1].position);
    assert!((d1 - d2).abs() < 1e-6, "Test setup: candidates must be equidistant");

    let result = nearest_to(&query, &candidates).unwrap();
    assert_eq!(
        result.point.label, "First",
        "Tie must go to the first candidate in input order"
    );
}

#[test]
fn nearest_is_stable_across_repeated_calls() {
    let candidates = vec![
        StaticPoint::new("A", Coordinate::new(13.09, 80.27)),
        StaticPoint::new("B", Coordinate::new(13.08, 80.28)),
    ];
    let first = nearest_to(&chennai(), &candidates).unwrap();
    for _ in 0..10 {
        let again = nearest_to(&chennai(), &candidates).unwrap();
        assert_eq!(again.point.label, first.point.label);
        assert_eq!(again.distance_m, first.distance_m);
    }
}

#[test]
fn fallback_stations_surround_the_center() {
    let stations = fallback_stations(&chennai());
    assert!(!stations.is_empty(), "Offline fallback must synthesize stations");

    for station in &stations {
        let d = chennai().distance_to(&station.position);
        assert!(
            d > 0.0 && d < 2_000.0,
            "Fallback station {} is {d} m out — expected within ~2 km",
            station.label
        );
    }

    // And the query over them behaves like any other candidate set.
    let result = nearest_to(&chennai(), &stations).unwrap();
    assert!(result.distance_m > 0.0);
}

#[test]
fn haversine_matches_a_known_city_scale_distance() {
    // Chennai Central to Chennai Airport is roughly 15.5 km
    // great-circle; accept a generous band.
    let central = Coordinate::new(13.0827, 80.2707);
    let airport = Coordinate::new(12.9941, 80.1709);
    let d = central.distance_to(&airport);
    assert!(
        (14_000.0..17_000.0).contains(&d),
        "Central→Airport distance {d} m outside the expected band"
    );
}
