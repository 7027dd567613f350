use showings::shared::geo::{Coordinate, Distance};

#[test]
fn distance_test() {
    let coord_a = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };

    let coord_b = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = coord_a.euclidean_distance(&coord_b);
    assert!((d.as_kilometers() - 343.0).abs() < 5.0);
}

#[test]
fn network_distance_is_longer() {
    let coord_a = Coordinate::from((40.7033, -74.0170));
    let coord_b = Coordinate::from((40.7812, -73.9665));
    let straight = coord_a.euclidean_distance(&coord_b);
    let road = coord_a.network_distance(&coord_b);
    assert!(road > straight);
    assert!((road.as_meters() / straight.as_meters() - 1.3).abs() < 1e-9);
}

#[test]
fn distance_sum_test() {
    let total: Distance = [1.0, 2.5, 0.5]
        .into_iter()
        .map(Distance::from_kilometers)
        .sum();
    assert_eq!(total, Distance::from_meters(4000.0));
}
