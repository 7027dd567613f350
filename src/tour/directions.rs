use crate::{shared::geo::Coordinate, travel::TravelMode};

const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
// Encoded `|`
const WAYPOINT_SEPARATOR: &str = "%7C";

/// Link that opens the tour, in order, in Google Maps.
pub fn directions_url(coordinates: &[Coordinate], mode: TravelMode) -> Option<String> {
    let (last, rest) = coordinates.split_last()?;
    let mut url = String::from(MAPS_DIRECTIONS_URL);
    if let Some((first, waypoints)) = rest.split_first() {
        url.push_str(&format!("&origin={first}"));
        if !waypoints.is_empty() {
            let waypoints: Vec<String> = waypoints.iter().map(|c| c.to_string()).collect();
            url.push_str("&waypoints=");
            url.push_str(&waypoints.join(WAYPOINT_SEPARATOR));
        }
    }
    url.push_str(&format!("&destination={last}&travelmode={mode}"));
    Some(url)
}

#[test]
fn no_stops_no_url() {
    assert_eq!(directions_url(&[], TravelMode::Driving), None);
}

#[test]
fn single_stop_is_destination_only() {
    let url = directions_url(&[Coordinate::from((1.5, 2.0))], TravelMode::Driving).unwrap();
    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&destination=1.5,2&travelmode=driving"
    );
}

#[test]
fn waypoints_keep_order() {
    let coordinates = [
        Coordinate::from((1.0, 1.0)),
        Coordinate::from((2.0, 2.0)),
        Coordinate::from((3.0, 3.0)),
        Coordinate::from((4.0, 4.0)),
    ];
    let url = directions_url(&coordinates, TravelMode::Walking).unwrap();
    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&origin=1,1&waypoints=2,2%7C3,3&destination=4,4&travelmode=walking"
    );
}
