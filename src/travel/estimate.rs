use crate::{
    shared::{
        geo::{Coordinate, Distance},
        time::Duration,
    },
    travel::{self, TravelEstimate, TravelMode, TravelTimeProvider},
};

/// Offline provider, road distance over an average speed per mode.
/// Good enough for drafting a tour without a directions API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTravel;

impl EstimatedTravel {
    pub fn new() -> Self {
        Self
    }
}

impl TravelTimeProvider for EstimatedTravel {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, travel::Error> {
        if !origin.is_valid() {
            return Err(travel::Error::InvalidCoordinate(*origin));
        }
        if !destination.is_valid() {
            return Err(travel::Error::InvalidCoordinate(*destination));
        }
        let distance = origin.network_distance(destination);
        Ok(TravelEstimate::new(time_to_travel(&distance, mode), distance))
    }
}

/// km/h
pub const fn average_speed(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Driving => 40.0,
        TravelMode::Transit => 25.0,
        TravelMode::Bicycling => 15.0,
        TravelMode::Walking => 5.4,
    }
}

pub fn time_to_travel(distance: &Distance, mode: TravelMode) -> Duration {
    let hours = distance.as_kilometers() / average_speed(mode);
    Duration::from_seconds_ceil((hours * 3600.0).ceil() as u64)
}

#[test]
fn same_place_is_zero() {
    let coordinate = Coordinate::from((40.7128, -74.0060));
    let estimate = EstimatedTravel
        .travel_time(&coordinate, &coordinate, TravelMode::Driving)
        .unwrap();
    assert_eq!(estimate.duration, Duration::ZERO);
}

#[test]
fn ten_km_drive() {
    // 40 km/h -> 15 minutes
    assert_eq!(
        time_to_travel(&Distance::from_kilometers(10.0), TravelMode::Driving),
        Duration::from_minutes(15)
    );
}

#[test]
fn walking_is_slower_than_driving() {
    let distance = Distance::from_kilometers(3.0);
    assert!(
        time_to_travel(&distance, TravelMode::Walking)
            > time_to_travel(&distance, TravelMode::Driving)
    );
}
