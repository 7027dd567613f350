use serde::{Deserialize, Serialize};
use showings::{
    shared::{geo::Coordinate, time::Duration},
    tour::Stop,
};

/// A property as the dashboard sends it, coordinates come from the listing
/// and may be missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: String,
    #[serde(default)]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Minutes, overrides the tour default.
    #[serde(default)]
    pub showing_duration: Option<u32>,
}

impl From<PropertyDto> for Stop {
    fn from(value: PropertyDto) -> Self {
        let coordinate = match (value.latitude, value.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            id: value.id.into(),
            address: value.address.into(),
            coordinate,
            showing_duration: value.showing_duration.map(Duration::from_minutes),
        }
    }
}

impl From<&Stop> for PropertyDto {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            address: stop.address.to_string(),
            latitude: stop.coordinate.map(|coordinate| coordinate.latitude),
            longitude: stop.coordinate.map(|coordinate| coordinate.longitude),
            showing_duration: stop.showing_duration.map(|duration| duration.as_minutes()),
        }
    }
}

pub fn to_stops(properties: Vec<PropertyDto>) -> Vec<Stop> {
    properties.into_iter().map(Stop::from).collect()
}
