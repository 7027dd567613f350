mod cached;
mod estimate;

pub use cached::*;
pub use estimate::*;

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{
    geo::{Coordinate, Distance},
    time::Duration,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No travel time available: {0}")]
    Unavailable(String),
    #[error("Coordinate {0} is not a valid location")]
    InvalidCoordinate(Coordinate),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer for a single leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub duration: Duration,
    pub distance: Distance,
}

impl TravelEstimate {
    pub const fn new(duration: Duration, distance: Distance) -> Self {
        Self { duration, distance }
    }
}

/// Source of door to door travel times.
///
/// Implementations either return a real answer or fail, callers never get a
/// made up zero for a leg that could not be resolved. Retries and caching are
/// the implementation's business.
pub trait TravelTimeProvider: Send + Sync {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, self::Error>;
}

impl<P: TravelTimeProvider + ?Sized> TravelTimeProvider for &P {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, self::Error> {
        (**self).travel_time(origin, destination, mode)
    }
}

impl<P: TravelTimeProvider + ?Sized> TravelTimeProvider for std::sync::Arc<P> {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, self::Error> {
        (**self).travel_time(origin, destination, mode)
    }
}

impl<P: TravelTimeProvider + ?Sized> TravelTimeProvider for Box<P> {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, self::Error> {
        (**self).travel_time(origin, destination, mode)
    }
}
