pub mod booking;
pub mod directions;
pub mod scheduler;

pub use booking::*;
pub use directions::*;
pub use scheduler::*;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    shared::{
        geo::{Coordinate, Distance},
        time::{Duration, MINUTES_PER_DAY, Time},
    },
    travel::{self, TravelMode},
};

/// Default showing lengths a tour can be configured with, in minutes.
pub const SHOWING_DURATION_OPTIONS: [u32; 6] = [15, 30, 45, 60, 90, 120];
pub const DEFAULT_SHOWING_DURATION: Duration = Duration::from_minutes(30);
/// Longest showing a single stop may ask for.
pub const MAX_SHOWING_DURATION: Duration = Duration::from_minutes(MINUTES_PER_DAY);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("A tour needs at least one stop")]
    NoStops,
    #[error("Stop {0} has no coordinate and cannot be scheduled")]
    MissingCoordinate(Arc<str>),
    #[error("Stop {0} has an invalid coordinate")]
    InvalidCoordinate(Arc<str>),
    #[error("Stop {0} has a showing duration of zero minutes")]
    NonPositiveDuration(Arc<str>),
    #[error("Stop {0} has a showing duration longer than a day")]
    ShowingTooLong(Arc<str>),
    #[error("The tour runs past the last representable time")]
    TourTooLong,
    #[error("A default showing duration of {0} minutes is not supported")]
    UnsupportedDefaultDuration(u32),
    #[error("End time {end} is not after start time {start}")]
    InvalidWindow { start: Time, end: Time },
    #[error("Time {0} is not within the showing day")]
    OutsideDay(Time),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid tour: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("Travel time unavailable from stop {from} to stop {to}: {source}")]
    TravelTimeUnavailable {
        from: Arc<str>,
        to: Arc<str>,
        #[source]
        source: travel::Error,
    },
}

impl Error {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// A property to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: Arc<str>,
    pub address: Arc<str>,
    pub coordinate: Option<Coordinate>,
    /// Overrides the tour default when set.
    pub showing_duration: Option<Duration>,
}

impl Stop {
    pub fn new(id: &str, address: &str, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            coordinate: Some(coordinate),
            showing_duration: None,
        }
    }

    pub fn with_showing_duration(mut self, duration: Duration) -> Self {
        self.showing_duration = Some(duration);
        self
    }

    pub fn showing_duration_or(&self, default: Duration) -> Duration {
        self.showing_duration.unwrap_or(default)
    }
}

/// When to offer appointments to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    OnTheHour,
    OnTheHalfHour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourConfig {
    pub start_time: Time,
    pub end_time: Time,
    pub default_showing_duration: Duration,
    pub granularity: Granularity,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub showing_date: Option<NaiveDate>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            start_time: Time::from_hm(9, 0),
            end_time: Time::from_hm(17, 0),
            default_showing_duration: DEFAULT_SHOWING_DURATION,
            granularity: Granularity::default(),
            travel_mode: TravelMode::default(),
            showing_date: None,
            name: String::new(),
            description: String::new(),
        }
    }
}

impl TourConfig {
    pub fn new(start_time: Time, end_time: Time) -> Self {
        Self {
            start_time,
            end_time,
            ..Default::default()
        }
    }

    pub fn with_default_showing_duration(mut self, duration: Duration) -> Self {
        self.default_showing_duration = duration;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }

    pub fn with_showing_date(mut self, date: NaiveDate) -> Self {
        self.showing_date = Some(date);
        self
    }

    /// Minutes between start and end, `None` for an inverted window.
    pub fn window(&self) -> Option<Duration> {
        self.end_time
            .checked_since(self.start_time)
            .filter(|window| !window.is_zero())
    }

    pub fn validate(&self) -> Result<Duration, InvalidInput> {
        if !self.start_time.is_same_day() {
            return Err(InvalidInput::OutsideDay(self.start_time));
        }
        if !self.end_time.is_same_day() {
            return Err(InvalidInput::OutsideDay(self.end_time));
        }
        let minutes = self.default_showing_duration.as_minutes();
        if !SHOWING_DURATION_OPTIONS.contains(&minutes) {
            return Err(InvalidInput::UnsupportedDefaultDuration(minutes));
        }
        self.window().ok_or(InvalidInput::InvalidWindow {
            start: self.start_time,
            end: self.end_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    Showing {
        stop: Stop,
        /// Rounded time to offer the client, never used for the timeline itself.
        booking_time: Time,
    },
    Travel {
        from: Arc<str>,
        to: Arc<str>,
        distance: Distance,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    #[serde(flatten)]
    pub kind: ItemKind,
    pub start_offset: Duration,
    pub duration: Duration,
    pub start_time: Time,
    pub end_time: Time,
}

impl ScheduleItem {
    pub fn is_showing(&self) -> bool {
        matches!(self.kind, ItemKind::Showing { .. })
    }

    pub fn is_travel(&self) -> bool {
        matches!(self.kind, ItemKind::Travel { .. })
    }

    pub fn end_offset(&self) -> Duration {
        self.start_offset + self.duration
    }

    pub fn stop(&self) -> Option<&Stop> {
        match &self.kind {
            ItemKind::Showing { stop, .. } => Some(stop),
            ItemKind::Travel { .. } => None,
        }
    }

    pub fn booking_time(&self) -> Option<Time> {
        match &self.kind {
            ItemKind::Showing { booking_time, .. } => Some(*booking_time),
            ItemKind::Travel { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSchedule {
    pub items: Vec<ScheduleItem>,
    pub start_time: Time,
    pub end_time: Time,
    pub window: Duration,
    pub total_duration: Duration,
    pub total_drive_time: Duration,
    pub total_showing_time: Duration,
    pub total_distance: Distance,
    pub can_fit_in_window: bool,
    /// How far past the window the tour runs, zero when it fits.
    pub overrun: Duration,
    pub directions_url: Option<String>,
}

impl TourSchedule {
    pub fn showings(&self) -> impl Iterator<Item = &ScheduleItem> {
        self.items.iter().filter(|item| item.is_showing())
    }

    pub fn legs(&self) -> impl Iterator<Item = &ScheduleItem> {
        self.items.iter().filter(|item| item.is_travel())
    }
}
