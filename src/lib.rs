//! Scheduling engine for property showing tours.
//!
//! Give it the stops of a tour in the order the realtor wants to visit them
//! and a time window, it resolves the drive between every pair of
//! consecutive stops, lays showings and drives out back to back and tells you
//! whether the tour fits the window. Every showing also gets a rounded
//! booking time that can be offered to clients.
//!
//! ```no_run
//! use showings::prelude::*;
//!
//! let stops = vec![
//!     Stop::new("mls-1", "12 Oak St", Coordinate::from((40.7128, -74.0060))),
//!     Stop::new("mls-2", "4 Elm Ave", Coordinate::from((40.7306, -73.9866))),
//! ];
//! let config = TourConfig::new(Time::from_hm(9, 0), Time::from_hm(11, 0));
//! let schedule = TourScheduler::new(EstimatedTravel::new())
//!     .compute_schedule(&stops, &config)
//!     .unwrap();
//! println!("Fits: {}", schedule.can_fit_in_window);
//! ```

pub mod shared;
pub mod store;
pub mod tour;
pub mod travel;

pub mod prelude {
    pub use crate::shared::{
        geo::{Coordinate, Distance},
        time::{Duration, Time},
    };
    pub use crate::store::{MemoryStore, ShowingTour, TourId, TourStore};
    pub use crate::tour::{
        Granularity, ItemKind, ScheduleItem, Stop, TourConfig, TourSchedule, TourScheduler,
        directions_url, round_for_booking,
    };
    pub use crate::travel::{
        CachedTravel, EstimatedTravel, TravelEstimate, TravelMode, TravelTimeProvider,
    };
}
