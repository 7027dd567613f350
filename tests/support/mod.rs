#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use showings::{
    prelude::*,
    travel::{self, TravelMode},
};

/// Stop `i` (1 based) sits at latitude `i`, so the leg into it can be looked
/// up by the destination alone no matter which order the legs are asked in.
pub fn stop(i: usize) -> Stop {
    Stop::new(
        &format!("stop-{i}"),
        &format!("{i} Main St"),
        Coordinate::from((i as f64, 0.0)),
    )
}

pub fn stops(n: usize) -> Vec<Stop> {
    (1..=n).map(stop).collect()
}

#[derive(Default)]
pub struct LegTable {
    legs: HashMap<usize, u32>,
    failing: Vec<usize>,
    calls: AtomicUsize,
}

impl LegTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Minutes to drive into stop `to`.
    pub fn leg(mut self, to: usize, minutes: u32) -> Self {
        self.legs.insert(to, minutes);
        self
    }

    pub fn failing(mut self, to: usize) -> Self {
        self.failing.push(to);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TravelTimeProvider for LegTable {
    fn travel_time(
        &self,
        _origin: &Coordinate,
        destination: &Coordinate,
        _mode: TravelMode,
    ) -> Result<TravelEstimate, travel::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let to = destination.latitude as usize;
        if self.failing.contains(&to) {
            return Err(travel::Error::Unavailable(format!("no route to stop {to}")));
        }
        let minutes = self
            .legs
            .get(&to)
            .copied()
            .ok_or_else(|| travel::Error::Unavailable(format!("unknown leg to {to}")))?;
        Ok(TravelEstimate::new(
            Duration::from_minutes(minutes),
            Distance::from_kilometers(minutes as f64 / 2.0),
        ))
    }
}
