use std::{
    collections::{HashMap, VecDeque},
    sync::RwLock,
};

use tracing::{debug, trace};

use crate::{
    shared::geo::Coordinate,
    travel::{self, TravelEstimate, TravelMode, TravelTimeProvider},
};

/// Legs kept by [`CachedTravel::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

type LegKey = ((u64, u64), (u64, u64), TravelMode);

#[derive(Debug, Default)]
struct LegCache {
    legs: HashMap<LegKey, TravelEstimate>,
    // Insertion order, oldest first
    order: VecDeque<LegKey>,
}

impl LegCache {
    fn insert(&mut self, key: LegKey, estimate: TravelEstimate, capacity: usize) {
        if self.legs.insert(key, estimate).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.legs.len() > capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.legs.remove(&oldest);
        }
    }
}

/// Remembers up to `capacity` legs the inner provider managed to resolve,
/// dropping the oldest once full.
/// Failed lookups are not stored, the next call asks again.
#[derive(Debug)]
pub struct CachedTravel<P> {
    inner: P,
    capacity: usize,
    cache: RwLock<LegCache>,
}

impl<P: TravelTimeProvider> CachedTravel<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            capacity: DEFAULT_CACHE_CAPACITY,
            cache: Default::default(),
        }
    }

    /// A capacity of zero turns caching off.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cache
            .read()
            .map(|cache| cache.legs.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.legs.clear();
            cache.order.clear();
        }
    }
}

impl<P: TravelTimeProvider> TravelTimeProvider for CachedTravel<P> {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, travel::Error> {
        let key = (origin.key(), destination.key(), mode);
        if let Ok(cache) = self.cache.read()
            && let Some(estimate) = cache.legs.get(&key)
        {
            trace!("Cache hit {origin} -> {destination} ({mode})");
            return Ok(*estimate);
        }

        let estimate = self.inner.travel_time(origin, destination, mode)?;
        if self.capacity > 0
            && let Ok(mut cache) = self.cache.write()
        {
            cache.insert(key, estimate, self.capacity);
            if cache.legs.len() == self.capacity {
                debug!("Leg cache is full ({} legs)", self.capacity);
            }
        }
        Ok(estimate)
    }
}
