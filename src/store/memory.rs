use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::store::{self, ShowingTour, TourId, TourStore, sort_newest_first};

/// Keeps tours in memory, used for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tours: Arc<RwLock<HashMap<TourId, ShowingTour>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.tours.read().map(|tours| tours.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> store::Error {
    store::Error::Io(std::io::Error::other("tour store lock poisoned"))
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn save(&self, tour: ShowingTour) -> Result<TourId, store::Error> {
        let mut tours = self.tours.write().map_err(poisoned)?;
        let previous = tour.id.and_then(|id| tours.get(&id));
        let tour = tour.prepare_save(previous, Utc::now())?;
        let id = tour.id.ok_or_else(|| store::Error::Invalid("missing id".into()))?;
        debug!("Saving tour {id} ({})", tour.name);
        tours.insert(id, tour);
        Ok(id)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<ShowingTour>, store::Error> {
        let tours = self.tours.read().map_err(poisoned)?;
        let mut owned: Vec<ShowingTour> = tours
            .values()
            .filter(|tour| &*tour.owner_id == owner_id)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    async fn get(&self, id: TourId) -> Result<ShowingTour, store::Error> {
        let tours = self.tours.read().map_err(poisoned)?;
        tours.get(&id).cloned().ok_or(store::Error::NotFound(id))
    }

    async fn delete(&self, id: TourId) -> Result<(), store::Error> {
        let mut tours = self.tours.write().map_err(poisoned)?;
        tours
            .remove(&id)
            .map(|_| ())
            .ok_or(store::Error::NotFound(id))
    }
}
