//! Saved showing tours.
//!
//! The scheduler never talks to a store, the surrounding application saves a
//! tour once the user asks for it. Stores are last write wins.

mod memory;

pub use memory::*;

use std::{io, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::tour::{Stop, TourConfig, TourSchedule};

pub type TourId = Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tour {0} not found")]
    NotFound(TourId),
    #[error("Tour {0} belongs to another owner")]
    OwnerMismatch(TourId),
    #[error("Invalid tour: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// A named set of stops and settings, with the last schedule computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowingTour {
    pub id: Option<TourId>,
    pub owner_id: Arc<str>,
    pub name: String,
    pub description: String,
    pub stops: Vec<Stop>,
    pub config: TourConfig,
    /// Cached for display, the stops and config are the source of truth.
    pub schedule: Option<TourSchedule>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ShowingTour {
    pub fn new(owner_id: &str, name: &str, stops: Vec<Stop>, config: TourConfig) -> Self {
        Self {
            id: None,
            owner_id: owner_id.into(),
            name: name.to_string(),
            description: String::new(),
            stops,
            config,
            schedule: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_schedule(mut self, schedule: TourSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn validate(&self) -> Result<(), self::Error> {
        if self.owner_id.trim().is_empty() {
            return Err(Error::Invalid("owner is required".into()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Invalid("name is required".into()));
        }
        if self.stops.is_empty() {
            return Err(Error::Invalid("a tour needs at least one stop".into()));
        }
        Ok(())
    }

    /// Fills in the id and timestamps for a save. `previous` is the stored
    /// version of the same tour, if there is one.
    pub fn prepare_save(
        mut self,
        previous: Option<&ShowingTour>,
        now: DateTime<Utc>,
    ) -> Result<Self, self::Error> {
        self.validate()?;
        let id = *self.id.get_or_insert_with(Uuid::new_v4);
        match previous {
            Some(previous) if previous.owner_id != self.owner_id => {
                return Err(Error::OwnerMismatch(id));
            }
            Some(previous) => self.created_at = previous.created_at.or(Some(now)),
            None => self.created_at = Some(now),
        }
        self.updated_at = Some(now);
        Ok(self)
    }
}

#[async_trait]
pub trait TourStore: Send + Sync {
    /// Inserts or replaces a tour and returns its id.
    async fn save(&self, tour: ShowingTour) -> Result<TourId, self::Error>;

    /// Tours owned by `owner_id`, newest first.
    async fn list(&self, owner_id: &str) -> Result<Vec<ShowingTour>, self::Error>;

    async fn get(&self, id: TourId) -> Result<ShowingTour, self::Error>;

    async fn delete(&self, id: TourId) -> Result<(), self::Error>;
}

/// Newest first, ties broken by name so listings are stable.
pub fn sort_newest_first(tours: &mut [ShowingTour]) {
    tours.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}
