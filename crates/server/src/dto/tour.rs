use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showings::store::{ShowingTour, TourId};

use crate::dto::{ConfigDto, PropertyDto, ScheduleDto, to_stops};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTourRequest {
    /// Present when re-saving an existing tour.
    #[serde(default)]
    pub id: Option<TourId>,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub properties: Vec<PropertyDto>,
    pub config: ConfigDto,
    /// Cache a freshly computed schedule with the tour.
    #[serde(default = "yes")]
    pub include_schedule: bool,
}

fn yes() -> bool {
    true
}

impl SaveTourRequest {
    /// The tour without a schedule, the handler decides whether to attach one.
    pub fn into_tour(self) -> ShowingTour {
        let mut tour = ShowingTour::new(
            &self.owner_id,
            &self.name,
            to_stops(self.properties),
            self.config.into(),
        )
        .with_description(&self.description);
        tour.id = self.id;
        tour
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTourDto {
    pub id: TourId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDto {
    pub id: Option<TourId>,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub properties: Vec<PropertyDto>,
    pub config: ConfigDto,
    pub schedule: Option<ScheduleDto>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&ShowingTour> for TourDto {
    fn from(tour: &ShowingTour) -> Self {
        Self {
            id: tour.id,
            owner_id: tour.owner_id.to_string(),
            name: tour.name.clone(),
            description: tour.description.clone(),
            properties: tour.stops.iter().map(PropertyDto::from).collect(),
            config: ConfigDto::from(&tour.config),
            schedule: tour.schedule.as_ref().map(ScheduleDto::from),
            created_at: tour.created_at,
            updated_at: tour.updated_at,
        }
    }
}
