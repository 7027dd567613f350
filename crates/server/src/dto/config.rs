use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use showings::{
    shared::time::{Duration, Time},
    tour::{DEFAULT_SHOWING_DURATION, Granularity, TourConfig},
    travel::TravelMode,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub start_time: Time,
    pub end_time: Time,
    #[serde(default = "default_showing_duration")]
    pub default_showing_duration: u32,
    #[serde(default)]
    pub scheduling_granularity: Granularity,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub showing_date: Option<NaiveDate>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

fn default_showing_duration() -> u32 {
    DEFAULT_SHOWING_DURATION.as_minutes()
}

impl From<ConfigDto> for TourConfig {
    fn from(value: ConfigDto) -> Self {
        Self {
            start_time: value.start_time,
            end_time: value.end_time,
            default_showing_duration: Duration::from_minutes(value.default_showing_duration),
            granularity: value.scheduling_granularity,
            travel_mode: value.travel_mode,
            showing_date: value.showing_date,
            name: value.name,
            description: value.description,
        }
    }
}

impl From<&TourConfig> for ConfigDto {
    fn from(config: &TourConfig) -> Self {
        Self {
            start_time: config.start_time,
            end_time: config.end_time,
            default_showing_duration: config.default_showing_duration.as_minutes(),
            scheduling_granularity: config.granularity,
            travel_mode: config.travel_mode,
            showing_date: config.showing_date,
            name: config.name.clone(),
            description: config.description.clone(),
        }
    }
}
