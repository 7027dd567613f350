use serde::{Deserialize, Serialize};
use showings::{
    shared::time::Time,
    tour::{ItemKind, ScheduleItem, TourSchedule},
};

use crate::dto::{ConfigDto, PropertyDto};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub properties: Vec<PropertyDto>,
    pub config: ConfigDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub items: Vec<ScheduleItemDto>,
    pub start_time: Time,
    pub end_time: Time,
    pub window_minutes: u32,
    pub total_duration_minutes: u32,
    pub total_drive_time_minutes: u32,
    pub total_showing_time_minutes: u32,
    pub total_distance_km: f64,
    pub can_fit_in_window: bool,
    pub overrun_minutes: u32,
    pub directions_url: Option<String>,
}

impl From<&TourSchedule> for ScheduleDto {
    fn from(schedule: &TourSchedule) -> Self {
        Self {
            items: schedule.items.iter().map(ScheduleItemDto::from).collect(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            window_minutes: schedule.window.as_minutes(),
            total_duration_minutes: schedule.total_duration.as_minutes(),
            total_drive_time_minutes: schedule.total_drive_time.as_minutes(),
            total_showing_time_minutes: schedule.total_showing_time.as_minutes(),
            total_distance_km: schedule.total_distance.as_kilometers(),
            can_fit_in_window: schedule.can_fit_in_window,
            overrun_minutes: schedule.overrun.as_minutes(),
            directions_url: schedule.directions_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKindDto {
    Showing,
    Travel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemDto {
    pub kind: ItemKindDto,
    pub start_offset_minutes: u32,
    pub duration_minutes: u32,
    pub start_time: Time,
    pub end_time: Time,
    /// `9:45 AM`
    pub display_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_display_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_property_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<&ScheduleItem> for ScheduleItemDto {
    fn from(item: &ScheduleItem) -> Self {
        let mut dto = Self {
            kind: ItemKindDto::Showing,
            start_offset_minutes: item.start_offset.as_minutes(),
            duration_minutes: item.duration.as_minutes(),
            start_time: item.start_time,
            end_time: item.end_time,
            display_time: item.start_time.to_string(),
            property: None,
            booking_time: None,
            booking_display_time: None,
            from_property_id: None,
            to_property_id: None,
            distance_km: None,
        };
        match &item.kind {
            ItemKind::Showing { stop, booking_time } => {
                dto.property = Some(PropertyDto::from(stop));
                dto.booking_time = Some(*booking_time);
                dto.booking_display_time = Some(booking_time.to_string());
            }
            ItemKind::Travel { from, to, distance } => {
                dto.kind = ItemKindDto::Travel;
                dto.from_property_id = Some(from.to_string());
                dto.to_property_id = Some(to.to_string());
                dto.distance_km = Some(distance.as_kilometers());
            }
        }
        dto
    }
}
