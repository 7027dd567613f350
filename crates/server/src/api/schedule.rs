use crate::{
    dto::{ScheduleDto, ScheduleRequest, to_stops},
    error::AppError,
    state::AppState,
};
use axum::{Json, extract::State};
use showings::tour::TourConfig;
use std::{sync::Arc, time::Instant};
use tracing::info;

pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleDto>, AppError> {
    let stops = to_stops(request.properties);
    let config: TourConfig = request.config.into();

    let now = Instant::now();
    let count = stops.len();
    // Leg lookups may block on the network
    let schedule = tokio::task::spawn_blocking(move || {
        state.scheduler.compute_schedule(&stops, &config)
    })
    .await??;
    info!(
        "Scheduled {count} stops in {:?}, fits: {}",
        now.elapsed(),
        schedule.can_fit_in_window
    );

    Ok(Json(ScheduleDto::from(&schedule)))
}
