use crate::{
    dto::{SaveTourRequest, SavedTourDto, TourDto},
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use showings::{store::TourId, tour};
use std::{collections::HashMap, sync::Arc};
use tracing::{info, warn};

pub async fn save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveTourRequest>,
) -> Result<(StatusCode, Json<SavedTourDto>), AppError> {
    let include_schedule = request.include_schedule;
    let mut tour = request.into_tour();
    tour.validate()?;

    if include_schedule {
        let (stops, config) = (tour.stops.clone(), tour.config.clone());
        let worker = state.clone();
        let result =
            tokio::task::spawn_blocking(move || worker.scheduler.compute_schedule(&stops, &config))
                .await?;
        match result {
            Ok(schedule) => tour.schedule = Some(schedule),
            Err(err @ tour::Error::InvalidInput(_)) => return Err(err.into()),
            // The tour itself is still worth keeping
            Err(err) => warn!("Saving tour {} without a schedule: {err}", tour.name),
        }
    }

    let id = state.store.save(tour).await?;
    info!("Saved tour {id}");
    Ok((StatusCode::CREATED, Json(SavedTourDto { id })))
}

pub async fn list(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TourDto>>, AppError> {
    let owner = params
        .get("owner")
        .filter(|owner| !owner.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing owner".into()))?;
    let tours = state.store.list(owner).await?;
    Ok(Json(tours.iter().map(TourDto::from).collect()))
}

pub async fn get(
    Path(id): Path<TourId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TourDto>, AppError> {
    let tour = state.store.get(id).await?;
    Ok(Json(TourDto::from(&tour)))
}

pub async fn delete(
    Path(id): Path<TourId>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    info!("Deleted tour {id}");
    Ok(StatusCode::NO_CONTENT)
}
