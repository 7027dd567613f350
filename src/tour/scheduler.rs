use rayon::prelude::*;
use tracing::debug;

use crate::{
    shared::{
        geo::{Coordinate, Distance},
        time::{Duration, Time},
    },
    tour::{
        self, InvalidInput, ItemKind, MAX_SHOWING_DURATION, ScheduleItem, Stop, TourConfig,
        TourSchedule, directions_url, round_for_booking,
    },
    travel::{TravelEstimate, TravelTimeProvider},
};

/// Packs an ordered list of stops into a timeline.
///
/// The stop order is taken as given. Every leg between two consecutive stops
/// is resolved through the provider, legs are looked up in parallel and then
/// laid out one after the other starting at the configured start time.
/// The scheduler keeps no state between calls.
pub struct TourScheduler<P> {
    provider: P,
}

impl<P: TravelTimeProvider> TourScheduler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn compute_schedule(
        &self,
        stops: &[Stop],
        config: &TourConfig,
    ) -> Result<TourSchedule, tour::Error> {
        let window = config.validate()?;
        let coordinates = validate_stops(stops)?;
        let legs = self.resolve_legs(stops, &coordinates, config)?;

        let mut items = Vec::with_capacity(stops.len() * 2);
        let mut cursor = Duration::ZERO;
        let mut total_showing_time = Duration::ZERO;
        for (i, stop) in stops.iter().enumerate() {
            if i > 0 {
                let leg = &legs[i - 1];
                items.push(build_item(
                    ItemKind::Travel {
                        from: stops[i - 1].id.clone(),
                        to: stop.id.clone(),
                        distance: leg.distance,
                    },
                    cursor,
                    leg.duration,
                    config,
                )?);
                cursor = advance(cursor, leg.duration)?;
            }

            let showing = stop.showing_duration_or(config.default_showing_duration);
            let start_time = at_offset(config, cursor)?;
            items.push(build_item(
                ItemKind::Showing {
                    stop: stop.clone(),
                    booking_time: round_for_booking(start_time, config.granularity),
                },
                cursor,
                showing,
                config,
            )?);
            cursor = advance(cursor, showing)?;
            // Bounded by the cursor
            total_showing_time += showing;
        }

        let total_duration = cursor;
        let can_fit_in_window = total_duration <= window;
        debug!(
            "Scheduled {} stops in {} (window {}, fits: {})",
            stops.len(),
            total_duration,
            window,
            can_fit_in_window
        );

        Ok(TourSchedule {
            items,
            start_time: config.start_time,
            end_time: at_offset(config, total_duration)?,
            window,
            total_duration,
            total_drive_time: total_duration - total_showing_time,
            total_showing_time,
            total_distance: legs.iter().map(|leg| leg.distance).sum::<Distance>(),
            can_fit_in_window,
            overrun: total_duration.saturating_sub(window),
            directions_url: directions_url(&coordinates, config.travel_mode),
        })
    }

    fn resolve_legs(
        &self,
        stops: &[Stop],
        coordinates: &[Coordinate],
        config: &TourConfig,
    ) -> Result<Vec<TravelEstimate>, tour::Error> {
        // Collecting into a Vec keeps the stop order no matter which leg finishes first
        (1..stops.len())
            .into_par_iter()
            .map(|i| -> Result<TravelEstimate, tour::Error> {
                let (from, to) = (&stops[i - 1], &stops[i]);
                let estimate = self
                    .provider
                    .travel_time(&coordinates[i - 1], &coordinates[i], config.travel_mode)
                    .map_err(|source| tour::Error::TravelTimeUnavailable {
                        from: from.id.clone(),
                        to: to.id.clone(),
                        source,
                    })?;
                debug!(
                    "Leg {} -> {} takes {} ({:.1} km)",
                    from.id,
                    to.id,
                    estimate.duration,
                    estimate.distance.as_kilometers()
                );
                Ok(estimate)
            })
            .collect()
    }
}

fn build_item(
    kind: ItemKind,
    start_offset: Duration,
    duration: Duration,
    config: &TourConfig,
) -> Result<ScheduleItem, InvalidInput> {
    let start_time = at_offset(config, start_offset)?;
    let end_time = start_time
        .checked_add(duration)
        .ok_or(InvalidInput::TourTooLong)?;
    Ok(ScheduleItem {
        kind,
        start_offset,
        duration,
        start_time,
        end_time,
    })
}

fn advance(cursor: Duration, by: Duration) -> Result<Duration, InvalidInput> {
    cursor.checked_add(by).ok_or(InvalidInput::TourTooLong)
}

fn at_offset(config: &TourConfig, offset: Duration) -> Result<Time, InvalidInput> {
    config
        .start_time
        .checked_add(offset)
        .ok_or(InvalidInput::TourTooLong)
}

/// Every stop must be schedulable, a bad stop is never skipped since that
/// would silently change the order the user picked.
fn validate_stops(stops: &[Stop]) -> Result<Vec<Coordinate>, InvalidInput> {
    if stops.is_empty() {
        return Err(InvalidInput::NoStops);
    }
    stops
        .iter()
        .map(|stop| {
            if let Some(duration) = stop.showing_duration {
                if duration.is_zero() {
                    return Err(InvalidInput::NonPositiveDuration(stop.id.clone()));
                }
                if duration > MAX_SHOWING_DURATION {
                    return Err(InvalidInput::ShowingTooLong(stop.id.clone()));
                }
            }
            let coordinate = stop
                .coordinate
                .ok_or_else(|| InvalidInput::MissingCoordinate(stop.id.clone()))?;
            if !coordinate.is_valid() {
                return Err(InvalidInput::InvalidCoordinate(stop.id.clone()));
            }
            Ok(coordinate)
        })
        .collect()
}
