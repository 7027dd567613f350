//! Client facing appointment times.
//!
//! A showing that is ready at 10:17 is offered to the client at a clean
//! boundary instead. The rounded time is only a suggestion for the booking,
//! the schedule keeps its exact times.

use crate::{
    shared::time::{Duration, Time},
    tour::Granularity,
};

const ONE_HOUR: Duration = Duration::from_hours(1);

/// Rounds `time` to the booking boundary for `granularity`.
///
/// * `OnTheHour` always moves forward to the next whole hour unless the time
///   is already on the hour.
/// * `OnTheHalfHour` snaps minutes 1..=15 back to the hour, 16..=45 to the
///   half hour and 46..=59 forward to the next hour.
///
/// Rounding past 23:59 lands on midnight of the next day, see [`Time::days`].
pub fn round_for_booking(time: Time, granularity: Granularity) -> Time {
    let minute = time.minute();
    if minute == 0 {
        return time;
    }
    match granularity {
        Granularity::OnTheHour => time.floor_hour().saturating_add(ONE_HOUR),
        Granularity::OnTheHalfHour => match minute {
            1..=15 => time.floor_hour(),
            16..=45 => time.with_minute(30),
            _ => time.floor_hour().saturating_add(ONE_HOUR),
        },
    }
}

#[test]
fn on_the_hour_rounds_forward() {
    assert_eq!(
        round_for_booking(Time::from_hm(9, 1), Granularity::OnTheHour),
        Time::from_hm(10, 0)
    );
}

#[test]
fn half_hour_boundaries() {
    let round = |h, m| round_for_booking(Time::from_hm(h, m), Granularity::OnTheHalfHour);
    assert_eq!(round(9, 15), Time::from_hm(9, 0));
    assert_eq!(round(9, 16), Time::from_hm(9, 30));
    assert_eq!(round(9, 45), Time::from_hm(9, 30));
    assert_eq!(round(9, 46), Time::from_hm(10, 0));
}
