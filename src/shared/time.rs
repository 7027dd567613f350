use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Wall-clock time on the showing day, in minutes since midnight.
/// Values past 24:00 belong to the following day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<NaiveTime> for Time {
    fn from(value: NaiveTime) -> Self {
        Self(value.hour() * MINUTES_PER_HOUR + value.minute())
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Time {
    pub const MIDNIGHT: Time = Time(0);
    pub const END_OF_DAY: Time = Time(MINUTES_PER_DAY);

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn from_hm(hour: u32, minute: u32) -> Self {
        Self(hour * MINUTES_PER_HOUR + minute)
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }

    /// Hour of the day, 0..=23.
    pub const fn hour(&self) -> u32 {
        (self.0 % MINUTES_PER_DAY) / MINUTES_PER_HOUR
    }

    pub const fn minute(&self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    /// How many midnights lie between the start of the showing day and this time.
    pub const fn days(&self) -> u32 {
        self.0 / MINUTES_PER_DAY
    }

    pub const fn is_same_day(&self) -> bool {
        self.0 < MINUTES_PER_DAY
    }

    pub const fn is_on_the_hour(&self) -> bool {
        self.minute() == 0
    }

    /// `None` when the result no longer fits.
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(minutes) => Some(Self(minutes)),
            None => None,
        }
    }

    pub const fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }

    /// Time elapsed since `earlier`, `None` if `earlier` is later than `self`.
    pub fn checked_since(&self, earlier: Time) -> Option<Duration> {
        self.0.checked_sub(earlier.0).map(Duration)
    }

    /// Truncates to the top of the current hour.
    pub const fn floor_hour(&self) -> Self {
        Self(self.0 - self.minute())
    }

    pub const fn with_minute(&self, minute: u32) -> Self {
        Self(self.floor_hour().0 + minute)
    }

    /// 24 hour clock, hours keep counting past midnight (`"24:30"`).
    pub fn to_hm_string(&self) -> String {
        let h = self.0 / MINUTES_PER_HOUR;
        let m = self.minute();
        format!("{:02}:{:02}", h, m)
    }

    /// Parses `HH:MM`, `HH:MM:SS` is accepted and the seconds dropped.
    pub fn from_hm_str(time: &str) -> Option<Self> {
        let mut split = time.trim().split(':');
        let hours: u32 = split.next()?.parse().ok()?;
        let minutes: u32 = split.next()?.parse().ok()?;
        if minutes >= MINUTES_PER_HOUR {
            return None;
        }
        if let Some(seconds) = split.next() {
            let seconds: u32 = seconds.parse().ok()?;
            if seconds >= 60 {
                return None;
            }
        }
        if split.next().is_some() {
            return None;
        }
        let total = hours.checked_mul(MINUTES_PER_HOUR)?.checked_add(minutes)?;
        Some(Self(total))
    }
}

/// 12 hour clock the way clients read it, `9:45 AM`.
impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hour = self.hour();
        let (display_hour, suffix) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", display_hour, self.minute(), suffix)?;
        match self.days() {
            0 => Ok(()),
            1 => f.write_str(" (+1 day)"),
            days => write!(f, " (+{days} days)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeError(String);

impl Display for ParseTimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid time of day: {:?}", self.0)
    }
}

impl std::error::Error for ParseTimeError {}

impl FromStr for Time {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hm_str(s).ok_or_else(|| ParseTimeError(s.to_string()))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hm_string())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Whole minutes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours * MINUTES_PER_HOUR)
    }

    /// Rounds up, a 61 second drive is a two minute drive.
    /// Saturates at `u32::MAX` minutes.
    pub const fn from_seconds_ceil(secs: u64) -> Self {
        let minutes = secs.div_ceil(60);
        if minutes > u32::MAX as u64 {
            Self(u32::MAX)
        } else {
            Self(minutes as u32)
        }
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(minutes) => Some(Self(minutes)),
            None => None,
        }
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let h = self.0 / MINUTES_PER_HOUR;
        let m = self.0 % MINUTES_PER_HOUR;
        match (h, m) {
            (0, m) => write!(f, "{m} min"),
            (h, 0) => write!(f, "{h} h"),
            (h, m) => write!(f, "{h} h {m} min"),
        }
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Duration::ZERO, |acc, value| acc + value)
    }
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let stime = Time::from_hm_str(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "09:45";
    let stime = Time::from_hm_str(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_3() {
    let time = "24:30";
    let stime = Time::from_hm_str(time).unwrap();
    assert_eq!(time, stime.to_hm_string());
    assert_eq!(stime.days(), 1);
    assert_eq!(stime.hour(), 0);
}

#[test]
fn parse_seconds_are_dropped() {
    assert_eq!(Time::from_hm_str("13:05:59"), Some(Time::from_hm(13, 5)));
}

#[test]
fn invalid_time_test_1() {
    assert!(Time::from_hm_str("09:6a").is_none());
}

#[test]
fn invalid_time_test_2() {
    assert!(Time::from_hm_str("09").is_none());
}

#[test]
fn invalid_time_test_3() {
    assert!(Time::from_hm_str("09:60").is_none());
}

#[test]
fn overflowing_hours_are_invalid() {
    assert!(Time::from_hm_str("71582789:00").is_none());
    assert!(Time::from_hm_str("71582788:59").is_none());
}

#[test]
fn checked_add_stops_at_u32() {
    let late = Time::from_minutes(u32::MAX - 10);
    assert_eq!(late.checked_add(Duration::from_minutes(10)), Some(Time::from_minutes(u32::MAX)));
    assert_eq!(late.checked_add(Duration::from_minutes(11)), None);
    assert_eq!(late.saturating_add(Duration::from_hours(1)), Time::from_minutes(u32::MAX));
}

#[test]
fn seconds_saturate() {
    assert_eq!(Duration::from_seconds_ceil(u64::MAX).as_minutes(), u32::MAX);
}

#[test]
fn twelve_hour_display() {
    assert_eq!(Time::from_hm(9, 45).to_string(), "9:45 AM");
    assert_eq!(Time::from_hm(0, 5).to_string(), "12:05 AM");
    assert_eq!(Time::from_hm(12, 0).to_string(), "12:00 PM");
    assert_eq!(Time::from_hm(17, 30).to_string(), "5:30 PM");
    assert_eq!(Time::from_hm(24, 0).to_string(), "12:00 AM (+1 day)");
}

#[test]
fn duration_from_seconds_rounds_up() {
    assert_eq!(Duration::from_seconds_ceil(0).as_minutes(), 0);
    assert_eq!(Duration::from_seconds_ceil(60).as_minutes(), 1);
    assert_eq!(Duration::from_seconds_ceil(61).as_minutes(), 2);
}

#[test]
fn duration_display() {
    assert_eq!(Duration::from_minutes(45).to_string(), "45 min");
    assert_eq!(Duration::from_minutes(120).to_string(), "2 h");
    assert_eq!(Duration::from_minutes(125).to_string(), "2 h 5 min");
}
