use showings::shared::time::{Duration, Time};

#[test]
fn valid_time_test_1() {
    let time = "00:00";
    assert_eq!(Time::from_hm_str(time).unwrap().as_minutes(), 0);
}

#[test]
fn valid_time_test_2() {
    let time = "00:30";
    assert_eq!(Time::from_hm_str(time).unwrap().as_minutes(), 30);
}

#[test]
fn valid_time_test_3() {
    let time = "01:30";
    assert_eq!(Time::from_hm_str(time).unwrap().as_minutes(), 90);
}

#[test]
fn valid_time_test_4() {
    let time = "13:05:00";
    assert_eq!(Time::from_hm_str(time).unwrap().as_minutes(), 785);
}

#[test]
fn invalid_time_test_1() {
    let time = "00:0a";
    assert!(Time::from_hm_str(time).is_none())
}

#[test]
fn invalid_time_test_2() {
    let time = "noon";
    assert!(Time::from_hm_str(time).is_none())
}

#[test]
fn invalid_time_test_3() {
    let time = "10:00:00:00";
    assert!(Time::from_hm_str(time).is_none())
}

#[test]
fn invalid_time_test_4() {
    // Would not fit in a u32 worth of minutes
    assert!(Time::from_hm_str("71582789:00").is_none());
    assert!(Time::from_hm_str("71582797:00").is_none());
    assert!("4294967295:00".parse::<Time>().is_err());
}

#[test]
fn large_hour_is_not_same_day() {
    let time = Time::from_hm_str("71582788:00").unwrap();
    assert_eq!(time.as_minutes(), 71_582_788 * 60);
    assert!(!time.is_same_day());
}

#[test]
fn huge_start_time_is_rejected_by_serde() {
    assert!(serde_json::from_str::<Time>("\"71582797:00\"").is_err());
}

#[test]
fn from_str_test() {
    let time: Time = "17:45".parse().unwrap();
    assert_eq!(time, Time::from_hm(17, 45));
    assert!("17:99".parse::<Time>().is_err());
}

#[test]
fn chrono_test() {
    let naive = chrono::NaiveTime::from_hms_opt(10, 17, 42).unwrap();
    assert_eq!(Time::from(naive), Time::from_hm(10, 17));
}

#[test]
fn since_test() {
    let start = Time::from_hm(9, 0);
    let end = Time::from_hm(11, 0);
    assert_eq!(end.checked_since(start), Some(Duration::from_minutes(120)));
    assert_eq!(start.checked_since(end), None);
}

#[test]
fn serde_test() {
    let json = serde_json::to_string(&Time::from_hm(9, 5)).unwrap();
    assert_eq!(json, "\"09:05\"");
    let time: Time = serde_json::from_str("\"14:30\"").unwrap();
    assert_eq!(time, Time::from_hm(14, 30));
    assert!(serde_json::from_str::<Time>("\"14:75\"").is_err());

    let json = serde_json::to_string(&Duration::from_minutes(45)).unwrap();
    assert_eq!(json, "45");
}
