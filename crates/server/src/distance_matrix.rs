use reqwest::blocking::Client;
use serde::Deserialize;
use showings::{
    shared::{
        geo::{Coordinate, Distance},
        time::Duration,
    },
    travel::{self, TravelEstimate, TravelMode, TravelTimeProvider},
};
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Travel times from the Google Distance Matrix API.
///
/// Uses a blocking client, call it from a blocking context (the scheduler
/// runs on `spawn_blocking` and rayon threads).
pub struct DistanceMatrixProvider {
    client: Client,
    url: String,
    api_key: String,
    retries: u32,
}

#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    pub duration: Option<MatrixValue>,
    pub distance: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixValue {
    pub value: f64,
}

impl DistanceMatrixProvider {
    pub fn new(url: &str, api_key: &str, retries: u32) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
            retries,
        })
    }

    fn request(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<MatrixResponse, reqwest::Error> {
        self.client
            .get(&self.url)
            .query(&[
                ("origins", origin.to_string()),
                ("destinations", destination.to_string()),
                ("mode", mode.to_string()),
                ("units", "metric".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()?
            .error_for_status()?
            .json()
    }
}

impl TravelTimeProvider for DistanceMatrixProvider {
    fn travel_time(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, travel::Error> {
        let mut attempt = 0;
        loop {
            match self.request(origin, destination, mode) {
                Ok(response) => {
                    debug!("Distance matrix {origin} -> {destination}: {}", response.status);
                    return parse_response(response);
                }
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!("Distance matrix request failed (attempt {attempt}): {err}");
                }
                Err(err) => return Err(travel::Error::Unavailable(err.to_string())),
            }
        }
    }
}

/// A single origin/destination answer, anything but `OK` means no route.
pub fn parse_response(response: MatrixResponse) -> Result<TravelEstimate, travel::Error> {
    if response.status != "OK" {
        let reason = match response.error_message {
            Some(message) => format!("{}: {message}", response.status),
            None => response.status,
        };
        return Err(travel::Error::Unavailable(reason));
    }
    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or_else(|| travel::Error::Unavailable("empty response".into()))?;
    if element.status != "OK" {
        return Err(travel::Error::Unavailable(element.status));
    }
    match (element.duration, element.distance) {
        (Some(duration), Some(distance)) => Ok(TravelEstimate::new(
            Duration::from_seconds_ceil(duration.value.max(0.0).ceil() as u64),
            Distance::from_meters(distance.value),
        )),
        _ => Err(travel::Error::Unavailable(
            "route without duration or distance".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<TravelEstimate, travel::Error> {
        parse_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn ok_response() {
        let estimate = parse(
            r#"{
                "status": "OK",
                "rows": [{ "elements": [{
                    "status": "OK",
                    "duration": { "value": 901, "text": "16 mins" },
                    "distance": { "value": 8200, "text": "8.2 km" }
                }]}]
            }"#,
        )
        .unwrap();
        assert_eq!(estimate.duration, Duration::from_minutes(16));
        assert_eq!(estimate.distance, Distance::from_meters(8200.0));
    }

    #[test]
    fn no_route() {
        let result = parse(r#"{"status": "OK", "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]}"#);
        assert_eq!(
            result,
            Err(travel::Error::Unavailable("ZERO_RESULTS".into()))
        );
    }

    #[test]
    fn request_denied() {
        let result = parse(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        );
        assert_eq!(
            result,
            Err(travel::Error::Unavailable(
                "REQUEST_DENIED: The provided API key is invalid.".into()
            ))
        );
    }

    #[test]
    fn empty_rows() {
        let result = parse(r#"{"status": "OK", "rows": []}"#);
        assert!(matches!(result, Err(travel::Error::Unavailable(_))));
    }
}
