use anyhow::{Context, Result};
use std::{net::SocketAddr, path::PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TRAVEL_RETRIES: u32 = 2;
pub const DEFAULT_TRAVEL_CACHE_SIZE: usize = showings::travel::DEFAULT_CACHE_CAPACITY;
pub const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Server settings, read from the environment.
///
/// - `HOST` / `PORT`: bind address, `0.0.0.0:3000` by default
/// - `TOUR_STORE_DIR`: keep saved tours as json files in this directory,
///   in memory when unset
/// - `GOOGLE_MAPS_API_KEY`: resolve legs with the Distance Matrix API,
///   offline estimates when unset
/// - `DISTANCE_MATRIX_URL`: override the Distance Matrix endpoint
/// - `TRAVEL_RETRIES`: extra attempts for a failed Distance Matrix request
/// - `TRAVEL_CACHE_SIZE`: Distance Matrix legs kept in memory, `0` disables
///   the cache
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_dir: Option<PathBuf>,
    pub maps_api_key: Option<String>,
    pub maps_url: String,
    pub travel_retries: u32,
    pub travel_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            store_dir: None,
            maps_api_key: None,
            maps_url: DISTANCE_MATRIX_URL.into(),
            travel_retries: DEFAULT_TRAVEL_RETRIES,
            travel_cache_size: DEFAULT_TRAVEL_CACHE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => defaults.port,
        };
        let travel_retries = match non_empty("TRAVEL_RETRIES") {
            Some(retries) => retries
                .trim()
                .parse()
                .with_context(|| format!("TRAVEL_RETRIES must be a number, got {retries:?}"))?,
            None => defaults.travel_retries,
        };
        let travel_cache_size = match non_empty("TRAVEL_CACHE_SIZE") {
            Some(size) => size
                .trim()
                .parse()
                .with_context(|| format!("TRAVEL_CACHE_SIZE must be a number, got {size:?}"))?,
            None => defaults.travel_cache_size,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            store_dir: non_empty("TOUR_STORE_DIR").map(PathBuf::from),
            maps_api_key: non_empty("GOOGLE_MAPS_API_KEY"),
            maps_url: non_empty("DISTANCE_MATRIX_URL").unwrap_or(defaults.maps_url),
            travel_retries,
            travel_cache_size,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().unwrap().port(), DEFAULT_PORT);
    }

    #[test]
    fn reads_env() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TOUR_STORE_DIR", "/var/lib/tours"),
            ("GOOGLE_MAPS_API_KEY", "key"),
            ("TRAVEL_RETRIES", "0"),
            ("TRAVEL_CACHE_SIZE", "500"),
        ]))
        .unwrap();
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.store_dir, Some(PathBuf::from("/var/lib/tours")));
        assert_eq!(config.maps_api_key.as_deref(), Some("key"));
        assert_eq!(config.travel_retries, 0);
        assert_eq!(config.travel_cache_size, 500);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_MAPS_API_KEY", "  ")])).unwrap();
        assert_eq!(config.maps_api_key, None);
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PORT", "70000")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TRAVEL_CACHE_SIZE", "-1")])).is_err());
    }
}
