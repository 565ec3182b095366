use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a booking's fare is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarePolicy {
    /// Drop-off place's nominal base distance times the rate.
    BaseDistance,
    /// Great-circle pickup to drop-off distance times the rate.
    Haversine,
}

impl FromStr for FarePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base_distance" => Ok(Self::BaseDistance),
            "haversine" => Ok(Self::Haversine),
            other => Err(Error::config_error(format!("unknown fare policy {:?}", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub drivers_path: PathBuf,
    pub riders_path: PathBuf,
    pub rides_path: PathBuf,
    pub rate_per_km: f64,
    pub fare_policy: FarePolicy,
    pub lock_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drivers_path: "drivers.txt".into(),
            riders_path: "riders.txt".into(),
            rides_path: "rides.txt".into(),
            rate_per_km: 1.0,
            fare_policy: FarePolicy::BaseDistance,
            lock_timeout: Duration::from_millis(2000),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Config {
    /// Reads `DISPATCH_*` variables, loading a `.env` file first if present.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let rate_per_km: f64 = parse_var("DISPATCH_RATE_PER_KM")?.unwrap_or(defaults.rate_per_km);
        if !rate_per_km.is_finite() || rate_per_km < 0.0 {
            return Err(Error::config_error("DISPATCH_RATE_PER_KM must be >= 0"));
        }

        Ok(Self {
            drivers_path: parse_var("DISPATCH_DRIVERS_PATH")?.unwrap_or(defaults.drivers_path),
            riders_path: parse_var("DISPATCH_RIDERS_PATH")?.unwrap_or(defaults.riders_path),
            rides_path: parse_var("DISPATCH_RIDES_PATH")?.unwrap_or(defaults.rides_path),
            rate_per_km,
            fare_policy: parse_var("DISPATCH_FARE_POLICY")?.unwrap_or(defaults.fare_policy),
            lock_timeout: parse_var("DISPATCH_LOCK_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.lock_timeout),
            bind_addr: parse_var("DISPATCH_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
        })
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| Error::config_error(format!("{}: {}", name, err))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
