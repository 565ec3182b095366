mod booking_api;
mod directory;
mod dispatch;
mod driver_api;
mod fare;
mod ledger;
mod place_api;
mod ride_api;
mod rider_api;
mod riders;

pub use directory::{DirectoryTx, DriverDirectory};
pub use dispatch::{dispatch, nearest, Candidates};
pub use fare::fare;
pub use ledger::{RideHistory, RideLedger};
pub use riders::RiderRoster;

use std::sync::Arc;

use crate::{
    api::API,
    config::{Config, FarePolicy},
    error::Error,
    places::PlaceRegistry,
    store::{FileStore, RecordStore},
};

pub struct Engine {
    places: PlaceRegistry,
    directory: DriverDirectory,
    riders: RiderRoster,
    ledger: RideLedger,
    rate_per_km: f64,
    fare_policy: FarePolicy,
}

impl Engine {
    /// Engine over the driver, rider and ride files named in `config`.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let drivers = FileStore::new(&config.drivers_path);
        let riders = FileStore::new(&config.riders_path);
        let rides = FileStore::new(&config.rides_path);

        // fail fast if a file exists but cannot be read
        drivers.read_lines().await?;
        riders.read_lines().await?;
        rides.read_lines().await?;

        tracing::info!(
            drivers = %drivers.path().display(),
            riders = %riders.path().display(),
            rides = %rides.path().display(),
            "opened record files"
        );

        Ok(Self::with_stores(
            PlaceRegistry::default(),
            Arc::new(drivers),
            Arc::new(riders),
            Arc::new(rides),
            config,
        ))
    }

    pub fn with_stores(
        places: PlaceRegistry,
        drivers: Arc<dyn RecordStore>,
        riders: Arc<dyn RecordStore>,
        rides: Arc<dyn RecordStore>,
        config: &Config,
    ) -> Self {
        Self {
            directory: DriverDirectory::new(drivers, places.clone(), config.lock_timeout),
            riders: RiderRoster::new(riders, config.lock_timeout),
            ledger: RideLedger::new(rides, places.clone()),
            places,
            rate_per_km: config.rate_per_km,
            fare_policy: config.fare_policy,
        }
    }

    pub fn places(&self) -> &PlaceRegistry {
        &self.places
    }

    pub fn directory(&self) -> &DriverDirectory {
        &self.directory
    }

    pub fn riders(&self) -> &RiderRoster {
        &self.riders
    }

    pub fn ledger(&self) -> &RideLedger {
        &self.ledger
    }
}

impl API for Engine {}
