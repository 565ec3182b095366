use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Place;

/// A completed assignment. Never mutated once it is in the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: String,
    pub rider_id: String,
    pub driver_id: String,
    pub pickup: Place,
    pub dropoff: Place,
    pub fare: f64,
    pub vehicle_class: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Ride {
    pub fn new(
        rider_id: impl Into<String>,
        driver_id: impl Into<String>,
        pickup: Place,
        dropoff: Place,
        fare: f64,
        vehicle_class: impl Into<String>,
    ) -> Self {
        let id = new_ride_id(Utc::now());

        Self {
            created_at: ride_id_timestamp(&id),
            id,
            rider_id: rider_id.into(),
            driver_id: driver_id.into(),
            pickup,
            dropoff,
            fare,
            vehicle_class: vehicle_class.into(),
        }
    }

    pub fn involves_rider(&self, rider_id: &str) -> bool {
        self.rider_id == rider_id
    }

    pub fn involves_driver(&self, driver_id: &str) -> bool {
        self.driver_id == driver_id
    }
}

/// `<unix seconds>-<random>`. Collisions are unlikely, not impossible.
pub fn new_ride_id(now: DateTime<Utc>) -> String {
    let salt: u32 = rand::thread_rng().gen();
    format!("{}-{}", now.timestamp(), salt)
}

/// Recovers the creation second embedded in a ride id, if there is one.
pub fn ride_id_timestamp(id: &str) -> Option<DateTime<Utc>> {
    let (seconds, _) = id.split_once('-')?;
    let seconds: i64 = seconds.parse().ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}
