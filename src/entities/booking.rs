use serde::{Deserialize, Serialize};

use crate::entities::Ride;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub pickup: String,
    pub dropoff: String,
    pub vehicle_class: String,
    pub rider_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub success: bool,
    pub driver_id: String,
    pub fare: f64,
    pub ride_id: String,
}

impl From<&Ride> for Booking {
    fn from(ride: &Ride) -> Self {
        Self {
            success: true,
            driver_id: ride.driver_id.clone(),
            fare: ride.fare,
            ride_id: ride.id.clone(),
        }
    }
}
