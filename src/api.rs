use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Booking, BookingRequest, Driver, DriverRegistration, Place, Ride, Rider, RiderRegistration,
};
use crate::error::Error;

#[async_trait]
pub trait PlaceAPI {
    async fn list_places(&self) -> Result<Vec<Place>, Error>;
    async fn find_place(&self, name: &str) -> Result<Place, Error>;
}

#[async_trait]
pub trait DriverAPI {
    async fn list_drivers(&self) -> Result<Vec<Driver>, Error>;
    async fn find_driver(&self, id: &str) -> Result<Driver, Error>;
    async fn find_drivers_by_vehicle_class(&self, vehicle_class: &str) -> Result<Vec<Driver>, Error>;
    async fn register_driver(&self, registration: DriverRegistration) -> Result<Driver, Error>;
    async fn relocate_driver(&self, id: &str, place: &str) -> Result<Driver, Error>;
}

#[async_trait]
pub trait RiderAPI {
    async fn register_rider(&self, registration: RiderRegistration) -> Result<Rider, Error>;
    async fn find_rider(&self, id: &str) -> Result<Rider, Error>;
}

#[async_trait]
pub trait BookingAPI {
    async fn quote_fare(&self, pickup: &str, dropoff: &str) -> Result<f64, Error>;
    /// `Ok(None)` means no driver of the requested class exists. The rider must be registered.
    async fn book_ride(&self, request: BookingRequest) -> Result<Option<Booking>, Error>;
}

#[async_trait]
pub trait RideAPI {
    async fn rides_for_rider(&self, rider_id: &str) -> Result<Vec<Ride>, Error>;
    async fn rides_for_driver(&self, driver_id: &str) -> Result<Vec<Ride>, Error>;
}

pub trait API: PlaceAPI + DriverAPI + RiderAPI + BookingAPI + RideAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
