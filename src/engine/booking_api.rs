use super::dispatch::dispatch;
use super::fare::fare;
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::BookingAPI,
    entities::{Booking, BookingRequest, Ride},
    error::Error,
    store::contains_separator,
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn quote_fare(&self, pickup: &str, dropoff: &str) -> Result<f64, Error> {
        let pickup = self.places.resolve(pickup)?;
        let dropoff = self.places.resolve(dropoff)?;

        Ok(fare(self.fare_policy, self.rate_per_km, pickup, dropoff))
    }

    #[tracing::instrument(skip(self))]
    async fn book_ride(&self, request: BookingRequest) -> Result<Option<Booking>, Error> {
        let pickup = self.places.resolve(&request.pickup)?;
        let dropoff = self.places.resolve(&request.dropoff)?;

        for field in [&request.rider_id, &request.vehicle_class] {
            if field.trim().is_empty() || contains_separator(field) {
                return Err(Error::invalid_input_error());
            }
        }

        self.riders.find(&request.rider_id).await?;

        // scan, ledger append and relocation share one lock so no two
        // bookings can claim the same driver from the same snapshot
        let mut tx = self.directory.begin().await?;

        let driver = match dispatch(pickup, &request.vehicle_class, &tx) {
            Some(driver) => driver,
            None => {
                tracing::info!("no driver available, returning early...");
                return Ok(None);
            }
        };

        let fare = fare(self.fare_policy, self.rate_per_km, pickup, dropoff);
        let ride = Ride::new(
            request.rider_id.clone(),
            driver.id(),
            pickup.clone(),
            dropoff.clone(),
            fare,
            request.vehicle_class.clone(),
        );

        self.ledger.record(&ride).await?;

        tx.relocate(driver.id(), dropoff)?;
        tx.commit().await?;

        tracing::info!(ride = %ride.id, driver = %driver.id(), fare, "booked ride");

        Ok(Some(Booking::from(&ride)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::{DriverAPI, RideAPI};
    use crate::config::{Config, FarePolicy};
    use crate::places::PlaceRegistry;
    use crate::store::{MemoryStore, RecordStore};

    const ANA: &str = "ana,pw,Ana,29,5550199";

    fn engine(drivers: &[&str], config: Config) -> (Engine, Arc<MemoryStore>, Arc<MemoryStore>) {
        let driver_store = Arc::new(MemoryStore::with_lines(drivers.iter().copied()));
        let ride_store = Arc::new(MemoryStore::new());
        let engine = Engine::with_stores(
            PlaceRegistry::default(),
            driver_store.clone(),
            Arc::new(MemoryStore::with_lines([ANA])),
            ride_store.clone(),
            &config,
        );

        (engine, driver_store, ride_store)
    }

    fn request(pickup: &str, dropoff: &str, class: &str) -> BookingRequest {
        BookingRequest {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
            vehicle_class: class.into(),
            rider_id: "ana".into(),
        }
    }

    #[tokio::test]
    async fn booking_records_ride_and_moves_driver_to_dropoff() {
        let (engine, drivers, rides) = engine(
            &[
                "asha,pw,Asha,34,555,KA01,Car,Airport",
                "chen,pw,Chen,29,557,KA03,Car,Train Station",
            ],
            Config::default(),
        );

        let booking = engine
            .book_ride(request("Downtown", "Mall", "Car"))
            .await
            .unwrap()
            .unwrap();

        assert!(booking.success);
        assert_eq!(booking.driver_id, "chen");
        assert_eq!(booking.fare, 8.0);

        let lines = rides.read_lines().await.unwrap();
        assert_eq!(lines.len(), 1);
        let line = lines[0].as_str().unwrap();
        assert!(line.starts_with(&booking.ride_id));
        assert!(line.ends_with(",ana,chen,Downtown,Mall,8,Car"));

        let lines = drivers.read_lines().await.unwrap();
        assert_eq!(lines[1], "chen,pw,Chen,29,557,KA03,Car,Mall");

        let history = engine.rides_for_driver("chen").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, booking.ride_id);
    }

    #[tokio::test]
    async fn no_driver_of_class_is_none_and_changes_nothing() {
        let (engine, drivers, rides) = engine(&["bilal,pw,Bilal,41,556,KA02,Bike,Downtown"], Config::default());

        let outcome = engine.book_ride(request("Downtown", "Mall", "Car")).await.unwrap();

        assert!(outcome.is_none());
        assert!(rides.read_lines().await.unwrap().is_empty());
        assert_eq!(
            engine.find_driver("bilal").await.unwrap().location().name,
            "Downtown"
        );
        assert_eq!(drivers.read_lines().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_places_are_rejected_before_dispatch() {
        let (engine, _, rides) = engine(&["asha,pw,Asha,34,555,KA01,Car,Airport"], Config::default());

        let err = engine
            .book_ride(request("Lighthouse", "Mall", "Car"))
            .await
            .unwrap_err();

        assert!(err.is_unknown_place_error());
        assert!(rides.read_lines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unregistered_rider_cannot_book() {
        let (engine, drivers, rides) = engine(&["asha,pw,Asha,34,555,KA01,Car,Airport"], Config::default());

        let mut booking = request("Downtown", "Mall", "Car");
        booking.rider_id = "mallory".into();
        let err = engine.book_ride(booking).await.unwrap_err();

        assert!(err.is_unknown_rider_error());
        assert!(rides.read_lines().await.unwrap().is_empty());
        assert_eq!(drivers.read_lines().await.unwrap(), vec!["asha,pw,Asha,34,555,KA01,Car,Airport"]);
    }

    #[tokio::test]
    async fn separators_in_rider_or_class_are_rejected() {
        let (engine, drivers, rides) = engine(&["asha,pw,Asha,34,555,KA01,Car,Airport"], Config::default());

        let mut booking = request("Downtown", "Mall", "Car");
        booking.rider_id = "ana\nx".into();
        assert!(engine.book_ride(booking).await.unwrap_err().is_invalid_input_error());

        let booking = request("Downtown", "Mall", "Car,Bike");
        assert!(engine.book_ride(booking).await.unwrap_err().is_invalid_input_error());

        assert!(rides.read_lines().await.unwrap().is_empty());
        assert_eq!(drivers.read_lines().await.unwrap(), vec!["asha,pw,Asha,34,555,KA01,Car,Airport"]);
    }

    #[tokio::test]
    async fn haversine_policy_charges_trip_length() {
        let config = Config {
            fare_policy: FarePolicy::Haversine,
            rate_per_km: 2.0,
            ..Config::default()
        };
        let (engine, _, _) = engine(&[], config);

        let quote = engine.quote_fare("Downtown", "Airport").await.unwrap();
        assert!((quote - 41.6).abs() < 0.2, "got {}", quote);
    }

    #[tokio::test]
    async fn quote_matches_booked_fare() {
        let (engine, _, _) = engine(&["asha,pw,Asha,34,555,KA01,Auto,Mall"], Config::default());

        let quote = engine.quote_fare("Mall", "Train Station").await.unwrap();
        let booking = engine
            .book_ride(request("Mall", "Train Station", "Auto"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote, booking.fare);
    }
}
