//! Load generator: seeds drivers and riders, then fires bookings from a pool of workers.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use rand_distr::{Distribution, Normal, Uniform, WeightedIndex};
use serde::Serialize;
use uuid::Uuid;

use crate::api::{BookingAPI, DriverAPI, RiderAPI};
use crate::engine::Engine;
use crate::entities::{BookingRequest, Driver, DriverRegistration, RiderRegistration};
use crate::error::Error;

const VEHICLE_CLASSES: [(&str, u32); 3] = [("Car", 5), ("Auto", 3), ("Bike", 2)];

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub booked: usize,
    pub no_match: usize,
    pub busy: usize,
    pub failed: usize,
}

impl SimulationReport {
    pub fn total(&self) -> usize {
        self.booked + self.no_match + self.busy + self.failed
    }

    fn merge(&mut self, other: &SimulationReport) {
        self.booked += other.booked;
        self.no_match += other.no_match;
        self.busy += other.busy;
        self.failed += other.failed;
    }
}

pub struct Executor {
    engine: Arc<Engine>,
    workers: usize,
    riders: Vec<String>,
}

impl Executor {
    pub fn new(engine: Arc<Engine>, workers: usize) -> Self {
        Self {
            engine,
            workers: workers.max(1),
            riders: vec![],
        }
    }

    fn sample_place(&self) -> String {
        let places = self.engine.places().all();
        let die = Uniform::from(0..places.len());
        places[die.sample(&mut rand::thread_rng())].name.clone()
    }

    fn sample_vehicle_class() -> &'static str {
        // weights are constant and non-zero
        let weights = WeightedIndex::new(VEHICLE_CLASSES.iter().map(|(_, w)| *w))
            .expect("vehicle class weights are valid");
        VEHICLE_CLASSES[weights.sample(&mut rand::thread_rng())].0
    }

    fn sample_age() -> u32 {
        let ages = Normal::new(38.0, 9.0).expect("age distribution is valid");
        let age: f64 = ages.sample(&mut rand::thread_rng());
        age.clamp(18.0, 75.0) as u32
    }

    /// Registers `count` drivers on random catalog places.
    #[tracing::instrument(skip(self))]
    pub async fn seed_drivers(&self, count: usize) -> Result<Vec<Driver>, Error> {
        let mut drivers = Vec::with_capacity(count);

        for i in 0..count {
            let registration = DriverRegistration {
                username: format!("driver-{}", i),
                password: String::new(),
                name: format!("Driver {}", i),
                age: Self::sample_age(),
                phone_number: format!("555{:04}", i),
                vehicle_number: format!("SIM{:04}", i),
                vehicle_type: Self::sample_vehicle_class().to_string(),
                location: self.sample_place(),
            };

            drivers.push(self.engine.register_driver(registration).await?);
        }

        tracing::info!("seeded {} drivers", drivers.len());

        Ok(drivers)
    }

    /// Registers `count` riders that later bookings are made on behalf of.
    #[tracing::instrument(skip(self))]
    pub async fn seed_riders(&mut self, count: usize) -> Result<(), Error> {
        for i in 0..count {
            let registration = RiderRegistration {
                username: Uuid::new_v4().to_string(),
                password: String::new(),
                name: format!("Rider {}", i),
                age: Self::sample_age(),
                phone_number: format!("556{:04}", i),
            };

            let rider = self.engine.register_rider(registration).await?;
            self.riders.push(rider.id().to_string());
        }

        tracing::info!("seeded {} riders", self.riders.len());

        Ok(())
    }

    fn sample_request(&self) -> BookingRequest {
        let die = Uniform::from(0..self.riders.len());

        BookingRequest {
            pickup: self.sample_place(),
            dropoff: self.sample_place(),
            vehicle_class: Self::sample_vehicle_class().to_string(),
            rider_id: self.riders[die.sample(&mut rand::thread_rng())].clone(),
        }
    }

    /// Fires `bookings` requests across the worker pool and tallies the outcomes.
    ///
    /// Needs at least one seeded rider.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, bookings: usize) -> Result<SimulationReport, Error> {
        if self.riders.is_empty() {
            tracing::error!("no riders seeded");
            return Err(Error::invalid_input_error());
        }

        let (tx, rx): (Sender<BookingRequest>, Receiver<BookingRequest>) = async_channel::unbounded();

        let mut handles = vec![];
        for _ in 0..self.workers {
            let rx = rx.clone();
            let engine = self.engine.clone();

            handles.push(tokio::spawn(async move {
                let mut report = SimulationReport::default();

                while let Ok(request) = rx.recv().await {
                    match engine.book_ride(request).await {
                        Ok(Some(_)) => report.booked += 1,
                        Ok(None) => report.no_match += 1,
                        Err(err) if err.is_busy_error() => report.busy += 1,
                        Err(err) => {
                            tracing::warn!("booking failed: {}", err);
                            report.failed += 1;
                        }
                    }
                }

                report
            }));
        }
        drop(rx);

        for _ in 0..bookings {
            if tx.send(self.sample_request()).await.is_err() {
                break;
            }
        }
        tx.close();

        let mut report = SimulationReport::default();
        for result in futures::future::join_all(handles).await {
            match result {
                Ok(partial) => report.merge(&partial),
                Err(err) => tracing::error!("simulation worker panicked: {}", err),
            }
        }

        tracing::info!(
            booked = report.booked,
            no_match = report.no_match,
            busy = report.busy,
            failed = report.failed,
            "simulation finished"
        );

        Ok(report)
    }
}
