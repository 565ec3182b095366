use super::Engine;

use async_trait::async_trait;

use crate::{api::RideAPI, entities::Ride, error::Error};

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn rides_for_rider(&self, rider_id: &str) -> Result<Vec<Ride>, Error> {
        Ok(self.ledger.query_by_rider(rider_id).await?.collect())
    }

    #[tracing::instrument(skip(self))]
    async fn rides_for_driver(&self, driver_id: &str) -> Result<Vec<Ride>, Error> {
        Ok(self.ledger.query_by_driver(driver_id).await?.collect())
    }
}
