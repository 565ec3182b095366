use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DriverAPI,
    entities::{Driver, DriverRegistration},
    error::Error,
    store::DriverRecord,
};

#[async_trait]
impl DriverAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_drivers(&self) -> Result<Vec<Driver>, Error> {
        self.directory.all().await
    }

    #[tracing::instrument(skip(self))]
    async fn find_driver(&self, id: &str) -> Result<Driver, Error> {
        self.directory.find(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_drivers_by_vehicle_class(&self, vehicle_class: &str) -> Result<Vec<Driver>, Error> {
        self.directory.find_by_vehicle_class(vehicle_class).await
    }

    #[tracing::instrument(skip(self, registration), fields(driver = %registration.username))]
    async fn register_driver(&self, registration: DriverRegistration) -> Result<Driver, Error> {
        let driver = self
            .directory
            .register(DriverRecord::from(registration))
            .await?;

        tracing::info!(class = %driver.vehicle_class(), place = %driver.location().name, "registered driver");

        Ok(driver)
    }

    #[tracing::instrument(skip(self))]
    async fn relocate_driver(&self, id: &str, place: &str) -> Result<Driver, Error> {
        self.directory.relocate(id, place).await
    }
}
