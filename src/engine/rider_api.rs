use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RiderAPI,
    entities::{Rider, RiderRegistration},
    error::Error,
    store::RiderRecord,
};

#[async_trait]
impl RiderAPI for Engine {
    #[tracing::instrument(skip(self, registration), fields(rider = %registration.username))]
    async fn register_rider(&self, registration: RiderRegistration) -> Result<Rider, Error> {
        self.riders.register(RiderRecord::from(registration)).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_rider(&self, id: &str) -> Result<Rider, Error> {
        self.riders.find(id).await
    }
}
