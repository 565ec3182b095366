use super::Engine;

use async_trait::async_trait;

use crate::{api::PlaceAPI, entities::Place, error::Error};

#[async_trait]
impl PlaceAPI for Engine {
    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        Ok(self.places.all().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, name: &str) -> Result<Place, Error> {
        Ok(self.places.resolve(name)?.clone())
    }
}
