use axum::extract::{Extension, Json, Path};

use crate::entities::Place;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Place>>, Error> {
    let places = api.list_places().await?;

    Ok(places.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(name): Path<String>,
) -> Result<Json<Place>, Error> {
    let place = api.find_place(&name).await?;

    Ok(place.into())
}
