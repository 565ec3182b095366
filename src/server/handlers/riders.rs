use axum::extract::{Extension, Json, Path};

use crate::entities::{Ride, Rider, RiderRegistration};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(registration): Json<RiderRegistration>,
) -> Result<Json<Rider>, Error> {
    let rider = api.register_rider(registration).await?;

    Ok(rider.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Rider>, Error> {
    let rider = api.find_rider(&id).await?;

    Ok(rider.into())
}

pub async fn rides(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.rides_for_rider(&id).await?;

    Ok(rides.into())
}
