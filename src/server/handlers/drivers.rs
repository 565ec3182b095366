use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::entities::{Driver, DriverRegistration, Ride};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize, Default)]
pub struct ListParams {
    vehicle_class: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RelocateParams {
    place: String,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Driver>>, Error> {
    let drivers = match params.vehicle_class {
        Some(vehicle_class) => api.find_drivers_by_vehicle_class(&vehicle_class).await?,
        None => api.list_drivers().await?,
    };

    Ok(drivers.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(registration): Json<DriverRegistration>,
) -> Result<Json<Driver>, Error> {
    let driver = api.register_driver(registration).await?;

    Ok(driver.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, Error> {
    let driver = api.find_driver(&id).await?;

    Ok(driver.into())
}

pub async fn relocate(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(params): Json<RelocateParams>,
) -> Result<Json<Driver>, Error> {
    let driver = api.relocate_driver(&id, &params.place).await?;

    Ok(driver.into())
}

pub async fn rides(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Ride>>, Error> {
    let rides = api.rides_for_driver(&id).await?;

    Ok(rides.into())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::server::handlers::test_support::{api, status};

    const DRIVERS: [&str; 2] = [
        "asha,pw,Asha,34,555,KA01,Car,Airport",
        "bilal,pw,Bilal,41,556,KA02,Bike,Downtown",
    ];

    #[tokio::test]
    async fn list_filters_by_vehicle_class_when_asked() {
        let api = api(&DRIVERS);

        let Json(all) = list(Extension(api.clone()), Query(ListParams::default())).await.unwrap();
        assert_eq!(all.len(), 2);

        let params = ListParams {
            vehicle_class: Some("Bike".into()),
        };
        let Json(bikes) = list(Extension(api), Query(params)).await.unwrap();
        let ids: Vec<&str> = bikes.iter().map(Driver::id).collect();
        assert_eq!(ids, vec!["bilal"]);
    }

    #[tokio::test]
    async fn relocate_moves_driver_and_maps_errors() {
        let api = api(&DRIVERS);

        let params = RelocateParams { place: "Mall".into() };
        let Json(driver) = relocate(Extension(api.clone()), Path("asha".into()), Json(params))
            .await
            .unwrap();
        assert_eq!(driver.location().name, "Mall");

        let params = RelocateParams { place: "Moon".into() };
        let err = relocate(Extension(api.clone()), Path("asha".into()), Json(params))
            .await
            .unwrap_err();
        assert!(err.is_unknown_place_error());
        assert_eq!(status(err), StatusCode::BAD_REQUEST);

        let params = RelocateParams { place: "Mall".into() };
        let err = relocate(Extension(api), Path("nobody".into()), Json(params))
            .await
            .unwrap_err();
        assert!(err.is_unknown_driver_error());
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_bad_request() {
        let api = api(&DRIVERS);
        let registration = DriverRegistration {
            username: "asha".into(),
            password: "pw".into(),
            name: "Asha".into(),
            age: 34,
            phone_number: "555".into(),
            vehicle_number: "KA01".into(),
            vehicle_type: "Car".into(),
            location: "Mall".into(),
        };

        let err = create(Extension(api), Json(registration)).await.unwrap_err();

        assert!(err.is_duplicate_driver_error());
        assert_eq!(status(err), StatusCode::BAD_REQUEST);
    }
}
