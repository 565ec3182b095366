use axum::extract::{Extension, Json};

use crate::entities::{Booking, BookingRequest};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<Booking>, Error> {
    let vehicle_class = request.vehicle_class.clone();

    let booking = api
        .book_ride(request)
        .await?
        .ok_or_else(|| Error::no_match_found_error(&vehicle_class))?;

    Ok(booking.into())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::server::handlers::test_support::{api, status};

    fn request(class: &str) -> BookingRequest {
        BookingRequest {
            pickup: "Downtown".into(),
            dropoff: "Airport".into(),
            vehicle_class: class.into(),
            rider_id: "ana".into(),
        }
    }

    #[tokio::test]
    async fn booking_returns_driver_fare_and_ride_id() {
        let api = api(&["asha,pw,Asha,34,555,KA01,Car,Mall"]);

        let Json(booking) = create(Extension(api), Json(request("Car"))).await.unwrap();

        assert!(booking.success);
        assert_eq!(booking.driver_id, "asha");
        assert_eq!(booking.fare, 15.0);
        assert!(!booking.ride_id.is_empty());
    }

    #[tokio::test]
    async fn missing_class_is_not_found() {
        let api = api(&["asha,pw,Asha,34,555,KA01,Car,Mall"]);

        let err = create(Extension(api), Json(request("Bike"))).await.unwrap_err();

        assert!(err.is_no_match_found_error());
        assert_eq!(status(err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_rider_is_a_bad_request() {
        let api = api(&["asha,pw,Asha,34,555,KA01,Car,Mall"]);
        let mut booking = request("Car");
        booking.rider_id = "mallory".into();

        let err = create(Extension(api), Json(booking)).await.unwrap_err();

        assert!(err.is_unknown_rider_error());
        assert_eq!(status(err), StatusCode::BAD_REQUEST);
    }
}
