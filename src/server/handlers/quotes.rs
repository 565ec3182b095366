use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    pickup: String,
    dropoff: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pickup: String,
    dropoff: String,
    fare: f64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<QuoteResponse>, Error> {
    let fare = api.quote_fare(&params.pickup, &params.dropoff).await?;

    Ok(QuoteResponse {
        pickup: params.pickup,
        dropoff: params.dropoff,
        fare,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::server::handlers::test_support::{api, status};

    fn params(pickup: &str, dropoff: &str) -> CreateParams {
        CreateParams {
            pickup: pickup.into(),
            dropoff: dropoff.into(),
        }
    }

    #[tokio::test]
    async fn quote_uses_dropoff_base_distance() {
        let Json(quote) = create(Extension(api(&[])), Json(params("Downtown", "Train Station")))
            .await
            .unwrap();

        assert_eq!(quote.fare, 10.0);
        assert_eq!(quote.dropoff, "Train Station");
    }

    #[tokio::test]
    async fn quote_for_unknown_place_is_a_bad_request() {
        let err = create(Extension(api(&[])), Json(params("Downtown", "Moon")))
            .await
            .unwrap_err();

        assert!(err.is_unknown_place_error());
        assert_eq!(status(err), StatusCode::BAD_REQUEST);
    }
}
