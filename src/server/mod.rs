mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::error::Error;
use crate::server::handlers::{bookings, drivers, places, quotes, riders};

pub use crate::api::DynAPI;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/places", get(places::list))
        .route("/places/:name", get(places::find))
        .route("/drivers", get(drivers::list).post(drivers::create))
        .route("/drivers/:id", get(drivers::find))
        .route("/drivers/:id/location", patch(drivers::relocate))
        .route("/drivers/:id/rides", get(drivers::rides))
        .route("/quotes", post(quotes::create))
        .route("/bookings", post(bookings::create))
        .route("/riders", post(riders::create))
        .route("/riders/:id", get(riders::find))
        .route("/riders/:id/rides", get(riders::rides))
        .layer(Extension(api))
}

/// Serves the API until ctrl-c.
pub async fn serve(api: DynAPI, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(|err| {
            tracing::error!("failed to bind {}: {}", addr, err);
            Error::unexpected_error()
        })?
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            Error::unexpected_error()
        })
}
