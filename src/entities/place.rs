use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::geo;

/// A named pickup, drop-off or home-base location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
    /// Nominal kilometres from the city's reference point.
    pub base_distance: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, base_distance: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(latitude, longitude),
            base_distance,
        }
    }

    pub fn distance_km(&self, other: &Place) -> f64 {
        geo::haversine_km(self.coordinates.into(), other.coordinates.into())
    }
}
