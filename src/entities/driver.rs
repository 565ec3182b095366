use serde::{Deserialize, Serialize};

use crate::entities::Place;

/// A driver as seen by dispatch: identity, vehicle class and current place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    id: String,
    name: String,
    vehicle_class: String,
    location: Place,
}

impl Driver {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        vehicle_class: impl Into<String>,
        location: Place,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vehicle_class: vehicle_class.into(),
            location,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle_class(&self) -> &str {
        &self.vehicle_class
    }

    pub fn location(&self) -> &Place {
        &self.location
    }

    pub fn is_class(&self, vehicle_class: &str) -> bool {
        self.vehicle_class == vehicle_class
    }
}

/// What the registration surface supplies for a new driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverRegistration {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub age: u32,
    pub phone_number: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    /// Name of the catalog place the driver starts from.
    pub location: String,
}
