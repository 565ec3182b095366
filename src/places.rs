//! The fixed catalog of places riders and drivers choose from.

use std::collections::HashSet;

use serde::Serialize;

use crate::entities::Place;
use crate::error::Error;

#[derive(Clone, Debug, Serialize)]
pub struct PlaceRegistry {
    places: Vec<Place>,
}

impl PlaceRegistry {
    /// Builds a registry from an ordered list. Duplicate names are rejected.
    pub fn new(places: Vec<Place>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for place in places.iter() {
            if !seen.insert(place.name.as_str()) {
                return Err(Error::invalid_input_error());
            }
        }

        Ok(Self { places })
    }

    pub fn all(&self) -> &[Place] {
        &self.places
    }

    pub fn find(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.name == name)
    }

    /// Like [`find`](Self::find), but an absent name is an `UnknownPlace` error.
    pub fn resolve(&self, name: &str) -> Result<&Place, Error> {
        self.find(name)
            .ok_or_else(|| Error::unknown_place_error(name))
    }

}

impl Default for PlaceRegistry {
    fn default() -> Self {
        Self {
            places: vec![
                Place::new("Downtown", 40.7128, -74.0060, 5.0),
                Place::new("Airport", 40.6413, -73.7781, 15.0),
                Place::new("Train Station", 40.7506, -73.9935, 10.0),
                Place::new("Mall", 40.7580, -73.9855, 8.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_ordered() {
        let registry = PlaceRegistry::default();
        let names: Vec<&str> = registry.all().iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Downtown", "Airport", "Train Station", "Mall"]);
    }

    #[test]
    fn lookup_is_exact() {
        let registry = PlaceRegistry::default();

        assert_eq!(registry.find("Airport").unwrap().base_distance, 15.0);
        assert!(registry.find("airport").is_none());
        assert!(registry.resolve("Moon").unwrap_err().is_unknown_place_error());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = PlaceRegistry::new(vec![
            Place::new("Downtown", 40.7128, -74.0060, 5.0),
            Place::new("Downtown", 0.0, 0.0, 1.0),
        ]);

        assert!(result.is_err());
    }
}
