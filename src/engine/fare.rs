use crate::config::FarePolicy;
use crate::entities::Place;

/// Fare for a ride from `pickup` to `dropoff`.
///
/// `BaseDistance` charges for the drop-off's nominal distance and ignores the
/// pickup entirely; `Haversine` charges for the great-circle trip length.
pub fn fare(policy: FarePolicy, rate_per_km: f64, pickup: &Place, dropoff: &Place) -> f64 {
    let km = match policy {
        FarePolicy::BaseDistance => dropoff.base_distance,
        FarePolicy::Haversine => pickup.distance_km(dropoff),
    };

    km * rate_per_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::PlaceRegistry;

    #[test]
    fn base_distance_fare_uses_dropoff_only() {
        let places = PlaceRegistry::default();
        let downtown = places.find("Downtown").unwrap();
        let airport = places.find("Airport").unwrap();
        let mall = places.find("Mall").unwrap();

        assert_eq!(fare(FarePolicy::BaseDistance, 1.0, downtown, airport), 15.0);
        assert_eq!(fare(FarePolicy::BaseDistance, 1.0, mall, airport), 15.0);
        assert_eq!(fare(FarePolicy::BaseDistance, 2.5, airport, downtown), 12.5);
    }

    #[test]
    fn haversine_fare_follows_trip_length() {
        let places = PlaceRegistry::default();
        let downtown = places.find("Downtown").unwrap();
        let airport = places.find("Airport").unwrap();

        let there = fare(FarePolicy::Haversine, 1.0, downtown, airport);
        assert!((there - 20.8).abs() < 0.1);
        assert_eq!(fare(FarePolicy::Haversine, 1.0, downtown, downtown), 0.0);
    }
}
