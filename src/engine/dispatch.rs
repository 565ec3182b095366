use crate::entities::{Driver, Place};

/// Anything that can list the drivers of one vehicle class in a stable order.
pub trait Candidates {
    fn find_by_vehicle_class(&self, vehicle_class: &str) -> Vec<Driver>;
}

impl Candidates for [Driver] {
    fn find_by_vehicle_class(&self, vehicle_class: &str) -> Vec<Driver> {
        self.iter()
            .filter(|driver| driver.is_class(vehicle_class))
            .cloned()
            .collect()
    }
}

impl Candidates for Vec<Driver> {
    fn find_by_vehicle_class(&self, vehicle_class: &str) -> Vec<Driver> {
        self.as_slice().find_by_vehicle_class(vehicle_class)
    }
}

/// Picks the driver of `vehicle_class` closest to `pickup`.
///
/// Returns `None` when there are no candidates. On equal distances the
/// candidate listed first wins. Nothing is mutated.
#[tracing::instrument(skip(pickup, directory), fields(pickup = %pickup.name))]
pub fn dispatch<C>(pickup: &Place, vehicle_class: &str, directory: &C) -> Option<Driver>
where
    C: Candidates + ?Sized,
{
    let candidates = directory.find_by_vehicle_class(vehicle_class);

    let (driver, distance) = nearest(pickup, &candidates)?;
    tracing::info!(driver = %driver.id(), distance_km = distance, "selected nearest driver");

    Some(driver.clone())
}

/// Linear argmin over `candidates`; strict comparison keeps the earliest on ties.
pub fn nearest<'a>(pickup: &Place, candidates: &'a [Driver]) -> Option<(&'a Driver, f64)> {
    let mut best: Option<(&Driver, f64)> = None;

    for candidate in candidates {
        let distance = pickup.distance_km(candidate.location());

        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best
}
