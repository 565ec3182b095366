use std::sync::Arc;

use crate::entities::Ride;
use crate::error::Error;
use crate::places::PlaceRegistry;
use crate::store::{Line, Record, RecordStore, RideRecord};

/// Append-only log of completed rides.
pub struct RideLedger {
    store: Arc<dyn RecordStore>,
    places: PlaceRegistry,
}

impl RideLedger {
    pub fn new(store: Arc<dyn RecordStore>, places: PlaceRegistry) -> Self {
        Self { store, places }
    }

    #[tracing::instrument(skip(self, ride), fields(ride = %ride.id))]
    pub async fn record(&self, ride: &Ride) -> Result<(), Error> {
        let line = RideRecord::from(ride).encode()?;
        self.store.append_line(&line).await
    }

    pub async fn query_by_rider(&self, rider_id: &str) -> Result<RideHistory, Error> {
        self.query(RideFilter::Rider(rider_id.to_string())).await
    }

    pub async fn query_by_driver(&self, driver_id: &str) -> Result<RideHistory, Error> {
        self.query(RideFilter::Driver(driver_id.to_string())).await
    }

    pub async fn all(&self) -> Result<RideHistory, Error> {
        self.query(RideFilter::All).await
    }

    async fn query(&self, filter: RideFilter) -> Result<RideHistory, Error> {
        let lines = self.store.read_lines().await?;

        Ok(RideHistory {
            lines: lines.into_iter().enumerate(),
            places: self.places.clone(),
            filter,
        })
    }
}

#[derive(Debug, Clone)]
enum RideFilter {
    All,
    Rider(String),
    Driver(String),
}

impl RideFilter {
    fn matches(&self, ride: &Ride) -> bool {
        match self {
            Self::All => true,
            Self::Rider(id) => ride.involves_rider(id),
            Self::Driver(id) => ride.involves_driver(id),
        }
    }
}

/// Rides matching one query, decoded one line at a time in ledger order.
///
/// Corrupt lines are logged and skipped.
pub struct RideHistory {
    lines: std::iter::Enumerate<std::vec::IntoIter<Line>>,
    places: PlaceRegistry,
    filter: RideFilter,
}

impl Iterator for RideHistory {
    type Item = Ride;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            if line.is_blank() {
                continue;
            }

            let ride = line
                .as_str()
                .and_then(RideRecord::decode)
                .and_then(|record| record.into_ride(&self.places));

            match ride {
                Ok(ride) if self.filter.matches(&ride) => return Some(ride),
                Ok(_) => {}
                Err(err) => tracing::warn!(line = index + 1, "skipping ride record: {}", err),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn ledger(lines: &[&str]) -> RideLedger {
        RideLedger::new(
            Arc::new(MemoryStore::with_lines(lines.iter().copied())),
            PlaceRegistry::default(),
        )
    }

    #[tokio::test]
    async fn recorded_ride_comes_back_unchanged() {
        let ledger = ledger(&[]);
        let places = PlaceRegistry::default();
        let ride = Ride::new(
            "rider-1",
            "asha",
            places.find("Downtown").unwrap().clone(),
            places.find("Airport").unwrap().clone(),
            15.0,
            "Car",
        );

        ledger.record(&ride).await.unwrap();

        let by_rider: Vec<Ride> = ledger.query_by_rider("rider-1").await.unwrap().collect();
        let by_driver: Vec<Ride> = ledger.query_by_driver("asha").await.unwrap().collect();

        assert_eq!(by_rider, vec![ride.clone()]);
        assert_eq!(by_driver, vec![ride]);
    }

    #[tokio::test]
    async fn queries_keep_ledger_order_and_filter_by_identity() {
        let ledger = ledger(&[
            "1-1,ana,asha,Downtown,Mall,8,Car",
            "1-2,ben,asha,Mall,Airport,15,Car",
            "1-3,ana,bilal,Airport,Downtown,5,Bike",
        ]);

        let ana: Vec<String> = ledger.query_by_rider("ana").await.unwrap().map(|r| r.id).collect();
        assert_eq!(ana, vec!["1-1", "1-3"]);

        let asha: Vec<String> = ledger.query_by_driver("asha").await.unwrap().map(|r| r.id).collect();
        assert_eq!(asha, vec!["1-1", "1-2"]);

        assert_eq!(ledger.query_by_rider("nobody").await.unwrap().count(), 0);
    }

    #[tokio::test]
    async fn one_corrupt_line_among_valid_ones_is_skipped() {
        let ledger = ledger(&[
            "1-1,ana,asha,Downtown,Mall,8,Car",
            "1-2,ana,asha,Downtown,Mall,8",
            "1-3,ana,asha,Mall,Airport,15,Car",
            "1-4,ana,asha,Mall,Airport,15,Car",
        ]);

        assert_eq!(ledger.all().await.unwrap().count(), 3);
    }

    #[tokio::test]
    async fn non_utf8_line_is_skipped_like_any_corrupt_line() {
        let store = MemoryStore::new();
        store.append_line("1-1,ana,asha,Downtown,Mall,8,Car").await.unwrap();
        let mut lines = store.read_lines().await.unwrap();
        lines.push(Line::from_bytes(&b"1-2,an\xffa,asha,Mall,Airport,15,Car"[..]));
        lines.push(Line::from("1-3,ana,asha,Mall,Airport,15,Car"));
        store.replace_lines(&lines).await.unwrap();

        let ledger = RideLedger::new(Arc::new(store), PlaceRegistry::default());
        let ids: Vec<String> = ledger.query_by_rider("ana").await.unwrap().map(|r| r.id).collect();

        assert_eq!(ids, vec!["1-1", "1-3"]);
    }

    #[tokio::test]
    async fn each_query_restarts_from_the_beginning() {
        let ledger = ledger(&["1-1,ana,asha,Downtown,Mall,8,Car"]);

        assert_eq!(ledger.query_by_rider("ana").await.unwrap().count(), 1);
        assert_eq!(ledger.query_by_rider("ana").await.unwrap().count(), 1);
    }
}
