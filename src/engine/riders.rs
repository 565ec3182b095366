use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::entities::Rider;
use crate::error::Error;
use crate::store::{contains_separator, decode_lines, Record, RecordStore, RiderRecord};

/// Registered riders, one line per rider, append-only.
pub struct RiderRoster {
    store: Arc<dyn RecordStore>,
    // serialises the uniqueness check with the append
    lock: Mutex<()>,
    lock_timeout: Duration,
}

impl RiderRoster {
    pub fn new(store: Arc<dyn RecordStore>, lock_timeout: Duration) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            lock_timeout,
        }
    }

    async fn records(&self) -> Result<Vec<RiderRecord>, Error> {
        let lines = self.store.read_lines().await?;
        let mut seen = HashSet::new();

        Ok(decode_lines::<RiderRecord>(&lines)
            .map(|(_, record)| record)
            .filter(|record| seen.insert(record.username.clone()))
            .collect())
    }

    pub async fn find(&self, id: &str) -> Result<Rider, Error> {
        self.records()
            .await?
            .iter()
            .find(|record| record.username == id)
            .map(RiderRecord::to_rider)
            .ok_or_else(|| Error::unknown_rider_error(id))
    }

    #[tracing::instrument(skip(self, record), fields(rider = %record.username))]
    pub async fn register(&self, record: RiderRecord) -> Result<Rider, Error> {
        if record.to_fields().iter().any(|field| contains_separator(field)) {
            return Err(Error::invalid_input_error());
        }

        let _guard = tokio::time::timeout(self.lock_timeout, self.lock.lock())
            .await
            .map_err(|_| Error::busy_error())?;

        if self.records().await?.iter().any(|r| r.username == record.username) {
            return Err(Error::duplicate_rider_error(&record.username));
        }

        self.store.append_line(&record.encode()?).await?;
        tracing::info!("registered rider");

        Ok(record.to_rider())
    }
}
