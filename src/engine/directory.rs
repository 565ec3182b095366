use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::entities::{Driver, Place};
use crate::error::Error;
use crate::places::PlaceRegistry;
use crate::store::{contains_separator, decode_lines, DriverRecord, Line, Record, RecordStore};

use super::dispatch::Candidates;

/// The authoritative set of drivers, persisted one line per driver.
///
/// Every read or mutation happens inside a [`DirectoryTx`], and only one
/// transaction can be open at a time.
pub struct DriverDirectory {
    store: Arc<dyn RecordStore>,
    places: PlaceRegistry,
    lock: Mutex<()>,
    lock_timeout: Duration,
}

impl DriverDirectory {
    pub fn new(store: Arc<dyn RecordStore>, places: PlaceRegistry, lock_timeout: Duration) -> Self {
        Self {
            store,
            places,
            lock: Mutex::new(()),
            lock_timeout,
        }
    }

    /// Takes the directory lock, failing with `Busy` once the timeout lapses,
    /// and loads the current records.
    #[tracing::instrument(skip(self))]
    pub async fn begin(&self) -> Result<DirectoryTx<'_>, Error> {
        let guard = tokio::time::timeout(self.lock_timeout, self.lock.lock())
            .await
            .map_err(|_| {
                tracing::warn!("timed out waiting for the driver directory");
                Error::busy_error()
            })?;

        let lines = self.store.read_lines().await?;

        Ok(DirectoryTx::new(guard, self, lines))
    }

    pub async fn all(&self) -> Result<Vec<Driver>, Error> {
        Ok(self.begin().await?.drivers())
    }

    pub async fn find(&self, id: &str) -> Result<Driver, Error> {
        self.begin()
            .await?
            .find(id)
            .ok_or_else(|| Error::unknown_driver_error(id))
    }

    pub async fn find_by_vehicle_class(&self, vehicle_class: &str) -> Result<Vec<Driver>, Error> {
        Ok(self.begin().await?.find_by_vehicle_class(vehicle_class))
    }

    #[tracing::instrument(skip(self))]
    pub async fn relocate(&self, id: &str, place_name: &str) -> Result<Driver, Error> {
        let mut tx = self.begin().await?;
        let place = self.places.resolve(place_name)?.clone();
        let driver = tx.relocate(id, &place)?;
        tx.commit().await?;

        Ok(driver)
    }

    #[tracing::instrument(skip(self, record), fields(driver = %record.username))]
    pub async fn register(&self, record: DriverRecord) -> Result<Driver, Error> {
        let mut tx = self.begin().await?;
        let driver = tx.insert(record)?;
        tx.commit().await?;

        Ok(driver)
    }
}

/// An exclusive read-modify-write session over the directory.
///
/// Changes are buffered until [`commit`](Self::commit); dropping the
/// transaction discards them.
pub struct DirectoryTx<'a> {
    _guard: MutexGuard<'a, ()>,
    directory: &'a DriverDirectory,
    lines: Vec<Line>,
    // index into `lines` for every usable record, first occurrence of a username only
    records: Vec<(usize, DriverRecord)>,
    appended: usize,
    rewritten: bool,
}

impl<'a> DirectoryTx<'a> {
    fn new(guard: MutexGuard<'a, ()>, directory: &'a DriverDirectory, lines: Vec<Line>) -> Self {
        let mut seen = HashSet::new();
        let records = decode_lines::<DriverRecord>(&lines)
            .filter(|(index, record)| {
                if seen.insert(record.username.clone()) {
                    return true;
                }

                tracing::warn!(
                    line = index + 1,
                    driver = %record.username,
                    "skipping duplicate driver record"
                );
                false
            })
            .collect();

        Self {
            _guard: guard,
            directory,
            lines,
            records,
            appended: 0,
            rewritten: false,
        }
    }

    fn resolve(&self, record: &DriverRecord) -> Option<Driver> {
        match record.to_driver(&self.directory.places) {
            Ok(driver) => Some(driver),
            Err(err) => {
                tracing::warn!(driver = %record.username, "skipping driver: {}", err);
                None
            }
        }
    }

    /// Every driver whose location resolves, in file order.
    pub fn drivers(&self) -> Vec<Driver> {
        self.records
            .iter()
            .filter_map(|(_, record)| self.resolve(record))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<Driver> {
        self.records
            .iter()
            .find(|(_, record)| record.username == id)
            .and_then(|(_, record)| self.resolve(record))
    }

    /// Drivers whose vehicle class equals `vehicle_class` exactly, in file order.
    pub fn find_by_vehicle_class(&self, vehicle_class: &str) -> Vec<Driver> {
        self.records
            .iter()
            .filter(|(_, record)| record.vehicle_type == vehicle_class)
            .filter_map(|(_, record)| self.resolve(record))
            .collect()
    }

    /// Moves a driver to a catalog place. Unrelated fields and lines are kept as they are.
    pub fn relocate(&mut self, id: &str, place: &Place) -> Result<Driver, Error> {
        let known = self.directory.places.resolve(&place.name)?;
        if known != place {
            return Err(Error::unknown_place_error(&place.name));
        }

        let (index, record) = self
            .records
            .iter_mut()
            .find(|(_, record)| record.username == id)
            .ok_or_else(|| Error::unknown_driver_error(id))?;

        record.location = place.name.clone();
        self.lines[*index] = Line::from(record.encode()?);
        self.rewritten = true;

        let record = record.clone();
        let driver = record.to_driver(&self.directory.places)?;

        tracing::info!(driver = %id, place = %place.name, "relocated driver");

        Ok(driver)
    }

    /// Adds a new driver. The username must be free and the location a catalog place.
    pub fn insert(&mut self, record: DriverRecord) -> Result<Driver, Error> {
        if record.to_fields().iter().any(|field| contains_separator(field)) {
            return Err(Error::invalid_input_error());
        }

        if self.records.iter().any(|(_, r)| r.username == record.username) {
            return Err(Error::duplicate_driver_error(&record.username));
        }

        self.directory.places.resolve(&record.location)?;
        let driver = record.to_driver(&self.directory.places)?;

        self.lines.push(Line::from(record.encode()?));
        self.records.push((self.lines.len() - 1, record));
        self.appended += 1;

        Ok(driver)
    }

    /// Persists buffered changes and releases the lock.
    pub async fn commit(self) -> Result<(), Error> {
        let store = &self.directory.store;

        if self.rewritten {
            store.replace_lines(&self.lines).await?;
        } else {
            let start = self.lines.len() - self.appended;
            for line in &self.lines[start..] {
                store.append_line(line.as_str()?).await?;
            }
        }

        Ok(())
    }
}

impl Candidates for DirectoryTx<'_> {
    fn find_by_vehicle_class(&self, vehicle_class: &str) -> Vec<Driver> {
        DirectoryTx::find_by_vehicle_class(self, vehicle_class)
    }
}
