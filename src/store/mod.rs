//! Line-oriented durable storage behind the driver directory and ride ledger.

mod codec;
mod file;
mod line;
mod memory;

pub use codec::{contains_separator, decode_lines, DriverRecord, Record, RideRecord, RiderRecord};
pub use file::FileStore;
pub use line::{split_lines, Line};
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Error;

/// The read-all / append / rewrite contract the engine depends on.
///
/// Implementations report failures as `StorageUnavailable`. Lines come back
/// as raw bytes; decoding is left to the caller. Stores do not serialise
/// callers against each other; the directory does that.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read_lines(&self) -> Result<Vec<Line>, Error>;
    async fn append_line(&self, line: &str) -> Result<(), Error>;
    async fn replace_lines(&self, lines: &[Line]) -> Result<(), Error>;
}
