use std::sync::Mutex;

use async_trait::async_trait;

use super::{Line, RecordStore};
use crate::error::Error;

#[derive(Debug, Default)]
pub struct MemoryStore {
    lines: Mutex<Vec<Line>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().map(|line| Line::from(Into::<String>::into(line))).collect()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Line>>, Error> {
        self.lines
            .lock()
            .map_err(|_| Error::storage_unavailable_error("memory store poisoned"))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_lines(&self) -> Result<Vec<Line>, Error> {
        Ok(self.lock()?.clone())
    }

    async fn append_line(&self, line: &str) -> Result<(), Error> {
        self.lock()?.push(Line::from(line));
        Ok(())
    }

    async fn replace_lines(&self, lines: &[Line]) -> Result<(), Error> {
        *self.lock()? = lines.to_vec();
        Ok(())
    }
}

#[test]
fn memory_store_appends_and_replaces() {
    use tokio_test::block_on;

    let store = MemoryStore::with_lines(["a"]);

    block_on(store.append_line("b")).unwrap();
    assert_eq!(block_on(store.read_lines()).unwrap(), vec!["a", "b"]);

    block_on(store.replace_lines(&[Line::from("c")])).unwrap();
    assert_eq!(block_on(store.read_lines()).unwrap(), vec!["c"]);
}
