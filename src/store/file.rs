use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use super::{split_lines, Line, RecordStore};
use crate::error::Error;

/// One record per line in a plain text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<(), Error> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Whether a non-empty file is missing its final newline.
async fn lacks_trailing_newline(file: &mut File) -> Result<bool, Error> {
    if file.metadata().await?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1)).await?;
    file.read_exact(&mut last).await?;

    Ok(last[0] != b'\n')
}

#[async_trait]
impl RecordStore for FileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_lines(&self) -> Result<Vec<Line>, Error> {
        match fs::read(&self.path).await {
            Ok(contents) => Ok(split_lines(&contents)),
            // nothing has been written yet
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(vec![]),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn append_line(&self, line: &str) -> Result<(), Error> {
        self.ensure_parent().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut record = String::with_capacity(line.len() + 2);
        // a hand-edited file may end mid-line
        if lacks_trailing_newline(&mut file).await? {
            record.push('\n');
        }
        record.push_str(line);
        record.push('\n');

        file.write_all(record.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, lines), fields(path = %self.path.display(), count = lines.len()))]
    async fn replace_lines(&self, lines: &[Line]) -> Result<(), Error> {
        self.ensure_parent().await?;

        let mut contents = Vec::new();
        for line in lines {
            contents.extend_from_slice(line.as_bytes());
            contents.push(b'\n');
        }

        let temp = self.temp_path();
        fs::write(&temp, contents).await?;
        fs::rename(&temp, &self.path).await?;

        Ok(())
    }
}
