use std::fmt;

use crate::error::Error;

/// One stored line, newline stripped, kept as the raw bytes that were read.
///
/// Lines that fail to decode are written back exactly as they were found.
#[derive(Clone, PartialEq, Eq)]
pub struct Line(Vec<u8>);

impl Line {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The line as text, or `CorruptRecord` if it is not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Error> {
        std::str::from_utf8(&self.0)
            .map_err(|err| Error::corrupt_record_error(format!("line is not valid UTF-8: {}", err)))
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(u8::is_ascii_whitespace)
    }
}

/// Splits file contents on `\n`, dropping a trailing `\r` from each line.
pub fn split_lines(bytes: &[u8]) -> Vec<Line> {
    if bytes.is_empty() {
        return vec![];
    }

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);

    body.split(|byte| *byte == b'\n')
        .map(|line| Line::from_bytes(line.strip_suffix(b"\r").unwrap_or(line)))
        .collect()
}

impl From<String> for Line {
    fn from(line: String) -> Self {
        Self(line.into_bytes())
    }
}

impl From<&str> for Line {
    fn from(line: &str) -> Self {
        Self(line.as_bytes().to_vec())
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}
