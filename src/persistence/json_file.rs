use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::commands::{Command, Event};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read a line-delimited JSON log. A missing file is an empty log; blank
/// lines are skipped; any line that fails to decode aborts the load.
fn read_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, PersistenceError> {
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let reader = BufReader::new(file);

    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = serde_json::from_str(line)
            .map_err(|source| PersistenceError::Decode { line: index + 1, source })?;
        records.push(record);
    }

    Ok(records)
}

/// Append records to a line-delimited JSON log, one object per line. Records
/// are separated by newlines; no newline is written before the first record
/// of a fresh file and none after the last.
fn append_records<T: Serialize, P: AsRef<Path>>(path: P, records: &[T]) -> Result<(), PersistenceError> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut has_content = fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    for record in records {
        let json = serde_json::to_string(record)?;
        if has_content {
            file.write_all(b"\n")?;
        }
        file.write_all(json.as_bytes())?;
        has_content = true;
    }

    Ok(())
}

pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>, PersistenceError> {
    read_records(path)
}

pub fn write_events<P: AsRef<Path>>(path: P, events: &[Event]) -> Result<(), PersistenceError> {
    append_records(path, events)
}

pub fn read_commands<P: AsRef<Path>>(path: P) -> Result<Vec<Command>, PersistenceError> {
    read_records(path)
}

pub fn write_commands<P: AsRef<Path>>(path: P, commands: &[Command]) -> Result<(), PersistenceError> {
    append_records(path, commands)
}
