//! CSV ingestion.
//!
//! Files are accepted only when they declare themselves as CSV through their
//! extension. Reading happens on a worker thread; each request carries a
//! ticket so the caller can tell the newest completion from stale ones.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::domain::{Dataset, DomainError, DomainResult, Record};

const UTF8_BOM: char = '\u{feff}';

/// Whether `path` names a CSV file.
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Parses CSV text with a header row into records.
///
/// Rows may be shorter or longer than the header: short rows yield records
/// without the trailing columns, surplus cells are dropped. Cell text is
/// kept verbatim, except that invalid UTF-8 is replaced with U+FFFD.
pub fn read_records<R: Read>(reader: R) -> DomainResult<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let header = String::from_utf8_lossy(header);
            if i == 0 {
                header.trim_start_matches(UTF8_BOM).to_string()
            } else {
                header.into_owned()
            }
        })
        .collect();

    let mut records = Vec::new();
    let mut lossy_rows = 0usize;
    for result in reader.byte_records() {
        let row = result?;
        if std::str::from_utf8(row.as_slice()).is_err() {
            lossy_rows += 1;
        }
        let record = Record::from_pairs(
            headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(|cell| String::from_utf8_lossy(cell).into_owned())),
        );
        records.push(record);
    }
    if lossy_rows > 0 {
        warn!(rows = lossy_rows, "invalid UTF-8 replaced while reading CSV");
    }

    Ok(Dataset::new(headers, records))
}

pub fn load_csv_file(path: &Path) -> DomainResult<Dataset> {
    if !is_csv_path(path) {
        return Err(DomainError::NotCsv(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let dataset = read_records(file)?;
    Ok(dataset.with_source(path))
}

/// A request to ingest one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: u64,
    pub path: PathBuf,
}

/// The completion of a [`LoadRequest`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: u64,
    pub path: PathBuf,
    pub result: DomainResult<Dataset>,
}

impl LoadOutcome {
    /// Runs a request to completion on the calling thread.
    pub fn run(request: LoadRequest) -> Self {
        let result = load_csv_file(&request.path);
        Self {
            ticket: request.ticket,
            path: request.path,
            result,
        }
    }
}

/// Reads CSV files off the UI thread and hands back completions in arrival
/// order.
#[derive(Debug)]
pub struct CsvLoader {
    sender: Sender<LoadOutcome>,
    receiver: Receiver<LoadOutcome>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn submit(&self, request: LoadRequest) {
        let sender = self.sender.clone();
        debug!(ticket = request.ticket, path = %request.path.display(), "starting CSV load");
        thread::spawn(move || {
            let outcome = LoadOutcome::run(request);
            if sender.send(outcome).is_err() {
                warn!("CSV load finished after the dashboard closed");
            }
        });
    }

    /// Returns a finished load, if any, without blocking.
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
