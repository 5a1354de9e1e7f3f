// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Time-Series Sinks
// ─────────────────────────────────────────────────────────────────────
//! Destinations for per-turn records.
//!
//! The monitor owns storage; the kernel only appends one record per
//! turn through [`TurnSink`]. [`CsvSeries`] writes the frozen column
//! layout so new rows line up with previously recorded history.

use std::io::{BufRead, Write};

use esiv_types::{header_line, parse_header, GovernorError, GovernorResult, TurnRecord};

/// Trait for time-series destinations.
pub trait TurnSink {
    fn append(&mut self, record: &TurnRecord) -> GovernorResult<()>;
}

/// In-memory series, mainly for tests and replay comparisons.
#[derive(Debug, Default, Clone)]
pub struct MemorySeries {
    records: Vec<TurnRecord>,
}

impl MemorySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of turns that raised a void event.
    pub fn void_events(&self) -> usize {
        self.records.iter().filter(|r| r.void_event).count()
    }

    pub fn into_records(self) -> Vec<TurnRecord> {
        self.records
    }
}

impl TurnSink for MemorySeries {
    fn append(&mut self, record: &TurnRecord) -> GovernorResult<()> {
        self.records.push(*record);
        Ok(())
    }
}

/// CSV writer over any `Write`.
///
/// The header is written before the first row unless the series was
/// opened with [`CsvSeries::resume`] on an existing file.
pub struct CsvSeries<W: Write> {
    writer: W,
    header_written: bool,
    rows: u64,
}

impl<W: Write> CsvSeries<W> {
    /// Start a new series; the header precedes the first row.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows: 0,
        }
    }

    /// Append to a series whose header is already on disk.
    pub fn resume(writer: W) -> Self {
        Self {
            writer,
            header_written: true,
            rows: 0,
        }
    }

    /// Rows appended through this writer.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> GovernorResult<()> {
        self.writer
            .flush()
            .map_err(|e| GovernorError::Sink(format!("flush failed: {e}")))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TurnSink for CsvSeries<W> {
    fn append(&mut self, record: &TurnRecord) -> GovernorResult<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", header_line())
                .map_err(|e| GovernorError::Sink(format!("header write failed: {e}")))?;
            self.header_written = true;
        }
        writeln!(self.writer, "{}", record.to_csv_row()).map_err(|e| {
            GovernorError::Sink(format!("row {} write failed: {e}", self.rows + 1))
        })?;
        self.rows += 1;
        Ok(())
    }
}

/// Read a CSV history: header check, then one record per non-empty line.
pub fn read_history<R: BufRead>(reader: R) -> GovernorResult<Vec<TurnRecord>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line.map_err(|e| GovernorError::Sink(format!("read failed: {e}")))?,
        None => return Ok(Vec::new()),
    };
    parse_header(&header)?;

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line.map_err(|e| GovernorError::Sink(format!("read failed: {e}")))?;
        if line.trim().is_empty() {
            continue;
        }
        // idx 0 is file line 2
        let record = TurnRecord::from_csv_row(&line)
            .map_err(|e| GovernorError::Schema(format!("line {}: {e}", idx + 2)))?;
        records.push(record);
    }
    Ok(records)
}
