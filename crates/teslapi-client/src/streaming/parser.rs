//! Telemetry line parser
//!
//! Turns the CSV wire format into records, buffering partial lines across
//! chunks.

use std::collections::HashMap;

use tracing::trace;

use super::types::{StreamError, StreamResult, TelemetryRecord};

/// Line parser state
#[derive(Debug, Default)]
pub struct LineParser {
    /// Buffer for incomplete lines
    buffer: Vec<u8>,
    columns: Vec<String>,
}

impl LineParser {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            buffer: Vec::new(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    /// Feed bytes into the parser and extract any complete records
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamResult<TelemetryRecord>> {
        self.buffer.extend_from_slice(bytes);

        let mut records = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(record) = self.process_line(&line) {
                records.push(record);
            }
        }
        records
    }

    /// Parse whatever is left once the stream has ended
    pub fn finish(&mut self) -> Option<StreamResult<TelemetryRecord>> {
        let rest = std::mem::take(&mut self.buffer);
        self.process_line(&rest)
    }

    fn process_line(&self, line: &[u8]) -> Option<StreamResult<TelemetryRecord>> {
        let line = match std::str::from_utf8(line) {
            Ok(s) => s.trim_end_matches(['\r', '\n']),
            Err(_) => {
                return Some(Err(StreamError::Parse(
                    "Invalid UTF-8 in telemetry line".into(),
                )))
            }
        };

        // Keepalive
        if line.trim().is_empty() {
            trace!("empty telemetry line");
            return None;
        }

        Some(self.parse_record(line))
    }

    fn parse_record(&self, line: &str) -> StreamResult<TelemetryRecord> {
        let mut fields = line.split(',');

        let timestamp = fields
            .next()
            .map(str::trim)
            .and_then(|ts| ts.parse::<i64>().ok())
            .ok_or_else(|| StreamError::Parse(format!("Invalid timestamp in line: {}", line)))?;

        let fields: Vec<&str> = fields.collect();
        if fields.len() > self.columns.len() {
            return Err(StreamError::Parse(format!(
                "Expected {} columns, got {} (line: {})",
                self.columns.len(),
                fields.len(),
                line
            )));
        }

        let values = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = fields
                    .get(i)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                (column.clone(), value)
            })
            .collect::<HashMap<_, _>>();

        Ok(TelemetryRecord { timestamp, values })
    }
}
