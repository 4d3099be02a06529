// netstat -ibdn parsing: rows, truncated-name resolution, per-interface aggregation.

mod aggregate;
mod line;
mod usage;

use thiserror::Error;

pub use aggregate::{ALL_INTERFACES, aggregate, io_counters_all};
pub use line::{NetstatRow, RowKind, StatFragment, parse_netstat_line};
pub use usage::{NameUsage, Resolution, ResolvedName, TruncationIndex};

use crate::models::InterfaceRecord;

/// Errors from parsing netstat output. Any of them aborts the whole parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is the column header. Only the output parser swallows it.
    #[error("line is the netstat header")]
    Header,

    #[error("expected the netstat header, found {line:?}")]
    HeaderMismatch { line: String },

    #[error("header repeated at line {line_no}: {line:?}")]
    RepeatedHeader { line_no: usize, line: String },

    #[error("line {line:?} has {count} columns, expected 11 to 13")]
    ColumnCount { line: String, count: usize },

    #[error("column {column} is not a counter ({value:?}) in line {line:?}")]
    Counter {
        line: String,
        column: &'static str,
        value: String,
    },

    #[error("malformed link identifier {value:?} in line {line:?}")]
    LinkId { line: String, value: String },
}

impl ParseError {
    /// Raw line the error originated from, when there is one.
    pub fn line(&self) -> Option<&str> {
        match self {
            ParseError::Header => None,
            ParseError::HeaderMismatch { line }
            | ParseError::RepeatedHeader { line, .. }
            | ParseError::ColumnCount { line, .. }
            | ParseError::Counter { line, .. }
            | ParseError::LinkId { line, .. } => Some(line),
        }
    }
}

/// Parse full `netstat -ibdn` output into rows, in source order.
///
/// The first non-blank line must be the header. Header-only or empty output
/// yields no rows (the interface may have gone away between calls).
pub fn parse_netstat_output(output: &str) -> Result<Vec<NetstatRow>, ParseError> {
    let mut rows = Vec::new();
    let mut seen_header = false;

    for (index, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_netstat_line(line) {
            Err(ParseError::Header) if !seen_header => seen_header = true,
            Err(ParseError::Header) => {
                return Err(ParseError::RepeatedHeader {
                    line_no: index + 1,
                    line: line.to_string(),
                });
            }
            _ if !seen_header => {
                return Err(ParseError::HeaderMismatch {
                    line: line.to_string(),
                });
            }
            Ok(row) => rows.push(row),
            Err(e) => return Err(e),
        }
    }
    Ok(rows)
}

/// Parse netstat output and reduce it to one record per logical interface.
pub fn interface_records(output: &str) -> Result<Vec<InterfaceRecord>, ParseError> {
    let rows = parse_netstat_output(output)?;
    let usage = NameUsage::new(&rows);
    Ok(aggregate(&rows, &usage))
}
