// Single-row parsing for `netstat -ibdn` output.

use super::ParseError;
use crate::models::InterfaceRecord;

const LINK_PREFIX: &str = "<Link#";
const MIN_COLUMNS: usize = 11;
const MAX_COLUMNS: usize = 13;
/// Rows with fewer columns than this have no Address column.
const FULL_COLUMNS: usize = 12;

/// Counter columns in the order netstat prints them, relative to Ipkts.
const COUNTER_COLUMNS: [&str; 6] = ["Ipkts", "Ierrs", "Ibytes", "Opkts", "Oerrs", "Obytes"];

/// What a row describes, decided from its Network and Address columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Link-layer view of the interface, carrying its `<Link#N>` identifier.
    Link(u32),
    Ipv4,
    Ipv6,
}

/// Counters from one netstat row. The name may be truncated by netstat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatFragment {
    pub name: String,
    pub is_up: bool,
    pub packets_recv: u64,
    pub errin: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub errout: u64,
    pub bytes_sent: u64,
    pub dropout: u64,
}

impl StatFragment {
    pub fn to_record(&self) -> InterfaceRecord {
        InterfaceRecord {
            name: self.name.clone(),
            is_up: self.is_up,
            bytes_sent: self.bytes_sent,
            bytes_recv: self.bytes_recv,
            packets_sent: self.packets_sent,
            packets_recv: self.packets_recv,
            errin: self.errin,
            errout: self.errout,
            dropout: self.dropout,
            transmit_speed: 0,
            receive_speed: 0,
        }
    }
}

/// A parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetstatRow {
    pub stat: StatFragment,
    pub kind: RowKind,
}

impl NetstatRow {
    pub fn link_id(&self) -> Option<u32> {
        match self.kind {
            RowKind::Link(id) => Some(id),
            RowKind::Ipv4 | RowKind::Ipv6 => None,
        }
    }
}

pub(crate) fn is_header(columns: &[&str]) -> bool {
    columns.first() == Some(&"Name")
}

/// Parse one line of `netstat -ibdn` output.
///
/// The column header yields [`ParseError::Header`] so callers can skip it.
pub fn parse_netstat_line(line: &str) -> Result<NetstatRow, ParseError> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if is_header(&columns) {
        return Err(ParseError::Header);
    }

    let count = columns.len();
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&count) {
        return Err(ParseError::ColumnCount {
            line: line.to_string(),
            count,
        });
    }
    // Address is omitted on link rows of interfaces without a hardware address.
    let base = usize::from(count >= FULL_COLUMNS);
    let address = (base == 1).then(|| columns[3]);
    let kind = classify(line, columns[2], address)?;

    let mut counters = [0u64; COUNTER_COLUMNS.len()];
    for (i, column) in COUNTER_COLUMNS.iter().enumerate() {
        counters[i] = parse_counter(line, column, columns[base + 3 + i])?;
    }
    let dropout = match columns.get(base + 10) {
        Some(value) => parse_counter(line, "Drop", value)?,
        None => 0,
    };

    let raw_name = columns[0];
    let name = raw_name.trim_end_matches('*');
    Ok(NetstatRow {
        stat: StatFragment {
            name: name.to_string(),
            is_up: name.len() == raw_name.len(),
            packets_recv: counters[0],
            errin: counters[1],
            bytes_recv: counters[2],
            packets_sent: counters[3],
            errout: counters[4],
            bytes_sent: counters[5],
            dropout,
        },
        kind,
    })
}

/// netstat prints `<Link#N>` under Network; some builds shift it to Address.
fn classify(line: &str, network: &str, address: Option<&str>) -> Result<RowKind, ParseError> {
    let link = std::iter::once(network)
        .chain(address)
        .find(|column| column.starts_with(LINK_PREFIX));
    if let Some(column) = link
        && let Some(rest) = column.strip_prefix(LINK_PREFIX)
    {
        return rest
            .strip_suffix('>')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(RowKind::Link)
            .ok_or_else(|| ParseError::LinkId {
                line: line.to_string(),
                value: column.to_string(),
            });
    }
    if network.contains(':') || address.is_some_and(|a| a.contains(':')) {
        Ok(RowKind::Ipv6)
    } else {
        Ok(RowKind::Ipv4)
    }
}

/// `-` marks counters netstat only tracks on the link row.
fn parse_counter(line: &str, column: &'static str, value: &str) -> Result<u64, ParseError> {
    if value == "-" {
        return Ok(0);
    }
    value.parse::<u64>().map_err(|_| ParseError::Counter {
        line: line.to_string(),
        column,
        value: value.to_string(),
    })
}
