// Collapse resolved netstat rows into per-interface records.

use super::{NameUsage, NetstatRow, Resolution};
use crate::models::InterfaceRecord;

/// Name of the record produced by [`io_counters_all`].
pub const ALL_INTERFACES: &str = "all";

/// Build one record per logical interface, in order of first appearance.
///
/// Only link rows contribute counters; address rows repeat the same numbers
/// and would double count. A truncated name yields one record per LinkID,
/// all carrying the printed name.
pub fn aggregate(rows: &[NetstatRow], usage: &NameUsage) -> Vec<InterfaceRecord> {
    let mut records = Vec::with_capacity(rows.len());
    for resolved in usage.resolve() {
        match resolved.resolution {
            Resolution::Single { link_row } => records.push(rows[link_row].stat.to_record()),
            Resolution::Truncated { groups } => {
                records.extend(groups.iter().map(|(_, group)| sum_rows(rows, group)));
            }
            Resolution::Ambiguous { link_rows, .. } => records.push(sum_rows(rows, &link_rows)),
            Resolution::Unlinked => {}
        }
    }
    records
}

fn sum_rows(rows: &[NetstatRow], indices: &[usize]) -> InterfaceRecord {
    let mut iter = indices.iter().map(|&i| &rows[i].stat);
    let Some(first) = iter.next() else {
        return InterfaceRecord::default();
    };
    let mut record = first.to_record();
    for stat in iter {
        record.is_up |= stat.is_up;
        record.packets_recv = record.packets_recv.saturating_add(stat.packets_recv);
        record.packets_sent = record.packets_sent.saturating_add(stat.packets_sent);
        record.bytes_recv = record.bytes_recv.saturating_add(stat.bytes_recv);
        record.bytes_sent = record.bytes_sent.saturating_add(stat.bytes_sent);
        record.errin = record.errin.saturating_add(stat.errin);
        record.errout = record.errout.saturating_add(stat.errout);
        record.dropout = record.dropout.saturating_add(stat.dropout);
    }
    record
}

/// Sum every record into a single one named `all`.
pub fn io_counters_all(records: &[InterfaceRecord]) -> InterfaceRecord {
    records.iter().fold(
        InterfaceRecord::named(ALL_INTERFACES),
        |mut total, r| {
            total.packets_recv = total.packets_recv.saturating_add(r.packets_recv);
            total.packets_sent = total.packets_sent.saturating_add(r.packets_sent);
            total.bytes_recv = total.bytes_recv.saturating_add(r.bytes_recv);
            total.bytes_sent = total.bytes_sent.saturating_add(r.bytes_sent);
            total.errin = total.errin.saturating_add(r.errin);
            total.errout = total.errout.saturating_add(r.errout);
            total.dropout = total.dropout.saturating_add(r.dropout);
            total
        },
    )
}
