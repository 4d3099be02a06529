// netstat parsing, truncation detection and aggregation against captured output

mod common;

use common::{NETSTAT_HEADER, NETSTAT_NOT_TRUNCATED, NETSTAT_TRUNCATED};
use ifcounters::models::InterfaceRecord;
use ifcounters::netstat::*;

fn records(output: &str) -> Vec<InterfaceRecord> {
    interface_records(output).expect("netstat output parses")
}

#[test]
fn header_line_yields_header_error() {
    assert_eq!(parse_netstat_line(NETSTAT_HEADER), Err(ParseError::Header));
}

#[test]
fn link_row_error_columns_keep_their_values() {
    let row = parse_netstat_line(
        "en0   1500  <Link#4>    a8:66:7f:dd:ee:ff  5708989     7 7295722068  3494252     9  379533492     0 230",
    )
    .unwrap();
    assert_eq!(row.link_id(), Some(4));
    assert_eq!(row.stat.errin, 7);
    assert_eq!(row.stat.errout, 9);
}

#[test]
fn not_truncated_output_rows_and_link_ids() {
    let rows = parse_netstat_output(NETSTAT_NOT_TRUNCATED).unwrap();
    assert_eq!(rows.len(), 8);

    let link_ids: Vec<Option<u32>> = rows.iter().map(|r| r.link_id()).collect();
    assert_eq!(
        link_ids,
        vec![Some(1), None, None, None, Some(2), Some(3), Some(4), None]
    );
    assert_eq!(rows[1].kind, RowKind::Ipv6);
    assert_eq!(rows[2].kind, RowKind::Ipv4);

    let usage = NameUsage::new(&rows);
    assert!(!usage.is_truncated());
    assert_eq!(usage.not_truncated(), vec!["lo0", "gif0", "stf0", "en0"]);
}

#[test]
fn truncated_output_rows_and_link_ids() {
    let rows = parse_netstat_output(NETSTAT_TRUNCATED).unwrap();
    assert_eq!(rows.len(), 11);

    for (row, expected) in rows[6..].iter().zip([88, 90, 92, 93, 95]) {
        assert_eq!(row.stat.name, "utun8");
        assert_eq!(row.link_id(), Some(expected));
    }

    let usage = NameUsage::new(&rows);
    assert!(usage.is_truncated());
    assert_eq!(usage.truncated(), vec!["utun8"]);
    assert_eq!(usage.not_truncated(), vec!["lo0", "gif0", "stf0"]);
    assert_eq!(usage.index("utun8").map(|i| i.len()), Some(5));
}

#[test]
fn down_marker_is_stripped_from_names() {
    let rows = parse_netstat_output(NETSTAT_NOT_TRUNCATED).unwrap();
    assert_eq!(rows[4].stat.name, "gif0");
    assert!(!rows[4].stat.is_up);
    assert!(rows[0].stat.is_up);
}

#[test]
fn aggregate_not_truncated_takes_link_row_counters() {
    let records = records(NETSTAT_NOT_TRUNCATED);
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["lo0", "gif0", "stf0", "en0"]);

    let lo0 = &records[0];
    assert_eq!(lo0.packets_recv, 27190978);
    assert_eq!(lo0.bytes_recv, 12824763793);
    assert_eq!(lo0.bytes_sent, 12824763793);

    let en0 = &records[3];
    assert_eq!(en0.packets_recv, 5708989);
    assert_eq!(en0.bytes_recv, 7295722068);
    assert_eq!(en0.packets_sent, 3494252);
    assert_eq!(en0.bytes_sent, 379533492);
    assert_eq!(en0.dropout, 230);
    assert_eq!(en0.transmit_speed, 0);
}

#[test]
fn aggregate_truncated_emits_one_record_per_link_id() {
    let records = records(NETSTAT_TRUNCATED);
    let utun: Vec<&InterfaceRecord> = records.iter().filter(|r| r.name == "utun8").collect();
    assert_eq!(utun.len(), 5);

    let bytes: Vec<u64> = utun.iter().map(|r| r.bytes_recv).collect();
    assert_eq!(bytes, vec![27175, 29554, 29244, 28267, 28593]);
    assert!(utun.iter().all(|r| r.packets_recv == 286));

    assert_eq!(records.len(), 8);
    assert_eq!(records.iter().filter(|r| r.name == "lo0").count(), 1);
}

#[test]
fn reparsing_is_identical() {
    assert_eq!(records(NETSTAT_TRUNCATED), records(NETSTAT_TRUNCATED));
    assert_eq!(records(NETSTAT_NOT_TRUNCATED), records(NETSTAT_NOT_TRUNCATED));
}

#[test]
fn total_over_not_truncated_output() {
    let all = io_counters_all(&records(NETSTAT_NOT_TRUNCATED));
    assert_eq!(all.name, ALL_INTERFACES);
    assert_eq!(all.bytes_recv, 12824763793 + 7295722068);
    assert_eq!(all.packets_sent, 27190978 + 3494252);
    assert_eq!(all.dropout, 230);
}

#[test]
fn malformed_row_aborts_whole_parse() {
    let output = format!("{NETSTAT_NOT_TRUNCATED}\nen1 1500 <Link#x> 1 0 2 3 0 4 0 0");
    let err = interface_records(&output).unwrap_err();
    assert!(matches!(err, ParseError::LinkId { .. }));
    assert!(err.to_string().contains("<Link#x>"));
}
