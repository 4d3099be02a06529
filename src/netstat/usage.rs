// Detection of interface names truncated by netstat's fixed-width Name column.
//
// netstat cuts long names, so distinct interfaces can print the same name.
// They still carry distinct `<Link#N>` identifiers on their link rows, which
// is what we group by. Collection and classification are separate passes:
// a name can only be classified once all of its link identifiers are known.

use std::collections::{BTreeMap, HashMap};

use super::NetstatRow;

/// LinkID -> indices of the link rows carrying it, for one literal name.
pub type TruncationIndex = BTreeMap<u32, Vec<usize>>;

#[derive(Debug, Clone)]
struct NameEntry {
    name: String,
    rows: Vec<usize>,
    links: TruncationIndex,
}

/// How the rows under one literal name map to logical interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One interface; its link row holds the authoritative counters.
    Single { link_row: usize },
    /// Several interfaces share the printed name, one per LinkID, in row order.
    Truncated { groups: Vec<(u32, Vec<usize>)> },
    /// One LinkID repeated over several link rows. Rows are summed into a
    /// single record, which may over-count.
    Ambiguous { link_id: u32, link_rows: Vec<usize> },
    /// Only address rows, no link row to take counters from.
    Unlinked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName<'a> {
    pub name: &'a str,
    pub rows: &'a [usize],
    pub resolution: Resolution,
}

/// Per-name usage of link identifiers over one netstat output.
#[derive(Debug, Clone, Default)]
pub struct NameUsage {
    entries: Vec<NameEntry>,
}

impl NameUsage {
    /// First pass: collect rows and link identifiers per literal name,
    /// keeping names in order of first appearance.
    pub fn new(rows: &[NetstatRow]) -> Self {
        let mut entries: Vec<NameEntry> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for (index, row) in rows.iter().enumerate() {
            let name = row.stat.name.as_str();
            let pos = *positions.entry(name).or_insert_with(|| {
                entries.push(NameEntry {
                    name: name.to_string(),
                    rows: Vec::new(),
                    links: TruncationIndex::new(),
                });
                entries.len() - 1
            });
            let entry = &mut entries[pos];
            entry.rows.push(index);
            if let Some(link_id) = row.link_id() {
                entry.links.entry(link_id).or_default().push(index);
            }
        }
        Self { entries }
    }

    /// True when at least one printed name stands for several interfaces.
    pub fn is_truncated(&self) -> bool {
        self.entries.iter().any(|e| e.links.len() > 1)
    }

    /// Names with link rows that all share a single LinkID.
    pub fn not_truncated(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.links.len() == 1)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn truncated(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.links.len() > 1)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn index(&self, name: &str) -> Option<&TruncationIndex> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.links)
    }

    /// Second pass: classify every name.
    pub fn resolve(&self) -> Vec<ResolvedName<'_>> {
        self.entries
            .iter()
            .map(|entry| ResolvedName {
                name: &entry.name,
                rows: &entry.rows,
                resolution: classify(entry),
            })
            .collect()
    }

    /// Resolution of a single name, if it appeared in the output.
    pub fn resolution(&self, name: &str) -> Option<Resolution> {
        self.entries.iter().find(|e| e.name == name).map(classify)
    }
}

fn classify(entry: &NameEntry) -> Resolution {
    let mut groups: Vec<(u32, Vec<usize>)> = entry
        .links
        .iter()
        .map(|(id, rows)| (*id, rows.clone()))
        .collect();

    match groups.len() {
        0 => {
            tracing::debug!(interface = %entry.name, "no link row; skipping");
            Resolution::Unlinked
        }
        1 => {
            let (link_id, link_rows) = groups.remove(0);
            if let [link_row] = link_rows.as_slice() {
                Resolution::Single {
                    link_row: *link_row,
                }
            } else {
                tracing::warn!(
                    interface = %entry.name,
                    link_id,
                    link_rows = link_rows.len(),
                    "unresolvable truncation: summing link rows into one interface"
                );
                Resolution::Ambiguous { link_id, link_rows }
            }
        }
        _ => {
            groups.sort_by_key(|(_, rows)| rows[0]);
            for (link_id, rows) in groups.iter().filter(|(_, rows)| rows.len() > 1) {
                tracing::warn!(
                    interface = %entry.name,
                    link_id,
                    link_rows = rows.len(),
                    "link identifier repeated under truncated name; summing its rows"
                );
            }
            Resolution::Truncated { groups }
        }
    }
}
