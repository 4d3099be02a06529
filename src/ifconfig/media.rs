// Media subtype -> link speed, e.g. "1000baseT" -> 1000 Mbit/s.

/// Units ifconfig prints after the speed number, with their Mbit/s multiplier.
const DEFAULT_UNITS: &[(&str, u64)] = &[
    ("baseT", 1),
    ("base-T", 1),
    ("baseT/UTP", 1),
    ("baseTX", 1),
    ("baseFX", 1),
    ("baseSX", 1),
    ("baseLX", 1),
    ("baseCX", 1),
    ("GbaseT", 1000),
    ("Gbase-T", 1000),
    ("GbaseSR", 1000),
    ("GbaseLR", 1000),
    ("GbaseCX4", 1000),
    ("GbaseKR", 1000),
    ("GbaseSX", 1000),
    ("GbaseLX", 1000),
    ("GbaseCU", 1000),
    ("GbaseCR", 1000),
];

/// Case-insensitive unit table. Start from [`Default`] and add entries for
/// media families the defaults don't know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUnitTable {
    units: Vec<(String, u64)>,
}

impl Default for MediaUnitTable {
    fn default() -> Self {
        Self {
            units: DEFAULT_UNITS
                .iter()
                .map(|(unit, mbps)| (unit.to_ascii_lowercase(), *mbps))
                .collect(),
        }
    }
}

impl MediaUnitTable {
    pub fn empty() -> Self {
        Self { units: Vec::new() }
    }

    /// Add or replace a unit.
    pub fn insert(&mut self, unit: &str, mbps: u64) {
        let unit = unit.to_ascii_lowercase();
        match self.units.iter_mut().find(|(u, _)| *u == unit) {
            Some(entry) => entry.1 = mbps,
            None => self.units.push((unit, mbps)),
        }
    }

    pub fn with_unit(mut self, unit: &str, mbps: u64) -> Self {
        self.insert(unit, mbps);
        self
    }

    pub fn multiplier(&self, unit: &str) -> Option<u64> {
        self.units
            .iter()
            .find(|(u, _)| u.eq_ignore_ascii_case(unit))
            .map(|(_, mbps)| *mbps)
    }

    /// Speed of one media token such as `1000baseT` or `2.5GBase-T`.
    pub fn token_speed(&self, token: &str) -> Option<u64> {
        let token = token.trim_matches(|c: char| matches!(c, '(' | ')' | '<' | '>' | ','));
        let split = token
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(token.len());
        let (number, unit) = token.split_at(split);
        if number.is_empty() || unit.is_empty() {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        let mbps = self.multiplier(unit)?;
        Some((value * mbps as f64).round() as u64)
    }

    /// Speed from the value of a `media:` line; the first recognised token wins.
    pub fn media_speed(&self, media: &str) -> Option<u64> {
        media
            .split_whitespace()
            .find_map(|token| self.token_speed(token))
    }
}
