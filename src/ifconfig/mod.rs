// ifconfig parsing: interface blocks, media speed merge, `ifconfig -l` listing.

mod media;

pub use media::MediaUnitTable;

use crate::models::InterfaceRecord;

/// One interface's block from `ifconfig` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlock {
    pub name: String,
    /// Value of the `media:` line, if the block has one.
    pub media: Option<String>,
}

/// Split `ifconfig` output into per-interface blocks.
///
/// A block starts at a column-0 line `name: flags=...` and owns the indented
/// lines that follow it.
pub fn parse_ifconfig_output(output: &str) -> Vec<MediaBlock> {
    let mut blocks: Vec<MediaBlock> = Vec::new();
    let mut in_block = false;

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with(char::is_whitespace) {
            in_block = match line.split_once(':') {
                Some((name, _)) if !name.is_empty() => {
                    blocks.push(MediaBlock {
                        name: name.to_string(),
                        media: None,
                    });
                    true
                }
                _ => false,
            };
            continue;
        }
        if !in_block {
            continue;
        }
        if let Some(block) = blocks.last_mut()
            && block.media.is_none()
            && let Some(media) = line.trim_start().strip_prefix("media:")
        {
            block.media = Some(media.trim().to_string());
        }
    }
    blocks
}

/// Fill transmit/receive speed on records whose name matches an ifconfig block.
///
/// Never fails: interfaces without a media line (loopback, tunnels) or with
/// an unrecognised unit keep their current speeds. Every record sharing a
/// name gets the same speed, since truncated duplicates share the physical link.
pub fn merge_ifconfig_output(
    output: &str,
    records: &mut [InterfaceRecord],
    units: &MediaUnitTable,
) {
    for block in parse_ifconfig_output(output) {
        let Some(media) = block.media.as_deref() else {
            continue;
        };
        let Some(speed) = units.media_speed(media) else {
            tracing::debug!(
                interface = %block.name,
                media,
                "no recognised speed in media line"
            );
            continue;
        };
        for record in records.iter_mut().filter(|r| r.name == block.name) {
            record.transmit_speed = speed;
            record.receive_speed = speed;
        }
    }
}

/// Interface names from `ifconfig -l`.
pub fn parse_interface_list(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}
