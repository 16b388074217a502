//! Cutlist partitioning
//!
//! Derives the ordered units that drive generation: one per non-empty cutlist item.
//! Empty items are skipped and never consume an index, so indices stay dense and 0-based
//! over the emitted units only.

use crate::error::HostError;
use crate::host::CadHost;
use crate::part::CutlistItem;
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One emitted structural member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutlistUnit {
    /// Position among emitted units (dense, 0-based).
    pub index: usize,
    pub item_name: String,
    /// First body of the item in iteration order.
    pub representative_body: String,
}

/// Partition cutlist items into emitted units, preserving item order.
pub fn partition(items: &[CutlistItem]) -> Vec<CutlistUnit> {
    items
        .iter()
        .filter_map(|item| {
            let body = item.representative_body();
            if body.is_none() {
                debug!(item = %item.name, "Skipping empty cutlist item");
            }
            body.map(|body| (item, body))
        })
        .enumerate()
        .map(|(index, (item, body))| CutlistUnit {
            index,
            item_name: item.name.clone(),
            representative_body: body.to_string(),
        })
        .collect()
}

/// Read the part's cutlist items from the host and partition them.
pub fn partition_part<H: CadHost + ?Sized>(
    host: &H,
    part: &DocumentId,
) -> Result<Vec<CutlistUnit>, HostError> {
    let items = host.cutlist_items(part)?;
    let units = partition(&items);
    debug!(
        part = %part,
        items = items.len(),
        units = units.len(),
        "Partitioned cutlist"
    );
    Ok(units)
}
