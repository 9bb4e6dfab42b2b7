use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::models::{InvoiceGroup, LineItem};

/// 按 Reference 分组 (保序: 组按首次出现顺序, 组内保持原始行顺序)
///
/// Reference 为空的行不属于任何发票, 跳过并告警
pub fn group_by_reference(items: Vec<LineItem>) -> Vec<InvoiceGroup> {
    let mut groups: IndexMap<String, InvoiceGroup> = IndexMap::new();
    let mut skipped = 0usize;

    for item in items {
        if item.reference.trim().is_empty() {
            skipped += 1;
            continue;
        }
        match groups.entry(item.reference.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(item),
            Entry::Vacant(entry) => {
                let reference = entry.key().clone();
                entry.insert(InvoiceGroup::new(reference, item));
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows with a blank Reference", skipped);
    }

    groups.into_values().collect()
}
