//! Entry visibility and ordering

use std::cmp::Ordering;

use super::config::TreeConfig;
use super::fs::DirEntry;

/// Check if an entry should be shown under the given configuration.
pub fn is_visible(entry: &DirEntry, config: &TreeConfig) -> bool {
    if !config.show_hidden && (entry.is_hidden || entry.name.starts_with('.')) {
        return false;
    }
    !(entry.is_dir && config.is_excluded(&entry.name))
}

/// Directories first, then case-insensitive name order.
pub fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Drop invisible entries and sort the rest.
///
/// The sort is stable, so names that compare equal keep listing order.
pub fn filter_entries(entries: Vec<DirEntry>, config: &TreeConfig) -> Vec<DirEntry> {
    let mut visible: Vec<DirEntry> = entries
        .into_iter()
        .filter(|entry| is_visible(entry, config))
        .collect();
    visible.sort_by(compare_entries);
    visible
}
