use crate::models::CachedComic;
use std::collections::BTreeMap;

/// Key prefix kept from the original extension's storage layout, so a cached
/// date persists as `dilbert-<date>.data` / `.desc` / `.url`.
const KEY_PREFIX: &str = "dilbert-";
const DATA_SUFFIX: &str = ".data";
const DESC_SUFFIX: &str = ".desc";
const URL_SUFFIX: &str = ".url";

/// Holds at most one comic, keyed by its date. Storing a new comic always
/// evicts whatever was resident, whatever its date; there is no expiry timer
/// because only "today" is ever stored and a new day misses on the key.
#[derive(Debug, Default)]
pub struct ComicCache {
    slot: Option<CachedComic>,
}

impl ComicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present only when the resident entry's date equals `date` exactly.
    pub fn get(&self, date: &str) -> Option<&CachedComic> {
        self.slot.as_ref().filter(|comic| comic.date == date)
    }

    pub fn has(&self, date: &str) -> bool {
        self.get(date).is_some()
    }

    /// The only mutator: discards any resident entry and stores `comic`.
    pub fn put(&mut self, comic: CachedComic) {
        self.slot = Some(comic);
    }

    /// The persisted key-value form: three keys per resident date, or an
    /// empty map. Rewriting the whole map on persist is what clears prior
    /// dates' keys.
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        if let Some(comic) = &self.slot {
            let base = format!("{KEY_PREFIX}{}", comic.date);
            entries.insert(format!("{base}{DATA_SUFFIX}"), comic.image_data.clone());
            entries.insert(format!("{base}{DESC_SUFFIX}"), comic.caption.clone());
            entries.insert(format!("{base}{URL_SUFFIX}"), comic.source_url.clone());
        }
        entries
    }

    /// Rebuild from the persisted map. A partial triple (or anything else
    /// unexpected) yields an empty cache rather than a half-filled slot.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        let slot = entries.keys().find_map(|key| {
            let base = key.strip_suffix(DESC_SUFFIX)?;
            let date = base.strip_prefix(KEY_PREFIX)?;
            Some(CachedComic {
                date: date.to_string(),
                image_data: entries.get(&format!("{base}{DATA_SUFFIX}"))?.clone(),
                caption: entries.get(key)?.clone(),
                source_url: entries.get(&format!("{base}{URL_SUFFIX}"))?.clone(),
            })
        });
        Self { slot }
    }
}
