// key -> entry index over a loaded catalog document
use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::document::{read_catalog, CatalogEntry, TrickCatalog};
use crate::core::error::{CatalogError, Result};
use crate::core::types::{CatalogRotation, TrickKey};

/// Read-only lookup table built once from a [`TrickCatalog`].
///
/// Nothing mutates it after load, so a shared reference (or an `Arc`) can be
/// handed to any number of resolver calls.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    version: String,
    entries: HashMap<TrickKey, CatalogEntry>,
    overwritten: Vec<TrickKey>,
}

impl CatalogStore {
    fn empty(version: &str) -> Self {
        Self { version: version.to_string(), entries: HashMap::new(), overwritten: Vec::new() }
    }

    //set-once: a second entry for the same key is an error
    fn insert_entry(&mut self, entry: CatalogEntry) -> Result<()> {
        let key = entry.geometry_key();
        match self.entries.get(&key) {
            None => {
                self.entries.insert(key, entry);
                Ok(())
            }
            Some(old) if old == &entry => Ok(()),
            Some(old) => Err(CatalogError::DuplicateKey {
                key,
                existing: old.canonical_name.clone(),
                incoming: entry.canonical_name,
            }),
        }
    }

    //last-one-wins, remembers which keys were replaced
    fn insert_entry_overwrite(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        let key = entry.geometry_key();
        let old = self.entries.insert(key.clone(), entry);
        if old.is_some() {
            self.overwritten.push(key);
        }
        old
    }

    fn check_key(entry: &CatalogEntry) {
        if !entry.key_is_consistent() {
            warn!(
                stored = %entry.composite_key,
                geometry = %entry.geometry_key(),
                name = %entry.canonical_name,
                "stored key disagrees with parameters, indexing by geometry"
            );
        }
    }

    //indexed by geometry key, later entries replace earlier ones
    pub fn load(doc: TrickCatalog) -> Result<Self> {
        doc.check_version()?;
        let mut store = Self::empty(&doc.version);

        for entry in doc.tricks {
            Self::check_key(&entry);
            if let Some(old) = store.insert_entry_overwrite(entry) {
                warn!(key = %old.geometry_key(), replaced = %old.canonical_name, "duplicate lookup key, later entry wins");
            }
        }

        info!(version = %store.version, tricks = store.entries.len(), replaced = store.overwritten.len(), "loaded trick catalog");
        Ok(store)
    }

    //fails on the first conflicting key, identical duplicates pass
    pub fn load_strict(doc: TrickCatalog) -> Result<Self> {
        doc.check_version()?;
        let mut store = Self::empty(&doc.version);

        for entry in doc.tricks {
            Self::check_key(&entry);
            store.insert_entry(entry)?;
        }

        info!(version = %store.version, tricks = store.entries.len(), "loaded trick catalog (strict)");
        Ok(store)
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::load(read_catalog(path)?)
    }

    pub fn open_strict(path: &Path) -> Result<Self> {
        Self::load_strict(read_catalog(path)?)
    }

    pub fn lookup(&self, key: &TrickKey) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn lookup_rotation(&self, rotation: impl Into<CatalogRotation>) -> Option<&CatalogEntry> {
        self.entries.get(&rotation.into().key())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //keys replaced during load, document order
    pub fn overwritten(&self) -> &[TrickKey] {
        &self.overwritten
    }

    //sorted by key so listings are stable
    pub fn iter(&self) -> impl Iterator<Item = (&TrickKey, &CatalogEntry)> + '_ {
        let mut items: Vec<_> = self.entries.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::document::{TrickParameters, CATALOG_VERSION};
    use crate::core::types::Rotation;

    fn mk_entry(spin: i32, flip: i32, body: i32, name: &str) -> CatalogEntry {
        CatalogEntry::new(TrickParameters { spin, flip, body, active_stance: None }, name, Vec::new())
    }

    fn mk_doc(entries: Vec<CatalogEntry>) -> TrickCatalog {
        TrickCatalog::new(entries)
    }

    #[test]
    fn lookup_hits_and_misses() {
        let store = CatalogStore::load(mk_doc(vec![
            mk_entry(0, 0, 0, "Ollie"),
            mk_entry(180, -360, 0, "Varial Heelflip"),
        ]))
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.version(), CATALOG_VERSION);
        let hit = store.lookup(&Rotation::new(180, -360, 0).key()).unwrap();
        assert_eq!(hit.canonical_name, "Varial Heelflip");
        assert!(store.lookup_rotation(Rotation::new(-180, 360, 0)).is_none());
    }

    #[test]
    fn later_entry_replaces_earlier_one() {
        let store = CatalogStore::load(mk_doc(vec![
            mk_entry(0, 360, 0, "Kickflip"),
            mk_entry(0, 360, 0, "Kickflip Again"),
        ]))
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup_rotation(Rotation::new(0, 360, 0)).unwrap().canonical_name, "Kickflip Again");
        assert_eq!(store.overwritten(), &[Rotation::new(0, 360, 0).key()]);
    }

    #[test]
    fn strict_load_rejects_conflicting_keys() {
        let err = CatalogStore::load_strict(mk_doc(vec![
            mk_entry(0, 360, 0, "Kickflip"),
            mk_entry(0, 360, 0, "Kickflip Again"),
        ]))
        .unwrap_err();

        match err {
            CatalogError::DuplicateKey { key, existing, incoming } => {
                assert_eq!(key.as_str(), "S0,F360,B0");
                assert_eq!(existing, "Kickflip");
                assert_eq!(incoming, "Kickflip Again");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn strict_load_tolerates_identical_duplicates() {
        let store = CatalogStore::load_strict(mk_doc(vec![mk_entry(0, 0, 0, "Ollie"), mk_entry(0, 0, 0, "Ollie")])).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn legacy_stance_keys_are_indexed_by_geometry() {
        let entry = mk_entry(0, 360, 0, "Kickflip");
        let mut legacy = entry.clone();
        legacy.composite_key = serde_json::from_str("\"S0,F360,B0,A0\"").unwrap();

        let store = CatalogStore::load(mk_doc(vec![legacy])).unwrap();
        assert_eq!(store.lookup(&entry.composite_key).unwrap().canonical_name, "Kickflip");
    }

    #[test]
    fn extreme_row_values_are_indexed() {
        let (doc, report) = crate::catalog::generator::build_from_text("-2147483648,0,0,0,Weird\n");
        assert!(report.is_clean());
        let store = CatalogStore::load(doc).unwrap();
        assert_eq!(store.lookup_rotation(Rotation::new(i32::MIN, 0, 0)).unwrap().canonical_name, "Weird");
        assert!(store.lookup_rotation(CatalogRotation::new(2_147_483_648, 0, 0)).is_none());
    }

    #[test]
    fn incompatible_version_fails_load() {
        let mut doc = mk_doc(vec![mk_entry(0, 0, 0, "Ollie")]);
        doc.version = "2.0".into();
        assert!(matches!(CatalogStore::load(doc), Err(CatalogError::IncompatibleVersion { .. })));
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let store = CatalogStore::load(mk_doc(vec![
            mk_entry(360, 0, 0, "Frontside 360 Shuv"),
            mk_entry(0, 0, 0, "Ollie"),
            mk_entry(180, -360, 0, "Varial Heelflip"),
        ]))
        .unwrap();
        let keys: Vec<&str> = store.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["S0,F0,B0", "S180,F-360,B0", "S360,F0,B0"]);
    }

    #[test]
    fn two_loads_agree_on_every_key() {
        let doc = mk_doc(vec![mk_entry(0, 0, 0, "Ollie"), mk_entry(0, 360, 0, "Kickflip")]);
        let a = CatalogStore::load(doc.clone()).unwrap();
        let b = CatalogStore::load(doc).unwrap();
        for (key, entry) in a.iter() {
            assert_eq!(b.lookup(key), Some(entry));
        }
        assert_eq!(a.len(), b.len());
    }
}
