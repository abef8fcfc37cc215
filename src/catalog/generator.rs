/*
Inputs:

    raw trick list (spin, flip, body, activeStance, name per line)

Outputs:

    TrickCatalog (versioned, one entry per parsed row, input order kept)

    BuildReport (skipped lines with reasons, key collisions)

Responsibilities:

    Key every entry by rotation geometry only

    Split names into canonical name + aliases

    Never abort the batch on a bad line
*/
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::alias::extract_aliases;
use crate::catalog::document::{CatalogEntry, TrickCatalog};
use crate::catalog::rows::{parse_line, LineOutcome, RawTrickRow, SkipReason};
use crate::core::error::{CatalogError, Result};
use crate::core::types::TrickKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Two input rows that landed on the same geometry key. The later row wins
/// once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: TrickKey,
    pub first_line: usize,
    pub second_line: usize,
    pub kept: String,
    pub dropped: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub emitted: usize,
    pub skipped: Vec<SkippedRow>,
    pub collisions: Vec<KeyCollision>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty()
    }
}

pub fn build_entry(row: &RawTrickRow) -> CatalogEntry {
    let name = extract_aliases(&row.raw_name);
    CatalogEntry::new(row.parameters(), name.canonical_name, name.other_names)
}

/// Builds a catalog from rows tagged with their source line number.
pub fn build_catalog<I>(rows: I) -> (TrickCatalog, BuildReport)
where
    I: IntoIterator<Item = (usize, RawTrickRow)>,
{
    let mut report = BuildReport::default();
    let mut tricks: Vec<CatalogEntry> = Vec::new();
    //key -> (source line, index into tricks)
    let mut seen: HashMap<TrickKey, (usize, usize)> = HashMap::new();

    for (line, row) in rows {
        let entry = build_entry(&row);
        debug!(line, key = %entry.composite_key, name = %entry.canonical_name, "catalog entry");

        if let Some(&(first_line, idx)) = seen.get(&entry.composite_key) {
            let collision = KeyCollision {
                key: entry.composite_key.clone(),
                first_line,
                second_line: line,
                kept: entry.canonical_name.clone(),
                dropped: tricks[idx].canonical_name.clone(),
            };
            warn!(
                key = %collision.key,
                first_line,
                second_line = line,
                kept = %collision.kept,
                dropped = %collision.dropped,
                "lookup key collision, later row wins"
            );
            report.collisions.push(collision);
        }

        seen.insert(entry.composite_key.clone(), (line, tricks.len()));
        tricks.push(entry);
    }

    report.emitted = tricks.len();
    (TrickCatalog::new(tricks), report)
}

/// Builds a catalog from the raw line format. Line numbers are 1-based.
pub fn build_from_text(text: &str) -> (TrickCatalog, BuildReport) {
    let mut skipped = Vec::new();
    let mut rows = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match parse_line(raw) {
            LineOutcome::Blank | LineOutcome::Comment => {}
            LineOutcome::Row(row) => rows.push((line, row)),
            LineOutcome::Malformed(reason) => {
                warn!(line, %reason, "skipping malformed row");
                skipped.push(SkippedRow { line, reason });
            }
        }
    }

    let (catalog, mut report) = build_catalog(rows);
    report.skipped = skipped;
    info!(
        emitted = report.emitted,
        skipped = report.skipped.len(),
        collisions = report.collisions.len(),
        "built trick catalog"
    );
    (catalog, report)
}

pub fn build_from_path(path: &Path) -> Result<(TrickCatalog, BuildReport)> {
    let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    Ok(build_from_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::document::CATALOG_VERSION;
    use pretty_assertions::assert_eq;

    fn mk_row(spin: i32, flip: i32, body: i32, stance: i32, name: &str) -> RawTrickRow {
        RawTrickRow::new(spin, flip, body, stance, name)
    }

    #[test]
    fn entry_key_ignores_active_stance() {
        let a = build_entry(&mk_row(180, -360, 0, 0, "Varial Heelflip"));
        let b = build_entry(&mk_row(180, -360, 0, 2, "Varial Heelflip"));
        assert_eq!(a.composite_key.as_str(), "S180,F-360,B0");
        assert_eq!(a.composite_key, b.composite_key);
        assert_eq!(b.parameters.active_stance, Some(2));
    }

    #[test]
    fn entry_carries_aliases() {
        let e = build_entry(&mk_row(360, 0, 0, 0, "Pretzel (360 Shuv, Pretzel Flip)"));
        assert_eq!(e.canonical_name, "Pretzel");
        assert_eq!(e.other_names, vec!["360 Shuv".to_string(), "Pretzel Flip".to_string()]);
    }

    #[test]
    fn text_build_skips_and_reports_bad_lines() {
        let text = "\
# spin,flip,body,activeStance,name
Spin,Flip,Body,Active,Name

0,0,0,0,Ollie
0,360,0
180,-360,0,0,Varial Heelflip
";
        let (catalog, report) = build_from_text(text);

        assert_eq!(catalog.version, CATALOG_VERSION);
        let names: Vec<&str> = catalog.tricks.iter().map(|t| t.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["Ollie", "Varial Heelflip"]);

        assert_eq!(report.emitted, 2);
        let lines: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 5]);
        assert_eq!(report.skipped[1].reason, SkipReason::TooFewFields(3));
        assert!(report.collisions.is_empty());
    }

    #[test]
    fn collisions_are_reported_and_both_rows_emitted() {
        let (catalog, report) = build_catalog(vec![
            (1, mk_row(0, 360, 0, 0, "Kickflip")),
            (2, mk_row(0, -360, 0, 0, "Heelflip")),
            (3, mk_row(0, 360, 0, 1, "Fakie Kickflip")),
        ]);

        assert_eq!(catalog.tricks.len(), 3);
        assert_eq!(report.collisions.len(), 1);
        let c = &report.collisions[0];
        assert_eq!(c.key.as_str(), "S0,F360,B0");
        assert_eq!((c.first_line, c.second_line), (1, 3));
        assert_eq!(c.kept, "Fakie Kickflip");
        assert_eq!(c.dropped, "Kickflip");
        assert!(!report.is_clean());
    }

    #[test]
    fn third_collision_points_at_latest_winner() {
        let (_, report) = build_catalog(vec![
            (1, mk_row(0, 0, 0, 0, "A")),
            (2, mk_row(0, 0, 0, 0, "B")),
            (3, mk_row(0, 0, 0, 0, "C")),
        ]);
        assert_eq!(report.collisions.len(), 2);
        assert_eq!(report.collisions[1].first_line, 2);
        assert_eq!(report.collisions[1].dropped, "B");
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_from_path(&dir.path().join("trick_names.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
