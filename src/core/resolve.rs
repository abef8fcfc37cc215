// query -> stance-adjusted display name
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::document::CatalogEntry;
use crate::core::stance::normalize;
use crate::core::store::CatalogStore;
use crate::core::types::{ActiveStance, CatalogRotation, NaturalStance, Rotation};

pub const UNKNOWN_TRICK: &str = "Unknown Trick";
pub const UNKNOWN_LATE_TRICK: &str = "Unknown Late Trick";

/// A trick as the rider experienced it, plus an optional trick performed
/// right after it in the same stance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickQuery {
    pub spin: i32,
    pub flip: i32,
    pub body: i32,
    pub natural_stance: NaturalStance,
    #[serde(default)]
    pub active_stance: ActiveStance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_params: Option<Rotation>,
}

impl TrickQuery {
    pub fn new(rotation: Rotation, natural_stance: NaturalStance, active_stance: ActiveStance) -> Self {
        Self {
            spin: rotation.spin,
            flip: rotation.flip,
            body: rotation.body,
            natural_stance,
            active_stance,
            late_params: None,
        }
    }

    pub fn with_late(mut self, late: Rotation) -> Self {
        self.late_params = Some(late);
        self
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.spin, self.flip, self.body)
    }

    pub fn normalized(&self) -> CatalogRotation {
        normalize(self.rotation(), self.natural_stance, self.active_stance)
    }

    //late trick shares the base trick's stance context
    pub fn normalized_late(&self) -> Option<CatalogRotation> {
        self.late_params.map(|r| normalize(r, self.natural_stance, self.active_stance))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub trick_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_trick_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub late_trick_other_names: Vec<String>,
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_resolved: Option<bool>,
}

impl ResolutionResult {
    /// Base aliases with the late suffix attached, for display.
    ///
    /// `["Pretzel Flip"]` with late trick `"Kickflip"` becomes
    /// `["Pretzel Flip Late Kickflip"]`. Without a late trick the aliases
    /// come back unchanged.
    pub fn combined_other_names(&self) -> Vec<String> {
        match &self.late_trick_name {
            Some(late) => self.other_names.iter().map(|n| format!("{n} Late {late}")).collect(),
            None => self.other_names.clone(),
        }
    }

    pub fn fully_resolved(&self) -> bool {
        self.resolved && self.late_resolved.unwrap_or(true)
    }
}

fn names_of(entry: Option<&CatalogEntry>, sentinel: &str) -> (String, Vec<String>) {
    match entry {
        Some(e) => (e.canonical_name.clone(), e.other_names.clone()),
        None => (sentinel.to_string(), Vec::new()),
    }
}

impl CatalogStore {
    //never fails: misses resolve to UNKNOWN_TRICK / UNKNOWN_LATE_TRICK
    pub fn resolve(&self, query: &TrickQuery) -> ResolutionResult {
        let key = query.normalized().key();
        let base = self.lookup(&key);
        debug!(%key, found = base.is_some(), natural = %query.natural_stance, active = %query.active_stance, "base trick lookup");

        let (base_name, other_names) = names_of(base, UNKNOWN_TRICK);
        let mut trick_name = match query.active_stance.prefix() {
            Some(prefix) => format!("{prefix} {base_name}"),
            None => base_name,
        }
        .trim()
        .to_string();

        let mut result = ResolutionResult {
            trick_name: String::new(),
            other_names,
            late_trick_name: None,
            late_trick_other_names: Vec::new(),
            resolved: base.is_some(),
            late_resolved: None,
        };

        if let Some(late_rotation) = query.normalized_late() {
            let late_key = late_rotation.key();
            let late = self.lookup(&late_key);
            debug!(key = %late_key, found = late.is_some(), "late trick lookup");

            let (late_name, late_aliases) = names_of(late, UNKNOWN_LATE_TRICK);
            trick_name = format!("{trick_name} Late {late_name}");
            result.late_trick_name = Some(late_name);
            result.late_trick_other_names = late_aliases;
            result.late_resolved = Some(late.is_some());
        }

        result.trick_name = trick_name;
        result
    }
}

pub fn resolve(query: &TrickQuery, store: &CatalogStore) -> ResolutionResult {
    store.resolve(query)
}
