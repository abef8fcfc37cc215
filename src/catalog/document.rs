// versioned catalog document and its JSON/TOON encodings
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{CatalogError, Result};
use crate::core::types::{Rotation, TrickKey};

/// Format version written by the builder. Loaders accept any document with
/// the same major component.
pub const CATALOG_VERSION: &str = "1.0";

/// Raw row values kept for provenance. Lookup never reads `active_stance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickParameters {
    pub spin: i32,
    pub flip: i32,
    pub body: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_stance: Option<i32>,
}

impl TrickParameters {
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.spin, self.flip, self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub composite_key: TrickKey,
    #[serde(alias = "trickName")]
    pub canonical_name: String,
    pub parameters: TrickParameters,
    #[serde(default)]
    pub other_names: Vec<String>,
}

impl CatalogEntry {
    pub fn new(parameters: TrickParameters, canonical_name: impl Into<String>, other_names: Vec<String>) -> Self {
        Self {
            composite_key: parameters.rotation().key(),
            canonical_name: canonical_name.into(),
            parameters,
            other_names,
        }
    }

    /// The key derived from `parameters`, which is what the store indexes by.
    pub fn geometry_key(&self) -> TrickKey {
        self.parameters.rotation().key()
    }

    //false for documents whose key also embeds the active stance
    pub fn key_is_consistent(&self) -> bool {
        self.composite_key == self.geometry_key()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickCatalog {
    pub version: String,
    #[serde(default)]
    pub tricks: Vec<CatalogEntry>,
}

impl TrickCatalog {
    pub fn new(tricks: Vec<CatalogEntry>) -> Self {
        Self { version: CATALOG_VERSION.to_string(), tricks }
    }

    pub fn check_version(&self) -> Result<()> {
        if major(&self.version) == major(CATALOG_VERSION) {
            Ok(())
        } else {
            Err(CatalogError::IncompatibleVersion {
                found: self.version.clone(),
                expected: CATALOG_VERSION.to_string(),
            })
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    //4-space indent, same layout the hand-maintained catalogs use
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn from_toon_str(raw: &str) -> Result<Self> {
        toon_format::decode_default(raw).map_err(|e| CatalogError::Toon(e.to_string()))
    }

    pub fn to_toon_string(&self) -> Result<String> {
        toon_format::encode_default(self).map_err(|e| CatalogError::Toon(e.to_string()))
    }
}

fn major(version: &str) -> &str {
    version.trim().split('.').next().unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toon,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "json" => Ok(DocumentFormat::Json),
            Some(ext) if ext == "toon" => Ok(DocumentFormat::Toon),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads a catalog document. The file is fully read and closed before parsing.
///
/// Does not check the version; [`crate::core::store::CatalogStore::load`] does.
pub fn read_catalog(path: &Path) -> Result<TrickCatalog> {
    let format = DocumentFormat::from_path(path)?;
    let raw = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let doc = match format {
        DocumentFormat::Json => TrickCatalog::from_json_str(&raw)?,
        DocumentFormat::Toon => TrickCatalog::from_toon_str(&raw)?,
    };
    info!(path = %path.display(), version = %doc.version, tricks = doc.tricks.len(), "read catalog document");
    Ok(doc)
}

pub fn write_catalog(path: &Path, doc: &TrickCatalog) -> Result<()> {
    let body = match DocumentFormat::from_path(path)? {
        DocumentFormat::Json => doc.to_json_string()?,
        DocumentFormat::Toon => doc.to_toon_string()?,
    };
    fs::write(path, body).map_err(|e| CatalogError::io(path, e))?;
    info!(path = %path.display(), tricks = doc.tricks.len(), "wrote catalog document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mk_entry(spin: i32, flip: i32, body: i32, name: &str, aliases: &[&str]) -> CatalogEntry {
        let params = TrickParameters { spin, flip, body, active_stance: Some(0) };
        CatalogEntry::new(params, name, aliases.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn entry_key_comes_from_geometry_only() {
        let e = mk_entry(180, -360, 0, "Varial Heelflip", &[]);
        assert_eq!(e.composite_key.as_str(), "S180,F-360,B0");
        assert!(e.key_is_consistent());
    }

    #[test]
    fn json_uses_camel_case_field_names() {
        let doc = TrickCatalog::new(vec![mk_entry(0, 0, 0, "Ollie", &[])]);
        let raw = doc.to_json_string().unwrap();
        assert!(raw.contains("\"compositeKey\": \"S0,F0,B0\""));
        assert!(raw.contains("\"canonicalName\": \"Ollie\""));
        assert!(raw.contains("\"activeStance\": 0"));
        assert!(raw.contains("\"otherNames\": []"));
        assert!(raw.contains("\n    \"version\""));
    }

    #[test]
    fn non_utf8_bytes_surface_as_encoding_error() {
        let bad = String::from_utf8(vec![b'{', 0xff, b'}']).unwrap_err();
        let err = CatalogError::from(bad);
        assert!(matches!(err, CatalogError::Encoding(_)));
        assert!(err.to_string().starts_with("catalog document is not valid UTF-8"));
    }

    #[test]
    fn legacy_trick_name_field_is_accepted() {
        let raw = r#"{
            "version": "1.0",
            "tricks": [{
                "compositeKey": "S0,F360,B0,A0",
                "trickName": "Kickflip",
                "parameters": { "spin": 0, "flip": 360, "body": 0, "activeStance": 0 }
            }]
        }"#;
        let doc = TrickCatalog::from_json_str(raw).unwrap();
        let e = &doc.tricks[0];
        assert_eq!(e.canonical_name, "Kickflip");
        assert!(e.other_names.is_empty());
        assert!(!e.key_is_consistent());
        assert_eq!(e.geometry_key().as_str(), "S0,F360,B0");
    }

    #[test]
    fn parameters_without_active_stance_deserialize() {
        let raw = r#"{"version":"1.0","tricks":[{"compositeKey":"S0,F0,B0","canonicalName":"Ollie","parameters":{"spin":0,"flip":0,"body":0},"otherNames":[]}]}"#;
        let doc = TrickCatalog::from_json_str(raw).unwrap();
        assert_eq!(doc.tricks[0].parameters.active_stance, None);
    }

    #[test]
    fn version_compatibility_is_by_major_component() {
        let mut doc = TrickCatalog::new(Vec::new());
        assert!(doc.check_version().is_ok());
        doc.version = "1.3".into();
        assert!(doc.check_version().is_ok());
        doc.version = "2.0".into();
        match doc.check_version().unwrap_err() {
            CatalogError::IncompatibleVersion { found, expected } => {
                assert_eq!(found, "2.0");
                assert_eq!(expected, CATALOG_VERSION);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn toon_document_reads_back() {
        let doc = TrickCatalog::new(vec![
            mk_entry(360, 0, 0, "Frontside 360 Shuv", &["360 Shuv"]),
            mk_entry(180, -360, 0, "Varial Heelflip", &[]),
        ]);
        let raw = doc.to_toon_string().unwrap();
        assert_eq!(TrickCatalog::from_toon_str(&raw).unwrap(), doc);
    }

    #[test]
    fn files_are_dispatched_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let doc = TrickCatalog::new(vec![mk_entry(0, 0, 0, "Ollie", &[])]);

        let json = dir.path().join("catalog.json");
        write_catalog(&json, &doc).unwrap();
        assert_eq!(read_catalog(&json).unwrap(), doc);

        let bad = dir.path().join("catalog.yaml");
        assert!(matches!(write_catalog(&bad, &doc), Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
