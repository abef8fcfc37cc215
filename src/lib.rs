//! Skateboard trick naming.
//!
//! Two halves share one key scheme (`S{spin},F{flip},B{body}`):
//!
//! - [`catalog`] turns a hand-edited list of rotations and names into a
//!   versioned [`TrickCatalog`] document.
//! - [`core`] loads that document into a read-only [`CatalogStore`] and
//!   resolves rider-relative queries against it, mirroring rotation
//!   directions for regular and switch riders before lookup.

pub mod catalog;
pub mod config;
pub mod core;

pub use crate::catalog::document::{CatalogEntry, TrickCatalog, TrickParameters, CATALOG_VERSION};
pub use crate::catalog::generator::{build_catalog, build_from_path, build_from_text, BuildReport};
pub use crate::config::TrickConfig;
pub use crate::core::error::{CatalogError, Result};
pub use crate::core::resolve::{resolve, ResolutionResult, TrickQuery, UNKNOWN_LATE_TRICK, UNKNOWN_TRICK};
pub use crate::core::stance::normalize;
pub use crate::core::store::CatalogStore;
pub use crate::core::types::{ActiveStance, CatalogRotation, NaturalStance, Rotation, TrickKey};
