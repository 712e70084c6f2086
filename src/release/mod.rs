//! Plugin version lifecycle
//!
//! The plugin version lives in two files that must agree:
//!
//! 1. **Version resource** (`version.py`): MAJOR/MINOR/PATCH/PRERELEASE/BUILD
//!    assignments, re-emitted in full on every write.
//! 2. **Metadata** (`metadata.txt`): the `version=` line QGIS reads, edited in
//!    place so the rest of the file is preserved.
//!
//! # Bump policies
//!
//! - `Version::bump` (release manager): cascading reset, explicit prerelease.
//! - `bump_patch_only` (packaging): patch + 1 on the raw metadata string,
//!   no reset, unchanged input when the string is not `A.B.C`.

pub mod metadata;
pub mod resource;
pub mod store;
pub mod version;

pub use store::{SyncStatus, VersionStore};
pub use version::{Prerelease, Version, VersionBump};
