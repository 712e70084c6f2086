//! CLI commands for legend-release
//!
//! - **pack**: bump the patch version and build the distributable archive
//! - **validate**: check an archive against submission rules
//! - **version**: show, bump or retag the plugin version
//! - **i18n**: translation lookups and placeholder `.qm` generation
//!
//! All commands accept `&ProjectContext` so the configuration is loaded once.

pub mod i18n;
pub mod pack;
pub mod validate;
pub mod version;

pub use i18n::{run_i18n_compile, run_i18n_locales, run_i18n_translate};
pub use pack::run_pack;
pub use validate::run_validate;
pub use version::run_version;
