//! Plugin translations
//!
//! - **catalog**: the static (locale, context, message) table and lookup
//! - **qm**: placeholder `.qm` files for each locale
//! - **python**: `translations.py` fallback module rendered from the catalogue

pub mod catalog;
pub mod python;
pub mod qm;

pub use catalog::{available_locales, translate};
